use std::fs;

use dprw_build::{build_measurement, parse_document, Options};
use dprw_core::DprwError;

fn config(out: &str, omega: &str) -> String {
    format!(
        r#"
type: Ensemble
spin_count: 1
duration: 1.0
time_step: 0.1
initial_condition: {{type: Polarized3D, spin: [0, 0, 1]}}
scattering_model: {{type: Isotropic3D, scattering_rate: 1.0e-9}}
magnetic_field: {{type: Zero}}
soc_model: {{type: Isotropic3D, omega: {omega}}}
output: {{type: CSVFile, path: "{out}"}}
"#
    )
}

#[test]
fn static_spin_is_written_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("run.csv");
    let document = parse_document(&config(&out.display().to_string(), "0")).unwrap();
    let mut measurement = build_measurement(&document, &Options::new()).unwrap();
    let table = measurement.run().unwrap();
    assert_eq!(table.len(), 10);

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], "# t, s_x, s_y, s_z");
    assert_eq!(lines[1], "0, 0, 0, 1");
    assert!(lines[10].starts_with("0.9") && lines[10].ends_with(", 0, 0, 1"));
}

#[test]
fn repeated_runs_replace_the_csv_table() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("run.csv");
    let document = parse_document(&config(&out.display().to_string(), "0")).unwrap();
    let mut measurement = build_measurement(&document, &Options::new()).unwrap();
    measurement.run().unwrap();
    measurement.run().unwrap();

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 11);
    assert_eq!(text.matches("# t").count(), 1);
}

#[test]
fn failed_build_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("run.csv");
    let document = parse_document(&config(&out.display().to_string(), "!option omega")).unwrap();
    let err = build_measurement(&document, &Options::new()).unwrap_err();
    assert!(matches!(err, DprwError::Options(_)));
    assert!(!out.exists());
}

#[test]
fn echo_decay_runs_from_yaml() {
    let yaml = r#"
type: EchoDecay
spin_count: 8
duration: 1.0
time_step: 0.25
threads: 2
initial_condition: {type: Polarized3D, spin: [1, 0, 0]}
scattering_model: {type: Isotropic3D, scattering_rate: 0}
soc_model: {type: Dresselhaus, omega: 3}
output: {type: Stdout, header: false}
"#;
    let document = parse_document(yaml).unwrap();
    let mut measurement = build_measurement(&document, &Options::new()).unwrap();
    let table = measurement.run().unwrap();
    assert_eq!(table.columns, vec!["s_x", "s_y", "s_z"]);
    for row in &table.rows {
        assert!((row[0] - 1.0).abs() < 1e-9);
    }
}
