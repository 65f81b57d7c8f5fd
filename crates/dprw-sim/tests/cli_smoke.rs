use std::fs;
use std::process::Command;

use tempfile::tempdir;

const CONFIG: &str = r#"
type: Ensemble
spin_count: 3
duration: 1.0
time_step: 0.25
threads: 2
initial_condition: {type: Polarized3D, spin: [0, 0, 1]}
scattering_model: {type: Isotropic3D, scattering_rate: 0}
magnetic_field: {type: Zero}
soc_model: {type: Isotropic3D, omega: !option omega}
output: {type: CSVFile, path: !option out}
"#;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dprw-sim"))
}

#[test]
fn missing_config_prints_usage_and_exits_with_one() {
    let output = binary().output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

#[test]
fn run_writes_csv_with_substituted_options() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("run.yaml");
    let out = dir.path().join("out.csv");
    fs::write(&config, CONFIG).unwrap();

    let status = binary()
        .arg(&config)
        .arg("--omega=0")
        .arg("--out")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["# t, s_x, s_y, s_z", "0, 0, 0, 1", "0.25, 0, 0, 1", "0.5, 0, 0, 1", "0.75, 0, 0, 1"]);
}

#[test]
fn missing_option_fails_without_output() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("run.yaml");
    let out = dir.path().join("out.csv");
    fs::write(&config, CONFIG).unwrap();

    let output = binary().arg(&config).arg("--out").arg(&out).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("omega"));
    assert!(!out.exists());
}

#[test]
fn yaml_errors_report_the_line() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("broken.yaml");
    fs::write(&config, "type: Ensemble\nspin_count: [1,\n").unwrap();

    let output = binary().arg(&config).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("YAML parsing error at line"), "stderr: {stderr}");
}

#[test]
fn stray_argument_is_rejected() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("run.yaml");
    fs::write(&config, CONFIG).unwrap();

    let output = binary().arg(&config).arg("--omega=1").arg("stray").output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("expected-option"));
}

#[test]
fn help_and_version_are_ordinary_option_names() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("run.yaml");
    let out = dir.path().join("out.csv");
    let yaml = CONFIG
        .replace("!option omega", "!option version")
        .replace("!option out", "!option help");
    fs::write(&config, yaml).unwrap();

    let status = binary()
        .arg(&config)
        .arg("--version=0")
        .arg("--help")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());
    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 5);
    assert_eq!(text.lines().nth(1), Some("0, 0, 0, 1"));
}
