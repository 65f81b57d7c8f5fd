use std::fs;

use dprw_model::output::{format_header, format_record, CsvFile, RecordSink};
use tempfile::tempdir;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn header_and_records_use_comma_space() {
    assert_eq!(format_header(&names(&["t", "s_x"])).as_deref(), Some("# t, s_x"));
    assert_eq!(format_record(&[0.5, 1.0, -2.25]).as_deref(), Some("0.5, 1, -2.25"));
    assert_eq!(format_header(&[]), None);
    assert_eq!(format_record(&[]), None);
}

#[test]
fn csv_file_writes_header_then_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let mut sink = CsvFile::new(&path, true);
    sink.write_header(&names(&["t", "s_x", "s_y", "s_z"])).unwrap();
    sink.write_record(&[0.0, 0.0, 0.0, 1.0]).unwrap();
    sink.write_record(&[0.1, 0.0, 0.0, 1.0]).unwrap();
    sink.flush().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "# t, s_x, s_y, s_z\n0, 0, 0, 1\n0.1, 0, 0, 1\n");
}

#[test]
fn csv_file_can_skip_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let mut sink = CsvFile::new(&path, false);
    sink.write_header(&names(&["a"])).unwrap();
    sink.write_record(&[3.0]).unwrap();
    sink.flush().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "3\n");
}

#[test]
fn csv_file_is_not_created_before_first_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("never.csv");
    let mut sink = CsvFile::new(&path, true);
    sink.write_header(&[]).unwrap();
    sink.flush().unwrap();
    assert!(!path.exists());
}

#[test]
fn unwritable_path_reports_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("out.csv");
    let mut sink = CsvFile::new(&path, true);
    let err = sink.write_record(&[1.0]).unwrap_err();
    assert_eq!(err.info().code, "create-failed");
}

#[test]
fn new_header_replaces_previous_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let mut sink = CsvFile::new(&path, true);
    for value in [1.0, 2.0] {
        sink.write_header(&names(&["s_z"])).unwrap();
        sink.write_record(&[value]).unwrap();
        sink.flush().unwrap();
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), "# s_z
2
");
}
