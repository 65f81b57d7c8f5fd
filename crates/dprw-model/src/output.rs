//! Record sinks for sampled observables.
//!
//! Both sinks share one text format: a `# a, b, c` header line followed by
//! one `x, y, z` line per record. Empty sequences write nothing.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use dprw_core::{DprwError, ErrorInfo};

/// Destination for a header followed by numeric records.
pub trait RecordSink: fmt::Debug + Send {
    /// Starts a table by writing the column names.
    fn write_header(&mut self, names: &[String]) -> Result<(), DprwError>;

    /// Writes one row of values.
    fn write_record(&mut self, values: &[f64]) -> Result<(), DprwError>;

    /// Flushes buffered output.
    fn flush(&mut self) -> Result<(), DprwError> {
        Ok(())
    }
}

/// Formats a header line, or `None` when there is nothing to write.
pub fn format_header(names: &[String]) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    Some(format!("# {}", names.join(", ")))
}

/// Formats a record line, or `None` when there is nothing to write.
pub fn format_record(values: &[f64]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    let cells: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    Some(cells.join(", "))
}

fn write_error(path: &str, err: io::Error) -> DprwError {
    DprwError::Io(ErrorInfo::new("write-failed", err.to_string()).with_context("path", path))
}

/// Delimited text file, created on the first write.
///
/// Each header starts a fresh table: the file is recreated on the next
/// write, so running a measurement again replaces its previous output.
#[derive(Debug)]
pub struct CsvFile {
    path: PathBuf,
    header: bool,
    out: Option<BufWriter<File>>,
}

impl CsvFile {
    /// Creates a sink writing to `path`. Nothing touches the filesystem
    /// until the first line is written.
    pub fn new(path: impl Into<PathBuf>, header: bool) -> Self {
        Self {
            path: path.into(),
            header,
            out: None,
        }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the header line is written.
    pub fn header(&self) -> bool {
        self.header
    }

    fn write_line(&mut self, line: &str) -> Result<(), DprwError> {
        if self.out.is_none() {
            let file = File::create(&self.path).map_err(|err| {
                DprwError::Io(
                    ErrorInfo::new("create-failed", err.to_string())
                        .with_context("path", self.path.display().to_string()),
                )
            })?;
            log::debug!("opened output file {}", self.path.display());
            self.out = Some(BufWriter::new(file));
        }
        if let Some(out) = self.out.as_mut() {
            writeln!(out, "{line}")
                .map_err(|err| write_error(&self.path.display().to_string(), err))?;
        }
        Ok(())
    }
}

impl RecordSink for CsvFile {
    fn write_header(&mut self, names: &[String]) -> Result<(), DprwError> {
        self.flush()?;
        self.out = None;
        if !self.header {
            return Ok(());
        }
        match format_header(names) {
            Some(line) => self.write_line(&line),
            None => Ok(()),
        }
    }

    fn write_record(&mut self, values: &[f64]) -> Result<(), DprwError> {
        match format_record(values) {
            Some(line) => self.write_line(&line),
            None => Ok(()),
        }
    }

    fn flush(&mut self) -> Result<(), DprwError> {
        match self.out.as_mut() {
            Some(out) => out
                .flush()
                .map_err(|err| write_error(&self.path.display().to_string(), err)),
            None => Ok(()),
        }
    }
}

/// Delimited text on standard output.
#[derive(Debug)]
pub struct Stdout {
    header: bool,
    out: io::Stdout,
}

impl Stdout {
    /// Creates a sink on the process's standard output.
    pub fn new(header: bool) -> Self {
        Self {
            header,
            out: io::stdout(),
        }
    }

    /// Whether the header line is written.
    pub fn header(&self) -> bool {
        self.header
    }

    fn write_line(&mut self, line: &str) -> Result<(), DprwError> {
        let mut lock = self.out.lock();
        writeln!(lock, "{line}").map_err(|err| write_error("<stdout>", err))
    }
}

impl RecordSink for Stdout {
    fn write_header(&mut self, names: &[String]) -> Result<(), DprwError> {
        if !self.header {
            return Ok(());
        }
        match format_header(names) {
            Some(line) => self.write_line(&line),
            None => Ok(()),
        }
    }

    fn write_record(&mut self, values: &[f64]) -> Result<(), DprwError> {
        match format_record(values) {
            Some(line) => self.write_line(&line),
            None => Ok(()),
        }
    }

    fn flush(&mut self) -> Result<(), DprwError> {
        self.out.flush().map_err(|err| write_error("<stdout>", err))
    }
}
