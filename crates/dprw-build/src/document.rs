//! YAML configuration documents and typed access to their nodes.

use std::fmt;
use std::fs;
use std::path::Path;

use dprw_core::{DprwError, ErrorInfo, Vec3};
use serde_yaml::{Mapping, Value};

/// Dotted location of a node inside a document, `<root>` for the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Path of the document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of `key` below this node.
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    /// Last key, or `None` at the root.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.0.join("."))
        }
    }
}

fn parse_error(err: &serde_yaml::Error) -> DprwError {
    let mut info = ErrorInfo::new("yaml-parse", err.to_string());
    if let Some(location) = err.location() {
        info = info
            .with_context("line", location.line().to_string())
            .with_context("column", location.column().to_string());
    }
    DprwError::Config(info)
}

/// Parses YAML text into a document.
pub fn parse_document(text: &str) -> Result<Value, DprwError> {
    serde_yaml::from_str(text).map_err(|err| parse_error(&err))
}

/// Reads and parses the YAML file at `path`.
pub fn load_document(path: &Path) -> Result<Value, DprwError> {
    let text = fs::read_to_string(path).map_err(|err| {
        DprwError::Io(
            ErrorInfo::new("read-failed", err.to_string())
                .with_context("file", path.display().to_string()),
        )
    })?;
    parse_document(&text).map_err(|err| err.with_context("file", path.display().to_string()))
}

fn kind_name(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn wrong_kind(expected: &str, node: &Value, path: &KeyPath) -> DprwError {
    let mut info = ErrorInfo::new(
        "wrong-kind",
        format!("expected {expected}, found {}", kind_name(node)),
    )
    .with_context("path", path.to_string());
    if let Some(field) = path.leaf() {
        info = info.with_context("field", field);
    }
    DprwError::Config(info)
}

/// The node as a mapping.
pub fn expect_map<'v>(node: &'v Value, path: &KeyPath) -> Result<&'v Mapping, DprwError> {
    node.as_mapping().ok_or_else(|| wrong_kind("a mapping", node, path))
}

/// Error for a required `key` absent from the mapping at `path`.
pub fn missing_field(key: &str, path: &KeyPath) -> DprwError {
    DprwError::Config(
        ErrorInfo::new("missing-field", format!("required field `{key}` is missing"))
            .with_context("field", key)
            .with_context("path", path.to_string()),
    )
}

/// The value under `key`, failing with `missing-field` when absent.
pub fn field<'v>(map: &'v Mapping, key: &str, path: &KeyPath) -> Result<&'v Value, DprwError> {
    map.get(key).ok_or_else(|| missing_field(key, path))
}

/// A real number; integers are accepted.
pub fn as_real(node: &Value, path: &KeyPath) -> Result<f64, DprwError> {
    node.as_f64().ok_or_else(|| wrong_kind("a number", node, path))
}

/// A non-negative integer.
pub fn as_count(node: &Value, path: &KeyPath) -> Result<u64, DprwError> {
    node.as_u64()
        .ok_or_else(|| wrong_kind("a non-negative integer", node, path))
}

/// A sequence of exactly three numbers.
pub fn as_vector(node: &Value, path: &KeyPath) -> Result<Vec3, DprwError> {
    let items = node
        .as_sequence()
        .ok_or_else(|| wrong_kind("a three-element sequence", node, path))?;
    if items.len() != 3 {
        return Err(DprwError::Config(
            ErrorInfo::new(
                "wrong-length",
                format!("expected 3 components, found {}", items.len()),
            )
            .with_context("path", path.to_string()),
        ));
    }
    let mut components = [0.0; 3];
    for (index, (slot, item)) in components.iter_mut().zip(items).enumerate() {
        *slot = as_real(item, &path.child(&index.to_string()))?;
    }
    Ok(Vec3::from(components))
}

/// A string.
pub fn as_text(node: &Value, path: &KeyPath) -> Result<String, DprwError> {
    node.as_str()
        .map(str::to_string)
        .ok_or_else(|| wrong_kind("a string", node, path))
}

/// A boolean.
pub fn as_flag(node: &Value, path: &KeyPath) -> Result<bool, DprwError> {
    node.as_bool().ok_or_else(|| wrong_kind("a boolean", node, path))
}
