//! Structured error types shared across the DPRW crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`DprwError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (key paths, type names, line numbers).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for configuration, construction and runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum DprwError {
    /// Malformed documents, missing fields and values of the wrong kind.
    #[error("configuration error: {0}")]
    Config(ErrorInfo),
    /// A `type` field naming no registered variant.
    #[error("unrecognized type: {0}")]
    UnknownType(ErrorInfo),
    /// Command-line option parsing and `!option` substitution failures.
    #[error("option error: {0}")]
    Options(ErrorInfo),
    /// Values rejected by a component constructor.
    #[error("invalid parameter: {0}")]
    Parameter(ErrorInfo),
    /// Filesystem and stream failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl DprwError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            DprwError::Config(info)
            | DprwError::UnknownType(info)
            | DprwError::Options(info)
            | DprwError::Parameter(info)
            | DprwError::Io(info) => info,
        }
    }

    fn info_mut(&mut self) -> &mut ErrorInfo {
        match self {
            DprwError::Config(info)
            | DprwError::UnknownType(info)
            | DprwError::Options(info)
            | DprwError::Parameter(info)
            | DprwError::Io(info) => info,
        }
    }

    /// Returns the context value stored under `key`, if any.
    pub fn context(&self, key: &str) -> Option<&str> {
        self.info().context.get(key).map(String::as_str)
    }

    /// Adds a context entry unless one is already present under `key`.
    ///
    /// Inner layers know the most precise location, so they win.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.info_mut()
            .context
            .entry(key.into())
            .or_insert_with(|| value.into());
        self
    }

    /// Shorthand for a [`DprwError::Parameter`] failure.
    pub fn parameter(code: impl Into<String>, message: impl Into<String>) -> Self {
        DprwError::Parameter(ErrorInfo::new(code, message))
    }
}
