//! Named option values supplied on the command line.

use std::collections::BTreeMap;

use dprw_core::{DprwError, ErrorInfo};

/// Name to raw-text map consulted by `!option` substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    values: BTreeMap<String, String>,
}

impl Options {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Raw text stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no options are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parses `--key=value` and `--key value` tokens. Later occurrences of a
    /// key replace earlier ones.
    pub fn from_args<I, S>(args: I) -> Result<Self, DprwError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        let mut options = Options::new();
        let mut position = 0;
        while position < tokens.len() {
            let token = &tokens[position];
            let Some(body) = token.strip_prefix("--") else {
                return Err(DprwError::Options(
                    ErrorInfo::new(
                        "expected-option",
                        format!("expected `--key` at argument {}, found `{token}`", position + 1),
                    )
                    .with_context("argument", (position + 1).to_string()),
                ));
            };
            let (key, value) = match body.split_once('=') {
                Some((key, value)) => {
                    position += 1;
                    (key.to_string(), value.to_string())
                }
                None => {
                    let value = tokens.get(position + 1).ok_or_else(|| {
                        DprwError::Options(
                            ErrorInfo::new(
                                "option-value-missing",
                                format!("option `{body}` has no value"),
                            )
                            .with_context("option", body),
                        )
                    })?;
                    position += 2;
                    (body.to_string(), value.clone())
                }
            };
            if key.is_empty() {
                return Err(DprwError::Options(ErrorInfo::new(
                    "option-key-empty",
                    format!("empty option name in `{token}`"),
                )));
            }
            options.insert(key, value);
        }
        Ok(options)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Options {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut options = Options::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}
