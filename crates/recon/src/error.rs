use std::fmt;

use crate::model::Side;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (no key pairs, empty name, bad delimiter).
    ConfigValidation(String),
    /// Input rows don't form a rectangular table under one header.
    MalformedInput { line: usize, detail: String },
    /// A match key names a column absent from a dataset's header.
    MissingField { side: Side, column: String },
    /// IO error (file read/write).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MalformedInput { line, detail } => {
                write!(f, "malformed input at line {line}: {detail}")
            }
            Self::MissingField { side, column } => {
                write!(f, "{side} dataset: missing key column '{column}'")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
