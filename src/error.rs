//! Error types for threshold parsing, PSI parsing and source access.

use crate::resource::{Field, Resource};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A `WARN:CRIT` override that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    #[error("invalid threshold '{input}': expected WARN:CRIT")]
    Shape { input: String },

    #[error("invalid threshold '{input}': '{part}' is not a number")]
    NotANumber { input: String, part: String },

    #[error("invalid threshold '{input}': '{part}' is negative")]
    Negative { input: String, part: String },
}

/// Pressure file contents that do not match the kernel format.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("unrecognized qualifier '{0}'")]
    UnrecognizedQualifier(String),

    #[error("malformed token '{0}', expected key=value")]
    MalformedToken(String),

    #[error("invalid number '{value}' for {key}")]
    InvalidNumber { key: String, value: String },

    #[error("missing field {0}")]
    MissingField(Field),
}

/// Anything that turns a run into an UNKNOWN result.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("cannot read {resource} pressure from {}: {source}", .path.display())]
    SourceUnavailable {
        resource: Resource,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unexpected {resource} pressure format: {source}")]
    Format {
        resource: Resource,
        #[source]
        source: FormatError,
    },
}

pub type Result<T> = std::result::Result<T, CheckError>;
