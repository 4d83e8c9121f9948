//! Error taxonomy for sedline
//!
//! Library code returns [`SedError`] so callers can match on the failure
//! class. The binary wraps settings and logging failures with `anyhow`.

use std::io;
use std::path::PathBuf;

/// Broad failure class, used for exit codes and for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Parse,
    Compile,
    Source,
    Read,
    Write,
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum SedError {
    #[error("missing expression")]
    MissingExpression,

    #[error("in-place editing requires at least one input file")]
    InPlaceWithoutFiles,

    #[error("couldn't read script file {path}: {source}")]
    ScriptFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid substitute expression: {script}")]
    InvalidSubstitute { script: String },

    #[error("unknown option to `s': {flag:?} in {script}")]
    UnknownFlag { script: String, flag: char },

    #[error("too many fields in substitute expression: {script}")]
    ExtraFields { script: String },

    #[error("unsupported delimiter {delimiter:?} in {script}")]
    UnsupportedDelimiter { script: String, delimiter: char },

    #[error("extra characters after command: {script}")]
    TrailingCharacters { script: String },

    #[error("unknown command: {script}")]
    UnknownCommand { script: String },

    #[error("invalid regex pattern {pattern:?}: {message}")]
    InvalidRegex {
        pattern: String,
        message: String,
        #[source]
        source: regex::Error,
    },

    #[error("{}: {source}", .path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read error: {source}")]
    Read {
        #[source]
        source: io::Error,
    },

    #[error("write error: {source}")]
    Write {
        #[source]
        source: io::Error,
    },

    #[error("operation cancelled")]
    Cancelled,
}

impl SedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SedError::MissingExpression
            | SedError::InPlaceWithoutFiles
            | SedError::ScriptFile { .. } => ErrorKind::Config,
            SedError::InvalidSubstitute { .. }
            | SedError::UnknownFlag { .. }
            | SedError::ExtraFields { .. }
            | SedError::UnsupportedDelimiter { .. }
            | SedError::TrailingCharacters { .. }
            | SedError::UnknownCommand { .. } => ErrorKind::Parse,
            SedError::InvalidRegex { .. } => ErrorKind::Compile,
            SedError::Source { .. } => ErrorKind::Source,
            SedError::Read { .. } => ErrorKind::Read,
            SedError::Write { .. } => ErrorKind::Write,
            SedError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

/// Result type alias using SedError.
pub type Result<T> = std::result::Result<T, SedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(SedError::MissingExpression.kind(), ErrorKind::Config);
        assert_eq!(SedError::Cancelled.kind(), ErrorKind::Cancelled);
        assert_eq!(
            SedError::UnknownCommand { script: "x".into() }.kind(),
            ErrorKind::Parse
        );
    }

    #[test]
    fn test_read_error_carries_underlying_message() {
        let err = SedError::Read {
            source: io::Error::other("read failed"),
        };
        assert!(err.to_string().contains("read failed"));
    }

    #[test]
    fn test_source_error_names_path() {
        let err = SedError::Source {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("missing.txt: "));
        assert!(msg.contains("No such file"));
    }
}
