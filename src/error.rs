use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::coerce::FieldKind;

/// Failure to turn one raw value into a typed value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoerceError {
    #[error("invalid {kind} value '{raw}'")]
    InvalidValue { kind: FieldKind, raw: String },
    #[error("{kind} value '{raw}' does not fit in {width} bits")]
    Overflow {
        kind: FieldKind,
        width: u32,
        raw: String,
    },
    #[error("no coercion rule for {kind}")]
    UnsupportedKind { kind: FieldKind },
}

impl CoerceError {
    /// Attaches the key and line the raw value came from.
    pub fn at(self, key: &str, line: usize) -> LoadError {
        let key = key.to_string();
        match self {
            CoerceError::InvalidValue { kind, raw } => LoadError::InvalidValue {
                line,
                key,
                kind,
                raw,
            },
            CoerceError::Overflow { kind, width, raw } => LoadError::Overflow {
                line,
                key,
                kind,
                width,
                raw,
            },
            CoerceError::UnsupportedKind { kind } => LoadError::UnsupportedKind { line, key, kind },
        }
    }
}

/// Everything that can abort a load. The first error ends the scan.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: invalid line: {text}")]
    MalformedLine { line: usize, text: String },
    #[error("line {line}: unknown field '{key}'")]
    UnknownField { line: usize, key: String },
    #[error("line {line}: field '{key}' has unsupported kind {kind}")]
    UnsupportedKind {
        line: usize,
        key: String,
        kind: FieldKind,
    },
    #[error("line {line}: invalid {kind} value '{raw}' for field '{key}'")]
    InvalidValue {
        line: usize,
        key: String,
        kind: FieldKind,
        raw: String,
    },
    #[error("line {line}: {kind} value '{raw}' for field '{key}' does not fit in {width} bits")]
    Overflow {
        line: usize,
        key: String,
        kind: FieldKind,
        width: u32,
        raw: String,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    /// Line number the error was raised on, if it came from the document body.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::Io { .. } => None,
            LoadError::MalformedLine { line, .. }
            | LoadError::UnknownField { line, .. }
            | LoadError::UnsupportedKind { line, .. }
            | LoadError::InvalidValue { line, .. }
            | LoadError::Overflow { line, .. } => Some(*line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_error_keeps_context_when_attached_to_a_line() {
        let err = CoerceError::Overflow {
            kind: FieldKind::Int(8),
            width: 8,
            raw: "300".to_string(),
        }
        .at("Small", 4);

        assert_eq!(err.line(), Some(4));
        assert_eq!(
            err.to_string(),
            "line 4: i8 value '300' for field 'Small' does not fit in 8 bits"
        );
    }

    #[test]
    fn io_errors_name_the_path() {
        let err = LoadError::io(
            "missing.conf",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().starts_with("failed to read missing.conf"));
        assert_eq!(err.line(), None);
    }
}
