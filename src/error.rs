//! Error type shared by the loader, encoder, and output sink.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScriptError>;

/// Every failure is terminal for the current build.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The source is not syntactically valid CSV.
    #[error("{}", parse_message(.line, .message))]
    Parse { line: Option<u64>, message: String },

    /// A row does not have exactly six fields.
    #[error("Row {row} incorrect length: expected 6 fields, found {actual}")]
    Shape { row: usize, actual: usize },

    /// A field that must be an `i32` could not be parsed as one.
    #[error("Row {row} field {field}: '{value}' is not a 32-bit integer")]
    FieldType {
        row: usize,
        field: usize,
        value: String,
    },

    #[error("io error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destination exists and the overwrite policy declined it.
    #[error("Output file '{}' already exists", .0.display())]
    OutputExists(PathBuf),

    #[error("File format '{0}' not supported")]
    UnsupportedFormat(String),
}

fn parse_message(line: &Option<u64>, message: &str) -> String {
    match line {
        Some(line) => format!("parse error at line {line}: {message}"),
        None => format!("parse error: {message}"),
    }
}

impl ScriptError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScriptError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<csv::Error> for ScriptError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|pos| pos.line());
        let message = match err.kind() {
            csv::ErrorKind::Utf8 { err, .. } => format!("invalid UTF-8: {err}"),
            _ => err.to_string(),
        };
        ScriptError::Parse { line, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_message_names_row() {
        let err = ScriptError::Shape { row: 3, actual: 5 };
        assert_eq!(
            err.to_string(),
            "Row 3 incorrect length: expected 6 fields, found 5"
        );
    }

    #[test]
    fn test_field_type_message_names_value() {
        let err = ScriptError::FieldType {
            row: 2,
            field: 0,
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Row 2 field 0: 'abc' is not a 32-bit integer"
        );
    }

    #[test]
    fn test_parse_message_with_and_without_line() {
        let with_line = ScriptError::Parse {
            line: Some(4),
            message: "bad quote".to_string(),
        };
        assert_eq!(with_line.to_string(), "parse error at line 4: bad quote");

        let without_line = ScriptError::Parse {
            line: None,
            message: "bad quote".to_string(),
        };
        assert_eq!(without_line.to_string(), "parse error: bad quote");
    }

    #[test]
    fn test_output_exists_message() {
        let err = ScriptError::OutputExists(PathBuf::from("game.sdf"));
        assert_eq!(err.to_string(), "Output file 'game.sdf' already exists");
    }
}
