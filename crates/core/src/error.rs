use serde::{Deserialize, Serialize};
use std::fmt;

/// The three terminal failure classes of a translation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Document-level structure: missing or repeated fault-tree name line.
    Format,
    /// Grammar and identifier syntax.
    Parsing,
    /// Semantic and graph-level violations.
    FaultTree,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Format => f.write_str("format"),
            ErrorKind::Parsing => f.write_str("parsing"),
            ErrorKind::FaultTree => f.write_str("fault tree"),
        }
    }
}

/// A translation error. `line` is 0 for document-level failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, thiserror::Error)]
#[error("{file}:{line}: {kind} error: {message}")]
pub struct TranslateError {
    pub kind: ErrorKind,
    pub file: String,
    pub line: u32,
    pub message: String,
}

impl TranslateError {
    pub fn new(kind: ErrorKind, file: &str, line: u32, message: impl Into<String>) -> Self {
        TranslateError {
            kind,
            file: file.to_owned(),
            line,
            message: message.into(),
        }
    }

    pub fn format(file: &str, line: u32, message: impl Into<String>) -> Self {
        TranslateError::new(ErrorKind::Format, file, line, message)
    }

    pub fn parsing(file: &str, line: u32, message: impl Into<String>) -> Self {
        TranslateError::new(ErrorKind::Parsing, file, line, message)
    }

    pub fn fault_tree(file: &str, line: u32, message: impl Into<String>) -> Self {
        TranslateError::new(ErrorKind::FaultTree, file, line, message)
    }

    /// Serialize to the machine-readable shape printed by `--output json`.
    /// All fields are always present.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "file":    self.file,
            "kind":    self.kind,
            "line":    self.line,
            "message": self.message,
        })
    }
}

/// Failure while rendering a validated tree as MEF XML.
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("xml write failed: {0}")]
    Write(String),
    #[error("serialized document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Failure translating a document that has to be read first.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Translate(#[from] TranslateError),
}

impl FileError {
    /// Same shape as [`TranslateError::to_json_value`]; read failures carry
    /// kind `"io"` and line 0.
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FileError::Io { path, source } => serde_json::json!({
                "file":    path,
                "kind":    "io",
                "line":    0,
                "message": source.to_string(),
            }),
            FileError::Translate(e) => e.to_json_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_json_has_io_kind() {
        let e = FileError::Io {
            path: "missing.txt".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(e.to_json_value()["kind"], "io");
        assert!(e.to_string().starts_with("cannot read missing.txt"));
    }

    #[test]
    fn display_includes_location_and_kind() {
        let e = TranslateError::fault_tree("ft.txt", 3, "gate 'g2' is redefined");
        assert_eq!(
            e.to_string(),
            "ft.txt:3: fault tree error: gate 'g2' is redefined"
        );
    }

    #[test]
    fn json_value_uses_snake_case_kind() {
        let e = TranslateError::parsing("ft.txt", 2, "unexpected '+'");
        let v = e.to_json_value();
        assert_eq!(v["kind"], "parsing");
        assert_eq!(v["line"], 2);
        assert_eq!(v["file"], "ft.txt");
        let e = TranslateError::fault_tree("ft.txt", 0, "no top event");
        assert_eq!(e.to_json_value()["kind"], "fault_tree");
    }
}
