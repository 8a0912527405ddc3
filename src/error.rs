//! Error types for bitacora

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bitacora
#[derive(Debug, Error)]
pub enum BitacoraError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    #[error("Storage read failed: {0}")]
    StorageRead(String),

    #[error("Not a bitacora directory: {0}")]
    NotBitacoraDirectory(PathBuf),

    #[error("Invalid date reference: {0}")]
    InvalidDateReference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl BitacoraError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BitacoraError::NotBitacoraDirectory(_) => 2,
            BitacoraError::Validation(_) | BitacoraError::InvalidDateReference(_) => 3,
            BitacoraError::NotFound(_) => 4,
            _ => 1,
        }
    }

    /// HTTP status class this error maps to at the presentation boundary
    pub fn status_code(&self) -> u16 {
        match self {
            BitacoraError::Validation(_)
            | BitacoraError::InvalidDateReference(_)
            | BitacoraError::Json(_) => 400,
            BitacoraError::NotFound(_) => 404,
            _ => 500,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            BitacoraError::NotBitacoraDirectory(path) => {
                format!(
                    "Not a bitacora directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'bitacora init' in this directory to configure storage\n\
                    • Navigate to an existing bitacora directory\n\
                    • Set BITACORA_ROOT environment variable to your journal path",
                    path.display()
                )
            }
            BitacoraError::NotFound(id) => {
                format!(
                    "Entry not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'bitacora list' to see entry ids\n\
                    • Ids look like entry-1737102600000",
                    id
                )
            }
            BitacoraError::InvalidDateReference(input) => {
                format!(
                    "Invalid date reference: '{}'\n\n\
                    Valid date references:\n\
                    • today, yesterday\n\
                    • monday, tuesday, ..., sunday (most recent)\n\
                    • Specific dates: YYYY-MM-DD (e.g., 2025-01-17)",
                    input
                )
            }
            BitacoraError::StorageWrite(_) | BitacoraError::StorageRead(_) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Run 'bitacora init' to create the table and bucket\n\
                    • Check 'bitacora config --list' for the table and region in use",
                    self
                )
            }
            BitacoraError::Editor(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that your editor is installed and in PATH\n\
                    • Set EDITOR environment variable (e.g., export EDITOR=nano)\n\
                    • Configure editor: bitacora config editor 'vim'",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using BitacoraError
pub type Result<T> = std::result::Result<T, BitacoraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_bitacora_directory_suggestion() {
        let err = BitacoraError::NotBitacoraDirectory(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("bitacora init"));
        assert!(msg.contains("BITACORA_ROOT"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_not_found_suggestions() {
        let err = BitacoraError::NotFound("entry-1".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("'entry-1'"));
        assert!(msg.contains("bitacora list"));
    }

    #[test]
    fn test_storage_error_suggestions() {
        let err = BitacoraError::StorageWrite("table missing".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.starts_with("Storage write failed: table missing"));
        assert!(msg.contains("bitacora init"));

        let err = BitacoraError::StorageRead("denied".to_string());
        assert!(err
            .display_with_suggestions()
            .starts_with("Storage read failed: denied"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            BitacoraError::NotBitacoraDirectory(PathBuf::from(".")).exit_code(),
            2
        );
        assert_eq!(BitacoraError::Validation("x".into()).exit_code(), 3);
        assert_eq!(BitacoraError::NotFound("x".into()).exit_code(), 4);
        assert_eq!(BitacoraError::StorageRead("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(BitacoraError::Validation("x".into()).status_code(), 400);
        assert_eq!(BitacoraError::NotFound("x".into()).status_code(), 404);
        assert_eq!(BitacoraError::StorageWrite("x".into()).status_code(), 500);
        assert_eq!(BitacoraError::Config("x".into()).status_code(), 500);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = BitacoraError::Template("Template error".to_string());
        let msg = err.display_with_suggestions();
        // Thiserror prefixes with the error type
        assert_eq!(msg, "Template error: Template error");
    }
}
