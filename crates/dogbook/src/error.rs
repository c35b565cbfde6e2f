//! Error types for dogbook.
//!
//! This module defines all error types used throughout the dogbook crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for dogbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Errors ===
    /// No record with the given id exists in the collection.
    #[error("dog with id {id} not found")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A record with the given id is already in the collection.
    #[error("dog with id {id} already exists")]
    AlreadyExists {
        /// The conflicting id.
        id: String,
    },

    /// User input failed validation.
    #[error("{message}")]
    Validation {
        /// Human-readable reason, suitable for showing to the user.
        message: String,
    },

    // === Persistence Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// The persistence service could not be reached.
    #[error("persistence unavailable: {0}")]
    Unavailable(String),

    /// The stored collection could not be decoded.
    #[error("malformed data under key '{key}': {source}")]
    MalformedData {
        /// The key whose value failed to decode.
        key: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for dogbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for the given id.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create an already-exists error for the given id.
    #[must_use]
    pub fn already_exists(id: impl Into<String>) -> Self {
        Self::AlreadyExists { id: id.into() }
    }

    /// Create a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an unavailable-service error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Check if this error means the requested record does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error came from the persistence service rather than
    /// from the request itself.
    #[must_use]
    pub fn is_persistence_error(&self) -> bool {
        matches!(
            self,
            Self::DatabaseOpen { .. }
                | Self::DatabaseQuery(_)
                | Self::DatabaseMigration { .. }
                | Self::Unavailable(_)
                | Self::MalformedData { .. }
                | Self::DirectoryCreate { .. }
                | Self::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("abc");
        assert_eq!(err.to_string(), "dog with id abc not found");

        let err = Error::unavailable("disk full");
        assert_eq!(err.to_string(), "persistence unavailable: disk full");
    }

    #[test]
    fn test_error_is_not_found() {
        assert!(Error::not_found("x").is_not_found());
        assert!(!Error::already_exists("x").is_not_found());
        assert!(!Error::validation("x").is_not_found());
    }

    #[test]
    fn test_error_is_persistence_error() {
        assert!(Error::unavailable("down").is_persistence_error());
        assert!(!Error::not_found("x").is_persistence_error());
        assert!(!Error::validation("Name is required").is_persistence_error());
    }

    #[test]
    fn test_validation_error_display_is_bare_message() {
        let err = Error::validation("Breed is required");
        assert_eq!(err.to_string(), "Breed is required");
    }

    #[test]
    fn test_already_exists_display() {
        let err = Error::already_exists("dup-1");
        assert!(err.to_string().contains("dup-1"));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
        assert!(err.is_persistence_error());
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        let err: Error = result.unwrap_err().into();
        assert!(matches!(err, Error::DatabaseQuery(_)));
        assert!(err.is_persistence_error());
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        let err: Error = json_result.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_malformed_data_display() {
        let source = serde_json::from_str::<Vec<i32>>("{").unwrap_err();
        let err = Error::MalformedData {
            key: "dogs".to_string(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("dogs"));
        assert!(err.is_persistence_error());
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "empty key".to_string(),
        };
        assert!(err.to_string().contains("empty key"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
