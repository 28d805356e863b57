//! Custom error types for Snapshelf
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for Snapshelf operations
#[derive(Error, Debug)]
pub enum ShelfError {
    /// Configuration errors (unknown method, malformed option value, bad settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// No archive method recognizes the path
    #[error("No suitable archive method for \"{}\"", .0.display())]
    UnsupportedArchive(PathBuf),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// External archive command exited unsuccessfully
    #[error("Archive command failed ({status}): {command}")]
    CommandFailed { command: String, status: String },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Errors while reading archive contents
    #[error("Archive error: {0}")]
    Archive(String),
}

impl ShelfError {
    /// Create a configuration error for an unregistered method name
    pub fn unknown_method(name: &str, known: &[&str]) -> Self {
        Self::Config(format!(
            "Bad archive method name \"{}\" (choose from: {})",
            name,
            known.join(", ")
        ))
    }

    /// Create a "not found" error for folders
    pub fn folder_not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            entity_type: "Folder",
            identifier: path.into().display().to_string(),
        }
    }

    /// Create a "not found" error for archives
    pub fn archive_not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            entity_type: "Archive",
            identifier: path.into().display().to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for ShelfError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<zip::result::ZipError> for ShelfError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}

/// Result type alias for Snapshelf operations
pub type ShelfResult<T> = Result<T, ShelfError>;
