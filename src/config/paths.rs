//! Path management for Snapshelf
//!
//! ## Path Resolution Order
//!
//! 1. `SNAPSHELF_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/snapshelf` on Linux)

use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};

use crate::error::ShelfError;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "SNAPSHELF_CONFIG_DIR";

/// Manages all paths used by Snapshelf
#[derive(Debug, Clone)]
pub struct ShelfPaths {
    /// Base directory for Snapshelf configuration
    base_dir: PathBuf,
}

impl ShelfPaths {
    /// Create a new ShelfPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, ShelfError> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create ShelfPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base configuration directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_directories(&self) -> Result<(), ShelfError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ShelfError::Io(format!("Failed to create config directory: {}", e)))
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, ShelfError> {
    ProjectDirs::from("", "", "snapshelf")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ShelfError::Config("Could not determine the home directory".into()))
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

/// The user's home directory, if it can be determined
pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}
