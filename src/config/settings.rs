//! User settings for Snapshelf
//!
//! Manages user preferences including the default archive method, the catalog
//! root folder, and the time stamp format embedded in archive names.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::ShelfPaths;
use crate::catalog::{StampZone, TimestampMatcher};
use crate::error::ShelfError;

/// Unit style used when displaying byte counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    /// 1024-based KiB, MiB, ... (default)
    #[default]
    Binary,
    /// 1000-based KB, MB, ...
    Decimal,
    /// Plain byte count
    Raw,
}

impl SizeUnit {
    /// Pick the unit from the two command line flags, falling back to `default`
    pub fn from_flags(binary: bool, decimal: bool, default: SizeUnit) -> SizeUnit {
        if binary {
            if decimal {
                tracing::warn!("Ignoring decimal units option when binary units are selected.");
            }
            SizeUnit::Binary
        } else if decimal {
            SizeUnit::Decimal
        } else {
            default
        }
    }
}

/// User settings for Snapshelf
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Archive method used by `save` when none is given
    #[serde(default = "default_method")]
    pub default_method: String,

    /// Root folder under which per-source catalog folders are created
    #[serde(default = "default_archive_root")]
    pub archive_root: PathBuf,

    /// Time stamp format embedded in archive names (strftime syntax)
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Interpret name time stamps as UTC instead of local time
    #[serde(default)]
    pub utc_timestamps: bool,

    /// Default unit style for sizes
    #[serde(default)]
    pub size_unit: SizeUnit,

    /// Show progress while saving by default
    #[serde(default)]
    pub progress: bool,

    /// Folder for retained file lists (default: system temporary folder)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_folder: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_method() -> String {
    "gz".to_string()
}

fn default_archive_root() -> PathBuf {
    PathBuf::from("~/.snapshelf")
}

fn default_timestamp_format() -> String {
    "%Y%m%d-%H%M%S".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_method: default_method(),
            archive_root: default_archive_root(),
            timestamp_format: default_timestamp_format(),
            utc_timestamps: false,
            size_unit: SizeUnit::default(),
            progress: false,
            list_folder: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ShelfPaths) -> Result<Self, ShelfError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ShelfError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ShelfError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Matcher for the configured name time stamp format
    pub fn timestamp_matcher(&self) -> Result<TimestampMatcher, ShelfError> {
        let zone = if self.utc_timestamps {
            StampZone::Utc
        } else {
            StampZone::Local
        };
        Ok(TimestampMatcher::new(&self.timestamp_format)?.with_zone(zone))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ShelfPaths) -> Result<(), ShelfError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ShelfError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ShelfError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
