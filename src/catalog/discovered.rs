//! Archives discovered in a catalog folder

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use super::name::{ArchiveNameData, TimestampMatcher};
use crate::error::{ShelfError, ShelfResult};
use crate::methods::{ArchiveMethod, AssumedType, MethodRegistry};

/// One physical catalog entry, file or folder, with its parsed name
#[derive(Debug, Clone)]
pub struct DiscoveredArchive {
    pub path: PathBuf,
    /// Modification time, used when the name has no time stamp
    pub file_time: f64,
    pub file_size: u64,
    pub method_name: String,
    pub method: ArchiveMethod,
    name_data: ArchiveNameData,
}

impl DiscoveredArchive {
    /// Build from known attributes, without touching the filesystem
    ///
    /// Returns `None` when no registered method claims the path as the given
    /// type. This is how catalog logic is tested with synthetic entries.
    pub fn from_parts(
        path: impl Into<PathBuf>,
        assumed_type: AssumedType,
        file_time: f64,
        file_size: u64,
        registry: &MethodRegistry,
        matcher: &TimestampMatcher,
    ) -> Option<Self> {
        let path = path.into();
        let registered = registry.find_for_path(&path, Some(assumed_type))?;
        Some(Self::with_method(
            path,
            file_time,
            file_size,
            &registered.name,
            registered.method,
            matcher,
        ))
    }

    /// Build for a physical file or folder
    ///
    /// Returns `Ok(None)` when no registered method claims the path.
    pub fn get(
        path: &Path,
        registry: &MethodRegistry,
        matcher: &TimestampMatcher,
    ) -> ShelfResult<Option<Self>> {
        let Some(registered) = registry.find_for_path(path, None) else {
            return Ok(None);
        };
        let metadata = fs::metadata(path)
            .map_err(|e| ShelfError::Io(format!("Failed to stat {}: {}", path.display(), e)))?;
        let file_time = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        Ok(Some(Self::with_method(
            path.to_path_buf(),
            file_time,
            metadata.len(),
            &registered.name,
            registered.method,
            matcher,
        )))
    }

    /// Like [`get`](Self::get), but a path no method claims is an error
    pub fn lookup(
        path: &Path,
        registry: &MethodRegistry,
        matcher: &TimestampMatcher,
    ) -> ShelfResult<Self> {
        if !path.exists() {
            return Err(ShelfError::archive_not_found(path));
        }
        Self::get(path, registry, matcher)?
            .ok_or_else(|| ShelfError::UnsupportedArchive(path.to_path_buf()))
    }

    fn with_method(
        path: PathBuf,
        file_time: f64,
        file_size: u64,
        method_name: &str,
        method: ArchiveMethod,
        matcher: &TimestampMatcher,
    ) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name_data = ArchiveNameData::parse(method.strip_name_suffix(&file_name), matcher);
        Self {
            path,
            file_time,
            file_size,
            method_name: method_name.to_string(),
            method,
            name_data,
        }
    }

    /// File name without the method suffix
    pub fn archive_name(&self) -> String {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.method.strip_name_suffix(&file_name).to_string()
    }

    pub fn name_data(&self) -> &ArchiveNameData {
        &self.name_data
    }

    pub fn source_name(&self) -> &str {
        &self.name_data.source_name
    }

    /// Time stamp from the name, or the file modification time
    pub fn time_stamp(&self) -> f64 {
        self.name_data.time_stamp.unwrap_or(self.file_time)
    }

    pub fn tags(&self) -> &std::collections::BTreeSet<String> {
        &self.name_data.tags
    }
}
