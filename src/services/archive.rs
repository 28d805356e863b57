//! Single-archive operations: listing contents and deleting

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::catalog::{DiscoveredArchive, TimestampMatcher};
use crate::error::{ShelfError, ShelfResult};
use crate::methods::{MethodListItem, MethodRegistry};

/// List the entries of the archive at `path`, sorted by entry path
pub fn list_archive(
    path: &Path,
    registry: &MethodRegistry,
    matcher: &TimestampMatcher,
) -> ShelfResult<Vec<MethodListItem>> {
    let archive = DiscoveredArchive::lookup(path, registry, matcher)?;
    let mut items = archive.method.list_contents(&archive.path)?;
    items.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(items)
}

/// Look up every path as an archive, failing on the first unsupported one
pub fn resolve_archives(
    paths: &[PathBuf],
    registry: &MethodRegistry,
    matcher: &TimestampMatcher,
) -> ShelfResult<Vec<DiscoveredArchive>> {
    paths
        .iter()
        .map(|path| DiscoveredArchive::lookup(path, registry, matcher))
        .collect()
}

/// Remove archive files and folders
///
/// Returns the number of archives removed.
pub fn delete_archives(archives: &[DiscoveredArchive]) -> ShelfResult<usize> {
    for archive in archives {
        let result = if archive.method.is_folder() {
            fs::remove_dir_all(&archive.path)
        } else {
            fs::remove_file(&archive.path)
        };
        result.map_err(|e| {
            ShelfError::Io(format!(
                "Failed to delete {}: {}",
                archive.path.display(),
                e
            ))
        })?;
        info!(path = %archive.path.display(), "deleted archive");
    }
    Ok(archives.len())
}
