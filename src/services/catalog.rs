//! Catalog listing
//!
//! Scans a catalog folder and applies the catalog filters. Shared by the
//! `catalog` and `prune` commands.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::catalog::{
    build_catalog_list, CatalogFilter, CatalogItem, CatalogSpec, DiscoveredArchive,
    TimestampMatcher,
};
use crate::error::{ShelfError, ShelfResult};
use crate::methods::MethodRegistry;

/// Discover every archive in `archive_folder`, in file name order
///
/// Entries no method claims are skipped silently. Entries that cannot be read
/// are skipped with a warning.
pub fn scan_archive_folder(
    archive_folder: &Path,
    registry: &MethodRegistry,
    matcher: &TimestampMatcher,
) -> ShelfResult<Vec<DiscoveredArchive>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(archive_folder).map_err(|e| {
        ShelfError::Io(format!(
            "Failed to read catalog folder {}: {}",
            archive_folder.display(),
            e
        ))
    })? {
        match entry {
            Ok(entry) => paths.push(entry.path()),
            Err(e) => warn!(error = %e, "skipping unreadable catalog entry"),
        }
    }
    paths.sort();

    let mut archives = Vec::new();
    for path in paths {
        match DiscoveredArchive::get(&path, registry, matcher) {
            Ok(Some(archive)) => archives.push(archive),
            Ok(None) => debug!(path = %path.display(), "not an archive"),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping catalog entry"),
        }
    }
    Ok(archives)
}

/// List the selected archives of a source, newest first
pub fn list_catalog(
    spec: &CatalogSpec,
    registry: &MethodRegistry,
    matcher: &TimestampMatcher,
    filter: &CatalogFilter,
) -> ShelfResult<Vec<CatalogItem>> {
    if !spec.source_folder.is_dir() {
        return Err(ShelfError::folder_not_found(&spec.source_folder));
    }
    if !spec.archive_folder.is_dir() {
        return Err(ShelfError::folder_not_found(&spec.archive_folder));
    }

    let archives = scan_archive_folder(&spec.archive_folder, registry, matcher)?;
    debug!(
        folder = %spec.archive_folder.display(),
        found = archives.len(),
        "scanned catalog folder"
    );
    Ok(build_catalog_list(&archives, &spec.source_name, filter))
}
