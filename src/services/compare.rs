//! Comparison of an archive with its source folder

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::archive::list_archive;
use crate::catalog::TimestampMatcher;
use crate::error::{ShelfError, ShelfResult};
use crate::methods::MethodRegistry;
use crate::source::iterate_filtered_files;

/// A file whose size differs between archive and source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeDifference {
    pub path: PathBuf,
    pub archive_size: u64,
    pub source_size: u64,
}

/// Differences between an archive and the current source files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareReport {
    pub only_in_archive: Vec<PathBuf>,
    pub only_in_source: Vec<PathBuf>,
    pub size_differs: Vec<SizeDifference>,
    /// Files present on both sides with the same size
    pub matching: usize,
}

impl CompareReport {
    pub fn is_identical(&self) -> bool {
        self.only_in_archive.is_empty()
            && self.only_in_source.is_empty()
            && self.size_differs.is_empty()
    }
}

/// Compare the files in `archive_path` with the files under `source_folder`
///
/// The source side is the full file set a save would take, so version control
/// folders are left out. Folder entries are ignored on both sides. All paths
/// are sorted.
pub fn compare_archive(
    archive_path: &Path,
    source_folder: &Path,
    registry: &MethodRegistry,
    matcher: &TimestampMatcher,
) -> ShelfResult<CompareReport> {
    if !source_folder.is_dir() {
        return Err(ShelfError::folder_not_found(source_folder));
    }

    let archived: BTreeMap<PathBuf, u64> = list_archive(archive_path, registry, matcher)?
        .into_iter()
        .filter_map(|item| item.size.map(|size| (clean_path(&item.path), size)))
        .collect();
    let mut current = source_files(source_folder)?;

    let mut report = CompareReport::default();
    for (path, archive_size) in archived {
        match current.remove(&path) {
            None => report.only_in_archive.push(path),
            Some(source_size) if source_size != archive_size => {
                report.size_differs.push(SizeDifference {
                    path,
                    archive_size,
                    source_size,
                })
            }
            Some(_) => report.matching += 1,
        }
    }
    report.only_in_source = current.into_keys().collect();

    Ok(report)
}

/// The files `save` would pick up from `folder` with no filtering, with sizes
fn source_files(folder: &Path) -> ShelfResult<BTreeMap<PathBuf, u64>> {
    let mut files = BTreeMap::new();
    for relative in iterate_filtered_files(folder, false, &[])? {
        let metadata = fs::metadata(folder.join(&relative))
            .map_err(|e| ShelfError::Io(format!("Failed to read metadata: {}", e)))?;
        files.insert(relative, metadata.len());
    }
    Ok(files)
}

/// Drop `./` components so archive and source paths line up
fn clean_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
