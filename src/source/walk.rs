//! Filtered walk of a source folder

use std::path::{Path, PathBuf};

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use tracing::warn;

use crate::error::{ShelfError, ShelfResult};

/// Version control folders that are never archived
const VCS_FOLDERS: &[&str] = &[".git", ".hg", ".svn"];

/// List the files below `folder`, relative to it and sorted by name
///
/// Hidden files are included. With `gitignore` set, `.gitignore`, `.ignore` and
/// the global git excludes apply. Each exclude is a gitignore-style pattern.
/// Directories are not listed; they are implied by the files inside them.
pub fn iterate_filtered_files(
    folder: &Path,
    gitignore: bool,
    excludes: &[String],
) -> ShelfResult<Vec<PathBuf>> {
    let mut overrides = OverrideBuilder::new(folder);
    for pattern in excludes {
        overrides
            .add(&format!("!{}", pattern))
            .map_err(|e| ShelfError::Config(format!("Bad exclude pattern \"{}\": {}", pattern, e)))?;
    }
    let overrides = overrides
        .build()
        .map_err(|e| ShelfError::Config(format!("Bad exclude patterns: {}", e)))?;

    let walker = WalkBuilder::new(folder)
        .hidden(false)
        .git_ignore(gitignore)
        .git_exclude(gitignore)
        .git_global(gitignore)
        .ignore(gitignore)
        .require_git(false)
        .parents(gitignore)
        .overrides(overrides)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| {
            let is_vcs = entry
                .file_name()
                .to_str()
                .is_some_and(|name| VCS_FOLDERS.contains(&name));
            !(is_vcs && entry.file_type().is_some_and(|ft| ft.is_dir()))
        })
        .build();

    let mut files = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let Some(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(folder) else {
            continue;
        };
        if !file_type.is_file() {
            warn!(path = %relative.display(), "skipping non-regular file");
            continue;
        }
        files.push(relative.to_path_buf());
    }

    Ok(files)
}
