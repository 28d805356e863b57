//! Source file selection for `save`

mod git;
mod walk;

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::ShelfResult;

pub use git::iterate_git_pending;
pub use walk::iterate_filtered_files;

/// How to choose the files that go into an archive
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// Only files git reports as changed or untracked
    pub pending: bool,
    /// Honor `.gitignore` files during a full walk
    pub gitignore: bool,
    /// Gitignore-style patterns to leave out of a full walk
    pub excludes: Vec<String>,
}

/// Collect source-relative file paths according to `options`
pub fn collect_source_files(folder: &Path, options: &SourceOptions) -> ShelfResult<Vec<PathBuf>> {
    if options.pending {
        if options.gitignore || !options.excludes.is_empty() {
            warn!("gitignore and exclude options are ignored for pending files");
        }
        return iterate_git_pending(folder);
    }
    iterate_filtered_files(folder, options.gitignore, &options.excludes)
}
