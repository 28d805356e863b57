//! Folder mirrors written with rsync

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use walkdir::WalkDir;

use super::{MethodListItem, SaveCommand, SaveSpec};
use crate::error::{ShelfError, ShelfResult};

/// `rsync -a --files-from=<list> [-v] <source>/ <archive>/`
pub(super) fn build_save_command(spec: &SaveSpec) -> SaveCommand {
    let mut args: Vec<String> = vec![
        "rsync".into(),
        "-a".into(),
        format!("--files-from={}", spec.source_list_path.display()),
    ];
    if spec.verbose {
        args.push("-v".into());
    }
    args.push(format!("{}/", spec.source_path.display()));
    args.push(format!("{}/", spec.archive_path.display()));

    SaveCommand {
        archive_path: spec.archive_path.clone(),
        arguments: args,
    }
}

/// Walk the mirror folder; paths are relative to its root
pub(super) fn list_contents(archive_path: &Path) -> ShelfResult<Vec<MethodListItem>> {
    let mut items = Vec::new();

    for entry in WalkDir::new(archive_path).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| ShelfError::Io(format!("Failed to walk mirror: {}", e)))?;
        let metadata = entry
            .metadata()
            .map_err(|e| ShelfError::Io(format!("Failed to read metadata: {}", e)))?;
        let time = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        let size = if metadata.is_dir() {
            None
        } else {
            Some(metadata.len())
        };
        let path = entry
            .path()
            .strip_prefix(archive_path)
            .map(PathBuf::from)
            .unwrap_or_else(|_| entry.path().to_path_buf());
        items.push(MethodListItem { path, time, size });
    }

    Ok(items)
}
