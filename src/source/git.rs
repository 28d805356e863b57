//! Files with uncommitted changes, as reported by git

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{ShelfError, ShelfResult};

/// List modified, added and untracked files below `folder`
///
/// Paths are relative to `folder`. Deleted files are left out and renamed
/// files are reported under their new name.
pub fn iterate_git_pending(folder: &Path) -> ShelfResult<Vec<PathBuf>> {
    let prefix = run_git(folder, &["rev-parse", "--show-prefix"])?;
    let status = run_git(
        folder,
        &[
            "status",
            "--porcelain=v1",
            "-z",
            "--untracked-files=all",
            "--",
            ".",
        ],
    )?;
    let files = parse_porcelain(&status, prefix.trim_end());
    debug!(count = files.len(), "pending files from git");
    Ok(files)
}

fn run_git(folder: &Path, args: &[&str]) -> ShelfResult<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(folder)
        .output()
        .map_err(|e| ShelfError::Io(format!("Failed to run git: {}", e)))?;
    if !output.status.success() {
        return Err(ShelfError::CommandFailed {
            command: format!("git {}", args.join(" ")),
            status: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `git status --porcelain=v1 -z` output
///
/// `prefix` is the folder's path inside the repository, as printed by
/// `git rev-parse --show-prefix`; it is stripped from every reported path.
fn parse_porcelain(output: &str, prefix: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut records = output.split('\0');
    while let Some(record) = records.next() {
        if record.len() < 4 {
            continue;
        }
        let (code, path) = record.split_at(3);
        let mut code = code.chars();
        let index = code.next().unwrap_or(' ');
        let worktree = code.next().unwrap_or(' ');

        // Renames and copies carry the original path as a second record.
        if matches!(index, 'R' | 'C') {
            records.next();
        }
        if index == 'D' || worktree == 'D' {
            continue;
        }

        let relative = path.strip_prefix(prefix).unwrap_or(path);
        files.push(PathBuf::from(relative));
    }
    files
}
