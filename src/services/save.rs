//! Archive saving
//!
//! A save is planned first and executed second. Planning resolves the method,
//! names the archive, selects the source files, writes the file list and builds
//! the command line. Dry runs stop after planning, so both kinds of run report
//! exactly the same plan.

use std::collections::HashSet;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::TempPath;
use tracing::{debug, info, warn};

use crate::catalog::name::is_valid_tag;
use crate::catalog::{CatalogSpec, TimestampMatcher};
use crate::error::{ShelfError, ShelfResult};
use crate::methods::{MethodRegistry, SaveSpec};
use crate::process::{shell_command_string, CommandRunner, ProgramLocator};
use crate::source::{collect_source_files, SourceOptions};

/// File list placeholder shown in dry-run command lines
const DRY_RUN_LIST: &str = "FILE_LIST";

/// Options for one save
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    pub method_name: String,
    /// Tags appended to the archive name, one `_` segment each
    pub tags: Vec<String>,
    pub source: SourceOptions,
    /// Embed the current time in the archive name
    pub timestamp: bool,
    /// Report progress through `pv`
    pub progress: bool,
    /// Keep the file list after saving
    pub keep_list: bool,
    pub dry_run: bool,
    pub verbose: bool,
}

/// Counts for the files going into an archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveTotals {
    pub files: usize,
    /// Distinct parent folders of the files
    pub folders: usize,
    /// File sizes plus the sizes of their parent folder entries
    pub bytes: u64,
}

/// Everything a save is about to do
#[derive(Debug)]
pub struct SavePlan {
    /// Final archive path, method suffix included
    pub archive_path: PathBuf,
    pub method_name: String,
    /// Source-relative paths of the selected files
    pub files: Vec<PathBuf>,
    pub totals: SaveTotals,
    /// Shell command line that writes the archive
    pub command: String,
    /// Written file list, `None` for dry runs
    pub list_path: Option<PathBuf>,
    /// The file list outlives the save
    pub list_kept: bool,
    pub dry_run: bool,
    working_dir: PathBuf,
    /// Deletes the file list when the plan is dropped
    _temp_list: Option<TempPath>,
}

/// Saves archives of source folders into catalog folders
pub struct ArchiveSaver<'a> {
    registry: &'a MethodRegistry,
    matcher: &'a TimestampMatcher,
    runner: &'a dyn CommandRunner,
    programs: &'a dyn ProgramLocator,
    /// Folder for kept file lists (default: system temporary folder)
    list_folder: Option<PathBuf>,
    pv_warned: bool,
}

impl<'a> ArchiveSaver<'a> {
    pub fn new(
        registry: &'a MethodRegistry,
        matcher: &'a TimestampMatcher,
        runner: &'a dyn CommandRunner,
        programs: &'a dyn ProgramLocator,
    ) -> Self {
        Self {
            registry,
            matcher,
            runner,
            programs,
            list_folder: None,
            pv_warned: false,
        }
    }

    /// Keep retained file lists in `folder`
    pub fn with_list_folder(mut self, folder: Option<PathBuf>) -> Self {
        self.list_folder = folder;
        self
    }

    /// Archive name without method suffix
    pub fn archive_name(&self, source_name: &str, options: &SaveOptions) -> ShelfResult<String> {
        let mut parts = vec![source_name.to_string()];
        if options.timestamp {
            parts.push(self.matcher.format_now());
        }
        for tag in &options.tags {
            if !is_valid_tag(tag) {
                return Err(ShelfError::Config(format!(
                    "Bad tag \"{}\" (tags must be alphanumeric)",
                    tag
                )));
            }
            parts.push(tag.clone());
        }
        Ok(parts.join("_"))
    }

    /// Work out what saving `spec` with `options` involves
    ///
    /// A real run also creates the catalog folder and writes the file list.
    /// Nothing else is touched until [`execute`](Self::execute).
    pub fn plan(&mut self, spec: &CatalogSpec, options: &SaveOptions) -> ShelfResult<SavePlan> {
        let registry = self.registry;
        let registered = registry.resolve(&options.method_name)?;
        let archive_name = self.archive_name(&spec.source_name, options)?;

        if !spec.source_folder.is_dir() {
            return Err(ShelfError::folder_not_found(&spec.source_folder));
        }

        let candidates = collect_source_files(&spec.source_folder, &options.source)?;
        let (files, totals) = tally_files(&spec.source_folder, candidates);
        debug!(
            files = totals.files,
            folders = totals.folders,
            bytes = totals.bytes,
            "selected source files"
        );

        let (list_path, temp_list, list_kept) = if options.dry_run {
            (None, None, false)
        } else {
            fs::create_dir_all(&spec.archive_folder).map_err(|e| {
                ShelfError::Io(format!(
                    "Failed to create catalog folder {}: {}",
                    spec.archive_folder.display(),
                    e
                ))
            })?;
            let temp_list = self.write_file_list(&spec.source_name, &files)?;
            if options.keep_list {
                let kept = temp_list
                    .keep()
                    .map_err(|e| ShelfError::Io(format!("Failed to keep file list: {}", e)))?;
                (Some(kept), None, true)
            } else {
                (Some(temp_list.to_path_buf()), Some(temp_list), false)
            }
        };

        let save_spec = SaveSpec {
            source_path: spec.source_folder.clone(),
            source_list_path: list_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DRY_RUN_LIST)),
            archive_path: spec.archive_folder.join(&archive_name),
            verbose: options.verbose && !options.progress,
            pv_progress: self.pv_progress(options.progress),
        };
        let save_command = registered
            .method
            .build_save_command(&save_spec, self.programs)?;

        Ok(SavePlan {
            archive_path: save_command.archive_path,
            method_name: registered.name.clone(),
            files,
            totals,
            command: shell_command_string(&save_command.arguments),
            list_path,
            list_kept,
            dry_run: options.dry_run,
            working_dir: spec.source_folder.clone(),
            _temp_list: temp_list,
        })
    }

    /// Run the planned archive command
    ///
    /// Dry-run plans are not executed.
    pub fn execute(&self, plan: &SavePlan) -> ShelfResult<()> {
        if plan.dry_run {
            debug!(command = %plan.command, "dry run, not executing");
            return Ok(());
        }

        info!(archive = %plan.archive_path.display(), "saving archive");
        let status = self.runner.run(&plan.command, &plan.working_dir)?;
        if !status.success() {
            return Err(ShelfError::CommandFailed {
                command: plan.command.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }

    /// Whether progress goes through `pv`, warning once when it is missing
    fn pv_progress(&mut self, requested: bool) -> bool {
        if !requested {
            return false;
        }
        if self.programs.find_program("pv").is_some() {
            return true;
        }
        if !self.pv_warned {
            warn!("Please install the \"pv\" program to see progress while saving.");
            self.pv_warned = true;
        }
        false
    }

    fn write_file_list(&self, source_name: &str, files: &[PathBuf]) -> ShelfResult<TempPath> {
        let folder = self
            .list_folder
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        let file = tempfile::Builder::new()
            .prefix(&format!("snapshelf_{}_", source_name))
            .suffix(".txt")
            .tempfile_in(&folder)
            .map_err(|e| ShelfError::Io(format!("Failed to create file list: {}", e)))?;

        let mut writer = BufWriter::new(file.as_file());
        for path in files {
            writeln!(writer, "{}", path.display())?;
        }
        writer.flush()?;
        drop(writer);

        Ok(file.into_temp_path())
    }
}

/// Keep the regular files among `candidates` and count them
fn tally_files(source_folder: &Path, candidates: Vec<PathBuf>) -> (Vec<PathBuf>, SaveTotals) {
    let mut files = Vec::with_capacity(candidates.len());
    let mut totals = SaveTotals::default();
    let mut visited_folders: HashSet<PathBuf> = HashSet::new();

    for relative in candidates {
        let full_path = source_folder.join(&relative);
        let is_file = fs::metadata(&full_path).map(|m| m.is_file()).unwrap_or(false);
        if !is_file {
            warn!(path = %relative.display(), "source path is not a file, skipping");
            continue;
        }

        totals.files += 1;
        totals.bytes += entry_size(&full_path);

        let folder = match relative.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if visited_folders.insert(folder.clone()) {
            totals.folders += 1;
            totals.bytes += entry_size(&source_folder.join(&folder));
        }

        files.push(relative);
    }

    (files, totals)
}

fn entry_size(path: &Path) -> u64 {
    fs::symlink_metadata(path).map(|m| m.len()).unwrap_or(0)
}
