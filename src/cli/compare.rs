//! `compare` command

use std::path::PathBuf;

use clap::Args;

use super::context::AppContext;
use crate::display::format_compare_report;
use crate::error::{ShelfError, ShelfResult};
use crate::services::compare_archive;

/// Arguments for `compare`
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Archive file or folder
    pub archive: PathBuf,

    /// Source folder to compare with (default: current folder)
    #[arg(short, long)]
    pub source_folder: Option<PathBuf>,
}

/// Handle the `compare` command
pub fn handle_compare_command(ctx: &AppContext, args: CompareArgs) -> ShelfResult<()> {
    let source_folder = match args.source_folder {
        Some(folder) => folder,
        None => std::env::current_dir()
            .map_err(|e| ShelfError::Io(format!("Failed to read current directory: {}", e)))?,
    };

    let report = compare_archive(&args.archive, &source_folder, &ctx.registry, &ctx.matcher)?;
    println!("{}", format_compare_report(&report).trim_end());
    Ok(())
}
