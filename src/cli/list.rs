//! `list` command

use std::path::PathBuf;

use clap::Args;

use super::args::SizeUnitArgs;
use super::context::AppContext;
use crate::display::format_archive_contents;
use crate::error::ShelfResult;
use crate::services::list_archive;

/// Arguments for `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Archive file or folder
    pub archive: PathBuf,

    #[command(flatten)]
    pub size_unit: SizeUnitArgs,
}

/// Handle the `list` command
pub fn handle_list_command(ctx: &AppContext, args: ListArgs) -> ShelfResult<()> {
    let items = list_archive(&args.archive, &ctx.registry, &ctx.matcher)?;
    println!(
        "{}",
        format_archive_contents(&items, args.size_unit.unit(&ctx.settings))
    );
    Ok(())
}
