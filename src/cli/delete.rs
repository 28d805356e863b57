//! `delete` and `prune` commands

use std::path::PathBuf;

use clap::Args;

use super::args::{now_timestamp, require_filter, FilterArgs, LocationArgs};
use super::context::{confirm, AppContext};
use crate::catalog::DiscoveredArchive;
use crate::display::format_archive_selection;
use crate::error::ShelfResult;
use crate::services::{delete_archives, list_catalog, resolve_archives};

/// Arguments for `delete`
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Archive files or folders to delete
    #[arg(required = true)]
    pub archives: Vec<PathBuf>,

    /// Delete without asking for confirmation
    #[arg(long)]
    pub no_confirmation: bool,
}

/// Arguments for `prune`
#[derive(Args, Debug)]
pub struct PruneArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Delete without asking for confirmation
    #[arg(long)]
    pub no_confirmation: bool,
}

/// Handle the `delete` command
pub fn handle_delete_command(ctx: &AppContext, args: DeleteArgs) -> ShelfResult<()> {
    let archives = resolve_archives(&args.archives, &ctx.registry, &ctx.matcher)?;
    remove_selected(ctx, "Archives to delete", &archives, args.no_confirmation)
}

/// Handle the `prune` command
///
/// Archives selected by the filters are deleted; a filter is mandatory.
pub fn handle_prune_command(ctx: &AppContext, args: PruneArgs) -> ShelfResult<()> {
    let filter = args.filter.to_filter(now_timestamp());
    require_filter(&filter)?;

    let spec = args.location.resolve(&ctx.settings)?;
    let items = list_catalog(&spec, &ctx.registry, &ctx.matcher, &filter)?;
    if items.is_empty() {
        println!("No archives selected for pruning.");
        return Ok(());
    }

    let paths: Vec<PathBuf> = items.into_iter().map(|item| item.path).collect();
    let archives = resolve_archives(&paths, &ctx.registry, &ctx.matcher)?;
    remove_selected(ctx, "Archives to prune", &archives, args.no_confirmation)
}

fn remove_selected(
    ctx: &AppContext,
    title: &str,
    archives: &[DiscoveredArchive],
    no_confirmation: bool,
) -> ShelfResult<()> {
    let paths: Vec<PathBuf> = archives.iter().map(|a| a.path.clone()).collect();
    print!("{}", format_archive_selection(title, &paths));

    if ctx.dry_run {
        println!("Dry run: nothing deleted.");
        return Ok(());
    }
    if !no_confirmation && !confirm(&format!("Delete {} archive(s)?", archives.len()))? {
        println!("Aborted.");
        return Ok(());
    }

    let deleted = delete_archives(archives)?;
    println!("Deleted {} archive(s).", deleted);
    Ok(())
}
