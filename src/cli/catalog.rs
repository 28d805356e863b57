//! `catalog` command

use clap::Args;

use super::args::{now_timestamp, FilterArgs, LocationArgs, SizeUnitArgs};
use super::context::AppContext;
use crate::display::{format_catalog_heading, format_catalog_list};
use crate::error::ShelfResult;
use crate::services::list_catalog;

/// Arguments for `catalog`
#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Long format with size and file name columns
    #[arg(short, long)]
    pub long: bool,

    #[command(flatten)]
    pub size_unit: SizeUnitArgs,
}

/// Handle the `catalog` command
pub fn handle_catalog_command(ctx: &AppContext, args: CatalogArgs) -> ShelfResult<()> {
    let spec = args.location.resolve(&ctx.settings)?;
    let filter = args.filter.to_filter(now_timestamp());
    let items = list_catalog(&spec, &ctx.registry, &ctx.matcher, &filter)?;

    println!(
        "{}",
        format_catalog_heading(&spec.source_name, &spec.archive_folder)
    );
    println!(
        "{}",
        format_catalog_list(&items, args.long, args.size_unit.unit(&ctx.settings))
    );
    Ok(())
}
