//! `save` command

use std::path::PathBuf;

use clap::Args;

use super::args::{LocationArgs, SizeUnitArgs};
use super::context::AppContext;
use crate::config::paths::expand_home;
use crate::display::format_save_plan;
use crate::error::ShelfResult;
use crate::process::{ShellRunner, SystemPrograms};
use crate::services::{ArchiveSaver, SaveOptions};
use crate::source::SourceOptions;

/// Arguments for `save`
#[derive(Args, Debug)]
pub struct SaveArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Archive method (files, gz, xz or zip; default from settings)
    #[arg(short, long)]
    pub method: Option<String>,

    /// Comma-separated tags to add to the archive name
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Gitignore-style pattern to exclude (repeatable)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Use .gitignore exclusions
    #[arg(long)]
    pub gitignore: bool,

    /// Save only files git reports as modified or untracked
    #[arg(long)]
    pub pending: bool,

    /// Display progress statistics (requires pv)
    #[arg(short, long)]
    pub progress: bool,

    /// Don't add a time stamp to the archive name
    #[arg(short = 'T', long)]
    pub no_timestamp: bool,

    /// Keep the temporary file list when done
    #[arg(long)]
    pub keep_list: bool,

    #[command(flatten)]
    pub size_unit: SizeUnitArgs,
}

/// Handle the `save` command
pub fn handle_save_command(ctx: &AppContext, args: SaveArgs) -> ShelfResult<()> {
    let spec = args.location.resolve(&ctx.settings)?;
    let unit = args.size_unit.unit(&ctx.settings);
    let options = SaveOptions {
        method_name: args
            .method
            .unwrap_or_else(|| ctx.settings.default_method.clone()),
        tags: args.tags,
        source: SourceOptions {
            pending: args.pending,
            gitignore: args.gitignore,
            excludes: args.exclude,
        },
        timestamp: !args.no_timestamp,
        progress: args.progress || ctx.settings.progress,
        keep_list: args.keep_list,
        dry_run: ctx.dry_run,
        verbose: ctx.verbose,
    };

    let list_folder: Option<PathBuf> = ctx.settings.list_folder.as_deref().map(expand_home);
    let mut saver = ArchiveSaver::new(&ctx.registry, &ctx.matcher, &ShellRunner, &SystemPrograms)
        .with_list_folder(list_folder);

    let plan = saver.plan(&spec, &options)?;
    println!("{}", format_save_plan(&plan, unit, ctx.verbose));
    saver.execute(&plan)?;

    if !plan.dry_run {
        println!("Archive saved: {}", plan.archive_path.display());
    }
    Ok(())
}
