use anyhow::Result;
use clap::{Parser, Subcommand};

use snapshelf::cli::{
    handle_catalog_command, handle_compare_command, handle_config_command,
    handle_delete_command, handle_list_command, handle_prune_command, handle_save_command,
    AppContext, CatalogArgs, CompareArgs, ConfigArgs, DeleteArgs, ListArgs, PruneArgs, SaveArgs,
};
use snapshelf::config::{Settings, ShelfPaths};
use snapshelf::logging::init_logging;

#[derive(Parser)]
#[command(
    name = "snapshelf",
    version,
    about = "Save timestamped, tagged folder snapshots and manage their catalog",
    long_about = "Snapshelf saves snapshots of a source folder as rsync mirrors, \
                  tarballs or zip files. Archive names carry the source name, a \
                  time stamp and tags, and the folder they are saved in is the \
                  catalog that can be listed, filtered and pruned."
)]
struct Cli {
    /// Show what would happen without changing anything
    #[arg(long, global = true)]
    dry_run: bool,

    /// Display extra messages
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a new archive of the source folder
    Save(SaveArgs),

    /// List the archives in a catalog
    Catalog(CatalogArgs),

    /// List the contents of an archive
    List(ListArgs),

    /// Delete catalog archives selected by age, date, interval or tags
    Prune(PruneArgs),

    /// Delete archive files or folders
    Delete(DeleteArgs),

    /// Compare an archive with its source folder
    Compare(CompareArgs),

    /// Show current configuration and paths
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Initialize paths and settings
    let paths = ShelfPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let context = || AppContext::new(paths.clone(), settings.clone(), cli.dry_run, cli.verbose);
    match cli.command {
        Commands::Save(args) => handle_save_command(&context()?, args)?,
        Commands::Catalog(args) => handle_catalog_command(&context()?, args)?,
        Commands::List(args) => handle_list_command(&context()?, args)?,
        Commands::Prune(args) => handle_prune_command(&context()?, args)?,
        Commands::Delete(args) => handle_delete_command(&context()?, args)?,
        Commands::Compare(args) => handle_compare_command(&context()?, args)?,
        Commands::Config(args) => handle_config_command(&paths, &settings, args)?,
    }

    Ok(())
}
