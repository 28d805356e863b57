//! `config` command

use clap::Args;

use crate::config::paths::expand_home;
use crate::config::{Settings, ShelfPaths};
use crate::error::ShelfResult;

/// Arguments for `config`
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write a settings file with default values if none exists
    #[arg(long)]
    pub init: bool,
}

/// Handle the `config` command
pub fn handle_config_command(
    paths: &ShelfPaths,
    settings: &Settings,
    args: ConfigArgs,
) -> ShelfResult<()> {
    if args.init {
        if paths.is_initialized() {
            println!("Settings file already exists: {}", paths.settings_file().display());
        } else {
            settings.save(paths)?;
            println!("Created settings file: {}", paths.settings_file().display());
        }
        println!();
    }

    println!("Snapshelf Configuration");
    println!("=======================");
    println!("Config directory: {}", paths.base_dir().display());
    println!(
        "Settings file:    {}{}",
        paths.settings_file().display(),
        if paths.is_initialized() { "" } else { " (not created)" }
    );
    println!();
    println!("Settings:");
    println!("  Default method:   {}", settings.default_method);
    println!(
        "  Archive root:     {}",
        expand_home(&settings.archive_root).display()
    );
    println!("  Time stamp:       {}", settings.timestamp_format);
    println!("  UTC time stamps:  {}", settings.utc_timestamps);
    println!("  Size unit:        {:?}", settings.size_unit);
    println!("  Progress:         {}", settings.progress);
    match &settings.list_folder {
        Some(folder) => println!("  List folder:      {}", expand_home(folder).display()),
        None => println!("  List folder:      (system temporary folder)"),
    }
    Ok(())
}
