//! CLI command handlers
//!
//! Each command has an argument struct and a `handle_*_command` function.
//! Handlers print to stdout; errors are returned to `main`.

pub mod args;
pub mod catalog;
pub mod compare;
pub mod config;
pub mod context;
pub mod delete;
pub mod list;
pub mod save;

pub use catalog::{handle_catalog_command, CatalogArgs};
pub use compare::{handle_compare_command, CompareArgs};
pub use config::{handle_config_command, ConfigArgs};
pub use context::AppContext;
pub use delete::{handle_delete_command, handle_prune_command, DeleteArgs, PruneArgs};
pub use list::{handle_list_command, ListArgs};
pub use save::{handle_save_command, SaveArgs};
