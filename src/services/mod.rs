//! Service layer for Snapshelf
//!
//! Services sit between the command handlers and the catalog/method layers.
//! They take the method registry and time stamp matcher by reference and never
//! print; handlers decide what to show.

pub mod archive;
pub mod catalog;
pub mod compare;
pub mod save;

pub use archive::{delete_archives, list_archive, resolve_archives};
pub use catalog::{list_catalog, scan_archive_folder};
pub use compare::{compare_archive, CompareReport, SizeDifference};
pub use save::{ArchiveSaver, SaveOptions, SavePlan, SaveTotals};
