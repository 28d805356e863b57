//! The archive catalog
//!
//! A catalog is the set of archives in one folder. There is no index: entries
//! are discovered by listing the folder, their metadata is parsed from the
//! names, and [`build_catalog_list`] selects and orders them.

pub mod builder;
pub mod discovered;
pub mod name;
pub mod spec;

pub use builder::{build_catalog_list, CatalogFilter, CatalogItem};
pub use discovered::DiscoveredArchive;
pub use name::{ArchiveNameData, StampZone, TimestampMatcher, DEFAULT_TIMESTAMP_FORMAT};
pub use spec::CatalogSpec;
