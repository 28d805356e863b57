//! Snapshelf - timestamped, tagged folder snapshots
//!
//! This library saves snapshots of a source folder into a catalog folder with
//! one of several archive methods (rsync mirror, tar+gzip, tar+xz, zip), and
//! lists, filters, compares and prunes the archives already saved there.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `methods`: Archive methods and the method registry
//! - `catalog`: Archive name parsing and catalog selection
//! - `source`: Source file enumeration
//! - `process`: Shell command construction and execution
//! - `services`: Save, list, compare and delete operations
//! - `display`: Terminal output formatting
//! - `cli`: Command line arguments and handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use snapshelf::catalog::{build_catalog_list, CatalogFilter, CatalogSpec};
//! use snapshelf::config::{Settings, ShelfPaths};
//! use snapshelf::methods::MethodRegistry;
//! use snapshelf::services::list_catalog;
//!
//! let paths = ShelfPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let spec = CatalogSpec::resolve(&settings, None, None, None)?;
//! let items = list_catalog(
//!     &spec,
//!     &MethodRegistry::builtin(),
//!     &settings.timestamp_matcher()?,
//!     &CatalogFilter::default(),
//! )?;
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod methods;
pub mod process;
pub mod services;
pub mod source;

pub use error::{ShelfError, ShelfResult};
