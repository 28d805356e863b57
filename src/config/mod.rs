//! Configuration module for Snapshelf
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ShelfPaths;
pub use settings::{Settings, SizeUnit};
