//! Settings, catalog, and path resolution for the autopost CLI.

pub mod catalog;
pub mod init;
pub mod paths;
pub mod settings;

pub use catalog::{Catalog, Category, ColorPreset};
pub use init::write_default_config;
pub use settings::{HashtagPools, Settings};
