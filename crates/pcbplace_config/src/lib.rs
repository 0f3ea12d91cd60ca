//! Parsing and validation of `autoplace.toml` placer configuration files.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! usable [`AutoplaceConfig`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    load_config, load_config_file, load_config_from_str, load_config_or_default, CONFIG_FILE_NAME,
    DEFAULT_CONFIG_TOML,
};
pub use types::*;
