pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::local_storage::LocalStorage;
pub use config::toml_config::TomlConfig;

pub use crate::core::{engine::MatchEngine, pipeline::MatchingPipeline};
pub use domain::model::{Listing, MalformedPolicy, MatchGroup, Product};
pub use utils::error::{MatcherError, Result};
