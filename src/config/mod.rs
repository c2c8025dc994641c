#[cfg(feature = "cli")]
pub mod cli;
pub mod local_storage;
pub mod toml_config;

use serde::{Deserialize, Serialize};

/// Upper bound on the matcher worker pool.
pub const MAX_WORKERS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}
