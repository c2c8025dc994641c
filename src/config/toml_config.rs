use crate::config::{LogFormat, MAX_WORKERS};
use crate::core::ConfigProvider;
use crate::domain::model::MalformedPolicy;
use crate::utils::error::{MatcherError, Result};
use crate::utils::validation::{
    validate_distinct, validate_file_name, validate_path, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub data_dir: String,
    pub listings: Option<String>,
    pub products: Option<String>,
    pub on_malformed: Option<MalformedPolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub results: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub parallel: Option<bool>,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_format: Option<LogFormat>,
}

impl TomlConfig {
    /// Loads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MatcherError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MatcherError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MatcherError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("input.data_dir", &self.input.data_dir)?;
        validate_file_name("input.listings", self.listings_file())?;
        validate_file_name("input.products", self.products_file())?;
        validate_file_name("output.results", self.results_file())?;
        validate_distinct("output.results", self.results_file(), self.listings_file())?;
        validate_distinct("output.results", self.results_file(), self.products_file())?;

        if let Some(workers) = self.matching.workers {
            validate_range("matching.workers", workers, 0, MAX_WORKERS)?;
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_format(&self) -> LogFormat {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format)
            .unwrap_or_default()
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &str {
        &self.input.data_dir
    }

    fn listings_file(&self) -> &str {
        self.input.listings.as_deref().unwrap_or("listings.txt")
    }

    fn products_file(&self) -> &str {
        self.input.products.as_deref().unwrap_or("products.txt")
    }

    fn results_file(&self) -> &str {
        self.output.results.as_deref().unwrap_or("results.txt")
    }

    fn parallel(&self) -> bool {
        self.matching.parallel.unwrap_or(true)
    }

    fn worker_threads(&self) -> usize {
        self.matching.workers.unwrap_or(0)
    }

    fn malformed_policy(&self) -> MalformedPolicy {
        self.input.on_malformed.unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
