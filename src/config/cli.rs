use crate::config::{LogFormat, MAX_WORKERS};
use crate::core::ConfigProvider;
use crate::domain::model::MalformedPolicy;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_distinct, validate_file_name, validate_path, validate_range, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "catalog-matcher")]
#[command(about = "Match retailer listings to canonical products")]
pub struct CliConfig {
    /// Directory holding the input files; the results file is written here too
    #[arg(long, default_value = "./data")]
    pub data_dir: String,

    #[arg(long, default_value = "listings.txt")]
    pub listings: String,

    #[arg(long, default_value = "products.txt")]
    pub products: String,

    #[arg(long, default_value = "results.txt")]
    pub output: String,

    /// Matcher threads (0 = one per core)
    #[arg(long, default_value = "0")]
    pub workers: usize,

    #[arg(long, help = "Match products one at a time on the calling thread")]
    pub sequential: bool,

    #[arg(long, value_enum, default_value = "abort")]
    pub on_malformed: MalformedPolicy,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log memory usage and timings per phase")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn listings_file(&self) -> &str {
        &self.listings
    }

    fn products_file(&self) -> &str {
        &self.products
    }

    fn results_file(&self) -> &str {
        &self.output
    }

    fn parallel(&self) -> bool {
        !self.sequential
    }

    fn worker_threads(&self) -> usize {
        self.workers
    }

    fn malformed_policy(&self) -> MalformedPolicy {
        self.on_malformed
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir)?;
        validate_file_name("listings", &self.listings)?;
        validate_file_name("products", &self.products)?;
        validate_file_name("output", &self.output)?;
        validate_distinct("output", &self.output, &self.listings)?;
        validate_distinct("output", &self.output, &self.products)?;
        validate_range("workers", self.workers, 0, MAX_WORKERS)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["catalog-matcher"]);

        assert_eq!(config.data_dir(), "./data");
        assert_eq!(config.listings_file(), "listings.txt");
        assert_eq!(config.products_file(), "products.txt");
        assert_eq!(config.results_file(), "results.txt");
        assert!(config.parallel());
        assert_eq!(config.worker_threads(), 0);
        assert_eq!(config.malformed_policy(), MalformedPolicy::Abort);
        assert_eq!(config.log_format, LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = CliConfig::parse_from([
            "catalog-matcher",
            "--data-dir",
            "/srv/catalogs",
            "--output",
            "matches.jsonl",
            "--workers",
            "8",
            "--sequential",
            "--on-malformed",
            "skip",
            "--log-format",
            "json",
        ]);

        assert_eq!(config.data_dir(), "/srv/catalogs");
        assert_eq!(config.results_file(), "matches.jsonl");
        assert_eq!(config.worker_threads(), 8);
        assert!(!config.parallel());
        assert_eq!(config.malformed_policy(), MalformedPolicy::Skip);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_validation_rejects_output_overwriting_input() {
        let config = CliConfig::parse_from(["catalog-matcher", "--output", "listings.txt"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_too_many_workers() {
        let config = CliConfig::parse_from(["catalog-matcher", "--workers", "100000"]);
        assert!(config.validate().is_err());
    }
}
