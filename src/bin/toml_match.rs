use anyhow::Context;
use catalog_matcher::config::LogFormat;
use catalog_matcher::core::{ConfigProvider, Pipeline};
use catalog_matcher::utils::{logger, validation::Validate};
use catalog_matcher::{LocalStorage, MatchEngine, MatchingPipeline, TomlConfig};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-match")]
#[command(about = "Match listings to products using a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "matcher.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Load and validate the inputs without writing results
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            // The log format lives in the file, so fall back to compact output.
            logger::init_cli_logger(args.verbose);
            tracing::error!("❌ {:#}", e);
            tracing::error!("💡 Make sure the file exists and is valid TOML format");
            return Err(e);
        }
    };

    match config.log_format() {
        LogFormat::Compact => logger::init_cli_logger(args.verbose),
        LogFormat::Json => logger::init_json_logger(args.verbose),
    }

    tracing::info!("📁 Loaded configuration from: {}", args.config);

    config.validate().context("Configuration validation failed")?;
    display_config_summary(&config);

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let storage = LocalStorage::new(config.data_dir().to_string());
    let pipeline = MatchingPipeline::new(storage, config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - results will not be written");
        let catalog = pipeline.extract().await.context("Failed to load inputs")?;
        println!(
            "Would match {} products against {} listings",
            catalog.products.len(),
            catalog.listings.len()
        );
        return Ok(());
    }

    let engine = MatchEngine::new_with_monitoring(pipeline, monitor_enabled);
    let output_path = engine.run().await.context("Matching failed")?;
    println!("✅ Results written to: {}", output_path);

    Ok(())
}

fn load_config(path: &str) -> anyhow::Result<TomlConfig> {
    TomlConfig::from_file(path).with_context(|| format!("Failed to load config file '{}'", path))
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("  Data dir: {}", config.data_dir());
    tracing::info!("  Products: {}", config.products_file());
    tracing::info!("  Listings: {}", config.listings_file());
    tracing::info!("  Results: {}", config.results_file());
    tracing::info!(
        "  Parallel: {} (workers: {})",
        config.parallel(),
        config.worker_threads()
    );
    tracing::info!("  On malformed: {:?}", config.malformed_policy());
}
