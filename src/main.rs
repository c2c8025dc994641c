use catalog_matcher::config::LogFormat;
use catalog_matcher::utils::error::{ErrorSeverity, MatcherError};
use catalog_matcher::utils::{logger, validation::Validate};
use catalog_matcher::{CliConfig, LocalStorage, MatchEngine, MatchingPipeline};
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting catalog-matcher");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.data_dir.clone());
    let pipeline = MatchingPipeline::new(storage, config);
    let engine = MatchEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Matching completed successfully");
            println!("✅ Results written to: {}", output_path);
        }
        Err(e) => std::process::exit(report_failure(&e)),
    }
}

fn report_failure(e: &MatcherError) -> i32 {
    tracing::error!(
        "❌ Matching failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
