use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct MatchEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> MatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Load both catalogs, match every product, write the groups. Returns the output path.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting catalog matching...");

        tracing::info!("Loading products and listings...");
        let catalog = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} products and {} listings",
            catalog.products.len(),
            catalog.listings.len()
        );
        self.monitor.log_stats("Load");

        tracing::info!("Matching listings to products...");
        let report = self.pipeline.transform(catalog).await?;
        tracing::info!(
            "Matched {} of {} products ({} listing assignments over {} listings)",
            report.matched_products(),
            report.product_count(),
            report.total_assignments(),
            report.listing_count
        );
        self.monitor.log_stats("Match");

        tracing::info!("Writing results...");
        let output_path = self.pipeline.load(report).await?;
        tracing::info!("Results saved to: {}", output_path);
        self.monitor.log_stats("Write");

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}
