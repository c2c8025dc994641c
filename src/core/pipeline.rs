use crate::core::matcher::match_catalog;
use crate::core::records::{parse_json_lines, to_json_lines};
use crate::core::{Catalog, ConfigProvider, MatchReport, Pipeline, Storage};
use crate::utils::error::{MatcherError, Result};

pub struct MatchingPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> MatchingPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

/// Runs the product scan on a dedicated pool when a worker count is configured,
/// otherwise on rayon's global pool.
fn run_matching(catalog: Catalog, parallel: bool, workers: usize) -> Result<MatchReport> {
    let listing_count = catalog.listings.len();

    let groups = if parallel && workers > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("matcher-{}", i))
            .build()
            .map_err(|e| MatcherError::ProcessingError {
                message: format!("Failed to build worker pool: {}", e),
            })?;
        pool.install(|| match_catalog(&catalog.products, &catalog.listings, true))
    } else {
        match_catalog(&catalog.products, &catalog.listings, parallel)
    };

    Ok(MatchReport {
        groups,
        listing_count,
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for MatchingPipeline<S, C> {
    async fn extract(&self) -> Result<Catalog> {
        let policy = self.config.malformed_policy();

        // Both files are read before any matching starts, so a missing input aborts early.
        tracing::debug!("Reading products from {}", self.config.products_file());
        let products_raw = self.storage.read_file(self.config.products_file()).await?;
        tracing::debug!("Reading listings from {}", self.config.listings_file());
        let listings_raw = self.storage.read_file(self.config.listings_file()).await?;

        let products = parse_json_lines(&products_raw, self.config.products_file(), policy)?;
        let listings = parse_json_lines(&listings_raw, self.config.listings_file(), policy)?;

        Ok(Catalog { products, listings })
    }

    async fn transform(&self, catalog: Catalog) -> Result<MatchReport> {
        let parallel = self.config.parallel();
        let workers = self.config.worker_threads();

        tracing::debug!(
            "Matching {} products against {} listings (parallel: {}, workers: {})",
            catalog.products.len(),
            catalog.listings.len(),
            parallel,
            if workers == 0 { "auto".to_string() } else { workers.to_string() }
        );

        tokio::task::spawn_blocking(move || run_matching(catalog, parallel, workers))
            .await
            .map_err(|e| MatcherError::ProcessingError {
                message: format!("Matching task failed: {}", e),
            })?
    }

    async fn load(&self, report: MatchReport) -> Result<String> {
        let output = to_json_lines(&report.groups)?;

        tracing::debug!(
            "Writing {} match groups ({} bytes) to {}",
            report.groups.len(),
            output.len(),
            self.config.results_file()
        );
        self.storage
            .write_file(self.config.results_file(), output.as_bytes())
            .await?;

        let output_path = std::path::Path::new(self.config.data_dir())
            .join(self.config.results_file())
            .display()
            .to_string();
        Ok(output_path)
    }
}
