use crate::domain::model::{Catalog, MalformedPolicy, MatchReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn listings_file(&self) -> &str;
    fn products_file(&self) -> &str;
    fn results_file(&self) -> &str;
    fn parallel(&self) -> bool;
    /// Zero means the rayon default (one worker per core).
    fn worker_threads(&self) -> usize;
    fn malformed_policy(&self) -> MalformedPolicy;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Catalog>;
    async fn transform(&self, catalog: Catalog) -> Result<MatchReport>;
    async fn load(&self, report: MatchReport) -> Result<String>;
}
