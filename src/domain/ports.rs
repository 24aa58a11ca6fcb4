use crate::domain::model::{CollegeRecord, Enrichment};
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

/// Supplies optional per-college data after ranking. Implementations may
/// fail per record; a failure never affects the ranked list.
#[async_trait]
pub trait Enricher: Send + Sync + 'static {
    async fn enrich(&self, college: &CollegeRecord) -> Result<Enrichment>;
}
