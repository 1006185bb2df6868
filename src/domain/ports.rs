use crate::domain::model::MonasteryRecord;
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

/// Where the static monastery collection comes from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;

    async fn load_records(&self) -> Result<Vec<MonasteryRecord>>;
}
