use crate::core::catalog::Catalog;
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;

/// Loads the collection from a source and validates it once.
pub struct CatalogEngine<S: CatalogSource> {
    source: S,
}

impl<S: CatalogSource> CatalogEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn load(&self) -> Result<Catalog> {
        tracing::info!("📚 Loading monasteries from {}", self.source.describe());
        let records = self.source.load_records().await?;
        tracing::debug!("Read {} records", records.len());

        let catalog = Catalog::from_records(records)?;
        tracing::info!(
            "✅ Catalog ready: {} monasteries ({} featured)",
            catalog.len(),
            catalog.featured().len()
        );
        Ok(catalog)
    }
}
