use async_trait::async_trait;

use crate::core::catalog::Catalog;
use crate::domain::model::MonasteryRecord;
use crate::domain::ports::{CatalogSource, Storage};
use crate::utils::error::Result;

/// The dataset compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

#[async_trait]
impl CatalogSource for BuiltinSource {
    fn describe(&self) -> String {
        "built-in catalog".to_string()
    }

    async fn load_records(&self) -> Result<Vec<MonasteryRecord>> {
        Catalog::builtin_records()
    }
}

/// A JSON array of records read through a [`Storage`] backend.
#[derive(Debug, Clone)]
pub struct JsonFileSource<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> JsonFileSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<S: Storage> CatalogSource for JsonFileSource<S> {
    fn describe(&self) -> String {
        format!("catalog file {}", self.path)
    }

    async fn load_records(&self) -> Result<Vec<MonasteryRecord>> {
        let data = self.storage.read_file(&self.path).await?;
        let records: Vec<MonasteryRecord> = serde_json::from_slice(&data)?;
        Ok(records)
    }
}
