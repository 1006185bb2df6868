use std::collections::HashSet;

use crate::core::query::{run_query, CatalogQuery, QueryView};
use crate::domain::model::MonasteryRecord;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};

const BUILTIN_CATALOG: &str = include_str!("../../data/monasteries.json");

/// The immutable monastery collection.
///
/// Records are validated once on construction and never mutated afterwards;
/// every query borrows from the same backing storage.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<MonasteryRecord>,
}

impl Catalog {
    pub fn from_records(records: Vec<MonasteryRecord>) -> Result<Self> {
        let catalog = Self { records };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let records: Vec<MonasteryRecord> = serde_json::from_str(content)?;
        Self::from_records(records)
    }

    /// 內建的錫金寺院資料集
    pub fn builtin() -> Result<Self> {
        Self::from_records(Self::builtin_records()?)
    }

    /// Embedded records, parsed but not yet validated.
    pub fn builtin_records() -> Result<Vec<MonasteryRecord>> {
        Ok(serde_json::from_str(BUILTIN_CATALOG)?)
    }

    pub fn records(&self) -> &[MonasteryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&MonasteryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&MonasteryRecord> {
        self.get(id).ok_or_else(|| CatalogError::UnknownMonasteryError { id: id.to_string() })
    }

    pub fn featured(&self) -> Vec<&MonasteryRecord> {
        self.records.iter().filter(|r| r.featured).collect()
    }

    pub fn query(&self, query: &CatalogQuery) -> QueryView<'_> {
        run_query(&self.records, query)
    }
}

fn invalid(record: &MonasteryRecord, err: CatalogError) -> CatalogError {
    CatalogError::InvalidRecordError {
        id: record.id.clone(),
        reason: err.to_string(),
    }
}

fn validate_record(record: &MonasteryRecord) -> Result<()> {
    validate_non_empty_string("id", &record.id).map_err(|e| invalid(record, e))?;
    validate_non_empty_string("name", &record.name).map_err(|e| invalid(record, e))?;

    if let Some(rating) = record.rating {
        validate_range("rating", rating, 0.0, 5.0).map_err(|e| invalid(record, e))?;
    }
    for stay in &record.accommodations {
        validate_range("accommodations.rating", stay.rating, 0.0, 5.0)
            .map_err(|e| invalid(record, e))?;
    }
    for place in &record.restaurants {
        validate_range("restaurants.rating", place.rating, 0.0, 5.0)
            .map_err(|e| invalid(record, e))?;
    }
    for review in &record.reviews {
        validate_range("reviews.rating", review.rating, 1, 5).map_err(|e| invalid(record, e))?;
    }
    Ok(())
}

impl Validate for Catalog {
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for record in &self.records {
            validate_record(record)?;
            if !seen.insert(record.id.as_str()) {
                return Err(CatalogError::DuplicateIdError {
                    id: record.id.clone(),
                });
            }
        }
        tracing::debug!("Validated {} monastery records", self.records.len());
        Ok(())
    }
}
