pub mod catalog;
pub mod engine;
pub mod guide;
pub mod query;
pub mod reviews;

pub use crate::domain::model::MonasteryRecord;
pub use crate::domain::ports::{CatalogSource, Storage};
pub use crate::utils::error::Result;
