pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{Cli, Commands};

pub use crate::adapters::{
    render::OutputFormat,
    source::{BuiltinSource, JsonFileSource},
    storage::LocalStorage,
};
pub use config::{DisplayPreferences, Settings, TomlConfig};
pub use crate::core::{
    catalog::Catalog,
    engine::CatalogEngine,
    guide::{Guide, GuideReply, Topic},
    query::{run_query, CatalogQuery, FilterKey, QueryView, SortKey},
};
pub use domain::model::{Category, Difficulty, Language, MonasteryRecord};
pub use utils::error::{CatalogError, Result};
