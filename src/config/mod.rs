#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{Cli, Commands};
pub use toml_config::TomlConfig;

use crate::adapters::render::OutputFormat;
use crate::core::query::CatalogQuery;
use crate::domain::model::Language;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};

/// Presentation choices handed to the renderer; nothing reads them from
/// process-wide state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayPreferences {
    pub language: Language,
    pub format: OutputFormat,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub catalog: Option<String>,
    pub language: Option<String>,
    pub format: Option<String>,
    pub strict: bool,
}

/// Effective settings after layering overrides on the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub catalog_path: Option<String>,
    pub display: DisplayPreferences,
    pub default_sort: String,
    pub default_filter: String,
    pub strict_keys: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: None,
            display: DisplayPreferences::default(),
            default_sort: "name".to_string(),
            default_filter: "all".to_string(),
            strict_keys: false,
        }
    }
}

impl Settings {
    pub fn from_config(config: &TomlConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog_path: config.catalog_path().map(str::to_string),
            display: DisplayPreferences {
                language: config.language()?,
                format: config.output_format()?,
            },
            default_sort: config.default_sort().to_string(),
            default_filter: config.default_filter().to_string(),
            strict_keys: config.strict_keys(),
        })
    }

    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Self> {
        if let Some(path) = &overrides.catalog {
            validate_path("--catalog", path)?;
            self.catalog_path = Some(path.clone());
        }
        if let Some(language) = &overrides.language {
            self.display.language = language.parse()?;
        }
        if let Some(format) = &overrides.format {
            self.display.format = format.parse()?;
        }
        self.strict_keys |= overrides.strict;
        Ok(self)
    }

    /// Build a query, filling missing keys from the configured defaults.
    pub fn query(&self, search: &str, filter: Option<&str>, sort: Option<&str>) -> Result<CatalogQuery> {
        let filter = filter.unwrap_or(self.default_filter.as_str());
        let sort = sort.unwrap_or(self.default_sort.as_str());
        if self.strict_keys {
            CatalogQuery::from_keys_strict(search, filter, sort)
        } else {
            Ok(CatalogQuery::from_keys(search, filter, sort))
        }
    }
}
