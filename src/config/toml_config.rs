use crate::adapters::render::OutputFormat;
use crate::core::query::{FilterKey, SortKey};
use crate::domain::model::Language;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub query: QuerySection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSection {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplaySection {
    pub language: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuerySection {
    pub default_sort: Option<String>,
    pub default_filter: Option<String>,
    pub strict_keys: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_PATH})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn catalog_path(&self) -> Option<&str> {
        self.catalog.path.as_deref()
    }

    pub fn language(&self) -> Result<Language> {
        self.display
            .language
            .as_deref()
            .map_or(Ok(Language::default()), str::parse)
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        self.display
            .format
            .as_deref()
            .map_or(Ok(OutputFormat::default()), str::parse)
    }

    pub fn default_sort(&self) -> &str {
        self.query.default_sort.as_deref().unwrap_or("name")
    }

    pub fn default_filter(&self) -> &str {
        self.query.default_filter.as_deref().unwrap_or("all")
    }

    pub fn strict_keys(&self) -> bool {
        self.query.strict_keys.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = self.catalog_path() {
            validate_path("catalog.path", path)?;
        }

        self.output_format()?;
        self.language()?;

        // 嚴格模式下預設的 key 也必須合法
        if self.strict_keys() {
            self.default_sort().parse::<SortKey>()?;
            self.default_filter().parse::<FilterKey>()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[catalog]
path = "data/monasteries.json"

[display]
language = "bo"
format = "json"

[query]
default_sort = "rating"
default_filter = "featured"
strict_keys = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.catalog_path(), Some("data/monasteries.json"));
        assert_eq!(config.language().unwrap(), Language::Tibetan);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
        assert_eq!(config.default_sort(), "rating");
        assert!(config.strict_keys());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.catalog_path(), None);
        assert_eq!(config.language().unwrap(), Language::English);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Table);
        assert_eq!(config.default_sort(), "name");
        assert_eq!(config.default_filter(), "all");
        assert!(!config.strict_keys());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MONASTERY_CATALOG_TEST_PATH", "/srv/catalog.json");

        let toml_content = r#"
[catalog]
path = "${MONASTERY_CATALOG_TEST_PATH}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.catalog_path(), Some("/srv/catalog.json"));

        std::env::remove_var("MONASTERY_CATALOG_TEST_PATH");
    }

    #[test]
    fn test_config_validation() {
        let bad_format = TomlConfig::from_toml_str("[display]\nformat = \"xml\"\n").unwrap();
        assert!(bad_format.validate().is_err());

        let upper_format = TomlConfig::from_toml_str("[display]\nformat = \"JSON\"\n").unwrap();
        assert!(upper_format.validate().is_ok());
        assert_eq!(upper_format.output_format().unwrap(), OutputFormat::Json);

        let bad_language = TomlConfig::from_toml_str("[display]\nlanguage = \"fr\"\n").unwrap();
        assert!(bad_language.validate().is_err());

        let lenient = TomlConfig::from_toml_str("[query]\ndefault_sort = \"distance\"\n").unwrap();
        assert!(lenient.validate().is_ok());

        let strict = TomlConfig::from_toml_str(
            "[query]\ndefault_sort = \"distance\"\nstrict_keys = true\n",
        )
        .unwrap();
        assert!(strict.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[display]\nlanguage = \"ne\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.language().unwrap(), Language::Nepali);
    }
}
