use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Duplicate monastery id: {id}")]
    DuplicateIdError { id: String },

    #[error("Invalid record '{id}': {reason}")]
    InvalidRecordError { id: String, reason: String },

    #[error("No monastery with id '{id}'")]
    UnknownMonasteryError { id: String },

    #[error("Unknown sort key: {key}")]
    UnknownSortKeyError { key: String },

    #[error("Unknown filter key: {key}")]
    UnknownFilterKeyError { key: String },

    #[error("Unknown language code: {code}")]
    UnknownLanguageError { code: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::IoError(_) => ErrorCategory::Io,
            CatalogError::SerializationError(_)
            | CatalogError::CsvError(_)
            | CatalogError::DuplicateIdError { .. }
            | CatalogError::InvalidRecordError { .. } => ErrorCategory::Data,
            CatalogError::ConfigError { .. }
            | CatalogError::ConfigValidationError { .. }
            | CatalogError::InvalidConfigValueError { .. }
            | CatalogError::MissingConfigError { .. }
            | CatalogError::UnknownLanguageError { .. } => ErrorCategory::Configuration,
            CatalogError::UnknownMonasteryError { .. }
            | CatalogError::UnknownSortKeyError { .. }
            | CatalogError::UnknownFilterKeyError { .. } => ErrorCategory::Query,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Query => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CatalogError::IoError(_) => {
                "Check that the file exists and that you have permission to read or write it".to_string()
            }
            CatalogError::SerializationError(_) => {
                "Make sure the catalog file is a JSON array of monastery records".to_string()
            }
            CatalogError::CsvError(_) => "Retry the export with --format json".to_string(),
            CatalogError::ConfigError { .. } | CatalogError::ConfigValidationError { .. } => {
                "Review the TOML configuration file for syntax errors".to_string()
            }
            CatalogError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' in the configuration", field)
            }
            CatalogError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration or pass it on the command line", field)
            }
            CatalogError::DuplicateIdError { .. } | CatalogError::InvalidRecordError { .. } => {
                "Fix the offending record in the catalog file and run `validate` again".to_string()
            }
            CatalogError::UnknownMonasteryError { .. } => {
                "Run `list` to see the available monastery ids".to_string()
            }
            CatalogError::UnknownSortKeyError { .. } => {
                "Use one of: name, rating, founded, difficulty, reviews".to_string()
            }
            CatalogError::UnknownFilterKeyError { .. } => {
                "Use one of: all, featured, ancient, modern, small, large, easy, moderate, challenging"
                    .to_string()
            }
            CatalogError::UnknownLanguageError { .. } => {
                "Run `languages` to see the supported language codes".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not access a file: {}", self),
            ErrorCategory::Data => format!("The monastery catalog is invalid: {}", self),
            ErrorCategory::Configuration => format!("The configuration is invalid: {}", self),
            ErrorCategory::Query => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = CatalogError::DuplicateIdError { id: "1".to_string() };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);

        let err = CatalogError::UnknownMonasteryError { id: "99".to_string() };
        assert_eq!(err.category(), ErrorCategory::Query);
        assert!(err.recovery_suggestion().contains("list"));

        let io = CatalogError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }
}
