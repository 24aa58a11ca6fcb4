use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("No valid college records in '{source_name}' ({skipped} rows skipped)")]
    EmptyDataset { source_name: String, skipped: usize },

    #[error("Data source '{source_name}' is unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("Invalid target score '{input}': {reason}")]
    InvalidTarget { input: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Enrichment failed for '{name}': {message}")]
    EnrichmentError { name: String, message: String },

    #[error("No domain known for '{name}'")]
    MissingDomain { name: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Config,
    Network,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FinderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FinderError::InvalidTarget { .. } => ErrorCategory::Input,
            FinderError::MalformedRow { .. }
            | FinderError::EmptyDataset { .. }
            | FinderError::SourceUnavailable { .. }
            | FinderError::CsvError(_) => ErrorCategory::Data,
            FinderError::ConfigError { .. }
            | FinderError::InvalidConfigValue { .. }
            | FinderError::TomlParseError(_) => ErrorCategory::Config,
            FinderError::EnrichmentError { .. }
            | FinderError::MissingDomain { .. }
            | FinderError::HttpError(_) => ErrorCategory::Network,
            FinderError::IoError(_) | FinderError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單筆資料或單一補充資料失敗，不影響整體流程
            FinderError::MalformedRow { .. }
            | FinderError::EnrichmentError { .. }
            | FinderError::MissingDomain { .. } => ErrorSeverity::Low,
            FinderError::InvalidTarget { .. } | FinderError::HttpError(_) => ErrorSeverity::Medium,
            FinderError::EmptyDataset { .. }
            | FinderError::SourceUnavailable { .. }
            | FinderError::CsvError(_)
            | FinderError::ConfigError { .. }
            | FinderError::InvalidConfigValue { .. }
            | FinderError::TomlParseError(_) => ErrorSeverity::High,
            FinderError::IoError(_) | FinderError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FinderError::EmptyDataset { source_name, .. } => {
                format!("The college list '{}' has no usable rows.", source_name)
            }
            FinderError::SourceUnavailable { source_name, .. } => {
                format!("Could not read the college list '{}'.", source_name)
            }
            FinderError::InvalidTarget { input, reason } => {
                format!("'{}' is not a valid score: {}", input, reason)
            }
            FinderError::ConfigError { .. }
            | FinderError::InvalidConfigValue { .. }
            | FinderError::TomlParseError(_) => format!("Configuration problem: {}", self),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Enter a whole-number score within the accepted range.",
            ErrorCategory::Data => {
                "Check that the CSV file exists, is UTF-8, and has rows of name,acceptance_rate,average_score[,domain]."
            }
            ErrorCategory::Config => "Fix the flagged value on the command line or in the TOML config.",
            ErrorCategory::Network => "Enrichment is optional; rerun without --enrich or check the logo endpoint.",
            ErrorCategory::System => "Check file permissions and available disk space, then retry.",
        }
    }

    /// Process exit code for a failure of this severity.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
