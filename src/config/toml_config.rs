use crate::adapters::http::DEFAULT_LOGO_ENDPOINT;
use crate::app::report::ReportFormat;
use crate::core::engine::EngineConfig;
use crate::core::enrichment::DEFAULT_CONCURRENCY;
use crate::utils::error::{FinderError, Result};
use crate::utils::validation::{
    validate_path, validate_range, validate_url_template, ScoreBounds, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATA_PATH: &str = "data/colleges.csv";
const MAX_CONCURRENCY: usize = 64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    pub data: DataConfig,
    pub engine: EngineConfig,
    pub target: TargetConfig,
    pub enrichment: EnrichmentConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATA_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub min_score: i64,
    pub max_score: i64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        let bounds = ScoreBounds::default();
        Self {
            min_score: bounds.min,
            max_score: bounds.max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    pub enabled: bool,
    pub logo_endpoint: String,
    pub concurrency: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            logo_endpoint: DEFAULT_LOGO_ENDPOINT.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: ReportFormat,
    pub path: Option<String>,
}

impl FinderConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| FinderError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed)?)
    }

    /// 替換環境變數 (例如 ${COLLEGE_DATA})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FinderError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn score_bounds(&self) -> ScoreBounds {
        ScoreBounds {
            min: self.target.min_score,
            max: self.target.max_score,
        }
    }
}

impl Validate for FinderConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data.path", &self.data.path)?;
        self.engine.validate()?;

        if self.target.min_score > self.target.max_score {
            return Err(FinderError::InvalidConfigValue {
                field: "target.min_score".to_string(),
                value: self.target.min_score.to_string(),
                reason: format!(
                    "must not exceed target.max_score ({})",
                    self.target.max_score
                ),
            });
        }

        if self.enrichment.enabled {
            validate_url_template("enrichment.logo_endpoint", &self.enrichment.logo_endpoint)?;
            validate_range(
                "enrichment.concurrency",
                self.enrichment.concurrency,
                1,
                MAX_CONCURRENCY,
            )?;
        }

        if let Some(path) = &self.output.path {
            validate_path("output.path", path)?;
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
    fn test_empty_document_uses_defaults() {
        let config = FinderConfig::from_toml_str("").unwrap();

        assert_eq!(config, FinderConfig::default());
        assert_eq!(config.data.path, DEFAULT_DATA_PATH);
        assert_eq!(config.engine.initial_buffer, 100);
        assert_eq!(config.score_bounds(), ScoreBounds { min: 400, max: 1600 });
        assert!(!config.enrichment.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[data]
path = "fixtures/colleges.csv"

[engine]
initial_buffer = 50
widen_step = 25
min_candidates = 5
max_results = 3

[target]
min_score = 1
max_score = 36

[enrichment]
enabled = true
logo_endpoint = "https://logos.example.com/{domain}.png"
concurrency = 2

[output]
format = "json"
path = "out/report.json"
"#;

        let config = FinderConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data.path, "fixtures/colleges.csv");
        assert_eq!(config.engine.widen_step, 25);
        assert_eq!(config.engine.max_results, 3);
        assert_eq!(config.score_bounds(), ScoreBounds { min: 1, max: 36 });
        assert_eq!(config.enrichment.concurrency, 2);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert_eq!(config.output.path.as_deref(), Some("out/report.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COLLEGE_FINDER_TEST_DATA", "/tmp/colleges.csv");

        let config = FinderConfig::from_toml_str(
            r#"
[data]
path = "${COLLEGE_FINDER_TEST_DATA}"
"#,
        )
        .unwrap();
        assert_eq!(config.data.path, "/tmp/colleges.csv");

        std::env::remove_var("COLLEGE_FINDER_TEST_DATA");
    }

    #[test]
    fn test_config_validation() {
        let inverted = FinderConfig::from_toml_str(
            r#"
[target]
min_score = 1600
max_score = 400
"#,
        )
        .unwrap();
        assert!(inverted.validate().is_err());

        let bad_engine = FinderConfig::from_toml_str("[engine]\nmax_results = 0\n").unwrap();
        assert!(bad_engine.validate().is_err());

        let bad_logo = FinderConfig::from_toml_str(
            "[enrichment]\nenabled = true\nlogo_endpoint = \"ftp://logos/{domain}\"\n",
        )
        .unwrap();
        assert!(bad_logo.validate().is_err());

        let too_many_workers =
            FinderConfig::from_toml_str("[enrichment]\nenabled = true\nconcurrency = 500\n")
                .unwrap();
        assert!(too_many_workers.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = FinderConfig::from_toml_str("[engine\n").unwrap_err();
        assert!(matches!(err, FinderError::TomlParseError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[data]\npath = \"from-file.csv\"\n")
            .unwrap();

        let config = FinderConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.data.path, "from-file.csv");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = FinderConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, FinderError::ConfigError { .. }));
    }
}
