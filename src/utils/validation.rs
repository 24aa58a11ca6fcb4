use crate::utils::error::{FinderError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Inclusive bounds a caller places on the target score before the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBounds {
    pub min: i64,
    pub max: i64,
}

impl Default for ScoreBounds {
    fn default() -> Self {
        Self { min: 400, max: 1600 }
    }
}

/// Parses a user-entered score. Returns `InvalidTarget` instead of re-prompting;
/// looping on failure is up to the caller.
pub fn validate_target_score(input: &str, bounds: ScoreBounds) -> Result<i64> {
    let trimmed = input.trim();
    let score: i64 = trimmed.parse().map_err(|_| FinderError::InvalidTarget {
        input: trimmed.to_string(),
        reason: "give an integer only".to_string(),
    })?;

    if score < bounds.min || score > bounds.max {
        return Err(FinderError::InvalidTarget {
            input: trimmed.to_string(),
            reason: format!("score must be between {} and {}", bounds.min, bounds.max),
        });
    }
    Ok(score)
}

pub fn validate_url_template(field_name: &str, template: &str) -> Result<()> {
    if template.is_empty() {
        return Err(FinderError::InvalidConfigValue {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    if !template.contains("{domain}") {
        return Err(FinderError::InvalidConfigValue {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: "URL template must contain a {domain} placeholder".to_string(),
        });
    }

    // 以範例網域代入後再驗證 URL 格式
    let probe = template.replace("{domain}", "example.edu");
    match Url::parse(&probe) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(FinderError::InvalidConfigValue {
                field: field_name.to_string(),
                value: template.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(FinderError::InvalidConfigValue {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(FinderError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FinderError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(FinderError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(FinderError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_target_score() {
        let bounds = ScoreBounds::default();
        assert_eq!(validate_target_score("1200", bounds).unwrap(), 1200);
        assert_eq!(validate_target_score("  400 \n", bounds).unwrap(), 400);
        assert_eq!(validate_target_score("1600", bounds).unwrap(), 1600);
        assert!(validate_target_score("399", bounds).is_err());
        assert!(validate_target_score("1601", bounds).is_err());
        assert!(validate_target_score("twelve hundred", bounds).is_err());
        assert!(validate_target_score("1200.5", bounds).is_err());
        assert!(validate_target_score("", bounds).is_err());
    }

    #[test]
    fn test_invalid_target_carries_reason() {
        let err = validate_target_score("abc", ScoreBounds::default()).unwrap_err();
        match err {
            FinderError::InvalidTarget { input, reason } => {
                assert_eq!(input, "abc");
                assert!(reason.contains("integer"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validate_url_template() {
        assert!(validate_url_template("logo_endpoint", "https://logo.clearbit.com/{domain}").is_ok());
        assert!(validate_url_template("logo_endpoint", "http://localhost:8080/logos/{domain}.png").is_ok());
        assert!(validate_url_template("logo_endpoint", "").is_err());
        assert!(validate_url_template("logo_endpoint", "https://logo.clearbit.com/").is_err());
        assert!(validate_url_template("logo_endpoint", "ftp://logos/{domain}").is_err());
        assert!(validate_url_template("logo_endpoint", "not a url {domain}").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("concurrency", 4, 1).is_ok());
        assert!(validate_positive_number("concurrency", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("min_score", 400, 0, 1600).is_ok());
        assert!(validate_range("min_score", -1, 0, 1600).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data.path", "data/colleges.csv").is_ok());
        assert!(validate_path("data.path", "  ").is_err());
        assert!(validate_path("data.path", "bad\0path").is_err());
    }
}
