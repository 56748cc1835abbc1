use crate::utils::error::{HarnessError, Result};
use std::collections::HashSet;
use std::hash::Hash;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(HarnessError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(HarnessError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(HarnessError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(HarnessError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(HarnessError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HarnessError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
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
        return Err(HarnessError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// HTTP 狀態碼必須落在 100..=599
pub fn validate_status_code(field_name: &str, status: u16) -> Result<()> {
    validate_range(field_name, status, 100, 599)
}

pub fn validate_unique<T, I>(field_name: &str, values: I) -> Result<()>
where
    T: Eq + Hash + std::fmt::Display,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    for value in values {
        let rendered = value.to_string();
        if !seen.insert(value) {
            return Err(HarnessError::ConfigValidationError {
                field: field_name.to_string(),
                message: format!("Duplicate value: {}", rendered),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("base_url", "http://localhost:5555").is_ok());
        assert!(validate_url("base_url", "https://example.com").is_ok());
        assert!(validate_url("base_url", "").is_err());
        assert!(validate_url("base_url", "invalid-url").is_err());
        assert!(validate_url("base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_status_code() {
        assert!(validate_status_code("expected_status", 201).is_ok());
        assert!(validate_status_code("expected_status", 99).is_err());
        assert!(validate_status_code("expected_status", 600).is_err());
    }

    #[test]
    fn test_validate_unique() {
        assert!(validate_unique("cases.number", vec![1u32, 2, 3]).is_ok());
        let err = validate_unique("cases.number", vec![1u32, 2, 1]).unwrap_err();
        assert!(err.to_string().contains("Duplicate value: 1"));
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("log_file", "app.log").is_ok());
        assert!(validate_path("log_file", "").is_err());
        assert!(validate_path("log_file", "bad\0path").is_err());
    }
}
