use crate::config::HarnessConfig;
use crate::domain::model::{HttpMethod, Operation, Resource, TestCase};
use crate::utils::error::{HarnessError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// 選用的 TOML 測試套件設定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteConfig {
    pub target: Option<TargetConfig>,
    pub fixtures: Option<Vec<FixtureDefinition>>,
    pub cases: Option<Vec<CaseDefinition>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    pub base_url: Option<String>,
    pub log_file: Option<String>,
    pub headers: Option<BTreeMap<String, String>>,
}

/// Seed request dispatched before any case runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureDefinition {
    pub method: String,
    pub path: String,
    pub payload: Option<serde_json::Value>,
    pub expected_status: Option<u16>,
}

impl FixtureDefinition {
    pub fn http_method(&self) -> Result<HttpMethod> {
        self.method.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseDefinition {
    pub number: u32,
    pub resource: Resource,
    pub operation: Operation,
    pub id: Option<u64>,
    pub payload: Option<serde_json::Value>,
    pub expected_status: Option<u16>,
    pub description: Option<String>,
}

impl CaseDefinition {
    pub fn to_test_case(&self) -> TestCase {
        let mut case = TestCase::new(self.number, self.resource, self.operation);
        if let Some(id) = self.id {
            case = case.with_id(id);
        }
        if let Some(payload) = &self.payload {
            case = case.with_payload(payload.clone());
        }
        if let Some(status) = self.expected_status {
            case = case.with_expected_status(status);
        }
        if let Some(description) = &self.description {
            case.metadata.description = description.clone();
        }
        case
    }
}

impl SuiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HarnessError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_TOKEN})；未設定的變數視為錯誤
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            HarnessError::ConfigError {
                message: format!("Invalid substitution pattern: {}", e),
            }
        })?;

        let mut missing = Vec::new();
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                missing.push(var_name.to_string());
                String::new()
            })
        });

        if !missing.is_empty() {
            return Err(HarnessError::ConfigError {
                message: format!("Undefined environment variables: {}", missing.join(", ")),
            });
        }

        Ok(result.into_owned())
    }

    /// 將 [target] 套用到預設設定上
    pub fn harness_config(&self) -> HarnessConfig {
        let mut config = HarnessConfig::default();

        if let Some(target) = &self.target {
            if let Some(base_url) = &target.base_url {
                config = config.with_base_url(base_url.clone());
            }
            if let Some(log_file) = &target.log_file {
                config = config.with_log_path(log_file.clone());
            }
            if let Some(headers) = &target.headers {
                for (name, value) in headers {
                    config = config.with_header(name.clone(), value.clone());
                }
            }
        }

        config
    }

    /// `[[cases]]` replaces the built-in list when present.
    pub fn test_cases(&self) -> Option<Vec<TestCase>> {
        self.cases
            .as_ref()
            .map(|cases| cases.iter().map(CaseDefinition::to_test_case).collect())
    }

    pub fn fixtures(&self) -> &[FixtureDefinition] {
        self.fixtures.as_deref().unwrap_or(&[])
    }
}

/// Checks fixtures and cases only. `[target]` may still be overridden from the
/// command line, so it is validated on the merged `HarnessConfig` instead.
impl Validate for SuiteConfig {
    fn validate(&self) -> Result<()> {
        for fixture in self.fixtures() {
            fixture.http_method()?;
            validation::validate_non_empty_string("fixtures.path", &fixture.path)?;
            if let Some(status) = fixture.expected_status {
                validation::validate_status_code("fixtures.expected_status", status)?;
            }
        }

        if let Some(cases) = &self.cases {
            validation::validate_unique("cases.number", cases.iter().map(|c| c.number))?;
            for case in cases {
                if let Some(status) = case.expected_status {
                    validation::validate_status_code("cases.expected_status", status)?;
                }
                if case.operation != Operation::Create && case.id.is_none() {
                    return Err(HarnessError::MissingConfigError {
                        field: format!("cases[{}].id", case.number),
                    });
                }
            }
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
    fn test_parse_full_suite_config() {
        let toml_content = r#"
[target]
base_url = "http://api.internal:8080"
log_file = "logs/crud.log"

[target.headers]
X-Suite = "nightly"

[[fixtures]]
method = "POST"
path = "users"
payload = { name = "Seed User", age = 40, email = "seed@example.com" }
expected_status = 201

[[cases]]
number = 1
resource = "users"
operation = "read"
id = 7

[[cases]]
number = 2
resource = "tasks"
operation = "update"
id = 7
payload = { title = "Nightly", completed = true, userId = 2 }
description = "Mark the nightly task done"
"#;

        let config = SuiteConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        let harness = config.harness_config();
        assert!(harness.validate().is_ok());
        assert_eq!(harness.base_url(), "http://api.internal:8080");
        assert_eq!(harness.log_path(), "logs/crud.log");
        assert_eq!(harness.headers()["X-Suite"], "nightly");

        assert_eq!(config.fixtures().len(), 1);
        assert_eq!(config.fixtures()[0].http_method().unwrap(), HttpMethod::Post);
        assert_eq!(
            config.fixtures()[0].payload.as_ref().unwrap()["age"],
            serde_json::json!(40)
        );

        let cases = config.test_cases().unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].path(), "users/7");
        assert_eq!(cases[0].expected_status, 200);
        assert_eq!(cases[1].metadata.description, "Mark the nightly task done");
        assert_eq!(cases[1].payload.as_ref().unwrap()["completed"], serde_json::json!(true));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SuiteConfig::from_toml_str("").unwrap();
        assert!(config.test_cases().is_none());
        assert!(config.fixtures().is_empty());
        assert_eq!(config.harness_config(), HarnessConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CRUD_TEST_BASE_URL", "http://10.0.0.5:5555");

        let config = SuiteConfig::from_toml_str(
            r#"
[target]
base_url = "${CRUD_TEST_BASE_URL}"
"#,
        )
        .unwrap();
        assert_eq!(config.harness_config().base_url(), "http://10.0.0.5:5555");

        std::env::remove_var("CRUD_TEST_BASE_URL");
    }

    #[test]
    fn test_undefined_env_var_is_an_error() {
        let err = SuiteConfig::from_toml_str(
            r#"
[target]
base_url = "${CRUD_TEST_SURELY_UNDEFINED}"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("CRUD_TEST_SURELY_UNDEFINED"));
    }

    #[test]
    fn test_validation_rejects_bad_fixture_method() {
        let config = SuiteConfig::from_toml_str(
            r#"
[[fixtures]]
method = "PATCH"
path = "users/3"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(HarnessError::InvalidMethod { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_lowercase_fixture_method() {
        let config = SuiteConfig::from_toml_str(
            r#"
[[fixtures]]
method = "post"
path = "users"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(HarnessError::InvalidMethod { ref method }) if method == "post"
        ));
    }

    #[test]
    fn test_target_is_not_checked_by_suite_validation() {
        let config = SuiteConfig::from_toml_str(
            r#"
[target]
base_url = "not-a-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert!(config.harness_config().validate().is_err());
    }

    #[test]
    fn test_validation_rejects_duplicate_case_numbers() {
        let config = SuiteConfig::from_toml_str(
            r#"
[[cases]]
number = 1
resource = "users"
operation = "create"

[[cases]]
number = 1
resource = "posts"
operation = "create"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_requires_id_for_read() {
        let config = SuiteConfig::from_toml_str(
            r#"
[[cases]]
number = 4
resource = "comments"
operation = "delete"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(HarnessError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[target]\nbase_url = \"http://127.0.0.1:5555\"\n")
            .unwrap();

        let config = SuiteConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.harness_config().base_url(), "http://127.0.0.1:5555");
    }
}
