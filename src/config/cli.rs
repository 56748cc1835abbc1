use crate::config::suite_config::SuiteConfig;
use crate::config::HarnessConfig;
use crate::domain::model::Resource;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "crud-api-tester")]
#[command(about = "Runs CRUD status-code checks against a REST API")]
pub struct CliConfig {
    /// Optional TOML suite file (target, fixtures, cases)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the target base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the response log file
    #[arg(long)]
    pub log_file: Option<String>,

    /// Run only these resources (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub resources: Vec<Resource>,

    /// Run only these case numbers (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub cases: Vec<u32>,

    /// Write a CSV report to this path
    #[arg(long)]
    pub report: Option<String>,

    /// Print the execution plan without sending requests
    #[arg(long)]
    pub list: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 命令列參數覆蓋檔案設定
    pub fn harness_config(&self, suite: &SuiteConfig) -> HarnessConfig {
        let mut config = suite.harness_config();
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(log_file) = &self.log_file {
            config = config.with_log_path(log_file.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;

    #[test]
    fn test_parse_filters() {
        let cli = CliConfig::parse_from([
            "crud-api-tester",
            "--resources",
            "users,tasks",
            "--cases",
            "1,14",
            "--base-url",
            "http://127.0.0.1:9000",
        ]);

        assert_eq!(cli.resources, vec![Resource::Users, Resource::Tasks]);
        assert_eq!(cli.cases, vec![1, 14]);

        let config = cli.harness_config(&SuiteConfig::default());
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.log_path(), "app.log");
    }

    #[test]
    fn test_cli_base_url_replaces_invalid_file_value() {
        let suite = SuiteConfig::from_toml_str("[target]\nbase_url = \"localhost-typo\"\n").unwrap();
        assert!(suite.validate().is_ok());

        let without_override = CliConfig::parse_from(["crud-api-tester"]);
        assert!(without_override.harness_config(&suite).validate().is_err());

        let with_override =
            CliConfig::parse_from(["crud-api-tester", "--base-url", "http://127.0.0.1:5555"]);
        let config = with_override.harness_config(&suite);
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url(), "http://127.0.0.1:5555");
    }

    #[test]
    fn test_cli_overrides_file() {
        let suite = SuiteConfig::from_toml_str(
            "[target]\nbase_url = \"http://file:1\"\nlog_file = \"file.log\"\n",
        )
        .unwrap();
        let cli = CliConfig::parse_from(["crud-api-tester", "--log-file", "cli.log"]);

        let config = cli.harness_config(&suite);
        assert_eq!(config.base_url(), "http://file:1");
        assert_eq!(config.log_path(), "cli.log");
    }
}
