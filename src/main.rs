use clap::Parser;
use crud_api_tester::core::report;
use crud_api_tester::utils::error::ErrorCategory;
use crud_api_tester::utils::{logger, validation::Validate};
use crud_api_tester::{
    default_cases, CliConfig, FileResponseLog, HarnessError, RequestDispatcher, SuiteConfig,
    TestSuite,
};

fn exit_with(e: &HarnessError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e {
        HarnessError::FixtureFailed { .. } => 3,
        _ if e.category() == ErrorCategory::Configuration => 2,
        _ => 1,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting crud-api-tester");
    tracing::debug!("CLI config: {:?}", cli);

    // 載入選用的套件設定
    let suite_config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading suite configuration from: {}", path);
            SuiteConfig::from_file(path).unwrap_or_else(|e| exit_with(&e))
        }
        None => SuiteConfig::default(),
    };

    if let Err(e) = suite_config.validate() {
        exit_with(&e);
    }

    let harness_config = cli.harness_config(&suite_config);
    if let Err(e) = harness_config.validate() {
        exit_with(&e);
    }

    let cases = suite_config.test_cases().unwrap_or_else(default_cases);
    let log = FileResponseLog::new(harness_config.log_path());
    let dispatcher = RequestDispatcher::new(harness_config, log);

    let suite = TestSuite::new(dispatcher, cases)
        .with_fixtures(suite_config.fixtures().to_vec())
        .filter(&cli.resources, &cli.cases);

    if let Err(e) = suite.ensure_cases() {
        exit_with(&e);
    }

    if cli.list {
        println!("📋 Target: {}", suite.dispatcher().config().base_url());
        for fixture in suite.fixtures() {
            println!("  🌱 {} {}", fixture.method, fixture.path);
        }
        for case in suite.cases() {
            println!(
                "  - {}: {} {} (expect {}) [{}]",
                case.label(),
                case.method(),
                case.path(),
                case.expected_status,
                case.metadata.feature
            );
        }
        return;
    }

    let report = suite.run_all().await.unwrap_or_else(|e| exit_with(&e));

    report::print_summary(&report);

    if let Some(path) = &cli.report {
        if let Err(e) = report::write_csv(&report, path) {
            exit_with(&e);
        }
        println!("📁 Report saved to: {}", path);
    }

    if !report.all_passed() {
        std::process::exit(1);
    }
}
