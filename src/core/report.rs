use crate::core::suite::SuiteReport;
use crate::core::{CaseOutcome, CaseResult};
use crate::utils::error::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    number: u32,
    resource: &'a str,
    operation: String,
    method: &'static str,
    path: String,
    expected_status: u16,
    actual_status: Option<u16>,
    outcome: &'static str,
    duration_ms: u64,
}

impl<'a> From<&'a CaseResult> for ReportRow<'a> {
    fn from(result: &'a CaseResult) -> Self {
        Self {
            number: result.case.number,
            resource: result.case.resource.path(),
            operation: result.case.operation.to_string(),
            method: result.case.method().as_str(),
            path: result.case.path(),
            expected_status: result.case.expected_status,
            actual_status: result.actual_status,
            outcome: result.outcome.as_str(),
            duration_ms: result.duration.as_millis() as u64,
        }
    }
}

/// 一個案例一列的 CSV 報告
pub fn write_csv<P: AsRef<Path>>(report: &SuiteReport, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for result in &report.results {
        writer.serialize(ReportRow::from(result))?;
    }
    writer.flush()?;

    tracing::info!("📁 Report saved to: {}", path.as_ref().display());
    Ok(())
}

pub fn format_result_line(result: &CaseResult) -> String {
    match &result.outcome {
        CaseOutcome::Passed => format!("✅ {}", result.case.label()),
        CaseOutcome::Failed {
            expected, actual, ..
        } => format!(
            "❌ {} (expected {}, got {})",
            result.case.label(),
            expected,
            actual
        ),
        CaseOutcome::Errored { message } => format!("💥 {} ({})", result.case.label(), message),
    }
}

pub fn print_summary(report: &SuiteReport) {
    println!("\n📋 Run {}", report.run_id);
    for result in &report.results {
        println!("  {}", format_result_line(result));
    }
    println!(
        "📈 Total: {} cases, {} passed, {} failed, {} errored in {:?}",
        report.results.len(),
        report.passed(),
        report.failed(),
        report.errored(),
        report.total_duration()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Operation, Resource, TestCase};
    use std::time::Duration;
    use tempfile::TempDir;

    fn sample_report() -> SuiteReport {
        SuiteReport {
            run_id: "run_test".to_string(),
            results: vec![
                CaseResult {
                    case: TestCase::new(5, Resource::Posts, Operation::Create),
                    outcome: CaseOutcome::Passed,
                    actual_status: Some(201),
                    duration: Duration::from_millis(12),
                },
                CaseResult {
                    case: TestCase::new(8, Resource::Posts, Operation::Delete).with_id(5),
                    outcome: CaseOutcome::Failed {
                        expected: 200,
                        actual: 404,
                        body: "{}".to_string(),
                    },
                    actual_status: Some(404),
                    duration: Duration::from_millis(7),
                },
            ],
        }
    }

    #[test]
    fn test_write_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports").join("crud.csv");

        write_csv(&sample_report(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "number,resource,operation,method,path,expected_status,actual_status,outcome,duration_ms"
        );
        assert_eq!(lines[1], "5,posts,create,POST,posts,201,201,passed,12");
        assert_eq!(lines[2], "8,posts,delete,DELETE,posts/5,200,404,failed,7");
    }

    #[test]
    fn test_format_result_line() {
        let report = sample_report();
        assert_eq!(format_result_line(&report.results[0]), "✅ 05 Create Post");
        assert_eq!(
            format_result_line(&report.results[1]),
            "❌ 08 Delete Post (expected 200, got 404)"
        );
    }
}
