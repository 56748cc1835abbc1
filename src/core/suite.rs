use crate::config::suite_config::FixtureDefinition;
use crate::core::{ApiResponse, CaseOutcome, CaseResult, Dispatch, Resource, TestCase};
use crate::utils::error::{HarnessError, Result};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// 單一斷言：狀態碼必須相等
pub fn assert_status(expected: u16, response: &ApiResponse) -> Result<()> {
    if response.status == expected {
        Ok(())
    } else {
        Err(HarnessError::StatusMismatch {
            expected,
            actual: response.status,
        })
    }
}

/// 一次執行的結果
#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub run_id: String,
    pub results: Vec<CaseResult>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.count("passed")
    }

    pub fn failed(&self) -> usize {
        self.count("failed")
    }

    pub fn errored(&self) -> usize {
        self.count("errored")
    }

    fn count(&self, outcome: &str) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome.as_str() == outcome)
            .count()
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(CaseResult::passed)
    }

    pub fn total_duration(&self) -> Duration {
        self.results.iter().map(|r| r.duration).sum()
    }

    /// 獲取執行摘要
    pub fn summary(&self) -> HashMap<String, serde_json::Value> {
        let mut summary = HashMap::new();

        summary.insert("total_cases".to_string(), self.results.len().into());
        summary.insert("passed".to_string(), self.passed().into());
        summary.insert("failed".to_string(), self.failed().into());
        summary.insert("errored".to_string(), self.errored().into());
        summary.insert(
            "total_duration_ms".to_string(),
            (self.total_duration().as_millis() as u64).into(),
        );

        let executed: Vec<serde_json::Value> = self
            .results
            .iter()
            .map(|r| serde_json::Value::String(r.case.label()))
            .collect();
        summary.insert("executed_cases".to_string(), serde_json::Value::Array(executed));

        summary
    }
}

/// Runs test cases one at a time, in list order, against a dispatcher.
pub struct TestSuite<D: Dispatch> {
    dispatcher: D,
    cases: Vec<TestCase>,
    fixtures: Vec<FixtureDefinition>,
    run_id: String,
}

impl<D: Dispatch> TestSuite<D> {
    pub fn new(dispatcher: D, cases: Vec<TestCase>) -> Self {
        Self {
            dispatcher,
            cases,
            fixtures: Vec::new(),
            run_id: format!("run_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S")),
        }
    }

    pub fn with_fixtures(mut self, fixtures: Vec<FixtureDefinition>) -> Self {
        self.fixtures = fixtures;
        self
    }

    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = run_id.into();
        self
    }

    /// 只保留指定資源或編號的案例；空集合代表不過濾
    pub fn filter(mut self, resources: &[Resource], numbers: &[u32]) -> Self {
        self.cases.retain(|case| {
            (resources.is_empty() || resources.contains(&case.resource))
                && (numbers.is_empty() || numbers.contains(&case.number))
        });
        self
    }

    /// 過濾後沒有任何案例時視為設定錯誤，避免空跑被當成成功
    pub fn ensure_cases(&self) -> Result<()> {
        if self.cases.is_empty() {
            return Err(HarnessError::ConfigValidationError {
                field: "cases".to_string(),
                message: "No test cases selected; check --cases / --resources filters"
                    .to_string(),
            });
        }
        Ok(())
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn fixtures(&self) -> &[FixtureDefinition] {
        &self.fixtures
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// 依序送出 fixture；任何一個失敗就中止
    pub async fn load_fixtures(&self) -> Result<()> {
        for fixture in &self.fixtures {
            let method = fixture.http_method()?;
            tracing::info!("🌱 Loading fixture: {} {}", method, fixture.path);

            let response = self
                .dispatcher
                .dispatch(method, &fixture.path, fixture.payload.as_ref())
                .await
                .map_err(|e| HarnessError::FixtureFailed {
                    path: fixture.path.clone(),
                    details: e.to_string(),
                })?;

            if let Some(expected) = fixture.expected_status {
                assert_status(expected, &response).map_err(|e| HarnessError::FixtureFailed {
                    path: fixture.path.clone(),
                    details: e.to_string(),
                })?;
            }
        }
        Ok(())
    }

    /// One dispatch, one assertion. Never returns an error: failures are captured
    /// in the outcome so the next case still runs.
    pub async fn run_case(&self, case: &TestCase) -> CaseResult {
        let start_time = Instant::now();
        let path = case.path();

        let dispatched = self
            .dispatcher
            .dispatch(case.method(), &path, case.payload.as_ref())
            .await;

        let (outcome, actual_status) = match dispatched {
            Ok(response) => match assert_status(case.expected_status, &response) {
                Ok(()) => (CaseOutcome::Passed, Some(response.status)),
                Err(_) => (
                    CaseOutcome::Failed {
                        expected: case.expected_status,
                        actual: response.status,
                        body: response.body,
                    },
                    Some(response.status),
                ),
            },
            Err(e) => (
                CaseOutcome::Errored {
                    message: e.to_string(),
                },
                None,
            ),
        };

        CaseResult {
            case: case.clone(),
            outcome,
            actual_status,
            duration: start_time.elapsed(),
        }
    }

    /// 執行所有案例
    pub async fn run_all(&self) -> Result<SuiteReport> {
        tracing::info!(
            "🚀 Starting run {} ({} cases, {} fixtures)",
            self.run_id,
            self.cases.len(),
            self.fixtures.len()
        );

        self.ensure_cases()?;
        self.load_fixtures().await?;

        let mut results = Vec::with_capacity(self.cases.len());

        for case in &self.cases {
            let result = self.run_case(case).await;

            match &result.outcome {
                CaseOutcome::Passed => {
                    tracing::info!("✅ {} ({:?})", case.label(), result.duration)
                }
                CaseOutcome::Failed {
                    expected, actual, ..
                } => tracing::warn!(
                    "❌ {}: expected status {}, got {}",
                    case.label(),
                    expected,
                    actual
                ),
                CaseOutcome::Errored { message } => {
                    tracing::error!("💥 {}: {}", case.label(), message)
                }
            }

            results.push(result);
        }

        let report = SuiteReport {
            run_id: self.run_id.clone(),
            results,
        };

        tracing::info!(
            "📊 Run {} finished: {} passed, {} failed, {} errored",
            report.run_id,
            report.passed(),
            report.failed(),
            report.errored()
        );

        Ok(report)
    }
}
