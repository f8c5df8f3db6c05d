//! Scenario runner: selection, bounded concurrency and result reporting

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::airport::AirportFacade;
use crate::config::SuiteConfig;
use crate::error::{E2eResult, FailureKind};
use crate::fixture::failure_screenshot_path;
use crate::scenarios::{Scenario, ScenarioContext};

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub tags: Vec<String>,
    pub success: bool,
    pub duration_ms: u64,
    pub failure_kind: Option<FailureKind>,
    pub error: Option<String>,
    pub screenshot_path: Option<String>,
}

/// Result of running a selection of scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestSuiteResult {
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Which scenarios to run
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Substring of the scenario name
    pub name: Option<String>,
    /// Required tag
    pub tag: Option<String>,
}

impl Selection {
    pub fn matches(&self, scenario: &Scenario) -> bool {
        let name_ok = self
            .name
            .as_deref()
            .map(|n| scenario.name.contains(n))
            .unwrap_or(true);
        let tag_ok = self
            .tag
            .as_deref()
            .map(|t| scenario.has_tag(t))
            .unwrap_or(true);
        name_ok && tag_ok
    }

    pub fn apply(&self, scenarios: &[Scenario]) -> Vec<Scenario> {
        scenarios.iter().filter(|s| self.matches(s)).copied().collect()
    }
}

/// Main scenario runner
pub struct TestRunner {
    config: Arc<SuiteConfig>,
    airport: AirportFacade,
    workers: usize,
}

impl TestRunner {
    pub fn new(config: SuiteConfig, workers: usize) -> E2eResult<Self> {
        let airport = AirportFacade::new(config.airport.clone())?;
        Ok(Self {
            config: Arc::new(config),
            airport,
            workers: workers.max(1),
        })
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    fn context(&self) -> ScenarioContext {
        ScenarioContext {
            config: Arc::clone(&self.config),
            airport: self.airport.clone(),
        }
    }

    /// Run the scenarios of `all` that match `selection`
    pub async fn run(&self, all: &[Scenario], selection: &Selection) -> TestSuiteResult {
        let selected = selection.apply(all);
        let skipped = all.len() - selected.len();
        let mut result = self.run_scenarios(&selected).await;
        result.skipped = skipped;
        result
    }

    /// Run scenarios concurrently, at most `workers` at a time
    pub async fn run_scenarios(&self, scenarios: &[Scenario]) -> TestSuiteResult {
        let started_at = Utc::now();
        let start = Instant::now();

        info!("Running {} scenario(s) with {} worker(s)...", scenarios.len(), self.workers);

        let mut indexed: Vec<(usize, TestResult)> = stream::iter(scenarios.iter().copied().enumerate())
            .map(|(index, scenario)| async move { (index, self.run_scenario(scenario).await) })
            .buffer_unordered(self.workers)
            .collect()
            .await;
        indexed.sort_by_key(|(index, _)| *index);

        let results: Vec<TestResult> = indexed.into_iter().map(|(_, r)| r).collect();
        let passed = results.iter().filter(|r| r.success).count();
        let failed = results.len() - passed;
        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!("Test Results: {} passed, {} failed ({} ms)", passed, failed, duration_ms);

        TestSuiteResult {
            started_at,
            total: scenarios.len(),
            passed,
            failed,
            skipped: 0,
            duration_ms,
            results,
        }
    }

    /// Run a single scenario, converting its error into a failed result
    pub async fn run_scenario(&self, scenario: Scenario) -> TestResult {
        debug!("Running scenario: {}", scenario.name);

        // Only a screenshot taken during this run belongs to the result
        let screenshot = failure_screenshot_path(&self.config, scenario.name);
        match std::fs::remove_file(&screenshot) {
            Ok(()) => debug!("Removed stale screenshot {}", screenshot.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Could not remove stale screenshot {}: {}", screenshot.display(), e),
        }

        let start = Instant::now();

        let outcome = (scenario.run)(self.context()).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(()) => {
                info!("✓ {} ({} ms)", scenario.name, duration_ms);
                TestResult {
                    name: scenario.name.to_string(),
                    tags: scenario.tags.iter().map(|t| t.to_string()).collect(),
                    success: true,
                    duration_ms,
                    failure_kind: None,
                    error: None,
                    screenshot_path: None,
                }
            }
            Err(e) => {
                error!("✗ {} [{:?}] - {}", scenario.name, e.kind(), e);
                TestResult {
                    name: scenario.name.to_string(),
                    tags: scenario.tags.iter().map(|t| t.to_string()).collect(),
                    success: false,
                    duration_ms,
                    failure_kind: Some(e.kind()),
                    error: Some(e.to_string()),
                    screenshot_path: screenshot
                        .exists()
                        .then(|| screenshot.to_string_lossy().to_string()),
                }
            }
        }
    }

    /// Write results to `test-results.json` in the output directory
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}
