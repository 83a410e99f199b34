// Procflow Bench - Benchmark runner
// Copyright (c) 2026 The Procflow Authors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Benchmark runner.
//!
//! Monitors every case of a test suite, scores the result against ground
//! truth and assembles a [`BenchmarkReport`]. Prediction failures are
//! handled according to the configured [`FailurePolicy`].

use crate::config::{BenchmarkConfig, FailurePolicy, PredictorKind};
use crate::error::Result;
use procflow::{
    BenchmarkReport, CaseDetail, CatalogPredictor, PredictionAdapter, ProcflowError,
    ReferencePredictor, ScoringEngine, SequenceMonitor, SkippedCase, TestCase, TransitionVerdict,
    VerdictsExt,
};
use procflow_testdata::TestSuite;
use tracing::{debug, info, warn};

/// Cases between progress log lines.
const PROGRESS_INTERVAL: usize = 20;

/// Runs detection benchmarks.
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
}

impl BenchmarkRunner {
    /// Create a runner.
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    /// Runner configuration.
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Generate the suite described by the configuration.
    pub fn generate_suite(&self) -> Result<TestSuite> {
        self.config.validate()?;
        Ok(TestSuite::generate(
            &self.config.generator_config(),
            self.config.num_normal,
            self.config.num_anomalous,
        ))
    }

    /// Evaluate the configured built-in predictor on a suite.
    pub fn run(&self, suite: &TestSuite) -> Result<BenchmarkReport> {
        match self.config.predictor {
            PredictorKind::Catalog => {
                let predictor = CatalogPredictor::default();
                self.evaluate(suite, predictor.name(), |_| &predictor)
            }
            PredictorKind::Reference => self.evaluate(suite, "reference", |case| {
                ReferencePredictor::new(case.reference.clone())
            }),
        }
    }

    /// Evaluate an arbitrary predictor on a suite.
    pub fn run_with<P: PredictionAdapter>(
        &self,
        suite: &TestSuite,
        predictor: &P,
    ) -> Result<BenchmarkReport> {
        self.evaluate(suite, predictor.name(), |_| predictor)
    }

    fn evaluate<P, F>(
        &self,
        suite: &TestSuite,
        predictor_name: &str,
        mut predictor_for: F,
    ) -> Result<BenchmarkReport>
    where
        P: PredictionAdapter,
        F: FnMut(&TestCase) -> P,
    {
        info!(
            "Evaluating {} predictor on {} cases ({} normal, {} anomalous)",
            predictor_name,
            suite.len(),
            suite.normal_count(),
            suite.anomalous_count()
        );

        let mut engine = ScoringEngine::new();
        let mut details = Vec::with_capacity(suite.len());
        let mut skipped = Vec::new();

        for (index, case) in suite.iter().enumerate() {
            if index > 0 && index % PROGRESS_INTERVAL == 0 {
                info!("Progress: {}/{}", index, suite.len());
            }

            let monitor = SequenceMonitor::new(predictor_for(case));
            match monitor.monitor_sequence(&case.sequence) {
                Ok(verdicts) => {
                    let outcome = engine.score(case, verdicts.detected_anomaly());
                    debug!(
                        "Case {}: {} ({} flagged transitions)",
                        index,
                        outcome.as_str(),
                        verdicts.anomaly_count()
                    );
                    details.push(CaseDetail::new(case, &verdicts, outcome));
                }
                Err(err @ ProcflowError::Prediction(_)) => match self.config.on_prediction_failure {
                    FailurePolicy::FlagAnomaly => {
                        warn!("Case {}: {}; counting as flagged", index, err);
                        let outcome = engine.score(case, true);
                        details.push(CaseDetail::flagged_on_failure(case, outcome));
                    }
                    FailurePolicy::SkipCase => {
                        warn!("Case {}: {}; skipping", index, err);
                        skipped.push(SkippedCase {
                            case_index: index,
                            sequence: case.sequence.clone(),
                            error: err.to_string(),
                        });
                    }
                    FailurePolicy::Abort => return Err(err.into()),
                },
                Err(err) => return Err(err.into()),
            }
        }

        let report = BenchmarkReport::new(predictor_name, &engine, details, skipped)?;
        info!(
            "Precision {:.3}, recall {:.3}, F1 {:.3}, accuracy {:.3}",
            report.metrics.precision,
            report.metrics.recall,
            report.metrics.f1_score,
            report.metrics.accuracy
        );
        Ok(report)
    }
}

// ============================================================================
// Demo
// ============================================================================

/// A scripted sequence walked transition by transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoScenario {
    pub title: &'static str,
    pub events: &'static [&'static str],
}

impl DemoScenario {
    /// Owned event sequence.
    pub fn sequence(&self) -> Vec<String> {
        self.events.iter().map(|e| e.to_string()).collect()
    }
}

/// The built-in demo: a clean trade and one with a foreign payment event.
pub const DEMO_SCENARIOS: [DemoScenario; 2] = [
    DemoScenario {
        title: "Normal Trade Sequence",
        events: &[
            "OrderSubmitted",
            "OrderValidated",
            "OrderRouted",
            "OrderFilled",
            "TradeBooked",
        ],
    },
    DemoScenario {
        title: "Anomalous Sequence (wrong event injected)",
        events: &[
            "OrderSubmitted",
            "OrderValidated",
            "PaymentFailed",
            "OrderFilled",
        ],
    },
];

/// Monitor one demo scenario.
pub fn run_demo_scenario<P: PredictionAdapter>(
    scenario: &DemoScenario,
    predictor: P,
) -> Result<Vec<TransitionVerdict>> {
    let monitor = SequenceMonitor::new(predictor);
    Ok(monitor.monitor_sequence(&scenario.sequence())?)
}

/// Render a scenario's verdicts the way the demo prints them.
pub fn render_demo(scenario: &DemoScenario, verdicts: &[TransitionVerdict]) -> String {
    let mut out = String::new();

    out.push_str(&format!("### {} ###\n", scenario.title));
    out.push_str(&format!("Sequence: {}\n", scenario.events.join(" -> ")));
    out.push_str("\nAgent monitoring each transition:\n");

    for verdict in verdicts {
        let previous = scenario
            .events
            .get(verdict.index.saturating_sub(1))
            .copied()
            .unwrap_or_default();
        let status = if verdict.is_anomaly {
            "ANOMALY DETECTED"
        } else {
            "OK"
        };
        out.push_str(&format!(
            "  After {}: saw '{}' (predicted '{}') [{}]\n",
            previous, verdict.observed, verdict.predicted, status
        ));
        if verdict.is_anomaly {
            out.push_str(&format!("    -> {}\n", verdict.explanation));
            out.push_str(&format!("    -> Action: {}\n", verdict.suggested_action));
        }
    }

    out
}
