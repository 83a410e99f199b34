//! Benchmark report: metrics, per-case details and a text summary

use crate::case::{AnomalyKind, EventSequence, TestCase};
use crate::catalog::ProcessFamily;
use crate::error::Result;
use crate::monitor::{AnomalyCategory, TransitionVerdict, VerdictsExt};
use crate::scoring::{ConfusionMatrix, DetectionMetrics, KindStats, Outcome, ScoringEngine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Compact record of one monitored transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub index: usize,
    pub observed: String,
    pub predicted: String,
    pub is_anomaly: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly_category: Option<AnomalyCategory>,
}

impl From<&TransitionVerdict> for DecisionRecord {
    fn from(verdict: &TransitionVerdict) -> Self {
        Self {
            index: verdict.index,
            observed: verdict.observed.clone(),
            predicted: verdict.predicted.clone(),
            is_anomaly: verdict.is_anomaly,
            anomaly_category: verdict.anomaly_category,
        }
    }
}

/// Outcome of one scored test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDetail {
    pub sequence: EventSequence,
    pub family: ProcessFamily,
    pub variant: String,
    pub has_anomaly: bool,
    pub anomaly_kind: AnomalyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly_index: Option<usize>,
    pub agent_detected: bool,
    pub result: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_flagged_index: Option<usize>,
    pub decisions: Vec<DecisionRecord>,
}

impl CaseDetail {
    /// Build a detail from a case and the monitor's verdicts
    pub fn new(case: &TestCase, verdicts: &[TransitionVerdict], result: Outcome) -> Self {
        Self {
            sequence: case.sequence.clone(),
            family: case.family,
            variant: case.variant.clone(),
            has_anomaly: case.has_anomaly,
            anomaly_kind: case.anomaly_kind,
            anomaly_index: case.anomaly_index,
            agent_detected: verdicts.detected_anomaly(),
            result,
            first_flagged_index: verdicts.first_anomaly().map(|v| v.index),
            decisions: verdicts.iter().map(DecisionRecord::from).collect(),
        }
    }

    /// First decision that raised an anomaly
    pub fn first_flagged(&self) -> Option<&DecisionRecord> {
        self.decisions.iter().find(|d| d.is_anomaly)
    }

    /// Detail for a case whose monitoring was cut short and treated as flagged
    pub fn flagged_on_failure(case: &TestCase, result: Outcome) -> Self {
        let mut detail = Self::new(case, &[], result);
        detail.agent_detected = true;
        detail
    }
}

/// A test case excluded from scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCase {
    /// Position of the case in the suite
    pub case_index: usize,
    pub sequence: EventSequence,
    /// Why the case could not be monitored
    pub error: String,
}

/// Test case counts of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseCounts {
    pub normal_sequences: usize,
    pub anomalous_sequences: usize,
    pub skipped: usize,
}

/// Complete result of a benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Name of the predictor under evaluation
    pub predictor: String,
    pub metrics: DetectionMetrics,
    pub confusion_matrix: ConfusionMatrix,
    pub test_cases: TestCaseCounts,
    pub by_kind: BTreeMap<AnomalyKind, KindStats>,
    pub details: Vec<CaseDetail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedCase>,
}

impl BenchmarkReport {
    /// Assemble a report from a finished scoring run.
    ///
    /// Fails with [`ProcflowError::EmptyEvaluation`](crate::ProcflowError)
    /// when nothing was scored.
    pub fn new(
        predictor: &str,
        engine: &ScoringEngine,
        details: Vec<CaseDetail>,
        skipped: Vec<SkippedCase>,
    ) -> Result<Self> {
        let metrics = engine.metrics()?;
        let normal = details.iter().filter(|d| !d.has_anomaly).count();

        Ok(Self {
            predictor: predictor.to_string(),
            metrics,
            confusion_matrix: *engine.matrix(),
            test_cases: TestCaseCounts {
                normal_sequences: normal,
                anomalous_sequences: details.len() - normal,
                skipped: skipped.len(),
            },
            by_kind: engine.by_kind().clone(),
            details,
            skipped,
        })
    }

    /// Details with a given outcome
    pub fn cases_with(&self, outcome: Outcome) -> impl Iterator<Item = &CaseDetail> {
        self.details.iter().filter(move |d| d.result == outcome)
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable summary with up to `samples` example true positives
    /// and false negatives
    pub fn summary(&self, samples: usize) -> String {
        let m = &self.confusion_matrix;
        let mut report = String::new();

        report.push_str("=== Anomaly Detection Benchmark ===\n\n");
        report.push_str(&format!("Predictor: {}\n", self.predictor));
        report.push_str(&format!(
            "Test cases: {} normal, {} anomalous",
            self.test_cases.normal_sequences, self.test_cases.anomalous_sequences
        ));
        if self.test_cases.skipped > 0 {
            report.push_str(&format!(", {} skipped", self.test_cases.skipped));
        }
        report.push_str("\n\n");

        report.push_str("Confusion matrix:\n");
        report.push_str("                    Predicted\n");
        report.push_str("                 Anomaly   Normal\n");
        report.push_str(&format!(
            "  Actual Anomaly  {:>7}  {:>7}\n",
            m.true_positives, m.false_negatives
        ));
        report.push_str(&format!(
            "  Actual Normal   {:>7}  {:>7}\n\n",
            m.false_positives, m.true_negatives
        ));

        report.push_str(&format!("Precision: {:.1}%\n", self.metrics.precision * 100.0));
        report.push_str(&format!("Recall:    {:.1}%\n", self.metrics.recall * 100.0));
        report.push_str(&format!("F1 Score:  {:.1}%\n", self.metrics.f1_score * 100.0));
        report.push_str(&format!("Accuracy:  {:.1}%\n", self.metrics.accuracy * 100.0));

        if !self.by_kind.is_empty() {
            report.push_str("\nDetection by anomaly kind:\n");
            for (kind, stats) in &self.by_kind {
                report.push_str(&format!(
                    "  {}: {}/{} ({:.1}%)\n",
                    kind,
                    stats.detected,
                    stats.total,
                    stats.detection_rate() * 100.0
                ));
            }
        }

        self.push_samples(&mut report, "Detected anomalies", Outcome::TruePositive, samples);
        self.push_samples(&mut report, "Missed anomalies", Outcome::FalseNegative, samples);

        report
    }

    fn push_samples(&self, report: &mut String, title: &str, outcome: Outcome, samples: usize) {
        let cases: Vec<_> = self.cases_with(outcome).take(samples).collect();
        if cases.is_empty() {
            return;
        }

        report.push_str(&format!("\n{} ({}):\n", title, outcome.as_str()));
        for case in cases {
            report.push_str(&format!("  [{}] {}\n", case.anomaly_kind, case.sequence.join(" -> ")));
            if let Some(index) = case.anomaly_index {
                report.push_str(&format!("      injected at index {}", index));
                match case.first_flagged_index {
                    Some(flagged) => report.push_str(&format!(", first flagged at {}\n", flagged)),
                    None => report.push('\n'),
                }
            }
            if let Some(flagged) = case.first_flagged() {
                report.push_str(&format!(
                    "      Agent flagged: expected '{}', saw '{}'\n",
                    flagged.predicted, flagged.observed
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::SequenceMonitor;
    use crate::predictor::ReferencePredictor;
    use crate::ProcflowError;

    fn seq(events: &[&str]) -> EventSequence {
        events.iter().map(|e| e.to_string()).collect()
    }

    fn scored(engine: &mut ScoringEngine, case: &TestCase) -> CaseDetail {
        let monitor = SequenceMonitor::new(ReferencePredictor::new(case.reference.clone()));
        let verdicts = monitor.monitor_sequence(&case.sequence).unwrap();
        let outcome = engine.score(case, verdicts.detected_anomaly());
        CaseDetail::new(case, &verdicts, outcome)
    }

    fn sample_report() -> BenchmarkReport {
        let mut engine = ScoringEngine::new();
        let normal = TestCase::normal(
            seq(&["OrderSubmitted", "OrderRejected"]),
            ProcessFamily::Trade,
            "rejected",
        );
        let anomalous = TestCase::anomalous(
            seq(&["PaymentInitiated", "RiskAlertCreated", "PaymentPendingApproval"]),
            seq(&["PaymentInitiated", "PaymentValidated", "PaymentPendingApproval"]),
            ProcessFamily::Payment,
            "normal",
            AnomalyKind::WrongEvent,
            1,
        );
        let details = vec![scored(&mut engine, &normal), scored(&mut engine, &anomalous)];
        BenchmarkReport::new("reference", &engine, details, Vec::new()).unwrap()
    }

    #[test]
    fn test_case_detail_records_decisions() {
        let report = sample_report();
        let detail = &report.details[1];
        assert!(detail.agent_detected);
        assert_eq!(detail.result, Outcome::TruePositive);
        assert_eq!(detail.first_flagged_index, Some(1));
        assert_eq!(detail.decisions.len(), 2);
        assert_eq!(
            detail.decisions[0].anomaly_category,
            Some(AnomalyCategory::CrossProcessContamination)
        );
    }

    #[test]
    fn test_report_counts() {
        let report = sample_report();
        assert_eq!(report.test_cases.normal_sequences, 1);
        assert_eq!(report.test_cases.anomalous_sequences, 1);
        assert_eq!(report.test_cases.skipped, 0);
        assert_eq!(report.metrics.accuracy, 1.0);
        assert_eq!(report.cases_with(Outcome::TrueNegative).count(), 1);
    }

    #[test]
    fn test_empty_report_is_error() {
        let engine = ScoringEngine::new();
        let err = BenchmarkReport::new("reference", &engine, Vec::new(), Vec::new()).unwrap_err();
        assert_eq!(err, ProcflowError::EmptyEvaluation);
    }

    #[test]
    fn test_report_json() {
        let report = sample_report();
        let json = report.to_json().unwrap();
        assert!(json.contains("\"true_positives\": 1"));
        assert!(json.contains("\"wrong_event\""));
        assert!(json.contains("\"result\": \"TP\""));
        assert!(!json.contains("\"skipped\": ["));

        let restored: BenchmarkReport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, report);
    }

    #[test]
    fn test_summary() {
        let summary = sample_report().summary(2);
        assert!(summary.contains("Predictor: reference"));
        assert!(summary.contains("Precision: 100.0%"));
        assert!(summary.contains("wrong_event: 1/1"));
        assert!(summary.contains("Detected anomalies (TP)"));
        assert!(summary.contains("PaymentInitiated -> RiskAlertCreated"));
        assert!(summary
            .contains("Agent flagged: expected 'PaymentValidated', saw 'RiskAlertCreated'"));
        assert!(!summary.contains("Missed anomalies"));
    }

    #[test]
    fn test_first_flagged_decision() {
        let report = sample_report();
        let flagged = report.details[1].first_flagged().unwrap();
        assert_eq!(flagged.index, 1);
        assert_eq!(flagged.predicted, "PaymentValidated");
        assert!(report.details[0].first_flagged().is_none());

        // Failure-flagged cases carry no decisions to quote
        let case = TestCase::normal(
            seq(&["OrderSubmitted", "OrderRejected"]),
            ProcessFamily::Trade,
            "rejected",
        );
        let detail = CaseDetail::flagged_on_failure(&case, Outcome::FalsePositive);
        assert!(detail.first_flagged().is_none());
    }
}
