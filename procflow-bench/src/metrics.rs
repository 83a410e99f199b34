// Procflow Bench - Prometheus metrics definitions
// Copyright (c) 2026 The Procflow Authors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Prometheus metrics for benchmark runs.
//!
//! Each run fills its own registry, which is encoded in the Prometheus text
//! format (suitable for a node_exporter textfile collector).

use procflow::{BenchmarkReport, Outcome};
use prometheus::{Encoder, Gauge, GaugeVec, IntGaugeVec, Opts, Registry, TextEncoder};

/// Detection metrics for one benchmark run.
pub struct BenchMetrics {
    registry: Registry,

    /// Precision, recall, F1 and accuracy (labeled by metric).
    detection_score: GaugeVec,

    /// Confusion matrix cells (labeled by outcome).
    cases: IntGaugeVec,

    /// Detection rate per injected anomaly kind.
    kind_detection_rate: GaugeVec,

    /// Cases left out because the predictor failed.
    skipped_cases: Gauge,
}

impl BenchMetrics {
    /// Create and register all metrics, labeling them with the predictor name.
    pub fn new(predictor: &str) -> prometheus::Result<Self> {
        let registry = Registry::new();
        let with_predictor = |opts: Opts| opts.const_label("predictor", predictor);

        let detection_score = GaugeVec::new(
            with_predictor(Opts::new(
                "procflow_detection_score",
                "Detection score of the evaluated predictor (0-1)",
            )),
            &["metric"],
        )?;
        let cases = IntGaugeVec::new(
            with_predictor(Opts::new(
                "procflow_cases",
                "Scored test cases by confusion matrix outcome",
            )),
            &["outcome"],
        )?;
        let kind_detection_rate = GaugeVec::new(
            with_predictor(Opts::new(
                "procflow_kind_detection_rate",
                "Fraction of injected anomalies detected, per anomaly kind (0-1)",
            )),
            &["kind"],
        )?;
        let skipped_cases = Gauge::with_opts(with_predictor(Opts::new(
            "procflow_skipped_cases",
            "Test cases skipped after a prediction failure",
        )))?;

        registry.register(Box::new(detection_score.clone()))?;
        registry.register(Box::new(cases.clone()))?;
        registry.register(Box::new(kind_detection_rate.clone()))?;
        registry.register(Box::new(skipped_cases.clone()))?;

        Ok(Self {
            registry,
            detection_score,
            cases,
            kind_detection_rate,
            skipped_cases,
        })
    }

    /// Update all metrics from a finished report.
    pub fn update(&self, report: &BenchmarkReport) {
        let m = &report.metrics;
        for (name, value) in [
            ("precision", m.precision),
            ("recall", m.recall),
            ("f1_score", m.f1_score),
            ("accuracy", m.accuracy),
        ] {
            self.detection_score.with_label_values(&[name]).set(value);
        }

        let matrix = &report.confusion_matrix;
        for (outcome, count) in [
            (Outcome::TruePositive, matrix.true_positives),
            (Outcome::FalsePositive, matrix.false_positives),
            (Outcome::TrueNegative, matrix.true_negatives),
            (Outcome::FalseNegative, matrix.false_negatives),
        ] {
            self.cases
                .with_label_values(&[outcome.as_str()])
                .set(count as i64);
        }

        for (kind, stats) in &report.by_kind {
            self.kind_detection_rate
                .with_label_values(&[kind.as_str()])
                .set(stats.detection_rate());
        }

        self.skipped_cases.set(report.test_cases.skipped as f64);
    }

    /// Encode all metrics to Prometheus text format.
    pub fn encode(&self) -> prometheus::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procflow::{AnomalyKind, CaseDetail, ProcessFamily, ScoringEngine, TestCase};

    fn report() -> BenchmarkReport {
        let mut engine = ScoringEngine::new();
        let seq = vec!["OrderSubmitted".to_string(), "PaymentFailed".to_string()];
        let case = TestCase::anomalous(
            seq.clone(),
            vec!["OrderSubmitted".to_string(), "OrderRejected".to_string()],
            ProcessFamily::Trade,
            "rejected",
            AnomalyKind::WrongEvent,
            1,
        );
        let outcome = engine.score(&case, true);
        let details = vec![CaseDetail::flagged_on_failure(&case, outcome)];
        BenchmarkReport::new("catalog", &engine, details, Vec::new()).unwrap()
    }

    #[test]
    fn test_encode_metrics() {
        let metrics = BenchMetrics::new("catalog").unwrap();
        metrics.update(&report());

        let output = metrics.encode().unwrap();
        assert!(output.contains("procflow_detection_score"));
        assert!(output.contains(r#"metric="precision""#));
        assert!(output.contains(r#"outcome="TP""#));
        assert!(output.contains(r#"kind="wrong_event""#));
        assert!(output.contains(r#"predictor="catalog""#));
        assert!(output.contains("procflow_skipped_cases"));
    }

    #[test]
    fn test_registries_are_independent() {
        // Separate runs never collide on registration
        let a = BenchMetrics::new("catalog").unwrap();
        let b = BenchMetrics::new("reference").unwrap();
        a.update(&report());
        assert!(!b.encode().unwrap().contains(r#"outcome="TP""#));
    }
}
