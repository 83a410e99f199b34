//! Detection scoring against ground truth.
//!
//! Each test case is classified as TP/FP/TN/FN from its ground-truth label
//! and whether the monitor flagged any transition. Counts accumulate in a
//! [`ConfusionMatrix`], from which precision, recall, F1 and accuracy are
//! derived.

use crate::case::{AnomalyKind, TestCase};
use crate::error::{ProcflowError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classification of one test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "TP")]
    TruePositive,
    #[serde(rename = "FP")]
    FalsePositive,
    #[serde(rename = "TN")]
    TrueNegative,
    #[serde(rename = "FN")]
    FalseNegative,
}

impl Outcome {
    /// Classify from ground truth and detection
    pub fn classify(has_anomaly: bool, detected: bool) -> Self {
        match (has_anomaly, detected) {
            (true, true) => Outcome::TruePositive,
            (true, false) => Outcome::FalseNegative,
            (false, true) => Outcome::FalsePositive,
            (false, false) => Outcome::TrueNegative,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::TruePositive => "TP",
            Outcome::FalsePositive => "FP",
            Outcome::TrueNegative => "TN",
            Outcome::FalseNegative => "FN",
        }
    }

    /// True for TP and TN
    pub fn is_correct(&self) -> bool {
        matches!(self, Outcome::TruePositive | Outcome::TrueNegative)
    }
}

/// TP/FP/TN/FN counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: u64,
    pub false_positives: u64,
    pub true_negatives: u64,
    pub false_negatives: u64,
}

impl ConfusionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw counts
    pub fn from_counts(tp: u64, fp: u64, tn: u64, fn_: u64) -> Self {
        Self {
            true_positives: tp,
            false_positives: fp,
            true_negatives: tn,
            false_negatives: fn_,
        }
    }

    /// Record one outcome
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::TruePositive => self.true_positives += 1,
            Outcome::FalsePositive => self.false_positives += 1,
            Outcome::TrueNegative => self.true_negatives += 1,
            Outcome::FalseNegative => self.false_negatives += 1,
        }
    }

    /// Fold in counts accumulated elsewhere (e.g. by another worker)
    pub fn merge(&mut self, other: &ConfusionMatrix) {
        self.true_positives += other.true_positives;
        self.false_positives += other.false_positives;
        self.true_negatives += other.true_negatives;
        self.false_negatives += other.false_negatives;
    }

    /// Total scored cases
    pub fn total(&self) -> u64 {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Check if nothing was scored
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// TP / (TP + FP), 0 when nothing was flagged
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// TP / (TP + FN), 0 when there were no anomalies
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Harmonic mean of precision and recall, 0 when both are 0
    pub fn f1_score(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        if precision + recall == 0.0 {
            return 0.0;
        }
        2.0 * precision * recall / (precision + recall)
    }

    /// (TP + TN) / total. An empty matrix has no defined accuracy.
    pub fn accuracy(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(ProcflowError::EmptyEvaluation);
        }
        Ok(ratio(self.true_positives + self.true_negatives, self.total()))
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

/// Derived detection metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub accuracy: f64,
}

impl DetectionMetrics {
    /// Compute metrics from a non-empty confusion matrix
    pub fn from_matrix(matrix: &ConfusionMatrix) -> Result<Self> {
        Ok(Self {
            precision: matrix.precision(),
            recall: matrix.recall(),
            f1_score: matrix.f1_score(),
            accuracy: matrix.accuracy()?,
        })
    }
}

/// Detection statistics for one anomaly kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindStats {
    /// Cases injected with this kind
    pub total: u64,
    /// Cases where the monitor flagged at least one transition
    pub detected: u64,
}

impl KindStats {
    /// Fraction of cases detected (0 when none were injected)
    pub fn detection_rate(&self) -> f64 {
        ratio(self.detected, self.total)
    }
}

/// Accumulates outcomes over a benchmark run
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    matrix: ConfusionMatrix,
    by_kind: BTreeMap<AnomalyKind, KindStats>,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score a test case given whether its sequence was flagged
    pub fn score(&mut self, case: &TestCase, detected: bool) -> Outcome {
        let outcome = Outcome::classify(case.has_anomaly, detected);
        self.matrix.record(outcome);

        if case.has_anomaly {
            let stats = self.by_kind.entry(case.anomaly_kind).or_default();
            stats.total += 1;
            if detected {
                stats.detected += 1;
            }
        }

        outcome
    }

    /// Fold in another engine's counts
    pub fn merge(&mut self, other: &ScoringEngine) {
        self.matrix.merge(&other.matrix);
        for (kind, stats) in &other.by_kind {
            let entry = self.by_kind.entry(*kind).or_default();
            entry.total += stats.total;
            entry.detected += stats.detected;
        }
    }

    /// Current confusion matrix
    pub fn matrix(&self) -> &ConfusionMatrix {
        &self.matrix
    }

    /// Per-kind detection statistics
    pub fn by_kind(&self) -> &BTreeMap<AnomalyKind, KindStats> {
        &self.by_kind
    }

    /// Compute final metrics
    pub fn metrics(&self) -> Result<DetectionMetrics> {
        DetectionMetrics::from_matrix(&self.matrix)
    }

    /// Reset all counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
