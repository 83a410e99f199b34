//! Transition-by-transition sequence monitoring.
//!
//! The monitor walks a sequence, asks the predictor what should come next
//! after each prefix and flags every transition where the observed event
//! differs from the prediction.

use crate::catalog::ProcessFamily;
use crate::error::{ProcflowError, Result};
use crate::predictor::PredictionAdapter;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Sub-category of an anomalous transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyCategory {
    /// Observed and predicted events belong to different known families
    CrossProcessContamination,
    /// Anything else that did not match the prediction
    UnexpectedTransition,
}

impl AnomalyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyCategory::CrossProcessContamination => "cross_process_contamination",
            AnomalyCategory::UnexpectedTransition => "unexpected_transition",
        }
    }
}

/// The monitor's analysis of one transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionVerdict {
    /// Position of the observed event in the sequence
    pub index: usize,
    /// Event actually seen
    pub observed: String,
    /// Event the predictor expected
    pub predicted: String,
    /// `predicted != observed`
    pub is_anomaly: bool,
    /// Set only for anomalous transitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly_category: Option<AnomalyCategory>,
    /// Human-readable explanation
    pub explanation: String,
    /// Suggested corrective action
    pub suggested_action: String,
}

impl TransitionVerdict {
    /// Verdict for an observed event that matches the prediction
    pub fn expected(index: usize, observed: &str) -> Self {
        Self {
            index,
            observed: observed.to_string(),
            predicted: observed.to_string(),
            is_anomaly: false,
            anomaly_category: None,
            explanation: format!(
                "Event '{}' matches prediction. Process is following expected flow.",
                observed
            ),
            suggested_action: "No action needed. Continue monitoring.".to_string(),
        }
    }

    /// Verdict for an event from a different process family
    pub fn cross_process(
        index: usize,
        observed: &str,
        predicted: &str,
        observed_family: ProcessFamily,
        predicted_family: ProcessFamily,
    ) -> Self {
        Self {
            index,
            observed: observed.to_string(),
            predicted: predicted.to_string(),
            is_anomaly: true,
            anomaly_category: Some(AnomalyCategory::CrossProcessContamination),
            explanation: format!(
                "Expected {} event '{}', but received {} event '{}'. Events from different process types are mixed.",
                predicted_family, predicted, observed_family, observed
            ),
            suggested_action: format!(
                "Investigate why {} appeared in this stream. Check for event routing errors.",
                observed
            ),
        }
    }

    /// Verdict for any other mismatch
    pub fn unexpected(index: usize, observed: &str, predicted: &str, previous: &str) -> Self {
        Self {
            index,
            observed: observed.to_string(),
            predicted: predicted.to_string(),
            is_anomaly: true,
            anomaly_category: Some(AnomalyCategory::UnexpectedTransition),
            explanation: format!(
                "Expected '{}' after '{}', but observed '{}'. This transition is unusual.",
                predicted, previous, observed
            ),
            suggested_action: format!(
                "Review the process. If '{}' is valid, the process may have taken an exception path. Otherwise, investigate the cause.",
                observed
            ),
        }
    }
}

/// Sequence-level view over a list of verdicts
pub trait VerdictsExt {
    /// True if any transition was flagged
    fn detected_anomaly(&self) -> bool;

    /// First flagged transition, if any
    fn first_anomaly(&self) -> Option<&TransitionVerdict>;

    /// Number of flagged transitions
    fn anomaly_count(&self) -> usize;
}

impl VerdictsExt for [TransitionVerdict] {
    fn detected_anomaly(&self) -> bool {
        self.iter().any(|v| v.is_anomaly)
    }

    fn first_anomaly(&self) -> Option<&TransitionVerdict> {
        self.iter().find(|v| v.is_anomaly)
    }

    fn anomaly_count(&self) -> usize {
        self.iter().filter(|v| v.is_anomaly).count()
    }
}

/// Monitors event sequences against a next-event predictor
pub struct SequenceMonitor<P> {
    predictor: P,
}

impl<P: PredictionAdapter> SequenceMonitor<P> {
    pub fn new(predictor: P) -> Self {
        Self { predictor }
    }

    /// Access the underlying predictor
    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Analyze a single transition from `history` to `observed`.
    ///
    /// `history` must not be empty.
    pub fn analyze_transition(
        &self,
        history: &[String],
        observed: &str,
    ) -> Result<TransitionVerdict> {
        let previous = history.last().ok_or_else(|| {
            ProcflowError::InvalidSequence("transition requires a non-empty history".to_string())
        })?;
        let index = history.len();

        let predicted = self.predictor.predict_next(history)?;
        trace!(
            "[{}] after {} events: predicted={} observed={}",
            self.predictor.name(),
            index,
            predicted,
            observed
        );

        if predicted == observed {
            return Ok(TransitionVerdict::expected(index, observed));
        }

        let verdict = match (
            ProcessFamily::classify(observed),
            ProcessFamily::classify(&predicted),
        ) {
            (Some(observed_family), Some(predicted_family))
                if observed_family != predicted_family =>
            {
                TransitionVerdict::cross_process(
                    index,
                    observed,
                    &predicted,
                    observed_family,
                    predicted_family,
                )
            }
            _ => TransitionVerdict::unexpected(index, observed, &predicted, previous),
        };

        debug!(
            "Anomaly at index {}: {} ({})",
            index,
            verdict.explanation,
            verdict
                .anomaly_category
                .map(|c| c.as_str())
                .unwrap_or("none")
        );

        Ok(verdict)
    }

    /// Monitor an entire sequence, one verdict per adjacent pair.
    ///
    /// Fails with [`ProcflowError::InvalidSequence`] on an empty sequence; a
    /// single-event sequence has no transitions and yields no verdicts.
    pub fn monitor_sequence(&self, sequence: &[String]) -> Result<Vec<TransitionVerdict>> {
        if sequence.is_empty() {
            return Err(ProcflowError::InvalidSequence(
                "cannot monitor an empty sequence".to_string(),
            ));
        }

        (1..sequence.len())
            .map(|i| self.analyze_transition(&sequence[..i], &sequence[i]))
            .collect()
    }
}
