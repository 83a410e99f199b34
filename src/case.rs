//! Test cases and the anomaly taxonomy
//!
//! A [`TestCase`] is ground truth for one benchmark iteration: the event
//! sequence handed to the monitor plus what (if anything) was corrupted.

use crate::catalog::ProcessFamily;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered list of event-type names
pub type EventSequence = Vec<String>;

/// Kind of corruption applied to a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Unmodified flow
    None,
    /// An event substituted from a different family
    WrongEvent,
    /// A required middle step removed
    SkippedStep,
    /// Two adjacent events transposed
    OutOfOrder,
    /// Reserved in the taxonomy; never generated
    ImpossibleTransition,
}

impl AnomalyKind {
    /// Kinds the injector actively generates
    pub const GENERATED: [AnomalyKind; 3] = [
        AnomalyKind::WrongEvent,
        AnomalyKind::SkippedStep,
        AnomalyKind::OutOfOrder,
    ];

    /// Get kind name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::None => "none",
            AnomalyKind::WrongEvent => "wrong_event",
            AnomalyKind::SkippedStep => "skipped_step",
            AnomalyKind::OutOfOrder => "out_of_order",
            AnomalyKind::ImpossibleTransition => "impossible_transition",
        }
    }

    /// Minimum sequence length for this strategy to produce a real mutation
    pub fn min_sequence_len(&self) -> usize {
        match self {
            AnomalyKind::None | AnomalyKind::ImpossibleTransition => 0,
            AnomalyKind::WrongEvent => 2,
            AnomalyKind::SkippedStep => 4,
            AnomalyKind::OutOfOrder => 3,
        }
    }

    /// Check if this kind can be applied to a sequence of `len` events
    pub fn applies_to(&self, len: usize) -> bool {
        AnomalyKind::GENERATED.contains(self) && len >= self.min_sequence_len()
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One labelled benchmark input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Sequence given to the monitor
    pub sequence: EventSequence,
    /// Family of the originating flow (ground truth, even when foreign
    /// events were injected)
    pub family: ProcessFamily,
    /// Name of the originating flow variant
    pub variant: String,
    /// Whether the sequence was corrupted
    pub has_anomaly: bool,
    /// Corruption applied
    pub anomaly_kind: AnomalyKind,
    /// Index where the anomaly becomes observable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly_index: Option<usize>,
    /// Uncorrupted flow the case was derived from
    pub reference: EventSequence,
}

impl TestCase {
    /// Create a normal (unmodified) case
    pub fn normal(sequence: EventSequence, family: ProcessFamily, variant: &str) -> Self {
        Self {
            reference: sequence.clone(),
            sequence,
            family,
            variant: variant.to_string(),
            has_anomaly: false,
            anomaly_kind: AnomalyKind::None,
            anomaly_index: None,
        }
    }

    /// Create an anomalous case
    pub fn anomalous(
        sequence: EventSequence,
        reference: EventSequence,
        family: ProcessFamily,
        variant: &str,
        kind: AnomalyKind,
        anomaly_index: usize,
    ) -> Self {
        Self {
            sequence,
            family,
            variant: variant.to_string(),
            has_anomaly: true,
            anomaly_kind: kind,
            anomaly_index: Some(anomaly_index),
            reference,
        }
    }

    /// Number of events in the sequence
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Number of transitions the monitor will evaluate
    pub fn transition_count(&self) -> usize {
        self.sequence.len().saturating_sub(1)
    }
}
