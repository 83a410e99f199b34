//! # procflow - Financial Process Anomaly Detection
//!
//! Flow model, anomaly taxonomy and detection scoring for agents that watch
//! streams of financial process events.
//!
//! ## Key Features
//!
//! - **Flow Catalog**: Valid event lifecycles for trade, payment, risk, compliance and account processes
//! - **Pluggable Prediction**: Any next-event predictor behind the [`PredictionAdapter`] trait
//! - **Transition Monitoring**: Per-transition verdicts with contamination detection
//! - **Scoring**: Confusion matrix, precision, recall, F1 and accuracy
//!
//! ## Quick Start
//!
//! ```rust
//! use procflow::{ReferencePredictor, SequenceMonitor, VerdictsExt};
//!
//! let reference = ReferencePredictor::from_events(&[
//!     "OrderSubmitted",
//!     "OrderValidated",
//!     "OrderRouted",
//! ]);
//! let monitor = SequenceMonitor::new(reference);
//!
//! let observed: Vec<String> = ["OrderSubmitted", "PaymentFailed", "OrderRouted"]
//!     .iter()
//!     .map(|e| e.to_string())
//!     .collect();
//! let verdicts = monitor.monitor_sequence(&observed).unwrap();
//!
//! assert!(verdicts.detected_anomaly());
//! assert_eq!(verdicts.first_anomaly().unwrap().index, 1);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Process families and valid flow variants
//! - [`case`]: Test cases and the anomaly taxonomy
//! - [`predictor`]: Next-event prediction adapters
//! - [`prompt`]: Chat prompts for model-backed predictors
//! - [`monitor`]: Transition-by-transition sequence monitoring
//! - [`scoring`]: Confusion matrix and detection metrics
//! - [`report`]: Benchmark reports

// Modules
pub mod case;
pub mod catalog;
pub mod error;
pub mod monitor;
pub mod predictor;
pub mod prompt;
pub mod report;
pub mod scoring;

// Re-exports for convenient access
pub use case::{AnomalyKind, EventSequence, TestCase};
pub use catalog::{FamilyFlows, FlowCatalog, FlowVariant, ProcessFamily, UnknownFamily};
pub use error::{PredictionError, ProcflowError, Result};
pub use monitor::{AnomalyCategory, SequenceMonitor, TransitionVerdict, VerdictsExt};
pub use predictor::{
    normalize_prediction, try_normalize_prediction, CatalogPredictor, FnPredictor,
    PredictionAdapter, ReferencePredictor,
};
pub use prompt::{ChatMessage, Role, SYSTEM_PROMPT};
pub use report::{BenchmarkReport, CaseDetail, DecisionRecord, SkippedCase, TestCaseCounts};
pub use scoring::{ConfusionMatrix, DetectionMetrics, KindStats, Outcome, ScoringEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
