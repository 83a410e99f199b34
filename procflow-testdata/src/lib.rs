// Procflow Testdata - Synthetic process sequence generator
// Copyright (c) 2026 The Procflow Authors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Procflow Testdata
//!
//! Synthetic financial process sequences for benchmarking anomaly detection.
//!
//! This crate provides:
//!
//! - **Sequence generation**: Valid flows drawn uniformly from the catalog
//! - **Anomaly injection**: Foreign events, skipped steps, transposed steps
//! - **Test suites**: Shuffled, labelled cases with JSON persistence
//! - **Training export**: Chat-format next-event examples as JSON Lines,
//!   drawn from weighted process lifecycles
//!
//! ## Quick Start
//!
//! ```rust
//! use procflow_testdata::{GeneratorConfig, SuiteManifest, TestSuite};
//!
//! // 50 normal and 50 anomalous cases, reproducible
//! let config = GeneratorConfig::new().with_seed(42);
//! let suite = TestSuite::generate(&config, 50, 50);
//!
//! let manifest = SuiteManifest::from_suite("baseline", &suite);
//! assert_eq!(manifest.total_cases, 100);
//! ```
//!
//! ## Anomaly Injection
//!
//! Strategies can also be applied directly:
//!
//! ```rust
//! use procflow_testdata::anomalies::swap_adjacent;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let mut sequence: Vec<String> = ["RiskLimitBreached", "RiskAlertCreated", "RiskAlertAcknowledged"]
//!     .iter()
//!     .map(|e| e.to_string())
//!     .collect();
//!
//! assert_eq!(swap_adjacent(&mut rng, &mut sequence), Some(2));
//! assert_eq!(sequence[1], "RiskAlertAcknowledged");
//! ```

pub mod anomalies;
pub mod dataset;
pub mod generator;
pub mod lifecycles;
pub mod manifest;
pub mod training;

// Re-exports for convenience
pub use anomalies::{skip_step, swap_adjacent, AnomalyInjector};
pub use dataset::{DatasetError, TestSuite};
pub use generator::{AnomalousSequence, GeneratorConfig, SequenceGenerator};
pub use lifecycles::{all_lifecycles, LifecycleSampler, LIFECYCLES};
pub use manifest::SuiteManifest;
pub use training::{read_training_jsonl, training_examples, write_training_jsonl, TrainingExample};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
