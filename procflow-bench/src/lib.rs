// Procflow Bench - Anomaly detection benchmark runner
// Copyright (c) 2026 The Procflow Authors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Procflow Bench
//!
//! Runs a predictor over a generated test suite and reports how well the
//! sequence monitor built on it separates corrupted sequences from clean ones.
//!
//! ## Usage
//!
//! ```bash
//! # 50 normal and 50 anomalous cases with the catalog predictor
//! procflow-bench run --seed 42
//!
//! # Upper bound: replay each case's uncorrupted flow
//! procflow-bench run --predictor reference --output report.json
//!
//! # Walk the two demo sequences transition by transition
//! procflow-bench demo
//! ```
//!
//! ## Library
//!
//! ```rust
//! use procflow_bench::{BenchmarkConfig, BenchmarkRunner, PredictorKind};
//!
//! let config = BenchmarkConfig::new()
//!     .with_counts(10, 10)
//!     .with_seed(7)
//!     .with_predictor(PredictorKind::Reference);
//! let runner = BenchmarkRunner::new(config);
//!
//! let suite = runner.generate_suite().unwrap();
//! let report = runner.run(&suite).unwrap();
//! assert_eq!(report.metrics.accuracy, 1.0);
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod runner;

pub use config::{BenchmarkConfig, FailurePolicy, PredictorKind};
pub use error::{BenchError, Result};
pub use metrics::BenchMetrics;
pub use runner::{render_demo, run_demo_scenario, BenchmarkRunner, DemoScenario, DEMO_SCENARIOS};
