// Procflow Bench - Configuration
// Copyright (c) 2026 The Procflow Authors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Benchmark configuration.
//!
//! Loaded from a JSON file or assembled from CLI flags. Missing fields take
//! their defaults (50 normal and 50 anomalous cases, catalog predictor,
//! skip cases whose prediction fails).

use crate::error::{BenchError, Result};
use clap::ValueEnum;
use procflow_testdata::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Built-in predictor to evaluate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PredictorKind {
    /// Predict from the flow catalog
    #[default]
    Catalog,
    /// Replay each case's uncorrupted flow (upper bound)
    Reference,
}

/// What to do when the predictor fails on a case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Count the case as flagged
    FlagAnomaly,
    /// Leave the case out of scoring and report it as skipped
    #[default]
    SkipCase,
    /// Stop the run with an error
    Abort,
}

/// Benchmark configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Number of unmodified sequences.
    pub num_normal: usize,
    /// Number of corrupted sequences.
    pub num_anomalous: usize,
    /// Random seed for suite generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Predictor under evaluation.
    pub predictor: PredictorKind,
    /// Prediction failure handling.
    pub on_prediction_failure: FailurePolicy,
    /// Example TPs and FNs shown in the summary.
    pub sample_cases: usize,
    /// JSON report destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Prometheus text-format metrics destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_output: Option<PathBuf>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            num_normal: 50,
            num_anomalous: 50,
            seed: None,
            predictor: PredictorKind::default(),
            on_prediction_failure: FailurePolicy::default(),
            sample_cases: 2,
            output: None,
            metrics_output: None,
        }
    }
}

impl BenchmarkConfig {
    /// Create a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set suite size.
    pub fn with_counts(mut self, num_normal: usize, num_anomalous: usize) -> Self {
        self.num_normal = num_normal;
        self.num_anomalous = num_anomalous;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set predictor.
    pub fn with_predictor(mut self, predictor: PredictorKind) -> Self {
        self.predictor = predictor;
        self
    }

    /// Set failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.on_prediction_failure = policy;
        self
    }

    /// Set JSON report destination.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Generator settings for this run.
    pub fn generator_config(&self) -> GeneratorConfig {
        match self.seed {
            Some(seed) => GeneratorConfig::new().with_seed(seed),
            None => GeneratorConfig::new(),
        }
    }

    /// Total cases generated.
    pub fn total_cases(&self) -> usize {
        self.num_normal + self.num_anomalous
    }

    /// Reject configurations that cannot produce a result.
    pub fn validate(&self) -> Result<()> {
        if self.total_cases() == 0 {
            return Err(BenchError::Config(
                "num_normal and num_anomalous are both 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: BenchmarkConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.num_normal, 50);
        assert_eq!(config.num_anomalous, 50);
        assert_eq!(config.predictor, PredictorKind::Catalog);
        assert_eq!(config.on_prediction_failure, FailurePolicy::SkipCase);
        assert_eq!(config.sample_cases, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = BenchmarkConfig::new()
            .with_counts(10, 5)
            .with_seed(7)
            .with_predictor(PredictorKind::Reference)
            .with_failure_policy(FailurePolicy::Abort)
            .with_output("report.json");

        assert_eq!(config.total_cases(), 15);
        assert_eq!(config.generator_config().seed, Some(7));
        assert_eq!(config.output, Some(PathBuf::from("report.json")));
    }

    #[test]
    fn test_validate_rejects_empty_run() {
        let config = BenchmarkConfig::new().with_counts(0, 0);
        assert!(matches!(config.validate(), Err(BenchError::Config(_))));
    }

    #[test]
    fn test_from_json_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"num_normal": 20, "seed": 42, "on_prediction_failure": "flag_anomaly"}}"#
        )
        .unwrap();

        let config = BenchmarkConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.num_normal, 20);
        assert_eq!(config.num_anomalous, 50);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.on_prediction_failure, FailurePolicy::FlagAnomaly);
    }

    #[test]
    fn test_from_json_file_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"num_normal": 0, "num_anomalous": 0}}"#).unwrap();
        assert!(matches!(
            BenchmarkConfig::from_json_file(file.path()),
            Err(BenchError::Config(_))
        ));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();
        assert!(matches!(
            BenchmarkConfig::from_json_file(file.path()),
            Err(BenchError::Json(_))
        ));
    }
}
