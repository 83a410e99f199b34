// Procflow Testdata - Suite manifest
// Copyright (c) 2026 The Procflow Authors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Suite manifest for describing generated test suites.
//!
//! Manifests summarize a suite without its sequences: how many cases of
//! each family and anomaly kind it holds, and how it was produced.

use crate::dataset::TestSuite;
use chrono::{DateTime, Utc};
use procflow::{AnomalyKind, ProcessFamily};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Manifest describing a generated test suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteManifest {
    /// Suite name (matches filename without extension).
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Total number of test cases.
    pub total_cases: usize,
    /// Unmodified cases.
    pub normal_cases: usize,
    /// Corrupted cases.
    pub anomalous_cases: usize,
    /// Cases per originating family.
    pub families: BTreeMap<ProcessFamily, usize>,
    /// Corrupted cases per anomaly kind.
    pub anomaly_kinds: BTreeMap<AnomalyKind, usize>,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Random seed used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SuiteManifest {
    /// Describe an existing suite.
    pub fn from_suite(name: &str, suite: &TestSuite) -> Self {
        let mut families = BTreeMap::new();
        let mut anomaly_kinds = BTreeMap::new();

        for case in suite.iter() {
            *families.entry(case.family).or_insert(0) += 1;
            if case.has_anomaly {
                *anomaly_kinds.entry(case.anomaly_kind).or_insert(0) += 1;
            }
        }

        Self {
            name: name.to_string(),
            description: String::new(),
            total_cases: suite.len(),
            normal_cases: suite.normal_count(),
            anomalous_cases: suite.anomalous_count(),
            families,
            anomaly_kinds,
            generated_at: suite.generated_at,
            seed: suite.seed,
        }
    }

    /// Set description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to JSON file.
    pub fn to_json_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), std::io::Error> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }

    /// Load from JSON file.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, std::io::Error> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GeneratorConfig;
    use tempfile::NamedTempFile;

    #[test]
    fn test_manifest_counts() {
        let suite = TestSuite::generate(&GeneratorConfig::new().with_seed(42), 25, 15);
        let manifest = SuiteManifest::from_suite("suite_42", &suite).with_description("seeded");

        assert_eq!(manifest.total_cases, 40);
        assert_eq!(manifest.normal_cases, 25);
        assert_eq!(manifest.anomalous_cases, 15);
        assert_eq!(manifest.families.values().sum::<usize>(), 40);
        assert_eq!(manifest.anomaly_kinds.values().sum::<usize>(), 15);
        assert!(!manifest.anomaly_kinds.contains_key(&AnomalyKind::None));
        assert_eq!(manifest.seed, Some(42));
        assert_eq!(manifest.generated_at, suite.generated_at);
    }

    #[test]
    fn test_manifest_json() {
        let suite = TestSuite::generate(&GeneratorConfig::new().with_seed(1), 3, 3);
        let manifest = SuiteManifest::from_suite("small", &suite);

        let json = manifest.to_json().unwrap();
        assert!(json.contains("\"name\": \"small\""));
        assert!(json.contains("\"families\""));

        let temp_file = NamedTempFile::new().unwrap();
        manifest.to_json_file(temp_file.path()).unwrap();
        let loaded = SuiteManifest::from_json_file(temp_file.path()).unwrap();
        assert_eq!(loaded, manifest);
    }
}
