// Procflow Testdata - Test suites
// Copyright (c) 2026 The Procflow Authors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Test suite structures and I/O operations.
//!
//! A [`TestSuite`] is the labelled input of one benchmark run: shuffled
//! normal and anomalous test cases plus the seed that produced them.

use crate::generator::{GeneratorConfig, SequenceGenerator};
use chrono::{DateTime, Utc};
use procflow::{AnomalyKind, TestCase};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Dataset error types.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty test suite")]
    Empty,

    #[error("Invalid test case {index}: {reason}")]
    InvalidCase { index: usize, reason: String },

    #[error("Catalog cannot generate test cases: {0}")]
    UnusableCatalog(String),
}

/// A labelled set of test cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSuite {
    /// Test cases, in evaluation order.
    pub cases: Vec<TestCase>,
    /// Seed used to generate the suite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
}

impl TestSuite {
    /// Wrap existing cases.
    pub fn new(cases: Vec<TestCase>, seed: Option<u64>) -> Self {
        Self {
            cases,
            seed,
            generated_at: Utc::now(),
        }
    }

    /// Generate `num_normal` valid and `num_anomalous` corrupted cases,
    /// shuffled together.
    pub fn generate(config: &GeneratorConfig, num_normal: usize, num_anomalous: usize) -> Self {
        let mut generator = SequenceGenerator::new(config);

        let mut cases = Vec::with_capacity(num_normal + num_anomalous);
        for _ in 0..num_normal {
            cases.push(generator.normal_case(None));
        }
        for _ in 0..num_anomalous {
            cases.push(generator.anomalous_case());
        }
        generator.shuffle(&mut cases);

        Self::new(cases, config.seed)
    }

    /// Shuffle the evaluation order.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cases.shuffle(rng);
    }

    /// Number of test cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Check if the suite is empty.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Number of unmodified cases.
    pub fn normal_count(&self) -> usize {
        self.cases.iter().filter(|c| !c.has_anomaly).count()
    }

    /// Number of corrupted cases.
    pub fn anomalous_count(&self) -> usize {
        self.cases.iter().filter(|c| c.has_anomaly).count()
    }

    /// Iterate over test cases.
    pub fn iter(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.iter()
    }

    /// Check that every case is consistently labelled.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.cases.is_empty() {
            return Err(DatasetError::Empty);
        }

        for (index, case) in self.cases.iter().enumerate() {
            let invalid = |reason: &str| DatasetError::InvalidCase {
                index,
                reason: reason.to_string(),
            };

            if case.sequence.is_empty() {
                return Err(invalid("empty sequence"));
            }
            if case.has_anomaly {
                if case.anomaly_kind == AnomalyKind::None {
                    return Err(invalid("anomalous case without an anomaly kind"));
                }
                match case.anomaly_index {
                    Some(i) if i < case.sequence.len() => {}
                    Some(_) => return Err(invalid("anomaly index out of range")),
                    None => return Err(invalid("anomalous case without an anomaly index")),
                }
            } else if case.anomaly_kind != AnomalyKind::None || case.anomaly_index.is_some() {
                return Err(invalid("normal case carries anomaly labels"));
            }
        }

        Ok(())
    }

    /// Save as JSON.
    pub fn to_json(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Load from JSON, rejecting empty or mislabelled suites.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let suite: TestSuite = serde_json::from_reader(reader)?;
        suite.validate()?;
        Ok(suite)
    }
}
