// Procflow Testdata - Core generator
// Copyright (c) 2026 The Procflow Authors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Sequence generation.
//!
//! Draws valid flows from the catalog and, on request, corrupts them with
//! the [`AnomalyInjector`]. All randomness comes from a single `StdRng`
//! owned by the generator, so a seeded generator is fully reproducible.

use crate::anomalies::AnomalyInjector;
use crate::dataset::DatasetError;
use log::warn;
use procflow::catalog::TRADE_NORMAL;
use procflow::{AnomalyKind, EventSequence, FlowCatalog, FlowVariant, ProcessFamily, TestCase};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Random seed for reproducibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Create a new generator config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// An anomalous sequence with its ground truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnomalousSequence {
    /// Corrupted sequence
    pub sequence: EventSequence,
    /// Family of the flow before corruption
    pub family: ProcessFamily,
    /// Strategy applied
    pub kind: AnomalyKind,
    /// Index where the corruption becomes observable
    pub anomaly_index: usize,
}

/// Generates normal and anomalous event sequences.
pub struct SequenceGenerator {
    catalog: &'static FlowCatalog,
    injector: AnomalyInjector,
    rng: StdRng,
    /// Drawn only if the catalog yields nothing
    fallback: &'static FlowVariant,
}

impl SequenceGenerator {
    /// Create a generator over the standard catalog.
    pub fn new(config: &GeneratorConfig) -> Self {
        Self::build(config, FlowCatalog::standard(), &TRADE_NORMAL)
    }

    /// Create a generator over another catalog.
    ///
    /// The catalog needs at least one flow of two or more events and at
    /// least two families with flows, otherwise no anomaly can be injected.
    pub fn with_catalog(
        config: &GeneratorConfig,
        catalog: &'static FlowCatalog,
    ) -> Result<Self, DatasetError> {
        let fallback = catalog
            .all_variants()
            .find(|v| v.len() >= 2)
            .ok_or_else(|| DatasetError::UnusableCatalog("no flow has two events".to_string()))?;
        let populated = catalog
            .flows()
            .iter()
            .filter(|f| !f.variants.is_empty())
            .count();
        if populated < 2 {
            return Err(DatasetError::UnusableCatalog(format!(
                "{} families with flows, need 2",
                populated
            )));
        }

        Ok(Self::build(config, catalog, fallback))
    }

    fn build(
        config: &GeneratorConfig,
        catalog: &'static FlowCatalog,
        fallback: &'static FlowVariant,
    ) -> Self {
        let rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        Self {
            catalog,
            injector: AnomalyInjector::new(catalog),
            rng,
            fallback,
        }
    }

    /// Create a generator with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(&GeneratorConfig::new().with_seed(seed))
    }

    /// Catalog the generator draws from.
    pub fn catalog(&self) -> &'static FlowCatalog {
        self.catalog
    }

    /// Generate a valid sequence.
    ///
    /// The family is uniform over the catalog families that have flows
    /// unless given; the variant is uniform within the family. A requested
    /// family without flows falls back to a uniform draw over the catalog.
    pub fn generate_normal(&mut self, family: Option<ProcessFamily>) -> (EventSequence, ProcessFamily) {
        let variant = self.pick_variant(family);
        (variant.to_sequence(), variant.family)
    }

    /// Generate a valid sequence as a labelled test case.
    pub fn normal_case(&mut self, family: Option<ProcessFamily>) -> TestCase {
        let variant = self.pick_variant(family);
        TestCase::normal(variant.to_sequence(), variant.family, variant.name)
    }

    /// Generate a corrupted sequence from a uniformly drawn flow.
    pub fn generate_anomalous(&mut self) -> AnomalousSequence {
        let case = self.anomalous_case();
        AnomalousSequence {
            sequence: case.sequence,
            family: case.family,
            kind: case.anomaly_kind,
            anomaly_index: case.anomaly_index.unwrap_or_default(),
        }
    }

    /// Generate a corrupted sequence as a labelled test case.
    pub fn anomalous_case(&mut self) -> TestCase {
        loop {
            let variant = self.pick_variant(None);
            let mut sequence = variant.to_sequence();

            // Single-event flows admit no strategy; draw another flow
            if let Some((kind, index)) =
                self.injector.inject(&mut self.rng, &mut sequence, variant.family)
            {
                return TestCase::anomalous(
                    sequence,
                    variant.to_sequence(),
                    variant.family,
                    variant.name,
                    kind,
                    index,
                );
            }
        }
    }

    /// Shuffle items with the generator's RNG.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    fn pick_variant(&mut self, family: Option<ProcessFamily>) -> &'static FlowVariant {
        let catalog = self.catalog;
        let picked = match family {
            Some(family) => catalog.variants(family).choose(&mut self.rng),
            None => catalog
                .flows()
                .iter()
                .filter(|f| !f.variants.is_empty())
                .choose(&mut self.rng)
                .and_then(|f| f.variants.choose(&mut self.rng)),
        };

        picked
            .or_else(|| {
                warn!("No {:?} flows in catalog, drawing from all flows", family);
                catalog.all_variants().choose(&mut self.rng)
            })
            .unwrap_or(self.fallback)
    }
}
