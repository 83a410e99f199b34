// Procflow Testdata - Anomaly injection
// Copyright (c) 2026 The Procflow Authors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Anomaly injection for testing sequence monitors.
//!
//! Three corruption strategies are applied to valid flows:
//!
//! - **wrong_event**: an event from a different family overwrites one step
//! - **skipped_step**: a middle step is removed
//! - **out_of_order**: two adjacent steps are transposed
//!
//! The first event of a sequence is never touched, so every corrupted
//! sequence still opens validly. Each strategy reports the index where the
//! corruption becomes observable, or `None` when the sequence is too short
//! for it (in which case the sequence is left unmodified).

use log::{debug, warn};
use procflow::{AnomalyKind, EventSequence, FlowCatalog, ProcessFamily};
use rand::prelude::*;

/// Applies anomaly strategies using families and flows from a catalog.
#[derive(Debug, Clone, Copy)]
pub struct AnomalyInjector {
    catalog: &'static FlowCatalog,
}

impl Default for AnomalyInjector {
    fn default() -> Self {
        Self::new(FlowCatalog::standard())
    }
}

impl AnomalyInjector {
    /// Create an injector drawing foreign events from `catalog`.
    pub fn new(catalog: &'static FlowCatalog) -> Self {
        Self { catalog }
    }

    /// Pick an anomaly kind for a sequence of `len` events.
    ///
    /// Sequences shorter than 3 always get `WrongEvent`. Otherwise the kind
    /// is uniform among the generated kinds; a draw that cannot apply to
    /// `len` is re-drawn among the kinds that can.
    pub fn choose_kind<R: Rng + ?Sized>(&self, rng: &mut R, len: usize) -> AnomalyKind {
        if len < 3 {
            return AnomalyKind::WrongEvent;
        }

        let drawn = AnomalyKind::GENERATED
            .choose(rng)
            .copied()
            .unwrap_or(AnomalyKind::WrongEvent);
        if drawn.applies_to(len) {
            return drawn;
        }

        let redrawn = AnomalyKind::GENERATED
            .iter()
            .copied()
            .filter(|kind| kind.applies_to(len))
            .choose(rng)
            .unwrap_or(AnomalyKind::WrongEvent);
        warn!(
            "{} cannot apply to a {}-event sequence, using {} instead",
            drawn, len, redrawn
        );
        redrawn
    }

    /// Corrupt `sequence` in place with a randomly chosen strategy.
    ///
    /// `family` is the family the sequence was drawn from. Returns the kind
    /// applied and the anomaly index, or `None` if no strategy fits.
    pub fn inject<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        sequence: &mut EventSequence,
        family: ProcessFamily,
    ) -> Option<(AnomalyKind, usize)> {
        let kind = self.choose_kind(rng, sequence.len());
        let index = self.apply(rng, kind, sequence, family)?;
        debug!(
            "Injected {} into {} sequence at index {}",
            kind, family, index
        );
        Some((kind, index))
    }

    /// Apply a specific strategy.
    ///
    /// Returns `None` for kinds that are never generated or when the length
    /// precondition of the strategy fails.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        kind: AnomalyKind,
        sequence: &mut EventSequence,
        family: ProcessFamily,
    ) -> Option<usize> {
        match kind {
            AnomalyKind::WrongEvent => self.substitute_foreign_event(rng, sequence, family),
            AnomalyKind::SkippedStep => skip_step(rng, sequence),
            AnomalyKind::OutOfOrder => swap_adjacent(rng, sequence),
            AnomalyKind::None | AnomalyKind::ImpossibleTransition => None,
        }
    }

    /// Overwrite one event (never the first) with an event from another
    /// family's flow.
    pub fn substitute_foreign_event<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        sequence: &mut EventSequence,
        family: ProcessFamily,
    ) -> Option<usize> {
        if sequence.len() < AnomalyKind::WrongEvent.min_sequence_len() {
            return None;
        }

        let foreign = self
            .catalog
            .flows()
            .iter()
            .filter(|f| f.family != family && !f.variants.is_empty())
            .choose(rng)?;
        let variant = foreign.variants.choose(rng)?;
        let event = variant.events.choose(rng)?;

        let index = rng.gen_range(1..sequence.len());
        sequence[index] = event.to_string();
        Some(index)
    }
}

/// Remove one middle step.
///
/// Requires at least 4 events. The returned index is the removal position,
/// which now holds the event that followed the gap.
pub fn skip_step<R: Rng + ?Sized>(rng: &mut R, sequence: &mut EventSequence) -> Option<usize> {
    if sequence.len() < AnomalyKind::SkippedStep.min_sequence_len() {
        return None;
    }

    let index = rng.gen_range(1..sequence.len() - 1);
    sequence.remove(index);
    Some(index)
}

/// Transpose two adjacent steps at `p` and `p + 1`, with `p` never 0.
///
/// Requires at least 3 events. Returns `p + 1`.
pub fn swap_adjacent<R: Rng + ?Sized>(rng: &mut R, sequence: &mut EventSequence) -> Option<usize> {
    if sequence.len() < AnomalyKind::OutOfOrder.min_sequence_len() {
        return None;
    }

    let p = rng.gen_range(1..sequence.len() - 1);
    sequence.swap(p, p + 1);
    Some(p + 1)
}
