// Procflow Testdata - Process lifecycles
// Copyright (c) 2026 The Procflow Authors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Full process lifecycles for training data.
//!
//! The benchmark catalog keeps one path per outcome. Real event streams are
//! richer: trades fill in several steps, compliance reviews escalate,
//! account applications stop after a failed KYC. These lifecycles cover
//! those paths and weight each family's outcomes the way they occur in
//! practice, with the successful outcome twice as likely as each exception.

use crate::generator::GeneratorConfig;
use procflow::ProcessFamily::{Account, Compliance, Payment, Risk, Trade};
use procflow::{EventSequence, FlowVariant, ProcessFamily};
use rand::prelude::*;
use rand::rngs::StdRng;

/// A lifecycle and its relative frequency within its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedFlow {
    pub flow: FlowVariant,
    pub weight: u32,
}

/// All lifecycles of one family.
#[derive(Debug, Clone, Copy)]
pub struct FamilyLifecycles {
    pub family: ProcessFamily,
    pub flows: &'static [WeightedFlow],
}

const fn weighted(
    family: ProcessFamily,
    name: &'static str,
    weight: u32,
    events: &'static [&'static str],
) -> WeightedFlow {
    WeightedFlow {
        flow: FlowVariant {
            family,
            name,
            events,
        },
        weight,
    }
}

const TRADE_LIFECYCLES: &[WeightedFlow] = &[
    weighted(
        Trade,
        "success",
        2,
        &[
            "OrderSubmitted",
            "OrderValidated",
            "OrderRouted",
            "OrderFilled",
            "TradeBooked",
            "TradeSettled",
            "TradeConfirmed",
        ],
    ),
    weighted(
        Trade,
        "partial_fill",
        1,
        &[
            "OrderSubmitted",
            "OrderValidated",
            "OrderRouted",
            "OrderPartiallyFilled",
            "OrderPartiallyFilled",
            "OrderFilled",
            "TradeBooked",
            "TradeSettled",
            "TradeConfirmed",
        ],
    ),
    weighted(Trade, "rejected", 1, &["OrderSubmitted", "OrderRejected"]),
    weighted(
        Trade,
        "cancelled",
        1,
        &[
            "OrderSubmitted",
            "OrderValidated",
            "OrderRouted",
            "OrderPartiallyFilled",
            "OrderCancelled",
        ],
    ),
];

const PAYMENT_LIFECYCLES: &[WeightedFlow] = &[
    weighted(
        Payment,
        "success",
        2,
        &[
            "PaymentInitiated",
            "PaymentValidated",
            "PaymentPendingApproval",
            "PaymentApproved",
            "PaymentExecuted",
            "PaymentCompleted",
        ],
    ),
    weighted(
        Payment,
        "rejected",
        1,
        &[
            "PaymentInitiated",
            "PaymentValidated",
            "PaymentPendingApproval",
            "PaymentRejected",
        ],
    ),
    weighted(
        Payment,
        "failed",
        1,
        &[
            "PaymentInitiated",
            "PaymentValidated",
            "PaymentPendingApproval",
            "PaymentApproved",
            "PaymentExecuted",
            "PaymentFailed",
        ],
    ),
];

const RISK_LIFECYCLES: &[WeightedFlow] = &[
    weighted(
        Risk,
        "mitigated",
        2,
        &[
            "RiskLimitBreached",
            "RiskAlertCreated",
            "RiskAlertAcknowledged",
            "RiskMitigationStarted",
            "RiskMitigationCompleted",
            "RiskAlertResolved",
        ],
    ),
    weighted(
        Risk,
        "accepted",
        1,
        &[
            "RiskLimitBreached",
            "RiskAlertCreated",
            "RiskAlertAcknowledged",
            "RiskAlertResolved",
        ],
    ),
];

const COMPLIANCE_LIFECYCLES: &[WeightedFlow] = &[
    weighted(
        Compliance,
        "clear",
        2,
        &["ComplianceCheckTriggered", "ComplianceCheckPassed"],
    ),
    weighted(
        Compliance,
        "flagged",
        1,
        &[
            "ComplianceCheckTriggered",
            "ComplianceFlagRaised",
            "ComplianceReviewAssigned",
            "ComplianceReviewCompleted",
            "ComplianceCaseClosed",
        ],
    ),
    weighted(
        Compliance,
        "escalated",
        1,
        &[
            "ComplianceCheckTriggered",
            "ComplianceFlagRaised",
            "ComplianceReviewAssigned",
            "ComplianceEscalated",
            "ComplianceReviewCompleted",
            "ComplianceCaseClosed",
        ],
    ),
];

const ACCOUNT_LIFECYCLES: &[WeightedFlow] = &[
    weighted(
        Account,
        "opened",
        2,
        &[
            "AccountApplicationSubmitted",
            "AccountKYCStarted",
            "AccountDocumentReceived",
            "AccountDocumentReceived",
            "AccountKYCCompleted",
            "AccountOpened",
            "AccountFunded",
        ],
    ),
    // KYC completes with a rejected status and the application stops
    weighted(
        Account,
        "rejected",
        1,
        &[
            "AccountApplicationSubmitted",
            "AccountKYCStarted",
            "AccountDocumentReceived",
            "AccountKYCCompleted",
        ],
    ),
];

/// Lifecycles per family.
pub const LIFECYCLES: &[FamilyLifecycles] = &[
    FamilyLifecycles {
        family: Trade,
        flows: TRADE_LIFECYCLES,
    },
    FamilyLifecycles {
        family: Payment,
        flows: PAYMENT_LIFECYCLES,
    },
    FamilyLifecycles {
        family: Risk,
        flows: RISK_LIFECYCLES,
    },
    FamilyLifecycles {
        family: Compliance,
        flows: COMPLIANCE_LIFECYCLES,
    },
    FamilyLifecycles {
        family: Account,
        flows: ACCOUNT_LIFECYCLES,
    },
];

/// Iterate over every lifecycle.
pub fn all_lifecycles() -> impl Iterator<Item = &'static FlowVariant> {
    LIFECYCLES
        .iter()
        .flat_map(|f| f.flows.iter().map(|w| &w.flow))
}

/// Draws lifecycles: family uniform, outcome by weight.
pub struct LifecycleSampler {
    rng: StdRng,
}

impl LifecycleSampler {
    /// Create a sampler.
    pub fn new(config: &GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Create a sampler with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(&GeneratorConfig::new().with_seed(seed))
    }

    /// Draw one lifecycle.
    pub fn sample(&mut self) -> Option<&'static FlowVariant> {
        let family = LIFECYCLES.choose(&mut self.rng)?;
        family
            .flows
            .choose_weighted(&mut self.rng, |w| w.weight)
            .ok()
            .map(|w| &w.flow)
    }

    /// Draw `count` lifecycles as owned sequences.
    pub fn sequences(&mut self, count: usize) -> Vec<EventSequence> {
        (0..count)
            .filter_map(|_| self.sample())
            .map(|flow| flow.to_sequence())
            .collect()
    }
}
