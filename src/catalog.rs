//! Catalog of valid financial process flows
//!
//! The catalog is a process-wide constant table: every process family and
//! the ordered event-type sequences (flow variants) it may legally follow.
//! It is built at compile time and never mutated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Category of financial workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessFamily {
    /// Order lifecycle through booking and settlement
    Trade,
    /// Payment initiation to completion
    Payment,
    /// Risk limit breach handling
    Risk,
    /// Compliance checks and reviews
    Compliance,
    /// Account opening and KYC
    Account,
}

/// Event-name fragments used to classify an event into its family.
/// Order matters: the first matching fragment wins.
const FAMILY_MARKERS: &[(&str, ProcessFamily)] = &[
    ("Order", ProcessFamily::Trade),
    ("Trade", ProcessFamily::Trade),
    ("Payment", ProcessFamily::Payment),
    ("Risk", ProcessFamily::Risk),
    ("Compliance", ProcessFamily::Compliance),
    ("Account", ProcessFamily::Account),
    ("KYC", ProcessFamily::Account),
];

impl ProcessFamily {
    /// All families, in catalog order
    pub const ALL: [ProcessFamily; 5] = [
        ProcessFamily::Trade,
        ProcessFamily::Payment,
        ProcessFamily::Risk,
        ProcessFamily::Compliance,
        ProcessFamily::Account,
    ];

    /// Get family name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessFamily::Trade => "trade",
            ProcessFamily::Payment => "payment",
            ProcessFamily::Risk => "risk",
            ProcessFamily::Compliance => "compliance",
            ProcessFamily::Account => "account",
        }
    }

    /// Best-effort classification of an event-type name.
    ///
    /// Returns `None` ("unknown") for names with no known marker; this is
    /// never an error.
    pub fn classify(event: &str) -> Option<Self> {
        FAMILY_MARKERS
            .iter()
            .find(|(marker, _)| event.contains(marker))
            .map(|(_, family)| *family)
    }
}

impl fmt::Display for ProcessFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unrecognized family name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown process family: {0}")]
pub struct UnknownFamily(pub String);

impl FromStr for ProcessFamily {
    type Err = UnknownFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProcessFamily::ALL
            .into_iter()
            .find(|family| family.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFamily(s.to_string()))
    }
}

/// One named valid path through a family's event lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowVariant {
    /// Owning family
    pub family: ProcessFamily,
    /// Outcome name (e.g. "normal", "rejected")
    pub name: &'static str,
    /// Ordered event-type names, never empty
    pub events: &'static [&'static str],
}

impl FlowVariant {
    /// Number of events in the flow
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Always false for catalog variants
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Owned copy of the event sequence.
    ///
    /// Generators hand out copies so the constant table is never aliased.
    pub fn to_sequence(&self) -> Vec<String> {
        self.events.iter().map(|e| e.to_string()).collect()
    }
}

/// All variants of one family
#[derive(Debug, Clone, Copy)]
pub struct FamilyFlows {
    pub family: ProcessFamily,
    pub variants: &'static [FlowVariant],
}

/// Registry of valid event sequences grouped by family
#[derive(Debug)]
pub struct FlowCatalog {
    families: &'static [FamilyFlows],
    vocabulary: &'static [&'static str],
}

impl FlowCatalog {
    /// Build a catalog over static tables
    pub const fn new(
        families: &'static [FamilyFlows],
        vocabulary: &'static [&'static str],
    ) -> Self {
        Self {
            families,
            vocabulary,
        }
    }

    /// The standard financial process catalog
    pub fn standard() -> &'static FlowCatalog {
        &STANDARD_CATALOG
    }

    /// Family groups, in catalog order
    pub fn flows(&self) -> &'static [FamilyFlows] {
        self.families
    }

    /// All families present in the catalog
    pub fn families(&self) -> Vec<ProcessFamily> {
        self.families.iter().map(|f| f.family).collect()
    }

    /// Variants of a family (empty if the family is not cataloged)
    pub fn variants(&self, family: ProcessFamily) -> &'static [FlowVariant] {
        self.families
            .iter()
            .find(|f| f.family == family)
            .map(|f| f.variants)
            .unwrap_or(&[])
    }

    /// Look up a variant by family and name
    pub fn variant(&self, family: ProcessFamily, name: &str) -> Option<&'static FlowVariant> {
        self.variants(family).iter().find(|v| v.name == name)
    }

    /// Iterate over every variant of every family
    pub fn all_variants(&self) -> impl Iterator<Item = &'static FlowVariant> {
        self.families.iter().flat_map(|f| f.variants.iter())
    }

    /// Known event-type vocabulary
    pub fn vocabulary(&self) -> &'static [&'static str] {
        self.vocabulary
    }

    /// Check if an event name is part of the vocabulary
    pub fn contains_event(&self, event: &str) -> bool {
        self.vocabulary.contains(&event)
    }

    /// Classify an event name into its owning family (see [`ProcessFamily::classify`])
    pub fn family_of(&self, event: &str) -> Option<ProcessFamily> {
        ProcessFamily::classify(event)
    }

    /// Events that can follow `history`, where `history` is a prefix of some
    /// variant. De-duplicated, in catalog order.
    pub fn next_events<S: AsRef<str>>(&self, history: &[S]) -> Vec<&'static str> {
        let mut next = Vec::new();
        for variant in self.all_variants() {
            if variant.events.len() <= history.len() {
                continue;
            }
            let is_prefix = history
                .iter()
                .zip(variant.events.iter())
                .all(|(h, e)| h.as_ref() == *e);
            if is_prefix {
                push_unique(&mut next, variant.events[history.len()]);
            }
        }
        next
    }

    /// Events that directly follow `event` anywhere in the catalog
    pub fn successors_of(&self, event: &str) -> Vec<&'static str> {
        let mut next = Vec::new();
        for variant in self.all_variants() {
            for pair in variant.events.windows(2) {
                if pair[0] == event {
                    push_unique(&mut next, pair[1]);
                }
            }
        }
        next
    }
}

fn push_unique(list: &mut Vec<&'static str>, event: &'static str) {
    if !list.contains(&event) {
        list.push(event);
    }
}

// ============================================================================
// Standard catalog
// ============================================================================

/// The unexceptional trade lifecycle, first flow of the standard catalog
pub const TRADE_NORMAL: FlowVariant = FlowVariant {
    family: ProcessFamily::Trade,
    name: "normal",
    events: &[
        "OrderSubmitted",
        "OrderValidated",
        "OrderRouted",
        "OrderFilled",
        "TradeBooked",
        "TradeSettled",
        "TradeConfirmed",
    ],
};

const TRADE_FLOWS: &[FlowVariant] = &[
    TRADE_NORMAL,
    FlowVariant {
        family: ProcessFamily::Trade,
        name: "rejected",
        events: &["OrderSubmitted", "OrderRejected"],
    },
    FlowVariant {
        family: ProcessFamily::Trade,
        name: "cancelled",
        events: &[
            "OrderSubmitted",
            "OrderValidated",
            "OrderRouted",
            "OrderCancelled",
        ],
    },
    FlowVariant {
        family: ProcessFamily::Trade,
        name: "partial",
        events: &[
            "OrderSubmitted",
            "OrderValidated",
            "OrderRouted",
            "OrderPartiallyFilled",
            "OrderFilled",
            "TradeBooked",
            "TradeSettled",
            "TradeConfirmed",
        ],
    },
];

const PAYMENT_FLOWS: &[FlowVariant] = &[
    FlowVariant {
        family: ProcessFamily::Payment,
        name: "normal",
        events: &[
            "PaymentInitiated",
            "PaymentValidated",
            "PaymentPendingApproval",
            "PaymentApproved",
            "PaymentExecuted",
            "PaymentCompleted",
        ],
    },
    FlowVariant {
        family: ProcessFamily::Payment,
        name: "rejected",
        events: &[
            "PaymentInitiated",
            "PaymentValidated",
            "PaymentPendingApproval",
            "PaymentRejected",
        ],
    },
    FlowVariant {
        family: ProcessFamily::Payment,
        name: "failed",
        events: &[
            "PaymentInitiated",
            "PaymentValidated",
            "PaymentPendingApproval",
            "PaymentApproved",
            "PaymentExecuted",
            "PaymentFailed",
        ],
    },
];

const RISK_FLOWS: &[FlowVariant] = &[
    FlowVariant {
        family: ProcessFamily::Risk,
        name: "mitigated",
        events: &[
            "RiskLimitBreached",
            "RiskAlertCreated",
            "RiskAlertAcknowledged",
            "RiskMitigationStarted",
            "RiskMitigationCompleted",
            "RiskAlertResolved",
        ],
    },
    FlowVariant {
        family: ProcessFamily::Risk,
        name: "accepted",
        events: &[
            "RiskLimitBreached",
            "RiskAlertCreated",
            "RiskAlertAcknowledged",
            "RiskAlertResolved",
        ],
    },
];

const COMPLIANCE_FLOWS: &[FlowVariant] = &[
    FlowVariant {
        family: ProcessFamily::Compliance,
        name: "clear",
        events: &["ComplianceCheckTriggered", "ComplianceCheckPassed"],
    },
    FlowVariant {
        family: ProcessFamily::Compliance,
        name: "flagged",
        events: &[
            "ComplianceCheckTriggered",
            "ComplianceFlagRaised",
            "ComplianceReviewAssigned",
            "ComplianceReviewCompleted",
            "ComplianceCaseClosed",
        ],
    },
];

const ACCOUNT_FLOWS: &[FlowVariant] = &[FlowVariant {
    family: ProcessFamily::Account,
    name: "opened",
    events: &[
        "AccountApplicationSubmitted",
        "AccountKYCStarted",
        "AccountDocumentReceived",
        "AccountKYCCompleted",
        "AccountOpened",
        "AccountFunded",
    ],
}];

/// Every event type the financial process model knows about.
///
/// `ComplianceEscalated` and `AccountStatusChanged` are valid events that
/// no benchmark flow emits. Escalations do occur in the longer lifecycles
/// used for training data.
pub const EVENT_VOCABULARY: &[&str] = &[
    // Trade
    "OrderSubmitted",
    "OrderValidated",
    "OrderRejected",
    "OrderRouted",
    "OrderPartiallyFilled",
    "OrderFilled",
    "OrderCancelled",
    "TradeBooked",
    "TradeSettled",
    "TradeConfirmed",
    // Payment
    "PaymentInitiated",
    "PaymentValidated",
    "PaymentPendingApproval",
    "PaymentApproved",
    "PaymentRejected",
    "PaymentExecuted",
    "PaymentCompleted",
    "PaymentFailed",
    // Risk
    "RiskLimitBreached",
    "RiskAlertCreated",
    "RiskAlertAcknowledged",
    "RiskMitigationStarted",
    "RiskMitigationCompleted",
    "RiskAlertResolved",
    // Compliance
    "ComplianceCheckTriggered",
    "ComplianceCheckPassed",
    "ComplianceFlagRaised",
    "ComplianceReviewAssigned",
    "ComplianceReviewCompleted",
    "ComplianceEscalated",
    "ComplianceCaseClosed",
    // Account
    "AccountApplicationSubmitted",
    "AccountKYCStarted",
    "AccountDocumentReceived",
    "AccountKYCCompleted",
    "AccountOpened",
    "AccountFunded",
    "AccountStatusChanged",
];

static STANDARD_CATALOG: FlowCatalog = FlowCatalog::new(
    &[
        FamilyFlows {
            family: ProcessFamily::Trade,
            variants: TRADE_FLOWS,
        },
        FamilyFlows {
            family: ProcessFamily::Payment,
            variants: PAYMENT_FLOWS,
        },
        FamilyFlows {
            family: ProcessFamily::Risk,
            variants: RISK_FLOWS,
        },
        FamilyFlows {
            family: ProcessFamily::Compliance,
            variants: COMPLIANCE_FLOWS,
        },
        FamilyFlows {
            family: ProcessFamily::Account,
            variants: ACCOUNT_FLOWS,
        },
    ],
    EVENT_VOCABULARY,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_families() {
        let catalog = FlowCatalog::standard();
        assert_eq!(catalog.families(), ProcessFamily::ALL.to_vec());
        assert_eq!(catalog.variants(ProcessFamily::Trade).len(), 4);
        assert_eq!(catalog.variants(ProcessFamily::Payment).len(), 3);
        assert_eq!(catalog.variants(ProcessFamily::Risk).len(), 2);
        assert_eq!(catalog.variants(ProcessFamily::Compliance).len(), 2);
        assert_eq!(catalog.variants(ProcessFamily::Account).len(), 1);
    }

    #[test]
    fn test_variants_are_well_formed() {
        let catalog = FlowCatalog::standard();
        for variant in catalog.all_variants() {
            assert!(!variant.is_empty(), "{} is empty", variant.name);
            for event in variant.events {
                assert!(catalog.contains_event(event), "{} not in vocabulary", event);
                assert_eq!(catalog.family_of(event), Some(variant.family));
            }
        }
    }

    #[test]
    fn test_variant_names_unique_per_family() {
        let catalog = FlowCatalog::standard();
        for flows in catalog.flows() {
            let mut names: Vec<_> = flows.variants.iter().map(|v| v.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), flows.variants.len());
        }
    }

    #[test]
    fn test_classify_markers() {
        assert_eq!(ProcessFamily::classify("OrderFilled"), Some(ProcessFamily::Trade));
        assert_eq!(ProcessFamily::classify("TradeBooked"), Some(ProcessFamily::Trade));
        assert_eq!(ProcessFamily::classify("PaymentFailed"), Some(ProcessFamily::Payment));
        assert_eq!(ProcessFamily::classify("RiskAlertCreated"), Some(ProcessFamily::Risk));
        assert_eq!(
            ProcessFamily::classify("ComplianceEscalated"),
            Some(ProcessFamily::Compliance)
        );
        assert_eq!(ProcessFamily::classify("KYCRefreshed"), Some(ProcessFamily::Account));
        assert_eq!(ProcessFamily::classify("AccountFunded"), Some(ProcessFamily::Account));
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(ProcessFamily::classify("HeartbeatReceived"), None);
        assert_eq!(ProcessFamily::classify(""), None);
    }

    #[test]
    fn test_family_parse() {
        assert_eq!("trade".parse::<ProcessFamily>(), Ok(ProcessFamily::Trade));
        assert_eq!(" Payment ".parse::<ProcessFamily>(), Ok(ProcessFamily::Payment));
        assert!("ledger".parse::<ProcessFamily>().is_err());
        assert_eq!(ProcessFamily::Compliance.to_string(), "compliance");
    }

    #[test]
    fn test_variant_lookup() {
        let catalog = FlowCatalog::standard();
        let rejected = catalog.variant(ProcessFamily::Trade, "rejected").unwrap();
        assert_eq!(rejected.events, &["OrderSubmitted", "OrderRejected"]);
        assert!(catalog.variant(ProcessFamily::Account, "closed").is_none());
    }

    #[test]
    fn test_to_sequence_is_a_copy() {
        let catalog = FlowCatalog::standard();
        let variant = catalog.variant(ProcessFamily::Risk, "accepted").unwrap();
        let mut seq = variant.to_sequence();
        seq[0] = "Tampered".to_string();
        assert_eq!(variant.events[0], "RiskLimitBreached");
    }

    #[test]
    fn test_next_events() {
        let catalog = FlowCatalog::standard();
        assert_eq!(
            catalog.next_events(&["OrderSubmitted"]),
            vec!["OrderValidated", "OrderRejected"]
        );
        assert_eq!(
            catalog.next_events(&["OrderSubmitted", "OrderValidated", "OrderRouted"]),
            vec!["OrderFilled", "OrderCancelled", "OrderPartiallyFilled"]
        );
        assert!(catalog.next_events(&["OrderSubmitted", "PaymentFailed"]).is_empty());
        // End of flow
        assert!(catalog.next_events(&["OrderSubmitted", "OrderRejected"]).is_empty());
    }

    #[test]
    fn test_successors_of() {
        let catalog = FlowCatalog::standard();
        assert_eq!(
            catalog.successors_of("RiskAlertAcknowledged"),
            vec!["RiskMitigationStarted", "RiskAlertResolved"]
        );
        assert!(catalog.successors_of("TradeConfirmed").is_empty());
    }
}
