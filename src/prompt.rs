//! Chat prompt rendering for model-backed predictors
//!
//! Adapters that wrap a chat model send the system prompt plus the numbered
//! event history, then run the model's reply through
//! [`normalize_prediction`](crate::predictor::normalize_prediction). The same
//! rendering is used when exporting training examples, so train and
//! inference prompts stay identical.

use serde::{Deserialize, Serialize};

/// System prompt describing the financial process vocabulary
pub const SYSTEM_PROMPT: &str = "You are a financial process prediction system. Given a sequence of events from a financial workflow, predict what event will happen next.

Event types you may encounter:
- Trade: OrderSubmitted -> OrderValidated -> OrderRouted -> OrderFilled -> TradeBooked -> TradeSettled -> TradeConfirmed
- Trade (rejected): OrderSubmitted -> OrderRejected
- Payment: PaymentInitiated -> PaymentValidated -> PaymentPendingApproval -> PaymentApproved -> PaymentExecuted -> PaymentCompleted
- Risk: RiskLimitBreached -> RiskAlertCreated -> RiskAlertAcknowledged -> RiskMitigationStarted -> RiskMitigationCompleted -> RiskAlertResolved
- Compliance: ComplianceCheckTriggered -> ComplianceCheckPassed (or ComplianceFlagRaised -> ComplianceReviewAssigned -> ...)
- Account: AccountApplicationSubmitted -> AccountKYCStarted -> AccountDocumentReceived -> AccountKYCCompleted -> AccountOpened -> AccountFunded

Respond with ONLY the next event type name.";

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Render a history as a numbered list ("1. A\n2. B")
pub fn render_history<S: AsRef<str>>(history: &[S]) -> String {
    history
        .iter()
        .enumerate()
        .map(|(i, event)| format!("{}. {}", i + 1, event.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// User turn asking for the next event
pub fn user_prompt<S: AsRef<str>>(history: &[S]) -> String {
    format!(
        "Event sequence:\n{}\n\nWhat is the next event?",
        render_history(history)
    )
}

/// System and user messages for a prediction request
pub fn prediction_messages<S: AsRef<str>>(history: &[S]) -> Vec<ChatMessage> {
    vec![
        ChatMessage::new(Role::System, SYSTEM_PROMPT),
        ChatMessage::new(Role::User, user_prompt(history)),
    ]
}
