//! Next-event prediction adapters
//!
//! The monitor never talks to a model directly. Anything that can map an
//! event history to a predicted next event implements [`PredictionAdapter`];
//! the inference call, its latency and its timeouts belong to the adapter.

use crate::catalog::FlowCatalog;
use crate::error::PredictionError;

/// Trait for next-event predictors.
pub trait PredictionAdapter {
    /// Predict the event that follows `history`.
    ///
    /// `history` is never empty when called by the monitor. The returned
    /// name must be a bare event-type name; adapters wrapping text models
    /// should pass raw output through [`normalize_prediction`] or
    /// [`try_normalize_prediction`].
    fn predict_next(&self, history: &[String]) -> Result<String, PredictionError>;

    /// Short identifier for logs and reports
    fn name(&self) -> &str {
        "custom"
    }
}

impl<P: PredictionAdapter + ?Sized> PredictionAdapter for &P {
    fn predict_next(&self, history: &[String]) -> Result<String, PredictionError> {
        (**self).predict_next(history)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<P: PredictionAdapter + ?Sized> PredictionAdapter for Box<P> {
    fn predict_next(&self, history: &[String]) -> Result<String, PredictionError> {
        (**self).predict_next(history)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Reduce raw model output to a bare event name.
///
/// Keeps the first whitespace-delimited token and strips trailing
/// punctuation (`.,;:`). Returns an empty string for blank output.
pub fn normalize_prediction(raw: &str) -> String {
    raw.split_whitespace()
        .next()
        .unwrap_or("")
        .trim_end_matches(['.', ',', ';', ':'])
        .to_string()
}

/// Like [`normalize_prediction`], but rejects output with no event name.
pub fn try_normalize_prediction(raw: &str) -> Result<String, PredictionError> {
    let event = normalize_prediction(raw);
    if event.is_empty() {
        return Err(PredictionError::Malformed(raw.to_string()));
    }
    Ok(event)
}

/// Oracle that replays a known reference sequence.
///
/// Predicts `reference[history.len()]`, i.e. what the uncorrupted flow
/// would have emitted next.
#[derive(Debug, Clone)]
pub struct ReferencePredictor {
    reference: Vec<String>,
}

impl ReferencePredictor {
    /// Create an oracle for a reference sequence
    pub fn new(reference: Vec<String>) -> Self {
        Self { reference }
    }

    /// Create from string slices
    pub fn from_events(events: &[&str]) -> Self {
        Self::new(events.iter().map(|e| e.to_string()).collect())
    }
}

impl PredictionAdapter for ReferencePredictor {
    fn predict_next(&self, history: &[String]) -> Result<String, PredictionError> {
        self.reference
            .get(history.len())
            .cloned()
            .ok_or(PredictionError::NoCandidate {
                history_len: history.len(),
            })
    }

    fn name(&self) -> &str {
        "reference"
    }
}

/// Predictor backed by the flow catalog.
///
/// Predicts the first catalog continuation of the full history. When the
/// history matches no flow prefix (e.g. after a foreign event), falls back
/// to the first catalog successor of the most recent event that has one.
#[derive(Debug, Clone, Copy)]
pub struct CatalogPredictor {
    catalog: &'static FlowCatalog,
}

impl CatalogPredictor {
    pub fn new(catalog: &'static FlowCatalog) -> Self {
        Self { catalog }
    }
}

impl Default for CatalogPredictor {
    fn default() -> Self {
        Self::new(FlowCatalog::standard())
    }
}

impl PredictionAdapter for CatalogPredictor {
    fn predict_next(&self, history: &[String]) -> Result<String, PredictionError> {
        let no_candidate = PredictionError::NoCandidate {
            history_len: history.len(),
        };

        if let Some(next) = self.catalog.next_events(history).first() {
            return Ok(next.to_string());
        }

        history
            .iter()
            .rev()
            .find_map(|event| self.catalog.successors_of(event).first().copied())
            .map(|next| next.to_string())
            .ok_or(no_candidate)
    }

    fn name(&self) -> &str {
        "catalog"
    }
}

/// Adapter around a closure, handy for tests and quick integrations
pub struct FnPredictor<F> {
    name: String,
    predict: F,
}

impl<F> FnPredictor<F>
where
    F: Fn(&[String]) -> Result<String, PredictionError>,
{
    pub fn new(name: &str, predict: F) -> Self {
        Self {
            name: name.to_string(),
            predict,
        }
    }
}

impl<F> PredictionAdapter for FnPredictor<F>
where
    F: Fn(&[String]) -> Result<String, PredictionError>,
{
    fn predict_next(&self, history: &[String]) -> Result<String, PredictionError> {
        (self.predict)(history)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(events: &[&str]) -> Vec<String> {
        events.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_try_normalize_rejects_blank_output() {
        assert_eq!(
            try_normalize_prediction(" TradeSettled.\n"),
            Ok("TradeSettled".to_string())
        );
        assert_eq!(
            try_normalize_prediction("  \n"),
            Err(PredictionError::Malformed("  \n".to_string()))
        );
        assert!(matches!(
            try_normalize_prediction("..."),
            Err(PredictionError::Malformed(_))
        ));
    }

    #[test]
    fn test_blank_model_output_fails_monitoring() {
        use crate::error::ProcflowError;
        use crate::monitor::SequenceMonitor;

        // Stands in for a chat model that answers with nothing
        let silent = FnPredictor::new("silent", |_: &[String]| try_normalize_prediction(""));
        let monitor = SequenceMonitor::new(silent);
        let err = monitor
            .monitor_sequence(&history(&["OrderSubmitted", "OrderValidated"]))
            .unwrap_err();
        assert_eq!(
            err,
            ProcflowError::Prediction(PredictionError::Malformed(String::new()))
        );
        assert!(err.to_string().contains("Malformed prediction"));
    }

    #[test]
    fn test_normalize_prediction() {
        assert_eq!(normalize_prediction("OrderRouted"), "OrderRouted");
        assert_eq!(normalize_prediction("  OrderRouted.\n"), "OrderRouted");
        assert_eq!(normalize_prediction("TradeBooked, then settled"), "TradeBooked");
        assert_eq!(normalize_prediction("PaymentApproved;:"), "PaymentApproved");
        assert_eq!(normalize_prediction("   "), "");
    }

    #[test]
    fn test_reference_predictor() {
        let oracle = ReferencePredictor::from_events(&["A", "B", "C"]);
        assert_eq!(oracle.predict_next(&history(&["A"])).unwrap(), "B");
        assert_eq!(oracle.predict_next(&history(&["A", "X"])).unwrap(), "C");
        assert_eq!(
            oracle.predict_next(&history(&["A", "B", "C"])),
            Err(PredictionError::NoCandidate { history_len: 3 })
        );
    }

    #[test]
    fn test_catalog_predictor_prefix() {
        let predictor = CatalogPredictor::default();
        assert_eq!(
            predictor
                .predict_next(&history(&["PaymentInitiated", "PaymentValidated"]))
                .unwrap(),
            "PaymentPendingApproval"
        );
        assert_eq!(
            predictor.predict_next(&history(&["OrderSubmitted"])).unwrap(),
            "OrderValidated"
        );
    }

    #[test]
    fn test_catalog_predictor_falls_back_to_last_event() {
        let predictor = CatalogPredictor::default();
        // Not a catalog prefix; the last event still has a successor.
        let h = history(&["OrderSubmitted", "PaymentFailed", "OrderFilled"]);
        assert_eq!(predictor.predict_next(&h).unwrap(), "TradeBooked");
    }

    #[test]
    fn test_catalog_predictor_skips_terminal_events() {
        let predictor = CatalogPredictor::default();
        // PaymentFailed ends its flow; OrderValidated still has a successor
        let h = history(&["OrderSubmitted", "OrderValidated", "PaymentFailed"]);
        assert_eq!(predictor.predict_next(&h).unwrap(), "OrderRouted");
    }

    #[test]
    fn test_catalog_predictor_no_candidate() {
        let predictor = CatalogPredictor::default();
        let h = history(&["HeartbeatSent", "TradeConfirmed"]);
        assert_eq!(
            predictor.predict_next(&h),
            Err(PredictionError::NoCandidate { history_len: 2 })
        );
    }

    #[test]
    fn test_fn_predictor_and_blanket_impls() {
        let predictor = FnPredictor::new("echo", |h: &[String]| -> Result<String, PredictionError> {
            Ok(h[h.len() - 1].clone())
        });
        assert_eq!(predictor.name(), "echo");

        let by_ref: &dyn PredictionAdapter = &predictor;
        assert_eq!(by_ref.predict_next(&history(&["X"])).unwrap(), "X");

        let boxed: Box<dyn PredictionAdapter> = Box::new(CatalogPredictor::default());
        assert_eq!(boxed.name(), "catalog");
    }
}
