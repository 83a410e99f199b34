// Procflow Testdata - Training export
// Copyright (c) 2026 The Procflow Authors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Next-event prediction training data.
//!
//! Every valid sequence of N events yields N-1 examples: the first `i`
//! events as context and event `i` as the target. Examples use the same
//! chat prompt that model-backed predictors send at inference time.

use crate::dataset::DatasetError;
use procflow::prompt::{user_prompt, ChatMessage, Role, SYSTEM_PROMPT};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// One chat-format training example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub messages: Vec<ChatMessage>,
}

impl TrainingExample {
    /// Build an example from a context and its target event.
    pub fn new<S: AsRef<str>>(context: &[S], target: &str) -> Self {
        Self {
            messages: vec![
                ChatMessage::new(Role::System, SYSTEM_PROMPT),
                ChatMessage::new(Role::User, user_prompt(context)),
                ChatMessage::new(Role::Assistant, target),
            ],
        }
    }

    /// The expected answer.
    pub fn target(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.as_str())
    }
}

/// Expand sequences into next-event examples.
///
/// Sequences with fewer than two events produce nothing.
pub fn training_examples<S: AsRef<str>>(sequences: &[Vec<S>]) -> Vec<TrainingExample> {
    let mut examples = Vec::new();
    for sequence in sequences {
        for i in 1..sequence.len() {
            examples.push(TrainingExample::new(&sequence[..i], sequence[i].as_ref()));
        }
    }
    examples
}

/// Write examples as JSON Lines. Returns the number written.
pub fn write_training_jsonl(
    examples: &[TrainingExample],
    path: impl AsRef<Path>,
) -> Result<usize, DatasetError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for example in examples {
        serde_json::to_writer(&mut writer, example)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    Ok(examples.len())
}

/// Read examples from JSON Lines, skipping blank lines.
pub fn read_training_jsonl(path: impl AsRef<Path>) -> Result<Vec<TrainingExample>, DatasetError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut examples = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        examples.push(serde_json::from_str(&line)?);
    }
    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycles::LifecycleSampler;
    use tempfile::NamedTempFile;

    #[test]
    fn test_training_examples_per_position() {
        let sequences = vec![
            vec!["OrderSubmitted", "OrderValidated", "OrderRouted"],
            vec!["OrderSubmitted"],
        ];
        let examples = training_examples(&sequences);

        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].target(), Some("OrderValidated"));
        assert_eq!(examples[1].target(), Some("OrderRouted"));
        assert!(examples[1].messages[1]
            .content
            .contains("1. OrderSubmitted\n2. OrderValidated"));
        assert_eq!(examples[0].messages[0].content, SYSTEM_PROMPT);
    }

    #[test]
    fn test_lifecycle_examples_cover_exception_paths() {
        let sequences = LifecycleSampler::seeded(42).sequences(5000);
        let examples = training_examples(&sequences);

        let escalated_targets = examples
            .iter()
            .filter(|e| e.target() == Some("ComplianceEscalated"))
            .count();
        assert!(escalated_targets > 0);

        let kyc_rejections = sequences
            .iter()
            .filter(|s| s.last().map(String::as_str) == Some("AccountKYCCompleted"))
            .count();
        assert!(kyc_rejections > 0);

        let multi_fills = sequences
            .iter()
            .filter(|s| s.iter().filter(|e| *e == "OrderPartiallyFilled").count() >= 2)
            .count();
        assert!(multi_fills > 0);

        let partial_cancels = sequences
            .iter()
            .filter(|s| {
                s.ends_with(&[
                    "OrderPartiallyFilled".to_string(),
                    "OrderCancelled".to_string(),
                ])
            })
            .count();
        assert!(partial_cancels > 0);
    }

    #[test]
    fn test_jsonl_roundtrip() {
        let sequences = vec![vec![
            "PaymentInitiated".to_string(),
            "PaymentValidated".to_string(),
        ]];
        let examples = training_examples(&sequences);

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        assert_eq!(write_training_jsonl(&examples, path).unwrap(), 1);
        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("\"role\":\"assistant\""));

        let loaded = read_training_jsonl(path).unwrap();
        assert_eq!(loaded, examples);
    }
}
