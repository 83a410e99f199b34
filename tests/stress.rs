// procflow - Financial Process Anomaly Detection
// Copyright (c) 2026 The Procflow Authors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Stress tests for procflow
//!
//! Run with: cargo test --release stress -- --ignored

use procflow::*;
use std::time::Instant;

#[test]
#[ignore] // Run manually with --ignored
fn stress_test_monitoring() {
    let monitor = SequenceMonitor::new(CatalogPredictor::default());
    let sequences: Vec<EventSequence> = FlowCatalog::standard()
        .all_variants()
        .map(|v| v.to_sequence())
        .collect();

    let iterations = 10_000;
    let mut transitions = 0usize;
    let start = Instant::now();

    for _ in 0..iterations {
        for sequence in &sequences {
            if let Ok(verdicts) = monitor.monitor_sequence(sequence) {
                transitions += verdicts.len();
            }
        }
    }

    let elapsed = start.elapsed();
    let rate = transitions as f64 / elapsed.as_secs_f64();

    println!("Analyzed {} transitions in {:?}", transitions, elapsed);
    println!("Rate: {:.0} transitions/second", rate);

    assert!(
        rate > 100_000.0,
        "Should analyze at least 100k transitions/s, got {:.0}",
        rate
    );
}

#[test]
#[ignore]
fn stress_test_scoring() {
    let mut engine = ScoringEngine::new();
    let case = TestCase::normal(
        vec!["AccountApplicationSubmitted".to_string(), "AccountKYCStarted".to_string()],
        ProcessFamily::Account,
        "opened",
    );

    let iterations = 1_000_000u64;
    let start = Instant::now();
    for i in 0..iterations {
        engine.score(&case, i % 10 == 0);
    }
    let elapsed = start.elapsed();

    println!("Scored {} cases in {:?}", iterations, elapsed);
    assert_eq!(engine.matrix().total(), iterations);
    assert_eq!(engine.matrix().false_positives, iterations / 10);
}
