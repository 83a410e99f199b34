//! Example: Generate seeded test suites and training data.
//!
//! Run with: cargo run --example generate_suite

use procflow_testdata::{
    training_examples, write_training_jsonl, GeneratorConfig, LifecycleSampler, SuiteManifest,
    TestSuite,
};
use std::fs;

fn main() {
    println!("Procflow Suite Generator");
    println!("========================\n");

    if let Err(e) = fs::create_dir_all("datasets") {
        eprintln!("Could not create datasets/: {}", e);
        return;
    }

    generate_suites();
    generate_training_data();

    println!("\nAll datasets generated successfully!");
}

fn generate_suites() {
    println!("Generating test suites...");

    let suites = [
        ("baseline_50_50", 50, 50, 42),
        ("normal_heavy_90_10", 90, 10, 42),
        ("anomaly_heavy_10_90", 10, 90, 42),
    ];

    for (name, normal, anomalous, seed) in suites {
        let config = GeneratorConfig::new().with_seed(seed);
        let suite = TestSuite::generate(&config, normal, anomalous);

        let suite_path = format!("datasets/{}.json", name);
        if let Err(e) = suite.to_json(&suite_path) {
            eprintln!("  Warning: Could not save {}: {}", suite_path, e);
        } else {
            println!("  Created {}", suite_path);
        }

        let manifest = SuiteManifest::from_suite(name, &suite)
            .with_description(&format!("{} normal / {} anomalous, seed {}", normal, anomalous, seed));
        let manifest_path = format!("datasets/{}.manifest.json", name);
        if let Err(e) = manifest.to_json_file(&manifest_path) {
            eprintln!("  Warning: Could not save manifest: {}", e);
        }
    }
}

fn generate_training_data() {
    println!("Generating training data...");

    let sequences = LifecycleSampler::seeded(42).sequences(200);
    let examples = training_examples(&sequences);

    match write_training_jsonl(&examples, "datasets/training.jsonl") {
        Ok(n) => println!("  Created datasets/training.jsonl ({} examples)", n),
        Err(e) => eprintln!("  Warning: Could not save training data: {}", e),
    }
}
