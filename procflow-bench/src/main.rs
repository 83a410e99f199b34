// Procflow Bench - Anomaly detection benchmark runner
// Copyright (c) 2026 The Procflow Authors
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Procflow Bench
//!
//! Command-line front end for the benchmark runner.
//!
//! ## Usage
//!
//! ```bash
//! # Evaluate the catalog predictor on a fresh suite
//! procflow-bench run --normal 50 --anomalous 50 --seed 42
//!
//! # Re-run on a saved suite and export metrics for node_exporter
//! procflow-bench run --suite suite.json --metrics-output procflow.prom
//!
//! # Save a suite and its manifest
//! procflow-bench generate --seed 42 --output suite.json --manifest suite.manifest.json
//! ```

use clap::{Parser, Subcommand};
use procflow::CatalogPredictor;
use procflow_bench::{
    render_demo, run_demo_scenario, BenchMetrics, BenchmarkConfig, BenchmarkRunner, FailurePolicy,
    PredictorKind, Result, DEMO_SCENARIOS,
};
use procflow_testdata::{
    training_examples, write_training_jsonl, GeneratorConfig, LifecycleSampler, SuiteManifest,
    TestSuite,
};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// Procflow anomaly detection benchmark
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a suite, monitor every case and score the results
    Run {
        /// JSON configuration file (flags below override it)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Evaluate a saved suite instead of generating one
        #[arg(long, conflicts_with_all = ["normal", "anomalous", "seed"])]
        suite: Option<PathBuf>,

        /// Number of normal sequences
        #[arg(long)]
        normal: Option<usize>,

        /// Number of anomalous sequences
        #[arg(long)]
        anomalous: Option<usize>,

        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Predictor to evaluate
        #[arg(short, long, value_enum)]
        predictor: Option<PredictorKind>,

        /// What to do when a prediction fails
        #[arg(long, value_enum)]
        on_failure: Option<FailurePolicy>,

        /// Write the full JSON report here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write Prometheus text-format metrics here
        #[arg(long)]
        metrics_output: Option<PathBuf>,

        /// Example detections and misses shown in the summary
        #[arg(long)]
        samples: Option<usize>,
    },

    /// Walk the demo sequences transition by transition
    Demo,

    /// Generate a test suite and save it as JSON
    Generate {
        /// Number of normal sequences
        #[arg(long, default_value = "50")]
        normal: usize,

        /// Number of anomalous sequences
        #[arg(long, default_value = "50")]
        anomalous: usize,

        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Suite destination
        #[arg(short, long, default_value = "suite.json")]
        output: PathBuf,

        /// Also write a manifest here
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Export next-event training examples as JSON Lines
    ExportTraining {
        /// Number of process lifecycles to expand
        #[arg(short = 'n', long, default_value = "200")]
        count: usize,

        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSONL destination
        #[arg(short, long, default_value = "training.jsonl")]
        output: PathBuf,
    },
}

fn main() {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Procflow Bench v{}", env!("CARGO_PKG_VERSION"));

    let result = match args.command {
        Command::Run {
            config,
            suite,
            normal,
            anomalous,
            seed,
            predictor,
            on_failure,
            output,
            metrics_output,
            samples,
        } => load_config(config).and_then(|mut cfg| {
            if let Some(n) = normal {
                cfg.num_normal = n;
            }
            if let Some(n) = anomalous {
                cfg.num_anomalous = n;
            }
            cfg.seed = seed.or(cfg.seed);
            cfg.predictor = predictor.unwrap_or(cfg.predictor);
            cfg.on_prediction_failure = on_failure.unwrap_or(cfg.on_prediction_failure);
            cfg.output = output.or(cfg.output);
            cfg.metrics_output = metrics_output.or(cfg.metrics_output);
            cfg.sample_cases = samples.unwrap_or(cfg.sample_cases);
            run(cfg, suite)
        }),
        Command::Demo => demo(),
        Command::Generate {
            normal,
            anomalous,
            seed,
            output,
            manifest,
        } => generate(normal, anomalous, seed, output, manifest),
        Command::ExportTraining {
            count,
            seed,
            output,
        } => export_training(count, seed, output),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<BenchmarkConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            BenchmarkConfig::from_json_file(path)
        }
        None => Ok(BenchmarkConfig::default()),
    }
}

fn run(config: BenchmarkConfig, suite_path: Option<PathBuf>) -> Result<()> {
    let runner = BenchmarkRunner::new(config);

    let suite = match suite_path {
        Some(path) => {
            info!("Loading suite from {}", path.display());
            TestSuite::from_json(path)?
        }
        None => runner.generate_suite()?,
    };

    let report = runner.run(&suite)?;
    let config = runner.config();

    println!("{}", report.summary(config.sample_cases));

    if let Some(path) = &config.output {
        std::fs::write(path, report.to_json()?)?;
        info!("Report written to {}", path.display());
    }

    if let Some(path) = &config.metrics_output {
        let metrics = BenchMetrics::new(&report.predictor)?;
        metrics.update(&report);
        std::fs::write(path, metrics.encode()?)?;
        info!("Metrics written to {}", path.display());
    }

    Ok(())
}

fn demo() -> Result<()> {
    println!("=== Sequence Monitor Demo ===\n");

    for scenario in DEMO_SCENARIOS.iter() {
        let verdicts = run_demo_scenario(scenario, CatalogPredictor::default())?;
        println!("{}", render_demo(scenario, &verdicts));
    }

    Ok(())
}

fn generate(
    normal: usize,
    anomalous: usize,
    seed: Option<u64>,
    output: PathBuf,
    manifest: Option<PathBuf>,
) -> Result<()> {
    let config = BenchmarkConfig::new().with_counts(normal, anomalous);
    let config = match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    };
    let suite = BenchmarkRunner::new(config).generate_suite()?;

    suite.to_json(&output)?;
    info!(
        "Suite written to {} ({} normal, {} anomalous)",
        output.display(),
        suite.normal_count(),
        suite.anomalous_count()
    );

    if let Some(path) = manifest {
        let name = output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "suite".to_string());
        SuiteManifest::from_suite(&name, &suite).to_json_file(&path)?;
        info!("Manifest written to {}", path.display());
    }

    Ok(())
}

fn export_training(count: usize, seed: Option<u64>, output: PathBuf) -> Result<()> {
    let config = match seed {
        Some(seed) => GeneratorConfig::new().with_seed(seed),
        None => GeneratorConfig::new(),
    };
    let sequences = LifecycleSampler::new(&config).sequences(count);

    let written = write_training_jsonl(&training_examples(&sequences), &output)?;
    info!("{} training examples written to {}", written, output.display());

    Ok(())
}
