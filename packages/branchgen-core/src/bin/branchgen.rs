//! branchgen CLI
//!
//! # Usage
//!
//! ```bash
//! # Generate suites into <ROOT>/src/test/kotlin
//! branchgen path/to/project
//!
//! # Exact oracles, fixed seed, print suites as JSON without writing
//! branchgen path/to/project --oracle exact --seed 7 --dry-run --json
//!
//! # YAML configuration (version: 1)
//! branchgen path/to/project --config branchgen.yaml
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use branchgen_core::config::{CombinationPolicy, OracleMode};
use branchgen_core::{BranchgenConfig, GenerationPipeline, Preset, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "branchgen")]
#[command(about = "Branch-coverage JUnit test synthesis for Kotlin sources", long_about = None)]
struct Cli {
    /// Project root to scan for Kotlin sources
    root: PathBuf,

    /// YAML configuration file
    #[arg(short, long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Preset: fast, balanced, thorough
    #[arg(short, long)]
    preset: Option<String>,

    /// Random seed for value synthesis
    #[arg(long)]
    seed: Option<u64>,

    /// Combination policy: exhaustive, outcome-targeted
    #[arg(long)]
    policy: Option<String>,

    /// Oracle mode: heuristic, exact
    #[arg(long)]
    oracle: Option<String>,

    /// Output directory (default: <ROOT>/src/test/kotlin)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run every stage but write nothing
    #[arg(long)]
    dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            if e.is_output_failure() {
                eprintln!("note: suites already written before the failure were left in place");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<BranchgenConfig> {
    let mut config = match (&cli.config, &cli.preset) {
        (Some(path), _) => BranchgenConfig::from_yaml(path)?,
        (None, Some(name)) => BranchgenConfig::preset(Preset::from_str(name)?),
        (None, None) => BranchgenConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config = config.synthesis(|c| c.seed(seed));
    }
    if let Some(policy) = &cli.policy {
        let policy = CombinationPolicy::from_str(policy)?;
        config = config.synthesis(|c| c.policy(policy));
    }
    if let Some(oracle) = &cli.oracle {
        let oracle = OracleMode::from_str(oracle)?;
        config = config.synthesis(|c| c.oracle(oracle));
    }
    if let Some(output) = &cli.output {
        config = config.emission(|e| e.output_dir(output.clone()));
    }
    Ok(config.build()?)
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let pipeline = GenerationPipeline::new(config);

    let report = if cli.dry_run {
        pipeline.dry_run(&cli.root)?
    } else {
        pipeline.run(&cli.root)?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.summary());
    if cli.dry_run {
        println!("Dry run: {} test(s) not written", report.test_count());
    } else {
        println!(
            "Wrote {} suite(s) to {}",
            report.written.len(),
            pipeline.output_dir(&cli.root).display()
        );
    }
    Ok(())
}
