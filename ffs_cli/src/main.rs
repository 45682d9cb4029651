//! # Pipeline FFS CLI
//!
//! Command-line shell over `ffs_core`: reads one or more named pipe segment
//! records from a JSON file, runs the assessment for each and prints a text
//! report or the raw JSON results.

mod config;
mod report;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::info;

use ffs_core::calculations::envelope_curves;
use ffs_core::{PipeSegmentInput, Session};

use crate::config::Config;

/// Corrosion fitness-for-service screening for pipeline segments
#[derive(Parser)]
#[command(name = "ffs", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Display settings file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess every dataset in an input file
    Analyze {
        /// Input file with named datasets (JSON)
        input: PathBuf,

        /// Only assess the dataset with this name
        #[arg(short, long)]
        dataset: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assess the built-in example segment
    Demo {
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print an input file template
    Template,

    /// Print the effective display settings as TOML
    Settings,

    /// Print fatigue diagram envelopes and operating points as CSV
    Envelope {
        /// Input file with named datasets (JSON)
        input: PathBuf,

        /// Samples per envelope curve
        #[arg(short, long, default_value_t = 100)]
        samples: usize,
    },
}

/// Input file layout.
#[derive(Debug, Serialize, Deserialize)]
struct InputFile {
    datasets: Vec<NamedInput>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NamedInput {
    name: String,
    input: PipeSegmentInput,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze { input, dataset, json } => {
            let session = load_session(&input, dataset.as_deref())?;
            print_session(&session, &config, json)?;
        }
        Commands::Demo { json } => {
            let mut session = Session::new("");
            let id = session.add_dataset("Demo segment")?;
            session.set_input(&id, PipeSegmentInput::default())?;
            session.run(&id)?;
            print_session(&session, &config, json)?;
        }
        Commands::Template => {
            let template = InputFile {
                datasets: vec![NamedInput {
                    name: "Dataset 1".to_string(),
                    input: PipeSegmentInput::default(),
                }],
            };
            println!("{}", serde_json::to_string_pretty(&template)?);
        }
        Commands::Settings => {
            print!("{}", config.to_toml()?);
        }
        Commands::Envelope { input, samples } => {
            let session = load_session(&input, None)?;
            let Some(first) = session.datasets.iter().find_map(|d| d.report.as_ref()) else {
                bail!("no dataset in {} produced results", input.display());
            };
            // Envelopes depend only on material data; take them from the first dataset
            let curves = envelope_curves(
                &first.stresses,
                first.input.uts_mpa,
                first.input.yield_stress_mpa,
                samples,
            );
            print!("{}", report::render_envelopes(&curves, &session.operating_points()));
        }
    }

    Ok(())
}

/// Read an input file into a session and run every dataset.
fn load_session(path: &Path, only: Option<&str>) -> Result<Session> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let file: InputFile =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;

    let mut session = Session::new("");
    for named in file.datasets {
        if only.is_some_and(|name| name != named.name) {
            continue;
        }
        let id = session.add_dataset(named.name)?;
        session.set_input(&id, named.input)?;
    }

    if session.dataset_count() == 0 {
        match only {
            Some(name) => bail!("dataset '{}' not found in {}", name, path.display()),
            None => bail!("{} contains no datasets", path.display()),
        }
    }

    let count = session
        .run_all()
        .map_err(|(name, err)| anyhow::anyhow!("dataset '{}': {}", name, err))?;
    info!(count, "datasets assessed");
    Ok(session)
}

fn print_session(session: &Session, config: &Config, json: bool) -> Result<()> {
    if json {
        println!("{}", session.to_json()?);
        return Ok(());
    }
    for dataset in &session.datasets {
        if let Some(report) = &dataset.report {
            println!("{}", report::render(&dataset.name, report, config));
        }
    }
    Ok(())
}
