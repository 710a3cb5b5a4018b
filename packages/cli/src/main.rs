#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for filtering candidate CSVs by distance.
//!
//! Run without a subcommand for the interactive menu.

mod interactive;

use std::path::{Path, PathBuf};

use candidate_finder_pipeline::{CandidatePipeline, Completion, PipelineConfig, Session};
use clap::{Parser, Subcommand};

/// Directory path used when neither `--directory` nor
/// `CANDIDATE_FINDER_DIRECTORY` is set.
const DEFAULT_DIRECTORY_PATH: &str = "data/coordinates.json";

#[derive(Parser)]
#[command(
    name = "candidate_finder",
    about = "Filter candidate CSVs by distance from a target point"
)]
struct Cli {
    /// Coordinate directory JSON (overrides `CANDIDATE_FINDER_DIRECTORY`)
    #[arg(long, global = true)]
    directory: Option<PathBuf>,
    /// Pipeline configuration TOML
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a candidate CSV and report which locations resolve
    Summary {
        /// Candidate CSV file
        input: PathBuf,
    },
    /// Keep candidates within a radius of a target point and export them
    Filter {
        /// Candidate CSV file
        input: PathBuf,
        /// Target coordinates as "latitude, longitude"
        #[arg(long, allow_hyphen_values = true)]
        target: String,
        /// Maximum distance in miles
        #[arg(long)]
        max_miles: String,
        /// Output file (defaults to the configured export file name)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PipelineConfig::load(path).await?,
        None => PipelineConfig::default(),
    };

    let directory_path = cli.directory.unwrap_or_else(|| {
        std::env::var("CANDIDATE_FINDER_DIRECTORY")
            .map_or_else(|_| PathBuf::from(DEFAULT_DIRECTORY_PATH), PathBuf::from)
    });

    let mut session = Session::new(CandidatePipeline::new(config));

    let Some(command) = cli.command else {
        // The interactive menu reports a missing directory on ingest rather
        // than refusing to start.
        if let Err(e) = load_directory(&mut session, &directory_path).await {
            println!("Error: {e}");
        }
        return interactive::run(&mut session).await;
    };

    load_directory(&mut session, &directory_path).await?;

    match command {
        Commands::Summary { input } => {
            if let Some(summary) = session.open_file(&input).await?.committed() {
                print!("{summary}");
            }
        }
        Commands::Filter {
            input,
            target,
            max_miles,
            output,
        } => {
            if let Some(summary) = session.open_file(&input).await?.committed() {
                print!("{summary}");
            }

            let run = session.pipeline_mut().run_text(&target, &max_miles)?;
            println!();
            print!("{run}");

            let exported = session.pipeline().export()?;
            let output = output.unwrap_or_else(|| PathBuf::from(&exported.file_name));
            tokio::fs::write(&output, &exported.contents).await?;
            println!();
            println!(
                "Exported {} candidates to {}",
                exported.row_count,
                output.display()
            );
        }
    }

    Ok(())
}

async fn load_directory(
    session: &mut Session,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Completion::Committed(entries) = session.load_directory(path).await? {
        log::info!("Coordinate directory ready ({entries} entries)");
    }
    Ok(())
}
