//! Interactive menu for loading a candidate file, running distance filters,
//! and saving the results.
//!
//! Every operation reports its outcome as a status message; errors are
//! printed and the menu continues.

use std::path::PathBuf;

use candidate_finder_pipeline::{PipelineError, Session};
use dialoguer::{Input, Select};

/// Actions available in the interactive menu.
enum Action {
    LoadFile,
    Run,
    Save,
    Help,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[
        Self::LoadFile,
        Self::Run,
        Self::Save,
        Self::Help,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::LoadFile => "Load candidate CSV",
            Self::Run => "Run distance filter",
            Self::Save => "Save filtered candidates",
            Self::Help => "Help",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the menu loop until the user quits.
///
/// # Errors
///
/// Returns an error only if the terminal prompt itself fails.
pub async fn run(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    println!("Candidate Finder");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        let status = match Action::ALL[idx] {
            Action::LoadFile => load_file(session).await?,
            Action::Run => run_filter(session)?,
            Action::Save => save(session).await?,
            Action::Help => Ok(help_text()),
            Action::Quit => return Ok(()),
        };

        match status {
            Ok(text) => println!("{text}"),
            Err(e) => println!("Error: {e}"),
        }
        println!();
    }
}

type Status = Result<String, PipelineError>;

async fn load_file(session: &mut Session) -> Result<Status, Box<dyn std::error::Error>> {
    let path: String = Input::new()
        .with_prompt("Path to candidate CSV")
        .interact_text()?;

    let status = session
        .open_file(&PathBuf::from(path.trim()))
        .await
        .map(|completion| {
            completion
                .committed()
                .map_or_else(String::new, |summary| summary.to_string())
        });

    Ok(status)
}

fn run_filter(session: &mut Session) -> Result<Status, Box<dyn std::error::Error>> {
    let target: String = Input::new()
        .with_prompt("Target coordinates (latitude, longitude)")
        .allow_empty(true)
        .interact_text()?;
    let max_miles: String = Input::new()
        .with_prompt("Maximum distance (miles)")
        .allow_empty(true)
        .interact_text()?;

    let status = session
        .pipeline_mut()
        .run_text(&target, &max_miles)
        .map(|summary| summary.to_string());

    Ok(status)
}

async fn save(session: &Session) -> Result<Status, Box<dyn std::error::Error>> {
    let exported = match session.pipeline().export() {
        Ok(exported) => exported,
        Err(e) => return Ok(Err(e)),
    };

    let path: String = Input::new()
        .with_prompt("Save as")
        .default(exported.file_name.clone())
        .interact_text()?;

    let path = PathBuf::from(path.trim());
    if let Err(source) = tokio::fs::write(&path, &exported.contents).await {
        return Ok(Err(PipelineError::Write { path, source }));
    }

    log::info!("Wrote {} rows to {}", exported.row_count, path.display());
    Ok(Ok(exported.status()))
}

fn help_text() -> String {
    [
        "Load a CSV file with candidate data. The file should have either \"city\" and",
        "\"state\" columns, or a single \"address\" column.",
        "",
        "Enter the target coordinates as latitude, longitude (e.g., \"40.7128, -74.0060\"",
        "for New York City) and the maximum distance in miles.",
    ]
    .join("\n")
}
