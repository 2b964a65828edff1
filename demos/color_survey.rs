//! Color Survey
//!
//! A terminal front end for the survey state machine. Each line of input
//! answers the current word:
//!
//! - `#RRGGBB` submits that color
//! - an empty line submits the suggested color
//! - `b` goes back one word
//! - `q` quits
//!
//! When the survey completes, results are saved to the artifact directory and
//! compared with the most recent earlier result, if there is one.
//!
//! Run with: cargo run --example color_survey [-- path/to/survey.toml]

use chromasurvey::config::SurveyConfig;
use chromasurvey::core::Color;
use chromasurvey::session::{Completed, Survey};
use chromasurvey::artifact::ArtifactError;
use chromasurvey::ArtifactStore;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

type DemoResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> DemoResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SurveyConfig::from_file(path)?,
        None => SurveyConfig::default(),
    };
    let store = config.store()?;
    let mut survey = Survey::start(config.catalog()?);

    println!("=== Color Survey ===");
    println!("Enter #RRGGBB, empty line to keep the suggestion, 'b' to go back, 'q' to quit.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        survey = match survey {
            Survey::InProgress(mut running) => {
                let progress = running.progress();
                let current = running.current_word();
                let suggested = running.suggested_color();
                print!(
                    "[{:>3.0}%] {} / {} ({suggested}): ",
                    progress.fraction() * 100.0,
                    current.category,
                    current.word
                );
                io::stdout().flush()?;

                let Some(line) = lines.next() else {
                    return Ok(());
                };
                let input = line?.trim().to_string();

                match input.as_str() {
                    "q" => return Ok(()),
                    "b" => {
                        if running.has_previous() {
                            running.retreat()?;
                        } else {
                            println!("  Already at the first word.");
                        }
                        Survey::InProgress(running)
                    }
                    "" => running.submit_and_advance(suggested),
                    _ => {
                        let color = Color::new(input.as_str());
                        if color.is_hex_rgb() {
                            running.submit_and_advance(color)
                        } else {
                            println!("  '{color}' is not a #RRGGBB color.");
                            Survey::InProgress(running)
                        }
                    }
                }
            }
            Survey::Complete(mut done) => {
                finish(&mut done, &store)?;

                print!("\nStart a new survey? [y/N]: ");
                io::stdout().flush()?;
                let answer = match lines.next() {
                    Some(line) => line?,
                    None => return Ok(()),
                };
                if !answer.trim().eq_ignore_ascii_case("y") {
                    return Ok(());
                }
                Survey::from(done).reset()
            }
        };
    }
}

fn finish(done: &mut Completed, store: &ArtifactStore) -> DemoResult<()> {
    println!("\nSurvey complete!");

    if let Some(previous) = store.latest()? {
        let bytes = std::fs::read(store.path_of(&previous))?;
        match done.load_prior(&bytes) {
            Ok(_) => println!("Comparing with {previous}"),
            Err(e) => println!("Could not load {previous}: {e}"),
        }
    }

    let artifact = done.export(store.prefix())?;
    match store.save(&artifact) {
        Ok(path) => println!("Results saved to {}", path.display()),
        Err(e @ ArtifactError::AlreadyExists(_)) => println!("Results not saved: {e}"),
        Err(e) => return Err(e.into()),
    }

    if let Some(rows) = done.compare() {
        let mut category = "";
        for row in &rows {
            if row.category != category {
                println!("\n{}", row.category);
                category = row.category.as_str();
            }
            let marker = if row.is_unchanged() { "=" } else { "*" };
            println!("  {marker} {:<12} now {}  before {}", row.word, row.current, row.prior);
        }
    }

    if let Some(elapsed) = done.history().duration() {
        println!("\nAnswered in {}s", elapsed.as_secs());
    }
    Ok(())
}
