//! Collect CLI - run gesture training sessions from the terminal
//!
//! Commands:
//! - run: play a full prompt session against the wall clock
//! - check: validate a gesture catalog file

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use gesture_trainer::scheduler::{run_session, SessionObserver, SessionScheduler};
use gesture_trainer::types::TrainingEvent;
use gesture_trainer::{GestureCatalog, SessionConfig, TrainError, TRAINER_VERSION};

/// Collect - labeled gesture sample collection sessions
#[derive(Parser)]
#[command(name = "collect")]
#[command(version = TRAINER_VERSION)]
#[command(about = "Run gesture training prompt sessions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a full prompt session against the wall clock
    Run {
        /// Gesture catalog file (falls back to GESTURE_DEF)
        #[arg(short, long)]
        gestures: Option<PathBuf>,

        /// Exclusive upper bound for randomized trial intervals, in
        /// milliseconds (falls back to GESTURE_MAX_WAIT_TIME)
        #[arg(long)]
        max_wait_ms: Option<u64>,

        /// Participant identifier
        #[arg(long)]
        pid: Option<String>,

        /// Times each gesture is prompted
        #[arg(long, default_value = "3")]
        repetitions: u32,

        /// Continuous mode: skip rest pauses between prompts
        #[arg(long)]
        no_rest: bool,

        /// Seed for reproducible shuffles and wait draws
        #[arg(long)]
        seed: Option<u64>,

        /// Print events as JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// Validate a gesture catalog file
    Check {
        /// Gesture catalog file
        #[arg(short, long)]
        gestures: PathBuf,
    },
}

/// Observer printing every update to stdout as it happens
struct StdoutObserver {
    json: bool,
}

impl SessionObserver for StdoutObserver {
    fn on_event(&mut self, event: &TrainingEvent) {
        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("event serialization failed: {e}"),
            }
        } else {
            match &event.label {
                Some(label) => println!("event: {:?} {label}", event.kind),
                None => println!("event: {:?}", event.kind),
            }
        }
    }

    fn on_status(&mut self, status: &str) {
        if !self.json {
            println!("-- {}", status.replace('\n', " "));
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            gestures,
            max_wait_ms,
            pid,
            repetitions,
            no_rest,
            seed,
            json,
        } => cmd_run(gestures, max_wait_ms, pid, repetitions, no_rest, seed, json),
        Commands::Check { gestures } => cmd_check(gestures),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    gestures: Option<PathBuf>,
    max_wait_ms: Option<u64>,
    pid: Option<String>,
    repetitions: u32,
    no_rest: bool,
    seed: Option<u64>,
    json: bool,
) -> Result<(), TrainError> {
    let mut config = match (gestures, max_wait_ms) {
        (Some(path), Some(max_wait_ms)) => SessionConfig::new(path, max_wait_ms)?,
        (None, None) => SessionConfig::from_env()?,
        _ => {
            return Err(TrainError::MissingConfig(
                "--gestures and --max-wait-ms must be given together".to_string(),
            ))
        }
    };
    if let Some(pid) = pid {
        config = config.with_pid(pid);
    }
    config = config
        .with_repetitions(repetitions)
        .with_show_rest(!no_rest);
    config.validate()?;

    let catalog = GestureCatalog::load(&config.gesture_def)?;
    let mut scheduler = match seed {
        Some(seed) => SessionScheduler::with_seed(catalog, &config, seed),
        None => SessionScheduler::new(catalog, &config),
    };

    let mut observer = StdoutObserver { json };
    run_session(&mut scheduler, &mut observer)
}

fn cmd_check(gestures: PathBuf) -> Result<(), TrainError> {
    let catalog = GestureCatalog::load(&gestures)?;
    println!("{} gestures:", catalog.len());
    for entry in catalog.entries() {
        let kind = if entry.is_static() { "static" } else { "dynamic" };
        println!("  {} ({kind})", entry.label);
    }
    Ok(())
}
