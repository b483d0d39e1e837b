// ABOUTME: Liftlog CLI - command-line client for the training log
// ABOUTME: Handles registration, set logging, history browsing, and progress views
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//!
//! Usage:
//! ```bash
//! # Create an account
//! liftlog-cli -u ada -p hunter2 register
//!
//! # Log a set (set number defaults to the next free ordinal today)
//! liftlog-cli -u ada -p hunter2 add --exercise "Barbell Squat" --weight 100 --reps 10 --rir 2
//!
//! # Today's sets, history, and progress
//! liftlog-cli -u ada -p hunter2 today
//! liftlog-cli -u ada -p hunter2 history "Barbell Squat"
//! liftlog-cli -u ada -p hunter2 progress "Barbell Squat"
//!
//! # Run against local files instead of the backend
//! liftlog-cli --local -u ada add --exercise Dips --weight 20 --reps 8
//! ```

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use liftlog::logging::LoggingConfig;
use liftlog::sources::{ExerciseDataSource, LocalSource, RestSource};
use liftlog::store::SessionStore;
use liftlog_core::models::{SetDraft, SetRecord};
use std::env;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "liftlog-cli",
    about = "Liftlog training log CLI",
    long_about = "Command-line client for the liftlog training log: register, log sets, browse history, and view progress."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Username (falls back to LIFTLOG_USER)
    #[arg(long, short = 'u', global = true)]
    username: Option<String>,

    /// Password (falls back to LIFTLOG_PASSWORD)
    #[arg(long, short = 'p', global = true)]
    password: Option<String>,

    /// Use the local file store instead of the REST backend
    #[arg(long, global = true)]
    local: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Create an account
    Register,

    /// Log one set
    Add {
        /// Exercise name
        #[arg(long, short = 'e')]
        exercise: String,

        /// Load in kg
        #[arg(long, short = 'w')]
        weight: f64,

        /// Repetitions completed
        #[arg(long, short = 'r')]
        reps: u32,

        /// Set ordinal; defaults to the next free ordinal for the day
        #[arg(long, short = 's')]
        set: Option<u32>,

        /// Reps in reserve
        #[arg(long)]
        rir: Option<u32>,

        /// Date override (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show today's sets grouped by exercise
    Today,

    /// Show the full history for one exercise
    History {
        /// Exercise name
        exercise: String,
    },

    /// Show the per-session progress series for one exercise
    Progress {
        /// Exercise name
        exercise: String,
    },

    /// List all known exercise names
    Exercises,

    /// Show collection-wide training stats
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let source: Arc<dyn ExerciseDataSource> = if cli.local {
        Arc::new(LocalSource::new())
    } else {
        Arc::new(RestSource::new())
    };
    let store = SessionStore::new(source);

    let username = credential(cli.username, "LIFTLOG_USER", "username")?;
    let password = credential(cli.password, "LIFTLOG_PASSWORD", "password").unwrap_or_default();

    if let Command::Register = cli.command {
        store.register(&username, &password).await?;
        println!("registered '{username}'");
        return Ok(());
    }

    if !store.login(&username, &password).await? {
        bail!("invalid username or password");
    }

    match cli.command {
        Command::Register => unreachable!("handled before login"),
        Command::Add {
            exercise,
            weight,
            reps,
            set,
            rir,
            date,
        } => {
            let day = date.unwrap_or_else(|| Local::now().date_naive());
            let set = set.unwrap_or_else(|| store.next_set_number(&exercise, day));
            store
                .add_set(SetDraft {
                    exercise: exercise.clone(),
                    set,
                    weight,
                    reps,
                    rir,
                    date,
                })
                .await?;
            println!("logged {exercise} set {set}: {weight}kg x {reps}");
        }
        Command::Today => {
            let records = store.fetch_today().await?;
            if records.is_empty() {
                println!("no sets logged today");
            } else {
                print_sets(&records);
            }
        }
        Command::History { exercise } => {
            let history = store.history_for(&exercise);
            if history.is_empty() {
                println!("no recorded sets for '{exercise}'");
            } else {
                print_sets(&history);
            }
        }
        Command::Progress { exercise } => {
            for point in store.progress_for(&exercise) {
                println!(
                    "{:>6}  max {:>7.1}kg  volume {:>9.1}  avg reps {:>4.1}  sets {}",
                    point.date_formatted,
                    point.max_weight,
                    point.total_volume,
                    point.avg_reps,
                    point.sets
                );
            }
        }
        Command::Exercises => {
            for name in store.exercise_names() {
                println!("{name}");
            }
        }
        Command::Summary => {
            let summary = store.training_summary();
            println!("exercises:      {}", summary.exercises);
            println!("sessions:       {}", summary.sessions);
            println!("latest volume:  {:.1}kg", summary.latest_volume);
        }
    }

    Ok(())
}

fn credential(arg: Option<String>, env_var: &str, what: &str) -> Result<String> {
    if let Some(value) = arg {
        return Ok(value);
    }
    match env::var(env_var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => bail!("missing {what}: pass it as a flag or set {env_var}"),
    }
}

fn print_sets(records: &[SetRecord]) {
    for record in records {
        let date = record
            .date
            .map_or_else(|| "????-??-??".to_owned(), |d| d.to_string());
        let rir = record
            .rir
            .map_or_else(String::new, |r| format!(", RIR {r}"));
        println!(
            "{date}  {:<28} set {}  {:>6.1}kg x {}{rir}",
            record.exercise, record.set, record.weight, record.reps
        );
    }
}
