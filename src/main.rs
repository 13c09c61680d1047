//! ergotracker - 4-week 2K erg test training tracker

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ergotracker::client::{ApiClient, DeviceIdStore, TrainingTracker};
use ergotracker::config::{ClientConfig, ServerConfig};
use ergotracker::program;
use ergotracker::tui::App;

#[derive(Parser)]
#[command(name = "ergotracker")]
#[command(author, version, about = "Concept2 4-week 2K erg test training tracker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (and the web UI bundle when present)
    Serve(ServerConfig),

    /// Open TUI dashboard
    Tui(ClientConfig),

    /// Show streak, weekly progress and today's workout
    Status(ClientConfig),

    /// Set the program start date
    Start {
        /// Start date (YYYY-MM-DD), defaults to today
        date: Option<NaiveDate>,

        #[command(flatten)]
        client: ClientConfig,
    },

    /// Mark a program day completed, or un-mark it if already completed
    Toggle {
        /// Program day (1-28)
        day: i64,

        #[command(flatten)]
        client: ClientConfig,
    },

    /// Print the 28-day training program
    Program,
}

/// Server settings taken only from the environment and defaults
#[derive(Parser)]
struct ServeDefaults {
    #[command(flatten)]
    config: ServerConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // The dashboard draws on stdout, so its logs go to a file
    match &cli.command {
        Some(Commands::Tui(client)) => init_logging(Some(&client.log_path()))?,
        _ => init_logging(None)?,
    }

    match cli.command {
        Some(Commands::Serve(config)) => {
            ergotracker::api::serve(&config).await?;
        }

        Some(Commands::Tui(client)) => {
            let tracker = connect(&client)?;
            let mut app = App::new(tracker).await;
            app.run().await?;
        }

        Some(Commands::Status(client)) => {
            let mut tracker = connect(&client)?;
            tracker.load().await;
            print_status(&tracker);
        }

        Some(Commands::Start { date, client }) => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let mut tracker = connect(&client)?;
            if !tracker.set_start_date(date).await {
                bail!("could not save start date (is the server running at {}?)", client.api_url);
            }
            println!("Program starts {}", date.format("%Y-%m-%d"));
        }

        Some(Commands::Toggle { day, client }) => {
            let mut tracker = connect(&client)?;
            tracker.load().await;
            if !tracker.toggle_workout_complete(day).await {
                bail!("could not update day {}", day);
            }
            let state = if tracker.is_workout_completed(day) { "completed" } else { "not completed" };
            println!("Day {}: {}", day, state);
        }

        Some(Commands::Program) => {
            print_program();
        }

        None => {
            // Default: run the server with settings from the environment
            let defaults = ServeDefaults::parse_from(["ergotracker"]);
            ergotracker::api::serve(&defaults.config).await?;
        }
    }

    Ok(())
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(path) = log_file else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
        return Ok(());
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn connect(config: &ClientConfig) -> Result<TrainingTracker> {
    let store = DeviceIdStore::new(&config.state_dir);
    TrainingTracker::with_store(ApiClient::new(&config.api_url), &store)
        .context("loading device id")
}

fn print_status(tracker: &TrainingTracker) {
    let today = Local::now().date_naive();

    let Some(start) = tracker.start_date() else {
        println!("No start date set. Run `ergotracker start [YYYY-MM-DD]`.");
        return;
    };

    println!("2K Erg Training - started {}", start.format("%Y-%m-%d"));
    println!("{:-<40}", "");
    println!("Streak:          {}", tracker.streak(today));
    println!("Total completed: {}", tracker.total_completed());
    println!();

    for stat in tracker.weekly_stats() {
        println!("Week {}: {}/{} required workouts", stat.week, stat.completed, stat.total);
    }
    println!();

    match tracker.current_day(today).and_then(|d| u32::try_from(d).ok()).and_then(program::find_workout) {
        Some(w) => {
            let done = if tracker.is_workout_completed(i64::from(w.day)) { " (done)" } else { "" };
            println!("Today - day {}: {} | {}{}", w.day, w.title, w.description, done);
        }
        None => println!("Today is outside the 28-day program."),
    }
}

fn print_program() {
    for week in 1..=program::PROGRAM_WEEKS {
        println!("Week {}", week);
        println!("{:-<60}", "");
        for w in program::week_workouts(week) {
            let optional = if w.optional { " (optional)" } else { "" };
            println!(
                "{:>2} | {:9} | {}{} | {}",
                w.day,
                w.kind.label(),
                w.title,
                optional,
                w.description
            );
            if let Some(details) = w.details {
                println!("   |           | {}", details);
            }
        }
        println!();
    }
}
