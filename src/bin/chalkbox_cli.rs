// ABOUTME: Chalkbox CLI - exercises the training engine from the terminal
// ABOUTME: Format parsing, live timers, score tools, classification, and coach chat
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chalkbox
//!
//! Usage:
//! ```bash
//! # Parse a workout format line
//! chalkbox-cli parse-format "20-minute AMRAP"
//!
//! # Run a live timer in the terminal
//! chalkbox-cli timer "For Time (3-minute cap)"
//!
//! # Score helpers
//! chalkbox-cli format-duration 541
//! chalkbox-cli parse-duration "9:01"
//!
//! # Classify a message (add --llm to allow the Gemini fallback)
//! chalkbox-cli classify "what's a good fran strategy?"
//!
//! # Chat with the coach (requires GEMINI_API_KEY)
//! chalkbox-cli chat
//! ```

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use chalkbox::coach::{self, AppliedCommand, CoachSession, TrainingDomain};
use chalkbox::config::environment::LlmSettings;
use chalkbox::errors::{AppError, AppResult};
use chalkbox::llm::GeminiProvider;
use chalkbox::logging::{self, LoggingConfig};
use chalkbox::scoring::{format_duration, parse_duration};
use chalkbox::store::MemoryStore;
use chalkbox::timer::{parse_format, TimerCue, TimerHandle, TimerKind, TimerPhase};

#[derive(Parser)]
#[command(
    name = "chalkbox-cli",
    about = "Chalkbox training engine CLI",
    long_about = "Command-line harness for the Chalkbox training engine: timer formats, live timers, score tools, and the AI coach."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Parse a workout format line into a timer config
    ParseFormat {
        /// Format line, e.g. "20-minute AMRAP"
        format: String,
    },

    /// Run a live timer for a format line, ticking in the terminal
    Timer {
        /// Format line driving the timer
        format: String,
    },

    /// Format a duration in seconds as M:SS
    FormatDuration {
        /// Duration in seconds
        seconds: u32,
    },

    /// Parse an "M:SS" or plain-seconds string into seconds
    ParseDuration {
        /// Text to parse
        text: String,
    },

    /// Classify a message into training domains
    Classify {
        /// The message to classify
        message: String,

        /// Allow the Gemini fallback when no keyword matches
        #[arg(long)]
        llm: bool,
    },

    /// Hold a coach chat session backed by an in-memory store
    Chat,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let mut config = LoggingConfig::from_env();
        config.level = "debug".into();
        config.init()?;
    } else {
        logging::init_from_env()?;
    }

    match cli.command {
        Command::ParseFormat { format } => {
            print_config(&format);
            Ok(())
        }
        Command::Timer { format } => run_timer(&format).await,
        Command::FormatDuration { seconds } => {
            println!("{}", format_duration(seconds));
            Ok(())
        }
        Command::ParseDuration { text } => {
            println!("{}", parse_duration(&text));
            Ok(())
        }
        Command::Classify { message, llm } => run_classify(&message, llm).await,
        Command::Chat => run_chat().await,
    }
}

fn print_config(format: &str) {
    let config = parse_format(format);
    match config.kind {
        TimerKind::Countdown => println!(
            "countdown from {} ({} seconds)",
            format_duration(config.duration_seconds),
            config.duration_seconds
        ),
        TimerKind::CountUp => {
            let cap = config.cap_seconds.unwrap_or(0);
            println!("count-up to a {} cap ({cap} seconds)", format_duration(cap));
        }
    }
}

async fn run_timer(format: &str) -> AppResult<()> {
    let config = parse_format(format);
    print_config(format);

    let mut handle = TimerHandle::spawn(config);
    handle.start().await?;

    loop {
        tokio::select! {
            update = handle.next_update() => {
                let Some(update) = update else { break };
                for cue in &update.cues {
                    match cue {
                        TimerCue::IntroStep { step } => println!("{step}..."),
                        TimerCue::Go => println!("Go!"),
                        TimerCue::FinishAlarm { .. } => println!("Time!"),
                    }
                }
                if update.phase == TimerPhase::Running && update.cues.is_empty() {
                    println!("{}", format_duration(update.seconds));
                }
                if update.phase == TimerPhase::Complete {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("stopped");
                break;
            }
        }
    }

    handle.stop().await
}

async fn run_classify(message: &str, llm: bool) -> AppResult<()> {
    let settings = LlmSettings::from_env();
    let provider = if llm && settings.is_configured() {
        Some(GeminiProvider::from_settings(&settings)?)
    } else {
        None
    };

    let domains = coach::classify(
        message,
        provider.as_ref().map(|p| p as &dyn chalkbox::llm::LlmProvider),
        settings.timeout,
    )
    .await;

    let names: Vec<&str> = domains.iter().copied().map(TrainingDomain::name).collect();
    println!("{}", names.join(", "));
    Ok(())
}

async fn run_chat() -> AppResult<()> {
    let settings = LlmSettings::from_env();
    if !settings.is_configured() {
        return Err(AppError::config_missing("GEMINI_API_KEY"));
    }

    let provider = Arc::new(GeminiProvider::from_settings(&settings)?);
    let mut session = CoachSession::new(provider, settings);
    let store = MemoryStore::new();
    let user_id = "cli-user";

    info!("coach session started, empty line or \"exit\" to leave");
    println!("Chalk is listening. Ask for a plan, a strategy, or a swap.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(line) = lines
            .next_line()
            .await
            .map_err(|error| AppError::internal(format!("stdin closed: {error}")))?
        else {
            break;
        };
        let text = line.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("exit") {
            break;
        }

        match session.send(text).await {
            Ok(reply) => {
                println!("{}", reply.text);
                if reply.command_count > 0 {
                    report_commands(&mut session, &store, user_id).await?;
                }
            }
            Err(error) => println!("(coach unavailable: {error} - try again)"),
        }
    }

    println!("Chalk out.");
    Ok(())
}

async fn report_commands(
    session: &mut CoachSession,
    store: &MemoryStore,
    user_id: &str,
) -> AppResult<()> {
    let commands = session.take_commands();
    for applied in coach::apply_commands(store, user_id, &commands).await? {
        match applied {
            AppliedCommand::Created { workouts } => {
                for workout in workouts {
                    println!("  [created] {} ({})", workout.title, workout.format);
                }
            }
            AppliedCommand::Deleted { deleted, missing } => {
                println!("  [deleted] {} workout(s)", deleted.len());
                if !missing.is_empty() {
                    println!("  [missing] {}", missing.join(", "));
                }
            }
            AppliedCommand::Proposed { workouts } => {
                for workout in workouts {
                    println!("  [proposed] {}", workout.title);
                }
            }
            AppliedCommand::Skipped { action, reason } => {
                println!("  [skipped] {action}: {reason}");
            }
        }
    }
    Ok(())
}
