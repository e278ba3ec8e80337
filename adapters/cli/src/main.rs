#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays scripted matches through the rules engine.

mod script;

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use snake_rules_rulesets::stages_for;
use tracing_subscriber::{fmt, EnvFilter};

use crate::script::ReplayScript;

#[derive(Debug, Parser)]
#[command(name = "snake-rules", about = "Deterministic snake rules engine", version)]
struct Cli {
    /// Log filter directive, overriding `RUST_LOG`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replays a JSON match script and prints one JSON board per turn.
    Replay {
        /// Path to the match script.
        file: PathBuf,
    },
    /// Prints the stage order of a game type.
    Stages {
        /// Game type (`standard`, `royale` or `solo`).
        game_type: String,
    },
}

/// Entry point for the snake rules command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Replay { file } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("failed to read match script {}", file.display()))?;
            let script = ReplayScript::from_json(&raw)
                .with_context(|| format!("failed to decode match script {}", file.display()))?;
            let _ = script.replay(&mut out)?;
        }
        Command::Stages { game_type } => {
            for stage in stages_for(&game_type)? {
                writeln!(out, "{stage}")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn init_tracing(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log level {directive:?}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    Ok(())
}
