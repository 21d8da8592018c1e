//! CLI module for MedAssist
//!
//! Provides subcommands:
//! - `serve`: HTTP API server
//! - `ask`: one-shot triage from the terminal

pub mod ask;
pub mod serve;

use clap::{Parser, Subcommand};

/// MedAssist - symptom triage with a keyword fallback
#[derive(Parser)]
#[command(name = "medassist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Triage a single symptom description and print the answer
    Ask(ask::AskArgs),
}
