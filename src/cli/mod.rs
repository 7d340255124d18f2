//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the command execution logic.

use crate::{Config, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod commands;
pub mod output;

/// Touch gesture automaton compiler CLI
#[derive(Parser, Debug)]
#[command(name = "gesture-dfa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Reject malformed symbol encodings instead of degrading them
    #[arg(long, global = true)]
    pub strict: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile an NFA definition into a DFA
    Compile {
        /// Definition file (.toml or .json)
        definition: PathBuf,

        /// Output format (defaults to the configured export format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of DFA states (0 for no limit)
        #[arg(long, env = "GESTURE_DFA_MAX_STATES")]
        max_states: Option<usize>,
    },

    /// Export the NFA described by a definition as DOT
    Export {
        /// Definition file (.toml or .json)
        definition: PathBuf,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a structural report of an automaton
    Inspect {
        /// Definition file (.toml or .json)
        definition: PathBuf,

        /// Analyze the compiled DFA instead of the NFA
        #[arg(long)]
        dfa: bool,

        /// Emit JSON instead of a text table
        #[arg(long)]
        json: bool,
    },

    /// Parse symbol encodings and show their components
    Symbol {
        /// Encodings such as D5:red:big
        #[arg(required = true)]
        encodings: Vec<String>,
    },
}

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// DOT format (Graphviz)
    Dot,
    /// JSON output
    Json,
    /// Plain text table
    Table,
}

/// Execute the CLI command
pub fn execute(args: Cli, config: Config) -> Result<()> {
    match args.command {
        Commands::Compile { .. } => commands::compile::execute(args, config),
        Commands::Export { .. } => commands::export::execute(args, config),
        Commands::Inspect { .. } => commands::inspect::execute(args, config),
        Commands::Symbol { .. } => commands::symbol::execute(args, config),
    }
}
