//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{BuildCommand, OrderCommand, ValidateCommand};
use cfgmerge::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for assembling hierarchical configuration models.
#[derive(Parser)]
#[command(name = "cfgmerge")]
#[command(
    version,
    about = "Assemble configuration modules into one merged model",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Output format (yaml, json or text)
    #[arg(
        long,
        value_name = "FORMAT",
        global = true,
        env = "CFGMERGE_OUTPUT_FORMAT"
    )]
    pub format: Option<OutputFormat>,

    /// Read settings from this file instead of discovering them
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Render the merged configuration tree
    Build(BuildCommand),

    /// Show the build order of groups, projects and modules
    Order(OrderCommand),

    /// Check that the modules assemble without errors
    Validate(ValidateCommand),
}
