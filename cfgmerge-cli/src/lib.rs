//! Library surface of the cfgmerge CLI.
//!
//! Exposes the argument structure and command implementations so the binary
//! stays a thin dispatcher.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
