//! Main entry point for the cfgmerge CLI.
//!
//! Assembles module directories into a configuration model and prints it:
//! - `build`: Render the merged configuration tree (or a subtree)
//! - `order`: Show the build order of groups, projects and modules
//! - `validate`: Check that the modules assemble without errors

use cfgmerge_cli::cli::{Cli, Command};
use cfgmerge_cli::utils::GlobalOptions;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    // Warnings raised while merging go to stderr through this logger
    let _level = cfgmerge::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        format: cli.format,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Build(cmd) => cmd.execute(&global),
        Command::Order(cmd) => cmd.execute(&global),
        Command::Validate(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
