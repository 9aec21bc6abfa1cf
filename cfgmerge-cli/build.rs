//! Build script for cfgmerge-cli.
//!
//! Renders the `cfgmerge.1` man page into `OUT_DIR/man` with clap_mangen.
//! Build scripts cannot depend on the crate being built, so the command
//! structure is declared again here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

fn module_dirs() -> Arg {
    Arg::new("MODULE_DIR")
        .help("Module directories (each containing a module.yaml)")
        .num_args(0..)
}

/// Keep in sync with src/cli.rs and src/commands/.
fn build_cli() -> Command {
    Command::new("cfgmerge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Assemble configuration modules into one merged model")
        .long_about(
            "Load module directories, order groups, projects and modules by their \
             dependencies, and merge their definitions into one configuration tree",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format (yaml, json or text)")
                .value_name("FORMAT")
                .global(true)
                .env("CFGMERGE_OUTPUT_FORMAT"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read settings from this file instead of discovering them")
                .value_name("PATH")
                .global(true),
        )
        .subcommands(vec![
            Command::new("build")
                .about("Render the merged configuration tree")
                .arg(module_dirs())
                .arg(
                    Arg::new("path")
                        .long("path")
                        .help("Only render the subtree at this node path")
                        .value_name("NODE_PATH"),
                ),
            Command::new("order")
                .about("Show the build order of groups, projects and modules")
                .arg(module_dirs()),
            Command::new("validate")
                .about("Check that the modules assemble without errors")
                .arg(module_dirs()),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").map_err(std::io::Error::other)?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("cfgmerge.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
