//! Command-line interface for inspecting iamgate configuration.

#![allow(missing_docs)]

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands, ConfigCommands, DirArgs};

use anyhow::Result;

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Config(command) => commands::config::execute(command, cli.json),
    }
}

/// Print `err` with its cause chain and exit with status 1
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let causes: Vec<String> = err.chain().map(ToString::to_string).collect();
        let body = serde_json::json!({ "error": err.to_string(), "causes": causes });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1)
}
