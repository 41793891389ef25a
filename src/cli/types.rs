//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "iamgate")]
#[command(about = "iamgate - IAM gateway configuration tools", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configuration inspection commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration (secrets redacted)
    Show(DirArgs),

    /// Load the configuration and report whether it is usable
    Check(DirArgs),

    /// List every config key with the environment variable that overrides it
    Env,
}

#[derive(Args, Debug)]
pub struct DirArgs {
    /// Directory containing config.yaml
    #[arg(short, long, env = "IAMGATE_CONFIG_DIR", default_value = ".")]
    pub dir: PathBuf,
}
