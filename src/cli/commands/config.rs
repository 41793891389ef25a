//! Implementation of the `iamgate config` commands.

use anyhow::{Context, Result};
use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::{ConfigCommands, DirArgs};
use crate::domain::models::config::Config;
use crate::infrastructure::config::{config_keys, load_config, ConfigLoader, FieldKind};
use crate::infrastructure::logging;

pub fn execute(command: ConfigCommands, json_mode: bool) -> Result<()> {
    match command {
        ConfigCommands::Show(args) => show(&args, json_mode),
        ConfigCommands::Check(args) => check(&args, json_mode),
        ConfigCommands::Env => list_env(json_mode),
    }
}

/// Load with a stderr bootstrap subscriber, then switch to the configured logging
fn load(dir: &Path) -> Result<Config> {
    let config = tracing::subscriber::with_default(logging::bootstrap_subscriber(), || {
        load_config(dir)
    })
    .with_context(|| format!("Failed to load configuration from {}", dir.display()))?;

    if let Err(err) = logging::init(&config.logging) {
        eprintln!("warning: {err:#}; continuing without configured logging");
    }
    Ok(config)
}

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub directory: PathBuf,
    pub config: Config,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let body = serde_yaml::to_string(&self.config).unwrap_or_default();
        format!("# effective configuration for {}\n{body}", self.directory.display())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn show(args: &DirArgs, json_mode: bool) -> Result<()> {
    let config = load(&args.dir)?;
    tracing::debug!(directory = %args.dir.display(), "showing configuration");

    output(
        &ShowOutput {
            directory: args.dir.clone(),
            config: config.redacted(),
        },
        json_mode,
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub valid: bool,
    pub directory: PathBuf,
    pub app_name: String,
    pub environment: String,
    pub iam_provider: String,
    pub debug: bool,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Configuration in {} is valid.",
            self.directory.display()
        )];
        lines.push(format!("  app:         {}", self.app_name));
        lines.push(format!("  environment: {}", self.environment));
        lines.push(format!("  provider:    {}", self.iam_provider));
        if self.debug {
            lines.push("  debug mode enabled".to_string());
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn check(args: &DirArgs, json_mode: bool) -> Result<()> {
    let config = load(&args.dir)?;

    output(
        &CheckOutput {
            valid: true,
            directory: args.dir.clone(),
            app_name: config.app.name.clone(),
            environment: config.app.environment.clone(),
            iam_provider: config.iam.current_provider(),
            debug: config.is_debug(),
        },
        json_mode,
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct EnvKeyRow {
    pub key: String,
    pub env_var: String,
    pub kind: FieldKind,
    pub set: bool,
}

#[derive(Debug, Serialize)]
pub struct EnvOutput {
    pub keys: Vec<EnvKeyRow>,
}

impl CommandOutput for EnvOutput {
    fn to_human(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Key").add_attribute(Attribute::Bold),
                Cell::new("Environment variable").add_attribute(Attribute::Bold),
                Cell::new("Kind").add_attribute(Attribute::Bold),
                Cell::new("Set").add_attribute(Attribute::Bold),
            ]);

        for row in &self.keys {
            table.add_row(vec![
                Cell::new(&row.key),
                Cell::new(&row.env_var),
                Cell::new(row.kind),
                Cell::new(if row.set { "yes" } else { "" }),
            ]);
        }

        table.to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// One row per config key; empty variables count as unset, as in the loader
fn env_rows<F>(lookup: F) -> Result<Vec<EnvKeyRow>>
where
    F: Fn(&str) -> Option<String>,
{
    let keys = config_keys().context("Failed to enumerate configuration keys")?;
    Ok(keys
        .into_iter()
        .map(|key| {
            let env_var = key.env_var();
            EnvKeyRow {
                set: lookup(&env_var).is_some_and(|value| !value.is_empty()),
                key: key.path,
                env_var,
                kind: key.kind,
            }
        })
        .collect())
}

fn list_env(json_mode: bool) -> Result<()> {
    tracing::subscriber::with_default(logging::bootstrap_subscriber(), || {
        ConfigLoader::new(".").load_env_file();
    });

    let rows = env_rows(|name| env::var(name).ok())?;
    output(&EnvOutput { keys: rows }, json_mode);
    Ok(())
}
