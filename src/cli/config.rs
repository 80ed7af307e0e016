//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::models::PartRegistry;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Default diode package
    #[arg(long, value_name = "NAME")]
    diode: Option<String>,

    /// Default switch mount
    #[arg(long, value_name = "NAME")]
    key_switch: Option<String>,

    /// Center multi-unit switches by default (true or false)
    #[arg(long, value_name = "BOOL")]
    center_switches: Option<bool>,

    /// Validate key order by default (true or false)
    #[arg(long, value_name = "BOOL")]
    validate_order: Option<bool>,

    /// Default output directory for generated scripts
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    path: String,
    #[serde(flatten)]
    config: &'a Config,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => Config::config_file_path()
                .map_err(|e| CliError::io(format!("Failed to locate configuration: {e}")))?,
        };

        match &self.command {
            ConfigCommand::Show(args) => args.execute(&path),
            ConfigCommand::Set(args) => args.execute(&path),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self, path: &Path) -> CliResult<()> {
        let config = load(path)?;

        if self.json {
            let output = ConfigOutput {
                path: path.to_string_lossy().to_string(),
                config: &config,
            };
            let json = serde_json::to_string_pretty(&output).map_err(|e| {
                CliError::io(format!("Failed to serialize configuration to JSON: {e}"))
            })?;
            println!("{json}");
        } else {
            output_human_readable(&config, path);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self, path: &Path) -> CliResult<()> {
        if self.diode.is_none()
            && self.key_switch.is_none()
            && self.center_switches.is_none()
            && self.validate_order.is_none()
            && self.out_dir.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --diode, --key-switch, \
                 --center-switches, --validate-order, or --out-dir",
            ));
        }

        let mut config = load(path)?;

        if let Some(diode) = &self.diode {
            config.defaults.diode.clone_from(diode);
        }
        if let Some(switch) = &self.key_switch {
            config.defaults.switch.clone_from(switch);
        }
        if let Some(center) = self.center_switches {
            config.defaults.center_switches = center;
        }
        if let Some(validate) = self.validate_order {
            config.defaults.validate_order = validate;
        }
        if let Some(dir) = &self.out_dir {
            config.output.dir = Some(dir.clone());
        }

        let registry = PartRegistry::eagle();
        config
            .validate(&registry)
            .map_err(|e| CliError::validation(e.to_string()))?;

        config
            .save_to(path, &registry)
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn load(path: &Path) -> CliResult<Config> {
    Config::load_from(path)
        .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config, path: &Path) {
    println!("Configuration file: {}", path.display());
    println!();
    println!("Defaults:");
    println!("  Diode: {}", config.defaults.diode);
    println!("  Key switch: {}", config.defaults.switch);
    println!("  Center switches: {}", config.defaults.center_switches);
    println!("  Validate order: {}", config.defaults.validate_order);
    println!();
    println!("Output:");
    match &config.output.dir {
        Some(dir) => println!("  Directory: {}", dir.display()),
        None => println!("  Directory: (next to input)"),
    }
}
