//! Parts command: lists the diodes and switch mounts that can be selected.

use crate::cli::common::{CliError, CliResult};
use crate::export::schematic::switch_part;
use crate::models::{Footprint, PartRegistry};
use clap::Args;

/// List available diodes and key switch mounts
#[derive(Debug, Clone, Args)]
pub struct PartsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl PartsArgs {
    /// Execute the parts command
    pub fn execute(&self) -> CliResult<()> {
        let registry = PartRegistry::eagle();

        if self.json {
            let json = serde_json::to_string_pretty(&registry)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{json}");
            return Ok(());
        }

        println!("Diodes:");
        for entry in registry.diodes() {
            println!("  {:<10} {}", entry.name, entry.part);
        }

        println!();
        println!("Key switches:");
        let unit = Footprint {
            size: 1.0,
            rotated: false,
        };
        for entry in registry.switches() {
            println!("  {:<10} {}", entry.name, switch_part(&entry.part, &unit));
        }

        Ok(())
    }
}
