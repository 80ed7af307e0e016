//! Generate command: KLE layout to EAGLE scripts.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::export::Scripts;
use crate::models::{Options, PartRegistry};
use crate::services::LayoutService;
use clap::Args;
use std::path::PathBuf;

/// Generate schematic and board scripts from a KLE layout
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Path to KLE download JSON or raw data file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Diode package (see `parts`)
    #[arg(short, long, value_name = "NAME")]
    pub diode: Option<String>,

    /// Switch mount (see `parts`)
    #[arg(short, long, value_name = "NAME")]
    pub key_switch: Option<String>,

    /// Center multi-unit switches on the schematic grid
    #[arg(long)]
    pub center_switches: bool,

    /// Reject layouts whose keys are not in reading order
    #[arg(long)]
    pub validate_order: bool,

    /// Output directory (defaults to the input's directory)
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Print both scripts to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Configuration file to read defaults from
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        let config = match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
        .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;

        let registry = PartRegistry::eagle();
        let options = self.options(&config);

        let layout = LayoutService::load(&self.input, &options, &registry)
            .map_err(|e| CliError::from_anyhow(&e))?;
        let scripts = Scripts::generate(&layout);

        let out_dir = self.out_dir.as_ref().or(config.output.dir.as_ref());
        let paths = LayoutService::script_paths(&self.input, out_dir.map(PathBuf::as_path))
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        if self.stdout {
            println!("# {}", file_name(&paths.schematic));
            print!("{}", scripts.schematic);
            println!("# {}", file_name(&paths.board));
            print!("{}", scripts.board);
            return Ok(());
        }

        LayoutService::write_scripts(&scripts, &paths)
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        println!("Generated {} keys:", layout.keys().len());
        println!("  {}", paths.schematic.display());
        println!("  {}", paths.board.display());
        Ok(())
    }

    /// Merges command-line flags over the configured defaults.
    fn options(&self, config: &Config) -> Options {
        let defaults = config.options();
        Options::new(
            self.diode.as_deref().unwrap_or(&defaults.diode),
            self.key_switch.as_deref().unwrap_or(&defaults.switch),
        )
        .with_center_switches(self.center_switches || defaults.center_switches)
        .with_validate_order(self.validate_order || defaults.validate_order)
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
