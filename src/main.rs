//! KLE to EAGLE - keyboard layout to schematic and board scripts
//!
//! Reads a keyboard-layout-editor.com layout and writes the EAGLE scripts
//! that draw its switch matrix and place its footprints.

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use klepcb::cli::{ConfigArgs, GenerateArgs, PartsArgs};
use klepcb::constants::{APP_BINARY_NAME, APP_NAME, LOG_ENV_VAR};

/// KLE to EAGLE - generate keyboard PCB scripts from a KLE layout
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate schematic and board scripts from a layout
    Generate(GenerateArgs),
    /// List available diodes and key switch mounts
    Parts(PartsArgs),
    /// Manage default options
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let result = match &cli.command {
        Commands::Generate(args) => args.execute(),
        Commands::Parts(args) => args.execute(),
        Commands::Config(args) => args.execute(),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err.message);
        std::process::exit(err.code.code());
    }
}

/// Logs go to stderr so `generate --stdout` output stays a clean script.
fn init_tracing(verbose: bool) {
    let filter = if verbose { "klepcb=debug" } else { "klepcb=info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
