//! CLI command handlers for klepcb.
//!
//! Each subcommand parses its own arguments and returns a [`CliResult`];
//! `main` turns errors into messages on stderr and the matching exit code.

pub mod common;
pub mod config;
pub mod generate;
pub mod parts;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use generate::GenerateArgs;
pub use parts::PartsArgs;
