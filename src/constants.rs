//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the environment it reads.

/// The display name of the application.
pub const APP_NAME: &str = "KLE to EAGLE";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "klepcb";

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "klepcb";

/// Environment variable holding the log filter (e.g. `debug`, `klepcb=trace`).
pub const LOG_ENV_VAR: &str = "KLEPCB_LOG";
