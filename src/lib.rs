//! KLE to EAGLE Library
//!
//! This library converts keyboard-layout-editor.com layouts into EAGLE
//! automation scripts: one that draws the switch matrix schematic and one
//! that places the switch and diode footprints on the board.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod models;
pub mod parser;
pub mod services;
