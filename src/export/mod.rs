//! EAGLE script export.
//!
//! This module turns a positioned [`Layout`] into the two EAGLE automation
//! scripts: one that draws the switch matrix on the schematic and one that
//! places the footprints on the board. Output is deterministic: the same
//! layout always yields byte-identical scripts.

pub mod board;
pub mod commands;
pub mod schematic;

pub use board::generate_board_script;
pub use commands::{Command, Rotation, Script};
pub use schematic::{generate_schematic_script, NetRouter};

use crate::models::Layout;

/// The pair of scripts generated for one layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scripts {
    /// Schematic script (`<name>-schematic.scr`)
    pub schematic: String,
    /// Board script (`<name>-board.scr`)
    pub board: String,
}

impl Scripts {
    /// Generates both scripts for `layout`.
    #[must_use]
    pub fn generate(layout: &Layout) -> Self {
        Self {
            schematic: generate_schematic_script(layout),
            board: generate_board_script(layout),
        }
    }
}
