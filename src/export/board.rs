//! Board script: moves the switch and diode footprints into place.
//!
//! Nets on the board come from the schematic, so this script only places
//! parts and refreshes the airwires.

use crate::models::Layout;

use super::commands::{Command, Rotation, Script};

/// Grid setup at the top of the board script (1/24 of the key pitch).
pub const BOARD_PREAMBLE: [&str; 3] = ["GRID ON", "GRID MM 0.79375 24", "GRID ALT MM .1"];

/// Commands closing the board script.
pub const BOARD_TRAILER: [&str; 2] = ["RATSNEST", "WINDOW FIT"];

/// Generates the complete board script for `layout`.
#[must_use]
pub fn generate_board_script(layout: &Layout) -> String {
    let mut script = Script::new();
    script.push_raw(&BOARD_PREAMBLE);

    // Switches are mounted from the back of the plate
    for key in layout.keys() {
        script.push(&Command::Rotate {
            rotation: Rotation::R0,
            name: key.label.clone(),
        });
        script.push(&Command::Mirror {
            name: key.label.clone(),
        });
        script.push(&Command::Move {
            name: key.label.clone(),
            to: key.switch_board,
        });
    }

    for key in layout.keys() {
        let name = key.diode_label();
        script.push(&Command::Rotate {
            rotation: Rotation::R90,
            name: name.clone(),
        });
        script.push(&Command::Move {
            name,
            to: key.diode_board,
        });
    }

    script.push_raw(&BOARD_TRAILER);
    script.finish()
}
