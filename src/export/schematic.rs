//! Schematic script: switch and diode symbols plus the row/column matrix.
//!
//! Rows run through the diodes, columns through the switches. Each net is
//! routed key by key: the first key of a row/column gets a net label, every
//! later key is wired back to the previous member with orthogonal segments.

use std::collections::HashMap;

use crate::models::{Footprint, Layout, Point, PositionedKey};

use super::commands::{Command, Rotation, Script};

/// Grid and wiring setup at the top of the schematic script.
pub const SCHEMATIC_PREAMBLE: [&str; 4] = [
    "GRID ON",
    "GRID IN 0.1 1",
    "GRID ALT IN 0.01",
    "SET WIRE_BEND 2",
];

/// Commands closing the schematic script.
pub const SCHEMATIC_TRAILER: [&str; 1] = ["WINDOW FIT"];

/// Distance from the diode centre to either terminal.
const DIODE_HALF_LENGTH: f64 = 0.2;

/// Half the switch symbol width.
const SWITCH_HALF_WIDTH: f64 = 0.3;

/// Gap between the switch symbol and its column conductor.
const COLUMN_CLEARANCE: f64 = 0.1;

/// Length of the stub leaving each diode's lower terminal.
const DIODE_TAIL: f64 = 0.1;

/// Name of the switch device for a footprint.
#[must_use]
pub fn switch_part(switch: &str, footprint: &Footprint) -> String {
    format!("KEYSWITCH-PLAIN-{switch}-{footprint}")
}

/// Generates the complete schematic script for `layout`.
#[must_use]
pub fn generate_schematic_script(layout: &Layout) -> String {
    let mut script = Script::new();
    script.push_raw(&SCHEMATIC_PREAMBLE);

    for key in layout.keys() {
        script.push(&Command::Add {
            part: switch_part(layout.switch(), &key.footprint),
            name: key.label.clone(),
            rotation: None,
            at: key.switch_schematic,
        });
    }

    for key in layout.keys() {
        script.push(&Command::Add {
            part: layout.diode().to_string(),
            name: key.diode_label(),
            rotation: Some(Rotation::R90),
            at: key.diode_schematic,
        });
    }

    let mut router = NetRouter::new();
    for key in layout.keys() {
        for command in router.route(key) {
            script.push(&command);
        }
    }

    for label in router.into_labels() {
        script.push(&label);
    }

    script.push_raw(&SCHEMATIC_TRAILER);
    script.finish()
}

/// Run-scoped matrix bookkeeping: last diode per row, last switch per column.
#[derive(Debug, Default)]
pub struct NetRouter {
    rows: HashMap<u32, Point>,
    cols: HashMap<u32, Point>,
    labels: Vec<Command>,
}

impl NetRouter {
    /// Creates a router with no rows or columns seen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the net segments for `key` and records it as the latest
    /// member of its row and column.
    pub fn route(&mut self, key: &PositionedKey) -> Vec<Command> {
        let mut commands = Vec::new();

        self.route_row(key, &mut commands);
        self.route_col(key, &mut commands);

        let diode = key.diode_schematic;
        commands.push(Command::Net {
            name: None,
            from: diode.offset(0.0, -DIODE_HALF_LENGTH),
            to: diode.offset(0.0, -DIODE_HALF_LENGTH - DIODE_TAIL),
        });

        commands
    }

    /// Net labels for every first-seen row and column, in visiting order.
    #[must_use]
    pub fn into_labels(self) -> Vec<Command> {
        self.labels
    }

    fn route_row(&mut self, key: &PositionedKey, commands: &mut Vec<Command>) {
        let diode = key.diode_schematic;

        let Some(previous) = self.rows.insert(key.row, diode) else {
            let terminal = diode.offset(0.0, DIODE_HALF_LENGTH);
            self.labels.push(Command::Label {
                net: terminal,
                rotation: Rotation::R0,
                at: terminal.offset(0.0, 0.1),
            });
            return;
        };

        let name = format!("ROW{}", key.row);
        let current = diode.offset(0.0, DIODE_HALF_LENGTH);
        let last = previous.offset(0.0, DIODE_HALF_LENGTH);

        if last.y == current.y {
            commands.push(Command::net(name, current, last));
        } else {
            // Jog along the previous diode's height, then drop to this one
            let corner = Point::new(current.x, last.y);
            commands.push(Command::net(name.clone(), corner, last));
            commands.push(Command::net(name, corner, current));
        }
    }

    fn route_col(&mut self, key: &PositionedKey, commands: &mut Vec<Command>) {
        let switch = key.switch_schematic;

        let Some(previous) = self.cols.insert(key.col, switch) else {
            let conductor = switch.offset(-SWITCH_HALF_WIDTH - COLUMN_CLEARANCE, 0.0);
            self.labels.push(Command::Label {
                net: conductor,
                rotation: Rotation::R270,
                at: conductor.offset(-0.1, 0.0),
            });
            return;
        };

        let name = format!("COL{}", key.col);
        let current = column_anchor(switch);
        let last = column_anchor(previous);

        if last.x == current.x {
            commands.push(Command::net(name, current, last));
        } else {
            // Run down the previous switch's conductor, then across to this one
            let corner = Point::new(last.x, current.y);
            commands.push(Command::net(name.clone(), corner, last));
            commands.push(Command::net(name, corner, current));
        }
    }
}

/// Column conductor attachment point left of a switch symbol.
fn column_anchor(switch: Point) -> Point {
    switch.offset(-SWITCH_HALF_WIDTH - COLUMN_CLEARANCE, 0.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResolvedParts;

    fn positioned(label: &str, row: u32, col: u32, switch: Point) -> PositionedKey {
        PositionedKey {
            label: label.to_string(),
            row,
            col,
            footprint: Footprint {
                size: 1.0,
                rotated: false,
            },
            switch_schematic: switch,
            diode_schematic: switch.offset(0.1, 0.7),
            switch_board: Point::default(),
            diode_board: Point::default(),
        }
    }

    fn layout(keys: Vec<PositionedKey>) -> Layout {
        Layout::new(
            keys,
            ResolvedParts {
                diode: "DIODE-DO-35".to_string(),
                switch: "MX".to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_first_key_only_labels() {
        let mut router = NetRouter::new();
        let commands = router.route(&positioned("A", 1, 1, Point::new(0.0, 0.0)));

        // Only the diode tail stub
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].to_string(), "NET (0.10 0.50) (0.10 0.40)");

        let labels: Vec<String> = router.into_labels().iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            vec![
                "LABEL (0.10 0.90) R0 (0.10 1.00)",
                "LABEL (-0.40 0.00) R270 (-0.50 0.00)",
            ]
        );
    }

    #[test]
    fn test_row_net_straight_segment() {
        let mut router = NetRouter::new();
        router.route(&positioned("Q", 1, 1, Point::new(0.0, 0.0)));
        let commands = router.route(&positioned("W", 1, 2, Point::new(1.0, 0.0)));

        let text: Vec<String> = commands.iter().map(ToString::to_string).collect();
        assert_eq!(
            text,
            vec![
                "NET ROW1 (1.10 0.90) (0.10 0.90)",
                "NET (1.10 0.50) (1.10 0.40)",
            ]
        );
    }

    #[test]
    fn test_row_net_jogs_between_heights() {
        let mut router = NetRouter::new();
        router.route(&positioned("A", 1, 1, Point::new(0.0, 0.0)));
        let commands = router.route(&positioned("B", 1, 2, Point::new(1.0, -0.5)));

        let text: Vec<String> = commands.iter().map(ToString::to_string).collect();
        assert_eq!(
            text,
            vec![
                "NET ROW1 (1.10 0.90) (0.10 0.90)",
                "NET ROW1 (1.10 0.90) (1.10 0.40)",
                "NET (1.10 0.00) (1.10 -0.10)",
            ]
        );
    }

    #[test]
    fn test_column_net_vertical_segment() {
        let mut router = NetRouter::new();
        router.route(&positioned("Q", 1, 1, Point::new(0.0, 0.0)));
        let commands = router.route(&positioned("A", 2, 1, Point::new(0.0, -1.7)));

        let text: Vec<String> = commands.iter().map(ToString::to_string).collect();
        assert_eq!(
            text,
            vec![
                "NET COL1 (-0.40 -1.60) (-0.40 0.10)",
                "NET (0.10 -1.20) (0.10 -1.30)",
            ]
        );
    }

    #[test]
    fn test_column_net_jogs_between_offsets() {
        let mut router = NetRouter::new();
        router.route(&positioned("Q", 1, 1, Point::new(0.0, 0.0)));
        let commands = router.route(&positioned("A", 2, 1, Point::new(0.3, -1.7)));

        let text: Vec<String> = commands.iter().map(ToString::to_string).collect();
        assert_eq!(
            text,
            vec![
                "NET COL1 (-0.40 -1.60) (-0.40 0.10)",
                "NET COL1 (-0.40 -1.60) (-0.10 -1.60)",
                "NET (0.40 -1.20) (0.40 -1.30)",
            ]
        );
    }

    #[test]
    fn test_switch_part_name() {
        let key = positioned("SPACE", 1, 1, Point::default());
        assert_eq!(switch_part("MX", &key.footprint), "KEYSWITCH-PLAIN-MX-1U");

        let rotated = Footprint {
            size: 2.0,
            rotated: true,
        };
        assert_eq!(switch_part("CHOC", &rotated), "KEYSWITCH-PLAIN-CHOC-2U-ROTATED");
    }

    #[test]
    fn test_schematic_script_order() {
        let script = generate_schematic_script(&layout(vec![
            positioned("Q", 1, 1, Point::new(0.0, 0.0)),
            positioned("W", 1, 2, Point::new(1.0, 0.0)),
        ]));

        let expected = "\
GRID ON;
GRID IN 0.1 1;
GRID ALT IN 0.01;
SET WIRE_BEND 2;
ADD KEYSWITCH-PLAIN-MX-1U Q (0.00 0.00);
ADD KEYSWITCH-PLAIN-MX-1U W (1.00 0.00);
ADD DIODE-DO-35 DQ R90 (0.10 0.70);
ADD DIODE-DO-35 DW R90 (1.10 0.70);
NET (0.10 0.50) (0.10 0.40);
NET ROW1 (1.10 0.90) (0.10 0.90);
NET (1.10 0.50) (1.10 0.40);
LABEL (0.10 0.90) R0 (0.10 1.00);
LABEL (-0.40 0.00) R270 (-0.50 0.00);
LABEL (0.60 0.00) R270 (0.50 0.00);
WINDOW FIT;
";
        assert_eq!(script, expected);
    }
}
