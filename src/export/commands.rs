//! EAGLE script command formatting.
//!
//! Commands render without the trailing `;`; [`Script`] adds it when a
//! command is appended. Coordinates always carry exactly two decimals.

use std::fmt;

use crate::models::Point;

/// Absolute rotation applied to a part or label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// 0 degrees
    R0,
    /// 90 degrees
    R90,
    /// 180 degrees
    R180,
    /// 270 degrees
    R270,
}

impl Rotation {
    /// Rotation in whole degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.degrees())
    }
}

/// A point rendered as `(x y)` with two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords(pub Point);

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2} {:.2})", unsigned_zero(self.0.x), unsigned_zero(self.0.y))
    }
}

/// Maps values that would print as `-0.00` to positive zero.
fn unsigned_zero(value: f64) -> f64 {
    if value.abs() < 0.005 {
        0.0
    } else {
        value
    }
}

/// One EAGLE script command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fixed command text (grid and option preambles, trailers)
    Raw(&'static str),
    /// `ADD <part> <name> [R<rot>] (<x> <y>)`
    Add {
        /// Library part (device) name
        part: String,
        /// Reference designator
        name: String,
        /// Optional placement rotation
        rotation: Option<Rotation>,
        /// Placement position
        at: Point,
    },
    /// `ROTATE =R<rot> <name>`
    Rotate {
        /// Absolute rotation
        rotation: Rotation,
        /// Reference designator
        name: String,
    },
    /// `MIRROR <name>`
    Mirror {
        /// Reference designator
        name: String,
    },
    /// `MOVE <name> (<x> <y>)`
    Move {
        /// Reference designator
        name: String,
        /// Target position
        to: Point,
    },
    /// `NET [<name>] (<x1> <y1>) (<x2> <y2>)`
    Net {
        /// Net name, or an auto-named net when `None`
        name: Option<String>,
        /// Segment start
        from: Point,
        /// Segment end
        to: Point,
    },
    /// `LABEL (<x> <y>) R<rot> (<x> <y>)`
    Label {
        /// Point on the net being labelled
        net: Point,
        /// Label rotation
        rotation: Rotation,
        /// Label text position
        at: Point,
    },
}

impl Command {
    /// Named net segment.
    pub fn net(name: impl Into<String>, from: Point, to: Point) -> Self {
        Self::Net {
            name: Some(name.into()),
            from,
            to,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(text) => write!(f, "{text}"),
            Self::Add {
                part,
                name,
                rotation,
                at,
            } => {
                write!(f, "ADD {part} {name} ")?;
                if let Some(rotation) = rotation {
                    write!(f, "{rotation} ")?;
                }
                write!(f, "{}", Coords(*at))
            }
            Self::Rotate { rotation, name } => write!(f, "ROTATE ={rotation} {name}"),
            Self::Mirror { name } => write!(f, "MIRROR {name}"),
            Self::Move { name, to } => write!(f, "MOVE {name} {}", Coords(*to)),
            Self::Net { name, from, to } => {
                write!(f, "NET ")?;
                if let Some(name) = name {
                    write!(f, "{name} ")?;
                }
                write!(f, "{} {}", Coords(*from), Coords(*to))
            }
            Self::Label { net, rotation, at } => {
                write!(f, "LABEL {} {rotation} {}", Coords(*net), Coords(*at))
            }
        }
    }
}

/// Newline-delimited EAGLE script under construction.
#[derive(Debug, Default)]
pub struct Script {
    lines: Vec<String>,
}

impl Script {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command terminated by `;`.
    pub fn push(&mut self, command: &Command) {
        self.lines.push(format!("{command};"));
    }

    /// Appends several fixed commands.
    pub fn push_raw(&mut self, commands: &[&'static str]) {
        for command in commands {
            self.push(&Command::Raw(command));
        }
    }

    /// Renders the script, one command per line.
    #[must_use]
    pub fn finish(self) -> String {
        let mut output = self.lines.join("\n");
        output.push('\n');
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords_two_decimals() {
        assert_eq!(Coords(Point::new(0.1, 0.7)).to_string(), "(0.10 0.70)");
        assert_eq!(Coords(Point::new(57.15, -38.1)).to_string(), "(57.15 -38.10)");
    }

    #[test]
    fn test_coords_no_negative_zero() {
        assert_eq!(Coords(Point::new(-0.0, -0.0)).to_string(), "(0.00 0.00)");
        assert_eq!(Coords(Point::new(-0.001, 2.0)).to_string(), "(0.00 2.00)");
    }

    #[test]
    fn test_add_command() {
        let switch = Command::Add {
            part: "KEYSWITCH-PLAIN-MX-1U".to_string(),
            name: "A".to_string(),
            rotation: None,
            at: Point::new(0.0, 0.0),
        };
        let diode = Command::Add {
            part: "DIODE-DO-35".to_string(),
            name: "DA".to_string(),
            rotation: Some(Rotation::R90),
            at: Point::new(0.1, 0.7),
        };

        assert_eq!(switch.to_string(), "ADD KEYSWITCH-PLAIN-MX-1U A (0.00 0.00)");
        assert_eq!(diode.to_string(), "ADD DIODE-DO-35 DA R90 (0.10 0.70)");
    }

    #[test]
    fn test_board_commands() {
        let rotate = Command::Rotate {
            rotation: Rotation::R0,
            name: "A".to_string(),
        };
        let mirror = Command::Mirror {
            name: "A".to_string(),
        };
        let mv = Command::Move {
            name: "A".to_string(),
            to: Point::new(19.05, -19.05),
        };

        assert_eq!(rotate.to_string(), "ROTATE =R0 A");
        assert_eq!(mirror.to_string(), "MIRROR A");
        assert_eq!(mv.to_string(), "MOVE A (19.05 -19.05)");
    }

    #[test]
    fn test_net_and_label_commands() {
        let named = Command::net("ROW1", Point::new(1.1, 0.9), Point::new(0.1, 0.9));
        let unnamed = Command::Net {
            name: None,
            from: Point::new(0.1, 0.5),
            to: Point::new(0.1, 0.4),
        };
        let label = Command::Label {
            net: Point::new(-0.4, 0.0),
            rotation: Rotation::R270,
            at: Point::new(-0.5, 0.0),
        };

        assert_eq!(named.to_string(), "NET ROW1 (1.10 0.90) (0.10 0.90)");
        assert_eq!(unnamed.to_string(), "NET (0.10 0.50) (0.10 0.40)");
        assert_eq!(label.to_string(), "LABEL (-0.40 0.00) R270 (-0.50 0.00)");
    }

    #[test]
    fn test_script_terminates_commands() {
        let mut script = Script::new();
        script.push_raw(&["GRID ON", "WINDOW FIT"]);
        assert_eq!(script.finish(), "GRID ON;\nWINDOW FIT;\n");
    }
}
