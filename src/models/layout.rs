//! Positioned keys and the layout handed to the script emitters.

use serde::{Deserialize, Serialize};

use super::error::ConvertError;
use super::parts::ResolvedParts;

/// A 2-D coordinate in either schematic inches or board millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate (increasing upward, EAGLE convention)
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Switch footprint variant chosen from the key size.
///
/// Renders as the library suffix, e.g. `2U` or `2U-ROTATED`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Sizing dimension in units (width, or height for rotated keys)
    pub size: f64,
    /// Key is mounted sideways (height > 1)
    pub rotated: bool,
}

impl std::fmt::Display for Footprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}U", self.size)?;
        if self.rotated {
            write!(f, "-ROTATED")?;
        }
        Ok(())
    }
}

/// Prefix turning a switch reference designator into its diode's.
pub const DIODE_PREFIX: &str = "D";

/// Reference designator of the diode paired with switch `label`.
#[must_use]
pub fn diode_label(label: &str) -> String {
    format!("{DIODE_PREFIX}{label}")
}

/// A key with its reference designator, matrix position and coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedKey {
    /// Reference designator, unique within the layout
    pub label: String,
    /// Matrix row (1-based)
    pub row: u32,
    /// Matrix column (1-based)
    pub col: u32,
    /// Switch footprint variant
    pub footprint: Footprint,
    /// Switch symbol position on the schematic
    pub switch_schematic: Point,
    /// Diode symbol position on the schematic
    pub diode_schematic: Point,
    /// Switch footprint position on the board
    pub switch_board: Point,
    /// Diode footprint position on the board
    pub diode_board: Point,
}

impl PositionedKey {
    /// Reference designator of the key's diode.
    #[must_use]
    pub fn diode_label(&self) -> String {
        diode_label(&self.label)
    }
}

/// Ordered, non-empty set of positioned keys plus the resolved parts.
///
/// Immutable once built; key order is the input key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    keys: Vec<PositionedKey>,
    diode: String,
    switch: String,
}

impl Layout {
    /// Creates a layout, rejecting an empty key list.
    pub fn new(keys: Vec<PositionedKey>, parts: ResolvedParts) -> Result<Self, ConvertError> {
        if keys.is_empty() {
            return Err(ConvertError::EmptyLayout);
        }

        Ok(Self {
            keys,
            diode: parts.diode,
            switch: parts.switch,
        })
    }

    /// Positioned keys in input order.
    #[must_use]
    pub fn keys(&self) -> &[PositionedKey] {
        &self.keys
    }

    /// EAGLE diode part identifier.
    #[must_use]
    pub fn diode(&self) -> &str {
        &self.diode
    }

    /// EAGLE switch mount family identifier.
    #[must_use]
    pub fn switch(&self) -> &str {
        &self.switch
    }

    /// Number of distinct matrix rows.
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.keys.iter().map(|k| k.row).max().unwrap_or(0)
    }

    /// Number of distinct matrix columns.
    #[must_use]
    pub fn col_count(&self) -> u32 {
        self.keys.iter().map(|k| k.col).max().unwrap_or(0)
    }
}
