//! Key definitions as delivered by the layout deserializer.

use serde::{Deserialize, Serialize};

/// One key of a keyboard-layout-editor layout.
///
/// # Coordinate System
///
/// - `x`/`y` are grid units (1u = one standard keycap), origin top-left
/// - `y` grows downward
/// - `width`/`height` are in grid units (default 1.0)
///
/// Keys are expected in row-major reading order; the matrix row/column
/// inference depends on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    /// Grid X position
    pub x: f64,
    /// Grid Y position (increasing downward)
    pub y: f64,
    /// Key width in grid units
    pub width: f64,
    /// Key height in grid units
    pub height: f64,
    /// Legends in KLE slot order; the last entry is the primary legend
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Key {
    /// Creates a 1u key with no legends.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            width: 1.0,
            height: 1.0,
            labels: Vec::new(),
        }
    }

    /// Sets the key width.
    #[must_use]
    pub const fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Sets the key height.
    #[must_use]
    pub const fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Appends a legend.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Returns the primary (last) legend, if it has any visible text.
    #[must_use]
    pub fn primary_label(&self) -> Option<&str> {
        self.labels
            .last()
            .map(|label| label.trim())
            .filter(|label| !label.is_empty())
    }
}
