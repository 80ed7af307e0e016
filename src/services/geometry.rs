//! Layout calculator.
//!
//! Turns the ordered key list into positioned keys: matrix row/column by a
//! single reading-order scan, switch/diode coordinates on the schematic grid
//! and on the board, and the switch footprint variant.
//!
//! # Coordinate Conversion
//!
//! - Board: 1u = 19.05 mm on both axes, y flipped (EAGLE y grows upward)
//! - Schematic: 1u = 1.0 in horizontally, 1.7 in vertically, y flipped
//! - Schematic switch coordinates are rounded to 2 significant digits

use crate::models::{
    ConvertError, Footprint, Key, Layout, Options, PartRegistry, Point, PositionedKey,
};

use super::labels::LabelMap;

/// Standard keyswitch pitch in millimetres.
pub const BOARD_PITCH: f64 = 19.05;

/// Schematic grid spacing per key unit (horizontal, vertical).
pub const SCHEMATIC_PITCH: (f64, f64) = (1.0, 1.7);

/// Diode symbol offset from its switch on the schematic.
pub const DIODE_SCHEMATIC_OFFSET: (f64, f64) = (0.1, 0.7);

/// Vertical diode offset from its switch on the board, in millimetres.
pub const DIODE_BOARD_OFFSET_Y: f64 = 2.0;

/// Key widths the switch library has a dedicated footprint for.
pub const FOOTPRINT_WIDTHS: [f64; 6] = [1.0, 2.0, 4.0, 6.0, 6.25, 7.0];

/// Significant digits kept for schematic switch coordinates.
const SCHEMATIC_PRECISION: usize = 2;

/// Switch and diode coordinates of one key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyPositions {
    /// Switch symbol on the schematic
    pub switch_schematic: Point,
    /// Diode symbol on the schematic
    pub diode_schematic: Point,
    /// Switch footprint on the board
    pub switch_board: Point,
    /// Diode footprint on the board
    pub diode_board: Point,
}

/// Reading-order cursor used to infer matrix rows and columns.
///
/// Rows and columns are ordinals: the Nth row (or column within a row)
/// encountered while scanning, not a bucket of absolute coordinates.
#[derive(Debug, Clone, Default)]
pub struct MatrixCursor {
    last: (f64, f64),
    row: u32,
    col: u32,
}

impl MatrixCursor {
    /// Creates a cursor at the grid origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Visits the next key and returns its 1-based `(row, col)`.
    pub fn advance(&mut self, key: &Key) -> (u32, u32) {
        let (last_x, last_y) = self.last;

        if key.y > last_y {
            self.row += 1;
            self.col = 0;
        } else if key.y == last_y && key.x > last_x {
            self.col += 1;
        }

        self.last = (key.x, key.y);
        (self.row + 1, self.col + 1)
    }
}

/// Builds the positioned layout for `keys`.
///
/// # Errors
///
/// - [`ConvertError::EmptyLayout`] if `keys` is empty
/// - [`ConvertError::UnknownDiode`] / [`ConvertError::UnknownSwitch`] if a
///   short name is missing from `registry`
/// - [`ConvertError::UnorderedInput`] if `options.validate_order` is set and
///   the keys are not in row-major reading order
pub fn build_layout(
    keys: &[Key],
    options: &Options,
    registry: &PartRegistry,
) -> Result<Layout, ConvertError> {
    if keys.is_empty() {
        return Err(ConvertError::EmptyLayout);
    }

    let parts = registry.resolve(options)?;

    if options.validate_order {
        check_reading_order(keys)?;
    }

    let mut labels = LabelMap::new();
    let mut cursor = MatrixCursor::new();

    let positioned = keys
        .iter()
        .map(|key| {
            let label = labels.assign(key);
            let (row, col) = cursor.advance(key);
            let positions = calc_positions(key, options.center_switches);

            PositionedKey {
                label,
                row,
                col,
                footprint: footprint(key),
                switch_schematic: positions.switch_schematic,
                diode_schematic: positions.diode_schematic,
                switch_board: positions.switch_board,
                diode_board: positions.diode_board,
            }
        })
        .collect();

    Layout::new(positioned, parts)
}

/// Fails on the first key that does not follow the one before it in
/// row-major reading order.
pub fn check_reading_order(keys: &[Key]) -> Result<(), ConvertError> {
    for (index, pair) in keys.windows(2).enumerate() {
        let (previous, key) = (&pair[0], &pair[1]);
        let in_order = key.y > previous.y || (key.y == previous.y && key.x > previous.x);

        if !in_order {
            return Err(ConvertError::UnorderedInput {
                index: index + 1,
                position: (key.x, key.y),
                previous: (previous.x, previous.y),
            });
        }
    }

    Ok(())
}

/// Computes switch and diode coordinates for one key.
///
/// Schematic centering of multi-unit switches follows `center_switches`;
/// board centering is always applied so the footprint sits in the middle
/// of the keycap.
#[must_use]
pub fn calc_positions(key: &Key, center_switches: bool) -> KeyPositions {
    let (pitch_x, pitch_y) = SCHEMATIC_PITCH;

    let mut switch_board = Point::new(key.x * BOARD_PITCH, -key.y * BOARD_PITCH);
    let mut switch_schematic = Point::new(key.x * pitch_x, -key.y * pitch_y);

    if center_switches && key.width > 1.0 {
        switch_schematic.x += pitch_x * (key.width - 1.0) / 2.0;
    }
    if center_switches && key.height > 1.0 {
        switch_schematic.y -= pitch_y * (key.height - 1.0) / 2.0;
    }

    switch_schematic = Point::new(
        round_significant(switch_schematic.x, SCHEMATIC_PRECISION),
        round_significant(switch_schematic.y, SCHEMATIC_PRECISION),
    );

    if key.width > 1.0 {
        switch_board.x += BOARD_PITCH * (key.width - 1.0) / 2.0;
    }
    if key.height > 1.0 {
        switch_board.y -= BOARD_PITCH * (key.height - 1.0) / 2.0;
    }

    let diode_board = switch_board.offset(-key.width * BOARD_PITCH / 2.0, DIODE_BOARD_OFFSET_Y);
    let diode_schematic =
        switch_schematic.offset(DIODE_SCHEMATIC_OFFSET.0, DIODE_SCHEMATIC_OFFSET.1);

    KeyPositions {
        switch_schematic,
        diode_schematic,
        switch_board,
        diode_board,
    }
}

/// Selects the switch footprint variant for a key.
///
/// Supported widths are used as-is, other widths round down. Keys taller
/// than 1u are mounted sideways and sized by their height.
#[must_use]
pub fn footprint(key: &Key) -> Footprint {
    if key.height > 1.0 {
        return Footprint {
            size: key.height,
            rotated: true,
        };
    }

    let size = if FOOTPRINT_WIDTHS.contains(&key.width) {
        key.width
    } else {
        key.width.floor()
    };

    Footprint {
        size,
        rotated: false,
    }
}

/// Rounds `value` to `digits` significant digits.
///
/// Rounding is decided on the exact decimal expansion of the binary value,
/// with exact ties going away from zero (2.25 becomes 2.3, while
/// 7.6499999999999995 becomes 7.6).
#[must_use]
pub fn round_significant(value: f64, digits: usize) -> f64 {
    if value == 0.0 || !value.is_finite() || digits == 0 {
        return value;
    }

    round_exact(value.abs(), digits).map_or(value, |rounded| rounded.copysign(value))
}

/// Digits after the point that hold the exact expansion of any `f64`.
const EXACT_DIGITS: usize = 767;

fn round_exact(value: f64, digits: usize) -> Option<f64> {
    let exact = format!("{:.*e}", EXACT_DIGITS, value);
    let (mantissa, exponent) = exact.split_once('e')?;
    let exponent: i32 = exponent.parse().ok()?;

    let significand: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let mut kept: u64 = significand.get(..digits)?.parse().ok()?;
    if significand.as_bytes().get(digits).is_some_and(|digit| *digit >= b'5') {
        kept += 1;
    }

    let scale = exponent + 1 - i32::try_from(digits).ok()?;
    format!("{kept}e{scale}").parse().ok()
}
