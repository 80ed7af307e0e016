//! Errors raised while turning keys into a positioned layout.

/// Terminal failure of a conversion run. No partial output is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Diode short name is not in the part registry
    UnknownDiode(String),
    /// Switch short name is not in the part registry
    UnknownSwitch(String),
    /// The layout contains no keys
    EmptyLayout,
    /// A key breaks row-major reading order (only checked on request)
    UnorderedInput {
        /// Zero-based index of the offending key
        index: usize,
        /// Grid position of the offending key
        position: (f64, f64),
        /// Grid position of the key before it
        previous: (f64, f64),
    },
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownDiode(name) => write!(f, "Invalid diode specified: '{name}'"),
            Self::UnknownSwitch(name) => write!(f, "Invalid key switch specified: '{name}'"),
            Self::EmptyLayout => write!(f, "No keys on keyboard"),
            Self::UnorderedInput {
                index,
                position,
                previous,
            } => write!(
                f,
                "Key {} at ({}, {}) is out of reading order after ({}, {})",
                index, position.0, position.1, previous.0, previous.1
            ),
        }
    }
}

impl std::error::Error for ConvertError {}
