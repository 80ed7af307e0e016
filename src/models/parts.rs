//! EAGLE part registry and per-run conversion options.

use serde::{Deserialize, Serialize};

use super::error::ConvertError;

/// A short name and the EAGLE library identifier it selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartEntry {
    /// Short name accepted on the command line (e.g. "tht")
    pub name: String,
    /// EAGLE library identifier (e.g. "DIODE-DO-35")
    pub part: String,
}

impl PartEntry {
    /// Creates a new registry entry.
    pub fn new(name: impl Into<String>, part: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            part: part.into(),
        }
    }
}

/// Fixed lookup tables from short names to EAGLE part identifiers.
///
/// Constructed once and passed into the layout calculator, so tests can
/// build their own tables next to the built-in one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRegistry {
    diodes: Vec<PartEntry>,
    switches: Vec<PartEntry>,
}

impl PartRegistry {
    /// Creates a registry from explicit diode and switch tables.
    #[must_use]
    pub const fn new(diodes: Vec<PartEntry>, switches: Vec<PartEntry>) -> Self {
        Self { diodes, switches }
    }

    /// The parts shipped with the keyboard EAGLE library.
    #[must_use]
    pub fn eagle() -> Self {
        Self::new(
            vec![
                PartEntry::new("tht", "DIODE-DO-35"),
                PartEntry::new("smd", "DIODE-SOD-123"),
            ],
            vec![
                PartEntry::new("alps", "ALPS"),
                PartEntry::new("alpsMx", "ALPSMX"),
                PartEntry::new("choc", "CHOC"),
                PartEntry::new("chocX", "CHOCX"),
                PartEntry::new("mx", "MX"),
                PartEntry::new("mxHs", "MXHS"),
                PartEntry::new("mxHsPcb", "MXHSPCB"),
            ],
        )
    }

    /// Looks up a diode part by short name.
    #[must_use]
    pub fn diode(&self, name: &str) -> Option<&str> {
        lookup(&self.diodes, name)
    }

    /// Looks up a switch mount family by short name.
    #[must_use]
    pub fn switch(&self, name: &str) -> Option<&str> {
        lookup(&self.switches, name)
    }

    /// All diode entries in registration order.
    #[must_use]
    pub fn diodes(&self) -> &[PartEntry] {
        &self.diodes
    }

    /// All switch entries in registration order.
    #[must_use]
    pub fn switches(&self) -> &[PartEntry] {
        &self.switches
    }

    /// Resolves both short names of `options`.
    pub fn resolve(&self, options: &Options) -> Result<ResolvedParts, ConvertError> {
        let diode = self
            .diode(&options.diode)
            .ok_or_else(|| ConvertError::UnknownDiode(options.diode.clone()))?;
        let switch = self
            .switch(&options.switch)
            .ok_or_else(|| ConvertError::UnknownSwitch(options.switch.clone()))?;

        Ok(ResolvedParts {
            diode: diode.to_string(),
            switch: switch.to_string(),
        })
    }
}

impl Default for PartRegistry {
    fn default() -> Self {
        Self::eagle()
    }
}

fn lookup<'a>(entries: &'a [PartEntry], name: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.part.as_str())
}

/// Part identifiers after registry lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParts {
    /// EAGLE diode part
    pub diode: String,
    /// EAGLE switch mount family
    pub switch: String,
}

/// Options for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Diode short name (registry key)
    pub diode: String,
    /// Switch mount short name (registry key)
    pub switch: String,
    /// Center multi-unit switches on the schematic grid
    pub center_switches: bool,
    /// Reject keys that are not in row-major reading order
    pub validate_order: bool,
}

impl Options {
    /// Creates options with centering and order validation disabled.
    pub fn new(diode: impl Into<String>, switch: impl Into<String>) -> Self {
        Self {
            diode: diode.into(),
            switch: switch.into(),
            center_switches: false,
            validate_order: false,
        }
    }

    /// Enables or disables schematic centering.
    #[must_use]
    pub const fn with_center_switches(mut self, center: bool) -> Self {
        self.center_switches = center;
        self
    }

    /// Enables or disables the row-major ordering check.
    #[must_use]
    pub const fn with_validate_order(mut self, validate: bool) -> Self {
        self.validate_order = validate;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new("tht", "mx")
    }
}
