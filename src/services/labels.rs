//! Reference designator assignment.
//!
//! Every key gets a unique EAGLE part name derived from its primary legend.
//! Legends that are not legal (or not readable) as part names are mapped
//! through a fixed substitution table; repeats get a numeric suffix.

use std::collections::{HashMap, HashSet};

use crate::models::{diode_label, Key};

/// Keys at least this wide with no legend are named `SPACE`.
const SPACE_MIN_WIDTH: f64 = 3.0;

/// Legends remapped to names EAGLE accepts as part references.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("-", "DASH"),
    ("=", "EQUAL"),
    ("+", "PLUS"),
    (",", "COMMA"),
    (".", "PERIOD"),
    ("/", "SLASH"),
    ("\\", "SOLIDUS"),
    ("[", "LBRACKET"),
    ("]", "RBRACKET"),
    (";", "SEMI"),
    ("'", "QUOTE"),
    ("SCROLL LOCK", "SCRLK"),
    ("CAPS LOCK", "CAPSLK"),
    ("NUM LOCK", "NUMLK"),
    ("↑", "UP"),
    ("↓", "DOWN"),
    ("←", "LEFT"),
    ("→", "RIGHT"),
    ("*", "ASTERISK"),
    ("#", "HASH"),
];

/// Run-scoped registry of the part names handed out so far.
///
/// Every key reserves two names: its own and its diode's (`D` prefixed).
#[derive(Debug, Default)]
pub struct LabelMap {
    /// Last suffix used per normalized base name
    counts: HashMap<String, u32>,
    /// Switch and diode names already in the script
    taken: HashSet<String>,
}

impl LabelMap {
    /// Creates an empty map for a new conversion run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next unique reference designator for `key`.
    ///
    /// The first `A` stays `A`, the next ones become `A2`, `A3`, ...
    /// A candidate is skipped when either it or its diode name is already
    /// taken, so a literal `A2` legend cannot collide with a generated
    /// `A2`, and a key named `DA` cannot collide with the diode of `A`.
    pub fn assign(&mut self, key: &Key) -> String {
        let base = normalize(key);

        let mut index = self.counts.get(&base).copied().unwrap_or(0);
        let label = loop {
            index += 1;
            let candidate = if index == 1 {
                base.clone()
            } else {
                format!("{base}{index}")
            };
            if self.is_free(&candidate) {
                break candidate;
            }
        };

        self.counts.insert(base, index);
        self.taken.insert(diode_label(&label));
        self.taken.insert(label.clone());
        label
    }

    fn is_free(&self, name: &str) -> bool {
        !self.taken.contains(name) && !self.taken.contains(&diode_label(name))
    }
}

/// Uppercased, substituted base name for a key, before de-duplication.
#[must_use]
pub fn normalize(key: &Key) -> String {
    let label = match key.primary_label() {
        Some(label) => label.to_uppercase(),
        None if key.width >= SPACE_MIN_WIDTH => "SPACE".to_string(),
        None => "BLANK".to_string(),
    };

    if let Some((_, name)) = SUBSTITUTIONS.iter().find(|(from, _)| *from == label) {
        return (*name).to_string();
    }

    // Whitespace would split the ADD command's arguments
    label.split_whitespace().collect::<Vec<_>>().join("_")
}
