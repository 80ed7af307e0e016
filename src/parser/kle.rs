//! keyboard-layout-editor (KLE) parser.
//!
//! Accepts both the "download JSON" file and the "raw data" text from the
//! editor (JSON5 style, unquoted keys, no outer brackets) and produces the
//! key list in the order the keys appear in the file.
//!
//! # Format
//!
//! - Optional leading object with keyboard metadata (ignored)
//! - One array per row; strings are keys (legends separated by `\n`),
//!   objects change the properties of the keys that follow
//! - `x`/`y` are relative offsets, `w`/`h` apply to the next key only
//! - `rx`/`ry` move the cursor to a new rotation cluster origin

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::models::Key;

/// Number of legend slots on a KLE keycap.
const LEGEND_SLOTS: usize = 12;

/// Default legend alignment (centered front legends).
const DEFAULT_ALIGN: usize = 4;

/// Legend slot for each position in the `\n`-separated legend string,
/// indexed by the `a` (alignment) property. `None` drops the legend.
const LABEL_MAP: [[Option<usize>; LEGEND_SLOTS]; 8] = {
    const N: Option<usize> = None;
    [
        [Some(0), Some(6), Some(2), Some(8), Some(9), Some(11), Some(3), Some(5), Some(1), Some(4), Some(7), Some(10)],
        [Some(1), Some(7), N, N, Some(9), Some(11), Some(4), N, N, N, N, Some(10)],
        [Some(3), N, Some(5), N, Some(9), Some(11), N, N, Some(4), N, N, Some(10)],
        [Some(4), N, N, N, Some(9), Some(11), N, N, N, N, N, Some(10)],
        [Some(0), Some(6), Some(2), Some(8), Some(10), N, Some(3), Some(5), Some(1), Some(4), Some(7), N],
        [Some(1), Some(7), N, N, Some(10), N, Some(4), N, N, N, N, N],
        [Some(3), N, Some(5), N, Some(10), N, N, N, Some(4), N, N, N],
        [Some(4), N, N, N, Some(10), N, N, N, N, N, N, N],
    ]
};

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Running key properties while walking the rows.
#[derive(Debug, Clone)]
struct Cursor {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    align: usize,
    cluster_x: f64,
    cluster_y: f64,
    rotation: f64,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            align: DEFAULT_ALIGN,
            cluster_x: 0.0,
            cluster_y: 0.0,
            rotation: 0.0,
        }
    }
}

/// Parses a KLE layout file.
pub fn parse_kle_file(path: &Path) -> Result<Vec<Key>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout file: {}", path.display()))?;

    parse_kle_str(&content)
        .with_context(|| format!("Failed to parse layout file: {}", path.display()))
}

/// Parses KLE layout text (download JSON or raw data).
pub fn parse_kle_str(content: &str) -> Result<Vec<Key>> {
    let rows = parse_document(content)?;

    let mut cursor = Cursor::default();
    let mut keys = Vec::new();
    let mut rotated = 0usize;

    for (index, item) in rows.iter().enumerate() {
        match item {
            Value::Object(_) if index == 0 => {
                debug!("Skipping keyboard metadata");
            }
            Value::Array(row) => {
                for (position, entry) in row.iter().enumerate() {
                    match entry {
                        Value::String(legends) => {
                            if cursor.rotation != 0.0 {
                                rotated += 1;
                            }
                            keys.push(Key {
                                x: cursor.x,
                                y: cursor.y,
                                width: cursor.width,
                                height: cursor.height,
                                labels: reorder_labels(legends, cursor.align),
                            });
                            cursor.x += cursor.width;
                            cursor.width = 1.0;
                            cursor.height = 1.0;
                        }
                        Value::Object(props) => {
                            apply_properties(&mut cursor, props, position)
                                .with_context(|| format!("Invalid properties in row {index}"))?;
                        }
                        other => bail!("Unexpected {} in row {}", kind(other), index),
                    }
                }

                cursor.y += 1.0;
                cursor.x = cursor.cluster_x;
            }
            other => bail!("Unexpected {} at top level (item {})", kind(other), index),
        }
    }

    if rotated > 0 {
        warn!("{} rotated keys will be placed without rotation", rotated);
    }

    debug!("Parsed {} keys", keys.len());
    Ok(keys)
}

/// Parses the document, wrapping raw data in brackets when needed.
fn parse_document(content: &str) -> Result<Vec<Value>> {
    let content = content.trim();

    // Download JSON is a list of rows; a bare row or several
    // comma-separated rows is raw data
    if let Ok(Value::Array(items)) = json5::from_str::<Value>(content) {
        if items.iter().all(|item| !item.is_string()) {
            return Ok(items);
        }
    }

    let wrapped = format!("[{content}]");
    match json5::from_str::<Value>(&wrapped) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => bail!("Expected a list of rows, found {}", kind(&other)),
        Err(e) => Err(anyhow::anyhow!("{e}")).context("Layout is neither KLE JSON nor raw data"),
    }
}

fn apply_properties(cursor: &mut Cursor, props: &Map<String, Value>, position: usize) -> Result<()> {
    let number = |name: &str| -> Result<Option<f64>> {
        match props.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .with_context(|| format!("Property '{name}' must be a number")),
        }
    };

    let r = number("r")?;
    let rx = number("rx")?;
    let ry = number("ry")?;

    if position != 0 && (r.is_some() || rx.is_some() || ry.is_some()) {
        bail!("Rotation can only be specified on the first key in a row");
    }

    if let Some(r) = r {
        cursor.rotation = r;
    }
    if let Some(rx) = rx {
        cursor.cluster_x = rx;
        cursor.x = cursor.cluster_x;
        cursor.y = cursor.cluster_y;
    }
    if let Some(ry) = ry {
        cursor.cluster_y = ry;
        cursor.x = cursor.cluster_x;
        cursor.y = cursor.cluster_y;
    }
    if let Some(a) = number("a")? {
        if !a.is_finite() || a < 0.0 || a >= LABEL_MAP.len() as f64 {
            bail!("Legend alignment {a} is out of range");
        }
        cursor.align = a as usize;
    }
    if let Some(x) = number("x")? {
        cursor.x += x;
    }
    if let Some(y) = number("y")? {
        cursor.y += y;
    }
    if let Some(w) = number("w")? {
        cursor.width = w;
    }
    if let Some(h) = number("h")? {
        cursor.height = h;
    }

    Ok(())
}

/// Places the `\n`-separated legends into their slots and cleans them up.
///
/// The result runs up to the last non-empty slot, so the last entry is
/// the front-most legend.
fn reorder_labels(legends: &str, align: usize) -> Vec<String> {
    let mut slots: Vec<String> = vec![String::new(); LEGEND_SLOTS];

    for (index, legend) in legends.split('\n').enumerate().take(LEGEND_SLOTS) {
        if let Some(slot) = LABEL_MAP[align][index] {
            slots[slot] = clean_legend(legend);
        }
    }

    let used = slots
        .iter()
        .rposition(|label| !label.is_empty())
        .map_or(0, |last| last + 1);
    slots.truncate(used);
    slots
}

/// Strips HTML markup and entities KLE legends commonly carry.
fn clean_legend(legend: &str) -> String {
    HTML_TAG
        .replace_all(legend, "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
