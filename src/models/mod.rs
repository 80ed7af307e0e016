//! Data models for keys, parts and positioned layouts.
//!
//! This module contains the core data structures shared by the layout
//! calculator and the script emitters. Models carry no I/O.

pub mod error;
pub mod key;
pub mod layout;
pub mod parts;

// Re-export all model types
pub use error::ConvertError;
pub use key::Key;
pub use layout::{diode_label, Footprint, Layout, Point, PositionedKey, DIODE_PREFIX};
pub use parts::{Options, PartEntry, PartRegistry, ResolvedParts};
