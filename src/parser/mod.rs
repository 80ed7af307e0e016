//! Parsers for keyboard layout files.
//!
//! Layout files come from keyboard-layout-editor.com, either as the
//! downloaded JSON file or as the raw data pasted from the editor.

pub mod kle;

pub use kle::{parse_kle_file, parse_kle_str};
