//! Service layer for the conversion pipeline.
//!
//! Label assignment and the layout calculator are pure; the layout service
//! ties them to layout files on disk.

pub mod geometry;
pub mod labels;
pub mod layouts;

// Re-export commonly used types and functions
pub use geometry::build_layout;
pub use labels::LabelMap;
pub use layouts::LayoutService;
