//! Blank region detection
//!
//! Turns a binary mask into a single placement rect:
//! - Contour extraction (tree or external-only borders of blank regions)
//! - Inscribed square search (randomized growth from seeds inside a contour)
//! - Candidate selection (area, aspect ratio and purity filters)

/// Border tracing of blank mask regions
pub mod contour;
/// Candidate filtering and ranking
pub mod selector;
/// Largest-square-in-polygon search
pub mod square;
