//! Utility functions for image processing
//!
//! This module provides the low-level building blocks of region location:
//! - Grayscale conversion (RGBA to luminance)
//! - Binarization (global threshold and morphological smoothing)
//! - Geometry (bounding boxes, convex hulls, point-in-polygon)

pub mod binarization;
pub mod geometry;
pub mod grayscale;
