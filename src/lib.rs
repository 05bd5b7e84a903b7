//! blank_overlay - place a logo or QR code into the emptiest part of an image
//!
//! Finds the largest roughly-square, near-white region of a background image
//! and composites an overlay into it, keeping the overlay's aspect ratio and
//! centering it in the region.
//!
//! Pipeline: luminance → threshold mask → optional closing → contours →
//! inscribed square (or bounding box) per contour → area / aspect / purity
//! filters → largest survivor → scaled "over" composite.
//!
//! The square search is randomized; every entry point that runs it takes the
//! random generator as an argument so results are reproducible for a seed.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Overlay compositing (fit into region, expand background)
pub mod compositor;
/// Locator configuration and environment overrides
pub mod config;
/// Contour extraction, square search and region selection
pub mod detector;
/// Error type
pub mod error;
/// Core data structures (Rect, Mask, Contour, etc.)
pub mod models;
/// End-to-end locate and composite operations
pub mod pipeline;
/// Loading, saving, statistics and debug drawing helpers
pub mod tools;
/// Utility functions (grayscale, binarization, geometry)
pub mod utils;

pub use compositor::Placement;
pub use config::{ContourMode, LocatorConfig, RegionShape};
pub use error::{OverlayError, Result};
pub use models::{Candidate, Contour, InscribedSquare, Mask, PointI, Rect};
pub use pipeline::{
    Analysis, analyze, composite_batch, composite_overlay, locate_and_composite,
    locate_and_composite_batch, locate_blank_region,
};

use rand::Rng;

/// Blank-region locator bound to one configuration
///
/// Thin convenience over [`locate_blank_region`] and
/// [`locate_and_composite`] for callers that reuse the same settings.
#[derive(Debug, Clone, Default)]
pub struct Locator {
    config: LocatorConfig,
}

impl Locator {
    /// Create a locator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a locator with explicit settings
    pub fn with_config(config: LocatorConfig) -> Self {
        Self { config }
    }

    /// Create a locator from `BLANK_*` environment overrides
    pub fn from_env() -> Self {
        Self::with_config(LocatorConfig::from_env())
    }

    /// Current settings
    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Locate the best blank region of `image`
    pub fn locate<R: Rng + ?Sized>(
        &self,
        image: &image::DynamicImage,
        rng: &mut R,
    ) -> Result<Option<Rect>> {
        locate_blank_region(image, &self.config, rng)
    }

    /// Locate a region and fit `foreground` into it
    pub fn place<R: Rng + ?Sized>(
        &self,
        background: &image::DynamicImage,
        foreground: &image::DynamicImage,
        rng: &mut R,
    ) -> Result<image::RgbaImage> {
        locate_and_composite(background, foreground, &self.config, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_locate_empty_dark() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255])));
        let locator = Locator::new();
        let region = locator.locate(&image, &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(region.is_none());
    }

    #[test]
    fn test_locator_uses_its_config() {
        let config = LocatorConfig {
            region_shape: RegionShape::BoundingBox,
            min_area: 10,
            ..LocatorConfig::default()
        };
        let locator = Locator::with_config(config.clone());
        assert_eq!(locator.config(), &config);

        let image = DynamicImage::ImageRgba8(RgbaImage::from_fn(60, 60, |x, y| {
            if (10..50).contains(&x) && (10..50).contains(&y) {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        }));
        let region = locator.locate(&image, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(region, Some(Rect::new(10, 10, 40, 40)));
    }
}
