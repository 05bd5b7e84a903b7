use crate::compositor::{self, Placement};
use crate::config::LocatorConfig;
use crate::detector::contour::extract_contours;
use crate::detector::selector::select_best_region;
use crate::error::{OverlayError, Result};
use crate::models::{Candidate, Contour, Mask, Rect};
use crate::utils::binarization::{smooth, threshold_binarize};
use crate::utils::grayscale::to_grayscale;
use image::{DynamicImage, GrayImage, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Intermediate products of one locate pass, kept for inspection
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Luminance of the background
    pub gray: GrayImage,
    /// Mask after thresholding and optional smoothing
    pub mask: Mask,
    /// Contours in discovery order
    pub contours: Vec<Contour>,
    /// Winning candidate, if any survived
    pub best: Option<Candidate>,
}

fn ensure_non_empty(image: &DynamicImage, what: &str) -> Result<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(OverlayError::InvalidImage(format!(
            "{} has zero size ({}x{})",
            what,
            image.width(),
            image.height()
        )));
    }
    Ok(())
}

/// Threshold, then optionally close, per `config`
pub fn build_mask(gray: &GrayImage, config: &LocatorConfig) -> Mask {
    let mask = threshold_binarize(gray, config.threshold);
    if config.use_morphology {
        smooth(
            &mask,
            config.morphology_kernel_size,
            config.morphology_iterations,
        )
    } else {
        mask
    }
}

/// Run every locate stage and keep the intermediates
pub fn analyze<R: Rng + ?Sized>(
    image: &DynamicImage,
    config: &LocatorConfig,
    rng: &mut R,
) -> Result<Analysis> {
    ensure_non_empty(image, "background")?;
    let config = config.validate()?;

    let gray = to_grayscale(image);
    let mask = build_mask(&gray, &config);
    log::debug!(
        "mask {}x{}: {} blank pixels (threshold {}, morphology {})",
        mask.width(),
        mask.height(),
        mask.blank_count(),
        config.threshold,
        config.use_morphology
    );

    let contours = extract_contours(&mask, config.contour_mode);
    log::debug!(
        "{} contours ({:?} mode)",
        contours.len(),
        config.contour_mode
    );

    let best = select_best_region(&gray, &contours, &config, rng);
    match &best {
        Some(c) => log::debug!(
            "selected {:?} area={} purity={:.1}",
            c.rect,
            c.area,
            c.purity
        ),
        None => log::debug!("no candidate survived filtering"),
    }

    Ok(Analysis {
        gray,
        mask,
        contours,
        best,
    })
}

/// Locate the largest roughly-square blank region of `image`
///
/// `Ok(None)` means the image was valid but nothing qualified.
///
/// # Example
/// ```
/// use blank_overlay::{LocatorConfig, locate_blank_region};
/// use image::{DynamicImage, Rgba, RgbaImage};
/// use rand::SeedableRng;
///
/// let dark = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255])));
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let region = locate_blank_region(&dark, &LocatorConfig::default(), &mut rng).unwrap();
/// assert!(region.is_none());
/// ```
pub fn locate_blank_region<R: Rng + ?Sized>(
    image: &DynamicImage,
    config: &LocatorConfig,
    rng: &mut R,
) -> Result<Option<Rect>> {
    Ok(analyze(image, config, rng)?.best.map(|c| c.rect))
}

/// Composite `foreground` onto `background` according to `placement`
pub fn composite_overlay(
    background: &DynamicImage,
    foreground: &DynamicImage,
    placement: Placement,
) -> Result<RgbaImage> {
    ensure_non_empty(background, "background")?;
    ensure_non_empty(foreground, "foreground")?;
    compositor::composite(&background.to_rgba8(), &foreground.to_rgba8(), placement)
}

/// Locate a blank region and fit `foreground` into it
///
/// Fails with [`OverlayError::NoRegionFound`] when nothing qualifies.
pub fn locate_and_composite<R: Rng + ?Sized>(
    background: &DynamicImage,
    foreground: &DynamicImage,
    config: &LocatorConfig,
    rng: &mut R,
) -> Result<RgbaImage> {
    ensure_non_empty(foreground, "foreground")?;
    let region = locate_blank_region(background, config, rng)?.ok_or(OverlayError::NoRegionFound)?;
    composite_overlay(background, foreground, Placement::FitIntoRegion(region))
}

/// Composite one foreground onto many backgrounds in parallel
///
/// Results keep the order of `backgrounds`; each item fails independently.
pub fn composite_batch(
    foreground: &DynamicImage,
    backgrounds: &[DynamicImage],
    placement: Placement,
) -> Vec<Result<RgbaImage>> {
    let fg = foreground.to_rgba8();
    backgrounds
        .par_iter()
        .map(|bg| {
            ensure_non_empty(bg, "background")?;
            compositor::composite(&bg.to_rgba8(), &fg, placement)
        })
        .collect()
}

/// Locate-and-composite over many backgrounds in parallel
///
/// Background `i` uses its own generator seeded with `base_seed + i`, so the
/// output does not depend on scheduling.
pub fn locate_and_composite_batch(
    foreground: &DynamicImage,
    backgrounds: &[DynamicImage],
    config: &LocatorConfig,
    base_seed: u64,
) -> Vec<Result<RgbaImage>> {
    backgrounds
        .par_iter()
        .enumerate()
        .map(|(i, bg)| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
            locate_and_composite(bg, foreground, config, &mut rng)
        })
        .collect()
}
