//! Overlay compositing
//!
//! Two placement policies:
//! - fit the foreground into a detected region, keeping its aspect ratio and
//!   centering it in the region
//! - expand the background to the foreground's size when the foreground is
//!   larger, then center the foreground over it
//!
//! Both blend with the "over" operator, so fully transparent foreground
//! pixels leave the background as it was.

use crate::error::{OverlayError, Result};
use crate::models::Rect;
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Where and how the foreground goes onto the background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Scale the foreground to fit inside `Rect` and center it there
    FitIntoRegion(Rect),
    /// Grow the background to the foreground's size if needed, then center
    ExpandBackgroundToForeground,
}

/// Filter used to scale the foreground
pub const FOREGROUND_FILTER: FilterType = FilterType::Lanczos3;
/// Filter used to upscale the background in expand mode
pub const BACKGROUND_FILTER: FilterType = FilterType::CatmullRom;

fn ensure_non_empty(image: &RgbaImage, what: &str) -> Result<()> {
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

/// Largest size with the foreground's aspect ratio that fits `width` x `height`
///
/// Equivalent to scaling by `min(width / fg_w, height / fg_h)` and truncating,
/// done in integer arithmetic so the constrained side lands exactly on the
/// region size. Neither side drops below 1.
pub fn fit_size(fg_width: u32, fg_height: u32, width: u32, height: u32) -> (u32, u32) {
    let (fw, fh) = (fg_width.max(1) as u64, fg_height.max(1) as u64);
    let (rw, rh) = (width as u64, height as u64);

    let (new_w, new_h) = if rw * fh <= rh * fw {
        (rw, fh * rw / fw)
    } else {
        (fw * rh / fh, rh)
    };
    (new_w.max(1) as u32, new_h.max(1) as u32)
}

/// Rect the scaled foreground occupies when fit into `region`
pub fn fit_placement(fg_width: u32, fg_height: u32, region: &Rect) -> Rect {
    let (new_w, new_h) = fit_size(fg_width, fg_height, region.width, region.height);
    Rect::new(
        region.x + region.width / 2 - new_w / 2,
        region.y + region.height / 2 - new_h / 2,
        new_w,
        new_h,
    )
}

/// Scale `foreground` into `region` and blend it onto a copy of `background`
///
/// Fails with [`OverlayError::OutOfBounds`] if `region` is empty or not fully
/// inside the background; the region is never clamped.
pub fn fit_into_region(
    background: &RgbaImage,
    foreground: &RgbaImage,
    region: &Rect,
) -> Result<RgbaImage> {
    ensure_non_empty(background, "background")?;
    ensure_non_empty(foreground, "foreground")?;
    if !region.fits_within(background.width(), background.height()) {
        return Err(OverlayError::OutOfBounds {
            rect: *region,
            width: background.width(),
            height: background.height(),
        });
    }

    let target = fit_placement(foreground.width(), foreground.height(), region);
    log::debug!(
        "fitting {}x{} foreground into {:?} at {:?}",
        foreground.width(),
        foreground.height(),
        region,
        target
    );

    let mut canvas = background.clone();
    if (target.width, target.height) == foreground.dimensions() {
        imageops::overlay(&mut canvas, foreground, target.x as i64, target.y as i64);
    } else {
        let scaled = imageops::resize(foreground, target.width, target.height, FOREGROUND_FILTER);
        imageops::overlay(&mut canvas, &scaled, target.x as i64, target.y as i64);
    }
    Ok(canvas)
}

/// Center `foreground` over `background`, upscaling the background to the
/// foreground's exact size when the foreground is larger in either dimension
pub fn expand_background_to_foreground(
    background: &RgbaImage,
    foreground: &RgbaImage,
) -> Result<RgbaImage> {
    ensure_non_empty(background, "background")?;
    ensure_non_empty(foreground, "foreground")?;

    let (fw, fh) = foreground.dimensions();
    let mut canvas = if fw > background.width() || fh > background.height() {
        log::debug!(
            "resizing background {}x{} to foreground size {}x{}",
            background.width(),
            background.height(),
            fw,
            fh
        );
        imageops::resize(background, fw, fh, BACKGROUND_FILTER)
    } else {
        background.clone()
    };

    let x = (canvas.width() as i64 - fw as i64) / 2;
    let y = (canvas.height() as i64 - fh as i64) / 2;
    imageops::overlay(&mut canvas, foreground, x, y);
    Ok(canvas)
}

/// Composite according to `placement`
pub fn composite(
    background: &RgbaImage,
    foreground: &RgbaImage,
    placement: Placement,
) -> Result<RgbaImage> {
    match placement {
        Placement::FitIntoRegion(region) => fit_into_region(background, foreground, &region),
        Placement::ExpandBackgroundToForeground => {
            expand_background_to_foreground(background, foreground)
        }
    }
}
