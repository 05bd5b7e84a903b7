use crate::config::ContourMode;
use crate::models::{BorderKind, Contour, Mask, PointI};
use crate::utils::geometry::{convex_hull, simplify_collinear};
use image::{GrayImage, imageops};
use imageproc::contours::{BorderType, find_contours};

/// Copy of the mask inside a one-pixel content frame
///
/// The border follower only starts an outer border where a blank pixel has a
/// content pixel to its left, so regions touching the image edge need the
/// frame to be traced at all.
fn framed(mask: &Mask) -> GrayImage {
    let mut out = GrayImage::new(mask.width() + 2, mask.height() + 2);
    imageops::replace(&mut out, mask.as_image(), 1, 1);
    out
}

/// Trace the borders of connected blank regions in a mask
///
/// Borders follow blank (255) pixels, so a hole border is the ring of blank
/// pixels around a content blob. Discovery order is raster order of each
/// border's first pixel, which the selector relies on for tie-breaking.
pub fn extract_contours(mask: &Mask, mode: ContourMode) -> Vec<Contour> {
    let traced = find_contours::<i32>(&framed(mask));
    let mut contours = Vec::with_capacity(traced.len());

    for c in traced {
        let kind = match c.border_type {
            BorderType::Outer => BorderKind::Outer,
            BorderType::Hole => BorderKind::Hole,
        };
        // Back to mask coordinates; the frame itself is never blank
        let points: Vec<PointI> = c
            .points
            .into_iter()
            .map(|p| PointI::from(p).translate(-1, -1))
            .collect();
        contours.push(Contour::new(points, kind, c.parent));
    }

    match mode {
        ContourMode::Tree => contours,
        // Parent indices point into the full list, so drop them with the rest
        ContourMode::External => contours
            .into_iter()
            .filter(Contour::is_external)
            .collect(),
    }
}

/// Polygon used for measuring a contour: its convex hull, or the border with
/// straight runs collapsed to their endpoints
pub fn contour_polygon(contour: &Contour, use_convex_hull: bool) -> Vec<PointI> {
    if use_convex_hull {
        convex_hull(&contour.points)
    } else {
        simplify_collinear(&contour.points)
    }
}
