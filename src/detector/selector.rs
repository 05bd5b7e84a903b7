use crate::config::{LocatorConfig, RegionShape};
use crate::detector::contour::contour_polygon;
use crate::detector::square::find_inscribed_square;
use crate::models::{Candidate, Contour, Rect};
use crate::utils::geometry::bounding_rect;
use crate::utils::grayscale::mean_intensity;
use image::GrayImage;
use rand::Rng;

/// Why a contour was not accepted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// Square search found no seed inside the contour
    Degenerate,
    /// Rect not inside the image
    OutOfImage,
    /// `area < min_area`
    TooSmall(u64),
    /// Aspect ratio outside `1 ± tolerance`
    NotSquare(f32),
    /// Mean brightness below the purity threshold
    NotBlank(f32),
}

/// Measure one contour and apply the area, aspect and purity filters
pub fn evaluate_contour<R: Rng + ?Sized>(
    gray: &GrayImage,
    contour: &Contour,
    config: &LocatorConfig,
    rng: &mut R,
) -> Result<Candidate, Rejection> {
    let polygon = contour_polygon(contour, config.use_convex_hull);
    let bounds = bounding_rect(&polygon).ok_or(Rejection::Degenerate)?;
    // Nothing found inside the contour can beat its bounding box
    if bounds.area() < config.min_area {
        return Err(Rejection::TooSmall(bounds.area()));
    }

    let rect = match config.region_shape {
        RegionShape::InscribedSquare => {
            find_inscribed_square(&polygon, config.square_search_iterations, rng)
                .to_rect()
                .map_err(|_| Rejection::Degenerate)?
        }
        RegionShape::BoundingBox => bounds,
    };
    evaluate_rect(gray, rect, config)
}

/// Apply the area, aspect and purity filters to a rect
pub fn evaluate_rect(
    gray: &GrayImage,
    rect: Rect,
    config: &LocatorConfig,
) -> Result<Candidate, Rejection> {
    if !rect.fits_within(gray.width(), gray.height()) {
        return Err(Rejection::OutOfImage);
    }

    let area = rect.area();
    if area < config.min_area {
        return Err(Rejection::TooSmall(area));
    }

    let aspect_ratio = rect.aspect_ratio();
    let tol = config.aspect_ratio_tolerance;
    if !(1.0 - tol..=1.0 + tol).contains(&aspect_ratio) {
        return Err(Rejection::NotSquare(aspect_ratio));
    }

    let purity = mean_intensity(gray, rect.x, rect.y, rect.width, rect.height);
    if purity < config.avg_brightness_threshold {
        return Err(Rejection::NotBlank(purity));
    }

    Ok(Candidate {
        rect,
        area,
        aspect_ratio,
        purity,
    })
}

/// Pick the largest qualifying region among `contours`
///
/// Contours are visited in discovery order and a later candidate must be
/// strictly larger to replace the current best, so ties go to the first.
pub fn select_best_region<R: Rng + ?Sized>(
    gray: &GrayImage,
    contours: &[Contour],
    config: &LocatorConfig,
    rng: &mut R,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;

    for (i, contour) in contours.iter().enumerate() {
        match evaluate_contour(gray, contour, config, rng) {
            Ok(candidate) => {
                log::trace!(
                    "contour {}: candidate {:?} area={} aspect={:.3} purity={:.1}",
                    i,
                    candidate.rect,
                    candidate.area,
                    candidate.aspect_ratio,
                    candidate.purity
                );
                if best.is_none_or(|b| candidate.area > b.area) {
                    best = Some(candidate);
                }
            }
            Err(reason) => {
                log::trace!("contour {} ({} points) rejected: {:?}", i, contour.len(), reason);
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BorderKind, PointI};
    use image::Luma;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rect_contour(x0: i32, y0: i32, x1: i32, y1: i32) -> Contour {
        Contour::new(
            vec![
                PointI::new(x0, y0),
                PointI::new(x1, y0),
                PointI::new(x1, y1),
                PointI::new(x0, y1),
            ],
            BorderKind::Outer,
            None,
        )
    }

    fn bbox_config() -> LocatorConfig {
        LocatorConfig {
            region_shape: RegionShape::BoundingBox,
            min_area: 100,
            ..LocatorConfig::default()
        }
    }

    #[test]
    fn test_bbox_picks_largest() {
        let gray = GrayImage::from_pixel(200, 200, Luma([255]));
        let contours = vec![
            rect_contour(0, 0, 39, 39),
            rect_contour(50, 50, 149, 149),
            rect_contour(160, 160, 189, 189),
        ];
        let mut rng = StdRng::seed_from_u64(0);
        let best = select_best_region(&gray, &contours, &bbox_config(), &mut rng).unwrap();
        assert_eq!(best.rect, Rect::new(50, 50, 100, 100));
        assert_eq!(best.area, 10_000);
    }

    #[test]
    fn test_ties_go_to_first() {
        let gray = GrayImage::from_pixel(200, 100, Luma([255]));
        let contours = vec![rect_contour(0, 0, 49, 49), rect_contour(100, 0, 149, 49)];
        let mut rng = StdRng::seed_from_u64(0);
        let best = select_best_region(&gray, &contours, &bbox_config(), &mut rng).unwrap();
        assert_eq!(best.rect.x, 0);
    }

    #[test]
    fn test_rejections() {
        let mut gray = GrayImage::from_pixel(300, 100, Luma([255]));
        for y in 0..50 {
            for x in 200..250 {
                gray.put_pixel(x, y, Luma([10]));
            }
        }
        let config = bbox_config();

        // Too small
        let r = evaluate_rect(&gray, Rect::new(0, 0, 5, 5), &config);
        assert_eq!(r, Err(Rejection::TooSmall(25)));

        // Too wide
        let r = evaluate_rect(&gray, Rect::new(0, 0, 100, 50), &config);
        assert!(matches!(r, Err(Rejection::NotSquare(_))));

        // Dark
        let r = evaluate_rect(&gray, Rect::new(200, 0, 50, 50), &config);
        assert!(matches!(r, Err(Rejection::NotBlank(p)) if p < 20.0));

        // Outside
        let r = evaluate_rect(&gray, Rect::new(280, 0, 50, 50), &config);
        assert_eq!(r, Err(Rejection::OutOfImage));

        // Within tolerance
        let c = evaluate_rect(&gray, Rect::new(0, 0, 54, 50), &config).unwrap();
        assert!((c.aspect_ratio - 1.08).abs() < 1e-4);
    }

    #[test]
    fn test_no_survivors_is_none() {
        let gray = GrayImage::from_pixel(100, 100, Luma([0]));
        let contours = vec![rect_contour(10, 10, 89, 89)];
        let mut rng = StdRng::seed_from_u64(0);
        assert!(select_best_region(&gray, &contours, &bbox_config(), &mut rng).is_none());
        assert!(select_best_region(&gray, &[], &bbox_config(), &mut rng).is_none());
    }

    #[test]
    fn test_small_contour_skips_square_search() {
        let gray = GrayImage::from_pixel(100, 100, Luma([255]));
        let config = LocatorConfig::default();
        let speck = rect_contour(10, 10, 19, 19);

        let mut rng = StdRng::seed_from_u64(5);
        let r = evaluate_contour(&gray, &speck, &config, &mut rng);
        assert_eq!(r, Err(Rejection::TooSmall(100)));

        // No random draws were spent on it
        let mut fresh = StdRng::seed_from_u64(5);
        assert_eq!(rng.r#gen::<u64>(), fresh.r#gen::<u64>());
    }

    #[test]
    fn test_inscribed_square_shape() {
        let gray = GrayImage::from_pixel(200, 200, Luma([255]));
        let contours = vec![rect_contour(20, 20, 179, 179)];
        let config = LocatorConfig {
            min_area: 100,
            ..LocatorConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        let best = select_best_region(&gray, &contours, &config, &mut rng).unwrap();
        assert_eq!(best.rect.width, best.rect.height);
        assert!(best.rect.width > 120);
        assert!(Rect::new(20, 20, 160, 160).contains_rect(&best.rect));
    }
}
