use crate::error::{OverlayError, Result};
use crate::models::Mask;
use crate::pipeline::Analysis;
use image::{DynamicImage, GrayImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use std::path::Path;

/// Contour outline color for [`draw_debug_overlay`]
pub const CONTOUR_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
/// Selected region color for [`draw_debug_overlay`]
pub const REGION_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

fn reject_empty(image: DynamicImage) -> Result<DynamicImage> {
    if image.width() == 0 || image.height() == 0 {
        return Err(OverlayError::InvalidImage(format!(
            "decoded image has zero size ({}x{})",
            image.width(),
            image.height()
        )));
    }
    Ok(image)
}

/// Decode an image file.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    reject_empty(image::open(path)?)
}

/// Decode an in-memory encoded image (PNG, JPEG, ...).
pub fn load_image_from_memory(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(OverlayError::InvalidImage("empty input".to_string()));
    }
    reject_empty(image::load_from_memory(bytes)?)
}

/// Write an RGBA buffer as PNG.
pub fn save_png<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Summary statistics for grayscale data.
#[derive(Debug, Clone, Copy)]
pub struct GrayStats {
    /// Minimum grayscale value.
    pub min: u8,
    /// Maximum grayscale value.
    pub max: u8,
    /// Average grayscale value.
    pub avg: u8,
}

/// Summary statistics for a mask.
#[derive(Debug, Clone, Copy)]
pub struct MaskStats {
    /// Count of blank pixels.
    pub blank_pixels: usize,
    /// Total pixels in the mask.
    pub total_pixels: usize,
    /// Ratio of blank pixels to total pixels.
    pub blank_ratio: f64,
}

/// Compute min/max/avg for grayscale values.
pub fn gray_stats(gray: &GrayImage) -> GrayStats {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    let raw = gray.as_raw();
    for &v in raw {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    let avg = if raw.is_empty() {
        0
    } else {
        (sum / raw.len() as u64) as u8
    };
    GrayStats { min, max, avg }
}

/// Compute blank pixel stats for a mask.
pub fn mask_stats(mask: &Mask) -> MaskStats {
    let blank = mask.blank_count();
    let total = mask.width() as usize * mask.height() as usize;
    let ratio = if total == 0 {
        0.0
    } else {
        blank as f64 / total as f64
    };
    MaskStats {
        blank_pixels: blank,
        total_pixels: total,
        blank_ratio: ratio,
    }
}

/// Draw every contour and the selected region onto `canvas` in place.
pub fn draw_debug_overlay(canvas: &mut RgbaImage, analysis: &Analysis) {
    for contour in &analysis.contours {
        let n = contour.points.len();
        for i in 0..n {
            let a = contour.points[i];
            let b = contour.points[(i + 1) % n];
            draw_line_segment_mut(
                canvas,
                (a.x as f32, a.y as f32),
                (b.x as f32, b.y as f32),
                CONTOUR_COLOR,
            );
        }
    }

    if let Some(best) = &analysis.best {
        let r = best.rect;
        let outline = imageproc::rect::Rect::at(r.x as i32, r.y as i32).of_size(r.width, r.height);
        draw_hollow_rect_mut(canvas, outline, REGION_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocatorConfig;
    use crate::pipeline::analyze;
    use image::Luma;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;

    #[test]
    fn test_gray_stats() {
        let gray = GrayImage::from_raw(4, 1, vec![10, 20, 30, 40]).unwrap();
        let stats = gray_stats(&gray);
        assert_eq!(stats.min, 10);
        assert_eq!(stats.max, 40);
        assert_eq!(stats.avg, 25);
    }

    #[test]
    fn test_mask_stats() {
        let mut mask = Mask::new(4, 2);
        mask.set(0, 0, true);
        mask.set(1, 1, true);
        let stats = mask_stats(&mask);
        assert_eq!(stats.blank_pixels, 2);
        assert_eq!(stats.total_pixels, 8);
        assert!((stats.blank_ratio - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_load_from_memory_roundtrip_and_errors() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        let decoded = load_image_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));

        assert!(matches!(load_image_from_memory(&[]), Err(OverlayError::InvalidImage(_))));
        assert!(matches!(
            load_image_from_memory(b"not an image"),
            Err(OverlayError::Codec(_))
        ));
    }

    #[test]
    fn test_draw_debug_overlay_marks_region() {
        let gray = GrayImage::from_fn(100, 100, |x, y| {
            if (10..90).contains(&x) && (10..90).contains(&y) {
                Luma([255])
            } else {
                Luma([0])
            }
        });
        let image = DynamicImage::ImageLuma8(gray);
        let config = LocatorConfig {
            region_shape: crate::config::RegionShape::BoundingBox,
            ..LocatorConfig::default()
        };
        let analysis = analyze(&image, &config, &mut StdRng::seed_from_u64(0)).unwrap();
        let best = analysis.best.unwrap();

        let mut canvas = image.to_rgba8();
        draw_debug_overlay(&mut canvas, &analysis);
        assert_eq!(*canvas.get_pixel(best.rect.x, best.rect.y + 5), REGION_COLOR);
        assert_eq!(*canvas.get_pixel(50, 50), Rgba([255, 255, 255, 255]));
    }
}
