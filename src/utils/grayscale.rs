//! Luminance conversion
//!
//! Y = 0.299*R + 0.587*G + 0.114*B in 8.8 fixed point:
//! Y = (77*R + 150*G + 29*B) >> 8
//!
//! The weights sum to 256 so pure white stays at 255 and a threshold of 255
//! still selects it.

use image::{DynamicImage, GrayImage};
use rayon::prelude::*;

const COEF_R: u32 = 77;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Images with at least this many pixels are converted row-parallel
pub const PARALLEL_PIXEL_THRESHOLD: usize = 1 << 20;

#[inline]
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 8) as u8
}

/// Convert RGBA bytes to grayscale (ignores alpha channel)
pub fn rgba_to_grayscale(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    rgba.chunks_exact(4)
        .take(pixel_count)
        .map(|px| luminance(px[0], px[1], px[2]))
        .collect()
}

/// Convert RGBA to grayscale using parallel processing
/// Processes rows in parallel for multi-core speedup
pub fn rgba_to_grayscale_parallel(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    if width == 0 {
        return gray;
    }

    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let row_start = y * width * 4;
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * 4;
            *out = luminance(rgba[idx], rgba[idx + 1], rgba[idx + 2]);
        }
    });

    gray
}

/// Convert any decoded image to an 8-bit luminance buffer
///
/// Single-channel inputs are taken as-is; everything else goes through RGBA.
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = image {
        return gray.clone();
    }

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let (w, h) = (width as usize, height as usize);
    let gray = if w * h >= PARALLEL_PIXEL_THRESHOLD {
        rgba_to_grayscale_parallel(rgba.as_raw(), w, h)
    } else {
        rgba_to_grayscale(rgba.as_raw(), w, h)
    };

    // Length is exactly width * height by construction
    GrayImage::from_raw(width, height, gray).unwrap_or_else(|| GrayImage::new(width, height))
}

/// Mean intensity over a sub-rectangle, clipped to the image
pub fn mean_intensity(gray: &GrayImage, x: u32, y: u32, width: u32, height: u32) -> f32 {
    let x_end = x.saturating_add(width).min(gray.width());
    let y_end = y.saturating_add(height).min(gray.height());
    if x >= x_end || y >= y_end {
        return 0.0;
    }

    let stride = gray.width() as usize;
    let raw = gray.as_raw();
    let mut sum: u64 = 0;
    for row in y..y_end {
        let start = row as usize * stride + x as usize;
        let end = row as usize * stride + x_end as usize;
        sum += raw[start..end].iter().map(|&v| v as u64).sum::<u64>();
    }
    let count = (x_end - x) as u64 * (y_end - y) as u64;
    (sum as f64 / count as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_rgba_to_grayscale() {
        // Pure white
        let gray = rgba_to_grayscale(&[255, 255, 255, 255], 1, 1);
        assert_eq!(gray[0], 255);

        // Pure black
        let gray = rgba_to_grayscale(&[0, 0, 0, 255], 1, 1);
        assert_eq!(gray[0], 0);

        // Pure red
        let gray = rgba_to_grayscale(&[255, 0, 0, 255], 1, 1);
        assert!(gray[0] < 255);
        assert!(gray[0] > 0);

        // Pure green
        let gray = rgba_to_grayscale(&[0, 255, 0, 0], 1, 1);
        assert!(gray[0] > 100);
    }

    #[test]
    fn test_parallel_matches_scalar() {
        let img = RgbaImage::from_fn(37, 23, |x, y| {
            Rgba([(x * 7) as u8, (y * 11) as u8, (x * y) as u8, 255])
        });
        let scalar = rgba_to_grayscale(img.as_raw(), 37, 23);
        let parallel = rgba_to_grayscale_parallel(img.as_raw(), 37, 23);
        assert_eq!(scalar, parallel);
    }

    #[test]
    fn test_to_grayscale_dimensions() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(5, 3, Rgba([255, 255, 255, 255])));
        let gray = to_grayscale(&img);
        assert_eq!(gray.dimensions(), (5, 3));
        assert!(gray.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn test_mean_intensity() {
        let mut gray = GrayImage::new(4, 4);
        gray.put_pixel(0, 0, image::Luma([200]));
        gray.put_pixel(1, 0, image::Luma([100]));
        assert!((mean_intensity(&gray, 0, 0, 2, 1) - 150.0).abs() < 1e-4);
        assert!((mean_intensity(&gray, 0, 0, 4, 4) - 18.75).abs() < 1e-4);
        // Clipped to image bounds
        assert!((mean_intensity(&gray, 1, 0, 100, 1) - 25.0).abs() < 1e-4);
        assert_eq!(mean_intensity(&gray, 9, 9, 1, 1), 0.0);
    }
}
