use image::{DynamicImage, Rgba, RgbaImage};

/// White canvas with a dark frame and a few dark blobs, like a poster with
/// text around a clear middle
pub fn poster(width: u32, height: u32) -> DynamicImage {
    let border = width.min(height) / 10;
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        let frame = x < border || y < border || x + border >= width || y + border >= height;
        let blob = (x / 40 + y / 40) % 7 == 0 && y < height / 3;
        if frame || blob {
            Rgba([20, 20, 20, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    }))
}
