use image::{GrayImage, Luma};

/// Value of a blank (light) mask pixel
pub const BLANK: u8 = 255;
/// Value of a content (dark) mask pixel
pub const CONTENT: u8 = 0;

/// Binary mask: 255 = blank/light, 0 = content/dark
///
/// Same dimensions as the image it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    image: GrayImage,
}

impl Mask {
    /// Create an all-content mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::new(width, height),
        }
    }

    /// Wrap a grayscale buffer, forcing every non-zero pixel to [`BLANK`]
    pub fn from_gray(mut image: GrayImage) -> Self {
        for p in image.pixels_mut() {
            if p[0] != CONTENT {
                p[0] = BLANK;
            }
        }
        Self { image }
    }

    /// Get mask width
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Get mask height
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// True if (x, y) is blank; out-of-range reads as content
    pub fn is_blank(&self, x: u32, y: u32) -> bool {
        if x >= self.width() || y >= self.height() {
            return false;
        }
        self.image.get_pixel(x, y)[0] == BLANK
    }

    /// Set (x, y) blank or content; out-of-range writes are ignored
    pub fn set(&mut self, x: u32, y: u32, blank: bool) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        let v = if blank { BLANK } else { CONTENT };
        self.image.put_pixel(x, y, Luma([v]));
    }

    /// Number of blank pixels
    pub fn blank_count(&self) -> usize {
        self.image.as_raw().iter().filter(|&&v| v == BLANK).count()
    }

    /// Borrow the underlying 0/255 buffer
    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_get_set() {
        let mut mask = Mask::new(8, 8);
        assert_eq!(mask.width(), 8);
        assert_eq!(mask.height(), 8);
        assert_eq!(mask.blank_count(), 0);

        mask.set(3, 4, true);
        assert!(mask.is_blank(3, 4));
        assert!(!mask.is_blank(3, 3));
        assert_eq!(mask.blank_count(), 1);

        mask.set(3, 4, false);
        assert!(!mask.is_blank(3, 4));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut mask = Mask::new(8, 8);
        mask.set(10, 10, true); // Should not panic
        assert!(!mask.is_blank(10, 10));
    }

    #[test]
    fn test_from_gray_normalizes() {
        let gray = GrayImage::from_raw(3, 1, vec![0, 1, 200]).unwrap();
        let mask = Mask::from_gray(gray);
        assert_eq!(mask.as_image().as_raw(), &vec![0, 255, 255]);
    }
}
