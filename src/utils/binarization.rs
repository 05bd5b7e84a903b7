use crate::models::Mask;
use crate::models::mask::{BLANK, CONTENT};
use crate::utils::grayscale::to_grayscale;
use image::{DynamicImage, GrayImage};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{dilate, erode};

/// Global threshold binarization
/// Returns a Mask where pixel >= threshold is blank (255), everything else content (0)
pub fn threshold_binarize(gray: &GrayImage, threshold: u8) -> Mask {
    let mut out = GrayImage::new(gray.width(), gray.height());
    for (dst, src) in out.pixels_mut().zip(gray.pixels()) {
        dst[0] = if src[0] >= threshold { BLANK } else { CONTENT };
    }
    Mask::from_gray(out)
}

/// Convert a decoded image to luminance and threshold it
pub fn binarize(image: &DynamicImage, threshold: u8) -> Mask {
    threshold_binarize(&to_grayscale(image), threshold)
}

/// Radius of the Chebyshev ball equivalent to `iterations` passes of a
/// `kernel_size` x `kernel_size` square structuring element
pub fn morphology_radius(kernel_size: u32, iterations: u32) -> u8 {
    let radius = (kernel_size / 2).saturating_mul(iterations);
    radius.min(u8::MAX as u32) as u8
}

/// Dilate then erode (morphological closing of the blank pixels)
///
/// Dilation merges blank pixels separated by thin content such as text or
/// fine lines; the matching erosion shrinks the merged region back to roughly
/// its original extent.
pub fn smooth(mask: &Mask, kernel_size: u32, iterations: u32) -> Mask {
    let k = morphology_radius(kernel_size, iterations);
    if k == 0 {
        return mask.clone();
    }

    let dilated = dilate(mask.as_image(), Norm::LInf, k);
    let closed = erode(&dilated, Norm::LInf, k);
    Mask::from_gray(closed)
}
