use crate::models::Rect;

/// Errors reported by the blank-region locator and the compositor.
///
/// `NoRegionFound` is a soft outcome: callers usually warn and fall back to a
/// default placement instead of aborting.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    /// Zero-sized or otherwise unusable input image
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The selector rejected every candidate region
    #[error("no blank region found")]
    NoRegionFound,

    /// The square search never found a seed inside the contour
    #[error("inscribed square search produced a zero-side square")]
    DegenerateSquare,

    /// Target rectangle is empty or not fully inside the background
    #[error("rect {rect:?} lies outside the {width}x{height} background")]
    OutOfBounds {
        /// Offending rectangle
        rect: Rect,
        /// Background width
        width: u32,
        /// Background height
        height: u32,
    },

    /// Configuration value outside its recognized range
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Encoded bytes could not be decoded or written
    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, OverlayError>;

impl OverlayError {
    /// True for outcomes that mean "nothing suitable", not a malfunction.
    pub fn is_no_region(&self) -> bool {
        matches!(self, Self::NoRegionFound | Self::DegenerateSquare)
    }
}
