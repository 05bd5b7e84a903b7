use super::Rect;
use crate::error::{OverlayError, Result};

/// Axis-aligned square found inside a contour; `side == 0` means none was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InscribedSquare {
    /// Seed x (top-left corner)
    pub x: u32,
    /// Seed y (top-left corner)
    pub y: u32,
    /// Side length in pixels
    pub side: u32,
}

impl InscribedSquare {
    /// Zero-side square returned when no seed landed inside the polygon
    pub const DEGENERATE: Self = Self {
        x: 0,
        y: 0,
        side: 0,
    };

    /// True when the search found nothing
    pub fn is_degenerate(&self) -> bool {
        self.side == 0
    }

    /// Convert to a rect, failing with [`OverlayError::DegenerateSquare`] on a zero side
    pub fn to_rect(&self) -> Result<Rect> {
        if self.is_degenerate() {
            return Err(OverlayError::DegenerateSquare);
        }
        Ok(Rect::new(self.x, self.y, self.side, self.side))
    }
}

/// A region that survived shape filtering, with the measurements used to rank it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Region in source pixels
    pub rect: Rect,
    /// `width * height`
    pub area: u64,
    /// `width / height`
    pub aspect_ratio: f32,
    /// Mean grayscale intensity inside `rect`
    pub purity: f32,
}
