use crate::error::{OverlayError, Result};

/// Upper bound on square-search seeds per contour; caps worst-case latency
pub const MAX_SQUARE_SEARCH_ITERATIONS: usize = 100_000;

/// Which contours the region extractor reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContourMode {
    /// Every border, holes included (suits a smoothed mask)
    #[default]
    Tree,
    /// Outermost borders only (suits the raw threshold mask)
    External,
}

/// How a contour is turned into a candidate rect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionShape {
    /// Largest axis-aligned square inside the contour, by randomized search
    #[default]
    InscribedSquare,
    /// The contour's bounding box
    BoundingBox,
}

/// Tuning knobs for blank-region location
#[derive(Debug, Clone, PartialEq)]
pub struct LocatorConfig {
    /// Luminance at or above which a pixel counts as blank
    pub threshold: u8,
    /// Minimum `width * height` of a qualifying region
    pub min_area: u64,
    /// Allowed deviation of `width / height` from 1
    pub aspect_ratio_tolerance: f32,
    /// Minimum mean luminance inside a qualifying region
    pub avg_brightness_threshold: f32,
    /// Close the mask (dilate then erode) before contour extraction
    pub use_morphology: bool,
    /// Side of the square structuring element
    pub morphology_kernel_size: u32,
    /// Dilation and erosion passes
    pub morphology_iterations: u32,
    /// Contour retrieval policy
    pub contour_mode: ContourMode,
    /// Replace each contour with its convex hull before measuring it
    pub use_convex_hull: bool,
    /// Square search or bounding box
    pub region_shape: RegionShape,
    /// Random seeds tried per contour by the square search
    pub square_search_iterations: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            threshold: 250,
            min_area: 1000,
            aspect_ratio_tolerance: 0.1,
            avg_brightness_threshold: 220.0,
            use_morphology: true,
            morphology_kernel_size: 5,
            morphology_iterations: 4,
            contour_mode: ContourMode::Tree,
            use_convex_hull: true,
            region_shape: RegionShape::InscribedSquare,
            square_search_iterations: 1000,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

impl LocatorConfig {
    /// Looser purity and shape limits: brightness 240, tolerance 0.2
    pub fn lenient() -> Self {
        Self {
            aspect_ratio_tolerance: 0.2,
            avg_brightness_threshold: 240.0,
            ..Self::default()
        }
    }

    /// Raw threshold mask with outer contours only, no smoothing
    pub fn raw_mask() -> Self {
        Self {
            use_morphology: false,
            contour_mode: ContourMode::External,
            ..Self::default()
        }
    }

    /// Defaults overridden by `BLANK_*` environment variables
    ///
    /// Unparseable values fall back to the default silently.
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            threshold: parse_env("BLANK_THRESHOLD", base.threshold),
            min_area: parse_env("BLANK_MIN_AREA", base.min_area),
            aspect_ratio_tolerance: parse_env("BLANK_ASPECT_TOLERANCE", base.aspect_ratio_tolerance),
            avg_brightness_threshold: parse_env("BLANK_PURITY", base.avg_brightness_threshold),
            use_morphology: parse_env_bool_u8("BLANK_MORPHOLOGY", base.use_morphology),
            square_search_iterations: parse_env(
                "BLANK_SQUARE_ITERATIONS",
                base.square_search_iterations,
            )
            .clamp(1, MAX_SQUARE_SEARCH_ITERATIONS),
            ..base
        }
    }

    /// Check ranges; returns the config with its iteration count clamped
    pub fn validate(&self) -> Result<Self> {
        if !self.aspect_ratio_tolerance.is_finite() || self.aspect_ratio_tolerance < 0.0 {
            return Err(OverlayError::InvalidConfig(format!(
                "aspect_ratio_tolerance must be a finite value >= 0, got {}",
                self.aspect_ratio_tolerance
            )));
        }
        if !self.avg_brightness_threshold.is_finite() {
            return Err(OverlayError::InvalidConfig(
                "avg_brightness_threshold must be finite".to_string(),
            ));
        }
        if self.use_morphology && self.morphology_kernel_size == 0 {
            return Err(OverlayError::InvalidConfig(
                "morphology_kernel_size must be at least 1".to_string(),
            ));
        }

        let mut checked = self.clone();
        checked.square_search_iterations = self
            .square_search_iterations
            .min(MAX_SQUARE_SEARCH_ITERATIONS);
        Ok(checked)
    }
}
