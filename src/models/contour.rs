use super::PointI;

/// Whether a border encloses a blank region or a hole inside one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderKind {
    /// Outer boundary of a connected blank region
    Outer,
    /// Boundary of a content hole nested in a blank region
    Hole,
}

/// Closed boundary of a connected mask region
///
/// Points are ordered along the border; the last point connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    /// Border points in tracing order
    pub points: Vec<PointI>,
    /// Outer border or hole border
    pub kind: BorderKind,
    /// Index of the enclosing contour in the same extraction pass
    pub parent: Option<usize>,
}

impl Contour {
    /// Create a contour from its parts
    pub fn new(points: Vec<PointI>, kind: BorderKind, parent: Option<usize>) -> Self {
        Self {
            points,
            kind,
            parent,
        }
    }

    /// True for an outer border with no enclosing contour
    pub fn is_external(&self) -> bool {
        self.kind == BorderKind::Outer && self.parent.is_none()
    }

    /// Number of border points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the contour has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
