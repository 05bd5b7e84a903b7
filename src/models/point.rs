/// Integer point in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointI {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl PointI {
    /// Create a new integer point
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate point by (dx, dy)
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Z component of (b - a) x (c - a), widened to avoid overflow
    pub fn cross(a: &PointI, b: &PointI, c: &PointI) -> i64 {
        let abx = (b.x - a.x) as i64;
        let aby = (b.y - a.y) as i64;
        let acx = (c.x - a.x) as i64;
        let acy = (c.y - a.y) as i64;
        abx * acy - aby * acx
    }
}

impl<T: Into<i32>> From<imageproc::point::Point<T>> for PointI {
    fn from(p: imageproc::point::Point<T>) -> Self {
        Self::new(p.x.into(), p.y.into())
    }
}
