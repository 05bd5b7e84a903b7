//! Polygon helpers for contour filtering and the inscribed-square search

use crate::models::{PointI, Rect};

/// Where a point lies relative to a closed polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Strictly inside
    Inside,
    /// On an edge or vertex
    Boundary,
    /// Outside
    Outside,
}

/// Smallest pixel rect covering all points (inclusive extents, so a single
/// point yields a 1x1 rect). `None` for an empty slice or negative coordinates.
pub fn bounding_rect(points: &[PointI]) -> Option<Rect> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    if min_x < 0 || min_y < 0 {
        return None;
    }
    Some(Rect::new(
        min_x as u32,
        min_y as u32,
        (max_x - min_x) as u32 + 1,
        (max_y - min_y) as u32 + 1,
    ))
}

/// Convex hull using Andrew's monotone chain
///
/// Collinear points are dropped. Fewer than three distinct input points are
/// returned deduplicated and sorted.
pub fn convex_hull(points: &[PointI]) -> Vec<PointI> {
    let mut pts: Vec<PointI> = points.to_vec();
    pts.sort_by(|a, b| a.x.cmp(&b.x).then(a.y.cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<PointI> = Vec::with_capacity(pts.len() * 2);

    // Lower chain
    for p in &pts {
        while hull.len() >= 2 && PointI::cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(*p);
    }

    // Upper chain
    let lower_len = hull.len() + 1;
    for p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && PointI::cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0
        {
            hull.pop();
        }
        hull.push(*p);
    }

    // Last point repeats the first
    hull.pop();
    hull
}

/// Drop points that sit in the middle of a straight run of a closed chain
///
/// Turns and reversals (the tips of one-pixel-wide spurs) are kept, so the
/// traced shape is unchanged while long edges collapse to their endpoints.
pub fn simplify_collinear(points: &[PointI]) -> Vec<PointI> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = &points[(i + n - 1) % n];
        let cur = &points[i];
        let next = &points[(i + 1) % n];
        if cur == prev {
            continue;
        }
        let cross = PointI::cross(prev, cur, next);
        let dot = (cur.x - prev.x) as i64 * (next.x - cur.x) as i64
            + (cur.y - prev.y) as i64 * (next.y - cur.y) as i64;
        if cross != 0 || dot <= 0 {
            out.push(*cur);
        }
    }
    if out.is_empty() {
        // Every point identical
        out.push(points[0]);
    }
    out
}

fn on_segment(a: &PointI, b: &PointI, p: &PointI) -> bool {
    PointI::cross(a, b, p) == 0
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}

/// Classify a point against a closed polygon (even-odd rule)
pub fn point_polygon_test(polygon: &[PointI], p: &PointI) -> Containment {
    let n = polygon.len();
    if n == 0 {
        return Containment::Outside;
    }

    let mut inside = false;
    for i in 0..n {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        if on_segment(a, b, p) {
            return Containment::Boundary;
        }
        if (a.y > p.y) != (b.y > p.y) {
            let t = (p.y - a.y) as f64 / (b.y - a.y) as f64;
            let x_cross = a.x as f64 + t * (b.x - a.x) as f64;
            if (p.x as f64) < x_cross {
                inside = !inside;
            }
        }
    }

    if inside {
        Containment::Inside
    } else {
        Containment::Outside
    }
}

/// True only for points strictly inside the polygon (boundary excluded)
pub fn is_strictly_inside(polygon: &[PointI], x: i32, y: i32) -> bool {
    point_polygon_test(polygon, &PointI::new(x, y)) == Containment::Inside
}
