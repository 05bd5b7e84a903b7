use crate::config::MAX_SQUARE_SEARCH_ITERATIONS;
use crate::models::{InscribedSquare, PointI};
use crate::utils::geometry::{bounding_rect, is_strictly_inside};
use rand::Rng;

/// Approximate the largest axis-aligned square strictly inside a polygon.
///
/// Seeds are drawn uniformly from the polygon's bounding box; seeds outside
/// the polygon are discarded. From each kept seed `(x1, y1)` the side `s`
/// starts at 1 and grows while `(x1+s, y1)`, `(x1, y1+s)` and `(x1+s, y1+s)`
/// all stay strictly inside, so the returned square spans pixels
/// `x1..x1+s` by `y1..y1+s`. The largest square wins; on ties the first found
/// is kept.
///
/// Returns [`InscribedSquare::DEGENERATE`] if no seed landed inside.
/// `iterations` is capped at [`MAX_SQUARE_SEARCH_ITERATIONS`]. Results are
/// reproducible for a seeded `rng`.
pub fn find_inscribed_square<R: Rng + ?Sized>(
    polygon: &[PointI],
    iterations: usize,
    rng: &mut R,
) -> InscribedSquare {
    let Some(bounds) = bounding_rect(polygon) else {
        return InscribedSquare::DEGENERATE;
    };

    let min_x = bounds.x as i32;
    let min_y = bounds.y as i32;
    let max_x = min_x + bounds.width as i32 - 1;
    let max_y = min_y + bounds.height as i32 - 1;

    let mut best = InscribedSquare::DEGENERATE;
    for _ in 0..iterations.min(MAX_SQUARE_SEARCH_ITERATIONS) {
        let x1 = rng.gen_range(min_x..=max_x);
        let y1 = rng.gen_range(min_y..=max_y);

        // Corners past the bounding box always fail, so this is the ceiling
        let cap = (max_x - x1).min(max_y - y1) + 1;
        if cap as u32 <= best.side {
            continue;
        }
        if !is_strictly_inside(polygon, x1, y1) {
            continue;
        }

        let mut s = 1;
        while s < cap && corners_inside(polygon, x1, y1, s) {
            s += 1;
        }

        if s as u32 > best.side {
            best = InscribedSquare {
                x: x1 as u32,
                y: y1 as u32,
                side: s as u32,
            };
        }
    }

    best
}

#[inline]
fn corners_inside(polygon: &[PointI], x1: i32, y1: i32, s: i32) -> bool {
    is_strictly_inside(polygon, x1 + s, y1)
        && is_strictly_inside(polygon, x1, y1 + s)
        && is_strictly_inside(polygon, x1 + s, y1 + s)
}
