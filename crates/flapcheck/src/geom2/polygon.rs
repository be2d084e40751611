//! Vertex-list polygon queries.
//!
//! - `polygon_area`: shoelace, absolute value.
//! - `point_in_polygon`: ray casting with the half-open edge rule.
//! - `polygons_overlap`: vertex-containment approximation (see its docs).
//! - `polygon_centroid`: area-weighted, with mean fallbacks.
//! - `point_to_polygon_distance`: min over closed edges.

use super::cfg::DEGENERATE_AREA_EPS;
use super::types::Point;

/// Absolute polygon area by the shoelace formula. Fewer than 3 points → 0.
///
/// Invariant under cyclic rotation of the vertex list and under reversal of
/// the winding order.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    signed_area2(points).abs() / 2.0
}

/// Twice the signed area (positive for counterclockwise in a y-up frame).
#[inline]
fn signed_area2(points: &[Point]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let p = points[i];
            let q = points[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum()
}

/// Ray-casting containment test.
///
/// Uses the half-open rule `(yi > py) != (yj > py)` so a ray through a shared
/// vertex is counted once. Points exactly on an edge may land on either side.
/// Fewer than 3 points → `false`.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            // pj.y != pi.y here, so the division is safe.
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// True iff some vertex of `a` lies inside `b` or some vertex of `b` lies inside `a`.
///
/// Limitation: this is vertex containment, not a true intersection test.
/// Two polygons whose edges cross without either containing a vertex of the
/// other (a "+" made of two long thin rectangles) report `false`, and so do
/// polygons that only share an edge.
pub fn polygons_overlap(a: &[Point], b: &[Point]) -> bool {
    if a.len() < 3 || b.len() < 3 {
        return false;
    }
    a.iter().any(|&v| point_in_polygon(v, b)) || b.iter().any(|&v| point_in_polygon(v, a))
}

/// Area-weighted centroid.
///
/// 0 points → origin, 1 → the point, 2 → midpoint. A polygon with
/// `|signed area| < 1e-10` falls back to the vertex mean.
pub fn polygon_centroid(points: &[Point]) -> Point {
    match points {
        [] => return Point::default(),
        [p] => return *p,
        [a, b] => return Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0),
        _ => {}
    }
    let n = points.len();
    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut area2 = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        area2 += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    let signed_area = area2 / 2.0;
    if signed_area.abs() < DEGENERATE_AREA_EPS {
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        return Point::new(sx / n as f64, sy / n as f64);
    }
    Point::new(cx / (6.0 * signed_area), cy / (6.0 * signed_area))
}

/// Euclidean distance.
#[inline]
pub fn point_distance(a: Point, b: Point) -> f64 {
    (a.to_vec2() - b.to_vec2()).norm()
}

/// Minimum distance from `point` to any edge of the closed polygon.
///
/// Empty polygon → `f64::INFINITY`; a single vertex → plain point distance.
/// Interior points are not zero: this is distance to the outline.
pub fn point_to_polygon_distance(point: Point, polygon: &[Point]) -> f64 {
    match polygon {
        [] => f64::INFINITY,
        [v] => point_distance(point, *v),
        _ => {
            let n = polygon.len();
            (0..n)
                .map(|i| point_to_segment_distance(point, polygon[i], polygon[(i + 1) % n]))
                .fold(f64::INFINITY, f64::min)
        }
    }
}

/// Distance to the segment `[start, end]` via the clamped projection parameter.
pub(crate) fn point_to_segment_distance(point: Point, start: Point, end: Point) -> f64 {
    let p = point.to_vec2();
    let a = start.to_vec2();
    let d = end.to_vec2() - a;
    let len_sq = d.norm_squared();
    if len_sq == 0.0 {
        return point_distance(point, start);
    }
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    (p - (a + d * t)).norm()
}
