//! Affine moves of whole polygons, used when applying drawing corrections.

use nalgebra::Vector2;

use super::types::Point;

/// Scale every vertex about `center` by `factor`.
pub fn scale_about(points: &[Point], center: Point, factor: f64) -> Vec<Point> {
    let c = center.to_vec2();
    points
        .iter()
        .map(|p| Point::from(c + (p.to_vec2() - c) * factor))
        .collect()
}

/// Shift every vertex by `(dx, dy)`.
pub fn translate(points: &[Point], dx: f64, dy: f64) -> Vec<Point> {
    let t = Vector2::new(dx, dy);
    points.iter().map(|p| Point::from(p.to_vec2() + t)).collect()
}
