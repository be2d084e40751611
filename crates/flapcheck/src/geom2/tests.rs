use super::rand::{draw_polygon_radial, RadialCfg, ReplayToken, VertexCount};
use super::polygon::point_to_segment_distance;
use super::*;
use proptest::prelude::*;

fn unit_square() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ]
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]
}

#[test]
fn unit_square_area_centroid_containment() {
    let sq = unit_square();
    assert!((polygon_area(&sq) - 1.0).abs() < 1e-12);
    let c = polygon_centroid(&sq);
    assert!((c.x - 0.5).abs() < 1e-12 && (c.y - 0.5).abs() < 1e-12);
    assert!(point_in_polygon(Point::new(0.5, 0.5), &sq));
    assert!(!point_in_polygon(Point::new(2.0, 2.0), &sq));
}

#[test]
fn degenerate_inputs_use_fallbacks() {
    let two = [Point::new(0.0, 0.0), Point::new(4.0, 2.0)];
    assert_eq!(polygon_area(&two), 0.0);
    assert_eq!(polygon_area(&[]), 0.0);
    assert!(!point_in_polygon(Point::new(1.0, 0.5), &two));
    assert!(!polygons_overlap(&two, &unit_square()));

    assert_eq!(polygon_centroid(&[]), Point::new(0.0, 0.0));
    assert_eq!(polygon_centroid(&two[..1]), Point::new(0.0, 0.0));
    assert_eq!(polygon_centroid(&two), Point::new(2.0, 1.0));

    // Collinear triangle: zero signed area → vertex mean.
    let line = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(5.0, 5.0),
    ];
    let c = polygon_centroid(&line);
    assert!((c.x - 2.0).abs() < 1e-12 && (c.y - 2.0).abs() < 1e-12);

    assert!(point_to_polygon_distance(Point::new(1.0, 1.0), &[]).is_infinite());
    let single = [Point::new(3.0, 4.0)];
    assert!((point_to_polygon_distance(Point::new(0.0, 0.0), &single) - 5.0).abs() < 1e-12);
}

#[test]
fn distance_to_outline() {
    let sq = unit_square();
    assert!((point_to_polygon_distance(Point::new(0.5, -1.0), &sq) - 1.0).abs() < 1e-12);
    // Interior points measure to the nearest edge, not zero.
    assert!((point_to_polygon_distance(Point::new(0.5, 0.4), &sq) - 0.4).abs() < 1e-12);
    // Beyond a corner the clamped projection lands on the vertex.
    let d = point_to_polygon_distance(Point::new(2.0, 2.0), &sq);
    assert!((d - std::f64::consts::SQRT_2).abs() < 1e-12);
}

#[test]
fn segment_distance_zero_length() {
    let p = Point::new(0.0, 3.0);
    let a = Point::new(0.0, -1.0);
    assert!((point_to_segment_distance(p, a, a) - 4.0).abs() < 1e-12);
}

#[test]
fn overlap_detects_contained_vertex() {
    let sq = unit_square();
    let shifted = rect(0.5, 0.5, 1.5, 1.5);
    assert!(polygons_overlap(&sq, &shifted));
    // Fully nested: only the inner polygon's vertices are contained.
    let inner = rect(0.25, 0.25, 0.75, 0.75);
    assert!(polygons_overlap(&sq, &inner));
    assert!(polygons_overlap(&inner, &sq));
}

#[test]
fn overlap_is_vertex_containment_only() {
    // A "+" of two thin rectangles: edges cross, no vertex is contained.
    let horizontal = rect(-10.0, -1.0, 10.0, 1.0);
    let vertical = rect(-1.0, -10.0, 1.0, 10.0);
    assert!(!polygons_overlap(&horizontal, &vertical));

    // Touching along part of an edge without a contained vertex.
    let sq = unit_square();
    let beside = rect(1.0, 0.25, 2.0, 0.75);
    assert!(!polygons_overlap(&sq, &beside));

    let far = rect(5.0, 5.0, 6.0, 6.0);
    assert!(!polygons_overlap(&sq, &far));
}

#[test]
fn transforms_move_vertices() {
    let sq = unit_square();
    let scaled = scale_about(&sq, Point::new(0.0, 0.0), 2.0);
    assert!((polygon_area(&scaled) - 4.0).abs() < 1e-12);
    let moved = translate(&sq, 3.0, -1.0);
    assert_eq!(moved[2], Point::new(4.0, 0.0));
    let bb = BoundingBox::of(&moved).unwrap();
    assert_eq!(bb.min, Point::new(3.0, -1.0));
    assert!((bb.width() - 1.0).abs() < 1e-12 && (bb.height() - 1.0).abs() < 1e-12);
    assert!(BoundingBox::of(&[]).is_none());
}

#[test]
fn radial_sampler_is_reproducible_and_contains_center() {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Uniform { min: 6, max: 14 },
        ..RadialCfg::default()
    };
    let tok = ReplayToken { seed: 42, index: 0 };
    assert_eq!(draw_polygon_radial(cfg, tok), draw_polygon_radial(cfg, tok));
    let mut t = tok;
    for _ in 0..50 {
        let poly = draw_polygon_radial(cfg, t);
        assert!(poly.len() >= 6 && poly.len() <= 14);
        assert!(point_in_polygon(cfg.center, &poly));
        assert!(polygon_area(&poly) > 0.0);
        t = t.next();
    }
}

fn coords() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 3..16)
        .prop_map(|v| v.into_iter().map(Point::from).collect())
}

proptest! {
    #[test]
    fn area_invariant_under_rotation_and_reversal(poly in coords(), shift in 0usize..16) {
        let a = polygon_area(&poly);
        let mut rotated = poly.clone();
        rotated.rotate_left(shift % poly.len());
        let mut reversed = poly.clone();
        reversed.reverse();
        let tol = 1e-9 * (1.0 + a) + 1e-6;
        prop_assert!((polygon_area(&rotated) - a).abs() < tol);
        prop_assert!((polygon_area(&reversed) - a).abs() < tol);
    }

    #[test]
    fn centroid_follows_translation(seed in 0u64..500, dx in -200.0f64..200.0, dy in -200.0f64..200.0) {
        let poly = draw_polygon_radial(RadialCfg::default(), ReplayToken { seed, index: 0 });
        let c = polygon_centroid(&poly);
        let c2 = polygon_centroid(&translate(&poly, dx, dy));
        prop_assert!((c2.x - c.x - dx).abs() < 1e-6);
        prop_assert!((c2.y - c.y - dy).abs() < 1e-6);
    }

    #[test]
    fn star_polygon_overlaps_scaled_copy(seed in 0u64..500, factor in 0.3f64..0.9) {
        let cfg = RadialCfg::default();
        let poly = draw_polygon_radial(cfg, ReplayToken { seed, index: 1 });
        let inner = scale_about(&poly, cfg.center, factor);
        prop_assert!(polygons_overlap(&poly, &inner));
        prop_assert!(polygon_area(&inner) < polygon_area(&poly));
    }

    #[test]
    fn outside_points_are_at_positive_distance(seed in 0u64..500) {
        let cfg = RadialCfg::default();
        let poly = draw_polygon_radial(cfg, ReplayToken { seed, index: 2 });
        // Radii never exceed base_radius * sqrt(aspect) * (1 + jitter) < 92.
        let far = Point::new(cfg.center.x + 200.0, cfg.center.y);
        prop_assert!(!point_in_polygon(far, &poly));
        prop_assert!(point_to_polygon_distance(far, &poly) >= 200.0 - 92.0);
    }
}
