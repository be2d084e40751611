//! Validate a few random flap outlines over a fixed defect, in both position modes.
//!
//! Usage:
//!   cargo run -p flapcheck --example validate_demo
//!
//! Prints consistency/confidence per sample and the corrections that would apply.

use flapcheck::api::{
    apply_corrections, draw_polygon_radial, generate_correction_suggestions,
    validate_with_landmarks, DefectLocation, FaceLandmarks, FlapArea, FlapDrawing,
    FlapSuggestion, ImageDims, LabeledPolygon, Point, PositionCfg, PositionMode, RadialCfg,
    ReplayToken, ValidationCfg, VertexCount, VisionSummary,
};

fn face() -> FaceLandmarks {
    FaceLandmarks {
        left_eye: Point::new(255.0, 402.0),
        right_eye: Point::new(748.0, 395.0),
        nose_tip: Point::new(503.0, 455.0),
        nose_base: Point::new(501.0, 598.0),
        left_mouth_corner: Point::new(352.0, 684.0),
        right_mouth_corner: Point::new(646.0, 679.0),
        chin: Point::new(498.0, 752.0),
        left_ear_top: None,
        right_ear_top: None,
        left_ear_bottom: None,
        right_ear_bottom: None,
        left_eyebrow: Some(Point::new(262.0, 252.0)),
        right_eyebrow: Some(Point::new(738.0, 248.0)),
        forehead_center: None,
    }
}

fn main() {
    let vision = VisionSummary {
        detected_region: "burun".to_string(),
        defect_location: Some(DefectLocation {
            center_x: 500.0,
            center_y: 500.0,
            width: 80.0,
            height: 60.0,
            points: None,
        }),
        ..Default::default()
    };
    let outline_cfg = RadialCfg {
        vertex_count: VertexCount::Uniform { min: 6, max: 16 },
        base_radius: 55.0,
        ..Default::default()
    };
    let mut tok = ReplayToken {
        seed: 2025,
        index: 0,
    };

    for mode in [PositionMode::Heuristic, PositionMode::Geometric] {
        let cfg = ValidationCfg {
            position: PositionCfg {
                mode,
                ..Default::default()
            },
        };
        println!("mode {mode:?}");
        for i in 0..4 {
            let suggestion = FlapSuggestion {
                flap_name: format!("sample {i}"),
                suitability_score: 70.0 + 5.0 * i as f64,
                flap_drawing: Some(FlapDrawing {
                    flap_areas: vec![FlapArea {
                        points: draw_polygon_radial(outline_cfg, tok),
                        ..Default::default()
                    }],
                    donor_area: (i % 2 == 0).then(|| LabeledPolygon {
                        points: draw_polygon_radial(
                            RadialCfg {
                                center: Point::new(620.0, 520.0),
                                base_radius: 30.0,
                                ..outline_cfg
                            },
                            tok.next(),
                        ),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            };
            tok = tok.next().next();

            let r = validate_with_landmarks(
                Some(face()),
                ImageDims::default(),
                &suggestion,
                &vision,
                &cfg,
                chrono::Utc::now(),
            );
            let corrections = generate_correction_suggestions(&r);
            let corrected = apply_corrections(&suggestion, &corrections);
            println!(
                "  {}: consistency={} confidence={} ({:?}) coverage={:.1} corrections={} changed={}",
                suggestion.flap_name,
                r.anatomical_consistency.score,
                r.ai_confidence.score,
                r.ai_confidence.level,
                r.anatomical_consistency.flap_position.defect_coverage,
                corrections.len(),
                corrected != suggestion,
            );
        }
    }
}
