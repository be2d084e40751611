//! Named facial landmarks and the face-mesh adapter.

use serde::{Deserialize, Serialize};

use crate::geom2::Point;

/// Side length of the normalized landmark space.
pub const NORMALIZED_EXTENT: f64 = 1000.0;

/// Pixel dimensions of the analysed image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageDims {
    pub width: f64,
    pub height: f64,
}

impl Default for ImageDims {
    fn default() -> Self {
        Self {
            width: NORMALIZED_EXTENT,
            height: NORMALIZED_EXTENT,
        }
    }
}

impl ImageDims {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
    #[inline]
    fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Anatomical reference points for one face, 0–1000 normalized.
///
/// Required points are always present once a face was detected; optional
/// ones are `None` when the detector could not place them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceLandmarks {
    pub left_eye: Point,
    pub right_eye: Point,
    pub nose_tip: Point,
    pub nose_base: Point,
    pub left_mouth_corner: Point,
    pub right_mouth_corner: Point,
    pub chin: Point,
    #[serde(default)]
    pub left_ear_top: Option<Point>,
    #[serde(default)]
    pub right_ear_top: Option<Point>,
    #[serde(default)]
    pub left_ear_bottom: Option<Point>,
    #[serde(default)]
    pub right_ear_bottom: Option<Point>,
    #[serde(default)]
    pub left_eyebrow: Option<Point>,
    #[serde(default)]
    pub right_eyebrow: Option<Point>,
    #[serde(default)]
    pub forehead_center: Option<Point>,
}

/// Face-mesh keypoint indices (468-point topology).
mod mesh {
    pub const LEFT_EYE: [usize; 2] = [33, 7];
    pub const RIGHT_EYE: [usize; 2] = [362, 382];
    pub const NOSE_TIP: usize = 1;
    pub const NOSE_BASE: usize = 2;
    pub const LEFT_MOUTH: usize = 61;
    pub const RIGHT_MOUTH: usize = 291;
    pub const CHIN: usize = 175;
    pub const LEFT_EYEBROW: usize = 107;
    pub const RIGHT_EYEBROW: usize = 336;
    pub const FOREHEAD: usize = 10;
    // The mesh has no separate ear lobe points; top and bottom share the tragus index.
    pub const LEFT_EAR: usize = 234;
    pub const RIGHT_EAR: usize = 454;
}

impl FaceLandmarks {
    /// Convert pixel-space face-mesh keypoints into normalized landmarks.
    ///
    /// Missing required keypoints land at the origin; missing optional ones
    /// are `None`. Returns `None` for an empty mesh or unusable dimensions.
    pub fn from_mesh(keypoints: &[Point], dims: ImageDims) -> Option<Self> {
        if keypoints.is_empty() || !dims.is_usable() {
            return None;
        }
        let at = |idx: usize| {
            keypoints.get(idx).map(|p| {
                Point::new(
                    p.x / dims.width * NORMALIZED_EXTENT,
                    p.y / dims.height * NORMALIZED_EXTENT,
                )
            })
        };
        let first_of = |idxs: &[usize]| idxs.iter().find_map(|&i| at(i));
        let required = |p: Option<Point>| p.unwrap_or_default();
        Some(Self {
            left_eye: required(first_of(&mesh::LEFT_EYE[..])),
            right_eye: required(first_of(&mesh::RIGHT_EYE[..])),
            nose_tip: required(at(mesh::NOSE_TIP)),
            nose_base: required(at(mesh::NOSE_BASE)),
            left_mouth_corner: required(at(mesh::LEFT_MOUTH)),
            right_mouth_corner: required(at(mesh::RIGHT_MOUTH)),
            chin: required(at(mesh::CHIN)),
            left_ear_top: at(mesh::LEFT_EAR),
            right_ear_top: at(mesh::RIGHT_EAR),
            left_ear_bottom: at(mesh::LEFT_EAR),
            right_ear_bottom: at(mesh::RIGHT_EAR),
            left_eyebrow: at(mesh::LEFT_EYEBROW),
            right_eyebrow: at(mesh::RIGHT_EYEBROW),
            forehead_center: at(mesh::FOREHEAD),
        })
    }
}
