//! Random flap-like outlines for fixtures and benches.
//!
//! Model
//! - Vertices sit on an ellipse (semi-axes `base_radius·√aspect` and
//!   `base_radius/√aspect`) at evenly spaced parameter angles, each with a
//!   bounded angular and radial perturbation. The ellipse is then rotated and
//!   moved to `center`.
//! - Angular jitter stays below half the spacing, so vertex angles remain
//!   sorted and the outline is simple and star-shaped about `center`.
//! - A `ReplayToken` `(seed, index)` fully determines a draw.

use nalgebra::{Rotation2, Vector2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::Point;

const MAX_ANGLE_JITTER: f64 = 0.45;
const MAX_RADIAL_JITTER: f64 = 0.9;

/// How many vertices an outline gets.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    /// Inclusive range.
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn draw(self, rng: &mut StdRng) -> usize {
        let (lo, hi) = match self {
            VertexCount::Fixed(n) => (n, n),
            VertexCount::Uniform { min, max } => (min, max.max(min)),
        };
        rng.gen_range(lo.max(3)..=hi.max(3))
    }
}

/// Outline sampler configuration. Lengths are in drawing units (0–1000 space).
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Per-vertex angular perturbation, as a fraction of the spacing 2π/n.
    pub angle_jitter_frac: f64,
    /// Per-vertex relative radius perturbation, `r·(1 ± radial_jitter)`.
    pub radial_jitter: f64,
    pub base_radius: f64,
    /// Major/minor axis ratio; 1 gives a jittered circle.
    pub aspect: f64,
    pub center: Point,
    /// Major-axis direction in radians; `None` draws one.
    pub rotation: Option<f64>,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 60.0,
            aspect: 1.5,
            center: Point::new(500.0, 500.0),
            rotation: None,
        }
    }
}

/// Identifies one reproducible draw within a seeded stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn next(self) -> Self {
        Self {
            index: self.index.wrapping_add(1),
            ..self
        }
    }

    fn rng(self) -> StdRng {
        // Fold the index into the seed bytes so neighbouring indices decorrelate.
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&self.seed.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.index.to_le_bytes());
        bytes[16..24].copy_from_slice(&(self.seed ^ self.index.rotate_left(29)).to_le_bytes());
        bytes[24..].copy_from_slice(&0x6a09_e667_f3bc_c908u64.to_le_bytes());
        StdRng::from_seed(bytes)
    }
}

/// Draw one outline; always at least 3 vertices, counter-clockwise in parameter order.
pub fn draw_polygon_radial(cfg: RadialCfg, tok: ReplayToken) -> Vec<Point> {
    let mut rng = tok.rng();
    let n = cfg.vertex_count.draw(&mut rng);
    let spacing = std::f64::consts::TAU / n as f64;
    let aj = cfg.angle_jitter_frac.clamp(0.0, MAX_ANGLE_JITTER) * spacing;
    let rj = cfg.radial_jitter.clamp(0.0, MAX_RADIAL_JITTER);
    let stretch = cfg.aspect.max(1.0).sqrt();
    let (a, b) = (cfg.base_radius.abs() * stretch, cfg.base_radius.abs() / stretch);
    let rot = Rotation2::new(
        cfg.rotation
            .unwrap_or_else(|| rng.gen_range(0.0..std::f64::consts::PI)),
    );
    let c = cfg.center.to_vec2();

    (0..n)
        .map(|k| {
            let t = k as f64 * spacing + rng.gen_range(-1.0..=1.0) * aj;
            let scale = 1.0 + rng.gen_range(-1.0..=1.0) * rj;
            let local = Vector2::new(a * t.cos(), b * t.sin()) * scale;
            Point::from(c + rot * local)
        })
        .collect()
}
