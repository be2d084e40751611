//! Tolerance defaults for polygon math (internal).
//!
//! Policy
//! - Fixed constants; the drawing space is small (0–1000) and well scaled, so
//!   there is no per-call tolerance juggling.

/// Below this |signed area| a polygon is treated as degenerate by the centroid.
pub(crate) const DEGENERATE_AREA_EPS: f64 = 1e-10;
