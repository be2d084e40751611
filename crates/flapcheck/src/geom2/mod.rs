//! Plain 2D polygon math over the 0–1000 drawing space.
//!
//! Purpose
//! - Area, containment, overlap, centroid and distance queries on vertex-list
//!   polygons as authored by the flap-drawing collaborator.
//! - Total functions: degenerate inputs map to documented fallback values
//!   (zero area, `false` containment, infinite distance) instead of errors.
//!
//! Polygons are `&[Point]` in vertex order, implicitly closed. Winding is
//! irrelevant for every query here.
//!
//! Code cross-refs: `anatomy::position` (geometric mode), `validation::corrections`.

mod cfg;
mod polygon;
pub mod rand;
mod transform;
mod types;

pub use polygon::{
    point_distance, point_in_polygon, point_to_polygon_distance, polygon_area, polygon_centroid,
    polygons_overlap,
};
pub use transform::{scale_about, translate};
pub use types::{BoundingBox, Point};

#[cfg(test)]
mod tests;
