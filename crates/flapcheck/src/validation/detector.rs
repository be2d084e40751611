//! Landmark detection seam.
//!
//! Model
//! - `LandmarkDetector` is what the aggregator needs: image in, landmarks out,
//!   `None` on any failure.
//! - `SharedModel` holds a lazily loaded face-mesh model. The first caller
//!   loads it while holding the slot lock, so concurrent callers wait for that
//!   one load and then share the same `Arc`. A failed load leaves the slot
//!   empty and the next caller retries.
//! - `MeshDetector` glues the two together with `FaceLandmarks::from_mesh`.

use std::sync::{Arc, Mutex, PoisonError};

use crate::anatomy::{FaceLandmarks, ImageDims};
use crate::geom2::Point;

/// Anything that can place facial landmarks on an image.
pub trait LandmarkDetector {
    type Image: ?Sized;

    fn detect(&self, image: &Self::Image, dims: ImageDims) -> Option<FaceLandmarks>;
}

/// Landmarks the caller already has; ignores the image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrecomputedLandmarks(pub Option<FaceLandmarks>);

impl LandmarkDetector for PrecomputedLandmarks {
    type Image = ();

    fn detect(&self, _image: &(), _dims: ImageDims) -> Option<FaceLandmarks> {
        self.0.clone()
    }
}

/// A loaded face-mesh estimator returning pixel-space keypoints.
pub trait FaceMeshModel {
    type Image: ?Sized;

    /// Keypoints of the first detected face, `None` when no face is found.
    fn estimate(&self, image: &Self::Image) -> Option<Vec<Point>>;
}

/// Produces a model; may be slow and may fail.
pub trait ModelLoader {
    type Model;
    type Error: std::fmt::Display;

    fn load(&self) -> Result<Self::Model, Self::Error>;
}

/// Load-once holder for a model.
pub struct SharedModel<L: ModelLoader> {
    loader: L,
    slot: Mutex<Option<Arc<L::Model>>>,
}

impl<L: ModelLoader> SharedModel<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            slot: Mutex::new(None),
        }
    }

    /// The loaded model, loading it first if nobody has yet.
    pub fn get(&self) -> Result<Arc<L::Model>, L::Error> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(model) = slot.as_ref() {
            return Ok(Arc::clone(model));
        }
        tracing::info!("loading face mesh model");
        let model = Arc::new(self.loader.load()?);
        *slot = Some(Arc::clone(&model));
        Ok(model)
    }

    pub fn is_loaded(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// Face-mesh backed detector.
pub struct MeshDetector<L: ModelLoader> {
    model: SharedModel<L>,
}

impl<L: ModelLoader> MeshDetector<L> {
    pub fn new(loader: L) -> Self {
        Self {
            model: SharedModel::new(loader),
        }
    }

    pub fn model(&self) -> &SharedModel<L> {
        &self.model
    }
}

impl<L> LandmarkDetector for MeshDetector<L>
where
    L: ModelLoader,
    L::Model: FaceMeshModel,
{
    type Image = <L::Model as FaceMeshModel>::Image;

    fn detect(&self, image: &Self::Image, dims: ImageDims) -> Option<FaceLandmarks> {
        let model = match self.model.get() {
            Ok(m) => m,
            Err(err) => {
                tracing::warn!(error = %err, "face mesh model failed to load");
                return None;
            }
        };
        let Some(keypoints) = model.estimate(image) else {
            tracing::warn!("no face detected");
            return None;
        };
        FaceLandmarks::from_mesh(&keypoints, dims)
    }
}
