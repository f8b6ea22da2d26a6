// Frustum sources — sample records and per-mode lookup traits

use ndarray::{Array1, Array2};

use crate::error::Result;

/// Width of the one-hot class vector (car / pedestrian / cyclist).
pub const ONE_HOT_CLASSES: usize = 3;

/// A single supervised sample: a frustum point cloud plus its ground-truth
/// segmentation and amodal 3D box targets.
///
/// `points` is a `[rows, cols]` matrix with one point per row; the first
/// columns are coordinates, the remaining ones extra per-point features.
/// Batching retains the first `num_point` rows and `num_channel` columns, so
/// the matrix must be at least that large on both axes.
#[derive(Debug, Clone)]
pub struct TrainingSample {
    /// Per-point features, `[rows, cols]`.
    pub points: Array2<f64>,
    /// Per-point segmentation class, one entry per retained point.
    pub seg: Array1<i32>,
    /// Object center offset.
    pub center: [f64; 3],
    /// Discretized heading bin index.
    pub heading_class: i32,
    /// Residual angle within the heading bin.
    pub heading_residual: f64,
    /// Discretized size-template index.
    pub size_class: i32,
    /// Residual size offset from the template.
    pub size_residual: [f64; 3],
    /// Frame rotation angle applied to the sample.
    pub rot_angle: f64,
    /// One-hot class vector, present iff the source declares the capability.
    pub one_hot: Option<[f64; ONE_HOT_CLASSES]>,
}

/// A single inference-only sample driven by an external 2D detector proposal:
/// no ground-truth labels, but the detector's confidence score.
#[derive(Debug, Clone)]
pub struct DetectionSample {
    /// Per-point features, `[rows, cols]`.
    pub points: Array2<f64>,
    /// Frame rotation angle applied to the sample.
    pub rot_angle: f64,
    /// External detector confidence score.
    pub prob: f64,
    /// One-hot class vector, present iff the source declares the capability.
    pub one_hot: Option<[f64; ONE_HOT_CLASSES]>,
}

/// An indexable collection of frustum samples.
///
/// Implementations must be `Send + Sync`; this crate takes no locks, so
/// concurrent batching is safe exactly when the source's lookup is safe for
/// concurrent reads.
pub trait FrustumSource: Send + Sync {
    /// Total number of samples in the source.
    fn len(&self) -> usize;

    /// Whether the source is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every sample carries a one-hot class vector.
    ///
    /// This is a declared capability, fixed for the lifetime of the source;
    /// a sample that disagrees with it is a fatal batching error.
    fn one_hot(&self) -> bool;

    /// Optional human-readable name.
    fn name(&self) -> &str {
        "frustum"
    }
}

/// A source that yields supervised training samples.
pub trait TrainingSource: FrustumSource {
    /// Retrieve the training sample at position `index`.
    ///
    /// Must return [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange)
    /// for `index >= self.len()`. Lookup may have side effects (lazy loading);
    /// this crate does not control them.
    fn training_sample(&self, index: usize) -> Result<TrainingSample>;
}

/// A source that yields inference-only samples from external 2D detections.
pub trait DetectionSource: FrustumSource {
    /// Retrieve the detection sample at position `index`.
    ///
    /// Same bounds contract as [`TrainingSource::training_sample`].
    fn detection_sample(&self, index: usize) -> Result<DetectionSample>;
}
