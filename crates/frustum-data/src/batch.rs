// Batch containers — dense fixed-shape outputs of the assembler

use ndarray::{Array1, Array2, Array3};

/// A batch of supervised samples, one row per sample.
///
/// Row `i` of every container refers to the same source sample; containers
/// are allocated fresh per call and owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingBatch {
    /// Point features `[batch, num_point, num_channel]`.
    pub data: Array3<f64>,
    /// Per-point segmentation class `[batch, num_point]`.
    pub label: Array2<i32>,
    /// Object center offset `[batch, 3]`.
    pub center: Array2<f64>,
    /// Heading bin index `[batch]`.
    pub heading_class: Array1<i32>,
    /// Residual angle within the bin `[batch]`.
    pub heading_residual: Array1<f64>,
    /// Size-template index `[batch]`.
    pub size_class: Array1<i32>,
    /// Residual size offset `[batch, 3]`.
    pub size_residual: Array2<f64>,
    /// Frame rotation angle `[batch]`.
    pub rot_angle: Array1<f64>,
}

impl TrainingBatch {
    /// Number of samples in the batch.
    pub fn batch_size(&self) -> usize {
        self.data.shape()[0]
    }
}

/// A batch of inference-only samples from external 2D detections.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionBatch {
    /// Point features `[batch, num_point, num_channel]`.
    pub data: Array3<f64>,
    /// Frame rotation angle `[batch]`.
    pub rot_angle: Array1<f64>,
    /// External detector confidence `[batch]`.
    pub prob: Array1<f64>,
}

impl DetectionBatch {
    /// Number of samples in the batch.
    pub fn batch_size(&self) -> usize {
        self.data.shape()[0]
    }
}

/// An assembled batch, with or without the one-hot class container.
///
/// The variant is selected once per call from the source's declared
/// capability ([`FrustumSource::one_hot`](crate::FrustumSource::one_hot)),
/// never inspected per sample.
#[derive(Debug, Clone, PartialEq)]
pub enum Assembled<T> {
    /// The source does not carry class vectors.
    Plain(T),
    /// The source carries class vectors; `one_hot` is `[batch, 3]`.
    WithOneHot { batch: T, one_hot: Array2<f64> },
}

impl<T> Assembled<T> {
    /// The batch containers, whichever variant holds them.
    pub fn batch(&self) -> &T {
        match self {
            Assembled::Plain(batch) => batch,
            Assembled::WithOneHot { batch, .. } => batch,
        }
    }

    /// The one-hot container, if the source declared the capability.
    pub fn one_hot(&self) -> Option<&Array2<f64>> {
        match self {
            Assembled::Plain(_) => None,
            Assembled::WithOneHot { one_hot, .. } => Some(one_hot),
        }
    }

    /// Split into the batch and the optional one-hot container.
    pub fn into_parts(self) -> (T, Option<Array2<f64>>) {
        match self {
            Assembled::Plain(batch) => (batch, None),
            Assembled::WithOneHot { batch, one_hot } => (batch, Some(one_hot)),
        }
    }
}

/// Output of the mode-dispatching entry point
/// ([`BatchAssembler::batch`](crate::BatchAssembler::batch)).
#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
    Training(Assembled<TrainingBatch>),
    Detection(Assembled<DetectionBatch>),
}

impl Batch {
    /// Number of samples in the batch, regardless of mode.
    pub fn batch_size(&self) -> usize {
        match self {
            Batch::Training(assembled) => assembled.batch().batch_size(),
            Batch::Detection(assembled) => assembled.batch().batch_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembled_accessors() {
        let batch = DetectionBatch {
            data: Array3::zeros((2, 4, 3)),
            rot_angle: Array1::zeros(2),
            prob: Array1::zeros(2),
        };

        let plain = Assembled::Plain(batch.clone());
        assert_eq!(plain.batch().batch_size(), 2);
        assert!(plain.one_hot().is_none());

        let with = Assembled::WithOneHot {
            batch,
            one_hot: Array2::zeros((2, 3)),
        };
        assert_eq!(with.one_hot().unwrap().shape(), &[2, 3]);

        let (inner, one_hot) = with.into_parts();
        assert_eq!(inner.batch_size(), 2);
        assert!(one_hot.is_some());
    }
}
