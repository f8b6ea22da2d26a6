// In-memory sources — programmatic construction and test fixtures

use crate::dataset::{
    DetectionSample, DetectionSource, FrustumSource, TrainingSample, TrainingSource,
};
use crate::error::{Error, Result};

/// A training source backed by a `Vec<TrainingSample>`.
///
/// The one-hot capability is inferred from the first sample; every sample
/// must agree.
pub struct VecTrainingSource {
    samples: Vec<TrainingSample>,
    one_hot: bool,
    source_name: String,
}

impl VecTrainingSource {
    /// Create a source from a vector of samples.
    ///
    /// # Panics
    /// Panics if `samples` is empty or the samples disagree on the one-hot
    /// class vector.
    pub fn new(samples: Vec<TrainingSample>, name: &str) -> Self {
        assert!(
            !samples.is_empty(),
            "VecTrainingSource: need at least one sample"
        );
        let one_hot = samples[0].one_hot.is_some();
        assert!(
            samples.iter().all(|s| s.one_hot.is_some() == one_hot),
            "VecTrainingSource: samples disagree on the one-hot class vector"
        );
        Self {
            samples,
            one_hot,
            source_name: name.to_string(),
        }
    }
}

impl FrustumSource for VecTrainingSource {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn one_hot(&self) -> bool {
        self.one_hot
    }

    fn name(&self) -> &str {
        &self.source_name
    }
}

impl TrainingSource for VecTrainingSource {
    fn training_sample(&self, index: usize) -> Result<TrainingSample> {
        self.samples
            .get(index)
            .cloned()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.samples.len(),
            })
    }
}

/// A detection source backed by a `Vec<DetectionSample>`.
pub struct VecDetectionSource {
    samples: Vec<DetectionSample>,
    one_hot: bool,
    source_name: String,
}

impl VecDetectionSource {
    /// Create a source from a vector of samples.
    ///
    /// # Panics
    /// Panics if `samples` is empty or the samples disagree on the one-hot
    /// class vector.
    pub fn new(samples: Vec<DetectionSample>, name: &str) -> Self {
        assert!(
            !samples.is_empty(),
            "VecDetectionSource: need at least one sample"
        );
        let one_hot = samples[0].one_hot.is_some();
        assert!(
            samples.iter().all(|s| s.one_hot.is_some() == one_hot),
            "VecDetectionSource: samples disagree on the one-hot class vector"
        );
        Self {
            samples,
            one_hot,
            source_name: name.to_string(),
        }
    }
}

impl FrustumSource for VecDetectionSource {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn one_hot(&self) -> bool {
        self.one_hot
    }

    fn name(&self) -> &str {
        &self.source_name
    }
}

impl DetectionSource for VecDetectionSource {
    fn detection_sample(&self, index: usize) -> Result<DetectionSample> {
        self.samples
            .get(index)
            .cloned()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.samples.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    fn training_sample(index: usize, one_hot: bool) -> TrainingSample {
        TrainingSample {
            points: Array2::from_elem((8, 4), index as f64),
            seg: Array1::zeros(8),
            center: [index as f64, 0.0, 0.0],
            heading_class: index as i32,
            heading_residual: 0.0,
            size_class: 0,
            size_residual: [0.0; 3],
            rot_angle: 0.0,
            one_hot: one_hot.then(|| [1.0, 0.0, 0.0]),
        }
    }

    #[test]
    fn vec_training_source_lookup() {
        let source = VecTrainingSource::new(
            (0..4).map(|i| training_sample(i, false)).collect(),
            "toy",
        );
        assert_eq!(source.len(), 4);
        assert!(!source.one_hot());
        assert_eq!(source.name(), "toy");

        let s = source.training_sample(2).unwrap();
        assert_eq!(s.center, [2.0, 0.0, 0.0]);
        assert_eq!(s.heading_class, 2);
    }

    #[test]
    fn vec_training_source_out_of_range() {
        let source =
            VecTrainingSource::new(vec![training_sample(0, false)], "toy");
        let err = source.training_sample(5).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 5, len: 1 }));
    }

    #[test]
    fn vec_training_source_infers_one_hot() {
        let source = VecTrainingSource::new(
            (0..2).map(|i| training_sample(i, true)).collect(),
            "toy",
        );
        assert!(source.one_hot());
        assert!(source.training_sample(0).unwrap().one_hot.is_some());
    }

    #[test]
    fn vec_detection_source_lookup() {
        let samples = (0..3)
            .map(|i| DetectionSample {
                points: Array2::zeros((8, 4)),
                rot_angle: i as f64,
                prob: 0.5,
                one_hot: None,
            })
            .collect();
        let source = VecDetectionSource::new(samples, "det");
        assert_eq!(source.len(), 3);
        assert_eq!(source.detection_sample(1).unwrap().rot_angle, 1.0);
        assert!(matches!(
            source.detection_sample(3),
            Err(Error::IndexOutOfRange { .. })
        ));
    }
}
