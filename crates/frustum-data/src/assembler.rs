// BatchAssembler — single-pass slot filling for both batching modes
//
// The assembler iterates `idxs[start..end]`, pulls one sample at a time from
// the source, and writes each field into row `i` of its pre-sized container.
// Any error aborts the whole call; no partial batch is ever returned.

use log::debug;
use ndarray::{aview1, s, Array1, Array2, Array3};

use crate::batch::{Assembled, Batch, DetectionBatch, TrainingBatch};
use crate::dataset::{DetectionSource, TrainingSource, ONE_HOT_CLASSES};
use crate::error::{Error, Result};

/// Which assembly path to take on the mode-dispatching entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    /// Supervised samples with ground-truth labels.
    Training,
    /// Inference-only samples from external 2D detector proposals.
    RgbDetection,
}

/// Assembles fixed-size batches from an indexable frustum source.
///
/// The assembler is stateless between calls: each call allocates its own
/// containers, fills them in a single pass, and hands them to the caller.
/// Batch size is `end - start` over the caller's index permutation, not over
/// the source itself.
#[derive(Debug, Clone, Copy)]
pub struct BatchAssembler {
    num_point: usize,
    num_channel: usize,
}

impl BatchAssembler {
    /// Create an assembler retaining `num_point` points and the first
    /// `num_channel` feature columns of every sample.
    ///
    /// The caller must not request more channels than its source provides;
    /// an undersized sample surfaces as an error at assembly time.
    ///
    /// # Panics
    /// Panics if `num_point` or `num_channel` is zero.
    pub fn new(num_point: usize, num_channel: usize) -> Self {
        assert!(num_point > 0, "BatchAssembler: num_point must be nonzero");
        assert!(
            num_channel > 0,
            "BatchAssembler: num_channel must be nonzero"
        );
        Self {
            num_point,
            num_channel,
        }
    }

    /// Points retained per sample.
    pub fn num_point(&self) -> usize {
        self.num_point
    }

    /// Feature columns retained per point.
    pub fn num_channel(&self) -> usize {
        self.num_channel
    }

    /// Assemble a supervised batch from `idxs[start..end]`.
    ///
    /// Returns [`Assembled::WithOneHot`] iff the source declares the one-hot
    /// capability, else [`Assembled::Plain`]. An empty range yields containers
    /// with a zero leading dimension.
    pub fn training_batch<S>(
        &self,
        source: &S,
        idxs: &[usize],
        start: usize,
        end: usize,
    ) -> Result<Assembled<TrainingBatch>>
    where
        S: TrainingSource + ?Sized,
    {
        let bsize = check_range(idxs, start, end)?;

        let mut data = Array3::zeros((bsize, self.num_point, self.num_channel));
        let mut label = Array2::zeros((bsize, self.num_point));
        let mut center = Array2::zeros((bsize, 3));
        let mut heading_class = Array1::zeros(bsize);
        let mut heading_residual = Array1::zeros(bsize);
        let mut size_class = Array1::zeros(bsize);
        let mut size_residual = Array2::zeros((bsize, 3));
        let mut rot_angle = Array1::zeros(bsize);
        let mut one_hot: Option<Array2<f64>> = source
            .one_hot()
            .then(|| Array2::zeros((bsize, ONE_HOT_CLASSES)));

        for i in 0..bsize {
            let index = idxs[start + i];
            let sample = source.training_sample(index)?;

            self.write_points(&mut data, i, &sample.points, index)?;
            if sample.seg.len() != self.num_point {
                return Err(Error::SegLengthMismatch {
                    index,
                    got: sample.seg.len(),
                    expected: self.num_point,
                });
            }
            label.row_mut(i).assign(&sample.seg);
            center.row_mut(i).assign(&aview1(&sample.center));
            heading_class[i] = sample.heading_class;
            heading_residual[i] = sample.heading_residual;
            size_class[i] = sample.size_class;
            size_residual.row_mut(i).assign(&aview1(&sample.size_residual));
            rot_angle[i] = sample.rot_angle;
            write_one_hot(one_hot.as_mut(), sample.one_hot, i, index)?;
        }

        debug!(
            "assembled training batch from `{}`: {} samples, {}x{} points",
            source.name(),
            bsize,
            self.num_point,
            self.num_channel
        );

        let batch = TrainingBatch {
            data,
            label,
            center,
            heading_class,
            heading_residual,
            size_class,
            size_residual,
            rot_angle,
        };
        Ok(match one_hot {
            Some(one_hot) => Assembled::WithOneHot { batch, one_hot },
            None => Assembled::Plain(batch),
        })
    }

    /// Assemble an inference-only batch from `idxs[start..end]`.
    ///
    /// Same range, point, and one-hot policy as
    /// [`training_batch`](Self::training_batch); the per-sample fields are the
    /// rotation angle and the external detector's confidence.
    pub fn detection_batch<S>(
        &self,
        source: &S,
        idxs: &[usize],
        start: usize,
        end: usize,
    ) -> Result<Assembled<DetectionBatch>>
    where
        S: DetectionSource + ?Sized,
    {
        let bsize = check_range(idxs, start, end)?;

        let mut data = Array3::zeros((bsize, self.num_point, self.num_channel));
        let mut rot_angle = Array1::zeros(bsize);
        let mut prob = Array1::zeros(bsize);
        let mut one_hot: Option<Array2<f64>> = source
            .one_hot()
            .then(|| Array2::zeros((bsize, ONE_HOT_CLASSES)));

        for i in 0..bsize {
            let index = idxs[start + i];
            let sample = source.detection_sample(index)?;

            self.write_points(&mut data, i, &sample.points, index)?;
            rot_angle[i] = sample.rot_angle;
            prob[i] = sample.prob;
            write_one_hot(one_hot.as_mut(), sample.one_hot, i, index)?;
        }

        debug!(
            "assembled detection batch from `{}`: {} samples, {}x{} points",
            source.name(),
            bsize,
            self.num_point,
            self.num_channel
        );

        let batch = DetectionBatch {
            data,
            rot_angle,
            prob,
        };
        Ok(match one_hot {
            Some(one_hot) => Assembled::WithOneHot { batch, one_hot },
            None => Assembled::Plain(batch),
        })
    }

    /// Assemble a batch in the given mode from a source supporting both.
    ///
    /// [`BatchMode::RgbDetection`] delegates entirely to
    /// [`detection_batch`](Self::detection_batch) and wraps the identical
    /// result; [`BatchMode::Training`] likewise wraps
    /// [`training_batch`](Self::training_batch).
    pub fn batch<S>(
        &self,
        source: &S,
        idxs: &[usize],
        start: usize,
        end: usize,
        mode: BatchMode,
    ) -> Result<Batch>
    where
        S: TrainingSource + DetectionSource + ?Sized,
    {
        match mode {
            BatchMode::Training => Ok(Batch::Training(
                self.training_batch(source, idxs, start, end)?,
            )),
            BatchMode::RgbDetection => Ok(Batch::Detection(
                self.detection_batch(source, idxs, start, end)?,
            )),
        }
    }

    /// Copy `points[..num_point, ..num_channel]` into row `row` of `data`.
    fn write_points(
        &self,
        data: &mut Array3<f64>,
        row: usize,
        points: &Array2<f64>,
        index: usize,
    ) -> Result<()> {
        if points.nrows() < self.num_point {
            return Err(Error::NotEnoughPoints {
                index,
                got: points.nrows(),
                need: self.num_point,
            });
        }
        if points.ncols() < self.num_channel {
            return Err(Error::NotEnoughChannels {
                index,
                got: points.ncols(),
                need: self.num_channel,
            });
        }
        data.slice_mut(s![row, .., ..])
            .assign(&points.slice(s![..self.num_point, ..self.num_channel]));
        Ok(())
    }
}

/// Validate `start <= end <= idxs.len()` and return the batch size.
fn check_range(idxs: &[usize], start: usize, end: usize) -> Result<usize> {
    if start > end || end > idxs.len() {
        return Err(Error::InvalidRange {
            start,
            end,
            len: idxs.len(),
        });
    }
    Ok(end - start)
}

/// Reconcile a sample's one-hot vector against the declared capability and
/// write it into row `row` if present.
fn write_one_hot(
    container: Option<&mut Array2<f64>>,
    vec: Option<[f64; ONE_HOT_CLASSES]>,
    row: usize,
    index: usize,
) -> Result<()> {
    match (container, vec) {
        (Some(container), Some(vec)) => {
            container.row_mut(row).assign(&aview1(&vec));
            Ok(())
        }
        (None, None) => Ok(()),
        (Some(_), None) => Err(Error::OneHotMismatch {
            index,
            declared: true,
        }),
        (None, Some(_)) => Err(Error::OneHotMismatch {
            index,
            declared: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_range_bounds() {
        let idxs = [0usize, 1, 2, 3];
        assert_eq!(check_range(&idxs, 1, 3).unwrap(), 2);
        assert_eq!(check_range(&idxs, 4, 4).unwrap(), 0);
        assert!(matches!(
            check_range(&idxs, 2, 5),
            Err(Error::InvalidRange { len: 4, .. })
        ));
        assert!(matches!(
            check_range(&idxs, 3, 1),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn assembler_accessors() {
        let assembler = BatchAssembler::new(512, 4);
        assert_eq!(assembler.num_point(), 512);
        assert_eq!(assembler.num_channel(), 4);
    }
}
