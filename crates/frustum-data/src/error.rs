/// All errors that can occur while assembling a batch.
///
/// Every failure is fatal to the call that produced it: there is no retry and
/// no partial batch. The caller (the training or evaluation driver) decides
/// whether to abort the run or skip the batch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested `[start, end)` range does not fit the index list.
    #[error("batch range {start}..{end} is invalid for index list of length {len}")]
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },

    /// A sample index is out of range for the source.
    #[error("index {index} out of range for source of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A sample's point matrix has fewer rows than the points-per-sample count.
    #[error("sample {index}: point matrix has {got} rows, need at least {need}")]
    NotEnoughPoints {
        index: usize,
        got: usize,
        need: usize,
    },

    /// A sample's point matrix has fewer columns than the requested channels.
    #[error("sample {index}: point matrix has {got} channels, need at least {need}")]
    NotEnoughChannels {
        index: usize,
        got: usize,
        need: usize,
    },

    /// A sample's segmentation labels do not cover exactly the retained points.
    #[error("sample {index}: segmentation labels have length {got}, expected {expected}")]
    SegLengthMismatch {
        index: usize,
        got: usize,
        expected: usize,
    },

    /// A sample disagrees with the source's declared one-hot capability.
    #[error("sample {index}: source declares one_hot={declared} but the sample disagrees")]
    OneHotMismatch { index: usize, declared: bool },
}

/// Convenience Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
