//! # frustum-data
//!
//! Fixed-size batch assembly for frustum point-cloud object detection.
//!
//! This crate provides:
//! - [`TrainingSource`] / [`DetectionSource`] traits — index-based lookup
//!   contracts for the two batching modes
//! - [`BatchAssembler`] — single-pass assembly of `idxs[start..end]` into
//!   dense, pre-sized containers
//! - [`Assembled`] — batch output with or without the one-hot class
//!   container, selected once from the source's declared capability
//! - [`VecTrainingSource`] / [`VecDetectionSource`] — in-memory sources
//!
//! Shuffling, augmentation, persistence, and device placement are the
//! caller's or the source's responsibility; the assembler only packs slots.

pub mod assembler;
pub mod batch;
pub mod dataset;
pub mod error;
pub mod memory;

pub use assembler::{BatchAssembler, BatchMode};
pub use batch::{Assembled, Batch, DetectionBatch, TrainingBatch};
pub use dataset::{
    DetectionSample, DetectionSource, FrustumSource, TrainingSample, TrainingSource,
    ONE_HOT_CLASSES,
};
pub use error::{Error, Result};
pub use memory::{VecDetectionSource, VecTrainingSource};
