//! Errors returned by the grid operations.

/// Errors that can occur while running a distance transform or a morphological operation.
#[derive(thiserror::Error, Debug)]
pub enum MorphologyError {
    /// Two grids that must share the same lattice have different dimensions.
    #[error("grid dimensions {found:?} do not match the expected dimensions {expected:?}")]
    DimensionMismatch {
        /// The dimensions `[width, height, depth]` of the reference grid.
        expected: [usize; 3],
        /// The dimensions `[width, height, depth]` of the offending grid.
        found: [usize; 3],
    },
    /// A candidate value does not fit in the buckets of a candidate queue.
    #[error("candidate value {value} is outside of the bucket range [0, {capacity})")]
    BucketOutOfRange {
        /// The rejected value.
        value: i64,
        /// The number of buckets of the queue.
        capacity: usize,
    },
    /// A distance value cannot be stored as a voxel attribute.
    #[error("distance value {value} cannot be represented as a voxel attribute (limit: {limit})")]
    AttributeOutOfRange {
        /// The rejected value, in attribute units.
        value: i64,
        /// The largest representable magnitude.
        limit: i32,
    },
    /// The requested operation shape is not supported.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
    /// The worker pool could not be created.
    #[error("failed to build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    /// A worker failed while processing a slice.
    #[error("processing of the slice y ∈ [{ymin}, {ymax}] failed: {source}")]
    SliceFailed {
        /// The first row of the failed slice.
        ymin: usize,
        /// The last row (inclusive) of the failed slice.
        ymax: usize,
        /// The error returned by the voxel transform.
        #[source]
        source: Box<MorphologyError>,
    },
}
