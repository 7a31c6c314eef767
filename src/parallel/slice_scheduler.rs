use crate::error::MorphologyError;
use crate::grid::{check_dimensions, ArrayAttributeGrid, Grid, GridSliceMut, VoxelData};
use crate::math::Voxel;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

/// The size of the worker pools used by slice-parallel operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ThreadingConfig {
    /// The requested number of workers. Zero or negative means "as many as available".
    pub thread_count: i32,
    /// The largest number of workers ever used.
    pub max_thread_count: usize,
}

impl Default for ThreadingConfig {
    fn default() -> Self {
        Self {
            thread_count: 0,
            max_thread_count: available_parallelism(),
        }
    }
}

impl ThreadingConfig {
    /// A configuration requesting `thread_count` workers.
    pub fn new(thread_count: i32) -> Self {
        Self {
            thread_count,
            ..Self::default()
        }
    }

    /// Sets the largest number of workers ever used.
    pub fn with_max_thread_count(mut self, max_thread_count: usize) -> Self {
        self.max_thread_count = max_thread_count;
        self
    }

    /// The number of workers to spawn, in `1..=max_thread_count`.
    pub fn resolved_thread_count(&self) -> usize {
        let requested = if self.thread_count <= 0 {
            available_parallelism()
        } else {
            self.thread_count as usize
        };

        requested.min(self.max_thread_count).max(1)
    }
}

fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// A per-voxel operation applied by a [`SliceScheduler`].
///
/// The transform receives the coordinates of a voxel, its data in the source grid, and
/// its data in the destination grid to update. Its result must not depend on the order
/// in which voxels are processed.
pub trait VoxelTransform: Sync {
    /// Updates `dest` from `source`.
    fn apply(
        &self,
        voxel: Voxel,
        source: VoxelData,
        dest: &mut VoxelData,
    ) -> Result<(), MorphologyError>;
}

impl<F> VoxelTransform for F
where
    F: Fn(Voxel, VoxelData, &mut VoxelData) -> Result<(), MorphologyError> + Sync,
{
    #[inline]
    fn apply(
        &self,
        voxel: Voxel,
        source: VoxelData,
        dest: &mut VoxelData,
    ) -> Result<(), MorphologyError> {
        self(voxel, source, dest)
    }
}

/// Runs per-voxel transforms over a grid split into Y-slices processed by a pool of workers.
///
/// The destination grid is split into disjoint slices of `slice_height` rows. The slices are
/// pushed in a shared work queue that a fixed number of workers drain; each worker applies
/// the transform to every voxel of the slices it pops, in `(y, x, z)` order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SliceScheduler {
    /// The size of the worker pool.
    pub threading: ThreadingConfig,
    /// The number of rows of each slice.
    pub slice_height: usize,
}

impl Default for SliceScheduler {
    fn default() -> Self {
        Self {
            threading: ThreadingConfig::default(),
            slice_height: 1,
        }
    }
}

impl SliceScheduler {
    /// A scheduler with the given worker pool and slices of one row.
    pub fn new(threading: ThreadingConfig) -> Self {
        Self {
            threading,
            ..Self::default()
        }
    }

    /// Sets the number of rows of each slice. Zero is treated as one.
    pub fn with_slice_height(mut self, slice_height: usize) -> Self {
        self.slice_height = slice_height;
        self
    }

    /// Applies `transform` to every voxel of `dest`, reading the matching voxel of `source`.
    ///
    /// Blocks until every slice has been processed. If the transform fails, workers stop
    /// picking new slices and the first error is returned once they all exited.
    pub fn run<S, T>(
        &self,
        source: &S,
        dest: &mut ArrayAttributeGrid,
        transform: &T,
    ) -> Result<(), MorphologyError>
    where
        S: Grid + Sync,
        T: VoxelTransform + ?Sized,
    {
        check_dimensions(&*dest, source)?;

        let t0 = Instant::now();
        let num_threads = self.threading.resolved_thread_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?;

        let slices = dest.slices_mut(self.slice_height);
        let num_slices = slices.len();
        let queue = Mutex::new(slices);
        let failed = AtomicBool::new(false);
        let first_error = Mutex::new(None);

        pool.scope(|scope| {
            for _ in 0..num_threads {
                scope.spawn(|_| {
                    while !failed.load(Ordering::Relaxed) {
                        let slice = queue.lock().unwrap_or_else(PoisonError::into_inner).pop();
                        let Some(mut slice) = slice else {
                            break;
                        };

                        if let Err(e) = process_slice(source, &mut slice, transform) {
                            failed.store(true, Ordering::Relaxed);
                            let _ = first_error
                                .lock()
                                .unwrap_or_else(PoisonError::into_inner)
                                .get_or_insert(e);
                        }
                    }
                });
            }
        });

        log::debug!(
            "Slice scheduler: {} slices of {} rows on {} threads in {:?}.",
            num_slices,
            self.slice_height.max(1),
            num_threads,
            t0.elapsed()
        );

        match first_error.into_inner().unwrap_or_else(PoisonError::into_inner) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn process_slice<S, T>(
    source: &S,
    slice: &mut GridSliceMut<'_>,
    transform: &T,
) -> Result<(), MorphologyError>
where
    S: Grid,
    T: VoxelTransform + ?Sized,
{
    let (ymin, ymax) = (slice.ymin(), slice.ymax());

    for (voxel, dest) in slice.iter_mut() {
        transform
            .apply(voxel, source.data(voxel), dest)
            .map_err(|e| MorphologyError::SliceFailed {
                ymin,
                ymax,
                source: Box::new(e),
            })?;
    }

    Ok(())
}
