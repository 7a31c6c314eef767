//! Slice-parallel per-voxel operations.

pub use self::boolean::{Intersect, Subtract, Union};
pub use self::slice_scheduler::{SliceScheduler, ThreadingConfig, VoxelTransform};

mod boolean;
mod slice_scheduler;
