use crate::math::Voxel;

/// A predicate deciding whether a morphological operation may process a voxel.
///
/// Any `Fn(Voxel) -> bool` closure is a voxel checker.
pub trait VoxelChecker {
    /// Returns `false` if the voxel must be left untouched.
    fn can_process(&self, voxel: Voxel) -> bool;
}

impl<F: Fn(Voxel) -> bool> VoxelChecker for F {
    #[inline]
    fn can_process(&self, voxel: Voxel) -> bool {
        self(voxel)
    }
}
