use crate::error::MorphologyError;
use crate::grid::{ArrayAttributeGrid, Attribute, Grid, VoxelData};
use crate::math::Voxel;
use crate::parallel::{SliceScheduler, VoxelTransform};

/// Keeps only the destination voxels that are also filled in the source.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Intersect;

impl VoxelTransform for Intersect {
    #[inline]
    fn apply(
        &self,
        _: Voxel,
        source: VoxelData,
        dest: &mut VoxelData,
    ) -> Result<(), MorphologyError> {
        if !source.state.is_inside() {
            *dest = VoxelData::OUTSIDE;
        }
        Ok(())
    }
}

/// Empties the destination voxels that are filled in the source.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Subtract;

impl VoxelTransform for Subtract {
    #[inline]
    fn apply(
        &self,
        _: Voxel,
        source: VoxelData,
        dest: &mut VoxelData,
    ) -> Result<(), MorphologyError> {
        if source.state.is_inside() {
            *dest = VoxelData::OUTSIDE;
        }
        Ok(())
    }
}

/// Copies the filled voxels of the source into the destination.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Union {
    /// If set, the attribute given to the copied voxels instead of the source attribute.
    pub material: Option<Attribute>,
}

impl VoxelTransform for Union {
    #[inline]
    fn apply(
        &self,
        _: Voxel,
        source: VoxelData,
        dest: &mut VoxelData,
    ) -> Result<(), MorphologyError> {
        if source.state.is_inside() {
            *dest = VoxelData::new(source.state, self.material.unwrap_or(source.attribute));
        }
        Ok(())
    }
}

impl SliceScheduler {
    /// Empties every voxel of `dest` that is outside in `source`.
    pub fn intersect<S: Grid + Sync>(
        &self,
        source: &S,
        dest: &mut ArrayAttributeGrid,
    ) -> Result<(), MorphologyError> {
        self.run(source, dest, &Intersect)
    }

    /// Empties every voxel of `dest` that is filled in `source`.
    pub fn subtract<S: Grid + Sync>(
        &self,
        source: &S,
        dest: &mut ArrayAttributeGrid,
    ) -> Result<(), MorphologyError> {
        self.run(source, dest, &Subtract)
    }

    /// Copies into `dest` every voxel filled in `source`.
    pub fn union<S: Grid + Sync>(
        &self,
        source: &S,
        dest: &mut ArrayAttributeGrid,
    ) -> Result<(), MorphologyError> {
        self.run(source, dest, &Union::default())
    }
}
