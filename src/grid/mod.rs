//! Voxel grids, voxel states and voxel masks.

pub use self::array_grid::{ArrayAttributeGrid, GridSliceMut};
pub use self::grid::{check_dimensions, Attribute, Grid};
pub use self::grid_bounds::{GridBounds, VoxelRange};
pub use self::voxel_mask::{VoxelMask, VoxelMaskIter};
pub use self::voxel_state::{
    VoxelClass, VoxelData, VoxelState, UNDEFINED_INSIDE_DISTANCE, UNDEFINED_OUTSIDE_DISTANCE,
};

mod array_grid;
mod grid;
mod grid_bounds;
mod voxel_mask;
mod voxel_state;
