use crate::error::MorphologyError;
use crate::grid::{GridBounds, VoxelClass, VoxelData, VoxelRange, VoxelState};
use crate::math::{Real, Voxel};
use na::Vector3;

/// The integer attribute attached to each voxel.
///
/// Depending on the operation it is a material id, a sub-voxel density in
/// `0..=subvoxel_resolution`, or a signed distance scaled by
/// `subvoxel_resolution / voxel_size` (negative inside).
pub type Attribute = i32;

/// A regular 3D lattice of voxels, each carrying a [`VoxelState`] and an [`Attribute`].
///
/// Reading a voxel outside of the lattice yields [`VoxelData::OUTSIDE`] and writing
/// one outside of the lattice is a no-op.
pub trait Grid {
    /// The number of voxels along the `x` axis.
    fn width(&self) -> usize;
    /// The number of voxels along the `y` axis.
    fn height(&self) -> usize;
    /// The number of voxels along the `z` axis.
    fn depth(&self) -> usize;
    /// The edge length of a voxel, in physical units.
    fn voxel_size(&self) -> Real;
    /// The physical bounds covered by this grid.
    fn grid_bounds(&self) -> GridBounds;
    /// Sets the physical bounds of this grid.
    ///
    /// This only moves the grid in physical space: the lattice dimensions are unchanged.
    fn set_grid_bounds(&mut self, bounds: GridBounds);

    /// The state and attribute of a voxel.
    fn data(&self, voxel: Voxel) -> VoxelData;
    /// Sets both the state and attribute of a voxel.
    fn set_data(&mut self, voxel: Voxel, data: VoxelData);

    /// Creates an empty grid of the same kind with the given dimensions.
    fn create_empty(&self, width: usize, height: usize, depth: usize, voxel_size: Real) -> Self
    where
        Self: Sized;

    /// The lattice dimensions `(width, height, depth)`.
    #[inline]
    fn dimensions(&self) -> Vector3<usize> {
        Vector3::new(self.width(), self.height(), self.depth())
    }

    /// Is the given voxel part of the lattice?
    #[inline]
    fn contains(&self, voxel: Voxel) -> bool {
        voxel.x >= 0
            && voxel.y >= 0
            && voxel.z >= 0
            && (voxel.x as usize) < self.width()
            && (voxel.y as usize) < self.height()
            && (voxel.z as usize) < self.depth()
    }

    /// The state of a voxel.
    #[inline]
    fn state(&self, voxel: Voxel) -> VoxelState {
        self.data(voxel).state
    }

    /// Sets the state of a voxel, keeping its attribute.
    #[inline]
    fn set_state(&mut self, voxel: Voxel, state: VoxelState) {
        let attribute = self.attribute(voxel);
        self.set_data(voxel, VoxelData::new(state, attribute));
    }

    /// The attribute of a voxel.
    #[inline]
    fn attribute(&self, voxel: Voxel) -> Attribute {
        self.data(voxel).attribute
    }

    /// Sets the attribute of a voxel, keeping its state.
    #[inline]
    fn set_attribute(&mut self, voxel: Voxel, attribute: Attribute) {
        let state = self.state(voxel);
        self.set_data(voxel, VoxelData::new(state, attribute));
    }

    /// Calls `visitor` on every voxel matching `class`, in `(y, x, z)` order.
    ///
    /// If `range` is provided, only the voxels within its intersection with the
    /// lattice are visited.
    fn for_each_of_class(
        &self,
        class: VoxelClass,
        range: Option<VoxelRange>,
        mut visitor: impl FnMut(Voxel, VoxelData),
    ) {
        let full = VoxelRange::from_dimensions(self.dimensions());
        let range = match range {
            Some(range) => match range.intersection(&full) {
                Some(range) => range,
                None => return,
            },
            None if full.is_empty() => return,
            None => full,
        };

        for y in range.mins.y..=range.maxs.y {
            for x in range.mins.x..=range.maxs.x {
                for z in range.mins.z..=range.maxs.z {
                    let voxel = Voxel::new(x, y, z);
                    let data = self.data(voxel);
                    if class.matches(data.state) {
                        visitor(voxel, data);
                    }
                }
            }
        }
    }

    /// Counts the voxels matching `class`.
    fn count_of_class(&self, class: VoxelClass) -> usize {
        let mut count = 0;
        self.for_each_of_class(class, None, |_, _| count += 1);
        count
    }
}

/// Checks that two grids share the same lattice dimensions.
pub fn check_dimensions<A: Grid, B: Grid>(expected: &A, found: &B) -> Result<(), MorphologyError> {
    let expected = expected.dimensions();
    let found = found.dimensions();

    if expected == found {
        Ok(())
    } else {
        Err(MorphologyError::DimensionMismatch {
            expected: expected.into(),
            found: found.into(),
        })
    }
}
