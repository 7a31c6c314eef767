use crate::grid::{Grid, GridBounds, VoxelData, VoxelRange, VoxelState};
use crate::math::{Point, Real, Voxel};
use na::Vector3;

/// A dense grid storing the state and attribute of every voxel of its lattice.
///
/// Voxels are stored in `(y, x, z)` order: the voxels of a given `y` row form a
/// contiguous block so the grid can be split into disjoint Y-slices with
/// [`ArrayAttributeGrid::slices_mut`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ArrayAttributeGrid {
    width: usize,
    height: usize,
    depth: usize,
    voxel_size: Real,
    bounds: GridBounds,
    data: Vec<VoxelData>,
}

impl ArrayAttributeGrid {
    /// Creates an empty grid with its minimum corner at the origin.
    pub fn new(width: usize, height: usize, depth: usize, voxel_size: Real) -> Self {
        let dimensions = Vector3::new(width, height, depth);
        Self {
            width,
            height,
            depth,
            voxel_size,
            bounds: GridBounds::from_origin(Point::origin(), dimensions, voxel_size),
            data: vec![VoxelData::OUTSIDE; width * height * depth],
        }
    }

    /// Creates an empty grid covering the given physical bounds.
    pub fn with_bounds(bounds: GridBounds, voxel_size: Real) -> Self {
        let dimensions = bounds.dimensions(voxel_size);
        let mut result = Self::new(dimensions.x, dimensions.y, dimensions.z, voxel_size);
        result.bounds = bounds;
        result
    }

    /// The linear index of a voxel in the internal buffer, if it is part of the lattice.
    #[inline]
    pub fn index(&self, voxel: Voxel) -> Option<usize> {
        self.contains(voxel).then(|| {
            (voxel.y as usize * self.width + voxel.x as usize) * self.depth + voxel.z as usize
        })
    }

    /// The voxel stored at the given linear index.
    #[inline]
    pub fn voxel_at_index(&self, index: usize) -> Voxel {
        let row = self.width * self.depth;
        Voxel::new(
            ((index % row) / self.depth) as i32,
            (index / row) as i32,
            (index % self.depth) as i32,
        )
    }

    /// The data of every voxel, in `(y, x, z)` order.
    pub fn as_slice(&self) -> &[VoxelData] {
        &self.data
    }

    /// Sets every voxel of `range` (clipped to the lattice) to `data`.
    pub fn fill(&mut self, range: VoxelRange, data: VoxelData) {
        let Some(range) = range.intersection(&VoxelRange::from_dimensions(self.dimensions()))
        else {
            return;
        };

        for y in range.mins.y..=range.maxs.y {
            for x in range.mins.x..=range.maxs.x {
                for z in range.mins.z..=range.maxs.z {
                    self.set_data(Voxel::new(x, y, z), data);
                }
            }
        }
    }

    /// Counts the voxels with exactly the given state.
    pub fn count(&self, state: VoxelState) -> usize {
        self.data.iter().filter(|d| d.state == state).count()
    }

    /// Splits the grid into disjoint mutable slices of `slice_height` rows along `y`.
    ///
    /// The last slice may be shorter. A `slice_height` of zero is treated as one.
    pub fn slices_mut(&mut self, slice_height: usize) -> Vec<GridSliceMut<'_>> {
        let slice_height = slice_height.max(1);
        let row_len = self.width * self.depth;

        if row_len == 0 || self.height == 0 {
            return vec![];
        }

        let (width, depth, height) = (self.width, self.depth, self.height);
        self.data
            .chunks_mut(slice_height * row_len)
            .enumerate()
            .map(|(i, data)| {
                let ymin = i * slice_height;
                GridSliceMut {
                    ymin,
                    ymax: (ymin + slice_height).min(height) - 1,
                    width,
                    depth,
                    data,
                }
            })
            .collect()
    }
}

impl Grid for ArrayAttributeGrid {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    fn voxel_size(&self) -> Real {
        self.voxel_size
    }

    fn grid_bounds(&self) -> GridBounds {
        self.bounds
    }

    fn set_grid_bounds(&mut self, bounds: GridBounds) {
        self.bounds = bounds;
    }

    #[inline]
    fn data(&self, voxel: Voxel) -> VoxelData {
        self.index(voxel)
            .map(|i| self.data[i])
            .unwrap_or(VoxelData::OUTSIDE)
    }

    #[inline]
    fn set_data(&mut self, voxel: Voxel, data: VoxelData) {
        if let Some(i) = self.index(voxel) {
            self.data[i] = data;
        }
    }

    fn create_empty(&self, width: usize, height: usize, depth: usize, voxel_size: Real) -> Self {
        let mut result = Self::new(width, height, depth, voxel_size);
        result.bounds = GridBounds::from_origin(
            self.bounds.mins,
            Vector3::new(width, height, depth),
            voxel_size,
        );
        result
    }
}

/// A mutable view over the rows `ymin..=ymax` of an [`ArrayAttributeGrid`].
pub struct GridSliceMut<'a> {
    ymin: usize,
    ymax: usize,
    width: usize,
    depth: usize,
    data: &'a mut [VoxelData],
}

impl GridSliceMut<'_> {
    /// The first row of this slice.
    pub fn ymin(&self) -> usize {
        self.ymin
    }

    /// The last row (inclusive) of this slice.
    pub fn ymax(&self) -> usize {
        self.ymax
    }

    /// Iterates mutably on the voxels of this slice, in `(y, x, z)` order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Voxel, &mut VoxelData)> + '_ {
        let (ymin, width, depth) = (self.ymin, self.width, self.depth);
        let row = width * depth;
        self.data.iter_mut().enumerate().map(move |(i, data)| {
            let voxel = Voxel::new(
                ((i % row) / depth) as i32,
                (ymin + i / row) as i32,
                (i % depth) as i32,
            );
            (voxel, data)
        })
    }
}
