use crate::math::{Point, Real, Vector, Voxel};
use na::Vector3;

/// The axis-aligned physical extent of a grid.
///
/// A grid covers its bounds with `width × height × depth` cubic voxels of edge
/// `voxel_size`, so that the voxel `(i, j, k)` has its minimum corner at
/// `mins + (i, j, k) * voxel_size`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GridBounds {
    /// The minimum corner of the bounds.
    pub mins: Point,
    /// The maximum corner of the bounds.
    pub maxs: Point,
}

impl GridBounds {
    /// Creates new bounds from their corners.
    pub fn new(mins: Point, maxs: Point) -> Self {
        Self { mins, maxs }
    }

    /// The bounds of a lattice of the given dimensions starting at `origin`.
    pub fn from_origin(origin: Point, dimensions: Vector3<usize>, voxel_size: Real) -> Self {
        let extents = dimensions.map(|n| n as Real * voxel_size);
        Self {
            mins: origin,
            maxs: origin + extents,
        }
    }

    /// The size of the bounds along each axis.
    pub fn extents(&self) -> Vector {
        self.maxs - self.mins
    }

    /// The number of voxels of size `voxel_size` needed along each axis to cover these bounds.
    pub fn dimensions(&self, voxel_size: Real) -> Vector3<usize> {
        self.extents()
            .map(|e| (e / voxel_size).round().max(0.0) as usize)
    }

    /// The physical position of the center of the given voxel.
    pub fn voxel_center(&self, voxel: Voxel, voxel_size: Real) -> Point {
        self.mins + voxel.coords.map(|e| (e as Real + 0.5) * voxel_size)
    }

    /// The voxel containing the given physical point.
    ///
    /// The result may lie outside of the grid if `point` is outside of the bounds.
    pub fn voxel_at(&self, point: &Point, voxel_size: Real) -> Voxel {
        let local = (point - self.mins) / voxel_size;
        Voxel::from(local.map(|e| e.floor() as i32))
    }
}

/// An axis-aligned box of voxel coordinates with inclusive bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VoxelRange {
    /// The smallest voxel coordinates of the range.
    pub mins: Voxel,
    /// The largest voxel coordinates of the range (inclusive).
    pub maxs: Voxel,
}

impl VoxelRange {
    /// Creates a new range from its inclusive corners.
    pub fn new(mins: Voxel, maxs: Voxel) -> Self {
        Self { mins, maxs }
    }

    /// The range covering every voxel of a lattice with the given dimensions.
    pub fn from_dimensions(dimensions: Vector3<usize>) -> Self {
        Self {
            mins: Voxel::origin(),
            maxs: Voxel::from(dimensions.map(|n| n as i32 - 1)),
        }
    }

    /// Is this range empty?
    pub fn is_empty(&self) -> bool {
        self.mins.x > self.maxs.x || self.mins.y > self.maxs.y || self.mins.z > self.maxs.z
    }

    /// Does this range contain the given voxel?
    pub fn contains(&self, voxel: Voxel) -> bool {
        voxel.x >= self.mins.x
            && voxel.y >= self.mins.y
            && voxel.z >= self.mins.z
            && voxel.x <= self.maxs.x
            && voxel.y <= self.maxs.y
            && voxel.z <= self.maxs.z
    }

    /// The number of voxels in this range.
    pub fn volume(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            let size = self.maxs - self.mins;
            (size.x as usize + 1) * (size.y as usize + 1) * (size.z as usize + 1)
        }
    }

    /// The intersection of two ranges, or `None` if they are disjoint.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let result = Self {
            mins: self.mins.sup(&other.mins),
            maxs: self.maxs.inf(&other.maxs),
        };
        (!result.is_empty()).then_some(result)
    }
}
