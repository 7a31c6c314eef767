use crate::math::{Offset, Voxel};
use crate::morphology::Neighborhood;
use crate::utils::hashmap::HashSet;

/// A morphological neighborhood, described by a set of offsets relative to its center.
///
/// Besides the offsets themselves, the element keeps its "incremented" offsets: the
/// offsets `o` such that `o + (0, 0, 1)` is not part of the element. When the element
/// is stamped on a voxel right after being stamped on the voxel below it along `z`,
/// only these offsets reach voxels that were not already covered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuringElement {
    offsets: Vec<Offset>,
    incremented: Vec<Offset>,
}

impl StructuringElement {
    /// Builds an element from a list of offsets.
    ///
    /// Duplicates are removed, keeping the first occurrence of each offset.
    pub fn from_offsets(offsets: impl IntoIterator<Item = Offset>) -> Self {
        let mut seen = HashSet::default();
        let offsets: Vec<_> = offsets.into_iter().filter(|o| seen.insert(*o)).collect();
        let step = Offset::new(0, 0, 1);
        let incremented = offsets
            .iter()
            .copied()
            .filter(|o| !seen.contains(&(o + step)))
            .collect();

        Self {
            offsets,
            incremented,
        }
    }

    /// The neighbors of a voxel, excluding the voxel itself.
    pub fn neighbors(neighborhood: Neighborhood) -> Self {
        Self::from_offsets(neighborhood.offsets(0).iter().copied())
    }

    /// The voxels at a Manhattan distance at most `radius` from the center, center included.
    ///
    /// `diamond(1)` is the center and its 6 face-adjacent neighbors.
    pub fn diamond(radius: u32) -> Self {
        let r = radius as i32;
        Self::from_box(radius, |o| o.x.abs() + o.y.abs() + o.z.abs() <= r)
    }

    /// The voxels at a Chebyshev distance at most `radius` from the center.
    pub fn cube(radius: u32) -> Self {
        Self::from_box(radius, |_| true)
    }

    /// The voxels at an euclidean distance at most `radius` from the center.
    pub fn ball(radius: u32) -> Self {
        let r2 = radius as i32 * radius as i32;
        Self::from_box(radius, |o| o.dot(o) <= r2)
    }

    fn from_box(radius: u32, filter: impl Fn(&Offset) -> bool) -> Self {
        let r = radius as i32;
        let mut offsets = vec![];

        for x in -r..=r {
            for y in -r..=r {
                for z in -r..=r {
                    let offset = Offset::new(x, y, z);
                    if filter(&offset) {
                        offsets.push(offset);
                    }
                }
            }
        }

        Self::from_offsets(offsets)
    }

    /// All the offsets of this element.
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    /// The offsets `o` of this element such that `o + (0, 0, 1)` is not part of the element.
    pub fn incremented_offsets(&self) -> &[Offset] {
        &self.incremented
    }

    /// The number of offsets of this element.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Does this element have no offset?
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Selects the offsets to stamp while scanning voxels.
///
/// The cursor remembers the last voxel it was given. When the next voxel is exactly
/// one step above it along `z`, only the incremented offsets of the element are
/// needed; any other transition requires the full element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanCursor {
    previous: Option<Voxel>,
}

impl ScanCursor {
    /// A cursor that has not seen any voxel yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The offsets of `element` to stamp on `voxel`, advancing the cursor to `voxel`.
    pub fn offsets<'a>(&mut self, element: &'a StructuringElement, voxel: Voxel) -> &'a [Offset] {
        let contiguous = self
            .previous
            .is_some_and(|p| p.x == voxel.x && p.y == voxel.y && p.z + 1 == voxel.z);
        self.previous = Some(voxel);

        if contiguous {
            element.incremented_offsets()
        } else {
            element.offsets()
        }
    }

    /// Forgets the last voxel seen.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}
