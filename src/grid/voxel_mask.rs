use crate::math::Voxel;
use na::Vector3;

const WORD_BITS: usize = u64::BITS as usize;

/// A set of voxel coordinates over a fixed lattice, backed by a bitset.
///
/// Membership tests, insertions and removals are `O(1)`. Iteration skips empty
/// 64-voxel words and yields voxels in `(y, x, z)` order, so voxels with
/// consecutive `z` and identical `(x, y)` are yielded consecutively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelMask {
    dimensions: Vector3<usize>,
    words: Vec<u64>,
    len: usize,
}

impl VoxelMask {
    /// Creates an empty mask over a lattice of the given dimensions.
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        let num_voxels = width * height * depth;
        Self {
            dimensions: Vector3::new(width, height, depth),
            words: vec![0; num_voxels.div_ceil(WORD_BITS)],
            len: 0,
        }
    }

    /// Creates an empty mask over a lattice of the given dimensions.
    pub fn with_dimensions(dimensions: Vector3<usize>) -> Self {
        Self::new(dimensions.x, dimensions.y, dimensions.z)
    }

    /// The dimensions of the lattice this mask is defined on.
    pub fn dimensions(&self) -> Vector3<usize> {
        self.dimensions
    }

    /// The number of voxels in this mask.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is this mask empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn bit(&self, voxel: Voxel) -> Option<usize> {
        let [w, h, d] = [self.dimensions.x, self.dimensions.y, self.dimensions.z];
        let in_range = voxel.x >= 0
            && voxel.y >= 0
            && voxel.z >= 0
            && (voxel.x as usize) < w
            && (voxel.y as usize) < h
            && (voxel.z as usize) < d;
        in_range.then(|| (voxel.y as usize * w + voxel.x as usize) * d + voxel.z as usize)
    }

    #[inline]
    fn voxel(&self, bit: usize) -> Voxel {
        let row = self.dimensions.x * self.dimensions.z;
        Voxel::new(
            ((bit % row) / self.dimensions.z) as i32,
            (bit / row) as i32,
            (bit % self.dimensions.z) as i32,
        )
    }

    /// Does this mask contain the given voxel?
    ///
    /// Voxels outside of the lattice are never contained.
    #[inline]
    pub fn contains(&self, voxel: Voxel) -> bool {
        self.bit(voxel)
            .is_some_and(|bit| self.words[bit / WORD_BITS] & (1 << (bit % WORD_BITS)) != 0)
    }

    /// Adds a voxel to this mask.
    ///
    /// Returns `true` if the voxel was not already part of the mask. Voxels outside of
    /// the lattice are ignored.
    #[inline]
    pub fn insert(&mut self, voxel: Voxel) -> bool {
        let Some(bit) = self.bit(voxel) else {
            return false;
        };
        let word = &mut self.words[bit / WORD_BITS];
        let flag = 1 << (bit % WORD_BITS);
        let inserted = *word & flag == 0;
        *word |= flag;
        self.len += inserted as usize;
        inserted
    }

    /// Removes a voxel from this mask.
    ///
    /// Returns `true` if the voxel was part of the mask.
    #[inline]
    pub fn remove(&mut self, voxel: Voxel) -> bool {
        let Some(bit) = self.bit(voxel) else {
            return false;
        };
        let word = &mut self.words[bit / WORD_BITS];
        let flag = 1 << (bit % WORD_BITS);
        let removed = *word & flag != 0;
        *word &= !flag;
        self.len -= removed as usize;
        removed
    }

    /// Removes every voxel from this mask.
    pub fn clear(&mut self) {
        self.words.fill(0);
        self.len = 0;
    }

    /// Iterates on the voxels of this mask in `(y, x, z)` order.
    pub fn iter(&self) -> VoxelMaskIter<'_> {
        self.iter_rows(0, self.dimensions.y)
    }

    /// Iterates on the voxels of this mask with `ymin <= y < ymax`, in `(y, x, z)` order.
    pub fn iter_rows(&self, ymin: usize, ymax: usize) -> VoxelMaskIter<'_> {
        let row = self.dimensions.x * self.dimensions.z;
        let ymax = ymax.min(self.dimensions.y);
        let (start, end) = if ymin < ymax {
            (ymin * row, ymax * row)
        } else {
            (0, 0)
        };

        let word_id = start / WORD_BITS;
        let current = if start < end {
            self.words[word_id] & (u64::MAX << (start % WORD_BITS))
        } else {
            0
        };

        VoxelMaskIter {
            mask: self,
            word_id,
            current,
            end,
        }
    }
}

impl<'a> IntoIterator for &'a VoxelMask {
    type Item = Voxel;
    type IntoIter = VoxelMaskIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the voxels of a [`VoxelMask`].
pub struct VoxelMaskIter<'a> {
    mask: &'a VoxelMask,
    word_id: usize,
    // Bits of `words[word_id]` not yielded yet.
    current: u64,
    end: usize,
}

impl Iterator for VoxelMaskIter<'_> {
    type Item = Voxel;

    fn next(&mut self) -> Option<Voxel> {
        loop {
            if self.current != 0 {
                let bit = self.word_id * WORD_BITS + self.current.trailing_zeros() as usize;
                if bit >= self.end {
                    self.current = 0;
                    return None;
                }
                self.current &= self.current - 1;
                return Some(self.mask.voxel(bit));
            }

            self.word_id += 1;
            if self.word_id * WORD_BITS >= self.end {
                return None;
            }
            self.current = self.mask.words[self.word_id];
        }
    }
}
