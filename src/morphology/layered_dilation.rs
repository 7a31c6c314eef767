use crate::grid::{Grid, VoxelClass, VoxelMask, VoxelState};
use crate::math::{Offset, Voxel};
use crate::morphology::Neighborhood;
use std::time::Instant;

/// Grows the [`VoxelState::Interior`] region of a grid by a fixed number of neighbor layers.
///
/// Each iteration turns every [`VoxelState::Outside`] voxel adjacent (for the configured
/// [`Neighborhood`]) to the current region into an interior voxel. The first iteration
/// scans the whole grid; the following ones only scan the voxels added by the previous
/// iteration. The grid is never resized: growth stops at its boundary.
///
/// Walking the frontier and clearing the next layer still visit every word of the
/// masks, so each later iteration also costs `O(volume / 64)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct LayeredDilation {
    /// The number of layers to add.
    pub iteration_count: usize,
    /// The connectivity used to find the voxels of the next layer.
    pub neighborhood: Neighborhood,
}

impl Default for LayeredDilation {
    fn default() -> Self {
        Self::new(1)
    }
}

impl LayeredDilation {
    /// A 6-connected dilation adding `iteration_count` layers.
    pub fn new(iteration_count: usize) -> Self {
        Self {
            iteration_count,
            neighborhood: Neighborhood::Six,
        }
    }

    /// Sets the connectivity of this dilation.
    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Dilates the interior region of `grid` in place.
    pub fn execute<G: Grid>(&self, grid: &mut G) {
        if self.iteration_count == 0 {
            return;
        }

        let t0 = Instant::now();
        let mut frontier = VoxelMask::with_dimensions(grid.dimensions());
        let mut next = VoxelMask::with_dimensions(grid.dimensions());
        let mut added = 0;

        for iteration in 0..self.iteration_count {
            let neighbors = self.neighborhood.offsets(iteration);

            {
                let grid: &G = &*grid;
                if iteration == 0 {
                    grid.for_each_of_class(VoxelClass::INTERIOR, None, |voxel, _| {
                        mark_outside_neighbors(grid, voxel, neighbors, &mut next)
                    });
                } else {
                    for voxel in &frontier {
                        mark_outside_neighbors(grid, voxel, neighbors, &mut next);
                    }
                }
            }

            for voxel in &next {
                grid.set_state(voxel, VoxelState::Interior);
            }

            added += next.len();
            if next.is_empty() {
                break;
            }

            std::mem::swap(&mut frontier, &mut next);
            next.clear();
        }

        log::debug!(
            "Layered dilation: {} voxels added in {:?}.",
            added,
            t0.elapsed()
        );
    }
}

fn mark_outside_neighbors<G: Grid>(
    grid: &G,
    voxel: Voxel,
    neighbors: &[Offset],
    next: &mut VoxelMask,
) {
    for offset in neighbors {
        let neighbor = voxel + *offset;
        if grid.contains(neighbor) && grid.state(neighbor) == VoxelState::Outside {
            let _ = next.insert(neighbor);
        }
    }
}
