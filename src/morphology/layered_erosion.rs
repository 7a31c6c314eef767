use crate::grid::{Grid, VoxelClass, VoxelMask, VoxelState};
use crate::math::Voxel;
use crate::morphology::{Neighborhood, VoxelChecker};
use std::time::Instant;

/// Peels a fixed number of surface layers off the [`VoxelState::Interior`] region of a grid.
///
/// Each iteration collects the interior voxels having at least one
/// [`VoxelState::Outside`] neighbor, then turns all of them outside at once. Voxels
/// outside of the lattice do not count as outside neighbors, so the region is not
/// eroded where it touches the grid boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct LayeredErosion {
    /// The number of layers to remove.
    pub iteration_count: usize,
    /// The connectivity used to detect surface voxels.
    pub neighborhood: Neighborhood,
}

impl Default for LayeredErosion {
    fn default() -> Self {
        Self::new(1)
    }
}

impl LayeredErosion {
    /// A 6-connected erosion removing `iteration_count` layers.
    pub fn new(iteration_count: usize) -> Self {
        Self {
            iteration_count,
            neighborhood: Neighborhood::Six,
        }
    }

    /// Sets the connectivity of this erosion.
    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Erodes the interior region of `grid` in place.
    pub fn execute<G: Grid>(&self, grid: &mut G) {
        self.execute_with_checker(grid, &|_: Voxel| true)
    }

    /// Erodes the interior region of `grid` in place, leaving alone the voxels
    /// rejected by `checker`.
    pub fn execute_with_checker<G: Grid>(&self, grid: &mut G, checker: &dyn VoxelChecker) {
        if self.iteration_count == 0 {
            return;
        }

        let t0 = Instant::now();
        let mut surface = VoxelMask::with_dimensions(grid.dimensions());
        let mut removed = 0;

        for iteration in 0..self.iteration_count {
            let neighbors = self.neighborhood.offsets(iteration);

            {
                let grid: &G = &*grid;
                grid.for_each_of_class(VoxelClass::INTERIOR, None, |voxel, _| {
                    let on_surface = neighbors.iter().any(|offset| {
                        let neighbor = voxel + *offset;
                        grid.contains(neighbor) && grid.state(neighbor) == VoxelState::Outside
                    });

                    if on_surface && checker.can_process(voxel) {
                        let _ = surface.insert(voxel);
                    }
                });
            }

            if surface.is_empty() {
                break;
            }

            for voxel in &surface {
                grid.set_state(voxel, VoxelState::Outside);
            }

            removed += surface.len();
            surface.clear();
        }

        log::debug!(
            "Layered erosion: {} voxels removed in {:?}.",
            removed,
            t0.elapsed()
        );
    }
}
