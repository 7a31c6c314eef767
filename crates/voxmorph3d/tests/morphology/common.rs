use voxmorph3d::grid::{ArrayAttributeGrid, Grid, VoxelData, VoxelRange, VoxelState};
use voxmorph3d::math::{Real, Voxel};

pub const RESOLUTION: i32 = 100;
pub const VOXEL_SIZE: Real = 0.1;

/// A grid with the box `mins..=maxs` set to `state`.
pub fn box_grid(size: usize, mins: Voxel, maxs: Voxel, state: VoxelState) -> ArrayAttributeGrid {
    let mut grid = ArrayAttributeGrid::new(size, size, size, VOXEL_SIZE);
    grid.fill(VoxelRange::new(mins, maxs), VoxelData::new(state, 0));
    grid
}

/// A grid where each voxel is filled with probability `1 / one_in`.
pub fn random_grid(seed: u64, size: usize, one_in: u32, state: VoxelState) -> ArrayAttributeGrid {
    let mut rng = oorandom::Rand32::new(seed);
    let mut grid = ArrayAttributeGrid::new(size, size, size, VOXEL_SIZE);

    for v in all_voxels(&grid) {
        if rng.rand_range(0..one_in) == 0 {
            grid.set_data(v, VoxelData::new(state, rng.rand_range(1..RESOLUTION as u32) as i32));
        }
    }

    grid
}

/// A random connected-ish blob: a union of random boxes.
pub fn blob_grid(seed: u64, size: usize) -> ArrayAttributeGrid {
    let mut rng = oorandom::Rand32::new(seed);
    let mut grid = ArrayAttributeGrid::new(size, size, size, VOXEL_SIZE);

    for _ in 0..6 {
        let mins = Voxel::new(
            rng.rand_range(1..size as u32 - 4) as i32,
            rng.rand_range(1..size as u32 - 4) as i32,
            rng.rand_range(1..size as u32 - 4) as i32,
        );
        let extents = Voxel::new(
            rng.rand_range(1..5) as i32,
            rng.rand_range(1..5) as i32,
            rng.rand_range(1..5) as i32,
        );
        grid.fill(
            VoxelRange::new(mins, mins + extents.coords),
            VoxelData::new(VoxelState::Inside, 0),
        );
    }

    grid
}

/// A density grid of a slab filling every voxel with `x < surface_x`, the surface being
/// located halfway between two voxel centers.
pub fn slab_density_grid(width: usize, surface_x: i32) -> ArrayAttributeGrid {
    let mut grid = ArrayAttributeGrid::new(width, 6, 6, VOXEL_SIZE);
    for v in all_voxels(&grid) {
        if v.x < surface_x {
            grid.set_data(v, VoxelData::new(VoxelState::Inside, RESOLUTION));
        }
    }
    grid
}

/// A density grid of a ball, with densities ramping linearly over one voxel across the surface.
pub fn ball_density_grid(size: usize, radius: Real) -> ArrayAttributeGrid {
    let mut grid = ArrayAttributeGrid::new(size, size, size, VOXEL_SIZE);
    let center = grid.grid_bounds().mins + grid.grid_bounds().extents() / 2.0;

    for v in all_voxels(&grid) {
        let p = grid.grid_bounds().voxel_center(v, VOXEL_SIZE);
        let distance = (p - center).norm() - radius;
        let density = (RESOLUTION as Real / 2.0 - distance * RESOLUTION as Real / VOXEL_SIZE)
            .round()
            .clamp(0.0, RESOLUTION as Real) as i32;
        if density > 0 {
            grid.set_data(v, VoxelData::new(VoxelState::Inside, density));
        }
    }

    grid
}

pub fn all_voxels(grid: &impl Grid) -> Vec<Voxel> {
    let mut result = vec![];
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            for z in 0..grid.depth() as i32 {
                result.push(Voxel::new(x, y, z));
            }
        }
    }
    result
}

pub fn manhattan_distance_to_box(v: Voxel, mins: Voxel, maxs: Voxel) -> i32 {
    (0..3)
        .map(|i| (mins[i] - v[i]).max(0) + (v[i] - maxs[i]).max(0))
        .sum()
}
