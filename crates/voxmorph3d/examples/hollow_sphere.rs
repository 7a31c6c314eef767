use voxmorph3d::distance::{DensityShellExtractor, FastMarchingTransform};
use voxmorph3d::grid::{ArrayAttributeGrid, Grid, VoxelClass, VoxelData, VoxelState};
use voxmorph3d::math::{Real, Voxel};

const SIZE: usize = 40;
const VOXEL_SIZE: Real = 0.05;
const RESOLUTION: i32 = 100;

fn main() {
    let mut solid = ArrayAttributeGrid::new(SIZE, SIZE, SIZE, VOXEL_SIZE);
    let center = solid.grid_bounds().mins + solid.grid_bounds().extents() / 2.0;
    let radius = 0.8;

    for y in 0..SIZE as i32 {
        for x in 0..SIZE as i32 {
            for z in 0..SIZE as i32 {
                let voxel = Voxel::new(x, y, z);
                let p = solid.grid_bounds().voxel_center(voxel, VOXEL_SIZE);
                let distance = (p - center).norm() - radius;
                let density = (0.5 - distance / VOXEL_SIZE).clamp(0.0, 1.0);
                let density = (density * RESOLUTION as Real).round() as i32;

                if density > 0 {
                    solid.set_data(voxel, VoxelData::new(VoxelState::Inside, density));
                }
            }
        }
    }

    let transform = FastMarchingTransform::new(RESOLUTION, 0.3, 0.1);
    let distances = transform
        .execute(&solid)
        .expect("the distance bands fit in the attribute range");

    let mut shell = ArrayAttributeGrid::new(SIZE, SIZE, SIZE, VOXEL_SIZE);
    DensityShellExtractor::new(0.15, 0.0, &transform)
        .execute(&distances, &mut shell)
        .expect("the shell boundaries lie within the computed bands");

    println!(
        "Solid sphere: {} filled voxels.",
        solid.count_of_class(VoxelClass::INSIDE)
    );
    println!(
        "Hollow sphere: {} filled voxels.",
        shell.count_of_class(VoxelClass::INSIDE)
    );
}
