use crate::common::{
    all_voxels, ball_density_grid, slab_density_grid, RESOLUTION, VOXEL_SIZE,
};
use voxmorph3d::distance::{
    DensityShellExtractor, DilationDistance, ErosionDistance, FastMarchingTransform,
};
use voxmorph3d::grid::{
    ArrayAttributeGrid, Grid, VoxelData, VoxelState, UNDEFINED_INSIDE_DISTANCE,
    UNDEFINED_OUTSIDE_DISTANCE,
};
use voxmorph3d::math::Voxel;
use voxmorph3d::morphology::FACE_NEIGHBORS;
use voxmorph3d::MorphologyError;

/// A row of voxels holding the given signed distances.
fn distance_row(values: &[i32]) -> ArrayAttributeGrid {
    let mut grid = ArrayAttributeGrid::new(values.len(), 1, 1, VOXEL_SIZE);
    for (x, value) in values.iter().enumerate() {
        let state = if *value <= 0 {
            VoxelState::Inside
        } else {
            VoxelState::Outside
        };
        grid.set_data(Voxel::new(x as i32, 0, 0), VoxelData::new(state, *value));
    }
    grid
}

fn densities(grid: &ArrayAttributeGrid) -> Vec<i32> {
    all_voxels(grid).into_iter().map(|v| grid.attribute(v)).collect()
}

#[test]
fn shell_densities_follow_the_ramps() {
    let distances = distance_row(&[
        UNDEFINED_INSIDE_DISTANCE,
        -300,
        -200,
        -150,
        0,
        300,
        325,
        350,
        UNDEFINED_OUTSIDE_DISTANCE,
    ]);
    let fm = FastMarchingTransform::new(RESOLUTION, 0.5, 0.5);
    let mut result = ArrayAttributeGrid::new(9, 1, 1, VOXEL_SIZE);

    DensityShellExtractor::new(0.2, 0.3, &fm)
        .execute(&distances, &mut result)
        .unwrap();

    assert_eq!(densities(&result), [0, 0, 50, 100, 100, 50, 25, 0, 0]);
    for v in all_voxels(&result) {
        assert_eq!(
            result.state(v) == VoxelState::Inside,
            result.attribute(v) > 0,
            "{v}"
        );
    }
}

#[test]
fn surface_voxels_get_half_density() {
    let distances = distance_row(&[-100, -50, 0, 50, 100]);
    let fm = FastMarchingTransform::new(RESOLUTION, 0.5, 0.5);
    let mut result = ArrayAttributeGrid::new(5, 1, 1, VOXEL_SIZE);

    DensityShellExtractor::new(0.0, VOXEL_SIZE, &fm)
        .execute(&distances, &mut result)
        .unwrap();

    assert_eq!(densities(&result), [0, 0, 50, 100, 50]);
}

#[test]
fn disabled_boundaries_fill_their_side() {
    let distances = distance_row(&[
        UNDEFINED_INSIDE_DISTANCE,
        -300,
        0,
        300,
        UNDEFINED_OUTSIDE_DISTANCE,
    ]);
    let mut result = ArrayAttributeGrid::new(5, 1, 1, VOXEL_SIZE);

    // The inner boundary is deeper than the computed band.
    let fm = FastMarchingTransform::new(RESOLUTION, 0.1, 0.5);
    DensityShellExtractor::new(0.2, 0.3, &fm)
        .execute(&distances, &mut result)
        .unwrap();
    assert_eq!(densities(&result), [100, 100, 100, 50, 0]);

    // The outer boundary is further than the computed band.
    let fm = FastMarchingTransform::new(RESOLUTION, 0.5, 0.2);
    DensityShellExtractor::new(0.2, 0.3, &fm)
        .execute(&distances, &mut result)
        .unwrap();
    assert_eq!(densities(&result), [0, 0, 100, 100, 0]);
}

#[test]
fn boundaries_on_the_wrong_side_of_the_band_are_rejected() {
    let distances = distance_row(&[-100, 0, 100]);
    let mut result = ArrayAttributeGrid::new(3, 1, 1, VOXEL_SIZE);
    let fm = FastMarchingTransform::new(RESOLUTION, 0.1, 0.1);

    assert!(matches!(
        DensityShellExtractor::new(0.0, -0.5, &fm).execute(&distances, &mut result),
        Err(MorphologyError::Unsupported(_))
    ));
}

#[test]
fn mismatched_grids_are_left_untouched() {
    let distances = distance_row(&[-100, 0, 100, 200, 300]);
    let marker = VoxelData::new(VoxelState::Exterior, 42);
    let mut result = ArrayAttributeGrid::new(4, 1, 1, VOXEL_SIZE);
    for v in all_voxels(&result) {
        result.set_data(v, marker);
    }
    let before = result.clone();

    let fm = FastMarchingTransform::new(RESOLUTION, 0.5, 0.5);
    let err = DensityShellExtractor::new(0.2, 0.3, &fm)
        .execute(&distances, &mut result)
        .unwrap_err();

    assert!(matches!(
        err,
        MorphologyError::DimensionMismatch {
            expected: [5, 1, 1],
            found: [4, 1, 1]
        }
    ));
    assert_eq!(result, before);
}

#[test]
fn solid_at_zero_distance_restores_the_surface() {
    let grid = ball_density_grid(20, 0.6);
    let fm = FastMarchingTransform::new(RESOLUTION, 0.3, 0.3);
    let distances = fm.execute(&grid).unwrap();

    let mut result = ArrayAttributeGrid::new(20, 20, 20, VOXEL_SIZE);
    DensityShellExtractor::solid(0.0, &fm)
        .execute(&distances, &mut result)
        .unwrap();

    let surface = fm.surface_value();
    let is_inside = |g: &ArrayAttributeGrid, v: Voxel| g.attribute(v) >= surface;

    for v in all_voxels(&grid) {
        assert_eq!(is_inside(&result, v), is_inside(&grid, v), "{v}");

        let on_surface = FACE_NEIGHBORS.iter().any(|o| {
            let n = v + *o;
            grid.contains(n) && is_inside(&grid, n) != is_inside(&grid, v)
        });
        if on_surface {
            assert_eq!(result.attribute(v), grid.attribute(v), "{v}");
        }
    }
}

#[test]
fn erosion_distance_moves_the_surface_inward() {
    let mut grid = slab_density_grid(16, 8);
    ErosionDistance::new(0.2, RESOLUTION).execute(&mut grid).unwrap();

    for v in all_voxels(&grid) {
        let expected = if v.x <= 5 { RESOLUTION } else { 0 };
        assert_eq!(grid.attribute(v), expected, "{v}");
        assert_eq!(grid.state(v) == VoxelState::Inside, v.x <= 5, "{v}");
    }
}

#[test]
fn dilation_distance_moves_the_surface_outward() {
    let mut grid = slab_density_grid(16, 8);
    DilationDistance::new(0.2, RESOLUTION).execute(&mut grid).unwrap();

    for v in all_voxels(&grid) {
        let expected = if v.x <= 9 { RESOLUTION } else { 0 };
        assert_eq!(grid.attribute(v), expected, "{v}");
    }
}

#[test]
fn null_offsets_are_no_ops() {
    let original = slab_density_grid(8, 4);
    let mut grid = original.clone();

    ErosionDistance::new(0.0, RESOLUTION).execute(&mut grid).unwrap();
    DilationDistance::new(-0.3, RESOLUTION).execute(&mut grid).unwrap();

    assert_eq!(grid, original);
}
