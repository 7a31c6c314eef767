use crate::common::{all_voxels, blob_grid, box_grid};
use voxmorph3d::grid::{ArrayAttributeGrid, Grid, VoxelState};
use voxmorph3d::math::{Offset, Voxel};
use voxmorph3d::morphology::{
    LayeredDilation, ShapeMorphology, StructuringElement, SurfaceFinder, SurfaceSide,
    FACE_NEIGHBORS,
};

/// Reference erosion/dilation stamping the full element on every accepted surface voxel.
fn brute_force(
    grid: &ArrayAttributeGrid,
    element: &StructuringElement,
    dilation: bool,
    accept: impl Fn(Voxel) -> bool,
) -> ArrayAttributeGrid {
    let mut result = grid.clone();

    for v in all_voxels(grid) {
        let inside = grid.state(v).is_inside();
        let touches_other_side = FACE_NEIGHBORS.iter().any(|o| {
            let n = v + *o;
            grid.contains(n) && grid.state(n).is_inside() != inside
        });
        let on_surface = touches_other_side && inside == dilation;

        if !on_surface || !accept(v) {
            continue;
        }

        for o in element.offsets() {
            let target = v + *o;
            if !grid.contains(target) {
                continue;
            }
            if dilation && result.state(target) == VoxelState::Outside {
                result.set_state(target, VoxelState::Inside);
            } else if !dilation {
                result.set_state(target, VoxelState::Outside);
            }
        }
    }

    result
}

#[test]
fn erosion_removes_the_shell_of_a_cube() {
    let mut grid = box_grid(14, Voxel::new(2, 2, 2), Voxel::new(11, 11, 11), VoxelState::Inside);

    let changed = ShapeMorphology::erosion(StructuringElement::diamond(1)).execute(&mut grid);

    assert_eq!(changed, 10 * 10 * 10 - 8 * 8 * 8);
    for v in all_voxels(&grid) {
        let expected = (0..3).all(|i| (3..=10).contains(&v[i]));
        assert_eq!(grid.state(v) == VoxelState::Inside, expected, "{v}");
    }
}

#[test]
fn shaped_dilation_matches_layered_dilation() {
    let mins = Voxel::new(3, 4, 5);
    let maxs = Voxel::new(8, 7, 9);
    let mut shaped = box_grid(14, mins, maxs, VoxelState::Interior);
    let mut layered = shaped.clone();

    let _ = ShapeMorphology::dilation(StructuringElement::diamond(2))
        .with_fill_state(VoxelState::Interior)
        .execute(&mut shaped);
    LayeredDilation::new(2).execute(&mut layered);

    assert_eq!(shaped, layered);
}

#[test]
fn incremental_stamping_matches_full_stamping() {
    let elements = [
        StructuringElement::diamond(1),
        StructuringElement::ball(2),
        StructuringElement::cube(1),
        StructuringElement::from_offsets([
            Offset::new(0, 0, 0),
            Offset::new(0, 0, 2),
            Offset::new(1, 0, -1),
            Offset::new(0, -2, 0),
        ]),
    ];

    for seed in 0..4 {
        let grid = blob_grid(seed, 16);

        for element in &elements {
            for dilation in [false, true] {
                let expected = brute_force(&grid, element, dilation, |_| true);

                let mut result = grid.clone();
                let op = if dilation {
                    ShapeMorphology::dilation(element.clone())
                } else {
                    ShapeMorphology::erosion(element.clone())
                };
                let _ = op.execute(&mut result);

                assert_eq!(result, expected, "seed {seed}, dilation: {dilation}, {element:?}");
            }
        }
    }
}

#[test]
fn vetoed_voxels_have_no_side_effects() {
    let grid = blob_grid(11, 16);
    let element = StructuringElement::ball(2);
    let accept = |v: Voxel| v.z % 3 != 1;

    for dilation in [false, true] {
        let expected = brute_force(&grid, &element, dilation, accept);

        let mut result = grid.clone();
        let op = if dilation {
            ShapeMorphology::dilation(element.clone())
        } else {
            ShapeMorphology::erosion(element.clone())
        };
        let _ = op.with_voxel_checker(accept).execute(&mut result);

        assert_eq!(result, expected, "dilation: {dilation}");
    }
}

#[test]
fn surface_finder_ignores_the_grid_boundary() {
    let grid = box_grid(6, Voxel::new(0, 0, 0), Voxel::new(5, 5, 2), VoxelState::Inside);

    let outer = SurfaceFinder::new(SurfaceSide::Outer).find(&grid);
    assert_eq!(outer.len(), 36);
    assert!(outer.iter().all(|v| v.z == 3));

    let inner = SurfaceFinder::new(SurfaceSide::Inner).find(&grid);
    assert_eq!(inner.len(), 36);
    assert!(inner.iter().all(|v| v.z == 2));
}
