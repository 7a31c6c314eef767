use crate::common::{all_voxels, random_grid};
use voxmorph3d::grid::{ArrayAttributeGrid, Grid, VoxelData, VoxelState};
use voxmorph3d::math::Voxel;
use voxmorph3d::parallel::{Intersect, SliceScheduler, ThreadingConfig, Union, VoxelTransform};
use voxmorph3d::MorphologyError;

fn sequential<T: VoxelTransform>(
    source: &ArrayAttributeGrid,
    dest: &ArrayAttributeGrid,
    transform: &T,
) -> ArrayAttributeGrid {
    let mut result = dest.clone();
    for v in all_voxels(dest) {
        let mut data = result.data(v);
        transform.apply(v, source.data(v), &mut data).unwrap();
        result.set_data(v, data);
    }
    result
}

fn schedulers() -> Vec<SliceScheduler> {
    let mut result = vec![];
    for threads in [1, 2, 4, 8] {
        for slice_height in [1, 3, 64] {
            let threading = ThreadingConfig::new(threads).with_max_thread_count(8);
            result.push(SliceScheduler::new(threading).with_slice_height(slice_height));
        }
    }
    result
}

#[test]
fn results_do_not_depend_on_the_scheduling() {
    let source = random_grid(7, 17, 2, VoxelState::Inside);
    let dest = random_grid(8, 17, 2, VoxelState::Interior);

    let shift = |v: Voxel, s: VoxelData, d: &mut VoxelData| -> Result<(), MorphologyError> {
        if s.state.is_inside() {
            *d = VoxelData::new(VoxelState::Exterior, s.attribute + v.y);
        }
        Ok(())
    };

    let expected_intersection = sequential(&source, &dest, &Intersect);
    let expected_shift = sequential(&source, &dest, &shift);
    assert_ne!(expected_intersection, dest);

    for scheduler in schedulers() {
        let mut result = dest.clone();
        scheduler.intersect(&source, &mut result).unwrap();
        assert_eq!(result, expected_intersection, "{scheduler:?}");

        let mut result = dest.clone();
        scheduler.run(&source, &mut result, &shift).unwrap();
        assert_eq!(result, expected_shift, "{scheduler:?}");
    }
}

#[test]
fn boolean_operations() {
    let source = random_grid(1, 9, 3, VoxelState::Inside);
    let dest = random_grid(2, 9, 3, VoxelState::Interior);
    let scheduler = SliceScheduler::new(ThreadingConfig::new(3));

    let mut union = dest.clone();
    scheduler.union(&source, &mut union).unwrap();
    assert_eq!(union, sequential(&source, &dest, &Union::default()));

    let mut difference = dest.clone();
    scheduler.subtract(&source, &mut difference).unwrap();

    for v in all_voxels(&dest) {
        let in_source = source.state(v).is_inside();
        let in_dest = dest.state(v).is_inside();
        assert_eq!(union.state(v).is_inside(), in_source || in_dest, "{v}");
        assert_eq!(difference.state(v).is_inside(), in_dest && !in_source, "{v}");
    }
}

#[test]
fn failures_report_the_slice() {
    let source = ArrayAttributeGrid::new(6, 10, 6, 0.1);
    let mut dest = source.clone();

    let fail_on_row_5 = |v: Voxel, _: VoxelData, _: &mut VoxelData| -> Result<(), MorphologyError> {
        if v.y == 5 {
            Err(MorphologyError::Unsupported("row 5"))
        } else {
            Ok(())
        }
    };

    let err = SliceScheduler::new(ThreadingConfig::new(4))
        .with_slice_height(2)
        .run(&source, &mut dest, &fail_on_row_5)
        .unwrap_err();

    match err {
        MorphologyError::SliceFailed { ymin, ymax, source } => {
            assert_eq!((ymin, ymax), (4, 5));
            assert!(matches!(*source, MorphologyError::Unsupported("row 5")));
        }
        e => panic!("unexpected error: {e}"),
    }
}

#[test]
fn mismatched_grids_are_rejected() {
    let source = ArrayAttributeGrid::new(4, 5, 6, 0.1);
    let mut dest = ArrayAttributeGrid::new(4, 6, 6, 0.1);

    assert!(matches!(
        SliceScheduler::default().intersect(&source, &mut dest),
        Err(MorphologyError::DimensionMismatch {
            expected: [4, 6, 6],
            found: [4, 5, 6]
        })
    ));
}
