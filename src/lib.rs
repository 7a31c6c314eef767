/*!
voxmorph3d
========

**voxmorph3d** is a library of distance transforms and morphological
operations on 3-dimensional voxel grids, written with the rust programming
language.

It provides:

- layered (breadth-first) dilation and erosion of voxel regions,
- erosion and dilation with arbitrary structuring elements,
- fast-marching signed distance propagation around a density surface,
- extraction of antialiased density shells from distance fields,
- slice-parallel per-voxel boolean operations.

All operations work through the [`grid::Grid`] trait. The dense
[`grid::ArrayAttributeGrid`] implements it and is what the parallel
operations write into.

```
use voxmorph3d::grid::{ArrayAttributeGrid, Grid, VoxelClass, VoxelState};
use voxmorph3d::math::Voxel;
use voxmorph3d::morphology::LayeredDilation;

let mut grid = ArrayAttributeGrid::new(8, 8, 8, 0.1);
grid.set_state(Voxel::new(4, 4, 4), VoxelState::Interior);

LayeredDilation::new(1).execute(&mut grid);
assert_eq!(grid.count_of_class(VoxelClass::INTERIOR), 7);
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;

pub extern crate nalgebra as na;

pub mod distance;
pub mod error;
pub mod grid;
pub mod morphology;
pub mod parallel;
pub mod utils;

pub use crate::error::MorphologyError;

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    use na::{Point3, Vector3};

    /// The scalar type used for physical lengths throughout this crate.
    pub type Real = f64;

    /// The integer coordinates of a voxel on the grid lattice.
    pub type Voxel = Point3<i32>;

    /// A relative offset between two voxels.
    pub type Offset = Vector3<i32>;

    /// A point in physical space.
    pub type Point = Point3<Real>;

    /// A vector in physical space.
    pub type Vector = Vector3<Real>;
}
