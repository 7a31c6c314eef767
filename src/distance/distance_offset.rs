use crate::distance::{DensityShellExtractor, FastMarchingTransform};
use crate::error::MorphologyError;
use crate::grid::Grid;
use crate::math::Real;

/// Erodes the solid described by a density grid by a physical distance.
///
/// The distance field is only computed inside the solid, up to `distance` plus one
/// voxel, then the solid bounded by the `-distance` iso-surface is written back as
/// densities into the grid.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ErosionDistance {
    /// The erosion distance, in physical units.
    pub distance: Real,
    /// The number of density steps across one voxel.
    pub subvoxel_resolution: i32,
}

impl ErosionDistance {
    /// An erosion by `distance`.
    pub fn new(distance: Real, subvoxel_resolution: i32) -> Self {
        Self {
            distance,
            subvoxel_resolution,
        }
    }

    /// Erodes the density grid `grid` in place.
    pub fn execute<G: Grid>(&self, grid: &mut G) -> Result<(), MorphologyError> {
        if self.distance <= 0.0 {
            return Ok(());
        }

        let voxel_size = grid.voxel_size();
        let transform = FastMarchingTransform::new(
            self.subvoxel_resolution,
            self.distance + voxel_size,
            voxel_size,
        );
        let distances = transform.execute(&*grid)?;
        DensityShellExtractor::solid(-self.distance, &transform).execute(&distances, grid)
    }
}

/// Dilates the solid described by a density grid by a physical distance.
///
/// The grid is not resized: the dilated solid is clipped by the grid bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct DilationDistance {
    /// The dilation distance, in physical units.
    pub distance: Real,
    /// The number of density steps across one voxel.
    pub subvoxel_resolution: i32,
}

impl DilationDistance {
    /// A dilation by `distance`.
    pub fn new(distance: Real, subvoxel_resolution: i32) -> Self {
        Self {
            distance,
            subvoxel_resolution,
        }
    }

    /// Dilates the density grid `grid` in place.
    pub fn execute<G: Grid>(&self, grid: &mut G) -> Result<(), MorphologyError> {
        if self.distance <= 0.0 {
            return Ok(());
        }

        let voxel_size = grid.voxel_size();
        let transform = FastMarchingTransform::new(
            self.subvoxel_resolution,
            voxel_size,
            self.distance + voxel_size,
        );
        let distances = transform.execute(&*grid)?;
        DensityShellExtractor::solid(self.distance, &transform).execute(&distances, grid)
    }
}
