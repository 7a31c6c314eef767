use crate::distance::FastMarchingTransform;
use crate::error::MorphologyError;
use crate::grid::{
    check_dimensions, Grid, VoxelClass, VoxelData, VoxelState, UNDEFINED_INSIDE_DISTANCE,
    UNDEFINED_OUTSIDE_DISTANCE,
};
use crate::math::Real;
use std::time::Instant;

/// The two density ramps edges of a shell boundary, in distance attribute units.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct ShellEdge {
    minus: i64,
    plus: i64,
}

/// Converts a signed distance grid into an antialiased density grid of a shell.
///
/// Along the signed distance axis, the output is made of five bands:
///
/// 1. far inside, deeper than `in_distance`: outside, density 0;
/// 2. the inner ramp around `-in_distance`: density rising from 0 to `subvoxel_resolution`;
/// 3. the bulk of the shell: full density;
/// 4. the outer ramp around `out_distance`: density falling back to 0;
/// 5. far outside: outside, density 0.
///
/// Each ramp is one voxel wide. A shell boundary further from the surface than what the
/// source distance transform computed is disabled: the inner boundary then leaves the
/// whole inside filled, and the outer boundary fills every voxel the transform reached.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct DensityShellExtractor {
    /// The depth of the inner boundary of the shell, measured inward from the surface.
    pub in_distance: Real,
    /// The position of the outer boundary of the shell, measured outward from the surface.
    ///
    /// Negative values place the outer boundary inside the original shape.
    pub out_distance: Real,
    /// The largest inside distance computed by the source transform.
    pub max_in_distance: Real,
    /// The largest outside distance computed by the source transform.
    pub max_out_distance: Real,
    /// The number of density steps across one voxel.
    pub subvoxel_resolution: i32,
}

impl DensityShellExtractor {
    /// An extractor for a distance grid computed by `transform`.
    pub fn new(in_distance: Real, out_distance: Real, transform: &FastMarchingTransform) -> Self {
        Self {
            in_distance,
            out_distance,
            max_in_distance: transform.max_in_distance,
            max_out_distance: transform.max_out_distance,
            subvoxel_resolution: transform.resolution(),
        }
    }

    /// An extractor producing a solid bounded by `out_distance`, without inner boundary.
    pub fn solid(out_distance: Real, transform: &FastMarchingTransform) -> Self {
        Self::new(Real::INFINITY, out_distance, transform)
    }

    fn edges(
        &self,
        voxel_size: Real,
    ) -> Result<(Option<ShellEdge>, Option<ShellEdge>), MorphologyError> {
        if voxel_size <= 0.0 {
            return Err(MorphologyError::Unsupported(
                "density extraction requires a positive voxel size",
            ));
        }

        let resolution = self.subvoxel_resolution.max(1) as i64;
        let half = resolution / 2;
        let scale = resolution as Real / voxel_size;
        let edge = |distance: Real| {
            let center = (distance * scale).round() as i64;
            ShellEdge {
                minus: center - half,
                plus: center + half,
            }
        };

        let inner = if self.in_distance > self.max_in_distance {
            None
        } else if -self.in_distance > self.max_out_distance {
            return Err(MorphologyError::Unsupported(
                "the inner shell boundary lies outside of the computed distance band",
            ));
        } else {
            Some(edge(-self.in_distance))
        };

        let outer = if self.out_distance > self.max_out_distance {
            None
        } else if -self.out_distance > self.max_in_distance {
            return Err(MorphologyError::Unsupported(
                "the outer shell boundary lies inside of the computed distance band",
            ));
        } else {
            Some(edge(self.out_distance))
        };

        Ok((inner, outer))
    }

    /// Writes into `result` the densities of the shell extracted from the signed
    /// distances of `distances`.
    ///
    /// Both grids must have the same dimensions.
    pub fn execute<D: Grid, G: Grid>(
        &self,
        distances: &D,
        result: &mut G,
    ) -> Result<(), MorphologyError> {
        check_dimensions(distances, &*result)?;
        let (inner, outer) = self.edges(distances.voxel_size())?;

        let t0 = Instant::now();
        let resolution = self.subvoxel_resolution.max(1) as i64;
        let mut filled = 0;

        distances.for_each_of_class(VoxelClass::ALL, None, |voxel, data| {
            let value = data.attribute as i64;
            let inner_density = match inner {
                Some(_) if data.attribute <= UNDEFINED_INSIDE_DISTANCE => 0,
                Some(edge) => (value - edge.minus).clamp(0, resolution),
                None => resolution,
            };
            let outer_density = match outer {
                _ if data.attribute >= UNDEFINED_OUTSIDE_DISTANCE => 0,
                Some(edge) => (edge.plus - value).clamp(0, resolution),
                None => resolution,
            };

            let density = inner_density.min(outer_density) as i32;
            let state = if density > 0 {
                filled += 1;
                VoxelState::Inside
            } else {
                VoxelState::Outside
            };
            result.set_data(voxel, VoxelData::new(state, density));
        });

        log::debug!(
            "Density shell extraction: {} voxels filled in {:?}.",
            filled,
            t0.elapsed()
        );

        Ok(())
    }
}
