use crate::distance::CandidateQueue;
use crate::error::MorphologyError;
use crate::grid::{
    Grid, VoxelClass, VoxelData, VoxelMask, VoxelState, UNDEFINED_INSIDE_DISTANCE,
    UNDEFINED_OUTSIDE_DISTANCE,
};
use crate::math::{Real, Voxel};
use crate::morphology::FACE_NEIGHBORS;
use std::time::Instant;

/// Signed distance propagation from the iso-surface of a density grid.
///
/// The source grid attributes are densities in `0..=subvoxel_resolution`, the surface
/// lying at `subvoxel_resolution / 2`: a voxel is inside iff its density is at least
/// that value. The result is a new grid whose attributes are signed distances to the
/// surface, negative inside, expressed in units of `voxel_size / subvoxel_resolution`.
///
/// Distances are propagated by a fast-marching wavefront from the voxels adjacent to the
/// surface, up to `max_in_distance` inside and `max_out_distance` outside. Voxels beyond
/// these bands keep the [`UNDEFINED_INSIDE_DISTANCE`] or [`UNDEFINED_OUTSIDE_DISTANCE`]
/// sentinels.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FastMarchingTransform {
    /// The number of density steps across one voxel.
    pub subvoxel_resolution: i32,
    /// The largest distance computed inside the shape, in physical units.
    pub max_in_distance: Real,
    /// The largest distance computed outside the shape, in physical units.
    pub max_out_distance: Real,
}

impl Default for FastMarchingTransform {
    fn default() -> Self {
        Self {
            subvoxel_resolution: 100,
            max_in_distance: 0.0,
            max_out_distance: 0.0,
        }
    }
}

impl FastMarchingTransform {
    /// A transform computing distances over `[-max_in_distance, max_out_distance]`.
    pub fn new(subvoxel_resolution: i32, max_in_distance: Real, max_out_distance: Real) -> Self {
        Self {
            subvoxel_resolution,
            max_in_distance,
            max_out_distance,
        }
    }

    /// The subvoxel resolution actually used, at least 1.
    pub fn resolution(&self) -> i32 {
        self.subvoxel_resolution.max(1)
    }

    /// The density of the iso-surface.
    pub fn surface_value(&self) -> i32 {
        self.resolution() / 2
    }

    /// The inside and outside band limits, in attribute units, for the given voxel size.
    pub fn band_limits(&self, voxel_size: Real) -> Result<(i32, i32), MorphologyError> {
        if voxel_size <= 0.0 {
            return Err(MorphologyError::Unsupported(
                "distance transforms require a positive voxel size",
            ));
        }

        let scale = self.resolution() as Real / voxel_size;
        let limit = |distance: Real| {
            let value = (distance.max(0.0) * scale).round();
            if value < UNDEFINED_OUTSIDE_DISTANCE as Real {
                Ok(value as i32)
            } else {
                Err(MorphologyError::AttributeOutOfRange {
                    value: value as i64,
                    limit: UNDEFINED_OUTSIDE_DISTANCE,
                })
            }
        };

        Ok((limit(self.max_in_distance)?, limit(self.max_out_distance)?))
    }

    /// Computes the signed distance grid of the density grid `grid`.
    ///
    /// The result has the same dimensions and bounds as `grid`.
    pub fn execute<G: Grid>(&self, grid: &G) -> Result<G, MorphologyError> {
        let t0 = Instant::now();
        let resolution = self.resolution();
        let surface_value = self.surface_value();
        let (max_in, max_out) = self.band_limits(grid.voxel_size())?;
        let dimensions = grid.dimensions();

        let mut result =
            grid.create_empty(dimensions.x, dimensions.y, dimensions.z, grid.voxel_size());
        result.set_grid_bounds(grid.grid_bounds());

        let is_inside = |voxel: Voxel| grid.attribute(voxel) >= surface_value;
        let band_limit = |inside: bool| if inside { max_in } else { max_out };

        let mut queue = CandidateQueue::new(max_in.max(max_out) as usize + 1);
        let mut seeds = 0;
        let mut seeding_error = None;

        grid.for_each_of_class(VoxelClass::ALL, None, |voxel, data| {
            let inside = data.attribute >= surface_value;
            result.set_data(
                voxel,
                if inside {
                    VoxelData::new(VoxelState::Inside, UNDEFINED_INSIDE_DISTANCE)
                } else {
                    VoxelData::new(VoxelState::Outside, UNDEFINED_OUTSIDE_DISTANCE)
                },
            );

            let on_surface = FACE_NEIGHBORS.iter().any(|offset| {
                let neighbor = voxel + *offset;
                grid.contains(neighbor) && is_inside(neighbor) != inside
            });

            if on_surface {
                let estimate = (data.attribute - surface_value).abs();
                if estimate <= band_limit(inside) {
                    if let Err(e) = queue.relax(voxel, estimate) {
                        let _ = seeding_error.get_or_insert(e);
                    }
                    seeds += 1;
                }
            }
        });

        if let Some(e) = seeding_error {
            return Err(e);
        }

        let mut frozen = VoxelMask::with_dimensions(dimensions);

        while let Some(candidate) = queue.pop_min() {
            let voxel = candidate.voxel;
            let inside = is_inside(voxel);
            let _ = frozen.insert(voxel);
            result.set_attribute(voxel, if inside { -candidate.value } else { candidate.value });

            for offset in &FACE_NEIGHBORS {
                let neighbor = voxel + *offset;
                if !grid.contains(neighbor)
                    || frozen.contains(neighbor)
                    || is_inside(neighbor) != inside
                {
                    continue;
                }

                // Smallest frozen value along each axis, on this side of the surface.
                let mut upwind = [i64::MAX; 3];
                for (axis, a) in upwind.iter_mut().enumerate() {
                    for sign in [-1, 1] {
                        let mut other = neighbor;
                        other[axis] += sign;
                        if frozen.contains(other) && is_inside(other) == inside {
                            *a = (*a).min(result.attribute(other).abs() as i64);
                        }
                    }
                }

                let value = upwind_solution(upwind, resolution as i64);
                if value <= band_limit(inside) as i64 {
                    let _ = queue.relax(neighbor, value as i32)?;
                }
            }
        }

        log::debug!(
            "Fast marching: {} seeds, {} voxels frozen in {:?}.",
            seeds,
            frozen.len(),
            t0.elapsed()
        );

        Ok(result)
    }
}

/// First-order upwind solution of the eikonal equation on a voxel lattice.
///
/// `neighbors` holds, for each axis, the smallest known value of the two neighbors along
/// that axis (`i64::MAX` if none is known), and `step` is the value increment across one
/// voxel. The result never exceeds `min(neighbors) + step`.
pub fn upwind_solution(mut neighbors: [i64; 3], step: i64) -> i64 {
    neighbors.sort_unstable();
    let [a0, a1, a2] = neighbors;

    let x = a0.saturating_add(step);
    if x <= a1 {
        return x;
    }

    let h2 = (step as f64) * (step as f64);
    let (f0, f1) = (a0 as f64, a1 as f64);
    let sum = f0 + f1;
    let discriminant = sum * sum - 2.0 * (f0 * f0 + f1 * f1 - h2);
    let x = ((sum + discriminant.max(0.0).sqrt()) / 2.0).round() as i64;
    if x <= a2 {
        return x;
    }

    let f2 = a2 as f64;
    let sum = f0 + f1 + f2;
    let discriminant = sum * sum - 3.0 * (f0 * f0 + f1 * f1 + f2 * f2 - h2);
    ((sum + discriminant.max(0.0).sqrt()) / 3.0).round() as i64
}
