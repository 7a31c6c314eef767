use crate::grid::{Grid, VoxelClass, VoxelMask, VoxelState};
use crate::morphology::neighborhood::FACE_NEIGHBORS;
use crate::morphology::{ScanCursor, StructuringElement, VoxelChecker};
use std::time::Instant;

/// The side of the solid boundary collected by a [`SurfaceFinder`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum SurfaceSide {
    /// The outside voxels face-adjacent to a filled voxel.
    Outer,
    /// The filled voxels face-adjacent to an outside voxel.
    Inner,
}

/// Collects the voxels lying on one side of the boundary of the filled region of a grid.
///
/// Voxels outside of the lattice are never collected and never count as outside.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SurfaceFinder {
    /// The side of the boundary to collect.
    pub side: SurfaceSide,
}

impl SurfaceFinder {
    /// A finder collecting the given side of the boundary.
    pub fn new(side: SurfaceSide) -> Self {
        Self { side }
    }

    /// Scans every filled voxel of `grid` once and returns the mask of surface voxels.
    pub fn find<G: Grid>(&self, grid: &G) -> VoxelMask {
        let mut surface = VoxelMask::with_dimensions(grid.dimensions());

        grid.for_each_of_class(VoxelClass::INSIDE, None, |voxel, _| {
            for offset in &FACE_NEIGHBORS {
                let neighbor = voxel + *offset;
                if !grid.contains(neighbor) || grid.state(neighbor) != VoxelState::Outside {
                    continue;
                }

                match self.side {
                    SurfaceSide::Outer => {
                        let _ = surface.insert(neighbor);
                    }
                    SurfaceSide::Inner => {
                        let _ = surface.insert(voxel);
                        break;
                    }
                }
            }
        });

        surface
    }
}

/// Whether a [`ShapeMorphology`] removes or adds voxels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum MorphologyKind {
    /// Voxels covered by the element stamped on the outer surface become outside.
    Erosion,
    /// Outside voxels covered by the element stamped on the inner surface become filled.
    Dilation,
}

/// Erosion or dilation of the filled region of a grid by an arbitrary structuring element.
///
/// The operation first collects the surface of the filled region with a
/// [`SurfaceFinder`], then stamps the structuring element on every surface voxel. Surface
/// voxels are visited in `(y, x, z)` order and a [`ScanCursor`] restricts the stamp to the
/// element's incremented offsets whenever the previous stamp was on the voxel right
/// below along `z`.
pub struct ShapeMorphology {
    kind: MorphologyKind,
    element: StructuringElement,
    fill_state: VoxelState,
    voxel_checker: Option<Box<dyn VoxelChecker + Send + Sync>>,
}

impl ShapeMorphology {
    /// An erosion by `element`.
    pub fn erosion(element: StructuringElement) -> Self {
        Self {
            kind: MorphologyKind::Erosion,
            element,
            fill_state: VoxelState::Inside,
            voxel_checker: None,
        }
    }

    /// A dilation by `element`, filling new voxels with [`VoxelState::Inside`].
    pub fn dilation(element: StructuringElement) -> Self {
        Self {
            kind: MorphologyKind::Dilation,
            ..Self::erosion(element)
        }
    }

    /// Sets the state given to the voxels added by a dilation.
    pub fn with_fill_state(mut self, state: VoxelState) -> Self {
        self.fill_state = state;
        self
    }

    /// Restricts the surface voxels the element is stamped on to the ones accepted by `checker`.
    pub fn with_voxel_checker(
        mut self,
        checker: impl VoxelChecker + Send + Sync + 'static,
    ) -> Self {
        self.voxel_checker = Some(Box::new(checker));
        self
    }

    /// Is this an erosion or a dilation?
    pub fn kind(&self) -> MorphologyKind {
        self.kind
    }

    /// The structuring element of this operation.
    pub fn element(&self) -> &StructuringElement {
        &self.element
    }

    /// Applies this operation to `grid` in place.
    ///
    /// Returns the number of voxels that changed state.
    pub fn execute<G: Grid>(&self, grid: &mut G) -> usize {
        let t0 = Instant::now();
        let side = match self.kind {
            MorphologyKind::Erosion => SurfaceSide::Outer,
            MorphologyKind::Dilation => SurfaceSide::Inner,
        };
        let surface = SurfaceFinder::new(side).find(&*grid);

        let mut cursor = ScanCursor::new();
        let mut changed = 0;

        for voxel in &surface {
            if let Some(checker) = &self.voxel_checker {
                if !checker.can_process(voxel) {
                    continue;
                }
            }

            for offset in cursor.offsets(&self.element, voxel) {
                let target = voxel + *offset;
                if !grid.contains(target) {
                    continue;
                }

                let state = grid.state(target);
                match self.kind {
                    MorphologyKind::Erosion if state != VoxelState::Outside => {
                        grid.set_state(target, VoxelState::Outside);
                        changed += 1;
                    }
                    MorphologyKind::Dilation if state == VoxelState::Outside => {
                        grid.set_state(target, self.fill_state);
                        changed += 1;
                    }
                    _ => {}
                }
            }
        }

        log::debug!(
            "Shape {:?} with {} offsets: {} surface voxels, {} voxels changed in {:?}.",
            self.kind,
            self.element.len(),
            surface.len(),
            changed,
            t0.elapsed()
        );

        changed
    }
}
