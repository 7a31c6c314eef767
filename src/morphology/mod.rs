//! Morphological operations: layered dilation and erosion, and erosion and dilation
//! by arbitrary structuring elements.

pub use self::layered_dilation::LayeredDilation;
pub use self::layered_erosion::LayeredErosion;
pub use self::neighborhood::{Neighborhood, EDGE_NEIGHBORS, FACE_NEIGHBORS, VERTEX_NEIGHBORS};
pub use self::shape_morphology::{MorphologyKind, ShapeMorphology, SurfaceFinder, SurfaceSide};
pub use self::structuring_element::{ScanCursor, StructuringElement};
pub use self::voxel_checker::VoxelChecker;

mod layered_dilation;
mod layered_erosion;
mod neighborhood;
mod shape_morphology;
mod structuring_element;
mod voxel_checker;
