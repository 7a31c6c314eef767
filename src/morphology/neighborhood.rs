use crate::math::Offset;

/// The 6 face-adjacent neighbors of a voxel.
pub static FACE_NEIGHBORS: [Offset; 6] = [
    Offset::new(1, 0, 0),
    Offset::new(-1, 0, 0),
    Offset::new(0, 1, 0),
    Offset::new(0, -1, 0),
    Offset::new(0, 0, 1),
    Offset::new(0, 0, -1),
];

/// The 18 face- or edge-adjacent neighbors of a voxel.
pub static EDGE_NEIGHBORS: [Offset; 18] = [
    Offset::new(1, 0, 0),
    Offset::new(-1, 0, 0),
    Offset::new(0, 1, 0),
    Offset::new(0, -1, 0),
    Offset::new(0, 0, 1),
    Offset::new(0, 0, -1),
    Offset::new(1, 1, 0),
    Offset::new(1, -1, 0),
    Offset::new(-1, 1, 0),
    Offset::new(-1, -1, 0),
    Offset::new(1, 0, 1),
    Offset::new(1, 0, -1),
    Offset::new(-1, 0, 1),
    Offset::new(-1, 0, -1),
    Offset::new(0, 1, 1),
    Offset::new(0, 1, -1),
    Offset::new(0, -1, 1),
    Offset::new(0, -1, -1),
];

/// The 26 neighbors of a voxel sharing at least a vertex with it.
pub static VERTEX_NEIGHBORS: [Offset; 26] = [
    Offset::new(1, 0, 0),
    Offset::new(-1, 0, 0),
    Offset::new(0, 1, 0),
    Offset::new(0, -1, 0),
    Offset::new(0, 0, 1),
    Offset::new(0, 0, -1),
    Offset::new(1, 1, 0),
    Offset::new(1, -1, 0),
    Offset::new(-1, 1, 0),
    Offset::new(-1, -1, 0),
    Offset::new(1, 0, 1),
    Offset::new(1, 0, -1),
    Offset::new(-1, 0, 1),
    Offset::new(-1, 0, -1),
    Offset::new(0, 1, 1),
    Offset::new(0, 1, -1),
    Offset::new(0, -1, 1),
    Offset::new(0, -1, -1),
    Offset::new(1, 1, 1),
    Offset::new(1, 1, -1),
    Offset::new(1, -1, 1),
    Offset::new(1, -1, -1),
    Offset::new(-1, 1, 1),
    Offset::new(-1, 1, -1),
    Offset::new(-1, -1, 1),
    Offset::new(-1, -1, -1),
];

/// The connectivity used by layered morphological operations.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Neighborhood {
    /// Face-adjacent neighbors only.
    #[default]
    Six,
    /// Face- and edge-adjacent neighbors.
    Eighteen,
    /// Face-, edge- and vertex-adjacent neighbors.
    TwentySix,
    /// 18 neighbors on even iterations, 6 neighbors on odd iterations.
    ///
    /// Alternating both connectivities grows a region into a shape closer to a
    /// ball than what each of them gives alone.
    Alternating,
}

impl Neighborhood {
    /// The neighbor offsets to use at the given (zero-based) iteration.
    pub fn offsets(self, iteration: usize) -> &'static [Offset] {
        match self {
            Neighborhood::Six => &FACE_NEIGHBORS,
            Neighborhood::Eighteen => &EDGE_NEIGHBORS,
            Neighborhood::TwentySix => &VERTEX_NEIGHBORS,
            Neighborhood::Alternating if iteration % 2 == 0 => &EDGE_NEIGHBORS,
            Neighborhood::Alternating => &FACE_NEIGHBORS,
        }
    }
}
