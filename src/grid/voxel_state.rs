use crate::grid::Attribute;

/// The attribute value written to voxels an outside distance propagation never reached.
pub const UNDEFINED_OUTSIDE_DISTANCE: Attribute = i16::MAX as Attribute;
/// The attribute value written to voxels an inside distance propagation never reached.
pub const UNDEFINED_INSIDE_DISTANCE: Attribute = -UNDEFINED_OUTSIDE_DISTANCE;

/// The occupancy state of a single voxel.
///
/// [`VoxelState::Interior`] and [`VoxelState::Exterior`] are refinements of
/// [`VoxelState::Inside`]: they are filled voxels that are respectively part of the
/// bulk of the solid or of its boundary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum VoxelState {
    /// The voxel is empty.
    #[default]
    Outside,
    /// The voxel is filled, without further classification.
    Inside,
    /// The voxel is filled and belongs to the bulk of the solid.
    Interior,
    /// The voxel is filled and belongs to the boundary of the solid.
    Exterior,
}

impl VoxelState {
    /// Is this voxel filled (i.e. anything but [`VoxelState::Outside`])?
    #[inline]
    pub fn is_inside(self) -> bool {
        self != VoxelState::Outside
    }

    /// The class flag matching exactly this state.
    #[inline]
    pub fn class(self) -> VoxelClass {
        match self {
            VoxelState::Outside => VoxelClass::OUTSIDE,
            VoxelState::Inside => VoxelClass::FILLED,
            VoxelState::Interior => VoxelClass::INTERIOR,
            VoxelState::Exterior => VoxelClass::EXTERIOR,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
/// A selector over voxel states, used by grid traversals.
pub struct VoxelClass(u8);

bitflags::bitflags! {
    impl VoxelClass: u8 {
        /// Matches [`VoxelState::Outside`].
        const OUTSIDE = 1 << 0;
        /// Matches the unclassified [`VoxelState::Inside`] only.
        const FILLED = 1 << 1;
        /// Matches [`VoxelState::Interior`].
        const INTERIOR = 1 << 2;
        /// Matches [`VoxelState::Exterior`].
        const EXTERIOR = 1 << 3;
        /// Matches every filled voxel, whatever its classification.
        const INSIDE = Self::FILLED.bits() | Self::INTERIOR.bits() | Self::EXTERIOR.bits();
        /// Matches every voxel.
        const ALL = Self::OUTSIDE.bits() | Self::INSIDE.bits();
    }
}

impl VoxelClass {
    /// Does a voxel with the given state belong to this class?
    #[inline]
    pub fn matches(self, state: VoxelState) -> bool {
        self.intersects(state.class())
    }
}

/// The state and attribute of a single voxel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VoxelData {
    /// The occupancy state of the voxel.
    pub state: VoxelState,
    /// The attribute of the voxel (material, density or scaled distance).
    pub attribute: Attribute,
}

impl VoxelData {
    /// An empty voxel with a zero attribute.
    pub const OUTSIDE: Self = Self {
        state: VoxelState::Outside,
        attribute: 0,
    };

    /// Creates voxel data from its state and attribute.
    #[inline]
    pub const fn new(state: VoxelState, attribute: Attribute) -> Self {
        Self { state, attribute }
    }
}
