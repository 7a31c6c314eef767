//! Hash-maps and hash-sets keyed by voxel coordinates.

/// Hashmap using [`hashbrown::HashMap`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V>;

/// Hashset using [`hashbrown::HashSet`].
pub type HashSet<K> = hashbrown::HashSet<K>;
