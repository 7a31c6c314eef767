//! Various unsorted utilities.

pub mod hashmap;
