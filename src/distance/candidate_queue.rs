use crate::error::MorphologyError;
use crate::math::Voxel;
use crate::utils::hashmap::HashMap;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

/// A voxel waiting in a [`CandidateQueue`], with its current distance estimate.
///
/// Candidates are identified by their coordinates only: two candidates with the same
/// voxel are equal whatever their values.
#[derive(Copy, Clone, Debug)]
pub struct Candidate {
    /// The voxel of this candidate.
    pub voxel: Voxel,
    /// The current distance estimate of this candidate.
    pub value: i32,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.voxel == other.voxel
    }
}

impl Eq for Candidate {}

impl Hash for Candidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.voxel.hash(state)
    }
}

/// A priority queue of voxels keyed by a small non-negative integer value.
///
/// Candidates are stored in an array of FIFO buckets indexed directly by their value,
/// which makes insertion and relaxation `O(1)`. Extracting the minimum scans the buckets
/// upward from a low watermark that is only moved down by insertions.
///
/// Relaxing a candidate does not remove it from its previous bucket: the stale entry is
/// skipped when reached because it no longer matches the live value of the candidate.
#[derive(Clone, Debug)]
pub struct CandidateQueue {
    buckets: Vec<VecDeque<Voxel>>,
    values: HashMap<Voxel, i32>,
    min_bucket: usize,
    max_bucket: usize,
}

impl CandidateQueue {
    /// Creates an empty queue accepting values in `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            buckets: vec![VecDeque::new(); capacity],
            values: HashMap::default(),
            min_bucket: capacity,
            max_bucket: 0,
        }
    }

    /// The number of buckets of this queue.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// The number of candidates in this queue.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Is this queue empty?
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Is `voxel` currently a candidate?
    pub fn contains(&self, voxel: Voxel) -> bool {
        self.values.contains_key(&voxel)
    }

    /// The current value of the candidate at `voxel`, if any.
    pub fn value(&self, voxel: Voxel) -> Option<i32> {
        self.values.get(&voxel).copied()
    }

    fn bucket(&self, value: i32) -> Result<usize, MorphologyError> {
        if value >= 0 && (value as usize) < self.buckets.len() {
            Ok(value as usize)
        } else {
            Err(MorphologyError::BucketOutOfRange {
                value: value as i64,
                capacity: self.buckets.len(),
            })
        }
    }

    /// Inserts `voxel` with the given value, or moves it to that value if it is already
    /// a candidate.
    ///
    /// Fails without modifying the queue if `value` is outside of `0..capacity`.
    pub fn insert(&mut self, voxel: Voxel, value: i32) -> Result<(), MorphologyError> {
        let bucket = self.bucket(value)?;

        if self.values.insert(voxel, value) == Some(value) {
            // Already queued in this very bucket.
            return Ok(());
        }

        self.buckets[bucket].push_back(voxel);
        self.min_bucket = self.min_bucket.min(bucket);
        self.max_bucket = self.max_bucket.max(bucket);
        Ok(())
    }

    /// Inserts `voxel` with the given value unless it is already a candidate with a
    /// value smaller than or equal to `value`.
    ///
    /// Returns `true` if the queue changed. Fails without modifying the queue if `value`
    /// is outside of `0..capacity`.
    pub fn relax(&mut self, voxel: Voxel, value: i32) -> Result<bool, MorphologyError> {
        let _ = self.bucket(value)?;

        match self.value(voxel) {
            Some(current) if current <= value => Ok(false),
            _ => self.insert(voxel, value).map(|_| true),
        }
    }

    /// Removes the candidate at `voxel`, returning its value.
    pub fn remove(&mut self, voxel: Voxel) -> Option<i32> {
        // The bucket entry becomes stale and is dropped when reached.
        self.values.remove(&voxel)
    }

    /// Removes and returns a candidate with the smallest value.
    ///
    /// Candidates sharing the same value are returned in insertion order.
    pub fn pop_min(&mut self) -> Option<Candidate> {
        while self.min_bucket <= self.max_bucket && self.min_bucket < self.buckets.len() {
            let bucket = self.min_bucket;

            while let Some(voxel) = self.buckets[bucket].pop_front() {
                if self.values.get(&voxel) == Some(&(bucket as i32)) {
                    let _ = self.values.remove(&voxel);
                    return Some(Candidate {
                        voxel,
                        value: bucket as i32,
                    });
                }
            }

            self.min_bucket += 1;
        }

        self.reset_watermarks();
        None
    }

    /// Removes every candidate.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.values.clear();
        self.reset_watermarks();
    }

    fn reset_watermarks(&mut self) {
        self.min_bucket = self.buckets.len();
        self.max_bucket = 0;
    }
}
