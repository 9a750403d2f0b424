//! Bounded top-K build collection.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

use crate::build::{Build, BuildSignature};

const PREALLOCATED: usize = 1024;

struct Entry {
    score: i64,
    seq: u64,
    signature: BuildSignature,
    build: Build,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// The best `capacity` distinct builds seen so far.
///
/// Builds with an already-held [`BuildSignature`] are ignored. Once full, a
/// build replaces the lowest-scoring entry only if it scores strictly
/// higher; on a tie the held entry stays. Among equal lowest scores the
/// oldest entry is evicted first.
///
/// # Example
///
/// ```
/// use relicforge_solver::{Build, BuildHeap, Slot};
///
/// let build = |index, score| Build {
///     vessel_name: "Urn".to_string(),
///     slots: [Slot::Filled(index)].into_iter().collect(),
///     score,
///     active_effects: Vec::new(),
/// };
///
/// let mut heap = BuildHeap::new(2);
/// assert!(heap.consider(build(0, 10)));
/// assert!(heap.consider(build(1, 20)));
/// assert!(!heap.consider(build(2, 10)));
/// assert!(heap.consider(build(3, 15)));
///
/// let scores: Vec<i64> = heap.results_desc().iter().map(|b| b.score).collect();
/// assert_eq!(scores, vec![20, 15]);
/// ```
pub struct BuildHeap {
    capacity: usize,
    heap: BinaryHeap<Reverse<Entry>>,
    signatures: HashSet<BuildSignature>,
    next_seq: u64,
}

impl BuildHeap {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.min(PREALLOCATED) + 1),
            signatures: HashSet::with_capacity(capacity.min(PREALLOCATED) + 1),
            next_seq: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// Lowest held score.
    pub fn min_score(&self) -> Option<i64> {
        self.heap.peek().map(|Reverse(entry)| entry.score)
    }

    /// Returns false if a build scoring `score` is certain to be rejected.
    pub fn would_accept(&self, score: i64) -> bool {
        if !self.is_full() {
            return self.capacity > 0;
        }
        self.min_score().is_some_and(|min| score > min)
    }

    /// Offers a build. Returns true if it was retained.
    pub fn consider(&mut self, build: Build) -> bool {
        let signature = build.signature();
        if self.signatures.contains(&signature) {
            return false;
        }
        if !self.would_accept(build.score) {
            return false;
        }
        if self.is_full() {
            if let Some(Reverse(evicted)) = self.heap.pop() {
                self.signatures.remove(&evicted.signature);
            }
        }
        let entry = Entry {
            score: build.score,
            seq: self.next_seq,
            signature: signature.clone(),
            build,
        };
        self.next_seq += 1;
        self.signatures.insert(signature);
        self.heap.push(Reverse(entry));
        true
    }

    /// Held builds by descending score; equal scores in arrival order.
    pub fn results_desc(&self) -> Vec<Build> {
        let mut entries: Vec<&Entry> = self.heap.iter().map(|Reverse(entry)| entry).collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.seq.cmp(&b.seq)));
        entries.into_iter().map(|entry| entry.build.clone()).collect()
    }

    /// Consumes the heap, returning builds as [`BuildHeap::results_desc`] does.
    pub fn into_results_desc(self) -> Vec<Build> {
        let mut entries: Vec<Entry> = self.heap.into_iter().map(|Reverse(entry)| entry).collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.seq.cmp(&b.seq)));
        entries.into_iter().map(|entry| entry.build).collect()
    }
}

impl std::fmt::Debug for BuildHeap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildHeap")
            .field("capacity", &self.capacity)
            .field("len", &self.heap.len())
            .field("min_score", &self.min_score())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::Slot;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use relicforge_core::Effect;

    fn build(relic: usize, score: i64) -> Build {
        Build {
            vessel_name: "Urn".to_string(),
            slots: [Slot::Filled(relic)].into_iter().collect(),
            score,
            active_effects: vec![Effect::new("Vigor", 0)],
        }
    }

    #[test]
    fn test_duplicate_build_kept_once() {
        let mut heap = BuildHeap::new(5);
        assert!(heap.consider(build(0, 10)));
        assert!(!heap.consider(build(0, 10)));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_tie_with_minimum_does_not_evict() {
        let mut heap = BuildHeap::new(2);
        heap.consider(build(0, 10));
        heap.consider(build(1, 10));
        assert!(!heap.consider(build(2, 10)));
        let relics: Vec<usize> = heap.results_desc().iter().flat_map(Build::relic_indices).collect();
        assert_eq!(relics, vec![0, 1]);
    }

    #[test]
    fn test_eviction_frees_signature() {
        let mut heap = BuildHeap::new(1);
        heap.consider(build(0, 10));
        heap.consider(build(1, 20));
        assert_eq!(heap.min_score(), Some(20));
        // build(0, 10) was evicted; re-offering it is a plain low score now.
        assert!(!heap.consider(build(0, 10)));
        heap.consider(build(0, 30));
        assert_eq!(heap.results_desc()[0].score, 30);
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let mut heap = BuildHeap::new(0);
        assert!(!heap.would_accept(i64::MAX));
        assert!(!heap.consider(build(0, 1)));
        assert!(heap.is_empty());
    }

    #[test]
    fn test_results_do_not_drain() {
        let mut heap = BuildHeap::new(3);
        heap.consider(build(0, 1));
        heap.consider(build(1, 3));
        heap.consider(build(2, 2));
        let first: Vec<i64> = heap.results_desc().iter().map(|b| b.score).collect();
        assert_eq!(first, vec![3, 2, 1]);
        assert_eq!(heap.len(), 3);
        let second: Vec<i64> = heap.into_results_desc().iter().map(|b| b.score).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_boundedness_and_correctness() {
        let mut rng = StdRng::seed_from_u64(11);
        for capacity in 1..6 {
            let mut heap = BuildHeap::new(capacity);
            let mut distinct = HashSet::new();
            let mut rejected_after_full = Vec::new();

            for _ in 0..200 {
                let candidate = build(rng.random_range(0..30), rng.random_range(0..50));
                let was_full = heap.is_full();
                distinct.insert(candidate.signature());
                let score = candidate.score;
                let duplicate = heap.signatures.contains(&candidate.signature());
                if !heap.consider(candidate) && was_full && !duplicate {
                    rejected_after_full.push(score);
                }
                assert!(heap.len() <= capacity);
            }

            assert_eq!(heap.len(), capacity.min(distinct.len()));
            let min = heap.min_score().unwrap();
            assert!(rejected_after_full.iter().all(|&score| score <= min));
        }
    }
}
