use super::evaluator::Score;
use crate::logic::zobrist::CacheKey;
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Copy)]
struct CacheEntry {
    score: Score,
    // 最終アクセス時刻 (recency の BTreeMap のキー)
    stamp: u64,
}

/// Frontier evaluation cache with least-recently-used eviction.
///
/// A key maps to the score of its first computation for as long as it stays
/// resident. Scores must be a pure function of the key, so an evicted key that
/// comes back recomputes the same value.
pub struct EvalCache {
    entries: HashMap<CacheKey, CacheEntry>,
    recency: BTreeMap<u64, CacheKey>,
    capacity: usize,
    clock: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl EvalCache {
    /// `capacity` of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity.min(1 << 16)),
            recency: BTreeMap::new(),
            capacity,
            clock: 0,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    pub fn get(&mut self, key: &CacheKey) -> Option<Score> {
        let entry = self.entries.get_mut(key)?;
        self.clock += 1;
        self.recency.remove(&entry.stamp);
        entry.stamp = self.clock;
        self.recency.insert(self.clock, *key);
        Some(entry.score)
    }

    pub fn insert(&mut self, key: CacheKey, score: Score) {
        self.clock += 1;
        if let Some(old) = self.entries.insert(
            key,
            CacheEntry {
                score,
                stamp: self.clock,
            },
        ) {
            self.recency.remove(&old.stamp);
        }
        self.recency.insert(self.clock, key);

        while self.entries.len() > self.capacity {
            match self.recency.pop_first() {
                Some((_, lru)) => {
                    self.entries.remove(&lru);
                    self.evictions += 1;
                }
                None => break,
            }
        }
    }

    /// Read-through lookup: `compute` runs only on a miss and its result is
    /// stored under `key`.
    pub fn get_or_compute<F>(&mut self, key: CacheKey, compute: F) -> Score
    where
        F: FnOnce() -> Score,
    {
        if let Some(score) = self.get(&key) {
            self.hits += 1;
            return score;
        }
        self.misses += 1;
        let score = compute();
        self.insert(key, score);
        score
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn evictions(&self) -> u64 {
        self.evictions
    }
}
