use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Frequency counter with deterministic, first-seen tie-breaking.
///
/// Entries iterate in insertion order, so when two keys reach the same
/// count the one observed first wins the argmax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Counter<K: Eq + Hash> {
    counts: IndexMap<K, u64, ahash::RandomState>,
}

impl<K: Eq + Hash> Default for Counter<K> {
    fn default() -> Self {
        Counter {
            counts: IndexMap::default(),
        }
    }
}

impl<K: Eq + Hash + Copy> Counter<K> {
    pub fn add(&mut self, key: K, n: u64) {
        *self.counts.entry(key).or_insert(0) += n;
    }

    /// Fold another counter into this one, preserving this counter's
    /// first-seen order for keys both sides know.
    pub fn merge(&mut self, other: &Counter<K>) {
        for (&key, &n) in &other.counts {
            self.add(key, n);
        }
    }

    pub fn most_common(&self) -> Option<K> {
        let mut best: Option<(K, u64)> = None;
        for (&key, &n) in &self.counts {
            match best {
                Some((_, best_n)) if n <= best_n => {}
                _ => best = Some((key, n)),
            }
        }
        best.map(|(key, _)| key)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
