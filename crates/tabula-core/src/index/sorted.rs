use crate::selection::Selection;
use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::ops::Bound;

/// Sorted posting lists: each distinct key maps to the rows holding it
///
/// Built once from the keys of a column in row order and read-only after
/// that. Every row lands in exactly one posting list.
#[derive(Debug, Clone)]
pub struct SortedIndex<K: Ord> {
    postings: BTreeMap<K, RoaringBitmap>,
    rows: u32,
}

/// Index statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of indexed rows
    pub entry_count: u64,
    /// Number of distinct keys (NDV)
    pub unique_value_count: u64,
    /// Rows in the largest posting list
    pub largest_posting_list: u64,
    /// Distinct keys per row (unique_value_count / entry_count)
    pub selectivity: f64,
}

impl<K: Ord> SortedIndex<K> {
    /// Build from keys in row order
    pub fn from_keys(keys: impl IntoIterator<Item = K>) -> Self {
        let mut postings: BTreeMap<K, RoaringBitmap> = BTreeMap::new();
        let mut rows = 0u32;
        for key in keys {
            postings.entry(key).or_default().insert(rows);
            rows += 1;
        }
        Self { postings, rows }
    }

    /// Rows whose key equals `key`; empty when absent
    pub fn get<Q>(&self, key: &Q) -> Selection
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.postings
            .get(key)
            .map(|rows| Selection::from_bitmap(rows.clone()))
            .unwrap_or_default()
    }

    /// Rows whose key is strictly greater than `key`
    pub fn greater_than<Q>(&self, key: &Q) -> Selection
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.union_over((Bound::Excluded(key), Bound::Unbounded))
    }

    /// Rows whose key is strictly less than `key`
    pub fn less_than<Q>(&self, key: &Q) -> Selection
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.union_over((Bound::Unbounded, Bound::Excluded(key)))
    }

    /// Rows whose key is greater than or equal to `key`
    pub fn at_least<Q>(&self, key: &Q) -> Selection
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.union_over((Bound::Included(key), Bound::Unbounded))
    }

    /// Rows whose key is less than or equal to `key`
    pub fn at_most<Q>(&self, key: &Q) -> Selection
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.union_over((Bound::Unbounded, Bound::Included(key)))
    }

    /// Rows whose key lies in `[low, high]`; empty when `low > high`
    pub fn between<Q>(&self, low: &Q, high: &Q) -> Selection
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if low > high {
            return Selection::new();
        }
        self.union_over((Bound::Included(low), Bound::Included(high)))
    }

    /// Number of distinct keys
    pub fn distinct_count(&self) -> usize {
        self.postings.len()
    }

    /// Number of indexed rows
    pub fn row_count(&self) -> u32 {
        self.rows
    }

    /// Distinct keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.postings.keys()
    }

    /// Keys with their posting lists in ascending key order
    pub fn postings(&self) -> impl Iterator<Item = (&K, &RoaringBitmap)> + '_ {
        self.postings.iter()
    }

    /// Compute index statistics
    pub fn stats(&self) -> IndexStats {
        let entry_count = u64::from(self.rows);
        let unique_value_count = self.postings.len() as u64;
        let largest_posting_list = self.postings.values().map(RoaringBitmap::len).max().unwrap_or(0);
        let selectivity = if entry_count == 0 {
            0.0
        } else {
            unique_value_count as f64 / entry_count as f64
        };
        IndexStats {
            entry_count,
            unique_value_count,
            largest_posting_list,
            selectivity,
        }
    }

    fn union_over<Q>(&self, bounds: (Bound<&Q>, Bound<&Q>)) -> Selection
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut result = RoaringBitmap::new();
        for (_, rows) in self.postings.range::<Q, _>(bounds) {
            result |= rows;
        }
        Selection::from_bitmap(result)
    }
}
