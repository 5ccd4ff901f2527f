use super::{IndexStats, SortedIndex};
use crate::column::StringAccess;
use crate::selection::Selection;

/// Sorted index over a string column
///
/// Ordered by the string values themselves, byte-wise, which for UTF-8 is
/// code-point order. Surrogate keys play no part in the ordering.
#[derive(Debug, Clone)]
pub struct StringIndex {
    inner: SortedIndex<String>,
}

impl StringIndex {
    /// Build an index over every row of `column`
    pub fn new<C: StringAccess>(column: &C) -> Self {
        let inner = SortedIndex::from_keys(column.strings().map(str::to_owned));
        tracing::debug!(
            column = column.name(),
            kind = "string",
            rows = inner.row_count(),
            distinct = inner.distinct_count(),
            "built index"
        );
        Self { inner }
    }

    /// Rows equal to `value`
    pub fn get(&self, value: &str) -> Selection {
        self.inner.get(value)
    }

    /// Rows sorting after `value`
    pub fn greater_than(&self, value: &str) -> Selection {
        self.inner.greater_than(value)
    }

    /// Rows sorting before `value`
    pub fn less_than(&self, value: &str) -> Selection {
        self.inner.less_than(value)
    }

    /// Rows equal to or sorting after `value`
    pub fn at_least(&self, value: &str) -> Selection {
        self.inner.at_least(value)
    }

    /// Rows equal to or sorting before `value`
    pub fn at_most(&self, value: &str) -> Selection {
        self.inner.at_most(value)
    }

    /// Rows in `[low, high]`
    pub fn between(&self, low: &str, high: &str) -> Selection {
        self.inner.between(low, high)
    }

    /// Number of distinct values
    pub fn distinct_count(&self) -> usize {
        self.inner.distinct_count()
    }

    /// Number of indexed rows
    pub fn row_count(&self) -> u32 {
        self.inner.row_count()
    }

    /// Distinct values in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.inner.keys().map(String::as_str)
    }

    /// Index statistics
    pub fn stats(&self) -> IndexStats {
        self.inner.stats()
    }
}
