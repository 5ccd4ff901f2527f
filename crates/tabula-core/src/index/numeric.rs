use super::{IndexStats, IndexValue, SortedIndex};
use crate::column::ValueColumn;
use crate::selection::Selection;

/// Sorted index over a numeric column
///
/// Integers use signed order. Floats use the total order of
/// [`TotalF32`](super::TotalF32) and [`TotalF64`](super::TotalF64).
#[derive(Debug, Clone)]
pub struct NumericIndex<T: IndexValue> {
    inner: SortedIndex<T::Key>,
}

impl<T: IndexValue> NumericIndex<T> {
    /// Build an index over every row of `column`
    pub fn new<C: ValueColumn<T>>(column: &C) -> Self {
        let inner = SortedIndex::from_keys(column.iter().map(T::to_key));
        tracing::debug!(
            column = column.name(),
            kind = std::any::type_name::<T>(),
            rows = inner.row_count(),
            distinct = inner.distinct_count(),
            "built index"
        );
        Self { inner }
    }

    /// Rows equal to `value`
    pub fn get(&self, value: T) -> Selection {
        self.inner.get(&value.to_key())
    }

    /// Rows strictly greater than `value`
    pub fn greater_than(&self, value: T) -> Selection {
        self.inner.greater_than(&value.to_key())
    }

    /// Rows strictly less than `value`
    pub fn less_than(&self, value: T) -> Selection {
        self.inner.less_than(&value.to_key())
    }

    /// Rows greater than or equal to `value`
    pub fn at_least(&self, value: T) -> Selection {
        self.inner.at_least(&value.to_key())
    }

    /// Rows less than or equal to `value`
    pub fn at_most(&self, value: T) -> Selection {
        self.inner.at_most(&value.to_key())
    }

    /// Rows in `[low, high]`
    pub fn between(&self, low: T, high: T) -> Selection {
        self.inner.between(&low.to_key(), &high.to_key())
    }

    /// Number of distinct values
    pub fn distinct_count(&self) -> usize {
        self.inner.distinct_count()
    }

    /// Number of indexed rows
    pub fn row_count(&self) -> u32 {
        self.inner.row_count()
    }

    /// Distinct keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = T::Key> + '_ {
        self.inner.keys().copied()
    }

    /// Index statistics
    pub fn stats(&self) -> IndexStats {
        self.inner.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{BooleanColumn, DoubleColumn, FloatColumn, ShortColumn};
    use crate::index::{ByteIndex, DoubleIndex, FloatIndex, ShortIndex};

    fn short_index() -> (ShortColumn, ShortIndex) {
        let col = ShortColumn::from_values("shorts", vec![7, 5, 2, 3, 1, 9, 6, 8, 4]);
        let idx = ShortIndex::new(&col);
        (col, idx)
    }

    #[test]
    fn test_short_index_against_scan() {
        let (col, idx) = short_index();
        assert_eq!(idx.get(3).to_vec(), vec![3]);
        assert_eq!(idx.greater_than(3).to_vec(), vec![0, 1, 5, 6, 7, 8]);
        assert_eq!(idx.less_than(3).to_vec(), vec![2, 4]);
        assert_eq!(idx.at_least(3).to_vec(), vec![0, 1, 3, 5, 6, 7, 8]);
        assert_eq!(idx.at_most(3).to_vec(), vec![2, 3, 4]);

        assert_eq!(idx.greater_than(3), col.eval(|v| v > 3));
        assert_eq!(idx.at_most(3), col.eval(|v| v <= 3));
        assert_eq!(idx.between(2, 5), col.eval(|v| (2..=5).contains(&v)));
    }

    #[test]
    fn test_short_index_with_three_at_row_four() {
        let col = ShortColumn::from_values("shorts", vec![7, 5, 2, 1, 3, 9, 6, 8, 4]);
        let idx = ShortIndex::new(&col);

        assert_eq!(idx.get(3).to_vec(), vec![4]);
        assert_eq!(idx.greater_than(3).to_vec(), vec![0, 1, 5, 6, 7, 8]);
        assert_eq!(idx.less_than(3).to_vec(), vec![2, 3]);
        assert_eq!(idx.at_least(3).to_vec(), vec![0, 1, 4, 5, 6, 7, 8]);
        assert_eq!(idx.at_most(3).to_vec(), vec![2, 3, 4]);
    }

    #[test]
    fn test_byte_index_over_booleans() {
        let col = BooleanColumn::from_values(
            "flags",
            &[
                Some(false),
                Some(true),
                Some(true),
                Some(false),
                Some(true),
                Some(false),
                Some(true),
                Some(true),
                Some(true),
            ],
        );
        let idx = ByteIndex::new(&col);

        assert_eq!(idx.get(0).to_vec(), vec![0, 3, 5]);
        assert_eq!(idx.get(1).to_vec(), vec![1, 2, 4, 6, 7, 8]);
        assert_eq!(idx.greater_than(0).to_vec(), vec![1, 2, 4, 6, 7, 8]);
        assert_eq!(idx.less_than(1).to_vec(), vec![0, 3, 5]);
        assert_eq!(idx.at_least(0).len(), 9);
        assert_eq!(idx.at_most(0).to_vec(), vec![0, 3, 5]);
        assert_eq!(idx.at_most(1).len(), 9);
    }

    #[test]
    fn test_float_index() {
        let col = FloatColumn::from_values(
            "floats",
            vec![2.2, 3.3, 4.4, 2.2, 1.1, 0.5, 5.5, 6.6, 1.9],
        );
        let idx = FloatIndex::new(&col);

        assert_eq!(idx.get(2.2).to_vec(), vec![0, 3]);
        assert_eq!(idx.greater_than(2.2).to_vec(), vec![1, 2, 6, 7]);
        assert_eq!(idx.less_than(2.2).to_vec(), vec![4, 5, 8]);
        assert_eq!(idx.at_least(2.2), col.eval(|v| v >= 2.2));
        assert_eq!(idx.at_most(2.2), col.eval(|v| v <= 2.2));
    }

    #[test]
    fn test_nan_and_signed_zero() {
        let col = DoubleColumn::from_values("d", vec![f64::NAN, -0.0, 1.0, 0.0, f64::INFINITY]);
        let idx = DoubleIndex::new(&col);

        assert_eq!(idx.get(0.0).to_vec(), vec![1, 3]);
        assert_eq!(idx.get(f64::NAN).to_vec(), vec![0]);
        assert_eq!(idx.greater_than(f64::INFINITY).to_vec(), vec![0]);
        assert_eq!(idx.less_than(f64::NAN).len(), 4);
        assert_eq!(idx.distinct_count(), 4);
    }

    #[test]
    fn test_absent_value_is_empty() {
        let (_, idx) = short_index();
        assert!(idx.get(100).is_empty());
        assert_eq!(idx.less_than(100).len(), 9);
        assert_eq!(idx.row_count(), 9);
    }
}
