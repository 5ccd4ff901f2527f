//! Sorted per-type indices
//!
//! An index groups the rows of a column into posting lists keyed by value,
//! kept in a `BTreeMap` so that range predicates walk a contiguous run of
//! keys. Every query returns a [`Selection`](crate::selection::Selection);
//! absent values give an empty selection, never an error.
//!
//! For any value `v` the posting lists satisfy
//!
//! ```text
//! less_than(v) | get(v) | greater_than(v) == all rows   (pairwise disjoint)
//! at_least(v) == get(v) | greater_than(v)
//! at_most(v)  == get(v) | less_than(v)
//! ```
//!
//! Indices are built once from a snapshot of the column and are not
//! maintained; rebuild after the column changes.

mod numeric;
mod sorted;
mod string;
mod value;

pub use numeric::NumericIndex;
pub use sorted::{IndexStats, SortedIndex};
pub use string::StringIndex;
pub use value::{IndexValue, TotalF32, TotalF64};

/// Index over `i8` values, including boolean columns
pub type ByteIndex = NumericIndex<i8>;
/// Index over `i16` values
pub type ShortIndex = NumericIndex<i16>;
/// Index over `i32` values
pub type IntIndex = NumericIndex<i32>;
/// Index over `i64` values
pub type LongIndex = NumericIndex<i64>;
/// Index over `f32` values
pub type FloatIndex = NumericIndex<f32>;
/// Index over `f64` values
pub type DoubleIndex = NumericIndex<f64>;
