use super::{Column, ColumnType, ValueColumn};
use crate::dictionary::check_row;
use crate::selection::Selection;
use crate::Result;

/// A fixed-width number a [`NumberColumn`] can hold
pub trait NumberType: Copy + PartialOrd + std::fmt::Debug {
    /// Logical type of a column of this number
    const COLUMN_TYPE: ColumnType;
}

macro_rules! number_type {
    ($($ty:ty => $kind:ident),*) => {
        $(
            impl NumberType for $ty {
                const COLUMN_TYPE: ColumnType = ColumnType::$kind;
            }
        )*
    };
}

number_type!(i8 => Byte, i16 => Short, i32 => Integer, i64 => Long, f32 => Float, f64 => Double);

/// A `Vec`-backed column of fixed-width numbers
#[derive(Debug, Clone, PartialEq)]
pub struct NumberColumn<T> {
    name: String,
    values: Vec<T>,
}

/// 8-bit integer column
pub type ByteColumn = NumberColumn<i8>;
/// 16-bit integer column
pub type ShortColumn = NumberColumn<i16>;
/// 32-bit integer column
pub type IntColumn = NumberColumn<i32>;
/// 64-bit integer column
pub type LongColumn = NumberColumn<i64>;
/// Single precision column
pub type FloatColumn = NumberColumn<f32>;
/// Double precision column
pub type DoubleColumn = NumberColumn<f64>;

impl<T: NumberType> NumberColumn<T> {
    /// Create an empty column
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Create a column holding `values`
    pub fn from_values(name: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Append a value
    pub fn append(&mut self, value: T) {
        self.values.push(value);
    }

    /// Overwrite the value at `row`
    pub fn set(&mut self, row: usize, value: T) -> Result<()> {
        check_row(row, self.values.len())?;
        self.values[row] = value;
        Ok(())
    }

    /// Backing values
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Rows whose value satisfies `predicate`, found by a full scan
    pub fn eval(&self, predicate: impl Fn(T) -> bool) -> Selection {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| predicate(**v))
            .map(|(row, _)| row as u32)
            .collect()
    }
}

impl<T: NumberType> Column for NumberColumn<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn column_type(&self) -> ColumnType {
        T::COLUMN_TYPE
    }

    fn size(&self) -> usize {
        self.values.len()
    }
}

impl<T: NumberType> ValueColumn<T> for NumberColumn<T> {
    fn get(&self, row: usize) -> Result<T> {
        check_row(row, self.values.len())?;
        Ok(self.values[row])
    }

    fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.values.iter().copied()
    }
}
