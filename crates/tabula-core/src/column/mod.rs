//! In-memory columns and the accessor traits the core consumes
//!
//! Indices and predicates only need a row count, positional access and
//! iteration in row order. [`ValueColumn`] and [`StringAccess`] capture that;
//! the concrete columns here are the ones the core builds indices over.

mod boolean;
mod number;
mod string;

pub use boolean::{BOOLEAN_MISSING, BooleanColumn};
pub use number::{
    ByteColumn, DoubleColumn, FloatColumn, IntColumn, LongColumn, NumberColumn, NumberType,
    ShortColumn,
};
pub use string::StringColumn;

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Booleans stored as bytes
    Boolean,
    /// 8-bit integers
    Byte,
    /// 16-bit integers
    Short,
    /// 32-bit integers
    Integer,
    /// 64-bit integers
    Long,
    /// Single precision floats
    Float,
    /// Double precision floats
    Double,
    /// Dictionary-encoded strings
    String,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "BOOLEAN",
            Self::Byte => "BYTE",
            Self::Short => "SHORT",
            Self::Integer => "INTEGER",
            Self::Long => "LONG",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::String => "STRING",
        };
        f.write_str(name)
    }
}

/// Common column metadata
pub trait Column {
    /// Column name
    fn name(&self) -> &str;

    /// Logical type
    fn column_type(&self) -> ColumnType;

    /// Number of rows
    fn size(&self) -> usize;

    /// Whether the column has no rows
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// Positional access to fixed-width values
pub trait ValueColumn<T: Copy>: Column {
    /// Value at `row`
    fn get(&self, row: usize) -> Result<T>;

    /// Values in row order
    fn iter(&self) -> impl Iterator<Item = T> + '_;
}

/// Positional access to string values
pub trait StringAccess: Column {
    /// Value at `row` as a string
    fn get_string(&self, row: usize) -> Result<&str>;

    /// Values in row order
    fn strings(&self) -> impl Iterator<Item = &str> + '_;
}
