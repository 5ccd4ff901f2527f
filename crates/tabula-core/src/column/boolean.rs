use super::{Column, ColumnType, ValueColumn};
use crate::dictionary::check_row;
use crate::selection::Selection;
use crate::Result;

/// Byte stored for a missing boolean
pub const BOOLEAN_MISSING: i8 = -1;

/// Booleans stored one byte per row: 0 false, 1 true, -1 missing
///
/// Exposes its bytes through [`ValueColumn<i8>`] so a byte index can be
/// built over it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanColumn {
    name: String,
    values: Vec<i8>,
}

impl BooleanColumn {
    /// Create an empty column
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Create a column holding `values`; `None` is missing
    pub fn from_values(name: impl Into<String>, values: &[Option<bool>]) -> Self {
        Self {
            name: name.into(),
            values: values.iter().map(|v| encode(*v)).collect(),
        }
    }

    /// Append a value; `None` appends missing
    pub fn append(&mut self, value: Option<bool>) {
        self.values.push(encode(value));
    }

    /// Overwrite the value at `row`
    pub fn set(&mut self, row: usize, value: Option<bool>) -> Result<()> {
        check_row(row, self.values.len())?;
        self.values[row] = encode(value);
        Ok(())
    }

    /// Value at `row`; `None` when missing
    pub fn get_bool(&self, row: usize) -> Result<Option<bool>> {
        check_row(row, self.values.len())?;
        Ok(match self.values[row] {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        })
    }

    /// Rows holding true
    pub fn is_true(&self) -> Selection {
        self.select_byte(1)
    }

    /// Rows holding false
    pub fn is_false(&self) -> Selection {
        self.select_byte(0)
    }

    /// Rows holding no value
    pub fn is_missing(&self) -> Selection {
        self.select_byte(BOOLEAN_MISSING)
    }

    fn select_byte(&self, byte: i8) -> Selection {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == byte)
            .map(|(row, _)| row as u32)
            .collect()
    }
}

fn encode(value: Option<bool>) -> i8 {
    match value {
        Some(true) => 1,
        Some(false) => 0,
        None => BOOLEAN_MISSING,
    }
}

impl Column for BooleanColumn {
    fn name(&self) -> &str {
        &self.name
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::Boolean
    }

    fn size(&self) -> usize {
        self.values.len()
    }
}

impl ValueColumn<i8> for BooleanColumn {
    fn get(&self, row: usize) -> Result<i8> {
        check_row(row, self.values.len())?;
        Ok(self.values[row])
    }

    fn iter(&self) -> impl Iterator<Item = i8> + '_ {
        self.values.iter().copied()
    }
}
