use super::{Column, ColumnType, StringAccess};
use crate::config::EncodingConfig;
use crate::dictionary::{DictionaryMap, KeyWidth, check_row};
use crate::selection::Selection;
use crate::util::LevenshteinDistance;
use crate::Result;

/// A dictionary-encoded string column
///
/// Owns a [`DictionaryMap`] and widens it when a new value would not fit
/// the current key width. A column configured with
/// [`EncodingConfig::dictionary_only`] stops at the int width, and appending
/// a new value past its capacity fails with `CapacityExceeded`.
#[derive(Debug, Clone)]
pub struct StringColumn {
    name: String,
    dictionary: DictionaryMap,
}

impl StringColumn {
    /// Create an empty column with the default encoding
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dictionary: DictionaryMap::new(),
        }
    }

    /// Create an empty column with the given encoding
    pub fn with_config(name: impl Into<String>, config: &EncodingConfig) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            dictionary: DictionaryMap::with_config(config)?,
        })
    }

    /// Create a column holding `values`
    pub fn from_values<'a>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self> {
        let mut column = Self::new(name);
        for value in values {
            column.append(Some(value))?;
        }
        Ok(column)
    }

    /// Append a value; `None` appends the missing value
    pub fn append(&mut self, value: Option<&str>) -> Result<()> {
        self.make_room_for(value)?;
        self.dictionary.append(value)
    }

    /// Append the missing value
    pub fn append_missing(&mut self) -> Result<()> {
        self.append(None)
    }

    /// Overwrite the value at `row`
    pub fn set(&mut self, row: usize, value: Option<&str>) -> Result<()> {
        check_row(row, self.size())?;
        self.make_room_for(value)?;
        self.dictionary.set(row, value)
    }

    /// Value at `row`
    pub fn get(&self, row: usize) -> Result<&str> {
        self.dictionary.get(row)
    }

    /// Current key width of the backing dictionary
    pub fn width(&self) -> KeyWidth {
        self.dictionary.width()
    }

    /// Backing dictionary
    pub fn dictionary(&self) -> &DictionaryMap {
        &self.dictionary
    }

    /// Number of distinct values
    pub fn count_unique(&self) -> usize {
        self.dictionary.count_unique()
    }

    /// Distinct values in lexicographic order
    pub fn unique_values(&self) -> Vec<&str> {
        self.dictionary.unique_values()
    }

    /// Number of missing rows
    pub fn count_missing(&self) -> u32 {
        self.dictionary.count_missing()
    }

    /// Rows equal to `value`
    pub fn is_equal_to(&self, value: &str) -> Selection {
        self.dictionary.is_in(&[value])
    }

    /// Rows whose value is one of `values`
    pub fn is_in(&self, values: &[&str]) -> Selection {
        self.dictionary.is_in(values)
    }

    /// Rows whose value is none of `values`
    pub fn is_not_in(&self, values: &[&str]) -> Selection {
        self.dictionary.is_not_in(values)
    }

    /// Rows holding the missing value
    pub fn is_missing(&self) -> Selection {
        self.dictionary.select_missing()
    }

    /// Rows holding a value
    pub fn is_not_missing(&self) -> Selection {
        self.dictionary.select_not_missing()
    }

    /// Rows within `threshold` edits of `value`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `threshold` is negative.
    pub fn is_similar_to(&self, value: &str, threshold: i32) -> Result<Selection> {
        let distance = LevenshteinDistance::new(threshold)?;
        Ok(self
            .dictionary
            .iter()
            .enumerate()
            .filter(|(_, v)| distance.is_within(v, value))
            .map(|(row, _)| row as u32)
            .collect())
    }

    /// Reorder rows by value, ascending
    pub fn sort_ascending(&mut self) {
        self.dictionary.sort_ascending();
    }

    /// Reorder rows by value, descending
    pub fn sort_descending(&mut self) {
        self.dictionary.sort_descending();
    }

    /// Remove every row
    pub fn clear(&mut self) {
        self.dictionary.clear();
    }

    fn make_room_for(&mut self, value: Option<&str>) -> Result<()> {
        if !self.dictionary.would_overflow(value) || !self.dictionary.can_widen() {
            return Ok(());
        }
        let promoted = self.dictionary.promote_yourself()?;
        tracing::trace!(column = %self.name, width = %promoted.width(), "column widened");
        self.dictionary = promoted;
        Ok(())
    }
}

impl Column for StringColumn {
    fn name(&self) -> &str {
        &self.name
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::String
    }

    fn size(&self) -> usize {
        self.dictionary.size()
    }
}

impl StringAccess for StringColumn {
    fn get_string(&self, row: usize) -> Result<&str> {
        self.dictionary.get(row)
    }

    fn strings(&self) -> impl Iterator<Item = &str> + '_ {
        self.dictionary.iter()
    }
}
