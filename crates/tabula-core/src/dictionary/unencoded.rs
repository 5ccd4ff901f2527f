use super::{MISSING_VALUE, check_row};
use crate::Result;
use crate::selection::Selection;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Raw string storage at the end of the promotion chain
///
/// Has no key limit. Keeps a running count per value so the counting
/// queries do not rescan the rows.
#[derive(Debug, Clone, Default)]
pub struct UnencodedDictionary {
    values: Vec<String>,
    counts: HashMap<String, u32>,
}

impl UnencodedDictionary {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage holding `values` in order
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut dict = Self::new();
        for value in values {
            dict.push(value);
        }
        dict
    }

    /// Create storage of `size` rows, all missing
    pub fn with_missing(size: usize) -> Self {
        let mut counts = HashMap::new();
        if size > 0 {
            counts.insert(MISSING_VALUE.to_string(), size as u32);
        }
        Self {
            values: vec![MISSING_VALUE.to_string(); size],
            counts,
        }
    }

    /// Append a value; `None` appends the missing value
    pub fn append(&mut self, value: Option<&str>) -> Result<()> {
        self.push(value.unwrap_or(MISSING_VALUE));
        Ok(())
    }

    /// Append the missing value
    pub fn append_missing(&mut self) -> Result<()> {
        self.append(None)
    }

    /// Overwrite the value at `row`
    pub fn set(&mut self, row: usize, value: Option<&str>) -> Result<()> {
        check_row(row, self.values.len())?;
        let value = value.unwrap_or(MISSING_VALUE);
        *self.counts.entry(value.to_string()).or_insert(0) += 1;
        let previous = std::mem::replace(&mut self.values[row], value.to_string());
        self.forget(&previous);
        Ok(())
    }

    /// Value stored at `row`
    pub fn get(&self, row: usize) -> Result<&str> {
        check_row(row, self.values.len())?;
        Ok(&self.values[row])
    }

    /// Number of rows
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Whether no rows have been appended
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct values
    pub fn count_unique(&self) -> usize {
        self.counts.len()
    }

    /// Distinct values in lexicographic order
    pub fn unique_values(&self) -> Vec<&str> {
        self.count_by_value().into_keys().collect()
    }

    /// Row count for each distinct value
    pub fn count_by_value(&self) -> BTreeMap<&str, u32> {
        self.counts
            .iter()
            .map(|(value, count)| (value.as_str(), *count))
            .collect()
    }

    /// Number of rows holding the missing value
    pub fn count_missing(&self) -> u32 {
        self.counts.get(MISSING_VALUE).copied().unwrap_or(0)
    }

    /// Rows whose value is one of `values`
    pub fn is_in(&self, values: &[&str]) -> Selection {
        let wanted: HashSet<&str> = values.iter().copied().collect();
        self.select_where(|v| wanted.contains(v))
    }

    /// Rows whose value is none of `values`
    pub fn is_not_in(&self, values: &[&str]) -> Selection {
        let unwanted: HashSet<&str> = values.iter().copied().collect();
        self.select_where(|v| !unwanted.contains(v))
    }

    /// Rows holding the missing value
    pub fn select_missing(&self) -> Selection {
        self.select_where(|v| v == MISSING_VALUE)
    }

    /// Rows holding a non-missing value
    pub fn select_not_missing(&self) -> Selection {
        self.select_where(|v| v != MISSING_VALUE)
    }

    /// Reorder rows by value, ascending
    pub fn sort_ascending(&mut self) {
        self.values.sort_unstable();
    }

    /// Reorder rows by value, descending
    pub fn sort_descending(&mut self) {
        self.values.sort_unstable_by(|a, b| b.cmp(a));
    }

    /// Remove every row
    pub fn clear(&mut self) {
        self.values.clear();
        self.counts.clear();
    }

    /// Values in row order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.iter().map(String::as_str)
    }

    fn push(&mut self, value: &str) {
        *self.counts.entry(value.to_string()).or_insert(0) += 1;
        self.values.push(value.to_string());
    }

    fn forget(&mut self, value: &str) {
        if let Some(count) = self.counts.get_mut(value) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(value);
            }
        }
    }

    fn select_where(&self, predicate: impl Fn(&str) -> bool) -> Selection {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| predicate(v.as_str()))
            .map(|(row, _)| row as u32)
            .collect()
    }
}
