//! Dictionary encoding for string columns
//!
//! Each distinct string value is replaced by a small surrogate key. The
//! representations form a promotion chain, narrowest first:
//!
//! ```text
//! Byte (u8 keys) -> Short (u16 keys) -> Int (u32 keys) -> Unencoded (raw strings)
//! ```
//!
//! Every keyed width reserves its maximum value as the missing-value
//! sentinel, which always maps to the empty string. A width is full once
//! `MAX - 1` keys are live; the owning column then calls
//! [`DictionaryMap::promote_yourself`] and swaps in the returned map.
//! Promotion only ever widens and never touches the map it was called on.

mod builder;
mod keyed;
mod unencoded;

pub use builder::DictionaryBuilder;
pub use keyed::KeyedDictionary;
pub use unencoded::UnencodedDictionary;

use crate::config::EncodingConfig;
use crate::selection::Selection;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

/// Storage width of a dictionary, in promotion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyWidth {
    /// One-byte keys
    Byte,
    /// Two-byte keys
    Short,
    /// Four-byte keys
    Int,
    /// No keys; values are stored as-is
    Unencoded,
}

impl KeyWidth {
    /// Lower-case name used in errors and logs
    pub fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Unencoded => "unencoded",
        }
    }

    /// The width a dictionary promotes to, if any
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Byte => Some(Self::Short),
            Self::Short => Some(Self::Int),
            Self::Int => Some(Self::Unencoded),
            Self::Unencoded => None,
        }
    }
}

impl fmt::Display for KeyWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Integer type usable as a surrogate key
pub trait DictionaryKey: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Reserved key for the missing value
    const MISSING: Self;
    /// Width this key type encodes
    const WIDTH: KeyWidth;

    /// Narrow a counter value into this key type
    fn from_u32(value: u32) -> Option<Self>;

    /// Widen the key for comparisons and promotion
    fn to_u32(self) -> u32;

    /// Number of non-missing keys this type can issue
    fn capacity() -> u32 {
        Self::MISSING.to_u32() - 1
    }
}

impl DictionaryKey for u8 {
    const MISSING: Self = u8::MAX;
    const WIDTH: KeyWidth = KeyWidth::Byte;

    fn from_u32(value: u32) -> Option<Self> {
        u8::try_from(value).ok()
    }

    fn to_u32(self) -> u32 {
        u32::from(self)
    }
}

impl DictionaryKey for u16 {
    const MISSING: Self = u16::MAX;
    const WIDTH: KeyWidth = KeyWidth::Short;

    fn from_u32(value: u32) -> Option<Self> {
        u16::try_from(value).ok()
    }

    fn to_u32(self) -> u32 {
        u32::from(self)
    }
}

impl DictionaryKey for u32 {
    const MISSING: Self = u32::MAX;
    const WIDTH: KeyWidth = KeyWidth::Int;

    fn from_u32(value: u32) -> Option<Self> {
        Some(value)
    }

    fn to_u32(self) -> u32 {
        self
    }
}

/// The missing-value indicator of every string column
pub const MISSING_VALUE: &str = "";

/// A dictionary at one of the four widths of the promotion chain
#[derive(Debug, Clone)]
pub enum DictionaryMap {
    /// One-byte keys
    Byte(KeyedDictionary<u8>),
    /// Two-byte keys
    Short(KeyedDictionary<u16>),
    /// Four-byte keys
    Int(KeyedDictionary<u32>),
    /// Raw string storage, the end of the chain
    Unencoded(UnencodedDictionary),
}

macro_rules! dispatch {
    ($map:expr, $dict:ident => $body:expr) => {
        match $map {
            DictionaryMap::Byte($dict) => $body,
            DictionaryMap::Short($dict) => $body,
            DictionaryMap::Int($dict) => $body,
            DictionaryMap::Unencoded($dict) => $body,
        }
    };
}

impl DictionaryMap {
    /// Create an empty byte-keyed dictionary with default settings
    pub fn new() -> Self {
        Self::Byte(KeyedDictionary::new())
    }

    /// Create an empty dictionary as described by `config`
    pub fn with_config(config: &EncodingConfig) -> Result<Self> {
        config.validate()?;
        Ok(match config.initial_width {
            KeyWidth::Byte => Self::Byte(KeyedDictionary::with_config(config)),
            KeyWidth::Short => Self::Short(KeyedDictionary::with_config(config)),
            KeyWidth::Int => Self::Int(KeyedDictionary::with_config(config)),
            KeyWidth::Unencoded => Self::Unencoded(UnencodedDictionary::new()),
        })
    }

    /// Current storage width
    pub fn width(&self) -> KeyWidth {
        match self {
            Self::Byte(_) => KeyWidth::Byte,
            Self::Short(_) => KeyWidth::Short,
            Self::Int(_) => KeyWidth::Int,
            Self::Unencoded(_) => KeyWidth::Unencoded,
        }
    }

    /// Build the next-wider dictionary holding the same state
    ///
    /// The receiver is left untouched. An int-keyed dictionary whose
    /// promotion to text has been disabled returns a same-width copy, and
    /// the unencoded fallback returns a copy of itself.
    pub fn promote_yourself(&self) -> Result<DictionaryMap> {
        let promoted = match self {
            Self::Byte(dict) => Self::Short(dict.promote::<u16>()?),
            Self::Short(dict) => Self::Int(dict.promote::<u32>()?),
            Self::Int(dict) if dict.can_promote_to_text() => Self::Unencoded(dict.to_unencoded()),
            Self::Int(dict) => {
                tracing::warn!(
                    distinct = dict.count_unique(),
                    "int dictionary may not promote to text"
                );
                Self::Int(dict.clone())
            }
            Self::Unencoded(dict) => Self::Unencoded(dict.clone()),
        };

        if promoted.width() != self.width() {
            tracing::debug!(
                from = %self.width(),
                to = %promoted.width(),
                rows = self.size(),
                distinct = self.count_unique(),
                "promoted dictionary"
            );
        }
        Ok(promoted)
    }

    /// Whether appending `value` needs a key this width can no longer issue
    pub fn would_overflow(&self, value: Option<&str>) -> bool {
        match self {
            Self::Byte(dict) => dict.would_overflow(value),
            Self::Short(dict) => dict.would_overflow(value),
            Self::Int(dict) => dict.would_overflow(value),
            Self::Unencoded(_) => false,
        }
    }

    /// Whether [`promote_yourself`](Self::promote_yourself) yields a wider map
    pub fn can_widen(&self) -> bool {
        match self {
            Self::Byte(_) | Self::Short(_) => true,
            Self::Int(dict) => dict.can_promote_to_text(),
            Self::Unencoded(_) => false,
        }
    }

    /// Whether this dictionary may end up storing unencoded text
    pub fn can_promote_to_text(&self) -> bool {
        match self {
            Self::Byte(dict) => dict.can_promote_to_text(),
            Self::Short(dict) => dict.can_promote_to_text(),
            Self::Int(dict) => dict.can_promote_to_text(),
            Self::Unencoded(_) => true,
        }
    }

    /// Append a value; `None` appends the missing value
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` if the value is new and the current width
    /// has no keys left. The dictionary is unchanged in that case.
    pub fn append(&mut self, value: Option<&str>) -> Result<()> {
        dispatch!(self, dict => dict.append(value))
    }

    /// Append the missing value
    pub fn append_missing(&mut self) -> Result<()> {
        self.append(None)
    }

    /// Overwrite the value at `row`
    pub fn set(&mut self, row: usize, value: Option<&str>) -> Result<()> {
        dispatch!(self, dict => dict.set(row, value))
    }

    /// Value stored at `row`
    pub fn get(&self, row: usize) -> Result<&str> {
        dispatch!(self, dict => dict.get(row))
    }

    /// Surrogate key for `value`, widened to `u32`
    ///
    /// Keyed widths return their sentinel for absent values. The unencoded
    /// fallback has no keys and returns `None`.
    pub fn get_key(&self, value: &str) -> Option<u32> {
        match self {
            Self::Byte(dict) => Some(dict.get_key(value).to_u32()),
            Self::Short(dict) => Some(dict.get_key(value).to_u32()),
            Self::Int(dict) => Some(dict.get_key(value).to_u32()),
            Self::Unencoded(_) => None,
        }
    }

    /// Value for a surrogate key; the missing value when the key is unknown
    pub fn get_value(&self, key: u32) -> &str {
        match self {
            Self::Byte(dict) => u8::from_u32(key).map_or(MISSING_VALUE, |k| dict.get_value(k)),
            Self::Short(dict) => u16::from_u32(key).map_or(MISSING_VALUE, |k| dict.get_value(k)),
            Self::Int(dict) => dict.get_value(key),
            Self::Unencoded(_) => MISSING_VALUE,
        }
    }

    /// The sentinel key of the current width
    pub fn missing_key(&self) -> Option<u32> {
        match self {
            Self::Byte(_) => Some(u8::MISSING.to_u32()),
            Self::Short(_) => Some(u16::MISSING.to_u32()),
            Self::Int(_) => Some(u32::MISSING),
            Self::Unencoded(_) => None,
        }
    }

    /// Number of rows
    pub fn size(&self) -> usize {
        dispatch!(self, dict => dict.size())
    }

    /// Whether no rows have been appended
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of distinct values currently held by at least one row
    pub fn count_unique(&self) -> usize {
        dispatch!(self, dict => dict.count_unique())
    }

    /// Distinct values in lexicographic order
    pub fn unique_values(&self) -> Vec<&str> {
        dispatch!(self, dict => dict.unique_values())
    }

    /// Row count for each distinct value
    pub fn count_by_value(&self) -> BTreeMap<&str, u32> {
        dispatch!(self, dict => dict.count_by_value())
    }

    /// Number of rows holding the missing value
    pub fn count_missing(&self) -> u32 {
        dispatch!(self, dict => dict.count_missing())
    }

    /// Rows whose value is one of `values`
    pub fn is_in(&self, values: &[&str]) -> Selection {
        dispatch!(self, dict => dict.is_in(values))
    }

    /// Rows whose value is none of `values`
    pub fn is_not_in(&self, values: &[&str]) -> Selection {
        dispatch!(self, dict => dict.is_not_in(values))
    }

    /// Rows holding the missing value
    pub fn select_missing(&self) -> Selection {
        dispatch!(self, dict => dict.select_missing())
    }

    /// Rows holding a non-missing value
    pub fn select_not_missing(&self) -> Selection {
        dispatch!(self, dict => dict.select_not_missing())
    }

    /// Reorder rows by value, ascending
    pub fn sort_ascending(&mut self) {
        dispatch!(self, dict => dict.sort_ascending())
    }

    /// Reorder rows by value, descending
    pub fn sort_descending(&mut self) {
        dispatch!(self, dict => dict.sort_descending())
    }

    /// Remove every row and value
    pub fn clear(&mut self) {
        dispatch!(self, dict => dict.clear())
    }

    /// Values in row order
    pub fn iter(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        dispatch!(self, dict => Box::new(dict.iter()))
    }
}

impl Default for DictionaryMap {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn check_row(row: usize, size: usize) -> Result<()> {
    if row >= size {
        return Err(Error::out_of_bounds(row, size));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn byte_map_with(count: u32) -> DictionaryMap {
        let mut map = DictionaryMap::new();
        for i in 0..count {
            map.append(Some(&format!("v{i}"))).unwrap();
        }
        map
    }

    #[test]
    fn test_key_width_order() {
        assert!(KeyWidth::Byte < KeyWidth::Short);
        assert!(KeyWidth::Int < KeyWidth::Unencoded);
        assert_eq!(KeyWidth::Int.next(), Some(KeyWidth::Unencoded));
        assert_eq!(KeyWidth::Unencoded.next(), None);
    }

    #[test]
    fn test_capacity_per_width() {
        assert_eq!(u8::capacity(), 254);
        assert_eq!(u16::capacity(), 65_534);
        assert_eq!(u32::capacity(), u32::MAX - 1);
    }

    #[test]
    fn test_byte_map_fills_then_refuses() {
        let mut map = byte_map_with(254);
        assert_eq!(map.width(), KeyWidth::Byte);
        assert!(map.would_overflow(Some("new")));
        assert!(!map.would_overflow(Some("v3")));
        assert!(!map.would_overflow(None));

        let err = map.append(Some("new")).unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { width: "byte", capacity: 254 }));
        assert_eq!(map.size(), 254);

        // existing values and the missing value still fit
        map.append(Some("v0")).unwrap();
        map.append(None).unwrap();
        assert_eq!(map.size(), 256);
    }

    #[test]
    fn test_churned_row_keeps_byte_width() {
        let mut map = byte_map_with(1);
        for i in 0..600 {
            map.set(0, Some(&format!("churn{i}"))).unwrap();
        }
        assert_eq!(map.count_unique(), 1);
        assert!(!map.would_overflow(Some("new")));

        map.append(Some("new")).unwrap();
        assert_eq!(map.width(), KeyWidth::Byte);
        assert_eq!(map.count_unique(), 2);
    }

    #[test]
    fn test_promotion_chain_widens() {
        let map = byte_map_with(3);
        let short = map.promote_yourself().unwrap();
        assert_eq!(short.width(), KeyWidth::Short);
        let int = short.promote_yourself().unwrap();
        assert_eq!(int.width(), KeyWidth::Int);
        let text = int.promote_yourself().unwrap();
        assert_eq!(text.width(), KeyWidth::Unencoded);
        assert!(map.can_widen() && short.can_widen() && int.can_widen());
        assert!(!text.can_widen());
        let still_text = text.promote_yourself().unwrap();
        assert_eq!(still_text.width(), KeyWidth::Unencoded);

        for promoted in [&short, &int, &text, &still_text] {
            assert_eq!(promoted.iter().collect::<Vec<_>>(), vec!["v0", "v1", "v2"]);
        }
    }

    #[test]
    fn test_promotion_leaves_original_usable() {
        let mut map = byte_map_with(2);
        let promoted = map.promote_yourself().unwrap();

        map.append(Some("only-in-original")).unwrap();
        assert_eq!(map.size(), 3);
        assert_eq!(promoted.size(), 2);
        assert_eq!(map.width(), KeyWidth::Byte);
    }

    #[test]
    fn test_promotion_preserves_keys() {
        let mut map = DictionaryMap::new();
        map.append(Some("a")).unwrap();
        map.append(None).unwrap();
        map.append(Some("b")).unwrap();

        let short = map.promote_yourself().unwrap();
        assert_eq!(short.get_key("a"), Some(0));
        assert_eq!(short.get_key("b"), Some(1));
        assert_eq!(short.get_key(""), Some(u32::from(u16::MAX)));
        assert_eq!(short.get_value(u32::from(u16::MAX)), "");
        assert_eq!(short.count_missing(), 1);
    }

    #[test]
    fn test_int_without_text_promotion_stays_int() {
        let config = EncodingConfig {
            initial_width: KeyWidth::Int,
            ..EncodingConfig::dictionary_only()
        };
        let mut map = DictionaryMap::with_config(&config).unwrap();
        map.append(Some("x")).unwrap();
        assert!(!map.can_promote_to_text());

        assert!(!map.can_widen());
        let same = map.promote_yourself().unwrap();
        assert_eq!(same.width(), KeyWidth::Int);
        assert_eq!(same.get(0).unwrap(), "x");
    }

    #[test]
    fn test_unencoded_has_no_keys() {
        let config = EncodingConfig {
            initial_width: KeyWidth::Unencoded,
            ..EncodingConfig::default()
        };
        let mut map = DictionaryMap::with_config(&config).unwrap();
        map.append(Some("x")).unwrap();
        assert_eq!(map.get_key("x"), None);
        assert_eq!(map.get_value(0), "");
        assert_eq!(map.missing_key(), None);
        assert!(!map.would_overflow(Some("y")));
    }

    #[test]
    fn test_get_value_with_foreign_key() {
        let map = byte_map_with(1);
        assert_eq!(map.get_value(0), "v0");
        assert_eq!(map.get_value(1_000), "");
    }
}
