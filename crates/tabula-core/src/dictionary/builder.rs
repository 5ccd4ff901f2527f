use super::{DictionaryKey, KeyedDictionary};
use crate::{Error, Result};
use std::collections::HashMap;

/// Assembles a [`KeyedDictionary`] from explicit state
///
/// Every field must be supplied. [`build`](Self::build) checks that the two
/// value/key maps are inverses, that the counts and row keys refer to known
/// keys, and that the key counter is past every issued key.
///
/// ```
/// use std::collections::HashMap;
/// use tabula_core::dictionary::KeyedDictionary;
///
/// let dict = KeyedDictionary::<u32>::builder()
///     .value_to_key(HashMap::from([("a".to_string(), 0)]))
///     .key_to_value(HashMap::from([(0, "a".to_string())]))
///     .key_to_count(HashMap::from([(0, 2)]))
///     .values(vec![0, 0])
///     .next_key(1)
///     .can_promote_to_text(true)
///     .build()
///     .unwrap();
/// assert_eq!(dict.get(1).unwrap(), "a");
/// ```
#[derive(Debug)]
pub struct DictionaryBuilder<K: DictionaryKey> {
    value_to_key: Option<HashMap<String, K>>,
    key_to_value: Option<HashMap<K, String>>,
    key_to_count: Option<HashMap<K, u32>>,
    values: Option<Vec<K>>,
    next_key: Option<u32>,
    can_promote_to_text: Option<bool>,
    release_unreferenced_keys: bool,
}

impl<K: DictionaryKey> DictionaryBuilder<K> {
    /// Create a builder with no fields set
    pub fn new() -> Self {
        Self {
            value_to_key: None,
            key_to_value: None,
            key_to_count: None,
            values: None,
            next_key: None,
            can_promote_to_text: None,
            release_unreferenced_keys: true,
        }
    }

    /// Value to key map
    pub fn value_to_key(mut self, map: HashMap<String, K>) -> Self {
        self.value_to_key = Some(map);
        self
    }

    /// Key to value map
    pub fn key_to_value(mut self, map: HashMap<K, String>) -> Self {
        self.key_to_value = Some(map);
        self
    }

    /// Row count per key
    pub fn key_to_count(mut self, map: HashMap<K, u32>) -> Self {
        self.key_to_count = Some(map);
        self
    }

    /// Per-row key sequence
    pub fn values(mut self, values: Vec<K>) -> Self {
        self.values = Some(values);
        self
    }

    /// First key the dictionary will issue
    pub fn next_key(mut self, next_key: u32) -> Self {
        self.next_key = Some(next_key);
        self
    }

    /// Whether the int width may promote to unencoded text
    pub fn can_promote_to_text(mut self, allowed: bool) -> Self {
        self.can_promote_to_text = Some(allowed);
        self
    }

    /// Whether keys are dropped once no row references them; defaults to true
    pub fn release_unreferenced_keys(mut self, release: bool) -> Self {
        self.release_unreferenced_keys = release;
        self
    }

    /// Validate the supplied state and build the dictionary
    pub fn build(self) -> Result<KeyedDictionary<K>> {
        let value_to_key = self.value_to_key.ok_or_else(|| missing("value_to_key"))?;
        let key_to_value = self.key_to_value.ok_or_else(|| missing("key_to_value"))?;
        let key_to_count = self.key_to_count.ok_or_else(|| missing("key_to_count"))?;
        let values = self.values.ok_or_else(|| missing("values"))?;
        let next_key = self.next_key.ok_or_else(|| missing("next_key"))?;
        let can_promote_to_text = self
            .can_promote_to_text
            .ok_or_else(|| missing("can_promote_to_text"))?;

        if value_to_key.len() != key_to_value.len() {
            return Err(Error::invalid_configuration(format!(
                "value_to_key has {} entries but key_to_value has {}",
                value_to_key.len(),
                key_to_value.len()
            )));
        }
        for (value, key) in &value_to_key {
            if key_to_value.get(key) != Some(value) {
                return Err(Error::invalid_configuration(format!(
                    "value {value:?} maps to key {} which does not map back to it",
                    key.to_u32()
                )));
            }
        }

        if next_key > K::capacity() {
            return Err(Error::invalid_configuration(format!(
                "next_key {next_key} is beyond the {} capacity of {}",
                K::WIDTH,
                K::capacity()
            )));
        }
        if let Some(key) = key_to_value
            .keys()
            .find(|k| **k != K::MISSING && k.to_u32() >= next_key)
        {
            return Err(Error::invalid_configuration(format!(
                "key {} was issued but next_key is {next_key}",
                key.to_u32()
            )));
        }

        if let Some(key) = key_to_count.keys().find(|k| !key_to_value.contains_key(*k)) {
            return Err(Error::invalid_configuration(format!(
                "key {} has a count but no value",
                key.to_u32()
            )));
        }
        if let Some(key) = values
            .iter()
            .find(|k| **k != K::MISSING && !key_to_value.contains_key(*k))
        {
            return Err(Error::invalid_configuration(format!(
                "row key {} has no value",
                key.to_u32()
            )));
        }

        Ok(KeyedDictionary::from_parts(
            value_to_key,
            key_to_value,
            key_to_count,
            values,
            next_key,
            can_promote_to_text,
            self.release_unreferenced_keys,
        ))
    }
}

impl<K: DictionaryKey> Default for DictionaryBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

fn missing(field: &str) -> Error {
    Error::invalid_configuration(format!("dictionary builder is missing {field}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered() -> DictionaryBuilder<u32> {
        KeyedDictionary::<u32>::builder()
            .value_to_key(HashMap::from([("registered".to_string(), 1)]))
            .key_to_value(HashMap::from([(1, "registered".to_string())]))
            .key_to_count(HashMap::from([(1, 1)]))
            .values(vec![1])
            .next_key(2)
            .can_promote_to_text(true)
    }

    #[test]
    fn test_append_to_built_dictionary() {
        let mut dict = registered().build().unwrap();

        dict.append(None).unwrap();
        dict.append(Some("registered")).unwrap();
        dict.append(Some("unregistered")).unwrap();

        let expected = HashMap::from([(u32::MAX, 1), (1, 2), (2, 1)]);
        assert_eq!(dict.key_to_count(), &expected);
        assert_eq!(dict.size(), 4);
        assert_eq!(dict.get_key("unregistered"), 2);
        assert_eq!(dict.next_key(), 3);
    }

    #[test]
    fn test_missing_field_fails() {
        let err = KeyedDictionary::<u8>::builder()
            .value_to_key(HashMap::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_empty_rows_with_issued_keys() {
        let dict = registered()
            .values(vec![])
            .key_to_count(HashMap::new())
            .can_promote_to_text(false)
            .build()
            .unwrap();
        assert!(dict.is_empty());
        assert_eq!(dict.get_key("registered"), 1);
        assert!(!dict.can_promote_to_text());
    }

    #[test]
    fn test_maps_must_be_inverse() {
        let err = registered()
            .key_to_value(HashMap::from([(1, "other".to_string())]))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_next_key_must_pass_issued_keys() {
        let err = registered().next_key(1).build().unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_next_key_within_capacity() {
        let err = KeyedDictionary::<u8>::builder()
            .value_to_key(HashMap::new())
            .key_to_value(HashMap::new())
            .key_to_count(HashMap::new())
            .values(vec![])
            .next_key(300)
            .can_promote_to_text(true)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_unknown_row_key_rejected() {
        let err = registered().values(vec![1, 7]).build().unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }
}
