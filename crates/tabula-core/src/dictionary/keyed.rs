use super::{DictionaryBuilder, DictionaryKey, MISSING_VALUE, UnencodedDictionary, check_row};
use crate::config::EncodingConfig;
use crate::selection::Selection;
use crate::{Error, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};

/// Dictionary encoding with surrogate keys of type `K`
///
/// Holds the value/key maps in both directions, a per-key row count and the
/// per-row key sequence. Keys are issued from 0 upward by a counter owned by
/// this instance; the counter never goes backwards. Once it reaches the
/// width's capacity, keys released by [`set`](Self::set) are reissued lowest
/// first, so capacity bounds the number of live keys.
#[derive(Debug)]
pub struct KeyedDictionary<K: DictionaryKey> {
    value_to_key: HashMap<String, K>,
    key_to_value: HashMap<K, String>,
    key_to_count: HashMap<K, u32>,
    values: Vec<K>,
    next_key: AtomicU32,
    released: BTreeSet<K>,
    can_promote_to_text: bool,
    release_unreferenced_keys: bool,
}

impl<K: DictionaryKey> KeyedDictionary<K> {
    /// Create an empty dictionary with default settings
    pub fn new() -> Self {
        Self::with_config(&EncodingConfig::default())
    }

    /// Create an empty dictionary using the flags in `config`
    pub fn with_config(config: &EncodingConfig) -> Self {
        Self {
            value_to_key: HashMap::new(),
            key_to_value: HashMap::new(),
            key_to_count: HashMap::new(),
            values: Vec::new(),
            next_key: AtomicU32::new(0),
            released: BTreeSet::new(),
            can_promote_to_text: config.can_promote_to_text,
            release_unreferenced_keys: config.release_unreferenced_keys,
        }
    }

    /// Start a builder for a dictionary with explicit state
    pub fn builder() -> DictionaryBuilder<K> {
        DictionaryBuilder::new()
    }

    pub(super) fn from_parts(
        value_to_key: HashMap<String, K>,
        key_to_value: HashMap<K, String>,
        key_to_count: HashMap<K, u32>,
        values: Vec<K>,
        next_key: u32,
        can_promote_to_text: bool,
        release_unreferenced_keys: bool,
    ) -> Self {
        Self {
            value_to_key,
            key_to_value,
            key_to_count,
            values,
            next_key: AtomicU32::new(next_key),
            released: BTreeSet::new(),
            can_promote_to_text,
            release_unreferenced_keys,
        }
    }

    /// Append a value; `None` and the empty string append the missing value
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` when the value is new and every key of
    /// this width is live. Nothing is modified in that case.
    pub fn append(&mut self, value: Option<&str>) -> Result<()> {
        let key = self.acquire_key(value)?;
        self.values.push(key);
        Ok(())
    }

    /// Append the missing value
    pub fn append_missing(&mut self) -> Result<()> {
        self.append(None)
    }

    /// Overwrite the value at `row`
    ///
    /// The previous key loses one reference. When its count reaches zero it
    /// is dropped from both maps, unless key release is disabled or the key
    /// is the missing sentinel.
    pub fn set(&mut self, row: usize, value: Option<&str>) -> Result<()> {
        check_row(row, self.values.len())?;
        let key = self.acquire_key(value)?;
        let previous = std::mem::replace(&mut self.values[row], key);
        self.release_key(previous);
        Ok(())
    }

    /// Value for `key`; the missing value when the key is unknown
    pub fn get_value(&self, key: K) -> &str {
        self.key_to_value
            .get(&key)
            .map_or(MISSING_VALUE, String::as_str)
    }

    /// Key for `value`; the sentinel when the value is absent or missing
    pub fn get_key(&self, value: &str) -> K {
        self.value_to_key.get(value).copied().unwrap_or(K::MISSING)
    }

    /// Key stored at `row`
    pub fn get_key_at_row(&self, row: usize) -> Result<K> {
        check_row(row, self.values.len())?;
        Ok(self.values[row])
    }

    /// Value stored at `row`
    pub fn get(&self, row: usize) -> Result<&str> {
        Ok(self.get_value(self.get_key_at_row(row)?))
    }

    /// Number of rows
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Whether no rows have been appended
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rows currently holding `key`
    pub fn key_count(&self, key: K) -> u32 {
        self.key_to_count.get(&key).copied().unwrap_or(0)
    }

    /// Number of distinct values currently held by at least one row
    pub fn count_unique(&self) -> usize {
        self.key_to_count.values().filter(|c| **c > 0).count()
    }

    /// Distinct values in lexicographic order
    pub fn unique_values(&self) -> Vec<&str> {
        self.count_by_value().into_keys().collect()
    }

    /// Row count for each distinct value
    pub fn count_by_value(&self) -> BTreeMap<&str, u32> {
        self.key_to_count
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(key, count)| (self.get_value(*key), *count))
            .collect()
    }

    /// Number of rows holding the missing value
    pub fn count_missing(&self) -> u32 {
        self.key_count(K::MISSING)
    }

    /// Number of keys issued so far; the next fresh key
    pub fn next_key(&self) -> u32 {
        self.next_key.load(Ordering::Acquire)
    }

    /// Number of non-missing keys currently mapped to a value
    pub fn live_key_count(&self) -> u32 {
        let sentinel = u32::from(self.key_to_value.contains_key(&K::MISSING));
        // bounded by the width's capacity
        self.key_to_value.len() as u32 - sentinel
    }

    /// Whether every non-missing key of this width is live
    pub fn is_full(&self) -> bool {
        self.live_key_count() >= K::capacity()
    }

    /// Whether appending `value` needs a key that cannot be issued
    pub fn would_overflow(&self, value: Option<&str>) -> bool {
        match normalize(value) {
            None => false,
            Some(v) => self.is_full() && !self.value_to_key.contains_key(v),
        }
    }

    /// Whether the int width may promote to unencoded text
    pub fn can_promote_to_text(&self) -> bool {
        self.can_promote_to_text
    }

    /// Whether keys are dropped once no row references them
    pub fn releases_unreferenced_keys(&self) -> bool {
        self.release_unreferenced_keys
    }

    /// Value to key map
    pub fn value_to_key(&self) -> &HashMap<String, K> {
        &self.value_to_key
    }

    /// Key to value map
    pub fn key_to_value(&self) -> &HashMap<K, String> {
        &self.key_to_value
    }

    /// Key to row count map
    pub fn key_to_count(&self) -> &HashMap<K, u32> {
        &self.key_to_count
    }

    /// Per-row key sequence
    pub fn keys(&self) -> &[K] {
        &self.values
    }

    /// Rows whose value is one of `values`
    ///
    /// Values without a key match no rows.
    pub fn is_in(&self, values: &[&str]) -> Selection {
        let keys: HashSet<K> = values
            .iter()
            .filter_map(|v| self.value_to_key.get(*v).copied())
            .collect();
        if keys.is_empty() {
            return Selection::new();
        }
        self.select_where(|key| keys.contains(&key))
    }

    /// Rows whose value is none of `values`
    ///
    /// Values without a key exclude no rows.
    pub fn is_not_in(&self, values: &[&str]) -> Selection {
        Selection::all(self.row_count()).and_not(&self.is_in(values))
    }

    /// Rows holding the missing value
    pub fn select_missing(&self) -> Selection {
        self.select_where(|key| key == K::MISSING)
    }

    /// Rows holding a non-missing value
    pub fn select_not_missing(&self) -> Selection {
        self.select_where(|key| key != K::MISSING)
    }

    /// Reorder rows by value, ascending
    pub fn sort_ascending(&mut self) {
        let key_to_value = &self.key_to_value;
        self.values
            .sort_by(|a, b| lookup(key_to_value, *a).cmp(lookup(key_to_value, *b)));
    }

    /// Reorder rows by value, descending
    pub fn sort_descending(&mut self) {
        let key_to_value = &self.key_to_value;
        self.values
            .sort_by(|a, b| lookup(key_to_value, *b).cmp(lookup(key_to_value, *a)));
    }

    /// Remove every row and value, and restart key issuance at 0
    pub fn clear(&mut self) {
        self.value_to_key.clear();
        self.key_to_value.clear();
        self.key_to_count.clear();
        self.values.clear();
        self.released.clear();
        self.next_key.store(0, Ordering::Release);
    }

    /// Values in row order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.iter().map(|key| self.get_value(*key))
    }

    /// Copy this dictionary into a wider key type
    pub(super) fn promote<W: DictionaryKey>(&self) -> Result<KeyedDictionary<W>> {
        let widen = |key: K| -> Result<W> {
            if key == K::MISSING {
                return Ok(W::MISSING);
            }
            W::from_u32(key.to_u32()).ok_or_else(|| {
                Error::internal(format!(
                    "key {} does not fit the {} width",
                    key.to_u32(),
                    W::WIDTH
                ))
            })
        };

        let value_to_key = self
            .value_to_key
            .iter()
            .map(|(v, k)| widen(*k).map(|k| (v.clone(), k)))
            .collect::<Result<HashMap<_, _>>>()?;
        let key_to_value = self
            .key_to_value
            .iter()
            .map(|(k, v)| widen(*k).map(|k| (k, v.clone())))
            .collect::<Result<HashMap<_, _>>>()?;
        let key_to_count = self
            .key_to_count
            .iter()
            .map(|(k, c)| widen(*k).map(|k| (k, *c)))
            .collect::<Result<HashMap<_, _>>>()?;
        let values = self
            .values
            .iter()
            .map(|k| widen(*k))
            .collect::<Result<Vec<_>>>()?;

        let mut wide = KeyedDictionary::<W>::builder()
            .value_to_key(value_to_key)
            .key_to_value(key_to_value)
            .key_to_count(key_to_count)
            .values(values)
            .next_key(self.next_key())
            .can_promote_to_text(self.can_promote_to_text)
            .release_unreferenced_keys(self.release_unreferenced_keys)
            .build()?;
        wide.released = self
            .released
            .iter()
            .map(|k| widen(*k))
            .collect::<Result<_>>()?;
        Ok(wide)
    }

    /// Copy this dictionary into raw string storage
    pub(super) fn to_unencoded(&self) -> UnencodedDictionary {
        UnencodedDictionary::from_values(self.iter())
    }

    fn row_count(&self) -> u32 {
        // row positions are u32 throughout the selection layer
        self.values.len() as u32
    }

    fn select_where(&self, predicate: impl Fn(K) -> bool) -> Selection {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, key)| predicate(**key))
            .map(|(row, _)| row as u32)
            .collect()
    }

    // Resolve the key for `value`, registering it if needed, and count one
    // more reference to it.
    fn acquire_key(&mut self, value: Option<&str>) -> Result<K> {
        let key = match normalize(value) {
            None => {
                self.key_to_value
                    .entry(K::MISSING)
                    .or_insert_with(|| MISSING_VALUE.to_string());
                self.value_to_key
                    .entry(MISSING_VALUE.to_string())
                    .or_insert(K::MISSING);
                K::MISSING
            }
            Some(v) => match self.value_to_key.get(v) {
                Some(key) => *key,
                None => {
                    let key = self.issue_key()?;
                    self.value_to_key.insert(v.to_string(), key);
                    self.key_to_value.insert(key, v.to_string());
                    key
                }
            },
        };
        *self.key_to_count.entry(key).or_insert(0) += 1;
        Ok(key)
    }

    fn release_key(&mut self, key: K) {
        let Some(count) = self.key_to_count.get_mut(&key) else {
            return;
        };
        *count = count.saturating_sub(1);
        if *count > 0 || key == K::MISSING || !self.release_unreferenced_keys {
            return;
        }
        self.key_to_count.remove(&key);
        if let Some(value) = self.key_to_value.remove(&key) {
            tracing::trace!(key = key.to_u32(), value = %value, "released dictionary key");
            self.value_to_key.remove(&value);
            self.released.insert(key);
        }
    }

    fn issue_key(&mut self) -> Result<K> {
        let capacity = K::capacity();
        let fresh = self
            .next_key
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |next| {
                (next < capacity).then_some(next + 1)
            });
        match fresh {
            Ok(issued) => K::from_u32(issued).ok_or_else(|| {
                Error::internal(format!("key {} does not fit the {} width", issued, K::WIDTH))
            }),
            Err(_) => self.reissue_key().ok_or_else(|| {
                tracing::debug!(width = %K::WIDTH, capacity, "dictionary is out of keys");
                Error::capacity_exceeded(K::WIDTH.name(), capacity)
            }),
        }
    }

    // Lowest key below the sentinel that no value holds. Builder-supplied
    // state can leave gaps that were never recorded as released, so fall
    // back to a scan; it stops after at most `live_key_count() + 1` probes.
    fn reissue_key(&mut self) -> Option<K> {
        if let Some(key) = self.released.pop_first() {
            return Some(key);
        }
        (0..K::capacity())
            .filter_map(K::from_u32)
            .find(|key| !self.key_to_value.contains_key(key))
    }
}

impl<K: DictionaryKey> Default for KeyedDictionary<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: DictionaryKey> Clone for KeyedDictionary<K> {
    fn clone(&self) -> Self {
        Self {
            value_to_key: self.value_to_key.clone(),
            key_to_value: self.key_to_value.clone(),
            key_to_count: self.key_to_count.clone(),
            values: self.values.clone(),
            next_key: AtomicU32::new(self.next_key()),
            released: self.released.clone(),
            can_promote_to_text: self.can_promote_to_text,
            release_unreferenced_keys: self.release_unreferenced_keys,
        }
    }
}

fn normalize(value: Option<&str>) -> Option<&str> {
    value.filter(|v| *v != MISSING_VALUE)
}

fn lookup<K: DictionaryKey>(key_to_value: &HashMap<K, String>, key: K) -> &str {
    key_to_value.get(&key).map_or(MISSING_VALUE, String::as_str)
}
