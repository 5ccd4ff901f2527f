//! Selection - ordered sets of row positions
//!
//! A [`Selection`] is the result currency of every predicate in Tabula:
//! column scans, index lookups and dictionary membership tests all hand
//! back a `Selection`, and selections combine with Boolean set algebra.
//!
//! Two representations are kept behind one type:
//! - `Bitmap`: a roaring bitmap, used for arbitrary position sets
//! - `Range`: a contiguous half-open `start..end` run, used for "all rows"
//!   and other dense results without allocating containers
//!
//! Both iterate positions in ascending order and compare equal whenever they
//! hold the same positions. Any operation that mixes representations works on
//! a private copy of the bitmap, so a result never aliases an operand.

mod iter;

pub use iter::SelectionIter;

use crate::{Error, Result};
use rand::seq::index;
use roaring::RoaringBitmap;
use std::borrow::Cow;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Range, Sub, SubAssign};

/// An ordered, duplicate-free set of row positions
#[derive(Debug, Clone)]
pub enum Selection {
    /// Arbitrary set of positions
    Bitmap(RoaringBitmap),
    /// Every position in a half-open run
    Range(Range<u32>),
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::Bitmap(RoaringBitmap::new())
    }

    /// Create a range-backed selection holding every position in `start..end`
    pub fn with_range(start: u32, end: u32) -> Self {
        Self::Range(start..end.max(start))
    }

    /// Create a selection holding every row of a column with `size` rows
    pub fn all(size: u32) -> Self {
        Self::with_range(0, size)
    }

    /// Wrap an existing bitmap
    pub fn from_bitmap(bitmap: RoaringBitmap) -> Self {
        Self::Bitmap(bitmap)
    }

    /// Create a selection from a slice of positions in any order
    pub fn from_slice(positions: &[u32]) -> Self {
        positions.iter().copied().collect()
    }

    /// Pick `n` distinct positions uniformly at random from `0..max`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when `n` exceeds `max`.
    pub fn select_random(n: u32, max: u32) -> Result<Self> {
        if n > max {
            return Err(Error::invalid_argument(format!(
                "cannot select {} distinct rows out of {}",
                n, max
            )));
        }
        let mut rng = rand::thread_rng();
        let picked = index::sample(&mut rng, max as usize, n as usize);
        Ok(picked.into_iter().map(|i| i as u32).collect())
    }

    /// Add a single position
    pub fn add(&mut self, position: u32) {
        if let Self::Range(r) = self {
            if r.contains(&position) {
                return;
            }
            if let Some(next) = position.checked_add(1) {
                if r.is_empty() {
                    *r = position..next;
                    return;
                }
                if position == r.end {
                    r.end = next;
                    return;
                }
                if next == r.start {
                    r.start = position;
                    return;
                }
            }
        }
        self.update_bitmap(|b| {
            b.insert(position);
        });
    }

    /// Add every position in `start..end`
    pub fn add_range(&mut self, start: u32, end: u32) {
        if start >= end {
            return;
        }
        if let Self::Range(r) = self {
            if r.is_empty() {
                *r = start..end;
                return;
            }
            // overlapping or touching runs stay contiguous
            if start <= r.end && end >= r.start {
                *r = r.start.min(start)..r.end.max(end);
                return;
            }
        }
        self.update_bitmap(|b| {
            b.insert_range(start..end);
        });
    }

    /// Remove a single position
    pub fn remove(&mut self, position: u32) {
        if let Self::Range(r) = self {
            if !r.contains(&position) {
                return;
            }
            if position == r.start {
                r.start += 1;
                return;
            }
            if position + 1 == r.end {
                r.end = position;
                return;
            }
        }
        self.update_bitmap(|b| {
            b.remove(position);
        });
    }

    /// Remove every position in `start..end`
    pub fn remove_range(&mut self, start: u32, end: u32) {
        if start >= end {
            return;
        }
        if let Self::Range(r) = self {
            if end <= r.start || start >= r.end {
                return;
            }
            if start <= r.start && end >= r.end {
                *r = 0..0;
                return;
            }
            if start <= r.start {
                r.start = end;
                return;
            }
            if end >= r.end {
                r.end = start;
                return;
            }
        }
        self.update_bitmap(|b| {
            b.remove_range(start..end);
        });
    }

    /// Complement the selection inside the window `start..end`
    pub fn flip(&mut self, start: u32, end: u32) {
        let window = Self::with_range(start, end);
        *self = self.xor(&window);
    }

    /// Remove every position
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Positions present in both selections
    pub fn and(&self, other: &Selection) -> Selection {
        match (self, other) {
            (Self::Range(a), Self::Range(b)) => Self::with_range(a.start.max(b.start), a.end.min(b.end)),
            _ => {
                let mut result = self.to_bitmap();
                result &= &*other.bitmap_view();
                Self::Bitmap(result)
            }
        }
    }

    /// Positions present in either selection
    pub fn or(&self, other: &Selection) -> Selection {
        match (self, other) {
            (Self::Range(a), Self::Range(b)) if a.is_empty() => Self::Range(b.clone()),
            (Self::Range(a), Self::Range(b)) if b.is_empty() => Self::Range(a.clone()),
            (Self::Range(a), Self::Range(b)) if a.start <= b.end && b.start <= a.end => {
                Self::Range(a.start.min(b.start)..a.end.max(b.end))
            }
            _ => {
                let mut result = self.to_bitmap();
                result |= &*other.bitmap_view();
                Self::Bitmap(result)
            }
        }
    }

    /// Positions present in `self` but not in `other`
    pub fn and_not(&self, other: &Selection) -> Selection {
        if let (Self::Range(a), Self::Range(b)) = (self, other) {
            if b.is_empty() || b.end <= a.start || b.start >= a.end {
                return Self::Range(a.clone());
            }
        }
        let mut result = self.to_bitmap();
        result -= &*other.bitmap_view();
        Self::Bitmap(result)
    }

    /// Positions present in exactly one of the selections
    pub fn xor(&self, other: &Selection) -> Selection {
        let mut result = self.to_bitmap();
        result ^= &*other.bitmap_view();
        Self::Bitmap(result)
    }

    /// Check whether a position is selected
    pub fn contains(&self, position: u32) -> bool {
        match self {
            Self::Bitmap(b) => b.contains(position),
            Self::Range(r) => r.contains(&position),
        }
    }

    /// Number of selected positions
    pub fn len(&self) -> u64 {
        match self {
            Self::Bitmap(b) => b.len(),
            Self::Range(r) => u64::from(r.end - r.start),
        }
    }

    /// Check whether no position is selected
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Bitmap(b) => b.is_empty(),
            Self::Range(r) => r.is_empty(),
        }
    }

    /// The `i`-th smallest selected position
    pub fn get(&self, i: usize) -> Option<u32> {
        match self {
            Self::Bitmap(b) => b.select(u32::try_from(i).ok()?),
            Self::Range(r) => {
                let i = u32::try_from(i).ok()?;
                r.start.checked_add(i).filter(|p| *p < r.end)
            }
        }
    }

    /// Smallest selected position
    pub fn min(&self) -> Option<u32> {
        match self {
            Self::Bitmap(b) => b.min(),
            Self::Range(r) => (!r.is_empty()).then_some(r.start),
        }
    }

    /// Largest selected position
    pub fn max(&self) -> Option<u32> {
        match self {
            Self::Bitmap(b) => b.max(),
            Self::Range(r) => (!r.is_empty()).then(|| r.end - 1),
        }
    }

    /// Iterate selected positions in ascending order
    pub fn iter(&self) -> SelectionIter<'_> {
        match self {
            Self::Bitmap(b) => SelectionIter::Bitmap(b.iter()),
            Self::Range(r) => SelectionIter::Range(r.clone()),
        }
    }

    /// Materialize the positions as an ascending vector
    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }

    /// A bitmap holding the same positions, never shared with `self`
    pub fn to_bitmap(&self) -> RoaringBitmap {
        self.bitmap_view().into_owned()
    }

    /// Consume the selection into a bitmap
    pub fn into_bitmap(self) -> RoaringBitmap {
        match self {
            Self::Bitmap(b) => b,
            Self::Range(r) => range_bitmap(&r),
        }
    }

    /// Whether the selection is currently stored as a contiguous run
    pub fn is_range_backed(&self) -> bool {
        matches!(self, Self::Range(_))
    }

    // Read-only bitmap access. Range-backed selections materialize a
    // temporary; bitmap-backed ones lend their own storage, which callers
    // must never mutate.
    fn bitmap_view(&self) -> Cow<'_, RoaringBitmap> {
        match self {
            Self::Bitmap(b) => Cow::Borrowed(b),
            Self::Range(r) => Cow::Owned(range_bitmap(r)),
        }
    }

    // Apply `edit` to a bitmap holding the current positions; the selection
    // is bitmap-backed afterwards.
    fn update_bitmap(&mut self, edit: impl FnOnce(&mut RoaringBitmap)) {
        let mut bitmap = std::mem::take(self).into_bitmap();
        edit(&mut bitmap);
        *self = Self::Bitmap(bitmap);
    }
}

fn range_bitmap(r: &Range<u32>) -> RoaringBitmap {
    let mut bitmap = RoaringBitmap::new();
    bitmap.insert_range(r.clone());
    bitmap
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Range(a), Self::Range(b)) => (a.is_empty() && b.is_empty()) || a == b,
            _ => self.len() == other.len() && self.bitmap_view() == other.bitmap_view(),
        }
    }
}

impl Eq for Selection {}

impl From<RoaringBitmap> for Selection {
    fn from(bitmap: RoaringBitmap) -> Self {
        Self::Bitmap(bitmap)
    }
}

impl From<Range<u32>> for Selection {
    fn from(range: Range<u32>) -> Self {
        Self::with_range(range.start, range.end)
    }
}

impl FromIterator<u32> for Selection {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self::Bitmap(iter.into_iter().collect())
    }
}

impl Extend<u32> for Selection {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        for position in iter {
            self.add(position);
        }
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = u32;
    type IntoIter = SelectionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl BitAnd<&Selection> for &Selection {
    type Output = Selection;

    fn bitand(self, rhs: &Selection) -> Selection {
        self.and(rhs)
    }
}

impl BitOr<&Selection> for &Selection {
    type Output = Selection;

    fn bitor(self, rhs: &Selection) -> Selection {
        self.or(rhs)
    }
}

impl BitXor<&Selection> for &Selection {
    type Output = Selection;

    fn bitxor(self, rhs: &Selection) -> Selection {
        self.xor(rhs)
    }
}

impl Sub<&Selection> for &Selection {
    type Output = Selection;

    fn sub(self, rhs: &Selection) -> Selection {
        self.and_not(rhs)
    }
}

impl BitAndAssign<&Selection> for Selection {
    fn bitand_assign(&mut self, rhs: &Selection) {
        match self {
            Self::Bitmap(b) => *b &= &*rhs.bitmap_view(),
            Self::Range(_) => *self = self.and(rhs),
        }
    }
}

impl BitOrAssign<&Selection> for Selection {
    fn bitor_assign(&mut self, rhs: &Selection) {
        match self {
            Self::Bitmap(b) => *b |= &*rhs.bitmap_view(),
            Self::Range(_) => *self = self.or(rhs),
        }
    }
}

impl BitXorAssign<&Selection> for Selection {
    fn bitxor_assign(&mut self, rhs: &Selection) {
        match self {
            Self::Bitmap(b) => *b ^= &*rhs.bitmap_view(),
            Self::Range(_) => *self = self.xor(rhs),
        }
    }
}

impl SubAssign<&Selection> for Selection {
    fn sub_assign(&mut self, rhs: &Selection) {
        match self {
            Self::Bitmap(b) => *b -= &*rhs.bitmap_view(),
            Self::Range(_) => *self = self.and_not(rhs),
        }
    }
}
