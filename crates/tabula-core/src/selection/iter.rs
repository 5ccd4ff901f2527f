use std::ops::Range;

/// Ascending iterator over the positions of a [`Selection`](super::Selection)
pub enum SelectionIter<'a> {
    /// Positions drawn from a bitmap
    Bitmap(roaring::bitmap::Iter<'a>),
    /// Positions drawn from a contiguous run
    Range(Range<u32>),
}

impl Iterator for SelectionIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        match self {
            Self::Bitmap(iter) => iter.next(),
            Self::Range(range) => range.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Bitmap(iter) => iter.size_hint(),
            Self::Range(range) => range.size_hint(),
        }
    }
}
