//! Threshold-limited edit distance

use crate::{Error, Result};

/// Levenshtein distance that gives up past a threshold
///
/// [`apply`](Self::apply) returns the distance when it is at most the
/// threshold and `-1` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevenshteinDistance {
    threshold: usize,
}

impl LevenshteinDistance {
    /// Create a distance function with the given threshold
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `threshold` is negative.
    pub fn new(threshold: i32) -> Result<Self> {
        let threshold = usize::try_from(threshold).map_err(|_| {
            Error::invalid_argument(format!("threshold must not be negative, got {threshold}"))
        })?;
        Ok(Self { threshold })
    }

    /// Configured threshold
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Edit distance between `left` and `right`, or -1 past the threshold
    pub fn apply(&self, left: &str, right: &str) -> i32 {
        let (l, r) = (left.chars().count(), right.chars().count());
        if l.abs_diff(r) > self.threshold {
            return -1;
        }
        let distance = strsim::levenshtein(left, right);
        if distance > self.threshold {
            return -1;
        }
        i32::try_from(distance).unwrap_or(-1)
    }

    /// Whether `left` and `right` are within the threshold
    pub fn is_within(&self, left: &str, right: &str) -> bool {
        self.apply(left, right) >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limited_compare() {
        assert_eq!(LevenshteinDistance::new(7).unwrap().apply("hippo", "elephant"), 7);
        assert_eq!(LevenshteinDistance::new(6).unwrap().apply("elephant", "hippo"), -1);
        assert_eq!(LevenshteinDistance::new(7).unwrap().apply("hippo", "hippo"), 0);
        assert_eq!(LevenshteinDistance::new(8).unwrap().apply("", "elephant"), 8);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = LevenshteinDistance::new(-1).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_zero_threshold() {
        let exact = LevenshteinDistance::new(0).unwrap();
        assert!(exact.is_within("abc", "abc"));
        assert!(!exact.is_within("abc", "abd"));
    }
}
