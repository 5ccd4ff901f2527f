//! Small utilities shared by the column predicates

pub mod levenshtein;

pub use levenshtein::LevenshteinDistance;
