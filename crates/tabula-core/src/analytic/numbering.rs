//! Row numbering over an ordered partition
//!
//! A [`NumberingFunctionKind`] is a stateless tag; each evaluation asks it
//! for a fresh [`NumberingFunction`] that owns its own counters. The caller
//! walks the ordered rows and reports each one as either the start of a new
//! peer group ([`add_next_row`](NumberingFunction::add_next_row), also used
//! for the first row) or a peer of the previous row
//! ([`add_equal_row`](NumberingFunction::add_equal_row)), reading
//! [`value`](NumberingFunction::value) after each step.

use crate::column::ColumnType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stateful numbering counter
pub trait NumberingFunction: fmt::Debug {
    /// The row ties with the previous row
    fn add_equal_row(&mut self);

    /// The row starts a new peer group
    fn add_next_row(&mut self);

    /// Number for the most recent row
    fn value(&self) -> u32;
}

/// The numbering functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumberingFunctionKind {
    /// Position of the row in the partition
    RowNumber,
    /// Rank with gaps after ties
    Rank,
    /// Rank without gaps
    DenseRank,
}

impl NumberingFunctionKind {
    /// Every kind
    pub const ALL: [Self; 3] = [Self::RowNumber, Self::Rank, Self::DenseRank];

    /// Name used in queries and plans
    pub fn function_name(self) -> &'static str {
        match self {
            Self::RowNumber => "ROW_NUMBER",
            Self::Rank => "RANK",
            Self::DenseRank => "DENSE_RANK",
        }
    }

    /// Type of the produced column
    pub fn return_type(self) -> ColumnType {
        ColumnType::Integer
    }

    /// Whether the function can order by a column of `column_type`
    ///
    /// Every column type is ordered, so this always holds.
    pub fn is_compatible_column(self, _column_type: ColumnType) -> bool {
        true
    }

    /// A fresh counter for one partition
    pub fn implementation(self) -> Box<dyn NumberingFunction> {
        match self {
            Self::RowNumber => Box::new(RowNumber::default()),
            Self::Rank => Box::new(Rank::default()),
            Self::DenseRank => Box::new(DenseRank::default()),
        }
    }
}

impl fmt::Display for NumberingFunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())
    }
}

#[derive(Debug, Default)]
struct RowNumber {
    count: u32,
}

impl NumberingFunction for RowNumber {
    fn add_equal_row(&mut self) {
        self.count += 1;
    }

    fn add_next_row(&mut self) {
        self.count += 1;
    }

    fn value(&self) -> u32 {
        self.count
    }
}

#[derive(Debug, Default)]
struct DenseRank {
    rank: u32,
}

impl NumberingFunction for DenseRank {
    fn add_equal_row(&mut self) {}

    fn add_next_row(&mut self) {
        self.rank += 1;
    }

    fn value(&self) -> u32 {
        self.rank
    }
}

#[derive(Debug)]
struct Rank {
    rank: u32,
    peers: u32,
}

impl Default for Rank {
    fn default() -> Self {
        // the first add_next_row moves the rank from 0 to 1
        Self { rank: 0, peers: 1 }
    }
}

impl NumberingFunction for Rank {
    fn add_equal_row(&mut self) {
        self.peers += 1;
    }

    fn add_next_row(&mut self) {
        self.rank += self.peers;
        self.peers = 1;
    }

    fn value(&self) -> u32 {
        self.rank
    }
}
