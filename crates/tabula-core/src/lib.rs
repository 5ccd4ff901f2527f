//! Tabula Core - Columnar Encoding, Selection and Index Engine
//!
//! This crate provides the in-memory core of the Tabula table library:
//! - Dictionary encoding of string columns with a one-way promotion chain
//!   (byte -> short -> int -> unencoded)
//! - Row selections with set algebra over bitmap-backed and range-backed forms
//! - Sorted per-type indices answering equality and range predicates
//! - Row numbering functions for analytic queries
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │          Predicates / Analytic               │
//! │   (scan, is_in, is_similar_to, rank)        │
//! └──────────────┬──────────────────────────────┘
//!                │
//! ┌──────────────┴──────────────────────────────┐
//! │              Index Layer                     │
//! │  (Byte/Short/Int/Long/Float/Double/String)  │
//! └──────────────┬──────────────────────────────┘
//!                │
//! ┌──────────────┴──────────────────────────────┐
//! │          Columns / Dictionaries              │
//! │   (DictionaryMap promotion, number columns) │
//! └──────────────┬──────────────────────────────┘
//!                │
//! ┌──────────────┴──────────────────────────────┐
//! │               Selection                      │
//! │        (Roaring bitmap, row ranges)         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use tabula_core::column::{ShortColumn, StringColumn};
//! use tabula_core::index::ShortIndex;
//!
//! let shorts = ShortColumn::from_values("s", vec![7, 5, 2, 3, 1]);
//! let index = ShortIndex::new(&shorts);
//!
//! let names = StringColumn::from_values("n", ["a", "b", "a", "c", "a"]).unwrap();
//! let hits = &index.at_most(3) & &names.is_equal_to("a");
//! assert_eq!(hits.to_vec(), vec![2, 4]);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod analytic;
pub mod column;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod index;
pub mod selection;
pub mod util;

pub use config::EncodingConfig;
pub use dictionary::{DictionaryMap, KeyWidth};
pub use error::{Error, Result};
pub use selection::Selection;
