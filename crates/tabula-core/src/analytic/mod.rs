//! Analytic (window) function support

pub mod numbering;

pub use numbering::{NumberingFunction, NumberingFunctionKind};
