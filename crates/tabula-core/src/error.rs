//! Error types for Tabula Core

use thiserror::Error;

/// Result type alias using Tabula Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the encoding, selection and index layers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A dictionary is full at its current key width and may not promote
    #[error("Capacity exceeded: {width} dictionary holds at most {capacity} distinct values")]
    CapacityExceeded {
        /// Name of the key width that ran out of keys
        width: &'static str,
        /// Number of non-missing values the width can hold
        capacity: u32,
    },

    /// A builder or configuration is missing required state or is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Caller supplied an argument outside the accepted domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Row position past the end of a column
    #[error("Row {position} is out of bounds for a column of {size} rows")]
    OutOfBounds {
        /// Requested row position
        position: usize,
        /// Number of rows in the column
        size: usize,
    },

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a capacity error for the given key width
    pub fn capacity_exceeded(width: &'static str, capacity: u32) -> Self {
        Self::CapacityExceeded { width, capacity }
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(position: usize, size: usize) -> Self {
        Self::OutOfBounds { position, size }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message_names_width() {
        let err = Error::capacity_exceeded("byte", 254);
        assert_eq!(
            err.to_string(),
            "Capacity exceeded: byte dictionary holds at most 254 distinct values"
        );
    }

    #[test]
    fn test_constructors() {
        assert!(matches!(
            Error::invalid_configuration("x"),
            Error::InvalidConfiguration(_)
        ));
        assert!(matches!(
            Error::out_of_bounds(3, 2),
            Error::OutOfBounds {
                position: 3,
                size: 2
            }
        ));
    }
}
