//! Error types for saltbloom operations.
//!
//! Every fallible operation in the crate returns [`Result<T>`] with a
//! [`SaltBloomError`]. Constructors validate their inputs and report problems
//! here instead of panicking.
//!
//! # Error Propagation
//!
//! ```
//! use saltbloom::{Result, SaltedBloomFilter};
//!
//! fn build_filter(bits: usize, n: usize) -> Result<SaltedBloomFilter<str>> {
//!     let filter = SaltedBloomFilter::with_bit_count(bits, n)?;
//!     Ok(filter)
//! }
//! # assert!(build_filter(100, 10).is_ok());
//! # assert!(build_filter(100, 0).is_err());
//! ```

#![allow(clippy::module_name_repetitions)]

use std::fmt;

/// Result type alias for saltbloom operations.
pub type Result<T> = std::result::Result<T, SaltBloomError>;

/// Errors that can occur while building or operating a filter.
///
/// `Clone` + `PartialEq` so tests can compare errors directly.
#[derive(Debug, Clone, PartialEq)]
pub enum SaltBloomError {
    /// The requested digest algorithm is not available.
    ///
    /// Raised when an engine is constructed, never deferred to the first hash.
    DigestUnavailable {
        /// Name of the algorithm that was requested.
        algorithm: String,
    },

    /// Invalid filter parameters provided during construction.
    InvalidParameters {
        /// Human-readable description of what's invalid.
        message: String,
    },

    /// Expected element count is zero.
    InvalidItemCount {
        /// The invalid count that was provided.
        count: usize,
    },

    /// Bit array size is zero.
    InvalidFilterSize {
        /// The invalid size in bits.
        size: usize,
    },

    /// Hash function count is zero.
    InvalidHashCount {
        /// The invalid hash count provided.
        count: usize,
    },

    /// A raw bit access addressed an index `>= length`.
    IndexOutOfBounds {
        /// The invalid index that was accessed.
        index: usize,
        /// The valid length of the bit vector.
        length: usize,
    },

    /// A statistic that divides by the inserted count was requested before
    /// anything was inserted.
    NoInsertions,

    /// Two filters cannot be combined.
    IncompatibleFilters {
        /// Description of the incompatibility.
        reason: String,
    },

    /// A byte buffer does not hold a valid filter layout.
    Decode {
        /// Description of what failed.
        message: String,
    },
}

impl fmt::Display for SaltBloomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DigestUnavailable { algorithm } => {
                write!(f, "Digest algorithm '{}' is not available.", algorithm)
            }
            Self::InvalidParameters { message } => {
                write!(f, "Invalid Bloom filter parameters: {}.", message)
            }
            Self::InvalidItemCount { count } => {
                write!(
                    f,
                    "Invalid item count: {}. Expected elements must be greater than 0.",
                    count
                )
            }
            Self::InvalidFilterSize { size } => {
                write!(
                    f,
                    "Invalid filter size: {} bits. Must be positive and within memory limits.",
                    size
                )
            }
            Self::InvalidHashCount { count } => {
                write!(
                    f,
                    "Invalid hash function count: {}. Must be at least 1.",
                    count
                )
            }
            Self::IndexOutOfBounds { index, length } => {
                write!(
                    f,
                    "Index {} out of bounds for bit vector of length {}",
                    index, length
                )
            }
            Self::NoInsertions => {
                write!(
                    f,
                    "No elements have been inserted; bits per element is undefined."
                )
            }
            Self::IncompatibleFilters { reason } => {
                write!(
                    f,
                    "Cannot perform operation on incompatible filters: {}.",
                    reason
                )
            }
            Self::Decode { message } => {
                write!(f, "Failed to decode filter bytes: {}.", message)
            }
        }
    }
}

impl std::error::Error for SaltBloomError {}

impl SaltBloomError {
    /// Create a `DigestUnavailable` error.
    #[must_use]
    pub fn digest_unavailable(algorithm: impl Into<String>) -> Self {
        Self::DigestUnavailable {
            algorithm: algorithm.into(),
        }
    }

    /// Create an `InvalidParameters` error with a formatted message.
    ///
    /// ```
    /// use saltbloom::SaltBloomError;
    ///
    /// let err = SaltBloomError::invalid_parameters(
    ///     format!("bits per element {} is not finite", f64::NAN)
    /// );
    /// assert!(err.to_string().contains("NaN"));
    /// ```
    #[must_use]
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    /// Create an `InvalidItemCount` error.
    #[must_use]
    pub fn invalid_item_count(count: usize) -> Self {
        Self::InvalidItemCount { count }
    }

    /// Create an `InvalidFilterSize` error.
    #[must_use]
    pub fn invalid_filter_size(size: usize) -> Self {
        Self::InvalidFilterSize { size }
    }

    /// Create an `InvalidHashCount` error.
    #[must_use]
    pub fn invalid_hash_count(count: usize) -> Self {
        Self::InvalidHashCount { count }
    }

    /// Create an `IndexOutOfBounds` error.
    #[must_use]
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        Self::IndexOutOfBounds { index, length }
    }

    /// Create an `IncompatibleFilters` error.
    #[must_use]
    pub fn incompatible_filters(reason: impl Into<String>) -> Self {
        Self::IncompatibleFilters {
            reason: reason.into(),
        }
    }

    /// Create a `Decode` error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_digest_unavailable() {
        let err = SaltBloomError::digest_unavailable("WHIRLPOOL");
        let display = format!("{err}");
        assert!(display.contains("WHIRLPOOL"));
        assert!(display.contains("not available"));
    }

    #[test]
    fn test_error_display_invalid_parameters() {
        let err = SaltBloomError::invalid_parameters("test message");
        let display = format!("{err}");
        assert!(display.contains("Invalid Bloom filter parameters"));
        assert!(display.contains("test message"));
        assert!(display.ends_with('.'));
    }

    #[test]
    fn test_error_display_invalid_item_count() {
        let display = format!("{}", SaltBloomError::invalid_item_count(0));
        assert!(display.contains("greater than 0"));
    }

    #[test]
    fn test_error_display_invalid_filter_size() {
        let display = format!("{}", SaltBloomError::invalid_filter_size(0));
        assert!(display.contains("0 bits"));
    }

    #[test]
    fn test_error_display_invalid_hash_count() {
        let display = format!("{}", SaltBloomError::invalid_hash_count(0));
        assert!(display.contains("at least 1"));
    }

    #[test]
    fn test_error_display_index_out_of_bounds() {
        let err = SaltBloomError::index_out_of_bounds(150, 100);
        let display = format!("{}", err);
        assert!(display.contains("150"));
        assert!(display.contains("100"));
        assert!(display.contains("out of bounds"));
    }

    #[test]
    fn test_error_display_no_insertions() {
        let display = format!("{}", SaltBloomError::NoInsertions);
        assert!(display.contains("No elements"));
    }

    #[test]
    fn test_error_display_incompatible_filters() {
        let err = SaltBloomError::incompatible_filters("different sizes");
        let display = format!("{err}");
        assert!(display.contains("incompatible"));
        assert!(display.contains("different sizes"));
    }

    #[test]
    fn test_error_display_decode() {
        let display = format!("{}", SaltBloomError::decode("truncated header"));
        assert!(display.contains("truncated header"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let _err: Box<dyn std::error::Error> = Box::new(SaltBloomError::NoInsertions);
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<()> {
            Err(SaltBloomError::invalid_item_count(0))
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        assert_eq!(outer(), Err(SaltBloomError::InvalidItemCount { count: 0 }));
    }
}
