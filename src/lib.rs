//! saltbloom: a Bloom filter driven by a salted cryptographic digest.
//!
//! A Bloom filter answers "might this element be in the set?" using a fixed
//! number of bits. It never reports an inserted element as absent, and reports
//! absent elements as present with a tunable probability. That makes it a
//! cheap pre-filter in front of an expensive exact lookup such as a disk or
//! network read.
//!
//! This crate derives an element's `k` bit positions from a single digest
//! (MD5 by default), run `k` times over the element's display text with the
//! salt `0..k` appended. The positions depend only on the algorithm, the text
//! encoding and the text itself, so filter contents are reproducible across
//! processes and platforms.
//!
//! # Quick Start
//!
//! ```
//! use saltbloom::SaltedBloomFilter;
//!
//! // 100 bits for 10 expected elements: k = round(10 × ln 2) = 7
//! let filter = SaltedBloomFilter::<str>::with_bit_count(100, 10).unwrap();
//!
//! filter.insert("apple");
//! filter.insert("banana");
//!
//! assert!(filter.contains("apple"));   // definitely inserted
//! assert_eq!(filter.count(), 2);
//! println!("p(fp) at capacity: {:.4}", filter.expected_false_positive_probability());
//! ```
//!
//! # Sizing
//!
//! | Constructor | Bits (m) | Hash functions (k) |
//! |-------------|----------|--------------------|
//! | [`SaltedBloomFilter::new`] | `ceil(bits_per_element × n)` | given |
//! | [`SaltedBloomFilter::with_bit_count`] | given | `round((m/n) × ln 2)`, at least 1 |
//! | [`SaltedBloomFilterBuilder`] | either | either, plus digest and encoding |
//!
//! # Concurrency
//!
//! Inserts and queries take `&self`: bits live in atomic words and digests
//! run under the engine's mutex. Share a filter with `Arc` and no extra lock.
//!
//! ```
//! use saltbloom::SaltedBloomFilter;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let filter = Arc::new(SaltedBloomFilter::<String>::new(10.0, 1_000, 7).unwrap());
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let f = Arc::clone(&filter);
//!     thread::spawn(move || f.insert(&format!("worker-{}", t)))
//! }).collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert!(filter.contains(&"worker-3".to_string()));
//! ```
//!
//! # Persistence
//!
//! [`codec`] writes the three structural parameters followed by the raw bit
//! array. No serialization framework is involved.
//!
//! # Features
//!
//! - `trace` (default) - `tracing` events for construction, clears, merges and
//!   saturation warnings; per-insert events at `TRACE` level

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::bool_assert_comparison)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(html_root_url = "https://docs.rs/saltbloom/0.1.0")]

/// Core data structures, traits and parameter math
pub mod core;

/// Error types and result aliases
pub mod error;

/// Filter implementations
pub mod filters;

/// Digest engine and text encodings
pub mod hash;

/// Type-safe filter builder
pub mod builder;

/// Raw byte layout
pub mod codec;

pub use error::{Result, SaltBloomError};

pub use core::filter::{BloomFilter, MergeableBloomFilter};

pub use filters::{FilterHealth, SaltedBloomFilter};

pub use builder::SaltedBloomFilterBuilder;

pub use hash::{DigestAlgorithm, DigestEngine, TextEncoding};

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use saltbloom::prelude::*;
///
/// let filter: SaltedBloomFilter<str> = SaltedBloomFilterBuilder::new()
///     .expected_elements(1_000)
///     .bit_count(10_000)
///     .build()
///     .unwrap();
/// filter.insert("hello");
/// assert!(filter.contains("hello"));
/// ```
pub mod prelude {
    pub use crate::builder::SaltedBloomFilterBuilder;
    pub use crate::core::filter::{BloomFilter, MergeableBloomFilter};
    pub use crate::error::{Result, SaltBloomError};
    pub use crate::filters::{FilterHealth, SaltedBloomFilter};
    pub use crate::hash::{DigestAlgorithm, DigestEngine, TextEncoding};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let filter = SaltedBloomFilter::<String>::with_bit_count(1000, 100).unwrap();
        filter.insert(&"test".to_string());
        assert!(filter.contains(&"test".to_string()));
    }

    #[test]
    fn test_trait_usage() {
        fn exercise<F: BloomFilter<str>>(filter: &mut F) {
            filter.insert("item");
            assert!(filter.contains("item"));
            filter.clear();
            assert!(filter.is_empty());
        }

        let mut filter = SaltedBloomFilter::<str>::with_bit_count(1000, 100).unwrap();
        exercise(&mut filter);
    }

    #[test]
    fn test_root_reexports() {
        let filter: crate::SaltedBloomFilter<str> = crate::SaltedBloomFilterBuilder::new()
            .digest(crate::DigestAlgorithm::Md5)
            .encoding(crate::TextEncoding::Utf8)
            .expected_elements(10)
            .bit_count(100)
            .build()
            .unwrap();
        let err: crate::Result<f64> = filter.actual_bits_per_element();
        assert_eq!(err, Err(crate::SaltBloomError::NoInsertions));
    }
}
