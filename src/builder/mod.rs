//! Builder pattern for salted Bloom filter construction.
//!
//! # Type-State Pattern
//!
//! The builder progresses through states, with `build()` only available once
//! the filter is sized. Forgetting the capacity or the size is a compile error:
//!
//! ```compile_fail
//! use saltbloom::builder::SaltedBloomFilterBuilder;
//! use saltbloom::SaltedBloomFilter;
//!
//! let filter: SaltedBloomFilter<str> = SaltedBloomFilterBuilder::new()
//!     .expected_elements(10)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Error Handling
//!
//! - **Compile-time errors**: missing required parameters
//! - **Runtime errors**: invalid values and unknown digest names, reported by `build()`
//!
//! # Examples
//!
//! ```
//! use saltbloom::builder::SaltedBloomFilterBuilder;
//! use saltbloom::hash::TextEncoding;
//! use saltbloom::SaltedBloomFilter;
//!
//! let filter: SaltedBloomFilter<str> = SaltedBloomFilterBuilder::new()
//!     .expected_elements(10_000)
//!     .bits_per_element(10.0)
//!     .hash_functions(7)
//!     .encoding(TextEncoding::Utf8)
//!     .build()
//!     .unwrap();
//!
//! filter.insert("hello");
//! assert!(filter.contains("hello"));
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod salted;

pub use salted::{FilterMetadata, SaltedBloomFilterBuilder};
