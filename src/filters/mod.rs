//! Bloom filter implementations.
//!
//! - [`SaltedBloomFilter`] - k positions derived from one cryptographic digest,
//!   salted by function index
//!
//! # Examples
//!
//! ```
//! use saltbloom::filters::SaltedBloomFilter;
//!
//! let filter = SaltedBloomFilter::<str>::new(9.6, 1_000, 7).unwrap();
//! filter.insert("hello");
//! assert!(filter.contains("hello"));
//! ```
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod salted;
pub use salted::{FilterHealth, SaltedBloomFilter};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{BloomFilter, MergeableBloomFilter};

    fn assert_send_sync<F: Send + Sync>() {}

    #[test]
    fn test_filter_is_send_sync() {
        assert_send_sync::<SaltedBloomFilter<str>>();
        assert_send_sync::<SaltedBloomFilter<u64>>();
    }

    #[test]
    fn test_usable_through_traits() {
        fn union_of<F: MergeableBloomFilter<str>>(mut a: F, b: &F) -> F {
            a.merge(b).unwrap();
            a
        }

        let mut a = SaltedBloomFilter::<str>::with_bit_count(256, 16).unwrap();
        let mut b = SaltedBloomFilter::<str>::with_bit_count(256, 16).unwrap();
        BloomFilter::insert(&mut a, "left");
        BloomFilter::insert(&mut b, "right");

        let merged = union_of(a, &b);
        assert!(merged.contains_all(["left", "right"]));
    }
}
