//! Property-based tests for filter invariants

use proptest::prelude::*;
use saltbloom::codec;
use saltbloom::core::params::FilterParams;
use saltbloom::SaltedBloomFilter;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash_of<V: Hash>(value: &V) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn no_false_negatives(items in prop::collection::vec(".{0,24}", 0..64)) {
        let filter = SaltedBloomFilter::<str>::with_bit_count(512, 64).unwrap();
        for item in &items {
            filter.insert(item);
        }
        for item in &items {
            prop_assert!(filter.contains(item));
        }
        prop_assert_eq!(filter.count(), items.len());
    }

    #[test]
    fn contains_all_is_logical_and(
        inserted in prop::collection::vec("[a-z]{1,8}", 0..32),
        queried in prop::collection::vec("[a-z]{1,8}", 0..16),
    ) {
        let filter = SaltedBloomFilter::<str>::with_bit_count(256, 32).unwrap();
        filter.insert_all(inserted.iter().map(String::as_str));

        let expected = queried.iter().all(|q| filter.contains(q));
        prop_assert_eq!(filter.contains_all(queried.iter().map(String::as_str)), expected);
    }

    #[test]
    fn same_inserts_equal_and_hash_equal(items in prop::collection::vec(any::<u64>(), 0..64)) {
        let a = SaltedBloomFilter::<u64>::new(6.0, 50, 4).unwrap();
        let b = SaltedBloomFilter::<u64>::new(6.0, 50, 4).unwrap();
        for item in &items {
            a.insert(item);
            b.insert(item);
        }
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn set_bits_never_decrease(items in prop::collection::vec(any::<i64>(), 1..64)) {
        let filter = SaltedBloomFilter::<i64>::with_bit_count(300, 30).unwrap();
        let mut previous = 0;
        for item in &items {
            filter.insert(item);
            let now = filter.count_set_bits();
            prop_assert!(now >= previous);
            prop_assert!(now <= filter.size());
            previous = now;
        }
    }

    #[test]
    fn positions_in_range_and_stable(text in ".{0,32}", m in 1usize..5000, n in 1usize..500) {
        let filter = SaltedBloomFilter::<str>::with_bit_count(m, n).unwrap();
        let positions = filter.positions(&text);
        prop_assert_eq!(positions.len(), filter.hash_count());
        prop_assert!(positions.iter().all(|&p| p < m));
        prop_assert_eq!(positions, filter.positions(&text));
    }

    #[test]
    fn bit_count_is_ceiling(bpe in 0.01f64..64.0, n in 1usize..10_000, k in 1usize..20) {
        let params = FilterParams::from_bits_per_element(bpe, n, k).unwrap();
        prop_assert_eq!(params.bit_count(), (bpe * n as f64).ceil() as usize);
        prop_assert_eq!(params.hash_count(), k);
    }

    #[test]
    fn from_bit_count_keeps_size(m in 1usize..100_000, n in 1usize..10_000) {
        let filter = SaltedBloomFilter::<str>::with_bit_count(m, n).unwrap();
        prop_assert_eq!(filter.size(), m);
        prop_assert!(filter.hash_count() >= 1);
    }

    #[test]
    fn codec_preserves_equality(items in prop::collection::vec("[ -~]{0,16}", 0..32), m in 1usize..2000) {
        let filter = SaltedBloomFilter::<str>::with_bit_count(m, 20).unwrap();
        filter.insert_all(items.iter().map(String::as_str));

        let restored: SaltedBloomFilter<str> = codec::decode(&codec::encode(&filter)).unwrap();
        prop_assert_eq!(&restored, &filter);
        for item in &items {
            prop_assert!(restored.contains(item));
        }
    }

    #[test]
    fn merge_is_union(
        left in prop::collection::vec("[a-z]{1,6}", 0..20),
        right in prop::collection::vec("[a-z]{1,6}", 0..20),
    ) {
        let mut a = SaltedBloomFilter::<str>::with_bit_count(400, 40).unwrap();
        let b = SaltedBloomFilter::<str>::with_bit_count(400, 40).unwrap();
        a.insert_all(left.iter().map(String::as_str));
        b.insert_all(right.iter().map(String::as_str));

        a.merge(&b).unwrap();
        for item in left.iter().chain(right.iter()) {
            prop_assert!(a.contains(item));
        }
        prop_assert_eq!(a.count(), left.len() + right.len());
    }
}
