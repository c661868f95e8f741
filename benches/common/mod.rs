//! Shared data generators and constants for the salted filter benchmarks
#![allow(dead_code)]

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use saltbloom::SaltedBloomFilter;
use std::collections::HashSet;

// DATA GENERATORS

/// Random alphanumeric string of `len` characters
#[inline]
pub fn random_string(len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn generate_strings(count: usize, len: usize) -> Vec<String> {
    (0..count).map(|_| random_string(len)).collect()
}

/// "item_00000000", "item_00000001", ...
pub fn generate_sequential_strings(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("item_{:08}", i)).collect()
}

/// URL-like keys, a typical crawler workload
pub fn generate_urls(count: usize) -> Vec<String> {
    (0..count)
        .map(|_| format!("https://example.com/path/{}", random_string(16)))
        .collect()
}

pub fn generate_u64s(count: usize) -> Vec<u64> {
    let mut rng = thread_rng();
    (0..count).map(|_| rng.gen()).collect()
}

/// Two disjoint sets of random strings: (present, absent)
pub fn create_disjoint_sets(
    present_count: usize,
    absent_count: usize,
    item_size: usize,
) -> (Vec<String>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut present = Vec::with_capacity(present_count);
    let mut absent = Vec::with_capacity(absent_count);

    while present.len() < present_count {
        let item = random_string(item_size);
        if seen.insert(item.clone()) {
            present.push(item);
        }
    }
    while absent.len() < absent_count {
        let item = random_string(item_size);
        if seen.insert(item.clone()) {
            absent.push(item);
        }
    }

    (present, absent)
}

// BENCHMARK CONSTANTS

/// Expected element counts
pub const SIZES: &[usize] = &[1_000, 10_000, 100_000];

/// Hash function counts; every one costs a full digest
pub const HASH_COUNTS: &[usize] = &[1, 4, 7, 10, 14];

/// Load factors as percentages of the expected element count
pub const LOAD_FACTORS: &[usize] = &[10, 50, 100, 200];

pub const STRING_LENGTHS_TYPICAL: &[usize] = &[8, 32, 128, 512];

pub const BITS_PER_ELEMENT: f64 = 9.6;

// FILTER SETUP HELPERS

/// Filter with 9.6 bits per element and 7 hash functions (about 1% FPR)
pub fn standard_filter(expected: usize) -> SaltedBloomFilter<str> {
    SaltedBloomFilter::new(BITS_PER_ELEMENT, expected, 7).unwrap()
}

/// Insert `target_pct`% of the filter's capacity from `items`
pub fn fill_filter(filter: &SaltedBloomFilter<str>, items: &[String], target_pct: usize) -> usize {
    let target = filter.expected_element_count() * target_pct / 100;
    let count = target.min(items.len());
    filter.insert_all(items[..count].iter().map(String::as_str));
    count
}
