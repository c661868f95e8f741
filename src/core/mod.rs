//! Core types, traits, and parameter math.
//!
//! ```text
//! core/
//! ├── filter.rs    - Trait definitions
//! ├── bitvec.rs    - Bit vector implementation
//! ├── params.rs    - Parameter derivation and false positive formula
//! └── mod.rs       - This file (public API)
//! ```
//!
//! # Examples
//!
//! ## Using Parameter Calculations
//!
//! ```
//! use saltbloom::core::params::{optimal_hash_count, FilterParams};
//!
//! let k = optimal_hash_count(100, 10).unwrap();
//! assert_eq!(k, 7);
//!
//! let params = FilterParams::from_bits_per_element(9.6, 1_000, 7).unwrap();
//! assert_eq!(params.bit_count(), 9_600);
//! ```
//!
//! ## Using BitVec Directly
//!
//! ```
//! use saltbloom::core::BitVec;
//!
//! let bv = BitVec::new(1000).expect("BitVec creation should succeed");
//! bv.set(42, true);
//! bv.set(999, true);
//!
//! assert!(bv.get(42));
//! assert!(!bv.get(43));
//! assert_eq!(bv.count_ones(), 2);
//! ```

pub mod bitvec;
pub mod filter;
pub mod params;

pub use bitvec::BitVec;
pub use filter::{BloomFilter, MergeableBloomFilter};
pub use params::{false_positive_probability, optimal_hash_count, FilterParams};
