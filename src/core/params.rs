//! Filter parameter derivation.
//!
//! Given:
//! - `n`: expected number of elements
//! - `b`: bits per element
//! - `k`: number of hash functions
//!
//! The filter holds `m = ⌈b × n⌉` bits. When only `m` and `n` are known, the
//! hash count minimizing the false positive rate is `k = round((m/n) × ln 2)`.
//!
//! Expected false positive rate after `n` insertions:
//! - `p = (1 - e^(-kn/m))^k`
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/Time Trade-offs in Hash Coding with Allowable Errors"

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use crate::error::{Result, SaltBloomError};
use std::f64::consts::LN_2;

/// Minimum number of hash functions.
pub const MIN_HASH_FUNCTIONS: usize = 1;

/// Canonical parameter set of a filter.
///
/// `bit_count == ⌈bits_per_element × expected_elements⌉` holds for every
/// constructor (in exact arithmetic for the bit-count based ones).
///
/// # Examples
///
/// ```
/// use saltbloom::core::params::FilterParams;
///
/// let params = FilterParams::from_bit_count(100, 10).unwrap();
/// assert_eq!(params.bit_count(), 100);
/// assert_eq!(params.hash_count(), 7); // round(10 × ln 2)
/// assert_eq!(params.bits_per_element(), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    bit_count: usize,
    expected_elements: usize,
    hash_count: usize,
    bits_per_element: f64,
}

impl FilterParams {
    /// Build parameters from an explicit bits-per-element ratio and hash count.
    ///
    /// # Errors
    ///
    /// - [`SaltBloomError::InvalidParameters`] if `bits_per_element` is not a
    ///   positive finite number, or the resulting size overflows `usize`
    /// - [`SaltBloomError::InvalidItemCount`] if `expected_elements == 0`
    /// - [`SaltBloomError::InvalidHashCount`] if `hash_count == 0`
    pub fn from_bits_per_element(
        bits_per_element: f64,
        expected_elements: usize,
        hash_count: usize,
    ) -> Result<Self> {
        if !bits_per_element.is_finite() || bits_per_element <= 0.0 {
            return Err(SaltBloomError::invalid_parameters(format!(
                "bits per element must be a positive finite number, got {}",
                bits_per_element
            )));
        }
        if expected_elements == 0 {
            return Err(SaltBloomError::invalid_item_count(expected_elements));
        }
        if hash_count < MIN_HASH_FUNCTIONS {
            return Err(SaltBloomError::invalid_hash_count(hash_count));
        }

        let bits = (bits_per_element * expected_elements as f64).ceil();
        if bits > (usize::MAX / 2) as f64 {
            return Err(SaltBloomError::invalid_parameters(format!(
                "calculated filter size {:.0} exceeds system limits",
                bits
            )));
        }

        Ok(Self {
            bit_count: bits as usize,
            expected_elements,
            hash_count,
            bits_per_element,
        })
    }

    /// Build parameters from a total bit count, choosing the hash count that
    /// minimizes the false positive rate.
    ///
    /// `bit_count` is kept exactly; it is not recomputed from the ratio, which
    /// could round it up by one.
    ///
    /// # Errors
    ///
    /// - [`SaltBloomError::InvalidFilterSize`] if `bit_count == 0`
    /// - [`SaltBloomError::InvalidItemCount`] if `expected_elements == 0`
    /// - [`SaltBloomError::InvalidParameters`] if `bit_count > usize::MAX / 2`
    pub fn from_bit_count(bit_count: usize, expected_elements: usize) -> Result<Self> {
        let hash_count = optimal_hash_count(bit_count, expected_elements)?;
        Self::from_parts(bit_count, expected_elements, hash_count)
    }

    /// Build parameters from all three structural values, as stored in the
    /// byte layout.
    ///
    /// # Errors
    ///
    /// - [`SaltBloomError::InvalidFilterSize`] if `bit_count == 0`
    /// - [`SaltBloomError::InvalidItemCount`] if `expected_elements == 0`
    /// - [`SaltBloomError::InvalidHashCount`] if `hash_count == 0`
    /// - [`SaltBloomError::InvalidParameters`] if `bit_count > usize::MAX / 2`
    pub fn from_parts(bit_count: usize, expected_elements: usize, hash_count: usize) -> Result<Self> {
        if bit_count == 0 {
            return Err(SaltBloomError::invalid_filter_size(bit_count));
        }
        if bit_count > usize::MAX / 2 {
            return Err(SaltBloomError::invalid_parameters(format!(
                "filter size {} exceeds system limits",
                bit_count
            )));
        }
        if expected_elements == 0 {
            return Err(SaltBloomError::invalid_item_count(expected_elements));
        }
        if hash_count < MIN_HASH_FUNCTIONS {
            return Err(SaltBloomError::invalid_hash_count(hash_count));
        }

        Ok(Self {
            bit_count,
            expected_elements,
            hash_count,
            bits_per_element: bit_count as f64 / expected_elements as f64,
        })
    }

    /// Total number of bits (m).
    #[must_use]
    #[inline]
    pub const fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Design capacity (n).
    #[must_use]
    #[inline]
    pub const fn expected_elements(&self) -> usize {
        self.expected_elements
    }

    /// Number of hash functions (k).
    #[must_use]
    #[inline]
    pub const fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// Configured bits per element (m / n before rounding up).
    #[must_use]
    #[inline]
    pub const fn bits_per_element(&self) -> f64 {
        self.bits_per_element
    }

    /// False positive probability after `n` insertions.
    #[must_use]
    pub fn false_positive_probability(&self, n: f64) -> f64 {
        false_positive_probability(self.bit_count, n, self.hash_count)
    }
}

/// Calculate the optimal number of hash functions: `k = round((m/n) × ln 2)`,
/// never less than [`MIN_HASH_FUNCTIONS`].
///
/// # Errors
///
/// - [`SaltBloomError::InvalidFilterSize`] if `m == 0`
/// - [`SaltBloomError::InvalidItemCount`] if `n == 0`
///
/// # Examples
///
/// ```
/// use saltbloom::core::params::optimal_hash_count;
///
/// assert_eq!(optimal_hash_count(100, 10).unwrap(), 7);
/// assert_eq!(optimal_hash_count(10, 100).unwrap(), 1);
/// ```
pub fn optimal_hash_count(m: usize, n: usize) -> Result<usize> {
    if m == 0 {
        return Err(SaltBloomError::invalid_filter_size(m));
    }
    if n == 0 {
        return Err(SaltBloomError::invalid_item_count(n));
    }

    let k = (m as f64 / n as f64) * LN_2;
    Ok((k.round() as usize).max(MIN_HASH_FUNCTIONS))
}

/// Standard false positive estimate `(1 - e^(-kn/m))^k`, clamped to `[0, 1]`.
///
/// Assumes independent, uniformly distributed positions. Negative or NaN `n`
/// is treated as an empty filter.
///
/// ```
/// use saltbloom::core::params::false_positive_probability;
///
/// let p = false_positive_probability(9585, 1000.0, 7);
/// assert!((p - 0.01).abs() < 0.001);
/// assert_eq!(false_positive_probability(9585, 0.0, 7), 0.0);
/// ```
#[must_use]
pub fn false_positive_probability(m: usize, n: f64, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    if n.is_nan() || n <= 0.0 {
        return 0.0;
    }

    let k_f64 = k as f64;
    let prob_bit_one = 1.0 - (-(k_f64 * n) / m as f64).exp();
    prob_bit_one.powf(k_f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bit_count_derives_hash_count() {
        let params = FilterParams::from_bit_count(100, 10).unwrap();
        assert_eq!(params.bit_count(), 100);
        assert_eq!(params.expected_elements(), 10);
        assert_eq!(params.hash_count(), 7);
        assert_eq!(params.bits_per_element(), 10.0);
    }

    #[test]
    fn test_from_bit_count_keeps_exact_size() {
        // (7 / 25) * 25 evaluates slightly above 7 in floating point
        let params = FilterParams::from_bit_count(7, 25).unwrap();
        assert_eq!(params.bit_count(), 7);
        let params = FilterParams::from_bit_count(3, 187).unwrap();
        assert_eq!(params.bit_count(), 3);
    }

    #[test]
    fn test_from_parts() {
        let params = FilterParams::from_parts(100, 10, 3).unwrap();
        assert_eq!(params.hash_count(), 3);
        assert_eq!(params.bits_per_element(), 10.0);
        assert!(FilterParams::from_parts(0, 10, 3).is_err());
        assert!(FilterParams::from_parts(100, 0, 3).is_err());
        assert!(FilterParams::from_parts(100, 10, 0).is_err());
    }

    #[test]
    fn test_oversized_bit_count_rejected() {
        for &m in &[usize::MAX, usize::MAX / 2 + 1] {
            assert!(matches!(
                FilterParams::from_parts(m, 1, 1),
                Err(SaltBloomError::InvalidParameters { .. })
            ));
            assert!(matches!(
                FilterParams::from_bit_count(m, 1),
                Err(SaltBloomError::InvalidParameters { .. })
            ));
        }
    }

    #[test]
    fn test_from_bits_per_element_rounds_up() {
        let params = FilterParams::from_bits_per_element(9.6, 1000, 7).unwrap();
        assert_eq!(params.bit_count(), 9600);

        let params = FilterParams::from_bits_per_element(0.3, 10, 1).unwrap();
        assert_eq!(params.bit_count(), 3);

        let params = FilterParams::from_bits_per_element(1.01, 3, 2).unwrap();
        assert_eq!(params.bit_count(), 4);
    }

    #[test]
    fn test_bit_count_invariant_holds() {
        for &(b, n, k) in &[(1.5, 7usize, 1usize), (8.0, 1000, 6), (0.01, 50, 1), (12.25, 3, 9)] {
            let params = FilterParams::from_bits_per_element(b, n, k).unwrap();
            assert_eq!(params.bit_count(), (b * n as f64).ceil() as usize);
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            FilterParams::from_bits_per_element(0.0, 10, 3),
            Err(SaltBloomError::InvalidParameters { .. })
        ));
        assert!(FilterParams::from_bits_per_element(-1.0, 10, 3).is_err());
        assert!(FilterParams::from_bits_per_element(f64::NAN, 10, 3).is_err());
        assert!(FilterParams::from_bits_per_element(f64::INFINITY, 10, 3).is_err());
        assert_eq!(
            FilterParams::from_bits_per_element(8.0, 0, 3),
            Err(SaltBloomError::InvalidItemCount { count: 0 })
        );
        assert_eq!(
            FilterParams::from_bits_per_element(8.0, 10, 0),
            Err(SaltBloomError::InvalidHashCount { count: 0 })
        );
        assert_eq!(
            FilterParams::from_bit_count(0, 10),
            Err(SaltBloomError::InvalidFilterSize { size: 0 })
        );
        assert!(FilterParams::from_bit_count(100, 0).is_err());
    }

    #[test]
    fn test_optimal_hash_count_various_ratios() {
        let test_cases = vec![
            (1000, 100, 7),  // m/n = 10
            (2000, 100, 14), // m/n = 20
            (500, 100, 3),   // m/n = 5
            (10, 100_000, 1),
        ];

        for (m, n, expected_k) in test_cases {
            let k = optimal_hash_count(m, n).unwrap();
            assert_eq!(k, expected_k, "For m={}, n={}", m, n);
        }
    }

    #[test]
    fn test_false_positive_probability_matches_formula() {
        let p = false_positive_probability(100, 10.0, 7);
        let expected = (1.0 - (-0.7f64).exp()).powi(7);
        assert!((p - expected).abs() < 1e-12);
    }

    #[test]
    fn test_false_positive_probability_bounds() {
        assert_eq!(false_positive_probability(1000, 0.0, 7), 0.0);
        assert_eq!(false_positive_probability(1000, -5.0, 7), 0.0);
        let saturated = false_positive_probability(10, 1e9, 3);
        assert!(saturated > 0.99 && saturated <= 1.0);
    }

    #[test]
    fn test_false_positive_probability_grows_with_load() {
        let params = FilterParams::from_bit_count(1000, 100).unwrap();
        let low = params.false_positive_probability(10.0);
        let mid = params.false_positive_probability(100.0);
        let high = params.false_positive_probability(1000.0);
        assert!(low < mid && mid < high);
    }
}
