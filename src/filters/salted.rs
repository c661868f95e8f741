//! Salted-digest Bloom filter.
//!
//! # Algorithm
//!
//! Each element is rendered through [`Display`], then hashed `k` times with a
//! cryptographic digest, appending the salt `0..k` as unpadded decimal text:
//!
//! ```text
//! text = element.to_string()
//! for x in 0..k:
//!     h = fold32(digest(encode(text + x)))
//!     position = h mod m
//! ```
//!
//! Positions are computed in the unsigned domain, so no sign correction is
//! needed. Two positions for one element may coincide.
//!
//! # Properties
//!
//! - **False positives**: possible, `(1 - e^(-kn/m))^k` after `n` inserts
//! - **False negatives**: never, until [`clear`](SaltedBloomFilter::clear)
//! - **Reproducibility**: contents depend only on the digest algorithm, the
//!   text encoding and the element's display text, so filters built on
//!   different machines agree bit for bit
//!
//! # Concurrency Model
//!
//! `insert`, `contains` and `set_bit` take `&self` and work on atomic words, so
//! a filter behind an `Arc` can be shared across threads without a lock. Every
//! digest call still serializes on the engine mutex. `clear` and `merge`
//! require `&mut self`.
//!
//! A reader racing a writer may see an element half inserted and report it
//! absent. Once the insert returns, the element is visible to later queries.
//!
//! # Examples
//!
//! ```
//! use saltbloom::SaltedBloomFilter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let filter = SaltedBloomFilter::<str>::with_bit_count(100, 10)?;
//! assert_eq!(filter.hash_count(), 7);
//!
//! filter.insert("apple");
//! filter.insert("banana");
//!
//! assert!(filter.contains("apple"));
//! assert!(filter.contains("banana"));
//! assert_eq!(filter.count(), 2);
//! assert_eq!(filter.size(), 100);
//! # Ok(())
//! # }
//! ```
//!
//! ## Health Monitoring
//!
//! ```
//! use saltbloom::filters::{FilterHealth, SaltedBloomFilter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let filter = SaltedBloomFilter::<u64>::new(10.0, 1_000, 7)?;
//! for i in 0..500u64 {
//!     filter.insert(&i);
//! }
//!
//! match filter.health_check() {
//!     FilterHealth::Healthy { .. } => println!("All good"),
//!     FilterHealth::Degraded { recommendation, .. } => println!("Warning: {}", recommendation),
//!     FilterHealth::Critical { recommendation, .. } => println!("Critical: {}", recommendation),
//! }
//! # Ok(())
//! # }
//! ```

#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

use crate::core::bitvec::BitVec;
use crate::core::filter::{BloomFilter, MergeableBloomFilter};
use crate::core::params::FilterParams;
use crate::error::{Result, SaltBloomError};
use crate::hash::{DigestEngine, TextEncoding};

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Operational status of a filter.
///
/// The target rate is the filter's expected false positive probability at its
/// design capacity.
///
/// - **Healthy**: fill rate < 50% and estimated FPR < 2× target
/// - **Degraded**: fill rate < 70% and estimated FPR < 5× target
/// - **Critical**: anything worse
#[derive(Debug, Clone, PartialEq)]
pub enum FilterHealth {
    /// Operating within design parameters.
    Healthy {
        /// Fraction of bits set (0.0 to 1.0).
        fill_rate: f64,
        /// False positive rate estimated from the fill rate.
        current_fpr: f64,
        /// Inserts since construction or the last clear.
        inserted: usize,
    },
    /// Still usable, but the false positive rate is climbing.
    Degraded {
        /// Fraction of bits set (0.0 to 1.0).
        fill_rate: f64,
        /// False positive rate estimated from the fill rate.
        current_fpr: f64,
        /// `current_fpr / target`.
        fpr_ratio: f64,
        /// Inserts since construction or the last clear.
        inserted: usize,
        /// Suggested action.
        recommendation: &'static str,
    },
    /// Saturated; answers are close to meaningless.
    Critical {
        /// Fraction of bits set (0.0 to 1.0).
        fill_rate: f64,
        /// False positive rate estimated from the fill rate.
        current_fpr: f64,
        /// `current_fpr / target`.
        fpr_ratio: f64,
        /// Inserts since construction or the last clear.
        inserted: usize,
        /// Suggested action.
        recommendation: &'static str,
    },
}

impl FilterHealth {
    /// Fill rate for this status.
    #[must_use]
    pub fn fill_rate(&self) -> f64 {
        match self {
            Self::Healthy { fill_rate, .. }
            | Self::Degraded { fill_rate, .. }
            | Self::Critical { fill_rate, .. } => *fill_rate,
        }
    }

    /// Estimated false positive rate for this status.
    #[must_use]
    pub fn current_fpr(&self) -> f64 {
        match self {
            Self::Healthy { current_fpr, .. }
            | Self::Degraded { current_fpr, .. }
            | Self::Critical { current_fpr, .. } => *current_fpr,
        }
    }

    /// Insert count when the check ran.
    #[must_use]
    pub fn inserted(&self) -> usize {
        match self {
            Self::Healthy { inserted, .. }
            | Self::Degraded { inserted, .. }
            | Self::Critical { inserted, .. } => *inserted,
        }
    }

    /// `true` for [`FilterHealth::Healthy`].
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy { .. })
    }

    /// `true` for [`FilterHealth::Degraded`].
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// `true` for [`FilterHealth::Critical`].
    #[must_use]
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Critical { .. })
    }
}

impl Display for FilterHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy {
                fill_rate,
                current_fpr,
                inserted,
            } => write!(
                f,
                "[OK] Healthy: Fill {:.1}%, FPR {:.4}, Inserted {}",
                fill_rate * 100.0,
                current_fpr,
                inserted
            ),
            Self::Degraded {
                fill_rate,
                fpr_ratio,
                recommendation,
                ..
            } => write!(
                f,
                "[WARN] Degraded: Fill {:.1}%, FPR {:.1}× target - {}",
                fill_rate * 100.0,
                fpr_ratio,
                recommendation
            ),
            Self::Critical {
                fill_rate,
                fpr_ratio,
                recommendation,
                ..
            } => write!(
                f,
                "[CRIT] CRITICAL: Fill {:.1}%, FPR {:.1}× target - {}",
                fill_rate * 100.0,
                fpr_ratio,
                recommendation
            ),
        }
    }
}

/// Bloom filter deriving its `k` positions from a salted cryptographic digest.
///
/// # Type Parameters
///
/// * `T` - Element type. Any `Display` type works, including unsized `str`.
///   Elements with equal display text are indistinguishable to the filter.
///
/// # Equality
///
/// Two filters are equal when they have the same bit count, expected element
/// count, hash count and bit contents. The insert counter, the digest engine
/// and the text encoding are not compared, and [`Hash`] agrees with this.
pub struct SaltedBloomFilter<T: ?Sized> {
    bits: BitVec,
    params: FilterParams,
    inserted: AtomicUsize,
    engine: Arc<DigestEngine>,
    encoding: TextEncoding,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized> SaltedBloomFilter<T> {
    /// Create a filter with `ceil(bits_per_element × expected_elements)` bits
    /// and exactly `hash_count` hash functions.
    ///
    /// Uses the shared MD5 engine and UTF-8 text.
    ///
    /// # Errors
    ///
    /// - [`SaltBloomError::InvalidParameters`] if `bits_per_element` is not a
    ///   positive finite number
    /// - [`SaltBloomError::InvalidItemCount`] if `expected_elements == 0`
    /// - [`SaltBloomError::InvalidHashCount`] if `hash_count == 0`
    ///
    /// # Examples
    ///
    /// ```
    /// use saltbloom::SaltedBloomFilter;
    ///
    /// let filter = SaltedBloomFilter::<str>::new(9.6, 1_000, 7).unwrap();
    /// assert_eq!(filter.size(), 9_600);
    /// assert_eq!(filter.hash_count(), 7);
    /// ```
    pub fn new(bits_per_element: f64, expected_elements: usize, hash_count: usize) -> Result<Self> {
        let params =
            FilterParams::from_bits_per_element(bits_per_element, expected_elements, hash_count)?;
        Self::from_params(params, DigestEngine::shared(), TextEncoding::Utf8)
    }

    /// Create a filter of exactly `bit_count` bits with the hash count that
    /// minimizes the false positive rate: `round((m/n) × ln 2)`, at least 1.
    ///
    /// # Errors
    ///
    /// - [`SaltBloomError::InvalidFilterSize`] if `bit_count == 0`
    /// - [`SaltBloomError::InvalidItemCount`] if `expected_elements == 0`
    pub fn with_bit_count(bit_count: usize, expected_elements: usize) -> Result<Self> {
        let params = FilterParams::from_bit_count(bit_count, expected_elements)?;
        Self::from_params(params, DigestEngine::shared(), TextEncoding::Utf8)
    }

    /// Create an empty filter from validated parameters, a digest engine and a
    /// text encoding.
    ///
    /// # Errors
    ///
    /// Propagates bit vector allocation errors.
    pub fn from_params(
        params: FilterParams,
        engine: Arc<DigestEngine>,
        encoding: TextEncoding,
    ) -> Result<Self> {
        let bits = BitVec::new(params.bit_count())?;
        Ok(Self::from_parts(params, bits, engine, encoding))
    }

    /// Assemble a filter around existing bits. The insert counter starts at 0.
    ///
    /// # Errors
    ///
    /// [`SaltBloomError::InvalidParameters`] if the bit vector length differs
    /// from `params.bit_count()`.
    pub fn from_bits(
        params: FilterParams,
        bits: BitVec,
        engine: Arc<DigestEngine>,
        encoding: TextEncoding,
    ) -> Result<Self> {
        if bits.len() != params.bit_count() {
            return Err(SaltBloomError::invalid_parameters(format!(
                "bit vector holds {} bits but parameters require {}",
                bits.len(),
                params.bit_count()
            )));
        }
        Ok(Self::from_parts(params, bits, engine, encoding))
    }

    fn from_parts(
        params: FilterParams,
        bits: BitVec,
        engine: Arc<DigestEngine>,
        encoding: TextEncoding,
    ) -> Self {
        #[cfg(feature = "trace")]
        tracing::debug!(
            bit_count = params.bit_count(),
            expected_elements = params.expected_elements(),
            hash_count = params.hash_count(),
            algorithm = engine.algorithm().name(),
            encoding = encoding.name(),
            "created salted bloom filter"
        );

        Self {
            bits,
            params,
            inserted: AtomicUsize::new(0),
            engine,
            encoding,
            _marker: PhantomData,
        }
    }

    /// Clear every bit and reset the insert counter. Parameters are unchanged.
    pub fn clear(&mut self) {
        #[cfg(feature = "trace")]
        tracing::debug!(
            bit_count = self.size(),
            inserted = self.count(),
            "clearing salted bloom filter"
        );

        self.bits.clear();
        *self.inserted.get_mut() = 0;
    }

    /// Read a single bit.
    ///
    /// # Errors
    ///
    /// [`SaltBloomError::IndexOutOfBounds`] if `index >= size()`.
    pub fn get_bit(&self, index: usize) -> Result<bool> {
        self.bits.try_get(index)
    }

    /// Write a single bit.
    ///
    /// This bypasses the hashing scheme. Clearing a bit can make previously
    /// inserted elements report absent, so it breaks the no-false-negative
    /// guarantee. The insert counter is not touched.
    ///
    /// # Errors
    ///
    /// [`SaltBloomError::IndexOutOfBounds`] if `index >= size()`.
    pub fn set_bit(&self, index: usize, value: bool) -> Result<()> {
        self.bits.try_set(index, value)
    }

    /// Underlying bit vector.
    #[must_use]
    #[inline]
    pub fn bits(&self) -> &BitVec {
        &self.bits
    }

    /// Parameter set.
    #[must_use]
    #[inline]
    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    /// Digest engine used to derive positions.
    #[must_use]
    #[inline]
    pub fn engine(&self) -> &Arc<DigestEngine> {
        &self.engine
    }

    /// Text encoding applied before hashing.
    #[must_use]
    #[inline]
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Filter size in bits (m).
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.params.bit_count()
    }

    /// Number of inserts since construction or the last clear.
    ///
    /// Duplicates count every time.
    #[must_use]
    #[inline]
    pub fn count(&self) -> usize {
        self.inserted.load(Ordering::Relaxed)
    }

    /// Design capacity (n).
    #[must_use]
    #[inline]
    pub fn expected_element_count(&self) -> usize {
        self.params.expected_elements()
    }

    /// Configured bits per element.
    #[must_use]
    #[inline]
    pub fn expected_bits_per_element(&self) -> f64 {
        self.params.bits_per_element()
    }

    /// Number of hash functions (k).
    #[must_use]
    #[inline]
    pub fn hash_count(&self) -> usize {
        self.params.hash_count()
    }

    /// Bits per element actually inserted: `size() / count()`.
    ///
    /// # Errors
    ///
    /// [`SaltBloomError::NoInsertions`] if nothing has been inserted.
    pub fn actual_bits_per_element(&self) -> Result<f64> {
        match self.count() {
            0 => Err(SaltBloomError::NoInsertions),
            inserted => Ok(self.size() as f64 / inserted as f64),
        }
    }

    /// False positive probability once the filter holds its design capacity.
    #[must_use]
    pub fn expected_false_positive_probability(&self) -> f64 {
        self.false_positive_probability(self.expected_element_count() as f64)
    }

    /// False positive probability after `n` inserts: `(1 - e^(-kn/m))^k`.
    #[must_use]
    pub fn false_positive_probability(&self, n: f64) -> f64 {
        self.params.false_positive_probability(n)
    }

    /// Number of bits currently set.
    #[must_use]
    pub fn count_set_bits(&self) -> usize {
        self.bits.count_ones()
    }

    /// Fraction of bits set, in `[0, 1]`.
    #[must_use]
    pub fn fill_rate(&self) -> f64 {
        self.count_set_bits() as f64 / self.size() as f64
    }

    /// False positive rate implied by the observed fill rate: `fill^k`.
    ///
    /// Unlike [`false_positive_probability`](Self::false_positive_probability)
    /// this does not depend on the insert counter, so it stays meaningful
    /// after merges and raw bit writes.
    #[must_use]
    pub fn estimated_false_positive_rate(&self) -> f64 {
        let k = i32::try_from(self.hash_count()).unwrap_or(i32::MAX);
        self.fill_rate().powi(k)
    }

    /// Heap plus inline size in bytes.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.bits.memory_usage() + std::mem::size_of::<Self>()
    }

    /// Check the filter's operational health.
    ///
    /// Logs a warning when the filter is critical.
    #[must_use]
    pub fn health_check(&self) -> FilterHealth {
        let fill_rate = self.fill_rate();
        let current_fpr = self.estimated_false_positive_rate();
        let inserted = self.count();
        let target = self.expected_false_positive_probability();

        let fpr_ratio = if target > 0.0 {
            current_fpr / target
        } else {
            1.0
        };

        if fill_rate < 0.5 && fpr_ratio < 2.0 {
            FilterHealth::Healthy {
                fill_rate,
                current_fpr,
                inserted,
            }
        } else if fill_rate < 0.7 && fpr_ratio < 5.0 {
            FilterHealth::Degraded {
                fill_rate,
                current_fpr,
                fpr_ratio,
                inserted,
                recommendation: "Consider creating a larger filter soon",
            }
        } else {
            #[cfg(feature = "trace")]
            tracing::warn!(
                fill_rate,
                current_fpr,
                fpr_ratio,
                inserted,
                expected_elements = self.expected_element_count(),
                "salted bloom filter is saturated"
            );

            FilterHealth::Critical {
                fill_rate,
                current_fpr,
                fpr_ratio,
                inserted,
                recommendation: "Rebuild with more bits - false positive rate severely degraded",
            }
        }
    }

    /// `true` if `other` has the same bit count, expected element count and
    /// hash count.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.size() == other.size()
            && self.expected_element_count() == other.expected_element_count()
            && self.hash_count() == other.hash_count()
    }

    /// OR `other`'s bits into this filter and add its insert count.
    ///
    /// Afterwards every element of either filter is reported present. Both
    /// filters should use the same digest and encoding; only the structural
    /// parameters are checked.
    ///
    /// # Errors
    ///
    /// [`SaltBloomError::IncompatibleFilters`] if the parameters differ.
    pub fn merge(&mut self, other: &Self) -> Result<()> {
        if self.size() != other.size() {
            return Err(SaltBloomError::incompatible_filters(format!(
                "size mismatch: {} vs {} bits",
                self.size(),
                other.size()
            )));
        }
        if self.expected_element_count() != other.expected_element_count() {
            return Err(SaltBloomError::incompatible_filters(format!(
                "expected element count mismatch: {} vs {}",
                self.expected_element_count(),
                other.expected_element_count()
            )));
        }
        if self.hash_count() != other.hash_count() {
            return Err(SaltBloomError::incompatible_filters(format!(
                "hash count mismatch: {} vs {}",
                self.hash_count(),
                other.hash_count()
            )));
        }

        self.bits.union_with(&other.bits)?;
        let merged = self.count().saturating_add(other.count());
        *self.inserted.get_mut() = merged;

        #[cfg(feature = "trace")]
        tracing::debug!(
            bit_count = self.size(),
            inserted = merged,
            "merged salted bloom filters"
        );

        Ok(())
    }
}

impl<T: ?Sized + Display> SaltedBloomFilter<T> {
    /// Bit position for one salt. `buf` is scratch space reused across salts.
    fn salted_position(&self, text: &str, salt: usize, buf: &mut String) -> usize {
        buf.clear();
        buf.push_str(text);
        buf.push_str(&salt.to_string());
        self.engine.hash_str_with(buf, self.encoding) as usize % self.size()
    }

    /// The `k` bit positions `element` maps to, in salt order.
    ///
    /// Positions may repeat.
    ///
    /// ```
    /// use saltbloom::SaltedBloomFilter;
    ///
    /// let filter = SaltedBloomFilter::<str>::with_bit_count(100, 10).unwrap();
    /// let positions = filter.positions("apple");
    /// assert_eq!(positions.len(), 7);
    /// assert!(positions.iter().all(|&p| p < 100));
    /// ```
    #[must_use]
    pub fn positions(&self, element: &T) -> Vec<usize> {
        let text = element.to_string();
        let mut buf = String::with_capacity(text.len() + 4);
        (0..self.hash_count())
            .map(|salt| self.salted_position(&text, salt, &mut buf))
            .collect()
    }

    /// Insert an element. Thread-safe.
    ///
    /// Re-inserting an element sets the same bits but still bumps
    /// [`count`](Self::count).
    pub fn insert(&self, element: &T) {
        let text = element.to_string();
        let mut buf = String::with_capacity(text.len() + 4);
        for salt in 0..self.hash_count() {
            let index = self.salted_position(&text, salt, &mut buf);
            self.bits.set(index, true);
        }
        self.inserted.fetch_add(1, Ordering::Relaxed);

        #[cfg(feature = "trace")]
        tracing::trace!(bit_count = self.size(), "inserted element");
    }

    /// Insert every element in order.
    pub fn insert_all<'a, I>(&self, elements: I)
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for element in elements {
            self.insert(element);
        }
    }

    /// `false` if the element was definitely never inserted, `true` if it
    /// might have been.
    ///
    /// Stops hashing at the first unset position.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        let text = element.to_string();
        let mut buf = String::with_capacity(text.len() + 4);
        (0..self.hash_count()).all(|salt| self.bits.get(self.salted_position(&text, salt, &mut buf)))
    }

    /// `true` only if every element might be present. Empty input is `true`.
    #[must_use]
    pub fn contains_all<'a, I>(&self, elements: I) -> bool
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
    {
        elements.into_iter().all(|element| self.contains(element))
    }
}

impl<T: ?Sized> Clone for SaltedBloomFilter<T> {
    fn clone(&self) -> Self {
        Self {
            bits: self.bits.clone(),
            params: self.params,
            inserted: AtomicUsize::new(self.count()),
            engine: Arc::clone(&self.engine),
            encoding: self.encoding,
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for SaltedBloomFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltedBloomFilter")
            .field("bit_count", &self.size())
            .field("expected_elements", &self.expected_element_count())
            .field("hash_count", &self.hash_count())
            .field("inserted", &self.count())
            .field("set_bits", &self.count_set_bits())
            .field("algorithm", &self.engine.algorithm())
            .field("encoding", &self.encoding)
            .finish()
    }
}

impl<T: ?Sized> PartialEq for SaltedBloomFilter<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size()
            && self.expected_element_count() == other.expected_element_count()
            && self.hash_count() == other.hash_count()
            && self.bits == other.bits
    }
}

impl<T: ?Sized> Eq for SaltedBloomFilter<T> {}

impl<T: ?Sized> Hash for SaltedBloomFilter<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size().hash(state);
        self.expected_element_count().hash(state);
        self.hash_count().hash(state);
        self.bits.hash(state);
    }
}

impl<T: ?Sized + Display> BloomFilter<T> for SaltedBloomFilter<T> {
    fn insert(&mut self, item: &T) {
        SaltedBloomFilter::insert(self, item);
    }

    fn contains(&self, item: &T) -> bool {
        SaltedBloomFilter::contains(self, item)
    }

    fn clear(&mut self) {
        SaltedBloomFilter::clear(self);
    }

    fn len(&self) -> usize {
        self.count()
    }

    fn false_positive_rate(&self) -> f64 {
        self.false_positive_probability(self.count() as f64)
    }

    fn expected_items(&self) -> usize {
        self.expected_element_count()
    }

    fn bit_count(&self) -> usize {
        self.size()
    }

    fn hash_count(&self) -> usize {
        SaltedBloomFilter::hash_count(self)
    }
}

impl<T: ?Sized + Display> MergeableBloomFilter<T> for SaltedBloomFilter<T> {
    fn is_compatible(&self, other: &Self) -> bool {
        SaltedBloomFilter::is_compatible(self, other)
    }

    fn merge(&mut self, other: &Self) -> Result<()> {
        SaltedBloomFilter::merge(self, other)
    }
}
