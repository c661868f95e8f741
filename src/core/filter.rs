//! Core Bloom filter trait definitions.
//!
//! # Guarantees
//!
//! 1. **No False Negatives**: If an item was inserted, `contains()` MUST return `true`
//!    until the filter is cleared
//! 2. **Bounded False Positives**: The false positive rate follows the configured parameters
//! 3. **Thread Safety**: All implementations must be `Send + Sync`
//!
//! # Trait Hierarchy
//!
//! ```text
//! BloomFilter<T> (requires &mut self for inserts)
//!     └── MergeableBloomFilter<T> (bitwise union of compatible filters)
//! ```
//!
//! The item type is `?Sized`, so a filter over `str` accepts `&str` directly.

use crate::error::Result;

/// Core Bloom filter trait.
///
/// For concurrent writes through this trait, wrap the filter in
/// `Arc<Mutex<_>>` or `Arc<RwLock<_>>`. Implementations may additionally offer
/// inherent `&self` inserts when their storage is atomic.
///
/// # Examples
///
/// ```
/// use saltbloom::core::BloomFilter;
/// use saltbloom::SaltedBloomFilter;
///
/// fn load<F: BloomFilter<str>>(filter: &mut F, words: &[&str]) {
///     filter.insert_batch(words.iter().copied());
/// }
///
/// let mut filter = SaltedBloomFilter::<str>::with_bit_count(1_000, 100).unwrap();
/// load(&mut filter, &["alpha", "beta"]);
/// assert!(BloomFilter::contains(&filter, "alpha"));
/// ```
pub trait BloomFilter<T: ?Sized>: Send + Sync {
    /// Insert an item into the filter.
    ///
    /// After this operation, `contains(item)` is guaranteed to return `true`.
    ///
    /// * Time: O(k) where k is the number of hash functions
    fn insert(&mut self, item: &T);

    /// Check if an item might be in the filter.
    ///
    /// * `true` - Item **might** be present (could be a false positive)
    /// * `false` - Item is **definitely NOT** present
    #[must_use]
    fn contains(&self, item: &T) -> bool;

    /// Reset the filter to its initial empty state.
    fn clear(&mut self);

    /// Number of insert operations since construction or the last clear.
    ///
    /// This is **NOT** a unique item count: inserting the same item twice
    /// counts twice.
    #[must_use]
    fn len(&self) -> usize;

    /// `true` if nothing has been inserted.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Theoretical false positive probability at the current load.
    ///
    /// Formula: `(1 - e^(-kn/m))^k`
    #[must_use]
    fn false_positive_rate(&self) -> f64;

    /// Design capacity of the filter.
    ///
    /// Inserting more than this is allowed; the false positive rate degrades.
    #[must_use]
    fn expected_items(&self) -> usize;

    /// Filter size in bits.
    #[must_use]
    fn bit_count(&self) -> usize;

    /// Number of hash functions (k).
    #[must_use]
    fn hash_count(&self) -> usize;

    /// Insert every item in order.
    ///
    /// Not atomic: items before a panic stay inserted.
    fn insert_batch<'a, I>(&mut self, items: I)
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for item in items {
            self.insert(item);
        }
    }

    /// `true` only if **all** items might be present.
    ///
    /// Short-circuits on the first absent item; an empty input is `true`.
    #[must_use]
    fn contains_all<'a, I>(&self, items: I) -> bool
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
    {
        items.into_iter().all(|item| self.contains(item))
    }

    /// `true` if **any** item might be present.
    #[must_use]
    fn contains_any<'a, I>(&self, items: I) -> bool
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
    {
        items.into_iter().any(|item| self.contains(item))
    }
}

/// Filters that can absorb another filter with identical parameters.
///
/// Union is a bitwise OR: afterwards the filter reports every member of both
/// inputs.
pub trait MergeableBloomFilter<T: ?Sized>: BloomFilter<T> {
    /// `true` if `other` has the same size, capacity and hash count.
    #[must_use]
    fn is_compatible(&self, other: &Self) -> bool;

    /// OR `other` into `self`.
    ///
    /// # Errors
    ///
    /// Returns `IncompatibleFilters` if [`is_compatible`](Self::is_compatible)
    /// is `false`.
    fn merge(&mut self, other: &Self) -> Result<()>;
}
