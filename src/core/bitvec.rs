//! Fixed-size bit vector backing every filter.
//!
//! `BitVec` is a bit array backed by `Box<[AtomicU64]>`. Each 64-bit word stores
//! 64 bits, so shared readers and writers never need a lock and a racing read
//! can at worst observe a stale bit.
//!
//! # Thread Safety
//!
//! - `get` / `set`: take `&self`, use `Acquire` / `Release` ordering
//! - `clear` / `union_with`: require exclusive access (`&mut self`)
//!
//! # Memory Layout
//!
//! Bits are packed into 64-bit words in little-endian bit order:
//!
//! ```text
//! Word 0: [bit 0][bit 1]...[bit 63]
//! Word 1: [bit 64][bit 65]...[bit 127]
//! ```
//!
//! The byte form produced by [`BitVec::to_bytes`] follows the same order:
//! byte `i` holds bits `8i..8i+8`, least significant bit first.
//!
//! # Examples
//!
//! ```
//! use saltbloom::core::bitvec::BitVec;
//!
//! let mut bv = BitVec::new(100).unwrap();
//! bv.set(42, true);
//! assert!(bv.get(42));
//! assert!(!bv.get(43));
//! assert_eq!(bv.count_ones(), 1);
//!
//! bv.clear();
//! assert_eq!(bv.count_ones(), 0);
//! ```

use crate::error::{Result, SaltBloomError};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// Fixed-length bit vector with atomic word storage.
#[derive(Debug)]
pub struct BitVec {
    /// Atomic words, each storing 64 bits.
    blocks: Box<[AtomicU64]>,

    /// Total number of bits in the vector.
    len: usize,
}

impl BitVec {
    /// Create a new bit vector with `num_bits` bits, all 0.
    ///
    /// # Errors
    ///
    /// Returns [`SaltBloomError::InvalidFilterSize`] if `num_bits` is 0.
    pub fn new(num_bits: usize) -> Result<Self> {
        if num_bits == 0 {
            return Err(SaltBloomError::invalid_filter_size(num_bits));
        }

        let blocks = (0..Self::blocks_for(num_bits))
            .map(|_| AtomicU64::new(0))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Ok(Self {
            blocks,
            len: num_bits,
        })
    }

    #[inline]
    const fn blocks_for(num_bits: usize) -> usize {
        num_bits.div_ceil(64)
    }

    /// Number of bits in the vector.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false` for a successfully constructed `BitVec`.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`, matching slice indexing. Use
    /// [`try_get`](Self::try_get) for a checked variant.
    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(
            index < self.len,
            "BitVec index out of bounds: index={} len={}",
            index,
            self.len
        );

        let mask = 1u64 << (index % 64);
        (self.blocks[index / 64].load(Ordering::Acquire) & mask) != 0
    }

    /// Set the bit at `index` to `value`.
    ///
    /// Setting a bit that already holds `value` has no effect.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`. Use [`try_set`](Self::try_set) for a checked
    /// variant.
    ///
    /// ```
    /// use saltbloom::core::bitvec::BitVec;
    ///
    /// let bv = BitVec::new(64).unwrap();
    /// bv.set(10, true);
    /// bv.set(10, true);
    /// assert!(bv.get(10));
    /// bv.set(10, false);
    /// assert!(!bv.get(10));
    /// ```
    #[inline]
    pub fn set(&self, index: usize, value: bool) {
        assert!(
            index < self.len,
            "BitVec index out of bounds: index={} len={}",
            index,
            self.len
        );

        let block = &self.blocks[index / 64];
        let mask = 1u64 << (index % 64);
        if value {
            block.fetch_or(mask, Ordering::Release);
        } else {
            block.fetch_and(!mask, Ordering::Release);
        }
    }

    /// Checked variant of [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Returns [`SaltBloomError::IndexOutOfBounds`] if `index >= len`.
    pub fn try_get(&self, index: usize) -> Result<bool> {
        if index >= self.len {
            return Err(SaltBloomError::index_out_of_bounds(index, self.len));
        }
        Ok(self.get(index))
    }

    /// Checked variant of [`set`](Self::set).
    ///
    /// # Errors
    ///
    /// Returns [`SaltBloomError::IndexOutOfBounds`] if `index >= len`.
    pub fn try_set(&self, index: usize, value: bool) -> Result<()> {
        if index >= self.len {
            return Err(SaltBloomError::index_out_of_bounds(index, self.len));
        }
        self.set(index, value);
        Ok(())
    }

    /// Reset every bit to 0. The length is unchanged.
    pub fn clear(&mut self) {
        for block in self.blocks.iter_mut() {
            *block.get_mut() = 0;
        }
    }

    /// Number of bits set to 1.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.blocks
            .iter()
            .map(|block| block.load(Ordering::Acquire).count_ones() as usize)
            .sum()
    }

    /// Bytes allocated for the words plus the struct itself.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.blocks.len() * std::mem::size_of::<AtomicU64>() + std::mem::size_of::<Self>()
    }

    /// OR every bit of `other` into `self`.
    ///
    /// # Errors
    ///
    /// Returns [`SaltBloomError::IncompatibleFilters`] if the lengths differ.
    pub fn union_with(&mut self, other: &Self) -> Result<()> {
        if self.len != other.len {
            return Err(SaltBloomError::incompatible_filters(format!(
                "BitVec size mismatch: {} vs {}",
                self.len, other.len
            )));
        }

        for (dst, src) in self.blocks.iter_mut().zip(other.blocks.iter()) {
            *dst.get_mut() |= src.load(Ordering::Acquire);
        }
        Ok(())
    }

    /// Pack the bits into `ceil(len / 8)` bytes, least significant bit first.
    ///
    /// ```
    /// use saltbloom::core::bitvec::BitVec;
    ///
    /// let bv = BitVec::new(10).unwrap();
    /// bv.set(0, true);
    /// bv.set(9, true);
    /// assert_eq!(bv.to_bytes(), vec![0b0000_0001, 0b0000_0010]);
    /// ```
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let byte_len = self.len.div_ceil(8);
        let mut bytes = Vec::with_capacity(self.blocks.len() * 8);
        for block in self.blocks.iter() {
            bytes.extend_from_slice(&block.load(Ordering::Acquire).to_le_bytes());
        }
        bytes.truncate(byte_len);
        bytes
    }

    /// Rebuild a bit vector of `len` bits from the output of
    /// [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    ///
    /// - [`SaltBloomError::InvalidFilterSize`] if `len` is 0
    /// - [`SaltBloomError::Decode`] if `bytes` is not exactly `ceil(len / 8)`
    ///   long or has bits set past `len`
    pub fn from_bytes(bytes: &[u8], len: usize) -> Result<Self> {
        if len == 0 {
            return Err(SaltBloomError::invalid_filter_size(len));
        }
        let byte_len = len.div_ceil(8);
        if bytes.len() != byte_len {
            return Err(SaltBloomError::decode(format!(
                "expected {} bytes for {} bits, got {}",
                byte_len,
                len,
                bytes.len()
            )));
        }

        let tail_bits = len % 8;
        if tail_bits != 0 && bytes[byte_len - 1] >> tail_bits != 0 {
            return Err(SaltBloomError::decode("bits set beyond the vector length"));
        }

        let bv = Self::new(len)?;

        for (block, chunk) in bv.blocks.iter().zip(bytes.chunks(8)) {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            block.store(u64::from_le_bytes(word), Ordering::Relaxed);
        }
        Ok(bv)
    }

    fn words(&self) -> impl Iterator<Item = u64> + '_ {
        self.blocks.iter().map(|b| b.load(Ordering::Acquire))
    }
}

impl Clone for BitVec {
    /// Creates an independent copy with the same bit values.
    fn clone(&self) -> Self {
        let blocks = self.words().map(AtomicU64::new).collect();

        Self {
            blocks,
            len: self.len,
        }
    }
}

impl PartialEq for BitVec {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.words().eq(other.words())
    }
}

impl Eq for BitVec {}

// Bits past `len` are never set, so hashing whole words agrees with `eq`.
impl Hash for BitVec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for word in self.words() {
            word.hash(state);
        }
    }
}
