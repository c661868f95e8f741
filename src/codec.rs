//! Raw byte layout for persisting filters without a serialization framework.
//!
//! # Format
//!
//! ```text
//! offset  size             field
//! 0       8                bit_count          (u64, little-endian)
//! 8       8                expected_elements  (u64, little-endian)
//! 16      8                hash_count         (u64, little-endian)
//! 24      ceil(m / 8)      bit array, LSB-first within each byte
//! ```
//!
//! The insert counter, the digest algorithm and the text encoding are not
//! stored. A decoded filter reports `count() == 0` and must be paired with the
//! same digest and encoding it was built with, or lookups give false
//! negatives. [`decode`] assumes the defaults (shared MD5 engine, UTF-8).
//!
//! # Examples
//!
//! ```
//! use saltbloom::{codec, SaltedBloomFilter};
//!
//! let filter = SaltedBloomFilter::<str>::with_bit_count(100, 10).unwrap();
//! filter.insert("apple");
//!
//! let bytes = codec::encode(&filter);
//! assert_eq!(bytes.len(), 24 + 13);
//!
//! let restored: SaltedBloomFilter<str> = codec::decode(&bytes).unwrap();
//! assert_eq!(restored, filter);
//! assert!(restored.contains("apple"));
//! assert_eq!(restored.count(), 0);
//! ```

use crate::core::bitvec::BitVec;
use crate::core::params::FilterParams;
use crate::error::{Result, SaltBloomError};
use crate::filters::salted::SaltedBloomFilter;
use crate::hash::{DigestEngine, TextEncoding};
use std::sync::Arc;

/// Header length in bytes.
pub const HEADER_SIZE: usize = 24;

/// Encoded length of `filter`.
#[must_use]
pub fn encoded_len<T: ?Sized>(filter: &SaltedBloomFilter<T>) -> usize {
    HEADER_SIZE + filter.size().div_ceil(8)
}

/// Encode `filter` into the byte layout.
#[must_use]
pub fn encode<T: ?Sized>(filter: &SaltedBloomFilter<T>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(encoded_len(filter));

    bytes.extend_from_slice(&(filter.size() as u64).to_le_bytes());
    bytes.extend_from_slice(&(filter.expected_element_count() as u64).to_le_bytes());
    bytes.extend_from_slice(&(filter.hash_count() as u64).to_le_bytes());
    bytes.extend_from_slice(&filter.bits().to_bytes());

    bytes
}

/// Decode a filter using the shared MD5 engine and UTF-8.
///
/// # Errors
///
/// [`SaltBloomError::Decode`] if the input is truncated, has trailing bytes,
/// has a zero or oversized header field, or has bits set past `bit_count`.
pub fn decode<T: ?Sized>(bytes: &[u8]) -> Result<SaltedBloomFilter<T>> {
    decode_with(bytes, DigestEngine::shared(), TextEncoding::Utf8)
}

/// Decode a filter, hashing through `engine` with `encoding`.
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_with<T: ?Sized>(
    bytes: &[u8],
    engine: Arc<DigestEngine>,
    encoding: TextEncoding,
) -> Result<SaltedBloomFilter<T>> {
    if bytes.len() < HEADER_SIZE {
        return Err(SaltBloomError::decode(format!(
            "need at least {} header bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let bit_count = read_field(bytes, 0, "bit_count")?;
    let expected_elements = read_field(bytes, 8, "expected_elements")?;
    let hash_count = read_field(bytes, 16, "hash_count")?;

    let params = FilterParams::from_parts(bit_count, expected_elements, hash_count)
        .map_err(|e| SaltBloomError::decode(format!("invalid header: {}", e)))?;
    let bits = BitVec::from_bytes(&bytes[HEADER_SIZE..], bit_count)?;

    SaltedBloomFilter::from_bits(params, bits, engine, encoding)
}

fn read_field(bytes: &[u8], offset: usize, name: &str) -> Result<usize> {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[offset..offset + 8]);
    let value = u64::from_le_bytes(raw);
    usize::try_from(value)
        .map_err(|_| SaltBloomError::decode(format!("{} {} does not fit in usize", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::DigestAlgorithm;

    fn sample() -> SaltedBloomFilter<str> {
        let filter = SaltedBloomFilter::<str>::with_bit_count(100, 10).unwrap();
        filter.insert("apple");
        filter.insert("banana");
        filter
    }

    #[test]
    fn test_header_layout() {
        let bytes = encode(&sample());
        assert_eq!(&bytes[0..8], &100u64.to_le_bytes());
        assert_eq!(&bytes[8..16], &10u64.to_le_bytes());
        assert_eq!(&bytes[16..24], &7u64.to_le_bytes());
        assert_eq!(bytes.len(), HEADER_SIZE + 13);
    }

    #[test]
    fn test_bits_are_lsb_first() {
        let filter = SaltedBloomFilter::<str>::with_bit_count(16, 2).unwrap();
        filter.set_bit(0, true).unwrap();
        filter.set_bit(9, true).unwrap();
        let bytes = encode(&filter);
        assert_eq!(&bytes[HEADER_SIZE..], &[0b0000_0001, 0b0000_0010]);
    }

    #[test]
    fn test_round_trip_preserves_equality() {
        let filter = sample();
        let restored: SaltedBloomFilter<str> = decode(&encode(&filter)).unwrap();
        assert_eq!(restored, filter);
        assert!(restored.contains("apple"));
        assert!(restored.contains("banana"));
        assert_eq!(restored.count(), 0);
    }

    #[test]
    fn test_decode_with_engine() {
        let engine = Arc::new(DigestEngine::new(DigestAlgorithm::Sha256));
        let filter: SaltedBloomFilter<str> = SaltedBloomFilter::from_params(
            FilterParams::from_bit_count(256, 16).unwrap(),
            Arc::clone(&engine),
            TextEncoding::Latin1,
        )
        .unwrap();
        filter.insert("caf\u{e9}");

        let restored: SaltedBloomFilter<str> =
            decode_with(&encode(&filter), engine, TextEncoding::Latin1).unwrap();
        assert!(restored.contains("caf\u{e9}"));
        assert_eq!(restored.encoding(), TextEncoding::Latin1);
    }

    #[test]
    fn test_truncated_input() {
        let bytes = encode(&sample());
        assert!(matches!(
            decode::<str>(&bytes[..10]),
            Err(SaltBloomError::Decode { .. })
        ));
        assert!(matches!(
            decode::<str>(&bytes[..bytes.len() - 1]),
            Err(SaltBloomError::Decode { .. })
        ));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = encode(&sample());
        bytes.push(0);
        assert!(decode::<str>(&bytes).is_err());
    }

    #[test]
    fn test_zero_header_fields_rejected() {
        let mut bytes = encode(&sample());
        bytes[16..24].copy_from_slice(&0u64.to_le_bytes());
        assert!(matches!(decode::<str>(&bytes), Err(SaltBloomError::Decode { .. })));

        let mut bytes = encode(&sample());
        bytes[8..16].copy_from_slice(&0u64.to_le_bytes());
        assert!(matches!(decode::<str>(&bytes), Err(SaltBloomError::Decode { .. })));
    }

    #[test]
    fn test_padding_bits_rejected() {
        let mut bytes = encode(&sample());
        // 100 bits use 4 bits of the final byte
        let last = bytes.len() - 1;
        bytes[last] |= 0b1000_0000;
        assert!(matches!(decode::<str>(&bytes), Err(SaltBloomError::Decode { .. })));
    }

    #[test]
    fn test_encoded_len() {
        let filter = sample();
        assert_eq!(encoded_len(&filter), encode(&filter).len());
    }
}
