//! Digest-based hashing for salted Bloom filters.
//!
//! # Module Structure
//!
//! ```text
//! hash/
//! ├── digest.rs      - DigestEngine and DigestAlgorithm (MD5, SHA-256)
//! ├── encoding.rs    - TextEncoding used to turn text into digest input
//! └── mod.rs         - This file (public API)
//! ```
//!
//! # Salting
//!
//! A filter with `k` hash functions does not keep `k` independent hashers.
//! It runs the same digest `k` times, appending the decimal salt `0..k` to the
//! element text:
//!
//! ```text
//! h_i = fold32(digest(encode(text + i)))      position_i = h_i mod m
//! ```
//!
//! # Choosing an Algorithm
//!
//! | Algorithm  | Output | Notes                          |
//! |------------|--------|--------------------------------|
//! | `Md5`      | 16 B   | Default, shared engine         |
//! | `Sha256`   | 32 B   | Slower, same 32-bit fold       |
//!
//! Only the first four digest bytes are used either way, so the choice changes
//! which bits are set, not how well they spread.
//!
//! # Examples
//!
//! ```
//! use saltbloom::hash::{DigestEngine, TextEncoding};
//!
//! let engine = DigestEngine::shared();
//! let h0 = engine.hash_str_with("apple0", TextEncoding::Utf8);
//! let h1 = engine.hash_str_with("apple1", TextEncoding::Utf8);
//! assert_ne!(h0, h1);
//! ```

pub mod digest;
pub mod encoding;

pub use digest::{DigestAlgorithm, DigestEngine};
pub use encoding::TextEncoding;
