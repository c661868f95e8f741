//! Cryptographic digest engine folded down to 32-bit hash values.
//!
//! Every filter position starts life here: the element text is digested and the
//! first four output bytes are folded big-endian into a `u32`.
//!
//! # Thread Safety
//!
//! An engine owns a single digest state behind a [`parking_lot::Mutex`]. Every
//! call locks, feeds the input, finalizes and resets the state before
//! unlocking, so concurrent callers never interleave their input. Callers that
//! see contention on [`DigestEngine::shared`] can build a private engine per
//! thread or per filter instead.

use crate::error::{Result, SaltBloomError};
use md5::digest::FixedOutputReset;
use md5::{Digest, Md5};
use parking_lot::Mutex;
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use super::encoding::TextEncoding;

/// Digest algorithms an engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DigestAlgorithm {
    /// MD5 (RFC 1321). The default.
    #[default]
    Md5,
    /// SHA-256 (FIPS 180-4).
    Sha256,
}

impl DigestAlgorithm {
    /// Resolve an algorithm by name.
    ///
    /// Matching ignores ASCII case and `-`/`_` separators, so `"sha-256"`,
    /// `"SHA256"` and `"Sha_256"` all resolve to [`DigestAlgorithm::Sha256`].
    ///
    /// # Errors
    ///
    /// [`SaltBloomError::DigestUnavailable`] if no algorithm has that name.
    ///
    /// # Examples
    ///
    /// ```
    /// use saltbloom::hash::DigestAlgorithm;
    ///
    /// assert_eq!(DigestAlgorithm::from_name("md5").unwrap(), DigestAlgorithm::Md5);
    /// assert_eq!(DigestAlgorithm::from_name("SHA-256").unwrap(), DigestAlgorithm::Sha256);
    /// assert!(DigestAlgorithm::from_name("WHIRLPOOL").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        match normalized.as_str() {
            "MD5" => Ok(Self::Md5),
            "SHA256" => Ok(Self::Sha256),
            _ => Err(SaltBloomError::digest_unavailable(name)),
        }
    }

    /// Canonical name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha256 => "SHA-256",
        }
    }

    /// Digest output length in bytes.
    #[must_use]
    pub const fn output_len(&self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha256 => 32,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = SaltBloomError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

enum DigestState {
    Md5(Md5),
    Sha256(Sha256),
}

impl DigestState {
    fn new(algorithm: DigestAlgorithm) -> Self {
        match algorithm {
            DigestAlgorithm::Md5 => Self::Md5(Md5::new()),
            DigestAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
        }
    }

    /// Digest `data`, leaving the state ready for the next input.
    fn digest_u32(&mut self, data: &[u8]) -> u32 {
        match self {
            Self::Md5(hasher) => run(hasher, data),
            Self::Sha256(hasher) => run(hasher, data),
        }
    }
}

fn run<D: Digest + FixedOutputReset>(hasher: &mut D, data: &[u8]) -> u32 {
    Digest::update(hasher, data);
    fold_prefix(&hasher.finalize_reset())
}

/// `result = (result << 8) | byte` over the first four digest bytes.
#[inline]
fn fold_prefix(digest: &[u8]) -> u32 {
    digest
        .iter()
        .take(4)
        .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte))
}

/// Thread-safe digest engine producing 32-bit hash values.
///
/// # Examples
///
/// ```
/// use saltbloom::hash::{DigestAlgorithm, DigestEngine};
///
/// let engine = DigestEngine::new(DigestAlgorithm::Md5);
/// // MD5("") = d41d8cd98f00b204e9800998ecf8427e
/// assert_eq!(engine.hash(b""), 0xd41d_8cd9);
/// assert_eq!(engine.hash_str("abc"), engine.hash(b"abc"));
/// ```
pub struct DigestEngine {
    algorithm: DigestAlgorithm,
    state: Mutex<DigestState>,
}

impl DigestEngine {
    /// Create an engine for `algorithm`.
    #[must_use]
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        #[cfg(feature = "trace")]
        tracing::debug!(algorithm = algorithm.name(), "creating digest engine");

        Self {
            algorithm,
            state: Mutex::new(DigestState::new(algorithm)),
        }
    }

    /// Create an engine for the algorithm called `name`.
    ///
    /// # Errors
    ///
    /// [`SaltBloomError::DigestUnavailable`] if the name is not recognized.
    /// No engine is created in that case.
    pub fn from_name(name: &str) -> Result<Self> {
        DigestAlgorithm::from_name(name).map(Self::new)
    }

    /// Process-wide MD5 engine, created on first use.
    ///
    /// All filters built without an explicit engine share this instance and
    /// therefore its lock.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<DigestEngine>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::new(DigestAlgorithm::Md5))))
    }

    /// Algorithm this engine runs.
    #[must_use]
    #[inline]
    pub const fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Digest `bytes` and fold the first four output bytes into a `u32`.
    #[must_use]
    pub fn hash(&self, bytes: &[u8]) -> u32 {
        self.state.lock().digest_u32(bytes)
    }

    /// Hash the UTF-8 bytes of `text`.
    #[must_use]
    #[inline]
    pub fn hash_str(&self, text: &str) -> u32 {
        self.hash(text.as_bytes())
    }

    /// Hash `text` after converting it with `encoding`.
    #[must_use]
    pub fn hash_str_with(&self, text: &str, encoding: TextEncoding) -> u32 {
        self.hash(&encoding.encode(text))
    }
}

impl Default for DigestEngine {
    fn default() -> Self {
        Self::new(DigestAlgorithm::default())
    }
}

impl fmt::Debug for DigestEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestEngine")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
