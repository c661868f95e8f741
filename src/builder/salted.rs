//! Builder for salted Bloom filters.
//!
//! # Type-State Pattern
//!
//! The builder only exposes `build()` once the filter is fully sized. There are
//! two sizing paths:
//!
//! ```text
//! Initial ─.expected_elements()─▶ WithElements ─.bit_count()──────────────▶ Complete ─.build()─▶ SaltedBloomFilter
//!                                      │                                       ▲
//!                                      └─.bits_per_element()─▶ WithDensity ─.hash_functions()─┘
//! ```
//!
//! `.digest()`, `.digest_by_name()`, `.engine()` and `.encoding()` are optional
//! and allowed in any state.
//!
//! # Examples
//!
//! ## Auto-tuned Hash Count
//!
//! ```
//! use saltbloom::builder::SaltedBloomFilterBuilder;
//! use saltbloom::SaltedBloomFilter;
//!
//! let filter: SaltedBloomFilter<str> = SaltedBloomFilterBuilder::new()
//!     .expected_elements(10)
//!     .bit_count(100)
//!     .build()
//!     .unwrap();
//! assert_eq!(filter.hash_count(), 7);
//! ```
//!
//! ## Full Configuration
//!
//! ```
//! use saltbloom::builder::SaltedBloomFilterBuilder;
//! use saltbloom::hash::{DigestAlgorithm, TextEncoding};
//! use saltbloom::SaltedBloomFilter;
//!
//! let filter: SaltedBloomFilter<str> = SaltedBloomFilterBuilder::new()
//!     .expected_elements(1_000)
//!     .bits_per_element(9.6)
//!     .hash_functions(7)
//!     .digest(DigestAlgorithm::Sha256)
//!     .encoding(TextEncoding::Utf16Le)
//!     .build()
//!     .unwrap();
//! assert_eq!(filter.size(), 9_600);
//! ```
//!
//! ## Deferred Errors
//!
//! ```
//! use saltbloom::builder::SaltedBloomFilterBuilder;
//! use saltbloom::{SaltBloomError, SaltedBloomFilter};
//!
//! let result: Result<SaltedBloomFilter<str>, _> = SaltedBloomFilterBuilder::new()
//!     .digest_by_name("WHIRLPOOL")
//!     .expected_elements(10)
//!     .bit_count(100)
//!     .build();
//!
//! assert!(matches!(result, Err(SaltBloomError::DigestUnavailable { .. })));
//! ```

#![allow(clippy::cast_precision_loss)]

use crate::core::params::FilterParams;
use crate::error::{Result, SaltBloomError};
use crate::filters::salted::SaltedBloomFilter;
use crate::hash::{DigestAlgorithm, DigestEngine, TextEncoding};
use std::marker::PhantomData;
use std::sync::Arc;

/// Type-state marker: nothing set.
pub struct Initial;

/// Type-state marker: expected element count set.
pub struct WithElements;

/// Type-state marker: bits per element set, hash count still missing.
pub struct WithDensity;

/// Type-state marker: ready to build.
pub struct Complete;

#[derive(Debug, Clone, Copy)]
enum Sizing {
    Unset,
    Density {
        bits_per_element: f64,
        hash_count: Option<usize>,
    },
    BitCount(usize),
}

/// Builder for [`SaltedBloomFilter`] with type-state guarantees.
///
/// Parameter values are validated in [`build`](SaltedBloomFilterBuilder::build);
/// the type states only guarantee that every required value was supplied.
pub struct SaltedBloomFilterBuilder<State> {
    expected_elements: usize,
    sizing: Sizing,
    digest: Result<DigestAlgorithm>,
    engine: Option<Arc<DigestEngine>>,
    encoding: TextEncoding,
    _state: PhantomData<State>,
}

impl SaltedBloomFilterBuilder<Initial> {
    /// Create a builder using MD5 and UTF-8.
    #[must_use]
    pub fn new() -> Self {
        Self {
            expected_elements: 0,
            sizing: Sizing::Unset,
            digest: Ok(DigestAlgorithm::Md5),
            engine: None,
            encoding: TextEncoding::Utf8,
            _state: PhantomData,
        }
    }

    /// Set the design capacity (n). Required.
    #[must_use]
    pub fn expected_elements(self, expected_elements: usize) -> SaltedBloomFilterBuilder<WithElements> {
        SaltedBloomFilterBuilder {
            expected_elements,
            ..self.transition()
        }
    }
}

impl Default for SaltedBloomFilterBuilder<Initial> {
    fn default() -> Self {
        Self::new()
    }
}

impl SaltedBloomFilterBuilder<WithElements> {
    /// Size the filter by bits per element; the hash count must follow.
    #[must_use]
    pub fn bits_per_element(self, bits_per_element: f64) -> SaltedBloomFilterBuilder<WithDensity> {
        SaltedBloomFilterBuilder {
            sizing: Sizing::Density {
                bits_per_element,
                hash_count: None,
            },
            ..self.transition()
        }
    }

    /// Size the filter by total bit count and derive the optimal hash count.
    #[must_use]
    pub fn bit_count(self, bit_count: usize) -> SaltedBloomFilterBuilder<Complete> {
        SaltedBloomFilterBuilder {
            sizing: Sizing::BitCount(bit_count),
            ..self.transition()
        }
    }
}

impl SaltedBloomFilterBuilder<WithDensity> {
    /// Set the number of hash functions (k).
    #[must_use]
    pub fn hash_functions(self, hash_count: usize) -> SaltedBloomFilterBuilder<Complete> {
        let sizing = match self.sizing {
            Sizing::Density {
                bits_per_element, ..
            } => Sizing::Density {
                bits_per_element,
                hash_count: Some(hash_count),
            },
            other => other,
        };
        SaltedBloomFilterBuilder {
            sizing,
            ..self.transition()
        }
    }
}

impl<State> SaltedBloomFilterBuilder<State> {
    fn transition<Next>(self) -> SaltedBloomFilterBuilder<Next> {
        SaltedBloomFilterBuilder {
            expected_elements: self.expected_elements,
            sizing: self.sizing,
            digest: self.digest,
            engine: self.engine,
            encoding: self.encoding,
            _state: PhantomData,
        }
    }

    /// Use a private engine running `algorithm`.
    ///
    /// MD5 filters share the process-wide engine unless an engine is supplied
    /// with [`engine`](Self::engine).
    #[must_use]
    pub fn digest(mut self, algorithm: DigestAlgorithm) -> Self {
        self.digest = Ok(algorithm);
        self.engine = None;
        self
    }

    /// Select the digest algorithm by name.
    ///
    /// An unknown name is reported by [`build`](SaltedBloomFilterBuilder::build)
    /// as [`SaltBloomError::DigestUnavailable`].
    #[must_use]
    pub fn digest_by_name(mut self, name: &str) -> Self {
        self.digest = DigestAlgorithm::from_name(name);
        self.engine = None;
        self
    }

    /// Hash through an existing engine, for example one shared by a group of
    /// filters on the same thread.
    #[must_use]
    pub fn engine(mut self, engine: Arc<DigestEngine>) -> Self {
        self.digest = Ok(engine.algorithm());
        self.engine = Some(engine);
        self
    }

    /// Text encoding applied to element text before hashing.
    #[must_use]
    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

impl SaltedBloomFilterBuilder<Complete> {
    fn resolve(self) -> Result<(FilterParams, Arc<DigestEngine>, TextEncoding)> {
        let algorithm = self.digest?;

        let params = match self.sizing {
            Sizing::Density {
                bits_per_element,
                hash_count: Some(hash_count),
            } => FilterParams::from_bits_per_element(
                bits_per_element,
                self.expected_elements,
                hash_count,
            )?,
            Sizing::BitCount(bit_count) => {
                FilterParams::from_bit_count(bit_count, self.expected_elements)?
            }
            Sizing::Unset | Sizing::Density { hash_count: None, .. } => {
                return Err(SaltBloomError::invalid_parameters("filter size not configured"));
            }
        };

        let engine = match self.engine {
            Some(engine) => engine,
            None if algorithm == DigestAlgorithm::Md5 => DigestEngine::shared(),
            None => Arc::new(DigestEngine::new(algorithm)),
        };

        Ok((params, engine, self.encoding))
    }

    /// Validate the configuration and build the filter.
    ///
    /// # Errors
    ///
    /// - [`SaltBloomError::DigestUnavailable`] if `digest_by_name` was given an
    ///   unknown name
    /// - Any parameter error from [`FilterParams`]
    pub fn build<T: ?Sized>(self) -> Result<SaltedBloomFilter<T>> {
        let (params, engine, encoding) = self.resolve()?;
        SaltedBloomFilter::from_params(params, engine, encoding)
    }

    /// Build the filter and report the resolved parameters.
    ///
    /// ```
    /// use saltbloom::builder::SaltedBloomFilterBuilder;
    /// use saltbloom::SaltedBloomFilter;
    ///
    /// let (filter, metadata): (SaltedBloomFilter<str>, _) = SaltedBloomFilterBuilder::new()
    ///     .expected_elements(1_000)
    ///     .bit_count(9_600)
    ///     .build_with_metadata()
    ///     .unwrap();
    ///
    /// assert_eq!(metadata.hash_count, filter.hash_count());
    /// assert_eq!(metadata.memory_bytes(), 1_200);
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_with_metadata<T: ?Sized>(self) -> Result<(SaltedBloomFilter<T>, FilterMetadata)> {
        let (params, engine, encoding) = self.resolve()?;

        let metadata = FilterMetadata {
            expected_elements: params.expected_elements(),
            bit_count: params.bit_count(),
            hash_count: params.hash_count(),
            bits_per_element: params.bits_per_element(),
            expected_fpp: params.false_positive_probability(params.expected_elements() as f64),
            algorithm: engine.algorithm(),
            encoding,
        };

        let filter = SaltedBloomFilter::from_params(params, engine, encoding)?;
        Ok((filter, metadata))
    }
}

/// Resolved parameters of a built filter.
#[derive(Debug, Clone)]
pub struct FilterMetadata {
    /// Design capacity (n)
    pub expected_elements: usize,
    /// Filter size in bits (m)
    pub bit_count: usize,
    /// Number of hash functions (k)
    pub hash_count: usize,
    /// Configured bits per element
    pub bits_per_element: f64,
    /// False positive probability at design capacity
    pub expected_fpp: f64,
    /// Digest algorithm
    pub algorithm: DigestAlgorithm,
    /// Text encoding
    pub encoding: TextEncoding,
}

impl FilterMetadata {
    /// Bytes needed to hold the bit array.
    #[must_use]
    pub fn memory_bytes(&self) -> usize {
        self.bit_count.div_ceil(8)
    }

    /// Same as [`memory_bytes`](Self::memory_bytes), in kilobytes.
    #[must_use]
    pub fn memory_kb(&self) -> f64 {
        self.memory_bytes() as f64 / 1024.0
    }
}
