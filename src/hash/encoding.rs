//! Text encodings used to turn an element's display text into digest input.
//!
//! Hash values, and therefore filter contents, depend on the exact bytes fed
//! to the digest. Fixing the encoding per filter keeps filters reproducible
//! across platforms. UTF-8 is the default.

use crate::error::{Result, SaltBloomError};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Byte encoding applied to text before hashing.
///
/// # Examples
///
/// ```
/// use saltbloom::hash::TextEncoding;
///
/// assert_eq!(&*TextEncoding::Utf8.encode("hé"), &[0x68, 0xC3, 0xA9]);
/// assert_eq!(&*TextEncoding::Latin1.encode("hé"), &[0x68, 0xE9]);
/// assert_eq!(&*TextEncoding::Utf16Be.encode("h"), &[0x00, 0x68]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    /// UTF-8, borrowed without copying.
    #[default]
    Utf8,
    /// UTF-16, big-endian code units, no byte order mark.
    Utf16Be,
    /// UTF-16, little-endian code units, no byte order mark.
    Utf16Le,
    /// ISO-8859-1. Characters above U+00FF become `?`.
    Latin1,
}

impl TextEncoding {
    /// Encode `text` into bytes.
    #[must_use]
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        match self {
            Self::Utf8 => Cow::Borrowed(text.as_bytes()),
            Self::Utf16Be => Cow::Owned(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Self::Utf16Le => Cow::Owned(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Self::Latin1 => Cow::Owned(
                text.chars()
                    .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                    .collect(),
            ),
        }
    }

    /// Canonical name of the encoding.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
            Self::Latin1 => "ISO-8859-1",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = SaltBloomError;

    /// Parse an encoding name, ignoring case and `-`/`_` separators.
    fn from_str(name: &str) -> Result<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        match normalized.as_str() {
            "UTF8" => Ok(Self::Utf8),
            "UTF16BE" => Ok(Self::Utf16Be),
            "UTF16LE" => Ok(Self::Utf16Le),
            "ISO88591" | "LATIN1" => Ok(Self::Latin1),
            _ => Err(SaltBloomError::invalid_parameters(format!(
                "unsupported text encoding '{}'",
                name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_borrows() {
        let encoded = TextEncoding::Utf8.encode("apple");
        assert!(matches!(encoded, Cow::Borrowed(_)));
        assert_eq!(&*encoded, b"apple");
    }

    #[test]
    fn test_utf16_surrogate_pairs() {
        // U+1F600 -> D83D DE00
        assert_eq!(
            &*TextEncoding::Utf16Be.encode("\u{1F600}"),
            &[0xD8, 0x3D, 0xDE, 0x00]
        );
        assert_eq!(
            &*TextEncoding::Utf16Le.encode("\u{1F600}"),
            &[0x3D, 0xD8, 0x00, 0xDE]
        );
    }

    #[test]
    fn test_latin1_replaces_unmappable() {
        assert_eq!(&*TextEncoding::Latin1.encode("a\u{20AC}\u{FF}"), &[b'a', b'?', 0xFF]);
    }

    #[test]
    fn test_from_str_accepts_common_spellings() {
        assert_eq!("utf-8".parse::<TextEncoding>(), Ok(TextEncoding::Utf8));
        assert_eq!("UTF_16LE".parse::<TextEncoding>(), Ok(TextEncoding::Utf16Le));
        assert_eq!("utf-16be".parse::<TextEncoding>(), Ok(TextEncoding::Utf16Be));
        assert_eq!("ISO-8859-1".parse::<TextEncoding>(), Ok(TextEncoding::Latin1));
        assert_eq!("latin1".parse::<TextEncoding>(), Ok(TextEncoding::Latin1));
        assert!("EBCDIC".parse::<TextEncoding>().is_err());
    }

    #[test]
    fn test_name_round_trips() {
        for enc in [
            TextEncoding::Utf8,
            TextEncoding::Utf16Be,
            TextEncoding::Utf16Le,
            TextEncoding::Latin1,
        ] {
            assert_eq!(enc.name().parse::<TextEncoding>(), Ok(enc));
            assert_eq!(enc.to_string(), enc.name());
        }
    }
}
