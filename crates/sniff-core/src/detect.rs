//! Byte-order mark detection over the first few bytes of a stream.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::encoding::Encoding;
use crate::error::SniffError;

/// Maximum number of leading bytes the detector looks at.
pub const MAX_MARK_LEN: usize = 4;

/// A detected mark: the encoding it announces and how many bytes it spans.
///
/// The length is always the encoding's mark length. Deserializing a record
/// whose `len` disagrees with its `encoding` fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "repr::DetectionRepr", into = "repr::DetectionRepr")
)]
pub struct Detection {
    encoding: Encoding,
    len: usize,
}

#[allow(clippy::len_without_is_empty)]
impl Detection {
    pub const fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            len: encoding.mark_length(),
        }
    }

    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Number of leading bytes to skip before decoding.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Rebuild a detection from stored parts, checking the length.
    pub fn from_parts(encoding: Encoding, len: usize) -> Result<Self, SniffError> {
        let expected = encoding.mark_length();
        if len != expected {
            return Err(SniffError::MarkLength {
                encoding,
                expected,
                len,
            });
        }
        Ok(Self::new(encoding))
    }

    /// The bytes following the mark. Empty if `bytes` is shorter than the mark.
    pub fn strip<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        bytes.get(self.len..).unwrap_or_default()
    }
}

/// Classify a stream by its leading bytes.
///
/// Only the first [`MAX_MARK_LEN`] bytes are examined. Fewer than two bytes
/// never match. Bytes a rule needs but the prefix lacks never match, so a
/// truncated `FF FE` still reads as UTF-16LE while `FF FE 00 00` is UTF-32LE.
pub fn detect(prefix: &[u8]) -> Option<Detection> {
    if prefix.len() < 2 {
        return None;
    }
    let window = &prefix[..prefix.len().min(MAX_MARK_LEN)];

    // UTF-32LE shares its first two bytes with UTF-16LE and must win.
    let encoding = match window {
        [0x00, 0x00, 0xFE, 0xFF] => Encoding::Utf32Be,
        [0xFF, 0xFE, 0x00, 0x00] => Encoding::Utf32Le,
        [0xFE, 0xFF, ..] => Encoding::Utf16Be,
        [0xFF, 0xFE, ..] => Encoding::Utf16Le,
        [0xEF, 0xBB, 0xBF, ..] => Encoding::Utf8,
        _ => return None,
    };

    Some(Detection::new(encoding))
}

#[cfg(feature = "serde")]
mod repr {
    use serde::{Deserialize, Serialize};

    use super::Detection;
    use crate::encoding::Encoding;
    use crate::error::SniffError;

    #[derive(Serialize, Deserialize)]
    pub struct DetectionRepr {
        encoding: Encoding,
        len: usize,
    }

    impl From<Detection> for DetectionRepr {
        fn from(detection: Detection) -> Self {
            Self {
                encoding: detection.encoding,
                len: detection.len,
            }
        }
    }

    impl TryFrom<DetectionRepr> for Detection {
        type Error = SniffError;

        fn try_from(repr: DetectionRepr) -> Result<Self, Self::Error> {
            Detection::from_parts(repr.encoding, repr.len)
        }
    }
}

pub fn mark_length(encoding: Encoding) -> usize {
    encoding.mark_length()
}

/// Detect a mark and return it along with the bytes that follow it.
/// Without a mark the input is returned unchanged.
pub fn strip_bom(bytes: &[u8]) -> (Option<Detection>, &[u8]) {
    match detect(bytes) {
        Some(detection) => (Some(detection), detection.strip(bytes)),
        None => (None, bytes),
    }
}
