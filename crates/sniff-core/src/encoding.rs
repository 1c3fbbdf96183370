//! The closed set of Unicode encodings that carry a standardized byte-order mark.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SniffError;

/// An encoding recognized by its byte-order mark.
///
/// Serializes as its canonical label and deserializes through [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "&'static str"))]
pub enum Encoding {
    Utf8,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
}

impl Encoding {
    /// All encodings, in the order the detector tries them.
    pub const ALL: [Encoding; 5] = [
        Encoding::Utf32Be,
        Encoding::Utf32Le,
        Encoding::Utf16Be,
        Encoding::Utf16Le,
        Encoding::Utf8,
    ];

    /// The literal mark bytes that open a stream in this encoding.
    pub const fn mark(self) -> &'static [u8] {
        match self {
            Encoding::Utf8 => &[0xEF, 0xBB, 0xBF],
            Encoding::Utf16Be => &[0xFE, 0xFF],
            Encoding::Utf16Le => &[0xFF, 0xFE],
            Encoding::Utf32Be => &[0x00, 0x00, 0xFE, 0xFF],
            Encoding::Utf32Le => &[0xFF, 0xFE, 0x00, 0x00],
        }
    }

    /// Number of leading bytes taken by the mark.
    pub const fn mark_length(self) -> usize {
        match self {
            Encoding::Utf8 => 3,
            Encoding::Utf16Be | Encoding::Utf16Le => 2,
            Encoding::Utf32Be | Encoding::Utf32Le => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf16Be => "UTF-16BE",
            Encoding::Utf16Le => "UTF-16LE",
            Encoding::Utf32Be => "UTF-32BE",
            Encoding::Utf32Le => "UTF-32LE",
        }
    }

    /// The matching `encoding_rs` codec. `encoding_rs` has no UTF-32 support,
    /// so both UTF-32 variants map to `None`.
    pub fn to_encoding_rs(self) -> Option<&'static encoding_rs::Encoding> {
        match self {
            Encoding::Utf8 => Some(encoding_rs::UTF_8),
            Encoding::Utf16Be => Some(encoding_rs::UTF_16BE),
            Encoding::Utf16Le => Some(encoding_rs::UTF_16LE),
            Encoding::Utf32Be | Encoding::Utf32Le => None,
        }
    }

    pub fn from_encoding_rs(encoding: &'static encoding_rs::Encoding) -> Option<Self> {
        if encoding == encoding_rs::UTF_8 {
            Some(Encoding::Utf8)
        } else if encoding == encoding_rs::UTF_16BE {
            Some(Encoding::Utf16Be)
        } else if encoding == encoding_rs::UTF_16LE {
            Some(Encoding::Utf16Le)
        } else {
            None
        }
    }
}

/// Mark length for an encoding given by label.
///
/// Accepts the labels `FromStr` understands plus any WHATWG label `encoding_rs`
/// resolves to UTF-8 or UTF-16. Returns `None` for every other encoding.
pub fn mark_length_for_label(label: &str) -> Option<usize> {
    label
        .parse::<Encoding>()
        .ok()
        .or_else(|| {
            encoding_rs::Encoding::for_label(label.trim().as_bytes())
                .and_then(Encoding::from_encoding_rs)
        })
        .map(Encoding::mark_length)
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Encoding> for &'static str {
    fn from(encoding: Encoding) -> Self {
        encoding.name()
    }
}

impl TryFrom<String> for Encoding {
    type Error = SniffError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

impl FromStr for Encoding {
    type Err = SniffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "utf8" => Ok(Encoding::Utf8),
            "utf16be" => Ok(Encoding::Utf16Be),
            "utf16le" => Ok(Encoding::Utf16Le),
            "utf32be" => Ok(Encoding::Utf32Be),
            "utf32le" => Ok(Encoding::Utf32Le),
            _ => Err(SniffError::UnknownEncoding(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_matches_length() {
        for encoding in Encoding::ALL {
            assert_eq!(encoding.mark().len(), encoding.mark_length());
        }
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("utf16le".parse::<Encoding>().unwrap(), Encoding::Utf16Le);
        assert_eq!("Utf_32_BE".parse::<Encoding>().unwrap(), Encoding::Utf32Be);
        assert!(matches!(
            "latin1".parse::<Encoding>(),
            Err(SniffError::UnknownEncoding(label)) if label == "latin1"
        ));
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for encoding in Encoding::ALL {
            assert_eq!(encoding.to_string().parse::<Encoding>().unwrap(), encoding);
        }
    }

    #[test]
    fn test_encoding_rs_mapping() {
        assert_eq!(Encoding::Utf8.to_encoding_rs(), Some(encoding_rs::UTF_8));
        assert_eq!(Encoding::Utf16Be.to_encoding_rs(), Some(encoding_rs::UTF_16BE));
        assert_eq!(Encoding::Utf32Le.to_encoding_rs(), None);
        assert_eq!(
            Encoding::from_encoding_rs(encoding_rs::UTF_16LE),
            Some(Encoding::Utf16Le)
        );
        assert_eq!(Encoding::from_encoding_rs(encoding_rs::WINDOWS_1252), None);
    }

    #[test]
    fn test_mark_length_for_label() {
        assert_eq!(mark_length_for_label("UTF-32LE"), Some(4));
        assert_eq!(mark_length_for_label("utf-16be"), Some(2));
        assert_eq!(mark_length_for_label("unicode-1-1-utf-8"), Some(3));
        assert_eq!(mark_length_for_label("windows-1252"), None);
        assert_eq!(mark_length_for_label("shift_jis"), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Encoding::Utf16Le).unwrap();
        assert_eq!(json, "\"UTF-16LE\"");
        let back: Encoding = serde_json::from_str("\"UTF-32BE\"").unwrap();
        assert_eq!(back, Encoding::Utf32Be);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_accepts_parse_labels() {
        for (label, expected) in [
            ("\"utf-16le\"", Encoding::Utf16Le),
            ("\"utf8\"", Encoding::Utf8),
            ("\"Utf_32_Be\"", Encoding::Utf32Be),
        ] {
            assert_eq!(serde_json::from_str::<Encoding>(label).unwrap(), expected);
        }
        let err = serde_json::from_str::<Encoding>("\"latin1\"").unwrap_err();
        assert!(err.to_string().contains("Unknown encoding label: latin1"));
    }
}
