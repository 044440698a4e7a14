/// Encoding detection and decoding for source files opened read-only.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Text encodings a source file may arrive in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
    Ascii,
    /// A named encoding from `encoding_rs` (e.g., "windows-1252").
    Legacy(&'static str),
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utf8 => write!(f, "UTF-8"),
            Self::Utf8Bom => write!(f, "UTF-8 BOM"),
            Self::Utf16Le => write!(f, "UTF-16 LE"),
            Self::Utf16Be => write!(f, "UTF-16 BE"),
            Self::Ascii => write!(f, "ASCII"),
            Self::Legacy(name) => write!(f, "{name}"),
        }
    }
}

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Detects the encoding of raw file bytes.
///
/// A byte-order mark wins; otherwise valid UTF-8 is accepted as-is and
/// anything else is handed to `chardetng` for a best guess.
pub fn detect_encoding(bytes: &[u8]) -> TextEncoding {
    if bytes.starts_with(&UTF8_BOM) {
        return TextEncoding::Utf8Bom;
    }
    if bytes.starts_with(&UTF16_LE_BOM) {
        return TextEncoding::Utf16Le;
    }
    if bytes.starts_with(&UTF16_BE_BOM) {
        return TextEncoding::Utf16Be;
    }

    if std::str::from_utf8(bytes).is_ok() {
        if bytes.is_ascii() {
            return TextEncoding::Ascii;
        }
        return TextEncoding::Utf8;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    TextEncoding::Legacy(detector.guess(None, true).name())
}

/// Decodes raw bytes with the given encoding, stripping any byte-order mark.
///
/// Legacy encodings decode lossily: a viewer should still show a file with a
/// few malformed bytes, so replacement characters are logged, not rejected.
///
/// # Errors
///
/// Returns an error if UTF-8/UTF-16 content is malformed or the legacy
/// encoding label is unknown.
pub fn decode_bytes(bytes: &[u8], encoding: TextEncoding) -> Result<String> {
    match encoding {
        TextEncoding::Utf8 | TextEncoding::Ascii => {
            String::from_utf8(bytes.to_vec()).context("invalid UTF-8 content")
        }
        TextEncoding::Utf8Bom => {
            let content = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
            String::from_utf8(content.to_vec()).context("invalid UTF-8 BOM content")
        }
        TextEncoding::Utf16Le => {
            let content = bytes.strip_prefix(&UTF16_LE_BOM).unwrap_or(bytes);
            let units: Vec<u16> = content
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16(&units).context("invalid UTF-16 LE content")
        }
        TextEncoding::Utf16Be => {
            let content = bytes.strip_prefix(&UTF16_BE_BOM).unwrap_or(bytes);
            let units: Vec<u16> = content
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16(&units).context("invalid UTF-16 BE content")
        }
        TextEncoding::Legacy(name) => {
            let encoding = encoding_rs::Encoding::for_label(name.as_bytes())
                .with_context(|| format!("unknown encoding: {name}"))?;
            let (decoded, _, had_errors) = encoding.decode(bytes);
            if had_errors {
                tracing::warn!("malformed sequences replaced while decoding as {name}");
            }
            Ok(decoded.into_owned())
        }
    }
}
