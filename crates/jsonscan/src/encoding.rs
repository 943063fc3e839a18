//! Decoding of raw input bytes into text.
//!
//! The caller states the encoding; nothing here sniffs it. A byte-order mark
//! that matches the stated encoding is skipped.

use alloc::{borrow::Cow, string::String};

use bstr::ByteSlice;

use crate::{
    error::{ErrorKind, ParseError},
    scanner::Scanner,
};

/// Text encodings accepted by [`decode`].
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// UTF-8. Valid input is borrowed, never copied.
    #[default]
    Utf8,
    /// UTF-16, little endian.
    Utf16Le,
    /// UTF-16, big endian.
    Utf16Be,
    /// 7-bit ASCII. Bytes above `0x7F` are rejected.
    Ascii,
    /// ISO-8859-1; every byte maps to the code point of the same value.
    Latin1,
}

impl Encoding {
    fn byte_order_mark(self) -> &'static [u8] {
        match self {
            Encoding::Utf8 => b"\xEF\xBB\xBF",
            Encoding::Utf16Le => b"\xFF\xFE",
            Encoding::Utf16Be => b"\xFE\xFF",
            Encoding::Ascii | Encoding::Latin1 => b"",
        }
    }
}

/// Decodes `bytes` as text in `encoding`.
///
/// # Errors
///
/// - [`ErrorKind::NothingToScan`] if `bytes` is empty (a lone byte-order mark
///   counts as empty).
/// - [`ErrorKind::CouldNotDecodeData`] at the byte offset of the first unit
///   that is invalid in `encoding`.
///
/// ```rust
/// use jsonscan::{Encoding, ErrorKind};
///
/// assert_eq!(jsonscan::decode(b"[1]", Encoding::Utf8).unwrap(), "[1]");
/// assert_eq!(jsonscan::decode(b"[\x001\x00]\x00", Encoding::Utf16Le).unwrap(), "[1]");
///
/// let err = jsonscan::decode(b"[\xFF]", Encoding::Utf8).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::CouldNotDecodeData);
/// assert_eq!(err.position(), 1);
/// ```
pub fn decode(bytes: &[u8], encoding: Encoding) -> Result<Cow<'_, str>, ParseError> {
    let bom = encoding.byte_order_mark();
    let offset = if !bom.is_empty() && bytes.starts_with(bom) {
        bom.len()
    } else {
        0
    };
    let body = &bytes[offset..];
    if body.is_empty() {
        return Err(ParseError::new(ErrorKind::NothingToScan, 0, 1, 1));
    }

    let decoded = match encoding {
        Encoding::Utf8 => body.to_str().map(Cow::Borrowed).map_err(|err| {
            let valid = &body[..err.valid_up_to()];
            // The prefix was just validated.
            let prefix = valid.to_str().unwrap_or_default();
            (err.valid_up_to(), String::from(prefix))
        }),
        Encoding::Utf16Le => decode_utf16(body, u16::from_le_bytes),
        Encoding::Utf16Be => decode_utf16(body, u16::from_be_bytes),
        Encoding::Ascii => match body.iter().position(|b| !b.is_ascii()) {
            // ASCII is a subset of UTF-8.
            None => Ok(Cow::Borrowed(body.to_str().unwrap_or_default())),
            Some(pos) => Err((pos, body[..pos].iter().map(|&b| char::from(b)).collect())),
        },
        Encoding::Latin1 => Ok(match body.to_str() {
            Ok(text) if body.is_ascii() => Cow::Borrowed(text),
            _ => Cow::Owned(body.iter().map(|&b| char::from(b)).collect()),
        }),
    };

    decoded.map_err(|(pos, prefix)| {
        let end = (pos + 4).min(body.len());
        tracing::debug!(
            ?encoding,
            position = offset + pos,
            bytes = ?body[pos..end].as_bstr(),
            "could not decode input"
        );
        let (line, column) = Scanner::new(&prefix).line_column(prefix.len());
        ParseError::new(ErrorKind::CouldNotDecodeData, offset + pos, line, column)
    })
}

/// Decodes UTF-16 code units; on failure returns the byte offset of the bad
/// unit together with the text decoded before it.
fn decode_utf16(
    body: &[u8],
    unit: fn([u8; 2]) -> u16,
) -> Result<Cow<'static, str>, (usize, String)> {
    let mut out = String::with_capacity(body.len() / 2);
    let mut units = body.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    let mut pos = 0;
    for decoded in char::decode_utf16(&mut units) {
        match decoded {
            Ok(c) => {
                out.push(c);
                pos += c.len_utf16() * 2;
            }
            Err(_) => return Err((pos, out)),
        }
    }
    if body.len() % 2 == 1 {
        return Err((body.len() - 1, out));
    }
    Ok(Cow::Owned(out))
}
