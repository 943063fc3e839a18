//! Decoding of `\uXXXX` escapes into UTF-16 code units and code points.
//!
//! [`UnicodeEscapeBuffer`] accumulates exactly four ASCII hexadecimal digits
//! (`0-9`, `A-F`, `a-f`) into a code unit. Code units in the surrogate range
//! are returned as-is; [`combine_surrogates`] joins a high and a low surrogate
//! into one `char`.

#[derive(Debug, Default)]
/// Accumulates four hexadecimal digits into one UTF-16 code unit.
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

/// A character that is not an ASCII hex digit was fed to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InvalidHexDigit(pub char);

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one hex digit.
    ///
    /// - Returns `Ok(None)` while fewer than four digits have been seen.
    /// - Returns `Ok(Some(unit))` on the fourth digit and resets the buffer.
    /// - Returns `Err` if `c` is not an ASCII hex digit; the buffer is reset.
    pub fn feed(&mut self, c: char) -> Result<Option<u16>, InvalidHexDigit> {
        let Some(d) = c.to_digit(16) else {
            *self = Self::new();
            return Err(InvalidHexDigit(c));
        };

        // A digit is at most 0xF, so it always fits.
        self.acc = (self.acc << 4) | u16::try_from(d).unwrap_or_default();
        self.len += 1;

        if self.len == 4 {
            let unit = self.acc;
            *self = Self::new();
            Ok(Some(unit))
        } else {
            Ok(None)
        }
    }
}

pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Joins a high and a low surrogate into a supplementary-plane `char`.
pub(crate) fn combine_surrogates(high: u16, low: u16) -> Option<char> {
    if !is_high_surrogate(high) || !is_low_surrogate(low) {
        return None;
    }
    let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(code)
}
