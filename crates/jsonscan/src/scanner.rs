//! Character cursor over decoded text.
//!
//! [`Scanner`] knows nothing about JSON. It offers the primitives the JSON
//! scanner is built on: peek and advance by `char`, literal matching,
//! skipping runs of characters, and bookmarking via [`position`] / [`seek`].
//!
//! Positions are byte offsets into the text and always fall on a `char`
//! boundary.
//!
//! [`position`]: Scanner::position
//! [`seek`]: Scanner::seek

/// A cursor over a borrowed `str`.
///
/// ```rust
/// use jsonscan::Scanner;
///
/// let mut s = Scanner::new("  true,");
/// s.skip_whitespace();
/// let mark = s.position();
/// assert!(s.match_literal("true"));
/// assert_eq!(s.peek(), Some(','));
/// s.seek(mark);
/// assert_eq!(s.peek(), Some('t'));
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the start of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// The full text being scanned.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The text from the cursor to the end.
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// The current byte offset.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor to `pos`, clamped to the end of the text.
    ///
    /// `pos` must be a position previously returned by
    /// [`position`](Self::position); offsets inside a UTF-8 sequence are
    /// rounded down to the start of that character.
    pub fn seek(&mut self, pos: usize) {
        self.pos = self.floor_char_boundary(pos);
    }

    /// Whether the cursor has reached the end of the text.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The character under the cursor.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consumes and returns the character under the cursor.
    #[inline]
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes `c` if it is the character under the cursor.
    #[inline]
    pub fn scan_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes `literal` if the text at the cursor starts with it. The cursor
    /// does not move on a mismatch.
    pub fn match_literal(&mut self, literal: &str) -> bool {
        if self.remaining().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Consumes characters while `pred` holds and returns how many bytes were
    /// skipped.
    pub fn skip_while(&mut self, mut pred: impl FnMut(char) -> bool) -> usize {
        let start = self.pos;
        let skipped = self
            .remaining()
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.text.len() - start, |(i, _)| i);
        self.pos += skipped;
        skipped
    }

    /// Skips JSON whitespace: space, horizontal tab, line feed and carriage
    /// return.
    pub fn skip_whitespace(&mut self) {
        self.skip_while(is_json_whitespace);
    }

    /// 1-based line and character column of the byte offset `pos`.
    #[must_use]
    pub fn line_column(&self, pos: usize) -> (usize, usize) {
        let pos = self.floor_char_boundary(pos);
        let before = &self.text[..pos];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line = before.matches('\n').count() + 1;
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }

    /// Like [`line_column`](Self::line_column), given the known location of a
    /// later position `anchor`.
    ///
    /// Only the text between `pos` and `anchor` is scanned, plus the start of
    /// `pos`'s line when a newline lies in between.
    #[must_use]
    pub fn line_column_before(
        &self,
        pos: usize,
        anchor: usize,
        (line, column): (usize, usize),
    ) -> (usize, usize) {
        let pos = self.floor_char_boundary(pos);
        let anchor = self.floor_char_boundary(anchor);
        if anchor < pos {
            return self.line_column(pos);
        }
        let between = &self.text[pos..anchor];
        let newlines = between.matches('\n').count();
        if newlines == 0 {
            return (line, column.saturating_sub(between.chars().count()));
        }
        let before = &self.text[..pos];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        (line - newlines, before[line_start..].chars().count() + 1)
    }

    fn floor_char_boundary(&self, pos: usize) -> usize {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}

/// The four whitespace characters of RFC 8259.
#[inline]
pub(crate) fn is_json_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use quickcheck_macros::quickcheck;

    use super::*;

    #[quickcheck]
    #[allow(clippy::needless_pass_by_value)]
    fn line_column_before_agrees_with_full_scan(text: String, a: usize, b: usize) -> bool {
        let s = Scanner::new(&text);
        let len = text.len() + 1;
        let (pos, anchor) = ((a % len).min(b % len), (a % len).max(b % len));
        s.line_column_before(pos, anchor, s.line_column(anchor)) == s.line_column(pos)
    }

    #[quickcheck]
    #[allow(clippy::needless_pass_by_value)]
    fn seek_always_lands_on_a_boundary(text: String, pos: usize) -> bool {
        let mut s = Scanner::new(&text);
        s.seek(pos);
        let (line, column) = s.line_column(pos);
        text.is_char_boundary(s.position()) && s.position() <= text.len() && line >= 1 && column >= 1
    }

    #[test]
    fn peek_and_advance_multibyte() {
        let mut s = Scanner::new("é😀x");
        assert_eq!(s.advance(), Some('é'));
        assert_eq!(s.position(), 2);
        assert_eq!(s.advance(), Some('😀'));
        assert_eq!(s.position(), 6);
        assert_eq!(s.peek(), Some('x'));
        assert_eq!(s.advance(), Some('x'));
        assert!(s.is_at_end());
        assert_eq!(s.advance(), None);
        assert_eq!(s.peek(), None);
    }

    #[test]
    fn match_literal_leaves_cursor_on_mismatch() {
        let mut s = Scanner::new("nul");
        assert!(!s.match_literal("null"));
        assert_eq!(s.position(), 0);
        assert!(s.match_literal("nu"));
        assert_eq!(s.remaining(), "l");
    }

    #[test]
    fn skip_while_counts_bytes() {
        let mut s = Scanner::new("12345,");
        assert_eq!(s.skip_while(|c| c.is_ascii_digit()), 5);
        assert_eq!(s.peek(), Some(','));

        let mut s = Scanner::new("999");
        assert_eq!(s.skip_while(|c| c.is_ascii_digit()), 3);
        assert!(s.is_at_end());
    }

    #[test]
    fn skip_whitespace_is_json_only() {
        let mut s = Scanner::new(" \t\r\n\u{a0}x");
        s.skip_whitespace();
        assert_eq!(s.peek(), Some('\u{a0}'));
    }

    #[test]
    fn seek_clamps_and_rounds_to_boundary() {
        let mut s = Scanner::new("aé");
        s.seek(100);
        assert!(s.is_at_end());
        s.seek(2);
        assert_eq!(s.position(), 1);
        assert_eq!(s.peek(), Some('é'));
    }

    #[test]
    fn line_column_counts_characters() {
        let s = Scanner::new("[\n  \"é\",\n  x]");
        assert_eq!(s.line_column(0), (1, 1));
        assert_eq!(s.line_column(2), (2, 1));
        let x = s.text().find('x').unwrap();
        assert_eq!(s.line_column(x), (3, 3));
        let after_e = s.text().find('é').unwrap() + 'é'.len_utf8();
        assert_eq!(s.line_column(after_e), (2, 5));
    }
}
