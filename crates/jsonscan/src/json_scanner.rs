//! The recursive-descent JSON scanner.
//!
//! [`JsonScanner`] drives a [`Scanner`] through one JSON value. Each grammar
//! rule has its own scan method; composite rules recurse through
//! [`JsonScanner::scan_json_value`]. The first violation aborts the scan:
//! errors from nested rules are wrapped by the enclosing container and
//! returned, never recovered from.
//!
//! # Examples
//!
//! ```rust
//! use jsonscan::{JsonScanner, ScannerOptions, Value};
//!
//! let options = ScannerOptions::default();
//! let mut scanner = JsonScanner::new(r#"  ["a", -0.5e10] tail"#, &options);
//! let value = scanner.scan_json_value().unwrap();
//! assert_eq!(
//!     value,
//!     Value::Array(vec![Value::String("a".into()), Value::Number(-0.5e10)])
//! );
//! assert_eq!(scanner.position(), 16);
//! ```

use alloc::string::String;

use crate::{
    encoding,
    error::{ErrorKind, ParseError},
    escape_buffer::{UnicodeEscapeBuffer, combine_surrogates, is_high_surrogate, is_low_surrogate},
    options::ScannerOptions,
    scanner::Scanner,
    value::{Array, Map, Value},
};

/// Parses exactly one JSON document from `text`.
///
/// Leading and trailing whitespace is allowed. Text after the value is an
/// error unless [`ScannerOptions::allow_trailing_content`] is set.
///
/// # Errors
///
/// [`ErrorKind::NothingToScan`] for empty or whitespace-only text,
/// [`ErrorKind::TrailingContent`] for text after the value, or whatever
/// [`JsonScanner::scan_json_value`] reports.
///
/// ```rust
/// use jsonscan::{ErrorKind, ScannerOptions};
///
/// let options = ScannerOptions::default();
/// assert!(jsonscan::from_str("{}", &options).unwrap().is_object());
/// assert_eq!(
///     jsonscan::from_str("1 2", &options).unwrap_err().kind(),
///     ErrorKind::TrailingContent
/// );
/// ```
pub fn from_str(text: &str, options: &ScannerOptions) -> Result<Value, ParseError> {
    let mut scanner = JsonScanner::new(text, options);
    scanner.scan_document().inspect_err(|err| {
        tracing::debug!(
            kind = ?err.kind(),
            position = err.position(),
            line = err.line(),
            column = err.column(),
            "JSON scan failed"
        );
    })
}

/// Decodes `bytes` with [`ScannerOptions::allowed_encoding`] and parses one
/// JSON document from the text.
///
/// # Errors
///
/// [`ErrorKind::NothingToScan`] for an empty buffer,
/// [`ErrorKind::CouldNotDecodeData`] for bytes invalid in the encoding, or
/// anything [`from_str`] reports.
pub fn from_slice(bytes: &[u8], options: &ScannerOptions) -> Result<Value, ParseError> {
    let text = encoding::decode(bytes, options.allowed_encoding)?;
    from_str(&text, options)
}

/// A JSON scanner over decoded text.
///
/// Every `scan_*` method either consumes one complete grammar element and
/// returns it, or leaves the cursor where the method started and returns the
/// error.
#[derive(Debug, Clone)]
pub struct JsonScanner<'a> {
    scanner: Scanner<'a>,
    options: &'a ScannerOptions,
    depth: usize,
}

impl<'a> JsonScanner<'a> {
    /// Creates a scanner at the start of `text`.
    #[must_use]
    pub fn new(text: &'a str, options: &'a ScannerOptions) -> Self {
        Self {
            scanner: Scanner::new(text),
            options,
            depth: 0,
        }
    }

    /// The options this scanner was built with.
    #[must_use]
    pub fn options(&self) -> &'a ScannerOptions {
        self.options
    }

    /// The current byte offset into the text.
    #[must_use]
    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Whether only whitespace remains after the cursor.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.scanner.remaining().trim_start_matches([' ', '\t', '\n', '\r']).is_empty()
    }

    /// Scans one JSON value of any type, skipping leading whitespace.
    ///
    /// `null` produces a clone of [`ScannerOptions::null_value`].
    ///
    /// # Errors
    ///
    /// [`ErrorKind::ObjectInvalidStartCharacter`] if no value starts at the
    /// first non-whitespace character, [`ErrorKind::DepthLimitExceeded`] when
    /// containers nest deeper than [`ScannerOptions::max_depth`], or the error
    /// of the scanner the value dispatched to. The depth error is never
    /// wrapped by the enclosing containers.
    pub fn scan_json_value(&mut self) -> Result<Value, ParseError> {
        tracing::trace!(position = self.position(), "scan value");
        self.restoring(Self::value)
    }

    /// Scans an object starting at `{`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::DictionaryStartCharacterMissing`],
    /// [`ErrorKind::DictionaryKeyScanFailed`],
    /// [`ErrorKind::DictionaryKeyNotTerminated`],
    /// [`ErrorKind::DictionaryKeyValuePairNoDelimiter`],
    /// [`ErrorKind::DictionaryValueScanFailed`],
    /// [`ErrorKind::DictionaryNotTerminated`] or
    /// [`ErrorKind::DepthLimitExceeded`].
    pub fn scan_json_dictionary(&mut self) -> Result<Map, ParseError> {
        tracing::trace!(position = self.position(), "scan dictionary");
        self.restoring(Self::dictionary)
    }

    /// Scans an array starting at `[`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::ArrayStartCharacterMissing`],
    /// [`ErrorKind::ArrayValueScanFailed`], [`ErrorKind::ArrayValueIsNull`],
    /// [`ErrorKind::ArrayNotTerminated`] or
    /// [`ErrorKind::DepthLimitExceeded`].
    pub fn scan_json_array(&mut self) -> Result<Array, ParseError> {
        tracing::trace!(position = self.position(), "scan array");
        self.restoring(Self::array)
    }

    /// Scans a string starting at its opening quote and decodes its escapes.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::StringNotStartedWithBackslash`] if the cursor is not on a
    /// quote or a backslash ends the input, [`ErrorKind::StringNotTerminated`],
    /// [`ErrorKind::StringUnicodeNotDecoded`] or
    /// [`ErrorKind::StringUnknownEscapeCode`].
    pub fn scan_json_string_constant(&mut self) -> Result<String, ParseError> {
        tracing::trace!(position = self.position(), "scan string");
        self.restoring(Self::string)
    }

    /// Scans a number.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::NumberNotScannable`] where the number grammar requires a
    /// digit and none is present.
    pub fn scan_json_number_constant(&mut self) -> Result<f64, ParseError> {
        tracing::trace!(position = self.position(), "scan number");
        self.restoring(Self::number)
    }

    fn scan_document(&mut self) -> Result<Value, ParseError> {
        self.scanner.skip_whitespace();
        if self.scanner.is_at_end() {
            return Err(self.error_at(ErrorKind::NothingToScan, self.position()));
        }
        let value = self.scan_json_value()?;
        if !self.options.allow_trailing_content {
            self.scanner.skip_whitespace();
            if !self.scanner.is_at_end() {
                return Err(self.error_at(ErrorKind::TrailingContent, self.position()));
            }
        }
        Ok(value)
    }

    /// Runs `scan` and rewinds the cursor if it fails.
    fn restoring<T>(
        &mut self,
        scan: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let start = self.scanner.position();
        let result = scan(self);
        if result.is_err() {
            self.scanner.seek(start);
        }
        result
    }

    fn error_at(&self, kind: ErrorKind, position: usize) -> ParseError {
        let (line, column) = self.scanner.line_column(position);
        ParseError::new(kind, position, line, column)
    }

    /// Wraps the failure of a nested scan that started at `position`.
    ///
    /// A depth-limit failure passes through unwrapped. The wrapper's location
    /// is derived from the cause's, so each level only rescans the text
    /// between the two positions.
    fn wrap(&self, kind: ErrorKind, position: usize, cause: ParseError) -> ParseError {
        if cause.kind() == ErrorKind::DepthLimitExceeded {
            return cause;
        }
        let (line, column) = self.scanner.line_column_before(
            position,
            cause.position(),
            (cause.line(), cause.column()),
        );
        ParseError::new(kind, position, line, column).with_cause(cause)
    }

    // ------------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------------

    fn value(&mut self) -> Result<Value, ParseError> {
        self.scanner.skip_whitespace();
        let start = self.scanner.position();
        match self.scanner.peek() {
            Some('{') => self.dictionary().map(Value::Object),
            Some('[') => self.array().map(Value::Array),
            Some('"') => self.string().map(Value::String),
            Some('t') if self.scanner.match_literal("true") => Ok(Value::Boolean(true)),
            Some('f') if self.scanner.match_literal("false") => Ok(Value::Boolean(false)),
            Some('n') if self.scanner.match_literal("null") => Ok(self.options.null_value.clone()),
            Some(c) if c == '-' || c.is_ascii_digit() => self.number().map(Value::Number),
            _ => Err(self.error_at(ErrorKind::ObjectInvalidStartCharacter, start)),
        }
    }

    fn enter_container(&mut self, start: usize) -> Result<(), ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(self.error_at(ErrorKind::DepthLimitExceeded, start));
        }
        self.depth += 1;
        tracing::trace!(depth = self.depth, position = start, "enter container");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Objects
    // ------------------------------------------------------------------------

    fn dictionary(&mut self) -> Result<Map, ParseError> {
        let start = self.scanner.position();
        if !self.scanner.scan_char('{') {
            return Err(self.error_at(ErrorKind::DictionaryStartCharacterMissing, start));
        }
        self.enter_container(start)?;
        let members = self.dictionary_members();
        self.depth -= 1;
        members
    }

    fn dictionary_members(&mut self) -> Result<Map, ParseError> {
        let mut map = Map::default();
        loop {
            self.scanner.skip_whitespace();
            if self.scanner.scan_char('}') {
                return Ok(map);
            }

            let key_start = self.scanner.position();
            let key = self.string().map_err(|cause| {
                let kind = if cause.kind() == ErrorKind::StringNotTerminated {
                    ErrorKind::DictionaryKeyNotTerminated
                } else {
                    ErrorKind::DictionaryKeyScanFailed
                };
                self.wrap(kind, key_start, cause)
            })?;

            self.scanner.skip_whitespace();
            let delimiter = self.scanner.position();
            if !self.scanner.scan_char(':') {
                return Err(self.error_at(ErrorKind::DictionaryKeyValuePairNoDelimiter, delimiter));
            }

            self.scanner.skip_whitespace();
            let value_start = self.scanner.position();
            let value = self
                .value()
                .map_err(|cause| self.wrap(ErrorKind::DictionaryValueScanFailed, value_start, cause))?;
            map.insert(key, value);

            self.scanner.skip_whitespace();
            let terminator = self.scanner.position();
            if self.scanner.scan_char(',') {
                continue;
            }
            if self.scanner.scan_char('}') {
                return Ok(map);
            }
            return Err(self.error_at(ErrorKind::DictionaryNotTerminated, terminator));
        }
    }

    // ------------------------------------------------------------------------
    // Arrays
    // ------------------------------------------------------------------------

    fn array(&mut self) -> Result<Array, ParseError> {
        let start = self.scanner.position();
        if !self.scanner.scan_char('[') {
            return Err(self.error_at(ErrorKind::ArrayStartCharacterMissing, start));
        }
        self.enter_container(start)?;
        let elements = self.array_elements();
        self.depth -= 1;
        elements
    }

    fn array_elements(&mut self) -> Result<Array, ParseError> {
        let mut array = Array::new();
        loop {
            self.scanner.skip_whitespace();
            if self.scanner.scan_char(']') {
                return Ok(array);
            }

            let element = self.scanner.position();
            if !self.scanner.peek().is_some_and(can_start_value) {
                return Err(self.error_at(ErrorKind::ArrayNotTerminated, element));
            }

            let is_null = self.scanner.remaining().starts_with("null");
            let value = self
                .value()
                .map_err(|cause| self.wrap(ErrorKind::ArrayValueScanFailed, element, cause))?;
            if is_null && self.options.reject_null_array_elements {
                return Err(self.error_at(ErrorKind::ArrayValueIsNull, element));
            }
            array.push(value);

            self.scanner.skip_whitespace();
            let terminator = self.scanner.position();
            if self.scanner.scan_char(',') {
                continue;
            }
            if self.scanner.scan_char(']') {
                return Ok(array);
            }
            return Err(self.error_at(ErrorKind::ArrayNotTerminated, terminator));
        }
    }

    // ------------------------------------------------------------------------
    // Strings
    // ------------------------------------------------------------------------

    fn string(&mut self) -> Result<String, ParseError> {
        let start = self.scanner.position();
        if !self.scanner.scan_char('"') {
            return Err(self.error_at(ErrorKind::StringNotStartedWithBackslash, start));
        }

        let mut out = String::new();
        loop {
            let run = self.scanner.position();
            let len = self.scanner.skip_while(|c| c != '"' && c != '\\');
            out.push_str(&self.scanner.text()[run..run + len]);

            let at = self.scanner.position();
            match self.scanner.advance() {
                Some('"') => return Ok(out),
                // backslash
                Some(_) => self.escape(&mut out, at)?,
                None => return Err(self.error_at(ErrorKind::StringNotTerminated, at)),
            }
        }
    }

    /// Decodes the escape whose backslash is at `backslash` and has already
    /// been consumed.
    fn escape(&mut self, out: &mut String, backslash: usize) -> Result<(), ParseError> {
        let letter = self.scanner.position();
        let Some(c) = self.scanner.advance() else {
            return Err(self.error_at(ErrorKind::StringNotStartedWithBackslash, backslash));
        };
        match c {
            '"' | '\\' | '/' => out.push(c),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => out.push(self.unicode_escape(backslash)?),
            _ if self.options.strict_escape_codes => {
                return Err(self.error_at(ErrorKind::StringUnknownEscapeCode, letter));
            }
            _ => out.push(c),
        }
        Ok(())
    }

    /// Decodes the digits of a `\u` escape, pairing a high surrogate with the
    /// `\u` low surrogate that must follow it.
    fn unicode_escape(&mut self, backslash: usize) -> Result<char, ParseError> {
        let unit = self.code_unit()?;
        if is_low_surrogate(unit) {
            return Err(self.error_at(ErrorKind::StringUnicodeNotDecoded, backslash));
        }
        if !is_high_surrogate(unit) {
            return char::from_u32(u32::from(unit))
                .ok_or_else(|| self.error_at(ErrorKind::StringUnicodeNotDecoded, backslash));
        }

        if !self.scanner.match_literal("\\u") {
            return Err(self.error_at(ErrorKind::StringUnicodeNotDecoded, backslash));
        }
        let low = self.code_unit()?;
        combine_surrogates(unit, low)
            .ok_or_else(|| self.error_at(ErrorKind::StringUnicodeNotDecoded, backslash))
    }

    fn code_unit(&mut self) -> Result<u16, ParseError> {
        let mut digits = UnicodeEscapeBuffer::new();
        loop {
            let at = self.scanner.position();
            let fed = self.scanner.advance().map(|c| digits.feed(c));
            match fed {
                Some(Ok(Some(unit))) => return Ok(unit),
                Some(Ok(None)) => {}
                Some(Err(_)) | None => {
                    return Err(self.error_at(ErrorKind::StringUnicodeNotDecoded, at));
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Numbers
    // ------------------------------------------------------------------------

    fn number(&mut self) -> Result<f64, ParseError> {
        let start = self.scanner.position();
        self.scanner.scan_char('-');

        let integer = self.scanner.position();
        match self.scanner.peek() {
            Some('0') => {
                self.scanner.advance();
            }
            Some('1'..='9') => {
                self.scanner.skip_while(|c| c.is_ascii_digit());
            }
            _ => return Err(self.error_at(ErrorKind::NumberNotScannable, integer)),
        }

        if self.scanner.scan_char('.') {
            self.digits()?;
        }

        if matches!(self.scanner.peek(), Some('e' | 'E')) {
            self.scanner.advance();
            if matches!(self.scanner.peek(), Some('+' | '-')) {
                self.scanner.advance();
            }
            self.digits()?;
        }

        let literal = &self.scanner.text()[start..self.scanner.position()];
        literal
            .parse::<f64>()
            .map_err(|_| self.error_at(ErrorKind::NumberNotScannable, start))
    }

    /// One or more ASCII digits.
    fn digits(&mut self) -> Result<(), ParseError> {
        let at = self.scanner.position();
        if self.scanner.skip_while(|c| c.is_ascii_digit()) == 0 {
            return Err(self.error_at(ErrorKind::NumberNotScannable, at));
        }
        Ok(())
    }
}

fn can_start_value(c: char) -> bool {
    matches!(c, '{' | '[' | '"' | 't' | 'f' | 'n' | '-' | '0'..='9')
}
