use alloc::boxed::Box;

use thiserror::Error;

/// Where and why a scan failed.
///
/// `position` is a byte offset into the decoded text (or into the raw input
/// for [`ErrorKind::CouldNotDecodeData`]); `line` and `column` are 1-based and
/// derived from it. Scanners that wrap a failure of a nested scan keep the
/// nested error as the [`cause`](ParseError::cause).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at {line}:{column}")]
pub struct ParseError {
    pub(crate) kind: ErrorKind,
    pub(crate) position: usize,
    pub(crate) line: usize,
    pub(crate) column: usize,
    #[source]
    pub(crate) cause: Option<Box<ParseError>>,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, position: usize, line: usize, column: usize) -> Self {
        Self {
            kind,
            position,
            line,
            column,
            cause: None,
        }
    }

    pub(crate) fn with_cause(mut self, cause: ParseError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// The kind of violation.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Byte offset at which the violation was detected.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// 1-based line of [`position`](Self::position).
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of [`position`](Self::position), counted in characters.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// The failure of the nested scan this error wraps, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&ParseError> {
        self.cause.as_deref()
    }

    /// The innermost error of the cause chain.
    ///
    /// ```rust
    /// use jsonscan::{ErrorKind, ScannerOptions};
    ///
    /// let err = jsonscan::from_str(r#"{"a": [tru]}"#, &ScannerOptions::default()).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::DictionaryValueScanFailed);
    /// assert_eq!(err.root_cause().kind(), ErrorKind::ObjectInvalidStartCharacter);
    /// ```
    #[must_use]
    pub fn root_cause(&self) -> &ParseError {
        let mut err = self;
        while let Some(cause) = err.cause() {
            err = cause;
        }
        err
    }
}

/// Every way a scan can fail. Each kind has its own [`code`](ErrorKind::code).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input buffer is empty or holds only whitespace.
    #[error("nothing to scan")]
    NothingToScan,
    /// The input bytes are not valid under the stated encoding.
    #[error("could not decode data")]
    CouldNotDecodeData,
    /// The character where a value was expected cannot start one.
    #[error("character is not a valid start of a JSON value")]
    ObjectInvalidStartCharacter,
    /// An object scan did not start at `{`.
    #[error("object does not start with '{{'")]
    DictionaryStartCharacterMissing,
    /// An object key could not be scanned as a string.
    #[error("could not scan object key")]
    DictionaryKeyScanFailed,
    /// An object key string reached the end of input before its closing quote.
    #[error("object key is not terminated")]
    DictionaryKeyNotTerminated,
    /// An object value could not be scanned.
    #[error("could not scan object value")]
    DictionaryValueScanFailed,
    /// An object key is not followed by `:`.
    #[error("object key is not followed by ':'")]
    DictionaryKeyValuePairNoDelimiter,
    /// An object member is followed by neither `,` nor `}`.
    #[error("object is not terminated by '}}'")]
    DictionaryNotTerminated,
    /// An array scan did not start at `[`.
    #[error("array does not start with '['")]
    ArrayStartCharacterMissing,
    /// An array element could not be scanned.
    #[error("could not scan array value")]
    ArrayValueScanFailed,
    /// An array element is `null` and null elements are rejected.
    #[error("array value is null")]
    ArrayValueIsNull,
    /// An array element is followed by neither `,` nor `]`.
    #[error("array is not terminated by ']'")]
    ArrayNotTerminated,
    /// A string or an escape sequence inside it could not begin.
    #[error("string or escape sequence could not begin")]
    StringNotStartedWithBackslash,
    /// A `\u` escape is malformed or is not part of a valid surrogate pair.
    #[error("could not decode unicode escape")]
    StringUnicodeNotDecoded,
    /// A backslash is followed by an unknown escape letter.
    #[error("unknown escape code")]
    StringUnknownEscapeCode,
    /// A string reached the end of input before its closing quote.
    #[error("string is not terminated")]
    StringNotTerminated,
    /// A number has no digits where its grammar requires them.
    #[error("could not scan number")]
    NumberNotScannable,
    /// Objects and arrays are nested deeper than the configured limit.
    #[error("nesting depth limit exceeded")]
    DepthLimitExceeded,
    /// Non-whitespace text follows the top-level value.
    #[error("trailing content after value")]
    TrailingContent,
}

impl ErrorKind {
    /// A stable numeric code, distinct for every kind.
    #[must_use]
    #[allow(clippy::enum_glob_use)]
    pub fn code(self) -> i32 {
        use ErrorKind::*;
        match self {
            NothingToScan => -1,
            CouldNotDecodeData => -2,
            ObjectInvalidStartCharacter => -3,
            DictionaryStartCharacterMissing => -4,
            DictionaryKeyScanFailed => -5,
            DictionaryKeyNotTerminated => -6,
            DictionaryValueScanFailed => -7,
            DictionaryKeyValuePairNoDelimiter => -8,
            DictionaryNotTerminated => -9,
            ArrayStartCharacterMissing => -10,
            ArrayValueScanFailed => -11,
            ArrayValueIsNull => -12,
            ArrayNotTerminated => -13,
            StringNotStartedWithBackslash => -14,
            StringUnicodeNotDecoded => -15,
            StringUnknownEscapeCode => -16,
            StringNotTerminated => -17,
            NumberNotScannable => -18,
            DepthLimitExceeded => -19,
            TrailingContent => -20,
        }
    }
}
