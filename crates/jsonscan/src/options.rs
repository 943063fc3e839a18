use crate::{encoding::Encoding, value::Value};

/// Configuration for a [`JsonScanner`](crate::JsonScanner).
///
/// Options are fixed for the lifetime of a scanner; build them with struct
/// update syntax.
///
/// # Examples
///
/// ```rust
/// use jsonscan::{ScannerOptions, Value};
///
/// let options = ScannerOptions {
///     strict_escape_codes: true,
///     null_value: Value::String("<null>".into()),
///     ..Default::default()
/// };
/// let value = jsonscan::from_str("[null]", &options).unwrap();
/// assert_eq!(value, Value::Array(vec![Value::String("<null>".into())]));
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq)]
pub struct ScannerOptions {
    /// Whether an unknown escape such as `\q` is an error.
    ///
    /// When `false`, the backslash is dropped and the escaped character is
    /// kept: `"\q"` scans as `"q"`.
    ///
    /// # Default
    ///
    /// `false`
    pub strict_escape_codes: bool,

    /// The value substituted for every JSON `null`.
    ///
    /// # Default
    ///
    /// [`Value::Null`]
    pub null_value: Value,

    /// Encoding used to decode byte input in [`from_slice`](crate::from_slice).
    ///
    /// # Default
    ///
    /// [`Encoding::Utf8`]
    pub allowed_encoding: Encoding,

    /// Whether a literal `null` array element is an error.
    ///
    /// # Default
    ///
    /// `false`
    pub reject_null_array_elements: bool,

    /// Maximum nesting depth of objects and arrays.
    ///
    /// # Default
    ///
    /// `256`
    pub max_depth: usize,

    /// Whether [`from_str`](crate::from_str) and
    /// [`from_slice`](crate::from_slice) accept text after the top-level value.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing_content: bool,
}

impl ScannerOptions {
    /// Default for [`max_depth`](Self::max_depth).
    pub const DEFAULT_MAX_DEPTH: usize = 256;
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            strict_escape_codes: false,
            null_value: Value::Null,
            allowed_encoding: Encoding::Utf8,
            reject_null_array_elements: false,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            allow_trailing_content: false,
        }
    }
}
