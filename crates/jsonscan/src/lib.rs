//! A fail-fast, recursive-descent JSON scanner.
//!
//! Input bytes are decoded under a stated [`Encoding`], then a [`JsonScanner`]
//! walks the text with a small character [`Scanner`] and builds a [`Value`]
//! tree in a single left-to-right pass. The first grammar violation aborts the
//! whole parse with a [`ParseError`] that records what went wrong and where.
//!
//! ```rust
//! use jsonscan::{ScannerOptions, Value};
//!
//! let value = jsonscan::from_str(r#"{"key": [null, true, 3.5]}"#, &ScannerOptions::default())
//!     .unwrap();
//! let Value::Object(map) = value else { unreachable!() };
//! assert_eq!(
//!     map["key"],
//!     Value::Array(vec![Value::Null, Value::Boolean(true), Value::Number(3.5)])
//! );
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod encoding;
mod error;
mod escape_buffer;
mod json_scanner;
mod options;
mod scanner;
mod value;

#[cfg(test)]
mod tests;

pub use encoding::{Encoding, decode};
pub use error::{ErrorKind, ParseError};
pub use json_scanner::{JsonScanner, from_slice, from_str};
pub use options::ScannerOptions;
pub use scanner::Scanner;
pub use value::{Array, Map, Value};
