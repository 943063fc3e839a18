#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use jsonscan::{Encoding, ErrorKind, JsonScanner, ScannerOptions};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

/// A document made of a well-formed value with raw bytes spliced into its
/// serialized text.
#[derive(Debug, Arbitrary)]
struct Input {
    flags: u8,
    max_depth: u16,
    value: Document,
    splice_at: usize,
    splice: Vec<u8>,
}

#[derive(Debug)]
struct Document(Value);

impl<'a> Arbitrary<'a> for Document {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        document(u, 0).map(Document)
    }
}

fn document(u: &mut Unstructured<'_>, depth: usize) -> arbitrary::Result<Value> {
    // Containers only while there is input left to describe them.
    let kinds = if depth > 64 || u.is_empty() { 4 } else { 6 };
    Ok(match u.choose_index(kinds)? {
        0 => Value::Null,
        1 => Value::Bool(u.arbitrary()?),
        2 => serde_json::Number::from_f64(u.arbitrary()?).map_or(Value::Null, Value::Number),
        3 => Value::String(u.arbitrary()?),
        4 => {
            let len = u.int_in_range(0..=4)?;
            let items = (0..len)
                .map(|_| document(u, depth + 1))
                .collect::<arbitrary::Result<_>>()?;
            Value::Array(items)
        }
        _ => {
            let len = u.int_in_range(0..=4)?;
            let mut members = Map::new();
            for _ in 0..len {
                members.insert(u.arbitrary()?, document(u, depth + 1)?);
            }
            Value::Object(members)
        }
    })
}

fn options(flags: u8, max_depth: u16) -> ScannerOptions {
    ScannerOptions {
        strict_escape_codes: flags & 1 != 0,
        reject_null_array_elements: flags & 2 != 0,
        allow_trailing_content: flags & 4 != 0,
        allowed_encoding: match (flags >> 3) & 3 {
            0 => Encoding::Utf8,
            1 => Encoding::Latin1,
            2 => Encoding::Utf16Le,
            _ => Encoding::Ascii,
        },
        max_depth: usize::from(max_depth),
        ..Default::default()
    }
}

/// Well-formed text always scans under lenient options deep enough for it.
fn check_well_formed(text: &str) {
    let options = ScannerOptions {
        max_depth: usize::MAX,
        ..Default::default()
    };
    if let Err(err) = jsonscan::from_str(text, &options) {
        panic!("serde_json output rejected: {err} in {text:?}");
    }
}

fn check_bytes(bytes: &[u8], options: &ScannerOptions) {
    let first = jsonscan::from_slice(bytes, options);
    assert_eq!(first, jsonscan::from_slice(bytes, options), "scans must be deterministic");

    let Ok(text) = jsonscan::decode(bytes, options.allowed_encoding) else {
        assert!(matches!(
            first.map_err(|e| e.kind()),
            Err(ErrorKind::NothingToScan | ErrorKind::CouldNotDecodeData)
        ));
        return;
    };

    if let Err(err) = &first {
        assert!(err.position() <= text.len());
        assert!(err.root_cause().position() <= text.len());
    }

    // Scanning value after value either advances or rewinds on failure.
    let mut scanner = JsonScanner::new(&text, options);
    while !scanner.is_at_end() {
        let before = scanner.position();
        match scanner.scan_json_value() {
            Ok(_) => assert!(scanner.position() > before),
            Err(_) => {
                assert_eq!(scanner.position(), before);
                break;
            }
        }
    }
}

fuzz_target!(|input: Input| {
    let Ok(text) = serde_json::to_string(&input.value.0) else {
        return;
    };
    check_well_formed(&text);

    let mut bytes = text.into_bytes();
    let at = input.splice_at % (bytes.len() + 1);
    bytes.splice(at..at, input.splice);
    check_bytes(&bytes, &options(input.flags, input.max_depth));
});
