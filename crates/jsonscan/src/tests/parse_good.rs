use alloc::{string::String, vec, vec::Vec};

use rstest::rstest;

use crate::{Encoding, JsonScanner, Map, ScannerOptions, Value, from_slice, from_str};

fn parse(text: &str) -> Value {
    from_str(text, &ScannerOptions::default()).unwrap()
}

fn object<const N: usize>(members: [(&str, Value); N]) -> Value {
    Value::Object(members.into_iter().map(|(k, v)| (String::from(k), v)).collect())
}

#[test]
fn empty_object() {
    assert_eq!(parse("{}"), Value::Object(Map::default()));
    assert_eq!(parse("{ \n\t }"), Value::Object(Map::default()));
}

#[test]
fn empty_array() {
    assert_eq!(parse("[]"), Value::Array(vec![]));
    assert_eq!(parse("[\r\n]"), Value::Array(vec![]));
}

#[test]
fn object_members() {
    assert_eq!(
        parse(r#"{"a":1,"b":"two","c":[true,false,null]}"#),
        object([
            ("a", Value::Number(1.0)),
            ("b", Value::String("two".into())),
            (
                "c",
                Value::Array(vec![
                    Value::Boolean(true),
                    Value::Boolean(false),
                    Value::Null
                ])
            ),
        ])
    );
}

#[test]
fn duplicate_keys_last_value_wins() {
    let value = parse(r#"{"a":1,"a":2}"#);
    let map = value.as_object().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map["a"], Value::Number(2.0));
}

#[test]
fn duplicate_key_keeps_first_position() {
    let value = parse(r#"{"x":1,"y":2,"x":3}"#);
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["x", "y"]);
    assert_eq!(value.as_object().unwrap()["x"], Value::Number(3.0));
}

#[test]
fn insertion_order_is_preserved() {
    let value = parse(r#"{"zeta":0,"alpha":1,"mid":2}"#);
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);
}

#[test]
fn whitespace_between_every_token() {
    assert_eq!(
        parse(" \n{ \"a\" \t:\r [ 1 , { } ] , \"b\" : \"\" } \n"),
        object([
            (
                "a",
                Value::Array(vec![Value::Number(1.0), Value::Object(Map::default())])
            ),
            ("b", Value::String(String::new())),
        ])
    );
}

#[test]
fn nested_containers() {
    assert_eq!(
        parse("[[[]],[{}],{\"k\":[{\"k\":[]}]}]"),
        Value::Array(vec![
            Value::Array(vec![Value::Array(vec![])]),
            Value::Array(vec![Value::Object(Map::default())]),
            object([("k", Value::Array(vec![object([("k", Value::Array(vec![]))])]))]),
        ])
    );
}

#[test]
fn trailing_commas_are_accepted() {
    assert_eq!(parse("[1,]"), Value::Array(vec![Value::Number(1.0)]));
    assert_eq!(parse(r#"{"a":1,}"#), object([("a", Value::Number(1.0))]));
}

// ------------------------------------------------------------------------------------------------
// Strings
// ------------------------------------------------------------------------------------------------

#[rstest]
#[case(r#""""#, "")]
#[case(r#""abc""#, "abc")]
#[case(r#""\u0041""#, "A")]
#[case(r#""\u00e9\u00E9""#, "éé")]
#[case(r#""\uD83D\uDE00""#, "😀")]
#[case(r#""a\uD834\uDD1Eb""#, "a𝄞b")]
#[case(r#""\"\\\/\b\f\n\r\t""#, "\"\\/\u{8}\u{c}\n\r\t")]
#[case(r#""\u0000""#, "\0")]
#[case("\"héllo wörld\"", "héllo wörld")]
#[case("\"raw\ttab\"", "raw\ttab")]
fn strings(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(parse(text), Value::String(expected.into()));
}

#[test]
fn unknown_escape_passes_through_when_lenient() {
    assert_eq!(parse(r#""\q\x\'""#), Value::String("qx'".into()));
}

#[test]
fn unknown_escape_in_key_passes_through_when_lenient() {
    assert_eq!(parse(r#"{"\k":1}"#), object([("k", Value::Number(1.0))]));
}

// ------------------------------------------------------------------------------------------------
// Numbers
// ------------------------------------------------------------------------------------------------

#[rstest]
#[case("0", 0.0)]
#[case("-0", -0.0)]
#[case("7", 7.0)]
#[case("-12", -12.0)]
#[case("3.25", 3.25)]
#[case("-0.5e10", -0.5e10)]
#[case("1E3", 1000.0)]
#[case("1e+3", 1000.0)]
#[case("25e-2", 0.25)]
#[case("123456789012345678901234567890", 123_456_789_012_345_678_901_234_567_890.0)]
#[allow(clippy::float_cmp)]
fn numbers(#[case] text: &str, #[case] expected: f64) {
    assert_eq!(parse(text), Value::Number(expected));
}

#[test]
fn negative_zero_keeps_its_sign() {
    assert!(parse("-0").as_f64().unwrap().is_sign_negative());
}

#[test]
fn huge_numbers_saturate_to_infinity() {
    assert_eq!(parse("1e400"), Value::Number(f64::INFINITY));
    assert_eq!(parse("-1e400"), Value::Number(f64::NEG_INFINITY));
}

// ------------------------------------------------------------------------------------------------
// Literals and options
// ------------------------------------------------------------------------------------------------

#[test]
fn literals() {
    assert_eq!(parse("true"), Value::Boolean(true));
    assert_eq!(parse("false"), Value::Boolean(false));
    assert_eq!(parse("null"), Value::Null);
}

#[test]
fn null_placeholder_is_substituted_everywhere() {
    let options = ScannerOptions {
        null_value: Value::String("NULL".into()),
        ..Default::default()
    };
    let value = from_str(r#"{"a":null,"b":[null,1]}"#, &options).unwrap();
    assert_eq!(
        value,
        object([
            ("a", Value::String("NULL".into())),
            (
                "b",
                Value::Array(vec![Value::String("NULL".into()), Value::Number(1.0)])
            ),
        ])
    );
    assert_eq!(from_str("null", &options).unwrap(), Value::String("NULL".into()));
}

#[test]
fn null_elements_allowed_by_default() {
    assert_eq!(parse("[null]"), Value::Array(vec![Value::Null]));
}

#[test]
fn nested_nulls_pass_when_null_elements_are_rejected() {
    let options = ScannerOptions {
        reject_null_array_elements: true,
        ..Default::default()
    };
    let value = from_str(r#"[{"a":null},[1]]"#, &options).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn trailing_content_allowed_on_request() {
    let options = ScannerOptions {
        allow_trailing_content: true,
        ..Default::default()
    };
    assert_eq!(from_str("[1] [2]", &options).unwrap(), Value::Array(vec![Value::Number(1.0)]));
}

#[test]
fn scanner_reports_final_position() {
    let options = ScannerOptions::default();
    let mut scanner = JsonScanner::new("{\"a\":[1]}  xyz", &options);
    scanner.scan_json_value().unwrap();
    assert_eq!(scanner.position(), 9);
    assert!(!scanner.is_at_end());
}

#[test]
fn sequential_values_from_one_scanner() {
    let options = ScannerOptions::default();
    let mut scanner = JsonScanner::new("1 \"two\" [3] {}", &options);
    let mut values = Vec::new();
    while !scanner.is_at_end() {
        values.push(scanner.scan_json_value().unwrap());
    }
    assert_eq!(
        values,
        vec![
            Value::Number(1.0),
            Value::String("two".into()),
            Value::Array(vec![Value::Number(3.0)]),
            Value::Object(Map::default()),
        ]
    );
}

#[test]
fn depth_up_to_the_limit_is_accepted() {
    let options = ScannerOptions {
        max_depth: 64,
        ..Default::default()
    };
    let text = "[".repeat(64) + &"]".repeat(64);
    assert!(from_str(&text, &options).is_ok());
}

// ------------------------------------------------------------------------------------------------
// Byte input
// ------------------------------------------------------------------------------------------------

#[test]
fn bytes_in_each_encoding() {
    let expected = object([("k", Value::String("é".into()))]);
    let text = "{\"k\":\"é\"}";

    let utf16le: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
    let utf16be: Vec<u8> = text.encode_utf16().flat_map(u16::to_be_bytes).collect();
    let latin1 = b"{\"k\":\"\xE9\"}";

    for (bytes, encoding) in [
        (text.as_bytes(), Encoding::Utf8),
        (&utf16le[..], Encoding::Utf16Le),
        (&utf16be[..], Encoding::Utf16Be),
        (&latin1[..], Encoding::Latin1),
    ] {
        let options = ScannerOptions {
            allowed_encoding: encoding,
            ..Default::default()
        };
        assert_eq!(from_slice(bytes, &options).unwrap(), expected, "{encoding:?}");
    }
}

#[test]
fn ascii_bytes_with_escapes() {
    let options = ScannerOptions {
        allowed_encoding: Encoding::Ascii,
        ..Default::default()
    };
    assert_eq!(
        from_slice(br#"["\u00e9"]"#, &options).unwrap(),
        Value::Array(vec![Value::String("é".into())])
    );
}
