//! Type conversions
//!
//! Every conversion is total: whatever the input, a value of the requested
//! kind comes out. Invalid numeric text becomes NaN rather than an error.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::gc::{GcRef, Heap};
use crate::runtime::{JsString, ObjectClass};
use crate::util::{dtoa, format_iso_date};
use crate::value::{Number, Value};

/// A complete decimal literal, as accepted by `Number("...")`
static DECIMAL_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").expect("valid regex")
});

/// The longest decimal prefix, as accepted by `parseFloat("...")`
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("valid regex")
});

/// Convert a value to a boolean
pub fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Boolean(b) => *b,
        Value::Number(n) => !(n.is_nan() || n.is_zero()),
        Value::String(s) => !s.is_empty(),
        Value::Object(_) => true,
    }
}

/// Convert a value to a number
pub fn to_number(heap: &Heap, value: &Value) -> Number {
    match value {
        Value::Undefined => Number::NAN,
        Value::Null => Number::ZERO,
        Value::Boolean(b) => Number::new(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => *n,
        Value::String(s) => string_to_number(s),
        Value::Object(r) => match heap.get(*r).map(|o| &o.class) {
            Some(ObjectClass::Date(time)) => Number::new(*time),
            Some(ObjectClass::Boxed(inner)) => to_number(heap, inner),
            _ => string_to_number(&to_string(heap, value)),
        },
    }
}

/// Convert a value to a string
pub fn to_string(heap: &Heap, value: &Value) -> JsString {
    match value {
        Value::Undefined => JsString::from("undefined"),
        Value::Null => JsString::from("null"),
        Value::Boolean(b) => JsString::from(if *b { "true" } else { "false" }),
        Value::Number(n) => JsString::from(dtoa::number_to_string(n.value())),
        Value::String(s) => s.clone(),
        Value::Object(r) => {
            let mut visiting = HashSet::new();
            JsString::from(object_to_string(heap, *r, &mut visiting))
        }
    }
}

fn object_to_string(heap: &Heap, r: GcRef, visiting: &mut HashSet<GcRef>) -> String {
    let Some(object) = heap.get(r) else {
        return "undefined".to_string();
    };

    match &object.class {
        ObjectClass::Array(arr) => {
            // A cyclic array prints as empty where it refers to itself
            if !visiting.insert(r) {
                return String::new();
            }
            let parts: Vec<String> = arr
                .iter()
                .map(|element| match element {
                    Value::Undefined | Value::Null => String::new(),
                    Value::Object(child) => object_to_string(heap, *child, visiting),
                    other => to_string(heap, other).to_string(),
                })
                .collect();
            visiting.remove(&r);
            parts.join(",")
        }
        ObjectClass::Function(f) => f.to_source(),
        ObjectClass::Date(time) => format_iso_date(*time).unwrap_or_else(|| "Invalid Date".to_string()),
        ObjectClass::Boxed(inner) => to_string(heap, inner).to_string(),
        ObjectClass::Ordinary => "[object Object]".to_string(),
    }
}

/// Parse a string the way `Number("...")` does
///
/// Surrounding whitespace is ignored; the empty string is 0; anything that
/// is not entirely a numeric literal is NaN.
pub fn string_to_number(s: &str) -> Number {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Number::ZERO;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Number::INFINITY,
        "-Infinity" => return Number::NEG_INFINITY,
        _ => {}
    }

    let prefixed = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)];
    for (prefix, radix) in prefixed {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return parse_digits(digits, radix).unwrap_or(Number::NAN);
        }
    }

    if DECIMAL_LITERAL.is_match(trimmed) {
        return trimmed.parse::<f64>().map(Number::new).unwrap_or(Number::NAN);
    }

    Number::NAN
}

/// Parse a whole digit string in the given radix
fn parse_digits(digits: &str, radix: u32) -> Option<Number> {
    if digits.is_empty() {
        return None;
    }
    let mut result = 0f64;
    for c in digits.chars() {
        let d = c.to_digit(radix)?;
        result = result * radix as f64 + d as f64;
    }
    Some(Number::new(result))
}

/// Parse the longest numeric prefix of a string, as `parseFloat` does
pub fn parse_float(s: &str) -> Number {
    let trimmed = s.trim_start();
    let Some(m) = FLOAT_PREFIX.find(trimmed) else {
        return Number::NAN;
    };

    let text = m.as_str();
    if text.ends_with("Infinity") {
        return if text.starts_with('-') {
            Number::NEG_INFINITY
        } else {
            Number::INFINITY
        };
    }
    text.parse::<f64>().map(Number::new).unwrap_or(Number::NAN)
}

/// Parse an integer, as `parseInt` does
///
/// The text is scanned as an integer in `radix` (10 when absent or 0). If the
/// scan consumes the whole string its value is the result; otherwise the
/// text is parsed as a floating-point prefix and floored.
pub fn parse_int(s: &str, radix: Option<Number>) -> Number {
    let radix = match radix {
        None => 10,
        Some(r) if r.is_nan() || r.is_infinite() => 10,
        Some(r) => match r.value().trunc() as i64 {
            0 => 10,
            n @ 2..=36 => n as u32,
            _ => return Number::NAN,
        },
    };

    let trimmed = s.trim_start();
    if trimmed.is_empty() {
        return Number::NAN;
    }

    let (negative, rest) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = if radix == 16 {
        rest.strip_prefix("0x")
            .or_else(|| rest.strip_prefix("0X"))
            .unwrap_or(rest)
    } else {
        rest
    };

    let mut value = 0f64;
    let mut consumed = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        value = value * radix as f64 + d as f64;
        consumed += c.len_utf8();
    }

    if consumed > 0 && consumed == digits.len() {
        return Number::new(if negative { -value } else { value });
    }

    let fallback = parse_float(s);
    if fallback.is_nan() {
        Number::NAN
    } else {
        Number::new(fallback.value().floor())
    }
}

/// Strict equality (`===`)
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Object(x), Value::Object(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{JSArray, JSObject};

    fn n(v: Number) -> f64 {
        v.value()
    }

    #[test]
    fn test_to_boolean() {
        assert!(!to_boolean(&Value::number(0.0)));
        assert!(!to_boolean(&Value::number(-0.0)));
        assert!(!to_boolean(&Value::nan()));
        assert!(!to_boolean(&Value::string("")));
        assert!(!to_boolean(&Value::null()));
        assert!(!to_boolean(&Value::undefined()));
        assert!(!to_boolean(&Value::boolean(false)));

        assert!(to_boolean(&Value::number(-1.0)));
        assert!(to_boolean(&Value::string("0")));
        assert!(to_boolean(&Value::infinity()));
        assert!(to_boolean(&Value::Object(GcRef::new(0, 0))));
    }

    #[test]
    fn test_string_to_number() {
        assert_eq!(n(string_to_number("42")), 42.0);
        assert_eq!(n(string_to_number("  -3.5  ")), -3.5);
        assert_eq!(n(string_to_number("")), 0.0);
        assert_eq!(n(string_to_number(" \n")), 0.0);
        assert_eq!(n(string_to_number("1e3")), 1000.0);
        assert_eq!(n(string_to_number(".5")), 0.5);
        assert_eq!(n(string_to_number("5.")), 5.0);
        assert_eq!(n(string_to_number("0xff")), 255.0);
        assert_eq!(n(string_to_number("0b101")), 5.0);
        assert!(string_to_number("-Infinity").is_infinite());

        assert!(string_to_number("42px").is_nan());
        assert!(string_to_number("abc").is_nan());
        assert!(string_to_number("inf").is_nan());
        assert!(string_to_number("NaN").is_nan());
        assert!(string_to_number("0x").is_nan());
        assert!(string_to_number("1 2").is_nan());
    }

    #[test]
    fn test_to_number_primitives() {
        let heap = Heap::new();
        assert!(to_number(&heap, &Value::undefined()).is_nan());
        assert_eq!(n(to_number(&heap, &Value::null())), 0.0);
        assert_eq!(n(to_number(&heap, &Value::boolean(true))), 1.0);
        assert_eq!(n(to_number(&heap, &Value::string("42"))), 42.0);
    }

    #[test]
    fn test_to_number_objects() {
        let mut heap = Heap::new();
        let empty = heap.alloc(JSObject::new(None, ObjectClass::Array(JSArray::new())));
        let single = heap.alloc(JSObject::new(
            None,
            ObjectClass::Array(JSArray::from_values(vec![Value::string("7")])),
        ));
        let plain = heap.alloc(JSObject::ordinary(None));
        let date = heap.alloc(JSObject::new(None, ObjectClass::Date(1234.0)));

        assert_eq!(n(to_number(&heap, &Value::Object(empty))), 0.0);
        assert_eq!(n(to_number(&heap, &Value::Object(single))), 7.0);
        assert!(to_number(&heap, &Value::Object(plain)).is_nan());
        assert_eq!(n(to_number(&heap, &Value::Object(date))), 1234.0);

        let boxed = heap.alloc(JSObject::new(None, ObjectClass::Boxed(Value::string("12"))));
        assert_eq!(n(to_number(&heap, &Value::Object(boxed))), 12.0);
        assert_eq!(to_string(&heap, &Value::Object(boxed)).as_str(), "12");
    }

    #[test]
    fn test_to_string() {
        let mut heap = Heap::new();
        assert_eq!(to_string(&heap, &Value::undefined()).as_str(), "undefined");
        assert_eq!(to_string(&heap, &Value::boolean(false)).as_str(), "false");
        assert_eq!(to_string(&heap, &Value::number(1.5)).as_str(), "1.5");
        assert_eq!(to_string(&heap, &Value::nan()).as_str(), "NaN");

        let plain = heap.alloc(JSObject::ordinary(None));
        let arr = heap.alloc(JSObject::new(
            None,
            ObjectClass::Array(JSArray::from_values(vec![
                Value::number(1.0),
                Value::null(),
                Value::string("x"),
                Value::Object(plain),
            ])),
        ));
        assert_eq!(to_string(&heap, &Value::Object(plain)).as_str(), "[object Object]");
        assert_eq!(to_string(&heap, &Value::Object(arr)).as_str(), "1,,x,[object Object]");
    }

    #[test]
    fn test_cyclic_array_to_string() {
        let mut heap = Heap::new();
        let arr = heap.alloc(JSObject::new(None, ObjectClass::Array(JSArray::new())));
        if let Some(elements) = heap.get_mut(arr).and_then(|o| o.as_array_mut()) {
            elements.push(Value::number(1.0));
            elements.push(Value::Object(arr));
        }
        assert_eq!(to_string(&heap, &Value::Object(arr)).as_str(), "1,");
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(n(parse_int("42", None)), 42.0);
        assert_eq!(n(parse_int("42px", None)), 42.0);
        assert_eq!(n(parse_int("ff", Some(Number::new(16.0)))), 255.0);
        assert_eq!(n(parse_int("0x1A", Some(Number::new(16.0)))), 26.0);
        assert_eq!(n(parse_int("-17", None)), -17.0);
        assert_eq!(n(parse_int("  12", None)), 12.0);
        assert_eq!(n(parse_int("3.9", None)), 3.0);
        assert_eq!(n(parse_int("101", Some(Number::new(2.0)))), 5.0);
        assert_eq!(n(parse_int("7", Some(Number::new(0.0)))), 7.0);

        assert!(parse_int("abc", None).is_nan());
        assert!(parse_int("", None).is_nan());
        assert!(parse_int("10", Some(Number::new(1.0))).is_nan());
        assert!(parse_int("10", Some(Number::new(37.0))).is_nan());
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(n(parse_float("3.14abc")), 3.14);
        assert_eq!(n(parse_float("  -2.5e2xyz")), -250.0);
        assert_eq!(n(parse_float(".5")), 0.5);
        assert_eq!(n(parse_float("7")), 7.0);
        assert!(parse_float("Infinityx").is_infinite());
        assert_eq!(parse_float("-Infinity").value(), f64::NEG_INFINITY);
        assert!(parse_float("abc").is_nan());
        assert!(parse_float("").is_nan());
    }

    #[test]
    fn test_strict_equals() {
        assert!(strict_equals(&Value::number(1.0), &Value::number(1.0)));
        assert!(!strict_equals(&Value::nan(), &Value::nan()));
        assert!(strict_equals(&Value::string("a"), &Value::string("a")));
        assert!(!strict_equals(&Value::string("1"), &Value::number(1.0)));
        assert!(!strict_equals(&Value::null(), &Value::undefined()));
        assert!(strict_equals(&Value::Object(GcRef::new(1, 0)), &Value::Object(GcRef::new(1, 0))));
    }
}
