//! String constructor and String.prototype
//!
//! Positions and lengths are counted in UTF-16 code units.

use crate::builtins::{constructor, to_integer};
use crate::context::Context;
use crate::runtime::{arg, JsString};
use crate::value::Value;

pub fn bootstrap(ctx: &mut Context) -> Value {
    let proto = ctx.intrinsics().string_prototype;
    let ctor = constructor(ctx, "String", 1, construct, proto);

    ctx.define_native_function(&ctor, "fromCharCode", 1, from_char_code);

    let proto = Value::Object(proto);
    ctx.define_native_function(&proto, "charAt", 1, char_at);
    ctx.define_native_function(&proto, "charCodeAt", 1, char_code_at);
    ctx.define_native_function(&proto, "indexOf", 1, index_of);
    ctx.define_native_function(&proto, "toUpperCase", 0, to_upper_case);
    ctx.define_native_function(&proto, "toLowerCase", 0, to_lower_case);
    ctx.define_native_function(&proto, "trim", 0, trim);
    ctx.define_native_function(&proto, "toString", 0, value_of);
    ctx.define_native_function(&proto, "valueOf", 0, value_of);

    ctor
}

/// Receiver as text; boxed strings unwrap to their primitive
fn this_string(ctx: &Context, this: &Value) -> JsString {
    match this {
        Value::String(s) => s.clone(),
        _ => ctx.to_string(this),
    }
}

/// `String(value)`
fn construct(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    match args.first() {
        Some(v) => Value::String(ctx.to_string(v)),
        None => Value::string(JsString::empty()),
    }
}

/// `String.fromCharCode(...codes)`
fn from_char_code(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    let units: Vec<u16> = args
        .iter()
        .map(|a| {
            let n = ctx.to_number(a);
            if n.is_finite() { n.value().trunc().rem_euclid(65536.0) as u16 } else { 0 }
        })
        .collect();
    Value::string(String::from_utf16_lossy(&units))
}

/// `String.prototype.charAt(pos)`
fn char_at(ctx: &mut Context, this: Value, args: &[Value]) -> Value {
    let s = this_string(ctx, &this);
    let pos = to_integer(ctx, &arg(args, 0));
    let c = if pos >= 0.0 { s.char_at(pos as usize) } else { None };
    Value::String(c.unwrap_or_else(JsString::empty))
}

/// `String.prototype.charCodeAt(pos)`
fn char_code_at(ctx: &mut Context, this: Value, args: &[Value]) -> Value {
    let s = this_string(ctx, &this);
    let pos = to_integer(ctx, &arg(args, 0));
    let unit = if pos >= 0.0 { s.code_unit_at(pos as usize) } else { None };
    unit.map_or(Value::nan(), |u| Value::number(u as f64))
}

/// `String.prototype.indexOf(search, position)`
fn index_of(ctx: &mut Context, this: Value, args: &[Value]) -> Value {
    let haystack: Vec<u16> = this_string(ctx, &this).encode_utf16().collect();
    let needle: Vec<u16> = ctx.to_string(&arg(args, 0)).encode_utf16().collect();
    let start = to_integer(ctx, &arg(args, 1)).clamp(0.0, haystack.len() as f64) as usize;

    if needle.is_empty() {
        return Value::number(start as f64);
    }
    let found = haystack
        .get(start..)
        .and_then(|rest| rest.windows(needle.len()).position(|w| w == needle.as_slice()))
        .map(|i| (i + start) as f64);
    Value::number(found.unwrap_or(-1.0))
}

/// `String.prototype.toUpperCase()`
fn to_upper_case(ctx: &mut Context, this: Value, _args: &[Value]) -> Value {
    Value::string(this_string(ctx, &this).to_uppercase())
}

/// `String.prototype.toLowerCase()`
fn to_lower_case(ctx: &mut Context, this: Value, _args: &[Value]) -> Value {
    Value::string(this_string(ctx, &this).to_lowercase())
}

/// `String.prototype.trim()`
fn trim(ctx: &mut Context, this: Value, _args: &[Value]) -> Value {
    Value::string(this_string(ctx, &this).trim())
}

/// `String.prototype.valueOf()` and `toString()`
fn value_of(ctx: &mut Context, this: Value, _args: &[Value]) -> Value {
    Value::String(this_string(ctx, &this))
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use crate::context::Context;
    use crate::value::{Value, ValueKind};

    #[test]
    fn test_constructor_and_from_char_code() {
        let mut ctx = Context::new();
        assert_eq!(call_global(&mut ctx, "String", &[]).as_str(), Some(""));
        assert_eq!(call_global(&mut ctx, "String", &[Value::number(1.5)]).as_str(), Some("1.5"));
        assert_eq!(call_global(&mut ctx, "String", &[Value::null()]).as_str(), Some("null"));

        let string = ctx.lookup_variable("String");
        let codes = [Value::number(72.0), Value::number(105.0), Value::number(65536.0 + 33.0)];
        let r = call_method(&mut ctx, &string, "fromCharCode", &codes);
        assert_eq!(r.as_str(), Some("Hi!"));
    }

    #[test]
    fn test_char_access() {
        let mut ctx = Context::new();
        let s = Value::string("abc");
        assert_eq!(call_method(&mut ctx, &s, "charAt", &[Value::number(1.0)]).as_str(), Some("b"));
        assert_eq!(call_method(&mut ctx, &s, "charAt", &[]).as_str(), Some("a"));
        assert_eq!(call_method(&mut ctx, &s, "charAt", &[Value::number(7.0)]).as_str(), Some(""));
        assert_eq!(num(&call_method(&mut ctx, &s, "charCodeAt", &[Value::number(2.0)])), 99.0);
        assert!(num(&call_method(&mut ctx, &s, "charCodeAt", &[Value::number(-1.0)])).is_nan());

        let emoji = Value::string("\u{1F600}");
        assert_eq!(call_method(&mut ctx, &emoji, "charAt", &[]).as_str(), Some("\u{1F600}"));
        assert_eq!(ctx.get(&emoji, "0").as_str(), Some("\u{1F600}"));
        assert_eq!(num(&call_method(&mut ctx, &emoji, "charCodeAt", &[])), 0xD83D as f64);
    }

    #[test]
    fn test_index_of() {
        let mut ctx = Context::new();
        let s = Value::string("hello world");
        let find = |ctx: &mut Context, args: &[Value]| num(&call_method(ctx, &s, "indexOf", args));
        assert_eq!(find(&mut ctx, &[Value::string("o")]), 4.0);
        assert_eq!(find(&mut ctx, &[Value::string("o"), Value::number(5.0)]), 7.0);
        assert_eq!(find(&mut ctx, &[Value::string("xyz")]), -1.0);
        assert_eq!(find(&mut ctx, &[Value::string(""), Value::number(3.0)]), 3.0);
        assert_eq!(find(&mut ctx, &[Value::string(""), Value::number(99.0)]), 11.0);
    }

    #[test]
    fn test_case_and_trim() {
        let mut ctx = Context::new();
        let s = Value::string("  MiXed Case \n");
        let trimmed = call_method(&mut ctx, &s, "trim", &[]);
        assert_eq!(trimmed.as_str(), Some("MiXed Case"));
        assert_eq!(call_method(&mut ctx, &trimmed, "toUpperCase", &[]).as_str(), Some("MIXED CASE"));
        assert_eq!(call_method(&mut ctx, &trimmed, "toLowerCase", &[]).as_str(), Some("mixed case"));
    }

    #[test]
    fn test_boxed_string() {
        let mut ctx = Context::new();
        let boxed = ctx.cast(&Value::string("box"), ValueKind::Object);
        assert_eq!(call_method(&mut ctx, &boxed, "valueOf", &[]).as_str(), Some("box"));
        assert_eq!(call_method(&mut ctx, &boxed, "toString", &[]).as_str(), Some("box"));
        assert_eq!(call_method(&mut ctx, &boxed, "charAt", &[Value::number(2.0)]).as_str(), Some("x"));
    }
}
