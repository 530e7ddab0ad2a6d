//! Number constructor and Number.prototype

use crate::builtins::{constructor, to_integer};
use crate::context::Context;
use crate::runtime::{arg, Attributes, ObjectClass, Property};
use crate::util::dtoa;
use crate::value::{Number, Value};

pub fn bootstrap(ctx: &mut Context) -> Value {
    let proto = ctx.intrinsics().number_prototype;
    let ctor = constructor(ctx, "Number", 1, construct, proto);

    let constants = [
        ("MAX_VALUE", Value::number(f64::MAX)),
        ("MIN_VALUE", Value::number(5e-324)),
        ("NaN", Value::nan()),
        ("POSITIVE_INFINITY", Value::infinity()),
        ("NEGATIVE_INFINITY", Value::number(f64::NEG_INFINITY)),
    ];
    for (name, value) in constants {
        ctx.define_property(&ctor, Property::new(name, value, Attributes::NONE));
    }

    let proto = Value::Object(proto);
    ctx.define_native_function(&proto, "toString", 1, to_string);
    ctx.define_native_function(&proto, "toFixed", 1, to_fixed);
    ctx.define_native_function(&proto, "valueOf", 0, value_of);

    ctor
}

/// Receiver as a number; boxed numbers unwrap, anything else is NaN
fn this_number(ctx: &Context, this: &Value) -> Number {
    match this {
        Value::Number(n) => *n,
        Value::Object(_) => match ctx.object(this).map(|o| &o.class) {
            Some(ObjectClass::Boxed(Value::Number(n))) => *n,
            _ => Number::NAN,
        },
        _ => Number::NAN,
    }
}

/// `Number(value)`
fn construct(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    match args.first() {
        Some(v) => Value::Number(ctx.to_number(v)),
        None => Value::number(0.0),
    }
}

/// `Number.prototype.toString(radix)`
fn to_string(ctx: &mut Context, this: Value, args: &[Value]) -> Value {
    let n = this_number(ctx, &this);
    let radix = match arg(args, 0) {
        Value::Undefined => 10,
        r => {
            let radix = to_integer(ctx, &r);
            if !(2.0..=36.0).contains(&radix) {
                tracing::warn!(radix, "toString radix out of range, using 10");
                10
            } else {
                radix as u32
            }
        }
    };
    Value::string(dtoa::number_to_radix_string(n.value(), radix))
}

/// `Number.prototype.toFixed(digits)`
fn to_fixed(ctx: &mut Context, this: Value, args: &[Value]) -> Value {
    let n = this_number(ctx, &this);
    let digits = to_integer(ctx, &arg(args, 0)).clamp(0.0, 100.0) as usize;
    Value::string(format_fixed(n, digits))
}

/// Fixed-point formatting; ties round away from zero
fn format_fixed(n: Number, digits: usize) -> String {
    let x = n.value();
    if n.is_nan() || !n.is_finite() || x.abs() >= 1e21 {
        return dtoa::number_to_string(x);
    }

    let scale = 10f64.powi(digits as i32);
    let scaled = x.abs() * scale;
    let magnitude = if scaled.fract() == 0.5 && scaled < 2f64.powi(53) {
        (scaled.ceil() / scale).abs()
    } else {
        x.abs()
    };

    let text = format!("{:.*}", digits, magnitude);
    if x < 0.0 { format!("-{text}") } else { text }
}

/// `Number.prototype.valueOf()`
fn value_of(ctx: &mut Context, this: Value, _args: &[Value]) -> Value {
    Value::Number(this_number(ctx, &this))
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use super::format_fixed;
    use crate::context::Context;
    use crate::value::{Number, Value, ValueKind};

    #[test]
    fn test_constructor_and_constants() {
        let mut ctx = Context::new();
        assert_eq!(num(&call_global(&mut ctx, "Number", &[])), 0.0);
        assert_eq!(num(&call_global(&mut ctx, "Number", &[Value::string(" 0x10 ")])), 16.0);
        assert!(num(&call_global(&mut ctx, "Number", &[Value::string("12px")])).is_nan());

        let number = ctx.lookup_variable("Number");
        assert_eq!(num(&ctx.get(&number, "MAX_VALUE")), f64::MAX);
        assert!(num(&ctx.get(&number, "MIN_VALUE")) > 0.0);
        assert!(num(&ctx.get(&number, "NaN")).is_nan());
        assert_eq!(num(&ctx.get(&number, "NEGATIVE_INFINITY")), f64::NEG_INFINITY);
        assert!(!ctx.set(&number, "MAX_VALUE", Value::number(1.0)));
    }

    #[test]
    fn test_to_string_radix() {
        let mut ctx = Context::new();
        let n = Value::number(255.0);
        assert_eq!(call_method(&mut ctx, &n, "toString", &[]).as_str(), Some("255"));
        assert_eq!(call_method(&mut ctx, &n, "toString", &[Value::number(16.0)]).as_str(), Some("ff"));
        assert_eq!(call_method(&mut ctx, &n, "toString", &[Value::number(2.0)]).as_str(), Some("11111111"));
        assert_eq!(call_method(&mut ctx, &n, "toString", &[Value::number(99.0)]).as_str(), Some("255"));
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(format_fixed(Number::new(3.14159), 2), "3.14");
        assert_eq!(format_fixed(Number::new(2.5), 0), "3");
        assert_eq!(format_fixed(Number::new(-2.5), 0), "-3");
        assert_eq!(format_fixed(Number::new(-0.0001), 2), "-0.00");
        assert_eq!(format_fixed(Number::new(-0.0), 1), "0.0");
        assert_eq!(format_fixed(Number::new(1e21), 2), "1e+21");
        assert_eq!(format_fixed(Number::NAN, 2), "NaN");

        let mut ctx = Context::new();
        let r = call_method(&mut ctx, &Value::number(1.005), "toFixed", &[Value::number(1.0)]);
        assert_eq!(r.as_str(), Some("1.0"));
    }

    #[test]
    fn test_value_of() {
        let mut ctx = Context::new();
        let boxed = ctx.cast(&Value::number(9.0), ValueKind::Object);
        assert_eq!(num(&call_method(&mut ctx, &boxed, "valueOf", &[])), 9.0);

        let value_of = ctx.get(&boxed, "valueOf");
        let plain = ctx.new_object();
        assert!(num(&ctx.call(&value_of, plain, &[])).is_nan());
    }
}
