//! Math namespace
//!
//! Constants are read-only; every function coerces its arguments to numbers.

use std::f64::consts;

use crate::context::Context;
use crate::runtime::{arg, Attributes, NativeFn, Property};
use crate::value::Value;

const CONSTANTS: &[(&str, f64)] = &[
    ("E", consts::E),
    ("LN10", consts::LN_10),
    ("LN2", consts::LN_2),
    ("LOG10E", consts::LOG10_E),
    ("LOG2E", consts::LOG2_E),
    ("PI", consts::PI),
    ("SQRT1_2", consts::FRAC_1_SQRT_2),
    ("SQRT2", consts::SQRT_2),
];

const FUNCTIONS: &[(&str, u32, NativeFn)] = &[
    ("abs", 1, abs),
    ("ceil", 1, ceil),
    ("floor", 1, floor),
    ("round", 1, round),
    ("sqrt", 1, sqrt),
    ("pow", 2, pow),
    ("min", 2, min),
    ("max", 2, max),
    ("sin", 1, sin),
    ("cos", 1, cos),
    ("tan", 1, tan),
    ("atan2", 2, atan2),
    ("exp", 1, exp),
    ("log", 1, log),
];

pub fn bootstrap(ctx: &mut Context) -> Value {
    let math = ctx.new_object();
    for &(name, value) in CONSTANTS {
        ctx.define_property(&math, Property::new(name, Value::number(value), Attributes::NONE));
    }
    for &(name, arity, func) in FUNCTIONS {
        ctx.define_native_function(&math, name, arity, func);
    }
    math
}

fn number_arg(ctx: &Context, args: &[Value], index: usize) -> f64 {
    ctx.to_number(&arg(args, index)).value()
}

fn unary(ctx: &Context, args: &[Value], f: fn(f64) -> f64) -> Value {
    Value::number(f(number_arg(ctx, args, 0)))
}

fn abs(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    unary(ctx, args, f64::abs)
}

fn ceil(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    unary(ctx, args, f64::ceil)
}

fn floor(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    unary(ctx, args, f64::floor)
}

/// Rounds half up, toward positive infinity
fn round(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    unary(ctx, args, |x| {
        if !x.is_finite() || x == 0.0 {
            return x;
        }
        if (-0.5..0.0).contains(&x) {
            return -0.0;
        }
        let f = x.floor();
        if x - f >= 0.5 { f + 1.0 } else { f }
    })
}

fn sqrt(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    unary(ctx, args, f64::sqrt)
}

fn pow(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    let base = number_arg(ctx, args, 0);
    let exponent = number_arg(ctx, args, 1);
    // 1 ** NaN and (-1) ** Infinity are NaN in JavaScript
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        return Value::nan();
    }
    Value::number(base.powf(exponent))
}

fn extremum(ctx: &Context, args: &[Value], init: f64, pick: fn(f64, f64) -> f64) -> Value {
    let mut result = init;
    for a in args {
        let n = ctx.to_number(a).value();
        if n.is_nan() {
            return Value::nan();
        }
        result = pick(result, n);
    }
    Value::number(result)
}

fn min(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    extremum(ctx, args, f64::INFINITY, |a, b| {
        if a == b && a == 0.0 {
            if a.is_sign_negative() { a } else { b }
        } else {
            a.min(b)
        }
    })
}

fn max(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    extremum(ctx, args, f64::NEG_INFINITY, |a, b| {
        if a == b && a == 0.0 {
            if a.is_sign_positive() { a } else { b }
        } else {
            a.max(b)
        }
    })
}

fn sin(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    unary(ctx, args, f64::sin)
}

fn cos(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    unary(ctx, args, f64::cos)
}

fn tan(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    unary(ctx, args, f64::tan)
}

fn atan2(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    let y = number_arg(ctx, args, 0);
    let x = number_arg(ctx, args, 1);
    Value::number(y.atan2(x))
}

fn exp(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    unary(ctx, args, f64::exp)
}

fn log(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    unary(ctx, args, f64::ln)
}
