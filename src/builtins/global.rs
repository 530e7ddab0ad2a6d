//! Global functions
//!
//! `isNaN`, `isFinite`, `parseInt`, `parseFloat`, `eval`, `load` and the
//! optional `gc`.

use std::path::Path;

use crate::context::Context;
use crate::runtime::arg;
use crate::runtime::convert;
use crate::value::Value;

/// `isNaN(value)`
pub fn is_nan(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    Value::boolean(ctx.to_number(&arg(args, 0)).is_nan())
}

/// `isFinite(value)`
pub fn is_finite(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    Value::boolean(ctx.to_number(&arg(args, 0)).is_finite())
}

/// `parseInt(string, radix)`
pub fn parse_int(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    let text = ctx.to_string(&arg(args, 0));
    let radix = match arg(args, 1) {
        Value::Undefined => None,
        r => Some(ctx.to_number(&r)),
    };
    Value::Number(convert::parse_int(&text, radix))
}

/// `parseFloat(string)`
pub fn parse_float(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    let text = ctx.to_string(&arg(args, 0));
    Value::Number(convert::parse_float(&text))
}

/// `eval(source)`; source evaluation belongs to the evaluator
pub fn eval(_ctx: &mut Context, _this: Value, _args: &[Value]) -> Value {
    Value::undefined()
}

/// `load(path)`: run a file through the host's file evaluator
pub fn load(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    let path = ctx.to_string(&arg(args, 0));
    match ctx.load_file(Path::new(path.as_str())) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(path = %path, error = %err, "load failed");
            ctx.record_error(err)
        }
    }
}

/// `gc()`: force a full collection
pub fn gc(ctx: &mut Context, _this: Value, _args: &[Value]) -> Value {
    ctx.gc();
    Value::undefined()
}
