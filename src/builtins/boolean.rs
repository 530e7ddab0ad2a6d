//! Boolean constructor and Boolean.prototype

use crate::builtins::constructor;
use crate::context::Context;
use crate::runtime::{arg, ObjectClass};
use crate::value::Value;

pub fn bootstrap(ctx: &mut Context) -> Value {
    let proto = ctx.intrinsics().boolean_prototype;
    let ctor = constructor(ctx, "Boolean", 1, construct, proto);

    let proto = Value::Object(proto);
    ctx.define_native_function(&proto, "toString", 0, to_string);
    ctx.define_native_function(&proto, "valueOf", 0, value_of);

    ctor
}

fn this_boolean(ctx: &Context, this: &Value) -> bool {
    match this {
        Value::Boolean(b) => *b,
        Value::Object(_) => matches!(
            ctx.object(this).map(|o| &o.class),
            Some(ObjectClass::Boxed(Value::Boolean(true)))
        ),
        _ => false,
    }
}

/// `Boolean(value)`
fn construct(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    Value::boolean(ctx.to_boolean(&arg(args, 0)))
}

/// `Boolean.prototype.toString()`
fn to_string(ctx: &mut Context, this: Value, _args: &[Value]) -> Value {
    Value::string(if this_boolean(ctx, &this) { "true" } else { "false" })
}

/// `Boolean.prototype.valueOf()`
fn value_of(ctx: &mut Context, this: Value, _args: &[Value]) -> Value {
    Value::boolean(this_boolean(ctx, &this))
}
