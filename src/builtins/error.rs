//! Error constructor and Error.prototype

use crate::builtins::constructor;
use crate::context::Context;
use crate::runtime::{arg, JSObject};
use crate::value::Value;

pub fn bootstrap(ctx: &mut Context) -> Value {
    let proto = ctx.intrinsics().error_prototype;
    let ctor = constructor(ctx, "Error", 1, construct, proto);

    let proto = Value::Object(proto);
    ctx.define_builtin(&proto, "name", Value::string("Error"));
    ctx.define_builtin(&proto, "message", Value::string(""));
    ctx.define_native_function(&proto, "toString", 0, to_string);

    ctor
}

/// `Error(message)`
fn construct(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    let proto = Some(ctx.intrinsics().error_prototype);
    let err = Value::Object(ctx.alloc_object(JSObject::ordinary(proto)));

    let message = arg(args, 0);
    if !message.is_undefined() {
        let text = ctx.to_string(&message);
        ctx.define_builtin(&err, "message", Value::String(text));
    }
    err
}

/// `Error.prototype.toString()`
fn to_string(ctx: &mut Context, this: Value, _args: &[Value]) -> Value {
    let name = match ctx.get(&this, "name") {
        Value::Undefined => "Error".into(),
        v => ctx.to_string(&v),
    };
    let message = match ctx.get(&this, "message") {
        Value::Undefined => "".into(),
        v => ctx.to_string(&v),
    };

    let text = match (name.is_empty(), message.is_empty()) {
        (_, true) => name.to_string(),
        (true, false) => message.to_string(),
        (false, false) => format!("{name}: {message}"),
    };
    Value::string(text)
}
