//! Object constructor and Object.prototype

use crate::builtins::constructor;
use crate::context::Context;
use crate::runtime::{arg, JsString, ObjectClass, Property};
use crate::value::{Value, ValueKind};

pub fn bootstrap(ctx: &mut Context) -> Value {
    let proto = ctx.intrinsics().object_prototype;
    let ctor = constructor(ctx, "Object", 1, construct, proto);

    ctx.define_native_function(&ctor, "keys", 1, keys);
    ctx.define_native_function(&ctor, "create", 2, create);
    ctx.define_native_function(&ctor, "getPrototypeOf", 1, get_prototype_of);
    ctx.define_native_function(&ctor, "defineProperty", 3, define_property);

    let proto = Value::Object(proto);
    ctx.define_native_function(&proto, "hasOwnProperty", 1, has_own_property);
    ctx.define_native_function(&proto, "isPrototypeOf", 1, is_prototype_of);
    ctx.define_native_function(&proto, "toString", 0, to_string);
    ctx.define_native_function(&proto, "valueOf", 0, value_of);

    ctor
}

/// `Object(value)`
fn construct(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    ctx.cast(&arg(args, 0), ValueKind::Object)
}

/// `Object.keys(obj)`
fn keys(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    let keys = ctx
        .own_keys(&arg(args, 0))
        .into_iter()
        .map(Value::String)
        .collect();
    ctx.new_array(keys)
}

/// `Object.create(proto)`
fn create(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    match arg(args, 0) {
        Value::Null => ctx.new_object_with_proto(None),
        Value::Object(r) if ctx.heap().contains(r) => ctx.new_object_with_proto(Some(r)),
        other => {
            tracing::warn!(proto = ?other, "Object.create called with a non-object prototype");
            Value::undefined()
        }
    }
}

/// `Object.getPrototypeOf(obj)`
fn get_prototype_of(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    match ctx.prototype_of(&arg(args, 0)) {
        Some(proto) => Value::Object(proto),
        None => Value::null(),
    }
}

/// `Object.defineProperty(obj, name, descriptor)`
///
/// Absent descriptor flags default to false.
fn define_property(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    let target = arg(args, 0);
    let name = ctx.to_string(&arg(args, 1));
    let descriptor = arg(args, 2);

    let property = Property {
        name,
        value: ctx.get(&descriptor, "value"),
        writable: descriptor_flag(ctx, &descriptor, "writable"),
        enumerable: descriptor_flag(ctx, &descriptor, "enumerable"),
        configurable: descriptor_flag(ctx, &descriptor, "configurable"),
    };
    ctx.define_property(&target, property);
    target
}

fn descriptor_flag(ctx: &Context, descriptor: &Value, field: &str) -> bool {
    ctx.to_boolean(&ctx.get(descriptor, field))
}

/// `Object.prototype.hasOwnProperty(name)`
fn has_own_property(ctx: &mut Context, this: Value, args: &[Value]) -> Value {
    let name = ctx.to_string(&arg(args, 0));
    let own = match ctx.object(&this) {
        Some(obj) => {
            obj.properties.has(&name)
                || obj.as_array().is_some_and(|arr| {
                    name.as_str() == "length" || JsString::as_array_index(&name).is_some_and(|i| i < arr.len())
                })
        }
        None => false,
    };
    Value::boolean(own)
}

/// `Object.prototype.isPrototypeOf(value)`
fn is_prototype_of(ctx: &mut Context, this: Value, args: &[Value]) -> Value {
    let result = match this.as_object() {
        Some(proto) => ctx.inherits_from(&arg(args, 0), proto),
        None => false,
    };
    Value::boolean(result)
}

/// `Object.prototype.toString()`
fn to_string(ctx: &mut Context, this: Value, _args: &[Value]) -> Value {
    let tag = match &this {
        Value::Undefined => "Undefined",
        Value::Null => "Null",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Boolean(_) => "Boolean",
        Value::Object(_) => match ctx.object(&this).map(|o| &o.class) {
            Some(ObjectClass::Array(_)) => "Array",
            Some(ObjectClass::Function(_)) => "Function",
            Some(ObjectClass::Date(_)) => "Date",
            Some(ObjectClass::Boxed(inner)) => match inner {
                Value::Number(_) => "Number",
                Value::String(_) => "String",
                _ => "Boolean",
            },
            _ => "Object",
        },
    };
    Value::string(format!("[object {tag}]"))
}

/// `Object.prototype.valueOf()`
fn value_of(_ctx: &mut Context, this: Value, _args: &[Value]) -> Value {
    this
}
