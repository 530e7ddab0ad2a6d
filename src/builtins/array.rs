//! Array constructor and Array.prototype

use crate::builtins::{constructor, to_integer};
use crate::context::Context;
use crate::error::RuntimeError;
use crate::runtime::{arg, JSArray, JSObject, ObjectClass, MAX_ARRAY_LENGTH};
use crate::value::Value;

pub fn bootstrap(ctx: &mut Context) -> Value {
    let proto = ctx.intrinsics().array_prototype;
    let ctor = constructor(ctx, "Array", 1, construct, proto);

    ctx.define_native_function(&ctor, "isArray", 1, is_array);

    let proto = Value::Object(proto);
    ctx.define_native_function(&proto, "push", 1, push);
    ctx.define_native_function(&proto, "pop", 0, pop);
    ctx.define_native_function(&proto, "join", 1, join);
    ctx.define_native_function(&proto, "indexOf", 1, index_of);
    ctx.define_native_function(&proto, "toString", 0, to_string);

    ctor
}

/// `Array(...items)` or `Array(length)`
///
/// Also bound to the typed-array constructor names.
pub fn construct(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    let array = match args {
        [Value::Number(n)] => {
            let len = n.value();
            if !n.is_finite() || len < 0.0 || len.fract() != 0.0 || len > MAX_ARRAY_LENGTH as f64 {
                let shown = ctx.to_string(&args[0]).to_string();
                return ctx.record_error(RuntimeError::InvalidArrayLength(shown));
            }
            if !ctx.reserve_array_length(len as usize) {
                return Value::undefined();
            }
            JSArray::with_length(len as u32)
        }
        _ => JSArray::from_values(args.to_vec()),
    };

    let proto = Some(ctx.intrinsics().array_prototype);
    Value::Object(ctx.alloc_object(JSObject::new(proto, ObjectClass::Array(array))))
}

/// `Array.isArray(value)`
fn is_array(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    let value = arg(args, 0);
    Value::boolean(ctx.object(&value).is_some_and(JSObject::is_array))
}

/// `Array.prototype.push(...items)`
fn push(ctx: &mut Context, this: Value, args: &[Value]) -> Value {
    let len = ctx.object(&this).and_then(JSObject::as_array).map_or(0, JSArray::len);
    if !ctx.reserve_array_length(len as usize + args.len()) {
        return Value::number(len as f64);
    }
    let Some(arr) = ctx.object_mut(&this).and_then(JSObject::as_array_mut) else {
        return Value::undefined();
    };
    for item in args {
        if !arr.push(item.clone()) {
            break;
        }
    }
    Value::number(arr.len() as f64)
}

/// `Array.prototype.pop()`
fn pop(ctx: &mut Context, this: Value, _args: &[Value]) -> Value {
    ctx.object_mut(&this)
        .and_then(JSObject::as_array_mut)
        .and_then(JSArray::pop)
        .unwrap_or_default()
}

fn elements(ctx: &Context, this: &Value) -> Vec<Value> {
    ctx.object(this)
        .and_then(JSObject::as_array)
        .map(|arr| arr.as_slice().to_vec())
        .unwrap_or_default()
}

fn join_with(ctx: &Context, this: &Value, separator: &str) -> Value {
    let parts: Vec<String> = elements(ctx, this)
        .iter()
        .map(|v| match v {
            Value::Undefined | Value::Null => String::new(),
            // The element refers back to the array being joined
            Value::Object(_) if ctx.strict_equals(v, this) => String::new(),
            other => ctx.to_string(other).to_string(),
        })
        .collect();
    Value::string(parts.join(separator))
}

/// `Array.prototype.join(separator)`
fn join(ctx: &mut Context, this: Value, args: &[Value]) -> Value {
    let separator = match arg(args, 0) {
        Value::Undefined => ",".into(),
        sep => ctx.to_string(&sep),
    };
    join_with(ctx, &this, &separator)
}

/// `Array.prototype.indexOf(search, fromIndex)`
fn index_of(ctx: &mut Context, this: Value, args: &[Value]) -> Value {
    let search = arg(args, 0);
    let items = elements(ctx, &this);
    let len = items.len() as f64;

    let mut start = to_integer(ctx, &arg(args, 1));
    if start < 0.0 {
        start = (len + start).max(0.0);
    }

    let found = items
        .iter()
        .enumerate()
        .skip(start.min(len) as usize)
        .find(|(_, item)| ctx.strict_equals(item, &search))
        .map(|(i, _)| i as f64);
    Value::number(found.unwrap_or(-1.0))
}

/// `Array.prototype.toString()`
fn to_string(ctx: &mut Context, this: Value, _args: &[Value]) -> Value {
    join_with(ctx, &this, ",")
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use crate::config::EngineConfig;
    use crate::context::Context;
    use crate::error::RuntimeError;
    use crate::value::Value;

    #[test]
    fn test_constructor() {
        let mut ctx = Context::new();
        let arr = call_global(&mut ctx, "Array", &[Value::number(1.0), Value::string("b")]);
        assert_eq!(text(&ctx, &arr), "1,b");

        let sized = call_global(&mut ctx, "Array", &[Value::number(4.0)]);
        assert_eq!(num(&ctx.get(&sized, "length")), 4.0);
        assert!(ctx.get(&sized, "0").is_undefined());

        let single = call_global(&mut ctx, "Array", &[Value::string("4")]);
        assert_eq!(num(&ctx.get(&single, "length")), 1.0);

        let bad = call_global(&mut ctx, "Array", &[Value::number(-1.0)]);
        assert!(bad.is_undefined());
        assert!(matches!(ctx.take_error(), Some(RuntimeError::InvalidArrayLength(s)) if s == "-1"));
    }

    #[test]
    fn test_huge_length_is_refused() {
        let mut ctx = Context::new();
        for name in ["Array", "Float32Array"] {
            let huge = call_global(&mut ctx, name, &[Value::number(1e9)]);
            assert!(huge.is_undefined());
            assert!(matches!(ctx.take_error(), Some(RuntimeError::InvalidArrayLength(_))));
        }

        let mut ctx = Context::with_config(EngineConfig::default().with_max_dense_length(2));
        let arr = ctx.new_array(vec![Value::number(1.0)]);
        let len = call_method(&mut ctx, &arr, "push", &[Value::number(2.0), Value::number(3.0)]);
        assert_eq!(num(&len), 1.0);
        assert!(ctx.take_error().is_some());
        assert_eq!(num(&call_method(&mut ctx, &arr, "push", &[Value::number(2.0)])), 2.0);
    }

    #[test]
    fn test_is_array() {
        let mut ctx = Context::new();
        let array = ctx.lookup_variable("Array");
        let arr = ctx.new_array(vec![]);
        let obj = ctx.new_object();
        assert_eq!(call_method(&mut ctx, &array, "isArray", &[arr]).as_bool(), Some(true));
        assert_eq!(call_method(&mut ctx, &array, "isArray", &[obj]).as_bool(), Some(false));
        assert_eq!(call_method(&mut ctx, &array, "isArray", &[]).as_bool(), Some(false));
    }

    #[test]
    fn test_push_pop() {
        let mut ctx = Context::new();
        let arr = ctx.new_array(vec![]);
        let len = call_method(&mut ctx, &arr, "push", &[Value::number(1.0), Value::number(2.0)]);
        assert_eq!(num(&len), 2.0);
        assert_eq!(num(&call_method(&mut ctx, &arr, "pop", &[])), 2.0);
        assert_eq!(num(&call_method(&mut ctx, &arr, "pop", &[])), 1.0);
        assert!(call_method(&mut ctx, &arr, "pop", &[]).is_undefined());

        let not_array = ctx.new_object();
        let push = ctx.get(&arr, "push");
        assert!(ctx.call(&push, not_array, &[Value::null()]).is_undefined());
    }

    #[test]
    fn test_join_and_to_string() {
        let mut ctx = Context::new();
        let inner = ctx.new_array(vec![Value::number(2.0), Value::number(3.0)]);
        let arr = ctx.new_array(vec![Value::number(1.0), Value::null(), inner, Value::undefined()]);

        assert_eq!(call_method(&mut ctx, &arr, "join", &[]).as_str(), Some("1,,2,3,"));
        assert_eq!(
            call_method(&mut ctx, &arr, "join", &[Value::string(" - ")]).as_str(),
            Some("1 -  - 2,3 - ")
        );
        assert_eq!(call_method(&mut ctx, &arr, "toString", &[]).as_str(), Some("1,,2,3,"));

        ctx.set(&arr, "1", arr.clone());
        assert_eq!(call_method(&mut ctx, &arr, "join", &[]).as_str(), Some("1,,2,3,"));
    }

    #[test]
    fn test_index_of() {
        let mut ctx = Context::new();
        let obj = ctx.new_object();
        let arr = ctx.new_array(vec![
            Value::number(1.0),
            Value::string("1"),
            obj.clone(),
            Value::number(1.0),
            Value::nan(),
        ]);

        assert_eq!(num(&call_method(&mut ctx, &arr, "indexOf", &[Value::string("1")])), 1.0);
        assert_eq!(num(&call_method(&mut ctx, &arr, "indexOf", &[obj])), 2.0);
        assert_eq!(num(&call_method(&mut ctx, &arr, "indexOf", &[Value::number(1.0), Value::number(1.0)])), 3.0);
        assert_eq!(num(&call_method(&mut ctx, &arr, "indexOf", &[Value::number(1.0), Value::number(-2.0)])), 3.0);
        assert_eq!(num(&call_method(&mut ctx, &arr, "indexOf", &[Value::nan()])), -1.0);
        assert_eq!(num(&call_method(&mut ctx, &arr, "indexOf", &[Value::null()])), -1.0);
    }
}
