//! Function constructor and Function.prototype

use crate::builtins::constructor;
use crate::context::Context;
use crate::runtime::arg;
use crate::value::Value;

pub fn bootstrap(ctx: &mut Context) -> Value {
    let proto = ctx.intrinsics().function_prototype;
    let ctor = constructor(ctx, "Function", 1, construct, proto);

    let proto = Value::Object(proto);
    ctx.define_native_function(&proto, "call", 1, call);
    ctx.define_native_function(&proto, "apply", 2, apply);
    ctx.define_native_function(&proto, "toString", 0, to_string);

    ctor
}

fn noop(_ctx: &mut Context, _this: Value, _args: &[Value]) -> Value {
    Value::undefined()
}

/// `Function(...)`: compiling source text is the evaluator's job, so this
/// yields a function that does nothing
fn construct(ctx: &mut Context, _this: Value, _args: &[Value]) -> Value {
    ctx.new_native_function("anonymous", 0, noop)
}

/// `Function.prototype.call(thisArg, ...args)`
fn call(ctx: &mut Context, this: Value, args: &[Value]) -> Value {
    let rest = args.get(1..).unwrap_or_default();
    ctx.call(&this, arg(args, 0), rest)
}

/// `Function.prototype.apply(thisArg, argsArray)`
fn apply(ctx: &mut Context, this: Value, args: &[Value]) -> Value {
    let list = arg(args, 1);
    let call_args = ctx
        .object(&list)
        .and_then(|o| o.as_array())
        .map(|arr| arr.as_slice().to_vec())
        .unwrap_or_default();
    ctx.call(&this, arg(args, 0), &call_args)
}

/// `Function.prototype.toString()`
fn to_string(ctx: &mut Context, this: Value, _args: &[Value]) -> Value {
    Value::String(ctx.to_string(&this))
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use crate::context::Context;
    use crate::value::Value;

    fn sum_with_this(ctx: &mut Context, this: Value, args: &[Value]) -> Value {
        let base = ctx.to_number(&this).value();
        let total: f64 = args.iter().map(|a| ctx.to_number(a).value()).sum();
        Value::number(base + total)
    }

    #[test]
    fn test_call_and_apply() {
        let mut ctx = Context::new();
        let f = ctx.new_native_function("sum", 0, sum_with_this);

        let r = call_method(&mut ctx, &f, "call", &[Value::number(100.0), Value::number(1.0), Value::number(2.0)]);
        assert_eq!(num(&r), 103.0);

        let list = ctx.new_array(vec![Value::number(3.0), Value::number(4.0)]);
        let r = call_method(&mut ctx, &f, "apply", &[Value::number(10.0), list]);
        assert_eq!(num(&r), 17.0);

        let r = call_method(&mut ctx, &f, "apply", &[Value::number(10.0)]);
        assert_eq!(num(&r), 10.0);
    }

    #[test]
    fn test_function_constructor_and_to_string() {
        let mut ctx = Context::new();
        let f = call_global(&mut ctx, "Function", &[Value::string("return 1")]);
        assert_eq!(ctx.type_of(&f), "function");
        assert!(ctx.call(&f, Value::undefined(), &[]).is_undefined());

        let r = call_method(&mut ctx, &f, "toString", &[]);
        assert_eq!(r.as_str(), Some("function anonymous() { [native code] }"));
    }

    #[test]
    fn test_function_prototype_is_callable() {
        let mut ctx = Context::new();
        let proto = Value::Object(ctx.intrinsics().function_prototype);
        assert_eq!(ctx.type_of(&proto), "function");
        assert!(ctx.call(&proto, Value::undefined(), &[]).is_undefined());
        assert!(ctx.last_error().is_none());
    }
}
