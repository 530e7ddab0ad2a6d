//! console namespace

use crate::context::Context;
use crate::error::RuntimeError;
use crate::runtime::arg;
use crate::value::Value;

pub fn bootstrap(ctx: &mut Context) -> Value {
    let console = ctx.new_object();
    ctx.define_native_function(&console, "log", 1, log);
    ctx.define_native_function(&console, "error", 1, error);
    ctx.define_native_function(&console, "assert", 2, assert);
    console
}

fn format_args(ctx: &Context, args: &[Value]) -> String {
    args.iter()
        .map(|a| ctx.to_string(a).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `console.log(...values)`, also bound as `print`
pub fn log(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    let line = format_args(ctx, args);
    ctx.write_output(&line);
    Value::undefined()
}

/// `console.error(...values)`
pub fn error(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    let line = format_args(ctx, args);
    ctx.write_output(&line);
    Value::undefined()
}

/// `console.assert(condition, message)`
pub fn assert(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    if ctx.to_boolean(&arg(args, 0)) {
        return Value::undefined();
    }

    let message = match args.get(1) {
        Some(msg) => ctx.to_string(msg).to_string(),
        None => "console.assert".to_string(),
    };
    tracing::warn!(%message, "assertion failed");
    let err = RuntimeError::AssertionFailed(message);
    ctx.write_output(&err.to_string());
    ctx.record_error(err)
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use crate::context::Context;
    use crate::error::RuntimeError;
    use crate::value::Value;

    #[test]
    fn test_log_joins_with_spaces() {
        let mut ctx = Context::new();
        let out = Capture::install(&mut ctx);
        let console = ctx.lookup_variable("console");
        let arr = ctx.new_array(vec![Value::number(1.0), Value::null(), Value::number(3.0)]);

        call_method(&mut ctx, &console, "log", &[Value::string("a"), Value::boolean(true), arr]);
        call_method(&mut ctx, &console, "error", &[Value::undefined()]);
        call_method(&mut ctx, &console, "log", &[]);
        assert_eq!(out.contents(), "a true 1,,3\nundefined\n\n");
    }

    #[test]
    fn test_assert_records_failure() {
        let mut ctx = Context::new();
        let out = Capture::install(&mut ctx);
        let console = ctx.lookup_variable("console");

        call_method(&mut ctx, &console, "assert", &[Value::number(1.0), Value::string("fine")]);
        assert!(ctx.last_error().is_none());
        assert!(out.contents().is_empty());

        let r = call_method(&mut ctx, &console, "assert", &[Value::string(""), Value::string("empty")]);
        assert!(r.is_undefined());
        assert!(matches!(ctx.take_error(), Some(RuntimeError::AssertionFailed(m)) if m == "empty"));
        assert_eq!(out.contents(), "Assertion failed: empty\n");
    }
}
