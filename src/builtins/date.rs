//! Date constructor and Date.prototype
//!
//! Dates hold a UTC time value in milliseconds; there is no local time zone
//! support.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::builtins::constructor;
use crate::context::Context;
use crate::runtime::JSObject;
use crate::util::format_iso_date;
use crate::value::Value;

pub fn bootstrap(ctx: &mut Context) -> Value {
    let proto = ctx.intrinsics().date_prototype;
    let ctor = constructor(ctx, "Date", 1, construct, proto);

    ctx.define_native_function(&ctor, "now", 0, now);

    let proto = Value::Object(proto);
    ctx.define_native_function(&proto, "getTime", 0, get_time);
    ctx.define_native_function(&proto, "valueOf", 0, get_time);
    ctx.define_native_function(&proto, "toISOString", 0, to_iso_string);

    ctor
}

fn current_time() -> f64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis() as f64,
        Err(before) => -(before.duration().as_millis() as f64),
    }
}

fn this_time(ctx: &Context, this: &Value) -> f64 {
    ctx.object(this).and_then(JSObject::as_date).unwrap_or(f64::NAN)
}

/// `Date(ms)`; without an argument the current time
fn construct(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    let time = match args.first() {
        Some(v) => ctx.to_number(v).value(),
        None => current_time(),
    };
    ctx.new_date(time)
}

/// `Date.now()`
fn now(_ctx: &mut Context, _this: Value, _args: &[Value]) -> Value {
    Value::number(current_time())
}

/// `Date.prototype.getTime()` and `valueOf()`
fn get_time(ctx: &mut Context, this: Value, _args: &[Value]) -> Value {
    Value::number(this_time(ctx, &this))
}

/// `Date.prototype.toISOString()`
fn to_iso_string(ctx: &mut Context, this: Value, _args: &[Value]) -> Value {
    match format_iso_date(this_time(ctx, &this)) {
        Some(text) => Value::string(text),
        None => Value::string("Invalid Date"),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use crate::context::Context;
    use crate::value::Value;

    #[test]
    fn test_date_from_time_value() {
        let mut ctx = Context::new();
        let d = call_global(&mut ctx, "Date", &[Value::number(86_400_000.0 + 1.9)]);
        assert_eq!(num(&call_method(&mut ctx, &d, "getTime", &[])), 86_400_001.0);
        assert_eq!(num(&call_method(&mut ctx, &d, "valueOf", &[])), 86_400_001.0);
        assert_eq!(
            call_method(&mut ctx, &d, "toISOString", &[]).as_str(),
            Some("1970-01-02T00:00:00.001Z")
        );
        assert_eq!(ctx.to_number(&d).value(), 86_400_001.0);
    }

    #[test]
    fn test_invalid_date() {
        let mut ctx = Context::new();
        let d = call_global(&mut ctx, "Date", &[Value::string("not a number")]);
        assert!(num(&call_method(&mut ctx, &d, "getTime", &[])).is_nan());
        assert_eq!(call_method(&mut ctx, &d, "toISOString", &[]).as_str(), Some("Invalid Date"));

        let too_far = call_global(&mut ctx, "Date", &[Value::number(8.64e15 + 1.0)]);
        assert!(num(&call_method(&mut ctx, &too_far, "getTime", &[])).is_nan());
    }

    #[test]
    fn test_now() {
        let mut ctx = Context::new();
        let date = ctx.lookup_variable("Date");
        let before = num(&call_method(&mut ctx, &date, "now", &[]));
        let d = call_global(&mut ctx, "Date", &[]);
        let t = num(&call_method(&mut ctx, &d, "getTime", &[]));
        assert!(before > 1.5e12);
        assert!(t >= before);
    }
}
