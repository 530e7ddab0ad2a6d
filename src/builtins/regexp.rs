//! RegExp constructor and RegExp.prototype
//!
//! Patterns are compiled with `regress`, which follows JavaScript regexp
//! syntax, and matched over UTF-16 code units so `lastIndex` needs no
//! translation.

use regress::Regex;

use crate::builtins::{constructor, to_integer};
use crate::context::Context;
use crate::runtime::{arg, Attributes, JSObject, Property};
use crate::value::Value;

/// Source text of a regexp built from an empty pattern
const EMPTY_SOURCE: &str = "(?:)";

pub fn bootstrap(ctx: &mut Context) -> Value {
    let proto = ctx.intrinsics().regexp_prototype;
    let ctor = constructor(ctx, "RegExp", 2, construct, proto);

    let proto = Value::Object(proto);
    ctx.define_native_function(&proto, "test", 1, test);
    ctx.define_native_function(&proto, "toString", 0, to_string);

    ctor
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Flags {
    global: bool,
    ignore_case: bool,
    multiline: bool,
}

impl Flags {
    fn parse(text: &str) -> Self {
        let mut flags = Flags::default();
        for c in text.chars() {
            match c {
                'g' => flags.global = true,
                'i' => flags.ignore_case = true,
                'm' => flags.multiline = true,
                other => tracing::warn!(flag = %other, "ignoring unsupported regexp flag"),
            }
        }
        flags
    }
}

/// `RegExp(pattern, flags)`
fn construct(ctx: &mut Context, _this: Value, args: &[Value]) -> Value {
    let pattern = arg(args, 0);
    let source = match &pattern {
        Value::Undefined => EMPTY_SOURCE.to_string(),
        // Copy the source of an existing regexp
        Value::Object(_) if ctx.inherits_from(&pattern, ctx.intrinsics().regexp_prototype) => {
            ctx.to_string(&ctx.get(&pattern, "source")).to_string()
        }
        other => ctx.to_string(other).to_string(),
    };
    let source = if source.is_empty() { EMPTY_SOURCE.to_string() } else { source };

    let flags = match arg(args, 1) {
        Value::Undefined => Flags::default(),
        f => Flags::parse(&ctx.to_string(&f)),
    };

    if let Err(err) = compile(&source, flags) {
        tracing::warn!(%source, %err, "regexp pattern is not supported");
    }

    let proto = Some(ctx.intrinsics().regexp_prototype);
    let re = Value::Object(ctx.alloc_object(JSObject::ordinary(proto)));
    let readonly = [
        ("source", Value::string(source)),
        ("global", Value::boolean(flags.global)),
        ("ignoreCase", Value::boolean(flags.ignore_case)),
        ("multiline", Value::boolean(flags.multiline)),
    ];
    for (name, value) in readonly {
        ctx.define_property(&re, Property::new(name, value, Attributes::NONE));
    }
    let last_index = Attributes {
        writable: true,
        ..Attributes::NONE
    };
    ctx.define_property(&re, Property::new("lastIndex", Value::number(0.0), last_index));
    re
}

fn compile(source: &str, flags: Flags) -> Result<Regex, regress::Error> {
    let mut engine_flags = String::new();
    if flags.ignore_case {
        engine_flags.push('i');
    }
    if flags.multiline {
        engine_flags.push('m');
    }
    Regex::with_flags(source, engine_flags.as_str())
}

fn flags_of(ctx: &Context, re: &Value) -> Flags {
    let flag = |name| ctx.to_boolean(&ctx.get(re, name));
    Flags {
        global: flag("global"),
        ignore_case: flag("ignoreCase"),
        multiline: flag("multiline"),
    }
}

/// `RegExp.prototype.test(string)`
///
/// Global regexps search from `lastIndex` and advance it past the match.
fn test(ctx: &mut Context, this: Value, args: &[Value]) -> Value {
    let source = ctx.to_string(&ctx.get(&this, "source"));
    let flags = flags_of(ctx, &this);
    let text: Vec<u16> = ctx.to_string(&arg(args, 0)).encode_utf16().collect();

    let Ok(re) = compile(&source, flags) else {
        return Value::boolean(false);
    };

    if !flags.global {
        return Value::boolean(re.find_from_ucs2(&text, 0).next().is_some());
    }

    let last_index = to_integer(ctx, &ctx.get(&this, "lastIndex")).max(0.0) as usize;
    let found = if last_index <= text.len() {
        re.find_from_ucs2(&text, last_index).next()
    } else {
        None
    };
    let next = found.as_ref().map_or(0, |m| m.end());
    ctx.set(&this, "lastIndex", Value::number(next as f64));
    Value::boolean(found.is_some())
}

/// `RegExp.prototype.toString()`
fn to_string(ctx: &mut Context, this: Value, _args: &[Value]) -> Value {
    let source = ctx.to_string(&ctx.get(&this, "source"));
    let flags = flags_of(ctx, &this);

    let mut out = format!("/{source}/");
    for (set, c) in [(flags.global, 'g'), (flags.ignore_case, 'i'), (flags.multiline, 'm')] {
        if set {
            out.push(c);
        }
    }
    Value::string(out)
}
