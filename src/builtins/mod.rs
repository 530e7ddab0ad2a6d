//! JavaScript built-in objects
//!
//! Each module exposes a bootstrap routine that builds its constructor or
//! namespace object, wires the intrinsic prototype and returns the finished
//! value. [`bootstrap`] installs all of them on the global object together
//! with the global functions and constants.

pub mod array;
pub mod boolean;
pub mod console;
pub mod date;
pub mod error;
pub mod function;
pub mod global;
pub mod math;
pub mod number;
pub mod object;
pub mod regexp;
pub mod string;

use crate::context::Context;
use crate::gc::GcRef;
use crate::runtime::NativeFn;
use crate::value::Value;

/// Builds one builtin module and returns its global value
pub type ModuleBootstrap = fn(&mut Context) -> Value;

/// Builtin modules in installation order
pub const MODULES: &[(&str, ModuleBootstrap)] = &[
    ("Object", object::bootstrap),
    ("Function", function::bootstrap),
    ("Array", array::bootstrap),
    ("String", string::bootstrap),
    ("Number", number::bootstrap),
    ("Boolean", boolean::bootstrap),
    ("Date", date::bootstrap),
    ("RegExp", regexp::bootstrap),
    ("Error", error::bootstrap),
    ("Math", math::bootstrap),
    ("console", console::bootstrap),
];

/// Names bound to the generic array constructor for compatibility
pub const TYPED_ARRAY_ALIASES: &[&str] = &[
    "Float32Array",
    "Float64Array",
    "Uint8Array",
    "Uint16Array",
    "Uint32Array",
    "Int8Array",
    "Int16Array",
    "Int32Array",
];

const GLOBAL_FUNCTIONS: &[(&str, u32, NativeFn)] = &[
    ("isNaN", 1, global::is_nan),
    ("isFinite", 1, global::is_finite),
    ("parseInt", 2, global::parse_int),
    ("parseFloat", 1, global::parse_float),
    ("eval", 1, global::eval),
    ("load", 1, global::load),
    ("print", 1, console::log),
];

/// Populate the global object
pub fn bootstrap(ctx: &mut Context) {
    let global = ctx.global();

    for &(name, init) in MODULES {
        let module = init(ctx);
        ctx.define_builtin(&global, name, module);
    }

    let intrinsics = *ctx.intrinsics();
    attach_prototype(ctx, intrinsics.object_prototype, intrinsics.function_prototype);
    attach_prototype(ctx, intrinsics.function_prototype, intrinsics.function_prototype);

    ctx.define_builtin(&global, "NaN", Value::nan());
    ctx.define_builtin(&global, "Infinity", Value::infinity());
    ctx.define_builtin(&global, "undefined", Value::undefined());
    ctx.define_builtin(&global, "this", global.clone());

    for name in TYPED_ARRAY_ALIASES {
        ctx.define_native_function(&global, name, 1, array::construct);
    }

    for &(name, arity, func) in GLOBAL_FUNCTIONS {
        ctx.define_native_function(&global, name, arity, func);
    }
    if ctx.config().expose_gc {
        ctx.define_native_function(&global, "gc", 0, global::gc);
    }

    tracing::debug!(
        objects = ctx.heap().live_objects(),
        expose_gc = ctx.config().expose_gc,
        "global object bootstrapped"
    );
}

/// Give every native-function property of `object` the prototype `proto`
pub fn attach_prototype(ctx: &mut Context, object: GcRef, proto: GcRef) {
    let Some(obj) = ctx.heap().get(object) else {
        return;
    };
    let natives: Vec<Value> = obj
        .properties
        .values()
        .filter(|v| ctx.object(v).is_some_and(|o| o.is_native_function()))
        .cloned()
        .collect();

    for native in natives {
        ctx.set_prototype(&native, Some(proto));
    }
}

/// Build a constructor linked both ways with its intrinsic prototype
pub(crate) fn constructor(ctx: &mut Context, name: &str, arity: u32, func: NativeFn, proto: GcRef) -> Value {
    let ctor = ctx.new_native_function(name, arity, func);
    let proto = Value::Object(proto);
    ctx.define_builtin(&ctor, "prototype", proto.clone());
    ctx.define_builtin(&proto, "constructor", ctor.clone());
    ctor
}

/// Clamp a coerced number to an integer index, NaN reading as 0
pub(crate) fn to_integer(ctx: &Context, value: &Value) -> f64 {
    let n = ctx.to_number(value);
    if n.is_nan() { 0.0 } else { n.value().trunc() }
}


#[cfg(test)]
mod tests {
    use super::test_util::*;
    use super::*;
    use crate::config::EngineConfig;
    use crate::runtime::Attributes;

    #[test]
    fn test_global_surface() {
        let ctx = Context::new();
        let global = ctx.global();

        let names = MODULES
            .iter()
            .map(|(name, _)| *name)
            .chain(TYPED_ARRAY_ALIASES.iter().copied())
            .chain(GLOBAL_FUNCTIONS.iter().map(|(name, _, _)| *name))
            .chain(["NaN", "Infinity", "undefined", "this"]);

        for name in names {
            let prop = ctx.get_own_property(&global, name).unwrap_or_else(|| panic!("missing {name}"));
            assert_eq!(prop.attributes(), Attributes::BUILTIN, "{name}");
        }

        assert!(ctx.get(&global, "NaN").as_number().unwrap().is_nan());
        assert!(ctx.get(&global, "undefined").is_undefined());
        assert!(ctx.strict_equals(&ctx.get(&global, "this"), &global));
        assert!(ctx.own_keys(&global).is_empty());
    }

    #[test]
    fn test_constructors_link_prototypes() {
        let ctx = Context::new();
        let intrinsics = *ctx.intrinsics();
        let pairs = [
            ("Object", intrinsics.object_prototype),
            ("Function", intrinsics.function_prototype),
            ("Array", intrinsics.array_prototype),
            ("String", intrinsics.string_prototype),
            ("Number", intrinsics.number_prototype),
            ("Boolean", intrinsics.boolean_prototype),
            ("Date", intrinsics.date_prototype),
            ("RegExp", intrinsics.regexp_prototype),
            ("Error", intrinsics.error_prototype),
        ];
        for (name, proto) in pairs {
            let ctor = ctx.lookup_variable(name);
            assert_eq!(ctx.type_of(&ctor), "function", "{name}");
            assert_eq!(ctx.get(&ctor, "prototype").as_object(), Some(proto), "{name}");
            let back = ctx.get(&Value::Object(proto), "constructor");
            assert!(ctx.strict_equals(&back, &ctor), "{name}");
        }
        assert_eq!(ctx.type_of(&ctx.lookup_variable("Math")), "object");
        assert_eq!(ctx.type_of(&ctx.lookup_variable("console")), "object");
    }

    #[test]
    fn test_prototype_methods_inherit_from_function_prototype() {
        let ctx = Context::new();
        let intrinsics = *ctx.intrinsics();
        for proto in [intrinsics.object_prototype, intrinsics.function_prototype] {
            let obj = ctx.heap().get(proto).unwrap();
            for value in obj.properties.values() {
                if ctx.object(value).is_some_and(|o| o.is_native_function()) {
                    assert_eq!(ctx.prototype_of(value), Some(intrinsics.function_prototype));
                }
            }
        }
        let has_own = ctx.get(&Value::Object(intrinsics.object_prototype), "hasOwnProperty");
        assert!(ctx.is_callable(&ctx.get(&has_own, "call")));
    }

    #[test]
    fn test_typed_array_alias_builds_arrays() {
        let mut ctx = Context::new();
        let arr = call_global(&mut ctx, "Float64Array", &[Value::number(3.0)]);
        assert_eq!(ctx.type_of(&arr), "object");
        assert_eq!(ctx.kind_of(&arr).name(), "array");
        assert_eq!(num(&ctx.get(&arr, "length")), 3.0);
    }

    #[test]
    fn test_gc_exposure_follows_config() {
        let ctx = Context::with_config(EngineConfig::default().with_expose_gc(false));
        assert!(ctx.get_own_property(&ctx.global(), "gc").is_none());

        let mut ctx = Context::with_config(EngineConfig::default().with_expose_gc(true));
        let garbage = ctx.new_object();
        assert!(call_global(&mut ctx, "gc", &[]).is_undefined());
        assert!(!ctx.is_live(&garbage));
    }

    #[test]
    fn test_print_writes_a_line() {
        let mut ctx = Context::new();
        let out = Capture::install(&mut ctx);
        call_global(&mut ctx, "print", &[Value::string("hi"), Value::number(2.0)]);
        assert_eq!(out.contents(), "hi 2\n");
    }
}
