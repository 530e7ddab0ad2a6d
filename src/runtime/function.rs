//! JavaScript function types
//!
//! Two kinds of functions live on the heap:
//! - native functions, implemented by the engine as plain Rust fn pointers
//! - script functions, whose body is owned by the external evaluator
//!
//! Both are invoked through the [`Callable`] capability with the same calling
//! convention: the receiver, the argument list and the execution context.

use std::fmt;
use std::rc::Rc;

use crate::context::Context;
use crate::runtime::JsString;
use crate::value::Value;

/// Native function signature
///
/// Native functions take the context, the `this` value and the arguments, and
/// always return a value (undefined when there is nothing to return).
pub type NativeFn = fn(ctx: &mut Context, this: Value, args: &[Value]) -> Value;

/// Capability to be called with the engine calling convention
pub trait Callable {
    fn invoke(&self, ctx: &mut Context, this: Value, args: &[Value]) -> Value;
}

/// Body of a function defined in source text
///
/// Implemented by the evaluator. `trace` must report every value the body
/// keeps alive (captured variables, constants) so the collector can see them.
pub trait ScriptFunction: Callable + fmt::Debug {
    fn trace(&self, _visit: &mut dyn FnMut(&Value)) {}

    /// Source text, used when the function is converted to a string
    fn source(&self) -> Option<&str> {
        None
    }
}

/// A native function pointer
#[derive(Clone, Copy)]
pub struct NativeFunction(pub NativeFn);

impl Callable for NativeFunction {
    #[inline]
    fn invoke(&self, ctx: &mut Context, this: Value, args: &[Value]) -> Value {
        (self.0)(ctx, this, args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({:p})", self.0 as *const ())
    }
}

/// Function body kind
#[derive(Debug, Clone)]
pub enum FunctionKind {
    Native(NativeFunction),
    Script(Rc<dyn ScriptFunction>),
}

impl Callable for FunctionKind {
    fn invoke(&self, ctx: &mut Context, this: Value, args: &[Value]) -> Value {
        match self {
            FunctionKind::Native(native) => native.invoke(ctx, this, args),
            FunctionKind::Script(script) => script.invoke(ctx, this, args),
        }
    }
}

/// Heap payload of a function object
#[derive(Debug, Clone)]
pub struct JsFunction {
    /// Function name (for debugging and `toString`)
    pub name: JsString,
    /// Declared number of parameters
    pub arity: u32,
    pub kind: FunctionKind,
}

impl JsFunction {
    /// Create a native function
    pub fn native(name: impl Into<JsString>, arity: u32, func: NativeFn) -> Self {
        JsFunction {
            name: name.into(),
            arity,
            kind: FunctionKind::Native(NativeFunction(func)),
        }
    }

    /// Create a function with an evaluator-owned body
    pub fn script(name: impl Into<JsString>, arity: u32, body: Rc<dyn ScriptFunction>) -> Self {
        JsFunction {
            name: name.into(),
            arity,
            kind: FunctionKind::Script(body),
        }
    }

    #[inline]
    pub fn is_native(&self) -> bool {
        matches!(self.kind, FunctionKind::Native(_))
    }

    /// Report the values kept alive by the function body
    pub fn trace(&self, visit: &mut dyn FnMut(&Value)) {
        if let FunctionKind::Script(script) = &self.kind {
            script.trace(visit);
        }
    }

    /// Source-like rendering used by string conversion
    pub fn to_source(&self) -> String {
        match &self.kind {
            FunctionKind::Script(script) => match script.source() {
                Some(src) => src.to_string(),
                None => format!("function {}() {{ ... }}", self.name),
            },
            FunctionKind::Native(_) => format!("function {}() {{ [native code] }}", self.name),
        }
    }
}

/// Argument at `index`, or undefined when the caller passed fewer arguments
#[inline]
pub fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_ctx: &mut Context, _this: Value, _args: &[Value]) -> Value {
        Value::undefined()
    }

    #[derive(Debug)]
    struct Captures(Vec<Value>);

    impl Callable for Captures {
        fn invoke(&self, _ctx: &mut Context, _this: Value, _args: &[Value]) -> Value {
            self.0.first().cloned().unwrap_or_default()
        }
    }

    impl ScriptFunction for Captures {
        fn trace(&self, visit: &mut dyn FnMut(&Value)) {
            self.0.iter().for_each(|v| visit(v));
        }
    }

    #[test]
    fn test_native_function() {
        let f = JsFunction::native("noop", 2, noop);
        assert!(f.is_native());
        assert_eq!(f.arity, 2);
        assert_eq!(f.to_source(), "function noop() { [native code] }");
    }

    #[test]
    fn test_script_function_trace() {
        let body = Rc::new(Captures(vec![Value::number(1.0), Value::null()]));
        let f = JsFunction::script("captured", 0, body);
        assert!(!f.is_native());

        let mut seen = 0;
        f.trace(&mut |_| seen += 1);
        assert_eq!(seen, 2);
        assert_eq!(f.to_source(), "function captured() { ... }");
    }

    #[test]
    fn test_arg_defaults_to_undefined() {
        let args = [Value::number(1.0)];
        assert!(arg(&args, 0).is_number());
        assert!(arg(&args, 1).is_undefined());
    }
}
