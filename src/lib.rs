//! Flathead - the runtime core of a small JavaScript engine
//!
//! This crate holds everything below the parser: the value model, objects
//! with attribute-carrying properties, prototype chains, type coercion, a
//! tracing mark/sweep garbage collector and the standard global environment.
//!
//! Script code enters through [`Context::call`] on function objects and
//! through a host-supplied [`FileEvaluator`] used by the `load` builtin.
//!
//! # Example
//! ```
//! use flathead::{Context, Value};
//!
//! let mut ctx = Context::new();
//! let parse_int = ctx.lookup_variable("parseInt");
//! let n = ctx.call(&parse_int, Value::undefined(), &[Value::string("0x1f"), Value::number(16.0)]);
//! assert_eq!(n.as_number().map(|n| n.value()), Some(31.0));
//! ```

// Core modules
pub mod config;
pub mod context;
pub mod error;
pub mod value;

// Garbage collector
pub mod gc;

// Call stack and scopes
pub mod vm;

// Built-in objects
pub mod builtins;

// Runtime support
pub mod runtime;

// Utilities
pub mod util;

// Re-export main types
pub use config::{ConfigError, EngineConfig};
pub use context::{Context, FileEvaluator, Intrinsics, RootId};
pub use error::RuntimeError;
pub use gc::{GcRef, GcStats};
pub use runtime::{Attributes, Callable, JsString, NativeFn, Property, ScriptFunction};
pub use value::{Number, Value, ValueKind};
