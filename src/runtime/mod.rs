//! Runtime support
//!
//! This module contains the core runtime types:
//! - Object representation (JSObject, class payloads)
//! - Property storage and descriptors
//! - Prototype chain resolution
//! - String handling (JsString)
//! - Array handling (JSArray)
//! - Function types and the native calling convention
//! - Type conversions

pub mod array;
pub mod convert;
pub mod function;
pub mod object;
pub mod property;
pub mod prototype;
pub mod string;

pub use array::{JSArray, MAX_ARRAY_LENGTH};
pub use function::{arg, Callable, FunctionKind, JsFunction, NativeFn, NativeFunction, ScriptFunction};
pub use object::{JSObject, ObjectClass};
pub use property::{Attributes, Property, PropertyTable};
pub use prototype::MAX_PROTOTYPE_CHAIN;
pub use string::JsString;
