//! JavaScript value representation
//!
//! `Value` is a checked sum type: the active payload always matches the tag.
//! Primitives are stored inline, heap objects (plain objects, arrays,
//! functions, dates) are referenced through a generation-checked [`GcRef`].
//!
//! # Number encoding
//! Numbers keep NaN and Infinity as explicit flags next to the float so that
//! comparisons never depend on bit patterns. The sign of an infinity lives in
//! `val`.

use std::fmt;

use crate::gc::GcRef;
use crate::runtime::JsString;

/// A JavaScript number with explicit NaN / Infinity flags
#[derive(Clone, Copy)]
pub struct Number {
    val: f64,
    is_nan: bool,
    is_inf: bool,
}

impl Number {
    pub const ZERO: Number = Number::from_parts(0.0, false, false);
    pub const NAN: Number = Number::from_parts(0.0, true, false);
    pub const INFINITY: Number = Number::from_parts(1.0, false, true);
    pub const NEG_INFINITY: Number = Number::from_parts(-1.0, false, true);

    /// Create a number from a float, deriving the flags from its class
    #[inline]
    pub fn new(val: f64) -> Self {
        if val.is_nan() {
            Number::NAN
        } else if val.is_infinite() {
            Number::from_parts(val, false, true)
        } else {
            Number::from_parts(val, false, false)
        }
    }

    /// Create a number from explicit parts
    ///
    /// `is_nan` wins over `is_inf`. For infinities only the sign of `val`
    /// is kept.
    #[inline]
    pub const fn from_parts(val: f64, is_nan: bool, is_inf: bool) -> Self {
        if is_nan {
            Number {
                val: 0.0,
                is_nan: true,
                is_inf: false,
            }
        } else if is_inf {
            Number {
                val: if val.is_sign_negative() {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                },
                is_nan: false,
                is_inf: true,
            }
        } else {
            Number {
                val,
                is_nan: false,
                is_inf: false,
            }
        }
    }

    /// The number as an IEEE float
    #[inline]
    pub const fn value(self) -> f64 {
        if self.is_nan { f64::NAN } else { self.val }
    }

    #[inline]
    pub const fn is_nan(self) -> bool {
        self.is_nan
    }

    #[inline]
    pub const fn is_infinite(self) -> bool {
        self.is_inf
    }

    #[inline]
    pub const fn is_finite(self) -> bool {
        !(self.is_nan || self.is_inf)
    }

    /// Check if this number is +0 or -0
    #[inline]
    pub fn is_zero(self) -> bool {
        self.is_finite() && self.val == 0.0
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        if self.is_nan || other.is_nan {
            return false;
        }
        self.val == other.val
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nan {
            write!(f, "NaN")
        } else if self.is_inf {
            write!(f, "{}Infinity", if self.val < 0.0 { "-" } else { "" })
        } else {
            write!(f, "{}", self.val)
        }
    }
}

impl From<f64> for Number {
    fn from(val: f64) -> Self {
        Number::new(val)
    }
}

/// The eight language-level kinds a value can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Number,
    String,
    Boolean,
    Object,
    Array,
    Function,
    Null,
    Undefined,
}

impl ValueKind {
    /// Canonical name of the kind
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::Function => "function",
            ValueKind::Null => "null",
            ValueKind::Undefined => "undefined",
        }
    }

    /// Result of the `typeof` operator for a value of this kind
    pub const fn type_of(self) -> &'static str {
        match self {
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
            ValueKind::Function => "function",
            ValueKind::Undefined => "undefined",
            ValueKind::Object | ValueKind::Array | ValueKind::Null => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// High-level JavaScript value type
///
/// Cloning is cheap: strings are reference counted and objects are handles.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Number(Number),
    String(JsString),
    Object(GcRef),
}

impl Value {
    /// Create an undefined value
    #[inline]
    pub const fn undefined() -> Self {
        Value::Undefined
    }

    /// Create a null value
    #[inline]
    pub const fn null() -> Self {
        Value::Null
    }

    /// Create a boolean value
    #[inline]
    pub const fn boolean(b: bool) -> Self {
        Value::Boolean(b)
    }

    /// Create a number value from a float
    #[inline]
    pub fn number(val: f64) -> Self {
        Value::Number(Number::new(val))
    }

    /// Create a number value from explicit parts
    #[inline]
    pub const fn from_number_parts(val: f64, is_nan: bool, is_inf: bool) -> Self {
        Value::Number(Number::from_parts(val, is_nan, is_inf))
    }

    #[inline]
    pub const fn nan() -> Self {
        Value::Number(Number::NAN)
    }

    #[inline]
    pub const fn infinity() -> Self {
        Value::Number(Number::INFINITY)
    }

    /// Create a string value
    #[inline]
    pub fn string(s: impl Into<JsString>) -> Self {
        Value::String(s.into())
    }

    // Type checking

    #[inline]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is nullish (null or undefined)
    #[inline]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    #[inline]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    // Value extraction

    #[inline]
    pub const fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object(&self) -> Option<GcRef> {
        match self {
            Value::Object(r) => Some(*r),
            _ => None,
        }
    }

    /// Kind of a primitive value; `None` for heap objects whose kind is
    /// recorded in the heap cell
    #[inline]
    pub const fn primitive_kind(&self) -> Option<ValueKind> {
        match self {
            Value::Undefined => Some(ValueKind::Undefined),
            Value::Null => Some(ValueKind::Null),
            Value::Boolean(_) => Some(ValueKind::Boolean),
            Value::Number(_) => Some(ValueKind::Number),
            Value::String(_) => Some(ValueKind::String),
            Value::Object(_) => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Boolean(b) => write!(f, "Bool({})", b),
            Value::Number(n) => write!(f, "Number({:?})", n),
            Value::String(s) => write!(f, "String({:?})", s.as_str()),
            Value::Object(r) => write!(f, "Object({:?})", r),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::number(n)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<JsString> for Value {
    fn from(s: JsString) -> Self {
        Value::String(s)
    }
}

impl From<GcRef> for Value {
    fn from(r: GcRef) -> Self {
        Value::Object(r)
    }
}
