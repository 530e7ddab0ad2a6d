//! JavaScript object representation
//!
//! Every heap cell is a `JSObject`: a prototype link, an own property table
//! and a class-specific payload. Arrays, functions and dates are objects with
//! extra data, exactly like in the language.

use crate::gc::GcRef;
use crate::runtime::array::JSArray;
use crate::runtime::function::JsFunction;
use crate::runtime::property::PropertyTable;
use crate::value::{Value, ValueKind};

/// Class-specific payload of an object
#[derive(Debug)]
pub enum ObjectClass {
    /// Plain object
    Ordinary,
    /// Dense array
    Array(JSArray),
    /// Native or script function
    Function(JsFunction),
    /// Date object holding its time value in milliseconds since the epoch
    Date(f64),
    /// Wrapper object around a primitive (never an object value)
    Boxed(Value),
}

/// JavaScript object
#[derive(Debug)]
pub struct JSObject {
    /// Prototype of this object (None = null prototype)
    pub proto: Option<GcRef>,
    /// Own properties
    pub properties: PropertyTable,
    pub class: ObjectClass,
}

impl JSObject {
    /// Create an object with the given prototype and payload
    pub fn new(proto: Option<GcRef>, class: ObjectClass) -> Self {
        JSObject {
            proto,
            properties: PropertyTable::new(),
            class,
        }
    }

    /// Create a plain object
    pub fn ordinary(proto: Option<GcRef>) -> Self {
        JSObject::new(proto, ObjectClass::Ordinary)
    }

    /// Language kind of this object
    pub fn kind(&self) -> ValueKind {
        match self.class {
            ObjectClass::Array(_) => ValueKind::Array,
            ObjectClass::Function(_) => ValueKind::Function,
            ObjectClass::Ordinary | ObjectClass::Date(_) | ObjectClass::Boxed(_) => ValueKind::Object,
        }
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self.class, ObjectClass::Array(_))
    }

    #[inline]
    pub fn is_function(&self) -> bool {
        matches!(self.class, ObjectClass::Function(_))
    }

    /// Check if this is a native function
    #[inline]
    pub fn is_native_function(&self) -> bool {
        matches!(&self.class, ObjectClass::Function(f) if f.is_native())
    }

    #[inline]
    pub fn as_array(&self) -> Option<&JSArray> {
        match &self.class {
            ObjectClass::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut JSArray> {
        match &mut self.class {
            ObjectClass::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    pub fn as_function(&self) -> Option<&JsFunction> {
        match &self.class {
            ObjectClass::Function(f) => Some(f),
            _ => None,
        }
    }

    #[inline]
    pub fn as_date(&self) -> Option<f64> {
        match self.class {
            ObjectClass::Date(t) => Some(t),
            _ => None,
        }
    }

    /// Primitive wrapped by a boxed object
    #[inline]
    pub fn as_boxed(&self) -> Option<&Value> {
        match &self.class {
            ObjectClass::Boxed(v) => Some(v),
            _ => None,
        }
    }

    /// Report every heap reference held by this object
    pub fn trace(&self, visit: &mut dyn FnMut(GcRef)) {
        if let Some(proto) = self.proto {
            visit(proto);
        }

        let mut visit_value = |v: &Value| {
            if let Value::Object(r) = v {
                visit(*r);
            }
        };

        self.properties.values().for_each(&mut visit_value);

        match &self.class {
            ObjectClass::Array(arr) => arr.iter().for_each(&mut visit_value),
            ObjectClass::Function(f) => f.trace(&mut visit_value),
            ObjectClass::Ordinary | ObjectClass::Date(_) | ObjectClass::Boxed(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_ctx: &mut crate::Context, _this: Value, _args: &[Value]) -> Value {
        Value::undefined()
    }

    #[test]
    fn test_object_kinds() {
        assert_eq!(JSObject::ordinary(None).kind(), ValueKind::Object);
        assert_eq!(
            JSObject::new(None, ObjectClass::Array(JSArray::new())).kind(),
            ValueKind::Array
        );
        assert_eq!(JSObject::new(None, ObjectClass::Date(0.0)).kind(), ValueKind::Object);

        let boxed = JSObject::new(None, ObjectClass::Boxed(Value::number(5.0)));
        assert_eq!(boxed.kind(), ValueKind::Object);
        assert!(boxed.as_boxed().unwrap().is_number());

        let f = JSObject::new(None, ObjectClass::Function(JsFunction::native("f", 0, noop)));
        assert_eq!(f.kind(), ValueKind::Function);
        assert!(f.is_native_function());
        assert!(f.as_array().is_none());
    }

    #[test]
    fn test_trace_visits_all_references() {
        let proto = GcRef::new(1, 0);
        let prop_target = GcRef::new(2, 0);
        let element = GcRef::new(3, 0);

        let mut obj = JSObject::new(
            Some(proto),
            ObjectClass::Array(JSArray::from_values(vec![
                Value::Object(element),
                Value::number(1.0),
            ])),
        );
        obj.properties.assign("p", Value::Object(prop_target));
        obj.properties.assign("s", Value::string("leaf"));

        let mut seen = Vec::new();
        obj.trace(&mut |r| seen.push(r));
        assert_eq!(seen, vec![proto, prop_target, element]);
    }
}
