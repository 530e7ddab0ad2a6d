//! JavaScript execution context
//!
//! The Context is the main entry point for the runtime. It owns the heap, the
//! intrinsic prototypes, the global object and everything the collector treats
//! as a root. The evaluator drives it: member reads and writes, coercions,
//! allocations and calls all go through here.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;

use crate::builtins;
use crate::config::EngineConfig;
use crate::error::RuntimeError;
use crate::gc::{GcRef, GcStats, Heap};
use crate::runtime::convert;
use crate::runtime::prototype;
use crate::runtime::{
    Attributes, Callable, JSArray, JSObject, JsFunction, JsString, NativeFn, ObjectClass, Property,
    ScriptFunction, MAX_ARRAY_LENGTH,
};
use crate::util::{dtoa, format_iso_date, MAX_TIME_VALUE};
use crate::value::{Number, Value, ValueKind};
use crate::vm::{ScopeChain, Stack};

/// Depth at which `debug_value` stops descending into objects
const DEBUG_DEPTH: usize = 4;

/// Host hook that runs a source file on behalf of `load`
pub trait FileEvaluator {
    fn eval_file(&self, ctx: &mut Context, path: &Path) -> Result<Value, RuntimeError>;
}

/// Read a source file, mapping I/O failures to [`RuntimeError::Load`]
pub fn read_source(path: &Path) -> Result<String, RuntimeError> {
    std::fs::read_to_string(path).map_err(|e| RuntimeError::load(path, e))
}

/// Prototype objects shared by every value of a kind
///
/// They exist before any builtin module runs and stay alive for the lifetime
/// of the context.
#[derive(Debug, Clone, Copy)]
pub struct Intrinsics {
    pub object_prototype: GcRef,
    pub function_prototype: GcRef,
    pub array_prototype: GcRef,
    pub string_prototype: GcRef,
    pub number_prototype: GcRef,
    pub boolean_prototype: GcRef,
    pub date_prototype: GcRef,
    pub regexp_prototype: GcRef,
    pub error_prototype: GcRef,
}

impl Intrinsics {
    fn create(heap: &mut Heap) -> Self {
        let object_prototype = heap.alloc(JSObject::ordinary(None));
        let function_prototype = heap.alloc(JSObject::new(
            Some(object_prototype),
            ObjectClass::Function(JsFunction::native("", 0, empty_function)),
        ));
        let mut ordinary = || heap.alloc(JSObject::ordinary(Some(object_prototype)));

        Intrinsics {
            object_prototype,
            function_prototype,
            array_prototype: ordinary(),
            string_prototype: ordinary(),
            number_prototype: ordinary(),
            boolean_prototype: ordinary(),
            date_prototype: ordinary(),
            regexp_prototype: ordinary(),
            error_prototype: ordinary(),
        }
    }

    fn iter(&self) -> impl Iterator<Item = GcRef> {
        [
            self.object_prototype,
            self.function_prototype,
            self.array_prototype,
            self.string_prototype,
            self.number_prototype,
            self.boolean_prototype,
            self.date_prototype,
            self.regexp_prototype,
            self.error_prototype,
        ]
        .into_iter()
    }
}

fn empty_function(_ctx: &mut Context, _this: Value, _args: &[Value]) -> Value {
    Value::undefined()
}

/// Handle to a persistent root registered with [`Context::add_root`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RootId(usize);

/// JavaScript execution context
pub struct Context {
    /// The memory heap for GC-managed objects
    heap: Heap,
    config: EngineConfig,
    global: GcRef,
    intrinsics: Intrinsics,
    scopes: ScopeChain,
    stack: Stack,
    /// Host-registered roots; `None` marks a released slot
    roots: Vec<Option<Value>>,
    file_evaluator: Option<Rc<dyn FileEvaluator>>,
    /// Sink for `console.log` and friends
    output: Box<dyn Write>,
    last_error: Option<RuntimeError>,
}

impl Context {
    /// Create a context with the default configuration and a bootstrapped
    /// global object
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a context with the given configuration
    pub fn with_config(config: EngineConfig) -> Self {
        let mut heap = Heap::new();
        let intrinsics = Intrinsics::create(&mut heap);
        let global = heap.alloc(JSObject::ordinary(Some(intrinsics.object_prototype)));

        let mut ctx = Context {
            heap,
            config,
            global,
            intrinsics,
            scopes: ScopeChain::new(),
            stack: Stack::new(256),
            roots: Vec::new(),
            file_evaluator: None,
            output: Box::new(io::stdout()),
            last_error: None,
        };
        builtins::bootstrap(&mut ctx);
        ctx
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// The global object
    pub fn global(&self) -> Value {
        Value::Object(self.global)
    }

    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    // ---- Allocation ----

    /// Allocate a raw heap object
    pub fn alloc_object(&mut self, object: JSObject) -> GcRef {
        self.heap.alloc(object)
    }

    /// Allocate an empty value of the given kind
    pub fn alloc_value(&mut self, kind: ValueKind) -> Value {
        match kind {
            ValueKind::Number => Value::number(0.0),
            ValueKind::String => Value::string(JsString::empty()),
            ValueKind::Boolean => Value::boolean(false),
            ValueKind::Object => self.new_object(),
            ValueKind::Array => self.new_array(Vec::new()),
            ValueKind::Function => self.new_native_function("", 0, empty_function),
            ValueKind::Null => Value::null(),
            ValueKind::Undefined => Value::undefined(),
        }
    }

    /// Create a plain object inheriting from the object prototype
    pub fn new_object(&mut self) -> Value {
        self.new_object_with_proto(Some(self.intrinsics.object_prototype))
    }

    pub fn new_object_with_proto(&mut self, proto: Option<GcRef>) -> Value {
        Value::Object(self.heap.alloc(JSObject::ordinary(proto)))
    }

    /// Create an array holding `elements`
    pub fn new_array(&mut self, elements: Vec<Value>) -> Value {
        let proto = Some(self.intrinsics.array_prototype);
        let array = JSObject::new(proto, ObjectClass::Array(JSArray::from_values(elements)));
        Value::Object(self.heap.alloc(array))
    }

    /// Create a native function object
    ///
    /// `length` and `name` are read-only, non-enumerable own properties.
    pub fn new_native_function(&mut self, name: &str, arity: u32, func: NativeFn) -> Value {
        self.new_function(JsFunction::native(name, arity, func))
    }

    /// Create a function whose body is owned by the evaluator
    ///
    /// Unlike natives, script functions get a fresh `prototype` object.
    pub fn new_script_function(&mut self, name: &str, arity: u32, body: Rc<dyn ScriptFunction>) -> Value {
        let func = self.new_function(JsFunction::script(name, arity, body));
        let proto = self.new_object();
        self.define_property(&proto, Property::builtin("constructor", func.clone()));
        self.define_property(&func, Property::new("prototype", proto, Attributes::BUILTIN));
        func
    }

    fn new_function(&mut self, function: JsFunction) -> Value {
        let length = Value::number(function.arity as f64);
        let name = Value::string(function.name.clone());
        let proto = Some(self.intrinsics.function_prototype);

        let mut object = JSObject::new(proto, ObjectClass::Function(function));
        object.properties.define(Property::new("length", length, Attributes::READONLY));
        object.properties.define(Property::new("name", name, Attributes::READONLY));
        Value::Object(self.heap.alloc(object))
    }

    /// Create a date object; the time value is clipped to the valid range
    pub fn new_date(&mut self, time: f64) -> Value {
        let time = if time.is_finite() && time.abs() <= MAX_TIME_VALUE {
            time.trunc() + 0.0
        } else {
            f64::NAN
        };
        let proto = Some(self.intrinsics.date_prototype);
        Value::Object(self.heap.alloc(JSObject::new(proto, ObjectClass::Date(time))))
    }

    // ---- Introspection ----

    /// Heap object behind a value, if it is a live object
    pub fn object(&self, value: &Value) -> Option<&JSObject> {
        value.as_object().and_then(|r| self.heap.get(r))
    }

    pub fn object_mut(&mut self, value: &Value) -> Option<&mut JSObject> {
        value.as_object().and_then(|r| self.heap.get_mut(r))
    }

    /// Language kind of a value; a reclaimed object reads as undefined
    pub fn kind_of(&self, value: &Value) -> ValueKind {
        match value {
            Value::Object(r) => self.heap.get(*r).map_or(ValueKind::Undefined, JSObject::kind),
            _ => value.primitive_kind().unwrap_or(ValueKind::Undefined),
        }
    }

    /// Result of `typeof value`
    pub fn type_of(&self, value: &Value) -> &'static str {
        self.kind_of(value).type_of()
    }

    /// Check if a value is a live function object
    pub fn is_callable(&self, value: &Value) -> bool {
        self.object(value).is_some_and(JSObject::is_function)
    }

    // ---- Property store ----

    /// Own property of an object
    pub fn get_own_property(&self, object: &Value, name: &str) -> Option<&Property> {
        self.object(object)?.properties.get(name)
    }

    /// Create or overwrite an own property with default attributes
    ///
    /// Returns false when the object is not a live object or the existing
    /// property is read-only.
    pub fn assign(&mut self, object: &Value, name: &str, value: Value) -> bool {
        match self.object_mut(object) {
            Some(obj) => obj.properties.assign(name, value),
            None => false,
        }
    }

    /// Define an own property with explicit attributes
    ///
    /// On arrays, `length` and index names go to the element storage, which
    /// has no per-element attributes.
    pub fn define_property(&mut self, object: &Value, property: Property) -> bool {
        if self.object(object).is_some_and(JSObject::is_array) {
            if property.name.as_str() == "length" {
                return self.set(object, "length", property.value);
            }
            if let Some(index) = JsString::as_array_index(&property.name) {
                return self.set_element(object, index, property.value);
            }
        }
        match self.object_mut(object) {
            Some(obj) => obj.properties.define(property),
            None => false,
        }
    }

    /// Install a builtin binding (`writable`, `configurable`, not enumerable)
    pub fn define_builtin(&mut self, object: &Value, name: &str, value: Value) -> bool {
        self.define_property(object, Property::builtin(name, value))
    }

    /// Install a native method and return the function value
    pub fn define_native_function(&mut self, object: &Value, name: &str, arity: u32, func: NativeFn) -> Value {
        let function = self.new_native_function(name, arity, func);
        self.define_builtin(object, name, function.clone());
        function
    }

    /// Delete an own property
    pub fn delete_property(&mut self, object: &Value, name: &str) -> bool {
        match self.object_mut(object) {
            Some(obj) => obj.properties.delete(name),
            None => true,
        }
    }

    /// Enumerable own keys in enumeration order (array indices first)
    pub fn own_keys(&self, object: &Value) -> Vec<JsString> {
        let Some(obj) = self.object(object) else {
            return Vec::new();
        };
        let mut keys: Vec<JsString> = match obj.as_array() {
            Some(arr) => (0..arr.len()).map(|i| JsString::from(i.to_string())).collect(),
            None => Vec::new(),
        };
        keys.extend(obj.properties.enumerable_keys().cloned());
        keys
    }

    // ---- Prototype resolution and member access ----

    /// Prototype a lookup on `value` starts from
    ///
    /// Primitives start at their intrinsic prototype; null and undefined have
    /// none.
    pub fn prototype_of(&self, value: &Value) -> Option<GcRef> {
        match value {
            Value::Object(r) => self.heap.get(*r)?.proto,
            Value::String(_) => Some(self.intrinsics.string_prototype),
            Value::Number(_) => Some(self.intrinsics.number_prototype),
            Value::Boolean(_) => Some(self.intrinsics.boolean_prototype),
            Value::Null | Value::Undefined => None,
        }
    }

    /// Replace the prototype of an object, rejecting cycles
    pub fn set_prototype(&mut self, object: &Value, proto: Option<GcRef>) -> bool {
        let Some(r) = object.as_object() else {
            return false;
        };
        prototype::set_prototype(&mut self.heap, r, proto, self.config.max_prototype_depth)
    }

    /// Check if `proto` is on the prototype chain of `value`
    pub fn inherits_from(&self, value: &Value, proto: GcRef) -> bool {
        match value.as_object() {
            Some(r) => prototype::inherits_from(&self.heap, r, proto, self.config.max_prototype_depth),
            None => false,
        }
    }

    /// Find a property on `value` or its prototype chain
    pub fn lookup_with_inheritance(&self, value: &Value, name: &str) -> Option<&Property> {
        let start = match value {
            Value::Object(r) => *r,
            other => self.prototype_of(other)?,
        };
        prototype::lookup(&self.heap, start, name, self.config.max_prototype_depth)
    }

    /// Read a member, as `value[name]` does
    pub fn get(&self, value: &Value, name: &str) -> Value {
        match value {
            Value::String(s) => {
                if name == "length" {
                    return Value::number(s.utf16_len() as f64);
                }
                if let Some(c) = JsString::as_array_index(name).and_then(|i| s.char_at(i as usize)) {
                    return Value::String(c);
                }
            }
            Value::Object(_) => {
                if let Some(arr) = self.object(value).and_then(JSObject::as_array) {
                    if name == "length" {
                        return Value::number(arr.len() as f64);
                    }
                    if let Some(element) = JsString::as_array_index(name).and_then(|i| arr.get(i)) {
                        return element.clone();
                    }
                }
            }
            _ => {}
        }

        self.lookup_with_inheritance(value, name)
            .map(|p| p.value.clone())
            .unwrap_or_default()
    }

    /// Write a member, as `value[name] = v` does
    ///
    /// The write always lands on the receiver; prototypes are never mutated.
    pub fn set(&mut self, object: &Value, name: &str, value: Value) -> bool {
        if self.object(object).is_some_and(JSObject::is_array) {
            if name == "length" {
                let length = self.to_number(&value);
                let len = length.value();
                if !length.is_finite() || len < 0.0 || len.fract() != 0.0 || len > MAX_ARRAY_LENGTH as f64 {
                    return false;
                }
                if !self.reserve_array_length(len as usize) {
                    return false;
                }
                return self
                    .object_mut(object)
                    .and_then(JSObject::as_array_mut)
                    .is_some_and(|arr| arr.set_length(len as u32));
            }
            if let Some(index) = JsString::as_array_index(name) {
                return self.set_element(object, index, value);
            }
        }
        self.assign(object, name, value)
    }

    /// Store an array element, growing the array when `index` is past the end
    fn set_element(&mut self, object: &Value, index: u32, value: Value) -> bool {
        let len = self.object(object).and_then(JSObject::as_array).map_or(0, JSArray::len);
        if index >= len && !self.reserve_array_length(index as usize + 1) {
            return false;
        }
        self.object_mut(object)
            .and_then(JSObject::as_array_mut)
            .is_some_and(|arr| arr.set(index, value))
    }

    /// Check that an array may grow to `length` elements
    ///
    /// Past `max_dense_length` this records `InvalidArrayLength` and returns
    /// false.
    pub(crate) fn reserve_array_length(&mut self, length: usize) -> bool {
        let limit = self.config.max_dense_length;
        if length <= limit {
            return true;
        }
        tracing::warn!(length, limit, "array length exceeds the dense storage limit");
        self.record_error(RuntimeError::InvalidArrayLength(length.to_string()));
        false
    }

    // ---- Coercion ----

    pub fn to_number(&self, value: &Value) -> Number {
        convert::to_number(&self.heap, value)
    }

    pub fn to_string(&self, value: &Value) -> JsString {
        convert::to_string(&self.heap, value)
    }

    pub fn to_boolean(&self, value: &Value) -> bool {
        convert::to_boolean(value)
    }

    pub fn strict_equals(&self, a: &Value, b: &Value) -> bool {
        convert::strict_equals(a, b)
    }

    /// Convert a value to the given kind
    ///
    /// Casting a primitive to an object boxes it; casting to array or
    /// function only succeeds when the value already is one.
    pub fn cast(&mut self, value: &Value, kind: ValueKind) -> Value {
        match kind {
            ValueKind::Number => Value::Number(self.to_number(value)),
            ValueKind::String => Value::String(self.to_string(value)),
            ValueKind::Boolean => Value::boolean(self.to_boolean(value)),
            ValueKind::Null => Value::null(),
            ValueKind::Undefined => Value::undefined(),
            ValueKind::Object => match value {
                Value::Object(_) if self.object(value).is_some() => value.clone(),
                Value::String(_) | Value::Number(_) | Value::Boolean(_) => {
                    let proto = self.prototype_of(value);
                    let boxed = JSObject::new(proto, ObjectClass::Boxed(value.clone()));
                    Value::Object(self.heap.alloc(boxed))
                }
                _ => self.new_object(),
            },
            ValueKind::Array | ValueKind::Function => {
                if self.kind_of(value) == kind {
                    value.clone()
                } else {
                    Value::undefined()
                }
            }
        }
    }

    // ---- Calls ----

    /// Call `func` with the given receiver and arguments
    ///
    /// The outermost call is a safepoint. Failures are recorded in
    /// `last_error` and produce undefined.
    pub fn call(&mut self, func: &Value, this: Value, args: &[Value]) -> Value {
        let kind = match self.object(func).and_then(JSObject::as_function) {
            Some(f) => f.kind.clone(),
            None => {
                let callee = self.to_string(func).to_string();
                tracing::warn!(%callee, "attempt to call a non-function");
                return self.record_error(RuntimeError::NotCallable(callee));
            }
        };

        if self.stack.depth() >= self.config.max_call_depth {
            tracing::warn!(depth = self.stack.depth(), "maximum call depth exceeded");
            return self.record_error(RuntimeError::StackOverflow);
        }

        self.stack.push_frame(this.clone(), args);
        self.stack.push(func.clone());
        if self.stack.depth() == 1 {
            self.safepoint();
        }

        let result = kind.invoke(self, this, args);
        self.stack.pop_frame();
        result
    }

    /// Current call depth
    pub fn call_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Push an evaluator temporary onto the call stack, rooting it until it
    /// is popped
    pub fn push_temp(&mut self, value: Value) {
        self.stack.push(value);
    }

    /// Pop the most recent temporary of the current frame
    pub fn pop_temp(&mut self) -> Option<Value> {
        self.stack.pop()
    }

    // ---- Garbage collection and roots ----

    /// Run a full collection now
    pub fn gc(&mut self) -> GcStats {
        let roots = self.root_set();
        self.heap.collect(roots)
    }

    /// Collect if enough allocations happened since the last collection
    ///
    /// The host calls this where every live handle is reachable from a root.
    pub fn safepoint(&mut self) -> Option<GcStats> {
        let threshold = self.config.gc_threshold;
        if threshold > 0 && self.heap.allocated_since_gc() >= threshold {
            Some(self.gc())
        } else {
            None
        }
    }

    fn root_set(&self) -> Vec<GcRef> {
        let mut roots = vec![self.global];
        roots.extend(self.intrinsics.iter());

        let values = self
            .scopes
            .values()
            .chain(self.stack.iter())
            .chain(self.roots.iter().flatten());
        roots.extend(values.filter_map(Value::as_object));
        roots
    }

    /// Keep `value` alive until [`remove_root`](Self::remove_root)
    pub fn add_root(&mut self, value: Value) -> RootId {
        match self.roots.iter().position(Option::is_none) {
            Some(i) => {
                self.roots[i] = Some(value);
                RootId(i)
            }
            None => {
                self.roots.push(Some(value));
                RootId(self.roots.len() - 1)
            }
        }
    }

    pub fn remove_root(&mut self, id: RootId) -> Option<Value> {
        self.roots.get_mut(id.0).and_then(Option::take)
    }

    /// Check if a value is usable: primitives always are, objects until they
    /// are reclaimed
    pub fn is_live(&self, value: &Value) -> bool {
        match value {
            Value::Object(r) => self.heap.contains(*r),
            _ => true,
        }
    }

    // ---- Scopes ----

    pub fn push_scope(&mut self) {
        self.scopes.push();
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Declare a variable in the innermost scope, or on the global object
    /// when no scope is active
    pub fn declare(&mut self, name: &str, value: Value) {
        if !self.scopes.declare(name, value.clone()) {
            let global = self.global();
            self.set(&global, name, value);
        }
    }

    /// Resolve a variable through the scopes, then the global object
    pub fn lookup_variable(&self, name: &str) -> Value {
        match self.scopes.lookup(name) {
            Some(var) => var.value.clone(),
            None => self.get(&self.global(), name),
        }
    }

    /// Update the innermost binding of a variable, falling back to a global
    pub fn assign_variable(&mut self, name: &str, value: Value) -> bool {
        if self.scopes.assign(name, value.clone()) {
            return true;
        }
        let global = self.global();
        self.set(&global, name, value)
    }

    // ---- Host hooks ----

    pub fn set_file_evaluator(&mut self, evaluator: Rc<dyn FileEvaluator>) {
        self.file_evaluator = Some(evaluator);
    }

    /// Run a file through the installed evaluator
    pub fn load_file(&mut self, path: &Path) -> Result<Value, RuntimeError> {
        match self.file_evaluator.clone() {
            Some(evaluator) => evaluator.eval_file(self, path),
            None => Err(RuntimeError::NoFileEvaluator(path.to_path_buf())),
        }
    }

    /// Redirect console output
    pub fn set_output(&mut self, output: Box<dyn Write>) {
        self.output = output;
    }

    /// Write one line to the console output
    pub fn write_output(&mut self, line: &str) {
        if let Err(err) = writeln!(self.output, "{line}").and_then(|_| self.output.flush()) {
            tracing::warn!(%err, "failed to write console output");
        }
    }

    /// Record a runtime error and return undefined
    pub fn record_error(&mut self, err: RuntimeError) -> Value {
        self.last_error = Some(err);
        Value::undefined()
    }

    pub fn last_error(&self) -> Option<&RuntimeError> {
        self.last_error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<RuntimeError> {
        self.last_error.take()
    }

    // ---- Debugging ----

    /// Structural rendering of a value for diagnostics
    pub fn debug_value(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_debug(&mut out, value, DEBUG_DEPTH);
        out
    }

    /// Log a value at debug level
    pub fn dump_value(&self, value: &Value) {
        tracing::debug!(kind = self.kind_of(value).name(), value = %self.debug_value(value), "dump");
    }

    fn write_debug(&self, out: &mut String, value: &Value, depth: usize) {
        let object = match value {
            Value::String(s) => {
                let _ = write!(out, "{:?}", s.as_str());
                return;
            }
            Value::Number(n) => {
                out.push_str(&dtoa::number_to_string(n.value()));
                return;
            }
            Value::Object(r) => match self.heap.get(*r) {
                Some(object) => object,
                None => {
                    let _ = write!(out, "<reclaimed {r:?}>");
                    return;
                }
            },
            other => {
                out.push_str(&self.to_string(other));
                return;
            }
        };

        match &object.class {
            ObjectClass::Function(f) => {
                let _ = write!(out, "[Function {}]", if f.name.is_empty() { "(anonymous)" } else { f.name.as_str() });
                return;
            }
            ObjectClass::Date(time) => {
                let text = format_iso_date(*time).unwrap_or_else(|| "Invalid Date".to_string());
                let _ = write!(out, "Date({text})");
                return;
            }
            ObjectClass::Boxed(inner) => {
                let _ = write!(out, "[{}: ", self.kind_of(inner).name());
                self.write_debug(out, inner, depth);
                out.push(']');
                return;
            }
            ObjectClass::Array(_) | ObjectClass::Ordinary => {}
        }

        if depth == 0 {
            out.push_str(if object.is_array() { "[...]" } else { "{...}" });
            return;
        }

        if let Some(arr) = object.as_array() {
            out.push('[');
            for (i, element) in arr.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.write_debug(out, element, depth - 1);
            }
            out.push(']');
            return;
        }

        out.push('{');
        for (i, prop) in object.properties.iter().filter(|p| p.enumerable).enumerate() {
            out.push_str(if i > 0 { ", " } else { " " });
            let _ = write!(out, "{}: ", prop.name);
            self.write_debug(out, &prop.value, depth - 1);
        }
        out.push_str(if object.properties.is_empty() { "}" } else { " }" });
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("live_objects", &self.heap.live_objects())
            .field("call_depth", &self.stack.depth())
            .field("scope_depth", &self.scopes.depth())
            .field("config", &self.config)
            .finish()
    }
}
