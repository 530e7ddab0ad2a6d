//! Lexical scope frames
//!
//! The evaluator keeps one `Scope` per active block or function body. Lookups
//! walk from the innermost frame outwards; the global object sits behind the
//! outermost frame and is handled by the context.

use indexmap::IndexMap;

use crate::runtime::JsString;
use crate::value::Value;

/// A variable binding
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: JsString,
    pub value: Value,
}

/// One frame of variable bindings
#[derive(Debug, Default)]
pub struct Scope {
    vars: IndexMap<JsString, Variable>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or redeclare) a variable in this frame
    pub fn declare(&mut self, name: impl Into<JsString>, value: Value) {
        let name = name.into();
        self.vars.insert(name.clone(), Variable { name, value });
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.vars.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over the bindings in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.values()
    }
}

/// The stack of active scope frames
#[derive(Debug, Default)]
pub struct ScopeChain {
    frames: Vec<Scope>,
}

impl ScopeChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a new innermost scope
    pub fn push(&mut self) {
        self.frames.push(Scope::new());
    }

    /// Leave the innermost scope, dropping its bindings
    pub fn pop(&mut self) -> Option<Scope> {
        self.frames.pop()
    }

    /// Number of active frames
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Declare a variable in the innermost scope
    ///
    /// Returns false when no scope is active; the caller then binds on the
    /// global object instead.
    pub fn declare(&mut self, name: impl Into<JsString>, value: Value) -> bool {
        match self.frames.last_mut() {
            Some(scope) => {
                scope.declare(name, value);
                true
            }
            None => false,
        }
    }

    /// Find the innermost binding of `name`
    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.frames.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Update the innermost binding of `name`
    ///
    /// Returns false when no frame binds the name.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        match self.frames.iter_mut().rev().find_map(|scope| scope.get_mut(name)) {
            Some(var) => {
                var.value = value;
                true
            }
            None => false,
        }
    }

    /// Iterate over every bound value in every frame
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.frames.iter().flat_map(|scope| scope.iter().map(|var| &var.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_requires_scope() {
        let mut chain = ScopeChain::new();
        assert!(!chain.declare("x", Value::null()));
        chain.push();
        assert!(chain.declare("x", Value::null()));
        assert_eq!(chain.depth(), 1);
    }

    #[test]
    fn test_inner_scope_shadows_outer() {
        let mut chain = ScopeChain::new();
        chain.push();
        chain.declare("x", Value::number(1.0));
        chain.push();
        chain.declare("x", Value::number(2.0));

        let x = chain.lookup("x").unwrap();
        assert_eq!(x.value.as_number().unwrap().value(), 2.0);
        assert_eq!(x.name.as_str(), "x");

        chain.pop();
        let x = chain.lookup("x").unwrap();
        assert_eq!(x.value.as_number().unwrap().value(), 1.0);
    }

    #[test]
    fn test_assign_updates_innermost_binding() {
        let mut chain = ScopeChain::new();
        chain.push();
        chain.declare("y", Value::number(1.0));
        chain.push();

        assert!(chain.assign("y", Value::number(5.0)));
        assert!(!chain.assign("missing", Value::null()));

        chain.pop();
        assert_eq!(chain.lookup("y").unwrap().value.as_number().unwrap().value(), 5.0);
    }

    #[test]
    fn test_values_cover_all_frames() {
        let mut chain = ScopeChain::new();
        chain.push();
        chain.declare("a", Value::null());
        chain.push();
        chain.declare("b", Value::null());
        chain.declare("c", Value::null());
        assert_eq!(chain.values().count(), 3);
    }
}
