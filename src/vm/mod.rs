//! Execution state shared with the evaluator
//!
//! The call stack and the scope chain are owned by the context and enumerated
//! as GC roots on every collection.

pub mod scope;
pub mod stack;

pub use scope::{Scope, ScopeChain, Variable};
pub use stack::Stack;
