//! Call stack
//!
//! Holds the receiver and arguments of every in-flight call, plus any
//! temporaries the evaluator pushes. Everything on it is a GC root.
//!
//! Frame layout: `[this, arg0, arg1, ...]`, each frame starting where the
//! previous one ended.

use crate::value::Value;

/// Value stack for function calls
#[derive(Debug, Default)]
pub struct Stack {
    /// Stack storage
    values: Vec<Value>,
    /// Start index of each active frame
    frames: Vec<usize>,
}

impl Stack {
    /// Create a new stack with the given capacity
    pub fn new(capacity: usize) -> Self {
        Stack {
            values: Vec::with_capacity(capacity),
            frames: Vec::new(),
        }
    }

    /// Push a value onto the stack
    #[inline]
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Pop a value from the stack, never below the current frame
    #[inline]
    pub fn pop(&mut self) -> Option<Value> {
        if self.values.len() > self.frame_start() {
            self.values.pop()
        } else {
            None
        }
    }

    /// Peek at the top value without removing it
    #[inline]
    pub fn peek(&self) -> Option<&Value> {
        self.values.last()
    }

    /// Get the current stack depth in values
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the stack is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of active call frames
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    fn frame_start(&self) -> usize {
        self.frames.last().copied().unwrap_or(0)
    }

    /// Push a new frame holding the receiver and arguments of a call
    pub fn push_frame(&mut self, this: Value, args: &[Value]) {
        self.frames.push(self.values.len());
        self.values.push(this);
        self.values.extend_from_slice(args);
    }

    /// Pop the current frame and everything pushed above it
    pub fn pop_frame(&mut self) {
        if let Some(start) = self.frames.pop() {
            self.values.truncate(start);
        }
    }

    /// Get value at index relative to the current frame (0 = `this`)
    #[inline]
    pub fn get_local(&self, index: usize) -> Option<&Value> {
        if self.frames.is_empty() {
            return None;
        }
        self.values.get(self.frame_start() + index)
    }

    /// Iterate over every value on the stack
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }
}
