//! JavaScript Array storage
//!
//! Arrays use "no-hole" semantics: every index from 0 to length-1 holds a
//! value, missing slots are filled with undefined.

use crate::value::Value;

/// Maximum array length (2^30 - 1)
pub const MAX_ARRAY_LENGTH: u32 = (1 << 30) - 1;

/// Dense element storage of an array object
#[derive(Debug, Default)]
pub struct JSArray {
    elements: Vec<Value>,
}

impl JSArray {
    /// Create a new empty array
    pub fn new() -> Self {
        JSArray {
            elements: Vec::new(),
        }
    }

    /// Create an array with specified length, filled with undefined
    pub fn with_length(length: u32) -> Self {
        let len = length.min(MAX_ARRAY_LENGTH);
        JSArray {
            elements: vec![Value::undefined(); len as usize],
        }
    }

    /// Create an array from a vector of values
    pub fn from_values(mut values: Vec<Value>) -> Self {
        values.truncate(MAX_ARRAY_LENGTH as usize);
        JSArray { elements: values }
    }

    /// Get the array length
    #[inline]
    pub fn len(&self) -> u32 {
        self.elements.len() as u32
    }

    /// Check if the array is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get an element at the specified index
    #[inline]
    pub fn get(&self, index: u32) -> Option<&Value> {
        self.elements.get(index as usize)
    }

    /// Set an element at the specified index
    ///
    /// If index >= length, the array is extended with undefined values.
    pub fn set(&mut self, index: u32, value: Value) -> bool {
        if index >= MAX_ARRAY_LENGTH {
            return false;
        }

        let index = index as usize;
        if index >= self.elements.len() {
            self.elements.resize(index + 1, Value::undefined());
        }
        self.elements[index] = value;
        true
    }

    /// Push a value onto the end of the array
    #[inline]
    pub fn push(&mut self, value: Value) -> bool {
        if self.len() >= MAX_ARRAY_LENGTH {
            return false;
        }
        self.elements.push(value);
        true
    }

    /// Pop a value from the end of the array
    #[inline]
    pub fn pop(&mut self) -> Option<Value> {
        self.elements.pop()
    }

    /// Set the length of the array
    ///
    /// Growing fills with undefined, shrinking drops trailing elements.
    pub fn set_length(&mut self, length: u32) -> bool {
        if length > MAX_ARRAY_LENGTH {
            return false;
        }
        self.elements.resize(length as usize, Value::undefined());
        true
    }

    /// Iterate over the elements
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.elements.iter()
    }

    /// Get the elements as a slice
    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.elements
    }
}
