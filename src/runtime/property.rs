//! Property table and operations
//!
//! Every object owns a `PropertyTable`: an insertion-ordered map from property
//! name to descriptor. Lookup is by name; iteration follows insertion order,
//! which is the order `for-in` and `Object.keys` observe.
//!
//! The table only ever touches its own entries. Prototype-chain resolution
//! lives in [`crate::runtime::prototype`].

use indexmap::IndexMap;

use crate::runtime::JsString;
use crate::value::Value;

/// Property attribute flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

impl Attributes {
    /// Attributes of a property created by plain assignment
    pub const DEFAULT: Attributes = Attributes {
        writable: true,
        enumerable: true,
        configurable: true,
    };

    /// Attributes of built-in methods and global bindings
    pub const BUILTIN: Attributes = Attributes {
        writable: true,
        enumerable: false,
        configurable: true,
    };

    /// Attributes of a function's `length` and `name`
    pub const READONLY: Attributes = Attributes {
        writable: false,
        enumerable: false,
        configurable: true,
    };

    /// Attributes of a property defined with an empty descriptor
    pub const NONE: Attributes = Attributes {
        writable: false,
        enumerable: false,
        configurable: false,
    };
}

/// A property descriptor
#[derive(Debug, Clone)]
pub struct Property {
    pub name: JsString,
    pub value: Value,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

impl Property {
    /// Create a property with the given attributes
    pub fn new(name: impl Into<JsString>, value: Value, attrs: Attributes) -> Self {
        Property {
            name: name.into(),
            value,
            writable: attrs.writable,
            enumerable: attrs.enumerable,
            configurable: attrs.configurable,
        }
    }

    /// Create a plain data property (writable, enumerable, configurable)
    pub fn data(name: impl Into<JsString>, value: Value) -> Self {
        Property::new(name, value, Attributes::DEFAULT)
    }

    /// Create a built-in property (writable, configurable, not enumerable)
    pub fn builtin(name: impl Into<JsString>, value: Value) -> Self {
        Property::new(name, value, Attributes::BUILTIN)
    }

    /// The attribute flags of this property
    pub fn attributes(&self) -> Attributes {
        Attributes {
            writable: self.writable,
            enumerable: self.enumerable,
            configurable: self.configurable,
        }
    }
}

/// Property table structure
#[derive(Debug, Default)]
pub struct PropertyTable {
    properties: IndexMap<JsString, Property>,
}

impl PropertyTable {
    /// Create a new empty property table
    pub fn new() -> Self {
        PropertyTable {
            properties: IndexMap::new(),
        }
    }

    /// Create a property table with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        PropertyTable {
            properties: IndexMap::with_capacity(capacity),
        }
    }

    /// Get the number of properties
    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Check if the table is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Get an own property by name
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Check if a property exists
    pub fn has(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Create or overwrite a property
    ///
    /// New properties get [`Attributes::DEFAULT`]. Writing to a non-writable
    /// property leaves it untouched and returns false.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(prop) = self.properties.get_mut(name) {
            if !prop.writable {
                tracing::trace!(name, "ignored write to read-only property");
                return false;
            }
            prop.value = value;
            return true;
        }

        let name = JsString::from(name);
        self.properties
            .insert(name.clone(), Property::data(name, value));
        true
    }

    /// Define a property with an explicit descriptor
    ///
    /// Redefining a non-configurable property is refused and returns false.
    /// A redefined property keeps its enumeration position.
    pub fn define(&mut self, property: Property) -> bool {
        if let Some(existing) = self.properties.get_mut(property.name.as_str()) {
            if !existing.configurable {
                tracing::trace!(name = %property.name, "ignored redefinition of non-configurable property");
                return false;
            }
            *existing = property;
            return true;
        }

        self.properties.insert(property.name.clone(), property);
        true
    }

    /// Delete a property by name
    ///
    /// Returns false only when the property exists and is not configurable.
    pub fn delete(&mut self, name: &str) -> bool {
        match self.properties.get(name) {
            None => true,
            Some(prop) if !prop.configurable => false,
            Some(_) => {
                self.properties.shift_remove(name);
                true
            }
        }
    }

    /// Iterate over all properties in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    /// Iterate over all property names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &JsString> + '_ {
        self.properties.keys()
    }

    /// Names of enumerable properties in insertion order
    pub fn enumerable_keys(&self) -> impl Iterator<Item = &JsString> + '_ {
        self.iter().filter(|p| p.enumerable).map(|p| &p.name)
    }

    /// Iterate over all property values
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.properties.values().map(|p| &p.value)
    }
}
