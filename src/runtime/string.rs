//! JavaScript string representation
//!
//! Strings are immutable UTF-8 text shared through reference counting, so
//! property names and string values can be cloned without copying.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// JavaScript string
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsString(Rc<str>);

impl JsString {
    /// Create a new string from text
    pub fn new(s: &str) -> Self {
        JsString(Rc::from(s))
    }

    /// The empty string
    pub fn empty() -> Self {
        JsString(Rc::from(""))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the byte length of the string
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if string is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of UTF-16 code units, which is what `length` reports
    pub fn utf16_len(&self) -> usize {
        self.0.encode_utf16().count()
    }

    /// UTF-16 code unit at `index`
    pub fn code_unit_at(&self, index: usize) -> Option<u16> {
        self.0.encode_utf16().nth(index)
    }

    /// Character at UTF-16 position `index`, as `charAt` and indexed access
    /// see it
    ///
    /// Storage is UTF-8, so a lone surrogate cannot be represented. An index
    /// on the first half of a surrogate pair yields the whole character, and
    /// an index on the second half yields U+FFFD.
    pub fn char_at(&self, index: usize) -> Option<JsString> {
        let mut units = 0;
        for c in self.0.chars() {
            let width = c.len_utf16();
            if index == units {
                return Some(JsString::from(c.to_string()));
            }
            if index < units + width {
                return Some(JsString::from(char::REPLACEMENT_CHARACTER.to_string()));
            }
            units += width;
        }
        None
    }

    /// Concatenate two strings into a new one
    pub fn concat(&self, other: &str) -> JsString {
        let mut s = String::with_capacity(self.len() + other.len());
        s.push_str(&self.0);
        s.push_str(other);
        JsString::from(s)
    }

    /// Check if the string is a canonical array index (`"0"`, `"17"`, not `"01"`)
    pub fn as_array_index(s: &str) -> Option<u32> {
        if s.is_empty() || (s.len() > 1 && s.starts_with('0')) {
            return None;
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<u32>().ok().filter(|&i| i != u32::MAX)
    }
}

impl Deref for JsString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for JsString {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for JsString {
    fn from(s: &str) -> Self {
        JsString::new(s)
    }
}

impl From<String> for JsString {
    fn from(s: String) -> Self {
        JsString(Rc::from(s))
    }
}

impl fmt::Debug for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
