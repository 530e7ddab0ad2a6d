//! Prototype chain resolution
//!
//! Reads walk from the receiver up through `proto` links and return the first
//! own property found, so own properties shadow inherited ones. Writes never
//! go through this module: they always land on the receiver itself.

use crate::gc::{GcRef, Heap};
use crate::runtime::Property;

/// Default bound for prototype chain walks
pub const MAX_PROTOTYPE_CHAIN: usize = 10_000;

/// Find a property on `start` or its prototypes
///
/// The walk stops at a null prototype, at a reclaimed object, or after
/// `max_depth` links. Hitting the bound means the chain is cyclic or
/// absurdly deep; the property is reported as not found.
pub fn lookup<'h>(heap: &'h Heap, start: GcRef, name: &str, max_depth: usize) -> Option<&'h Property> {
    let mut current = Some(start);
    let mut depth = 0;

    while let Some(r) = current {
        if depth > max_depth {
            tracing::warn!(name, max_depth, "prototype chain too deep, treating property as absent");
            return None;
        }

        let object = heap.get(r)?;
        if let Some(prop) = object.properties.get(name) {
            return Some(prop);
        }

        current = object.proto;
        depth += 1;
    }

    None
}

/// Check if `target` appears on the prototype chain of `object`
pub fn inherits_from(heap: &Heap, object: GcRef, target: GcRef, max_depth: usize) -> bool {
    let mut current = heap.get(object).and_then(|o| o.proto);
    let mut depth = 0;

    while let Some(r) = current {
        if r == target {
            return true;
        }
        if depth >= max_depth {
            return false;
        }
        current = heap.get(r).and_then(|o| o.proto);
        depth += 1;
    }

    false
}

/// Replace the prototype of `object`
///
/// Returns false, leaving the object untouched, when `object` is gone or the
/// new link would close a cycle.
pub fn set_prototype(heap: &mut Heap, object: GcRef, proto: Option<GcRef>, max_depth: usize) -> bool {
    if let Some(p) = proto {
        if p == object || inherits_from(heap, p, object, max_depth) {
            return false;
        }
    }

    match heap.get_mut(object) {
        Some(obj) => {
            obj.proto = proto;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::JSObject;
    use crate::value::Value;

    fn chain(heap: &mut Heap, len: usize) -> Vec<GcRef> {
        let mut refs = vec![heap.alloc(JSObject::ordinary(None))];
        for _ in 1..len {
            let parent = *refs.last().unwrap();
            refs.push(heap.alloc(JSObject::ordinary(Some(parent))));
        }
        refs
    }

    #[test]
    fn test_inherited_lookup() {
        let mut heap = Heap::new();
        let refs = chain(&mut heap, 3);
        heap.get_mut(refs[0]).unwrap().properties.assign("x", Value::number(1.0));

        let prop = lookup(&heap, refs[2], "x", MAX_PROTOTYPE_CHAIN).unwrap();
        assert_eq!(prop.value.as_number().unwrap().value(), 1.0);
        assert!(lookup(&heap, refs[2], "missing", MAX_PROTOTYPE_CHAIN).is_none());
    }

    #[test]
    fn test_shadowing() {
        let mut heap = Heap::new();
        let refs = chain(&mut heap, 2);
        heap.get_mut(refs[0]).unwrap().properties.assign("x", Value::number(1.0));
        heap.get_mut(refs[1]).unwrap().properties.assign("x", Value::number(2.0));

        let prop = lookup(&heap, refs[1], "x", MAX_PROTOTYPE_CHAIN).unwrap();
        assert_eq!(prop.value.as_number().unwrap().value(), 2.0);
    }

    #[test]
    fn test_depth_bound() {
        let mut heap = Heap::new();
        let refs = chain(&mut heap, 6);
        heap.get_mut(refs[0]).unwrap().properties.assign("x", Value::null());

        assert!(lookup(&heap, refs[5], "x", 5).is_some());
        assert!(lookup(&heap, refs[5], "x", 3).is_none());
    }

    #[test]
    fn test_set_prototype_rejects_cycles() {
        let mut heap = Heap::new();
        let refs = chain(&mut heap, 3);

        assert!(!set_prototype(&mut heap, refs[0], Some(refs[2]), MAX_PROTOTYPE_CHAIN));
        assert!(!set_prototype(&mut heap, refs[1], Some(refs[1]), MAX_PROTOTYPE_CHAIN));
        assert!(heap.get(refs[0]).unwrap().proto.is_none());

        let other = heap.alloc(JSObject::ordinary(None));
        assert!(set_prototype(&mut heap, refs[2], Some(other), MAX_PROTOTYPE_CHAIN));
        assert!(inherits_from(&heap, refs[2], other, MAX_PROTOTYPE_CHAIN));
        assert!(!inherits_from(&heap, refs[2], refs[0], MAX_PROTOTYPE_CHAIN));
        assert!(set_prototype(&mut heap, refs[2], None, MAX_PROTOTYPE_CHAIN));
    }
}
