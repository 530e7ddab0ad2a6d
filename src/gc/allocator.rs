//! Arena allocator for the JavaScript heap
//!
//! Objects live in a `Vec` of slots. A handle stores the slot index and the
//! slot generation at allocation time; freeing a slot bumps its generation, so
//! a stale handle can never reach the object that later reuses the slot.
//!
//! ```text
//! slots:     [ gen 0 | obj ] [ gen 3 | free ] [ gen 1 | obj ] ...
//! free_list: [ 1, ... ]
//! ```

use std::fmt;

use crate::runtime::JSObject;

/// Handle to a heap object
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GcRef {
    index: u32,
    generation: u32,
}

impl GcRef {
    #[inline]
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        GcRef { index, generation }
    }

    /// Slot index of the referenced object
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }
}

impl fmt::Debug for GcRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

/// A heap slot
#[derive(Debug)]
pub(crate) struct Slot {
    pub(crate) generation: u32,
    pub(crate) marked: bool,
    pub(crate) object: Option<JSObject>,
}

/// The JavaScript heap
#[derive(Debug, Default)]
pub struct Heap {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    live: usize,
    /// Allocations since the last collection
    allocated_since_gc: usize,
    total_allocations: u64,
}

impl Heap {
    /// Create a new empty heap
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live objects
    #[inline]
    pub fn live_objects(&self) -> usize {
        self.live
    }

    /// Number of slots, live or free
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn allocated_since_gc(&self) -> usize {
        self.allocated_since_gc
    }

    #[inline]
    pub fn total_allocations(&self) -> u64 {
        self.total_allocations
    }

    /// Allocate an object, reusing a free slot when one exists
    pub fn alloc(&mut self, object: JSObject) -> GcRef {
        self.live += 1;
        self.allocated_since_gc += 1;
        self.total_allocations += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.object = Some(object);
            slot.marked = false;
            return GcRef::new(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            marked: false,
            object: Some(object),
        });
        GcRef::new(index, 0)
    }

    /// Get the object behind a handle, or None if it was reclaimed
    #[inline]
    pub fn get(&self, r: GcRef) -> Option<&JSObject> {
        self.slots
            .get(r.index as usize)
            .filter(|slot| slot.generation == r.generation)
            .and_then(|slot| slot.object.as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, r: GcRef) -> Option<&mut JSObject> {
        self.slots
            .get_mut(r.index as usize)
            .filter(|slot| slot.generation == r.generation)
            .and_then(|slot| slot.object.as_mut())
    }

    /// Check if a handle still refers to a live object
    #[inline]
    pub fn contains(&self, r: GcRef) -> bool {
        self.get(r).is_some()
    }

    /// Iterate over live objects with their handles
    pub fn iter(&self) -> impl Iterator<Item = (GcRef, &JSObject)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.object
                .as_ref()
                .map(|obj| (GcRef::new(i as u32, slot.generation), obj))
        })
    }

    /// Mutable access to a live slot for the collector
    pub(crate) fn slot_mut(&mut self, r: GcRef) -> Option<&mut Slot> {
        self.slots
            .get_mut(r.index as usize)
            .filter(|slot| slot.generation == r.generation && slot.object.is_some())
    }

    pub(crate) fn slots_mut(&mut self) -> impl Iterator<Item = (u32, &mut Slot)> {
        self.slots
            .iter_mut()
            .enumerate()
            .map(|(i, slot)| (i as u32, slot))
    }

    /// Release a slot swept by the collector
    pub(crate) fn release(&mut self, index: u32) {
        self.free_list.push(index);
        self.live -= 1;
    }

    pub(crate) fn reset_allocation_counter(&mut self) {
        self.allocated_since_gc = 0;
    }
}
