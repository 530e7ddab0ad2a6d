//! Mark-sweep garbage collector
//!
//! The GC works in two phases:
//! 1. Mark: traverse everything reachable from the roots, set the mark bit
//! 2. Sweep: free every slot that was not marked and clear surviving marks
//!
//! Collection is stop-the-world: it runs to completion inside a single call
//! and never interleaves with mutation. Objects are never moved, so handles
//! stay valid for as long as their object is reachable.

use std::time::{Duration, Instant};

use super::allocator::{GcRef, Heap};

/// Statistics about a GC run
#[derive(Debug, Clone, Copy, Default)]
pub struct GcStats {
    /// Number of objects before collection
    pub objects_before: usize,
    /// Number of objects after collection
    pub objects_after: usize,
    /// Number of objects reclaimed
    pub objects_freed: usize,
    /// Time spent in the collector
    pub pause: Duration,
}

/// Run a full collection with the given roots
pub fn collect(heap: &mut Heap, roots: impl IntoIterator<Item = GcRef>) -> GcStats {
    let start = Instant::now();
    let objects_before = heap.live_objects();

    mark(heap, roots);
    let objects_freed = sweep(heap);
    heap.reset_allocation_counter();

    let stats = GcStats {
        objects_before,
        objects_after: heap.live_objects(),
        objects_freed,
        pause: start.elapsed(),
    };

    tracing::debug!(
        target: "flathead::gc",
        objects_before = stats.objects_before,
        objects_after = stats.objects_after,
        freed = stats.objects_freed,
        pause_us = stats.pause.as_micros() as u64,
        "GC cycle complete"
    );

    stats
}

/// Mark every object reachable from the roots
fn mark(heap: &mut Heap, roots: impl IntoIterator<Item = GcRef>) {
    let mut worklist: Vec<GcRef> = roots.into_iter().collect();

    while let Some(r) = worklist.pop() {
        // Stale or already visited handles end the walk here
        let Some(slot) = heap.slot_mut(r) else {
            continue;
        };
        if slot.marked {
            continue;
        }
        slot.marked = true;

        if let Some(object) = &slot.object {
            object.trace(&mut |child| worklist.push(child));
        }
    }
}

/// Free unmarked slots and clear marks on survivors
fn sweep(heap: &mut Heap) -> usize {
    let mut freed = Vec::new();

    for (index, slot) in heap.slots_mut() {
        if slot.object.is_none() {
            continue;
        }
        if slot.marked {
            slot.marked = false;
        } else {
            slot.object = None;
            slot.generation = slot.generation.wrapping_add(1);
            freed.push(index);
        }
    }

    for &index in &freed {
        heap.release(index);
    }
    freed.len()
}
