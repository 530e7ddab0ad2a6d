//! Garbage collector module
//!
//! Flathead uses a precise, non-moving mark-sweep collector over an arena of
//! slots. Handles are slot indices checked against a generation counter.
//!
//! Benefits over reference counting:
//! - Shared prototypes need no ownership bookkeeping
//! - Handles cycles automatically
//! - Stale handles are detected instead of dangling

mod allocator;
mod collector;

pub use allocator::{GcRef, Heap};
pub use collector::GcStats;

impl Heap {
    /// Run garbage collection from the given roots
    pub fn collect(&mut self, roots: impl IntoIterator<Item = GcRef>) -> GcStats {
        collector::collect(self, roots)
    }
}
