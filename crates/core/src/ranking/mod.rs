//! Priority-ordered selection structures.
//!
//! [`MaxHeap`] is the array-backed binary heap everything else ranks with.
//! [`RankedQueue`] wraps it in a payload-first queue API and is what the
//! matching and generation pipelines consume.
//!
//! Both return items in **descending** priority order. Callers that want the
//! smallest score first insert the negated score.

mod heap;
mod queue;

pub use heap::MaxHeap;
pub use queue::RankedQueue;
