//! Gatherer face.
//!
//! Owns the producer-side path registry keyed by (slot, peer), the
//! index-aligned credit assignment vector, liveness-watch wiring, and the
//! completion listeners fulfilled exactly once on close or abort.

pub(crate) mod gather;
pub(crate) mod path;

pub use gather::Gatherer;
pub use path::{InboundPath, StreamPriority};
