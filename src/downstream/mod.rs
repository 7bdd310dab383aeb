//! Downstream face.
//!
//! Owns the consumer-side path registry and the fan-out mechanics: credit
//! aggregation, batch sequencing with redeploy retention, and graceful-close
//! versus cause-excluding-abort shutdown delivery.

pub(crate) mod multiplexer;
pub(crate) mod path;

pub use multiplexer::DownstreamMux;
pub use path::{DownstreamPath, Filter, FilterToken};
