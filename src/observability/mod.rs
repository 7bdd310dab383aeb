//! Observability conventions for `stage-flow`.
//!
//! The crate uses `tracing` for logs/events. Library code emits structured
//! events and never installs a global subscriber; hosts and tests perform
//! one-time `tracing_subscriber` initialization at process boundaries.

pub mod events;
