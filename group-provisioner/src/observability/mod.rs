//! Observability layer.
//!
//! The crate emits `tracing` events with canonical event names and a
//! `component` field and never installs a global subscriber. Binaries and
//! tests own one-time `tracing_subscriber` initialization at process
//! boundaries.

pub mod events;
