//! Runtime integration layer.
//!
//! Isolates time handling behind the [`clock::Clock`] trait so deadline and
//! backoff behavior stays testable and the rest of the crate carries no
//! direct dependency on wall-clock sleeping.

pub(crate) mod clock;
