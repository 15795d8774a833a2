//! Hardware abstraction traits
//!
//! Pins and delays come from `embedded-hal` / `embedded-hal-async`; this
//! module only adds what those crates do not cover.

pub mod clock;

pub use clock::MonotonicClock;
