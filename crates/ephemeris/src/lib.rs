//! Narrow capability interface to an ephemeris engine.
//!
//! The chart core only ever talks to [`EphemerisEngine`]. The Swiss Ephemeris
//! binding is one implementation (behind the `swisseph` feature); tests use
//! [`ScriptedEngine`] (behind `test-support`).

pub mod engine;
pub mod handle;

#[cfg(feature = "swisseph")]
pub mod swiss;

#[cfg(any(test, feature = "test-support"))]
pub mod scripted;

pub use engine::{Body, BodyCode, BodyPosition, CalcFlags, EngineError, EphemerisEngine, HouseCusps};
pub use handle::{connect, share, SharedEngine};

#[cfg(feature = "swisseph")]
pub use swiss::SwissEphemeris;

#[cfg(any(test, feature = "test-support"))]
pub use scripted::{CallLog, EngineCall, ScriptedEngine};
