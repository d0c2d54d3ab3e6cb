//! Nullable infrastructure for deterministic testing.
//!
//! Test-friendly stand-ins for everything outside the governance engine:
//! - a block-height clock that only moves when told to
//! - scripted call targets that record, revert, or re-enter the engine
//!
//! Usage: register the targets on a `GovernanceEngine` and drive heights
//! from a `NullClock`.

pub mod clock;
pub mod target;

pub use clock::NullClock;
pub use target::{Invocation, ReentrantAction, ReentrantTarget, RecordingTarget, RevertingTarget};
