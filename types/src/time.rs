//! Block height: the only clock the protocol knows.
//!
//! Deadlines and delays are counted in ticks of the host's block height.
//! There is no wall-clock time anywhere in the state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A block height (tick). Monotonic, never moves backward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHeight(u64);

impl BlockHeight {
    /// The genesis height.
    pub const GENESIS: Self = Self(0);

    pub const fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Height `ticks` blocks later, saturating at `u64::MAX`.
    pub fn saturating_add(self, ticks: u64) -> Self {
        Self(self.0.saturating_add(ticks))
    }

    /// Ticks elapsed since this height (relative to `now`), saturating to 0.
    pub fn elapsed_since(&self, now: BlockHeight) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Whether `now` has reached this height plus `ticks`.
    pub fn has_elapsed(&self, ticks: u64, now: BlockHeight) -> bool {
        now.0 >= self.0.saturating_add(ticks)
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
