//! Nullable clock: deterministic block heights for testing.

use civitas_types::BlockHeight;
use std::cell::Cell;

/// A deterministic height source.
///
/// The height only advances when you tell it to.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial: u64) -> Self {
        Self {
            current: Cell::new(initial),
        }
    }

    /// Current height.
    pub fn now(&self) -> BlockHeight {
        BlockHeight::new(self.current.get())
    }

    /// Advance by a number of heights, returning the new height.
    pub fn advance(&self, ticks: u64) -> BlockHeight {
        self.current.set(self.current.get() + ticks);
        self.now()
    }

    /// Jump to a specific height.
    pub fn set(&self, height: u64) {
        self.current.set(height);
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_is_explicit() {
        let clock = NullClock::new(5);
        assert_eq!(clock.now(), BlockHeight::new(5));
        assert_eq!(clock.advance(10), BlockHeight::new(15));
        clock.set(3);
        assert_eq!(clock.now().as_u64(), 3);
    }
}
