//! Reentrancy guard shared by vote, execute and claim.
//!
//! A nested attempt to enter while held fails immediately; it never waits.

use crate::error::GovernanceError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReentrancyGuard {
    entered: bool,
}

impl ReentrancyGuard {
    pub fn enter(&mut self) -> Result<(), GovernanceError> {
        if self.entered {
            return Err(GovernanceError::Reentrancy);
        }
        self.entered = true;
        Ok(())
    }

    pub fn exit(&mut self) {
        self.entered = false;
    }

    pub fn is_held(&self) -> bool {
        self.entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_enter_fails() {
        let mut guard = ReentrancyGuard::default();
        guard.enter().unwrap();
        assert_eq!(guard.enter(), Err(GovernanceError::Reentrancy));
        guard.exit();
        assert!(guard.enter().is_ok());
    }
}
