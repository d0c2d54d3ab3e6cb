//! Airdrop allocations owed to recipients.
//!
//! Two independent books: one paid by minting at claim time, one paid out of
//! the treasury. The treasury book is backed by the ledger's locked reserve,
//! which the engine adjusts alongside it.

use crate::error::GovernanceError;
use civitas_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AirdropBook {
    minted: HashMap<Address, u128>,
    treasury: HashMap<Address, u128>,
}

/// What a claimant is owed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Owed {
    pub mint: u128,
    pub treasury: u128,
}

impl Owed {
    pub fn is_empty(&self) -> bool {
        self.mint == 0 && self.treasury == 0
    }
}

/// Sum an allocation list, rejecting the zero address and overflow.
pub fn allocation_total(allocations: &[(Address, u128)]) -> Result<u128, GovernanceError> {
    let mut total: u128 = 0;
    for (recipient, amount) in allocations {
        if recipient.is_zero() {
            return Err(GovernanceError::Ledger(
                civitas_ledger::LedgerError::ZeroAddress,
            ));
        }
        total = total.checked_add(*amount).ok_or(GovernanceError::Overflow)?;
    }
    Ok(total)
}

impl AirdropBook {
    pub fn allocate_mint(&mut self, allocations: &[(Address, u128)]) -> Result<(), GovernanceError> {
        credit(&mut self.minted, allocations)
    }

    pub fn allocate_treasury(
        &mut self,
        allocations: &[(Address, u128)],
    ) -> Result<(), GovernanceError> {
        credit(&mut self.treasury, allocations)
    }

    pub fn owed(&self, claimant: &Address) -> Owed {
        Owed {
            mint: self.minted.get(claimant).copied().unwrap_or(0),
            treasury: self.treasury.get(claimant).copied().unwrap_or(0),
        }
    }

    /// Remove and return everything owed to `claimant`.
    pub fn take(&mut self, claimant: &Address) -> Owed {
        Owed {
            mint: self.minted.remove(claimant).unwrap_or(0),
            treasury: self.treasury.remove(claimant).unwrap_or(0),
        }
    }

    /// Sum of outstanding treasury allocations. Equals the ledger reserve.
    pub fn treasury_outstanding(&self) -> u128 {
        self.treasury.values().fold(0u128, |acc, v| acc.saturating_add(*v))
    }
}

fn credit(
    book: &mut HashMap<Address, u128>,
    allocations: &[(Address, u128)],
) -> Result<(), GovernanceError> {
    for (recipient, amount) in allocations {
        let entry = book.entry(*recipient).or_insert(0);
        *entry = entry.checked_add(*amount).ok_or(GovernanceError::Overflow)?;
    }
    Ok(())
}
