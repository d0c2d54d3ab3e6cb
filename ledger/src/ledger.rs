//! The token ledger: balances, supply, fee-on-transfer, treasury reserve.
//!
//! Every balance change (transfer legs, mints and burns) funnels through one
//! hook, [`TokenLedger::apply_transfer`]. The hook stamps the receiver's
//! acquisition height and refuses treasury debits that would eat into the
//! locked airdrop reserve.

use crate::error::LedgerError;
use civitas_types::{Address, BlockHeight, TokenMetadata, BPS_DENOMINATOR};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a transfer was split between the recipient and the treasury.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferReceipt {
    /// Amount credited to the recipient.
    pub net: u128,
    /// Amount routed to the treasury.
    pub fee: u128,
}

/// Fungible-token ledger with a treasury account.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenLedger {
    treasury: Address,
    metadata: TokenMetadata,
    balances: HashMap<Address, u128>,
    total_supply: u128,
    /// Last height at which each account's balance increased.
    acquired_at: HashMap<Address, BlockHeight>,
    /// Treasury tokens promised to airdrop recipients and not yet claimed.
    locked_treasury: u128,
}

impl TokenLedger {
    pub fn new(treasury: Address, metadata: TokenMetadata) -> Self {
        Self {
            treasury,
            metadata,
            balances: HashMap::new(),
            total_supply: 0,
            acquired_at: HashMap::new(),
            locked_treasury: 0,
        }
    }

    pub fn treasury(&self) -> Address {
        self.treasury
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn set_metadata(&mut self, metadata: TokenMetadata) {
        self.metadata = metadata;
    }

    pub fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Height of the most recent balance increase for `account`.
    pub fn acquired_at(&self, account: &Address) -> Option<BlockHeight> {
        self.acquired_at.get(account).copied()
    }

    pub fn locked_treasury(&self) -> u128 {
        self.locked_treasury
    }

    /// Treasury balance not reserved for airdrop claims.
    pub fn unlocked_treasury(&self) -> u128 {
        self.balance_of(&self.treasury)
            .saturating_sub(self.locked_treasury)
    }

    /// Number of accounts with a non-zero balance.
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|b| **b > 0).count()
    }

    /// Move `amount` from `from` to `to`, charging `fee_bps` to the treasury.
    ///
    /// Transfers touching the treasury on either side are fee-exempt. With a
    /// fee, the two legs (fee to treasury, net to recipient) each pass through
    /// the transfer hook. Total supply is unchanged.
    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: u128,
        fee_bps: u32,
        now: BlockHeight,
    ) -> Result<TransferReceipt, LedgerError> {
        if to.is_zero() || from.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        if fee_bps as u128 > BPS_DENOMINATOR {
            return Err(LedgerError::InvalidFee(fee_bps));
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from.to_string(),
                needed: amount,
                available,
            });
        }

        let exempt = *from == self.treasury || *to == self.treasury;
        let fee = if exempt || fee_bps == 0 {
            0
        } else {
            amount
                .checked_mul(fee_bps as u128)
                .ok_or(LedgerError::Overflow)?
                / BPS_DENOMINATOR
        };
        let net = amount - fee;

        if fee > 0 {
            let treasury = self.treasury;
            self.apply_transfer(Some(from), Some(&treasury), fee, now)?;
        }
        self.apply_transfer(Some(from), Some(to), net, now)?;

        tracing::debug!(%from, %to, net, fee, height = %now, "transfer");
        Ok(TransferReceipt { net, fee })
    }

    /// Create `amount` new tokens for `to`.
    pub fn mint(&mut self, to: &Address, amount: u128, now: BlockHeight) -> Result<(), LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.apply_transfer(None, Some(to), amount, now)?;
        self.total_supply = supply;
        Ok(())
    }

    /// Destroy `amount` tokens held by `from`.
    pub fn burn(&mut self, from: &Address, amount: u128, now: BlockHeight) -> Result<(), LedgerError> {
        if from.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.apply_transfer(Some(from), None, amount, now)?;
        // apply_transfer debited `amount` from an existing balance, which
        // is itself bounded by supply.
        self.total_supply -= amount;
        Ok(())
    }

    /// Reserve `amount` of the treasury's unlocked balance.
    pub fn lock_treasury(&mut self, amount: u128) -> Result<(), LedgerError> {
        let unlocked = self.unlocked_treasury();
        if amount > unlocked {
            return Err(LedgerError::TreasuryReserveBreached {
                requested: amount,
                unlocked,
            });
        }
        self.locked_treasury += amount;
        Ok(())
    }

    /// Release `amount` from the treasury reserve.
    pub fn release_treasury(&mut self, amount: u128) -> Result<(), LedgerError> {
        if amount > self.locked_treasury {
            return Err(LedgerError::ReserveUnderflow {
                requested: amount,
                locked: self.locked_treasury,
            });
        }
        self.locked_treasury -= amount;
        Ok(())
    }

    /// The transfer hook. `None` on either side means mint or burn.
    fn apply_transfer(
        &mut self,
        from: Option<&Address>,
        to: Option<&Address>,
        amount: u128,
        now: BlockHeight,
    ) -> Result<(), LedgerError> {
        if let Some(from) = from {
            let available = self.balance_of(from);
            if available < amount {
                return Err(LedgerError::InsufficientBalance {
                    account: from.to_string(),
                    needed: amount,
                    available,
                });
            }
            if *from == self.treasury {
                let unlocked = available.saturating_sub(self.locked_treasury);
                if amount > unlocked {
                    return Err(LedgerError::TreasuryReserveBreached {
                        requested: amount,
                        unlocked,
                    });
                }
            }
        }
        if let Some(to) = to {
            let current = self.balance_of(to);
            // A self-transfer nets out, so only a distinct receiver can overflow.
            if from != Some(to) {
                current.checked_add(amount).ok_or(LedgerError::Overflow)?;
            }
        }

        if let Some(from) = from {
            let remaining = self.balance_of(from) - amount;
            if remaining == 0 {
                self.balances.remove(from);
            } else {
                self.balances.insert(*from, remaining);
            }
        }
        if let Some(to) = to {
            let credited = self.balance_of(to) + amount;
            if credited > 0 {
                self.balances.insert(*to, credited);
            }
            if amount > 0 {
                self.acquired_at.insert(*to, now);
            }
        }
        Ok(())
    }
}
