//! Governance parameters and their safety bands.
//!
//! Every field is governable, but only through an executed proposal, and
//! never outside the hard bounds defined here.

use crate::error::CivitasError;
use serde::{Deserialize, Serialize};

/// Basis-point denominator (100% = 10_000 bps).
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Floor for `min_voting_duration`, in ticks.
pub const MIN_VOTING_DURATION_FLOOR: u64 = 10;

/// Floor for `execution_delay`, in ticks.
pub const EXECUTION_DELAY_FLOOR: u64 = 10;

/// Floor for `quorum_bps` (1%).
pub const QUORUM_BPS_FLOOR: u32 = 100;

/// Ceiling for `quorum_bps` (100%).
pub const QUORUM_BPS_CEILING: u32 = 10_000;

/// Ceiling for `transfer_fee_bps` (10%).
pub const TRANSFER_FEE_BPS_CEILING: u32 = 1_000;

/// Maximum token name length, in characters.
pub const MAX_NAME_LEN: usize = 32;

/// Maximum token symbol length, in characters.
pub const MAX_SYMBOL_LEN: usize = 8;

/// Process-wide governance parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Shortest voting window a proposal may request, in ticks.
    pub min_voting_duration: u64,

    /// Timelock between enqueue and earliest execution, in ticks.
    pub execution_delay: u64,

    /// Quorum as basis points of total supply, measured at enqueue time.
    pub quorum_bps: u32,

    /// Fee taken from holder-to-holder transfers and routed to the treasury.
    pub transfer_fee_bps: u32,
}

impl GovernanceParams {
    /// Mainnet-style defaults: ~1 day voting, ~2 day timelock at 12s blocks.
    pub fn civitas_defaults() -> Self {
        Self {
            min_voting_duration: 7_200,
            execution_delay: 14_400,
            quorum_bps: 400, // 4%
            transfer_fee_bps: 0,
        }
    }

    /// Quorum threshold for a given total supply.
    pub fn quorum_threshold(&self, total_supply: u128) -> u128 {
        total_supply.saturating_mul(self.quorum_bps as u128) / BPS_DENOMINATOR
    }

    /// Check that every field sits inside its safety band.
    pub fn check_bounds(&self) -> Result<(), CivitasError> {
        check_min_voting_duration(self.min_voting_duration)?;
        check_execution_delay(self.execution_delay)?;
        check_quorum_bps(self.quorum_bps)?;
        check_transfer_fee_bps(self.transfer_fee_bps)
    }
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self::civitas_defaults()
    }
}

pub fn check_min_voting_duration(ticks: u64) -> Result<(), CivitasError> {
    if ticks < MIN_VOTING_DURATION_FLOOR {
        return Err(CivitasError::ParamOutOfBounds {
            param: "min_voting_duration",
            value: ticks as u128,
            min: MIN_VOTING_DURATION_FLOOR as u128,
            max: u64::MAX as u128,
        });
    }
    Ok(())
}

pub fn check_execution_delay(ticks: u64) -> Result<(), CivitasError> {
    if ticks < EXECUTION_DELAY_FLOOR {
        return Err(CivitasError::ParamOutOfBounds {
            param: "execution_delay",
            value: ticks as u128,
            min: EXECUTION_DELAY_FLOOR as u128,
            max: u64::MAX as u128,
        });
    }
    Ok(())
}

pub fn check_quorum_bps(bps: u32) -> Result<(), CivitasError> {
    if !(QUORUM_BPS_FLOOR..=QUORUM_BPS_CEILING).contains(&bps) {
        return Err(CivitasError::ParamOutOfBounds {
            param: "quorum_bps",
            value: bps as u128,
            min: QUORUM_BPS_FLOOR as u128,
            max: QUORUM_BPS_CEILING as u128,
        });
    }
    Ok(())
}

pub fn check_transfer_fee_bps(bps: u32) -> Result<(), CivitasError> {
    if bps > TRANSFER_FEE_BPS_CEILING {
        return Err(CivitasError::ParamOutOfBounds {
            param: "transfer_fee_bps",
            value: bps as u128,
            min: 0,
            max: TRANSFER_FEE_BPS_CEILING as u128,
        });
    }
    Ok(())
}

/// Display name and ticker of the governance token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
}

impl TokenMetadata {
    /// Build metadata, rejecting empty or oversized strings.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Result<Self, CivitasError> {
        let meta = Self {
            name: name.into(),
            symbol: symbol.into(),
        };
        meta.check_bounds()?;
        Ok(meta)
    }

    pub fn check_bounds(&self) -> Result<(), CivitasError> {
        let name_len = self.name.chars().count();
        if name_len == 0 || name_len > MAX_NAME_LEN {
            return Err(CivitasError::InvalidMetadata(format!(
                "name must be 1..={MAX_NAME_LEN} characters, got {name_len}"
            )));
        }
        let symbol_len = self.symbol.chars().count();
        if symbol_len == 0 || symbol_len > MAX_SYMBOL_LEN {
            return Err(CivitasError::InvalidMetadata(format!(
                "symbol must be 1..={MAX_SYMBOL_LEN} characters, got {symbol_len}"
            )));
        }
        Ok(())
    }
}
