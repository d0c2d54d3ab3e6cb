//! Governance-only functions and the authority that gates them.
//!
//! Privileged functions are reachable in exactly one way: as a call in an
//! executed proposal's batch that targets the engine's own address. The
//! executor constructs [`Authority::GovernanceExecution`] for those calls;
//! every other entry point presents [`Authority::External`] and is refused.

use crate::airdrop::allocation_total;
use crate::engine::GovernanceEngine;
use crate::error::GovernanceError;
use crate::event::{AirdropKind, GovernanceEvent};
use crate::params::GovernableParam;
use civitas_types::{Address, BlockHeight, TokenMetadata, BPS_DENOMINATOR};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Per-call mint cap, in basis points of total supply.
pub const MINT_CAP_BPS: u128 = 200;

/// Who is asking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Authority {
    /// Any caller outside a governance batch, identified by address.
    External(Address),
    /// A call issued by the engine itself while executing a proposal.
    GovernanceExecution,
}

impl Authority {
    pub fn require_governance(&self) -> Result<(), GovernanceError> {
        match self {
            Authority::GovernanceExecution => Ok(()),
            Authority::External(caller) => Err(GovernanceError::Unauthorized(caller.to_string())),
        }
    }
}

/// Minting functions subject to the one-run-per-height guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MintingFn {
    Mint,
    AllocateMintAirdrop,
}

impl MintingFn {
    pub fn name(&self) -> &'static str {
        match self {
            MintingFn::Mint => "mint",
            MintingFn::AllocateMintAirdrop => "allocate_mint_airdrop",
        }
    }
}

/// A privileged function call, carried as bincode in a proposal's call data
/// when the call targets the engine itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceCall {
    SetTokenMetadata { name: String, symbol: String },
    SetParam { param: GovernableParam, value: u64 },
    Mint { to: Address, amount: u128 },
    TreasuryTransfer { to: Address, amount: u128 },
    TreasuryBurn { amount: u128 },
    AllocateMintAirdrop { allocations: Vec<(Address, u128)> },
    AllocateTreasuryAirdrop { allocations: Vec<(Address, u128)> },
    DeleteProposal { id: u64 },
}

impl GovernanceCall {
    pub fn encode(&self) -> Result<Vec<u8>, GovernanceError> {
        bincode::serialize(self).map_err(|e| GovernanceError::Unencodable(e.to_string()))
    }

    pub fn decode(data: &[u8]) -> Result<Self, GovernanceError> {
        bincode::deserialize(data).map_err(|e| GovernanceError::Undecodable(e.to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            GovernanceCall::SetTokenMetadata { .. } => "set_token_metadata",
            GovernanceCall::SetParam { .. } => "set_param",
            GovernanceCall::Mint { .. } => "mint",
            GovernanceCall::TreasuryTransfer { .. } => "treasury_transfer",
            GovernanceCall::TreasuryBurn { .. } => "treasury_burn",
            GovernanceCall::AllocateMintAirdrop { .. } => "allocate_mint_airdrop",
            GovernanceCall::AllocateTreasuryAirdrop { .. } => "allocate_treasury_airdrop",
            GovernanceCall::DeleteProposal { .. } => "delete_proposal",
        }
    }
}

impl GovernanceEngine {
    /// Invoke a privileged function directly. Always refused: direct
    /// callers never carry governance authority.
    pub fn call_privileged(
        &mut self,
        caller: Address,
        call: GovernanceCall,
        now: BlockHeight,
    ) -> Result<(), GovernanceError> {
        self.atomically(now, |engine| {
            engine.dispatch(Authority::External(caller), call, now)
        })
    }

    pub(crate) fn dispatch(
        &mut self,
        authority: Authority,
        call: GovernanceCall,
        now: BlockHeight,
    ) -> Result<(), GovernanceError> {
        if let Err(e) = authority.require_governance() {
            warn!(function = call.name(), ?authority, "privileged call refused");
            return Err(e);
        }

        match call {
            GovernanceCall::SetTokenMetadata { name, symbol } => {
                let metadata = TokenMetadata::new(&name, &symbol)?;
                self.state.ledger.set_metadata(metadata);
                info!(%name, %symbol, "token metadata updated");
                self.state
                    .events
                    .push(GovernanceEvent::TokenMetadataUpdated { name, symbol });
            }
            GovernanceCall::SetParam { param, value } => {
                let old = param.apply(&mut self.state.params, value)?;
                info!(param = param.name(), old, new = value, "parameter updated");
                self.state.events.push(GovernanceEvent::ParamUpdated {
                    param,
                    old,
                    new: value,
                });
            }
            GovernanceCall::Mint { to, amount } => {
                self.claim_minting_slot(MintingFn::Mint, now)?;
                self.check_mint_cap(amount)?;
                self.state.ledger.mint(&to, amount, now)?;
                info!(%to, amount, "governance mint");
                self.state.events.push(GovernanceEvent::Minted { to, amount });
            }
            GovernanceCall::TreasuryTransfer { to, amount } => {
                self.check_unlocked(amount)?;
                let treasury = self.identity();
                self.state.ledger.transfer(&treasury, &to, amount, 0, now)?;
                info!(%to, amount, "treasury transfer");
                self.state
                    .events
                    .push(GovernanceEvent::TreasuryTransfer { to, amount });
            }
            GovernanceCall::TreasuryBurn { amount } => {
                self.check_unlocked(amount)?;
                let treasury = self.identity();
                self.state.ledger.burn(&treasury, amount, now)?;
                info!(amount, "treasury burn");
                self.state
                    .events
                    .push(GovernanceEvent::TreasuryBurn { amount });
            }
            GovernanceCall::AllocateMintAirdrop { allocations } => {
                self.claim_minting_slot(MintingFn::AllocateMintAirdrop, now)?;
                let total = allocation_total(&allocations)?;
                self.check_mint_cap(total)?;
                self.state.airdrops.allocate_mint(&allocations)?;
                self.record_allocation(AirdropKind::Mint, allocations.len(), total);
            }
            GovernanceCall::AllocateTreasuryAirdrop { allocations } => {
                let total = allocation_total(&allocations)?;
                self.check_unlocked(total)?;
                self.state.ledger.lock_treasury(total)?;
                self.state.airdrops.allocate_treasury(&allocations)?;
                self.record_allocation(AirdropKind::Treasury, allocations.len(), total);
            }
            GovernanceCall::DeleteProposal { id } => {
                self.remove_proposal(Authority::GovernanceExecution, id)?;
            }
        }
        Ok(())
    }

    /// Largest amount a single mint may create at the current supply.
    pub fn mint_cap(&self) -> u128 {
        self.state
            .ledger
            .total_supply()
            .saturating_mul(MINT_CAP_BPS)
            / BPS_DENOMINATOR
    }

    fn check_mint_cap(&self, amount: u128) -> Result<(), GovernanceError> {
        let cap = self.mint_cap();
        if amount > cap {
            return Err(GovernanceError::MintCapExceeded {
                requested: amount,
                cap,
            });
        }
        Ok(())
    }

    fn check_unlocked(&self, amount: u128) -> Result<(), GovernanceError> {
        let unlocked = self.state.ledger.unlocked_treasury();
        if amount > unlocked {
            return Err(GovernanceError::TreasuryInsufficient {
                requested: amount,
                unlocked,
            });
        }
        Ok(())
    }

    /// Each minting function runs at most once per height.
    fn claim_minting_slot(&mut self, function: MintingFn, now: BlockHeight) -> Result<(), GovernanceError> {
        if self.state.last_minted_at.get(&function) == Some(&now) {
            return Err(GovernanceError::SameTickRepeat {
                function: function.name(),
                height: now,
            });
        }
        self.state.last_minted_at.insert(function, now);
        Ok(())
    }

    fn record_allocation(&mut self, kind: AirdropKind, recipients: usize, total: u128) {
        info!(?kind, recipients, total, "airdrop allocated");
        self.state.events.push(GovernanceEvent::AirdropAllocated {
            kind,
            recipients,
            total,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civitas_types::GovernanceParams;

    const GOV: Address = Address::from_low_u8(0xee);

    fn engine() -> GovernanceEngine {
        let mut engine = GovernanceEngine::new(
            GOV,
            TokenMetadata::new("Civitas", "CIV").unwrap(),
            GovernanceParams::default(),
        )
        .unwrap();
        engine.genesis_mint(&Address::from_low_u8(1), 9_000).unwrap();
        engine.genesis_mint(&GOV, 1_000).unwrap();
        engine
    }

    #[test]
    fn test_external_authority_refused() {
        let mut e = engine();
        let err = e
            .call_privileged(
                Address::from_low_u8(1),
                GovernanceCall::Mint { to: Address::from_low_u8(1), amount: 1 },
                BlockHeight::new(1),
            )
            .unwrap_err();
        assert!(matches!(err, GovernanceError::Unauthorized(_)));
        assert_eq!(e.ledger().total_supply(), 10_000);
    }

    #[test]
    fn test_call_encoding_roundtrip_and_garbage() {
        let calls = [
            GovernanceCall::SetParam { param: GovernableParam::QuorumBps, value: 500 },
            GovernanceCall::SetTokenMetadata { name: "Civitas".into(), symbol: "CIV".into() },
            GovernanceCall::AllocateTreasuryAirdrop {
                allocations: vec![(Address::from_low_u8(1), 5), (Address::from_low_u8(2), 7)],
            },
            GovernanceCall::AllocateMintAirdrop { allocations: vec![] },
        ];
        for call in calls {
            let bytes = call.encode().unwrap();
            assert!(!bytes.is_empty());
            assert_eq!(GovernanceCall::decode(&bytes).unwrap(), call);
        }
        assert!(matches!(
            GovernanceCall::decode(&[0xff, 0xff, 0xff, 0xff]),
            Err(GovernanceError::Undecodable(_))
        ));
    }

    #[test]
    fn test_mint_cap_is_two_percent() {
        let mut e = engine();
        assert_eq!(e.mint_cap(), 200);
        let h = BlockHeight::new(1);
        let to = Address::from_low_u8(2);
        assert_eq!(
            e.dispatch(Authority::GovernanceExecution, GovernanceCall::Mint { to, amount: 201 }, h),
            Err(GovernanceError::MintCapExceeded { requested: 201, cap: 200 })
        );
    }

    #[test]
    fn test_mint_once_per_height() {
        let mut e = engine();
        let to = Address::from_low_u8(2);
        let h = BlockHeight::new(1);
        e.dispatch(Authority::GovernanceExecution, GovernanceCall::Mint { to, amount: 10 }, h)
            .unwrap();
        assert!(matches!(
            e.dispatch(Authority::GovernanceExecution, GovernanceCall::Mint { to, amount: 10 }, h),
            Err(GovernanceError::SameTickRepeat { function: "mint", .. })
        ));
        // Different function, same height: independent slot.
        e.dispatch(
            Authority::GovernanceExecution,
            GovernanceCall::AllocateMintAirdrop { allocations: vec![(to, 5)] },
            h,
        )
        .unwrap();
        e.dispatch(
            Authority::GovernanceExecution,
            GovernanceCall::Mint { to, amount: 10 },
            BlockHeight::new(2),
        )
        .unwrap();
        assert_eq!(e.ledger().balance_of(&to), 20);
    }

    #[test]
    fn test_treasury_ops_respect_reserve() {
        let mut e = engine();
        let h = BlockHeight::new(1);
        let gov = Authority::GovernanceExecution;
        e.dispatch(
            gov,
            GovernanceCall::AllocateTreasuryAirdrop {
                allocations: vec![(Address::from_low_u8(3), 600)],
            },
            h,
        )
        .unwrap();
        assert_eq!(e.ledger().locked_treasury(), 600);
        assert_eq!(
            e.dispatch(gov, GovernanceCall::TreasuryBurn { amount: 401 }, h),
            Err(GovernanceError::TreasuryInsufficient { requested: 401, unlocked: 400 })
        );
        e.dispatch(
            gov,
            GovernanceCall::TreasuryTransfer { to: Address::from_low_u8(4), amount: 400 },
            h,
        )
        .unwrap();
        assert_eq!(e.ledger().balance_of(&GOV), 600);
    }

    #[test]
    fn test_param_bands_enforced() {
        let mut e = engine();
        let err = e
            .dispatch(
                Authority::GovernanceExecution,
                GovernanceCall::SetParam { param: GovernableParam::TransferFeeBps, value: 1_001 },
                BlockHeight::new(1),
            )
            .unwrap_err();
        assert!(matches!(err, GovernanceError::Params(_)));
        assert_eq!(e.params().transfer_fee_bps, 0);
    }
}
