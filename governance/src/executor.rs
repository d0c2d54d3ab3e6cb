//! Batched call execution for accepted proposals.
//!
//! Calls run strictly in order. A call whose target is the engine's own
//! address is decoded as a [`GovernanceCall`] and dispatched with governance
//! authority; any other target must have code registered in the
//! [`TargetRegistry`]. The first failure aborts the batch and the caller's
//! checkpoint rolls back every earlier call.

use crate::airdrop::Owed;
use crate::engine::GovernanceEngine;
use crate::error::GovernanceError;
use crate::privileged::{Authority, GovernanceCall};
use crate::proposal::Call;
use civitas_ledger::TransferReceipt;
use civitas_types::{Address, BlockHeight};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Code living at a non-governance address.
pub trait CallTarget: Send + Sync {
    /// Handle a call carrying `value` tokens (already credited to the
    /// target) and opaque `data`. Return data on success.
    fn invoke(
        &self,
        ctx: &mut CallContext<'_>,
        value: u128,
        data: &[u8],
    ) -> Result<Vec<u8>, CallRevert>;
}

pub type TargetRegistry = HashMap<Address, Arc<dyn CallTarget>>;

/// A target's refusal, with an optional reason payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallRevert {
    pub reason: Option<Vec<u8>>,
}

impl CallRevert {
    pub fn with_reason(reason: impl Into<Vec<u8>>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    /// Revert without a reason.
    pub fn silent() -> Self {
        Self { reason: None }
    }
}

impl From<GovernanceError> for CallRevert {
    fn from(e: GovernanceError) -> Self {
        Self::with_reason(e.to_string())
    }
}

/// What a target sees while it runs: its own address, the engine as caller,
/// and a handle back into the engine.
pub struct CallContext<'a> {
    engine: &'a mut GovernanceEngine,
    address: Address,
    now: BlockHeight,
}

impl CallContext<'_> {
    /// The address the target lives at.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Always the governance identity.
    pub fn caller(&self) -> Address {
        self.engine.identity()
    }

    pub fn now(&self) -> BlockHeight {
        self.now
    }

    pub fn balance_of(&self, account: &Address) -> u128 {
        self.engine.ledger().balance_of(account)
    }

    pub fn total_supply(&self) -> u128 {
        self.engine.ledger().total_supply()
    }

    /// Move tokens out of the target's own balance.
    pub fn transfer(&mut self, to: Address, amount: u128) -> Result<TransferReceipt, GovernanceError> {
        self.engine.transfer(self.address, to, amount, self.now)
    }

    pub fn storage_get(&self, key: &[u8]) -> Option<&[u8]> {
        self.engine.target_storage(&self.address, key)
    }

    pub fn storage_set(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.engine
            .state
            .target_storage
            .entry(self.address)
            .or_default()
            .insert(key.into(), value.into());
    }

    // Re-entry points. Each behaves exactly as if the target had called the
    // engine from outside, with the target's address as caller.

    pub fn vote(&mut self, id: u64, support: bool) -> Result<(), GovernanceError> {
        self.engine.vote(self.address, id, support, self.now)
    }

    pub fn execute_proposal(&mut self, id: u64) -> Result<Vec<Vec<u8>>, GovernanceError> {
        self.engine.execute_proposal(id, self.now)
    }

    pub fn claim_airdrop(&mut self) -> Result<Owed, GovernanceError> {
        self.engine.claim_airdrop(self.address, self.now)
    }

    pub fn call_privileged(&mut self, call: GovernanceCall) -> Result<(), GovernanceError> {
        self.engine.call_privileged(self.address, call, self.now)
    }
}

impl GovernanceEngine {
    /// Run `calls` in order, returning each call's return data.
    pub(crate) fn run_batch(
        &mut self,
        proposal: u64,
        calls: &[Call],
        now: BlockHeight,
    ) -> Result<Vec<Vec<u8>>, GovernanceError> {
        let mut results = Vec::with_capacity(calls.len());
        for (index, call) in calls.iter().enumerate() {
            debug!(proposal, index, target = %call.target, value = call.value, "dispatching call");
            match self.run_call(index, call, now) {
                Ok(data) => results.push(data),
                Err(e) => {
                    warn!(proposal, index, error = %e, "batch aborted");
                    return Err(e);
                }
            }
        }
        Ok(results)
    }

    fn run_call(
        &mut self,
        index: usize,
        call: &Call,
        now: BlockHeight,
    ) -> Result<Vec<u8>, GovernanceError> {
        if call.target == self.identity() {
            let decoded = GovernanceCall::decode(&call.data).map_err(|e| {
                GovernanceError::CallFailed {
                    index,
                    cause: e.to_string(),
                }
            })?;
            // Value sent to the treasury from the treasury is a no-op.
            return self
                .dispatch(Authority::GovernanceExecution, decoded, now)
                .map(|()| Vec::new())
                .map_err(|e| GovernanceError::CallReverted {
                    index,
                    reason: e.to_string().into_bytes(),
                });
        }

        let target = self
            .targets
            .get(&call.target)
            .cloned()
            .ok_or_else(|| GovernanceError::CallFailed {
                index,
                cause: format!("no code at {}", call.target),
            })?;

        if call.value > 0 {
            let treasury = self.identity();
            self.state
                .ledger
                .transfer(&treasury, &call.target, call.value, 0, now)
                .map_err(|e| GovernanceError::CallFailed {
                    index,
                    cause: e.to_string(),
                })?;
        }

        let mut ctx = CallContext {
            engine: self,
            address: call.target,
            now,
        };
        target
            .invoke(&mut ctx, call.value, &call.data)
            .map_err(|revert| match revert.reason {
                Some(reason) => GovernanceError::CallReverted { index, reason },
                None => GovernanceError::CallFailed {
                    index,
                    cause: "reverted without a reason".into(),
                },
            })
    }
}
