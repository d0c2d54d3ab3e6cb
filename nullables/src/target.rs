//! Scripted call targets for batch-execution tests.

use civitas_governance::{CallContext, CallRevert, CallTarget, GovernanceCall, GovernanceError};
use civitas_types::{Address, BlockHeight};
use std::sync::Mutex;

/// One observed call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub caller: Address,
    pub value: u128,
    pub data: Vec<u8>,
    pub height: BlockHeight,
}

/// Accepts every call, records it, and echoes the data back.
///
/// Also writes the data under the `last` storage key so tests can observe
/// that target-side effects are rolled back with a failed batch.
#[derive(Default)]
pub struct RecordingTarget {
    calls: Mutex<Vec<Invocation>>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CallTarget for RecordingTarget {
    fn invoke(
        &self,
        ctx: &mut CallContext<'_>,
        value: u128,
        data: &[u8],
    ) -> Result<Vec<u8>, CallRevert> {
        self.calls.lock().unwrap().push(Invocation {
            caller: ctx.caller(),
            value,
            data: data.to_vec(),
            height: ctx.now(),
        });
        ctx.storage_set(b"last".to_vec(), data.to_vec());
        Ok(data.to_vec())
    }
}

/// Refuses every call, with or without a reason payload.
pub struct RevertingTarget {
    reason: Option<Vec<u8>>,
}

impl RevertingTarget {
    pub fn with_reason(reason: impl Into<Vec<u8>>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    pub fn silent() -> Self {
        Self { reason: None }
    }
}

impl CallTarget for RevertingTarget {
    fn invoke(&self, _: &mut CallContext<'_>, _: u128, _: &[u8]) -> Result<Vec<u8>, CallRevert> {
        Err(match &self.reason {
            Some(reason) => CallRevert::with_reason(reason.clone()),
            None => CallRevert::silent(),
        })
    }
}

/// What a [`ReentrantTarget`] tries to do when called.
#[derive(Clone, Debug)]
pub enum ReentrantAction {
    Vote { id: u64, support: bool },
    Execute { id: u64 },
    Claim,
    Privileged(GovernanceCall),
}

/// Calls back into the engine from inside a batch.
///
/// The inner result is recorded. When `propagate` is set, an inner failure
/// reverts the outer call with the inner error's message.
pub struct ReentrantTarget {
    action: ReentrantAction,
    propagate: bool,
    outcomes: Mutex<Vec<Result<(), GovernanceError>>>,
}

impl ReentrantTarget {
    pub fn new(action: ReentrantAction, propagate: bool) -> Self {
        Self {
            action,
            propagate,
            outcomes: Mutex::new(Vec::new()),
        }
    }

    pub fn outcomes(&self) -> Vec<Result<(), GovernanceError>> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl CallTarget for ReentrantTarget {
    fn invoke(&self, ctx: &mut CallContext<'_>, _: u128, _: &[u8]) -> Result<Vec<u8>, CallRevert> {
        let outcome = match &self.action {
            ReentrantAction::Vote { id, support } => ctx.vote(*id, *support),
            ReentrantAction::Execute { id } => ctx.execute_proposal(*id).map(|_| ()),
            ReentrantAction::Claim => ctx.claim_airdrop().map(|_| ()),
            ReentrantAction::Privileged(call) => ctx.call_privileged(call.clone()),
        };
        self.outcomes.lock().unwrap().push(outcome.clone());
        match outcome {
            Err(e) if self.propagate => Err(e.into()),
            _ => Ok(Vec::new()),
        }
    }
}
