//! Core governance engine: proposal lifecycle, voting and airdrop claims.
//!
//! Every public mutator is one atomic state transition: the engine takes a
//! checkpoint of its whole state, runs the operation, and restores the
//! checkpoint if anything fails. Nested operations (a batched call that
//! re-enters the engine) take their own checkpoints, so an inner failure can
//! be handled by the caller without leaking partial effects.

use crate::airdrop::{AirdropBook, Owed};
use crate::error::GovernanceError;
use crate::event::GovernanceEvent;
use crate::executor::{CallTarget, TargetRegistry};
use crate::guard::ReentrancyGuard;
use crate::privileged::{Authority, MintingFn};
use crate::proposal::{
    zip_calls, Proposal, ProposalStage, ProposalStatus, Transition, MAX_TITLE_LEN,
};
use crate::store::ProposalStore;
use crate::voting::{Tally, VotingEngine};
use civitas_ledger::{TokenLedger, TransferReceipt};
use civitas_types::{Address, BlockHeight, GovernanceParams, TokenMetadata};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything a failed operation must roll back.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct EngineState {
    pub(crate) ledger: TokenLedger,
    pub(crate) params: GovernanceParams,
    pub(crate) proposals: ProposalStore,
    pub(crate) airdrops: AirdropBook,
    pub(crate) guard: ReentrancyGuard,
    /// Height at which each minting function last ran.
    pub(crate) last_minted_at: HashMap<MintingFn, BlockHeight>,
    /// Per-target key/value storage for registered call targets.
    pub(crate) target_storage: HashMap<Address, BTreeMap<Vec<u8>, Vec<u8>>>,
    /// Highest height observed so far.
    pub(crate) height: BlockHeight,
    pub(crate) events: Vec<GovernanceEvent>,
}

/// Serializable snapshot of the engine (call targets are not included).
#[derive(Serialize, Deserialize)]
struct EngineSnapshot {
    identity: Address,
    state: EngineState,
}

/// The governance engine. Its own address (`identity`) doubles as the
/// treasury and as the only caller allowed to reach privileged functions.
pub struct GovernanceEngine {
    identity: Address,
    pub(crate) state: EngineState,
    pub(crate) targets: TargetRegistry,
    voting: VotingEngine,
}

impl GovernanceEngine {
    pub fn new(
        identity: Address,
        metadata: TokenMetadata,
        params: GovernanceParams,
    ) -> Result<Self, GovernanceError> {
        if identity.is_zero() {
            return Err(GovernanceError::InvalidGenesis(
                "governance identity must not be the zero address".into(),
            ));
        }
        metadata.check_bounds()?;
        params.check_bounds()?;
        Ok(Self {
            identity,
            state: EngineState {
                ledger: TokenLedger::new(identity, metadata),
                params,
                proposals: ProposalStore::new(),
                airdrops: AirdropBook::default(),
                guard: ReentrancyGuard::default(),
                last_minted_at: HashMap::new(),
                target_storage: HashMap::new(),
                height: BlockHeight::GENESIS,
                events: Vec::new(),
            },
            targets: TargetRegistry::new(),
            voting: VotingEngine,
        })
    }

    /// The engine's own address: treasury and privileged caller.
    pub fn identity(&self) -> Address {
        self.identity
    }

    /// Attach code to an address so proposals can call it.
    pub fn register_target(
        &mut self,
        address: Address,
        target: Arc<dyn CallTarget>,
    ) -> Result<(), GovernanceError> {
        if address == self.identity || address.is_zero() {
            return Err(GovernanceError::Unauthorized(format!(
                "{address} cannot host a call target"
            )));
        }
        self.targets.insert(address, target);
        Ok(())
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Create a proposal. Returns its id.
    #[allow(clippy::too_many_arguments)]
    pub fn create_proposal(
        &mut self,
        caller: Address,
        title: &str,
        targets: Vec<Address>,
        call_data: Vec<Vec<u8>>,
        values: Vec<u128>,
        voting_duration: u64,
        now: BlockHeight,
    ) -> Result<u64, GovernanceError> {
        self.atomically(now, |engine| {
            engine.refuse_identity(&caller)?;
            if engine.state.ledger.balance_of(&caller) == 0 {
                return Err(GovernanceError::NotATokenHolder(caller.to_string()));
            }
            let calls = zip_calls(targets, call_data, values)?;
            let min = engine.state.params.min_voting_duration;
            if voting_duration < min {
                return Err(GovernanceError::DurationTooShort {
                    requested: voting_duration,
                    min,
                });
            }
            let len = title.chars().count();
            if len > MAX_TITLE_LEN {
                return Err(GovernanceError::TitleTooLong {
                    len,
                    max: MAX_TITLE_LEN,
                });
            }

            let id = engine.state.proposals.next_id()?;
            let deadline = now.saturating_add(voting_duration);
            let proposal = Proposal {
                id,
                proposer: caller,
                title: title.to_string(),
                calls,
                created_at: now,
                deadline,
                stage: ProposalStage::Open,
                voters: Vec::new(),
                ballots: HashMap::new(),
            };
            engine.state.events.push(GovernanceEvent::ProposalCreated {
                id,
                proposer: caller,
                title: proposal.title.clone(),
                targets: proposal.targets(),
                call_data: proposal.call_data(),
                values: proposal.values(),
                deadline,
            });
            info!(id, proposer = %caller, %deadline, calls = proposal.calls.len(), "proposal created");
            engine.state.proposals.insert(proposal);
            Ok(id)
        })
    }

    /// Cast a vote. One vote per address, strictly before the deadline.
    pub fn vote(
        &mut self,
        caller: Address,
        id: u64,
        support: bool,
        now: BlockHeight,
    ) -> Result<(), GovernanceError> {
        self.atomically(now, |engine| {
            engine.refuse_identity(&caller)?;
            engine.state.guard.enter()?;
            engine
                .state
                .proposals
                .get_mut(id)?
                .record_vote(caller, support, now)?;
            engine.state.events.push(GovernanceEvent::VoteCast {
                id,
                voter: caller,
                support,
            });
            debug!(id, voter = %caller, support, "vote cast");
            engine.state.guard.exit();
            Ok(())
        })
    }

    /// Close voting and decide. Returns `Accepted` or `Rejected`.
    ///
    /// The tally and the quorum are both measured at `now`. The decision is
    /// final; later balance changes never revisit it.
    pub fn enqueue_proposal(
        &mut self,
        id: u64,
        now: BlockHeight,
    ) -> Result<ProposalStatus, GovernanceError> {
        self.atomically(now, |engine| {
            let proposal = engine.state.proposals.get(id)?;
            if now < proposal.deadline {
                return Err(GovernanceError::VotingStillOpen {
                    deadline: proposal.deadline,
                    now,
                });
            }
            let tally = engine.voting.tally(proposal, &engine.state.ledger, now);
            let accepted = engine
                .voting
                .decide(&tally, &engine.state.ledger, &engine.state.params);
            let next = proposal
                .stage
                .transition(Transition::Enqueue { accepted, at: now })?;
            debug!(
                id,
                for_votes = tally.for_votes,
                against_votes = tally.against_votes,
                quorum = engine.state.params.quorum_threshold(engine.state.ledger.total_supply()),
                "tally"
            );

            engine.state.proposals.get_mut(id)?.stage = next;
            let event = if accepted {
                info!(id, enqueued_at = %now, "proposal accepted and enqueued");
                GovernanceEvent::ProposalEnqueued {
                    id,
                    enqueued_at: now,
                    for_votes: tally.for_votes,
                    against_votes: tally.against_votes,
                }
            } else {
                info!(id, "proposal rejected");
                GovernanceEvent::ProposalRejected {
                    id,
                    for_votes: tally.for_votes,
                    against_votes: tally.against_votes,
                }
            };
            engine.state.events.push(event);
            Ok(if accepted {
                ProposalStatus::Accepted
            } else {
                ProposalStatus::Rejected
            })
        })
    }

    /// Run an accepted proposal's batch once its timelock has passed.
    ///
    /// The proposal is marked executed before any call runs. If the batch
    /// fails, the whole operation is rolled back with that mark included, and
    /// execution may be attempted again.
    pub fn execute_proposal(
        &mut self,
        id: u64,
        now: BlockHeight,
    ) -> Result<Vec<Vec<u8>>, GovernanceError> {
        self.atomically(now, |engine| {
            engine.state.guard.enter()?;
            let proposal = engine.state.proposals.get(id)?;
            let next = proposal.stage.transition(Transition::Execute { at: now })?;
            if let Some(enqueued_at) = proposal.stage.enqueued_at() {
                let ready_at = enqueued_at.saturating_add(engine.state.params.execution_delay);
                if now < ready_at {
                    return Err(GovernanceError::TimelockActive { ready_at, now });
                }
            }
            let calls = proposal.calls.clone();

            engine.state.proposals.get_mut(id)?.stage = next;
            let results = engine.run_batch(id, &calls, now)?;

            engine.state.events.push(GovernanceEvent::ProposalExecuted {
                id,
                executed_at: now,
            });
            info!(id, calls = calls.len(), "proposal executed");
            engine.state.guard.exit();
            Ok(results)
        })
    }

    /// Delete a proposal that has not been enqueued. Proposer only.
    pub fn delete_proposal(
        &mut self,
        caller: Address,
        id: u64,
        now: BlockHeight,
    ) -> Result<(), GovernanceError> {
        self.atomically(now, |engine| {
            engine.remove_proposal(Authority::External(caller), id)
        })
    }

    pub(crate) fn remove_proposal(
        &mut self,
        authority: Authority,
        id: u64,
    ) -> Result<(), GovernanceError> {
        let proposal = self.state.proposals.get(id)?;
        if let Authority::External(caller) = authority {
            if caller != proposal.proposer {
                return Err(GovernanceError::NotProposer);
            }
        }
        if !proposal.stage.is_open() {
            return Err(GovernanceError::IllegalTransition {
                stage: proposal.stage.name(),
                action: "delete",
            });
        }
        self.state.proposals.remove(id)?;
        self.state
            .events
            .push(GovernanceEvent::ProposalDeleted { id });
        info!(id, ?authority, "proposal deleted");
        Ok(())
    }

    // ── Token operations ─────────────────────────────────────────────────

    /// Transfer tokens, applying the configured fee.
    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: u128,
        now: BlockHeight,
    ) -> Result<TransferReceipt, GovernanceError> {
        self.atomically(now, |engine| {
            engine.refuse_identity(&caller)?;
            let fee_bps = engine.state.params.transfer_fee_bps;
            Ok(engine
                .state
                .ledger
                .transfer(&caller, &to, amount, fee_bps, now)?)
        })
    }

    /// Collect everything the caller is owed from both airdrop books.
    pub fn claim_airdrop(&mut self, caller: Address, now: BlockHeight) -> Result<Owed, GovernanceError> {
        self.atomically(now, |engine| {
            engine.refuse_identity(&caller)?;
            engine.state.guard.enter()?;
            let owed = engine.state.airdrops.take(&caller);
            if owed.is_empty() {
                return Err(GovernanceError::NothingToClaim(caller.to_string()));
            }
            if owed.mint > 0 {
                engine.state.ledger.mint(&caller, owed.mint, now)?;
            }
            if owed.treasury > 0 {
                engine.state.ledger.release_treasury(owed.treasury)?;
                let treasury = engine.identity;
                engine
                    .state
                    .ledger
                    .transfer(&treasury, &caller, owed.treasury, 0, now)?;
            }
            engine.state.events.push(GovernanceEvent::AirdropClaimed {
                claimant: caller,
                minted: owed.mint,
                transferred: owed.treasury,
            });
            info!(claimant = %caller, minted = owed.mint, transferred = owed.treasury, "airdrop claimed");
            engine.state.guard.exit();
            Ok(owed)
        })
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn proposal(&self, id: u64) -> Result<&Proposal, GovernanceError> {
        self.state.proposals.get(id)
    }

    pub fn status(&self, id: u64, now: BlockHeight) -> Result<ProposalStatus, GovernanceError> {
        Ok(self.state.proposals.get(id)?.status_at(now))
    }

    /// Live tally at `now`. Not a snapshot: recomputed on every call.
    pub fn tally(&self, id: u64, now: BlockHeight) -> Result<Tally, GovernanceError> {
        let proposal = self.state.proposals.get(id)?;
        Ok(self.voting.tally(proposal, &self.state.ledger, now))
    }

    pub fn voting_power(&self, account: &Address, now: BlockHeight) -> u128 {
        self.voting.voting_power(&self.state.ledger, account, now)
    }

    pub fn targets(&self, id: u64) -> Result<Vec<Address>, GovernanceError> {
        Ok(self.state.proposals.get(id)?.targets())
    }

    pub fn call_data(&self, id: u64) -> Result<Vec<Vec<u8>>, GovernanceError> {
        Ok(self.state.proposals.get(id)?.call_data())
    }

    pub fn values(&self, id: u64) -> Result<Vec<u128>, GovernanceError> {
        Ok(self.state.proposals.get(id)?.values())
    }

    pub fn voters(&self, id: u64) -> Result<&[Address], GovernanceError> {
        Ok(&self.state.proposals.get(id)?.voters)
    }

    pub fn has_voted(&self, id: u64, voter: &Address) -> Result<bool, GovernanceError> {
        Ok(self.state.proposals.get(id)?.has_voted(voter))
    }

    pub fn vote_support(&self, id: u64, voter: &Address) -> Result<Option<bool>, GovernanceError> {
        Ok(self.state.proposals.get(id)?.vote_support(voter))
    }

    /// Number of proposal ids ever issued, deleted ones included.
    pub fn proposal_count(&self) -> u64 {
        self.state.proposals.issued()
    }

    pub fn proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.state.proposals.iter()
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.state.params
    }

    pub fn ledger(&self) -> &TokenLedger {
        &self.state.ledger
    }

    pub fn airdrop_allocation(&self, claimant: &Address) -> Owed {
        self.state.airdrops.owed(claimant)
    }

    pub fn target_storage(&self, target: &Address, key: &[u8]) -> Option<&[u8]> {
        self.state
            .target_storage
            .get(target)
            .and_then(|slots| slots.get(key))
            .map(Vec::as_slice)
    }

    /// Highest height the engine has observed.
    pub fn height(&self) -> BlockHeight {
        self.state.height
    }

    pub fn events(&self) -> &[GovernanceEvent] {
        &self.state.events
    }

    /// Drain the event log.
    pub fn take_events(&mut self) -> Vec<GovernanceEvent> {
        std::mem::take(&mut self.state.events)
    }

    // ── Persistence ──────────────────────────────────────────────────────

    /// Serialize the full engine state (targets excluded) with bincode.
    pub fn save_state(&self) -> Result<Vec<u8>, GovernanceError> {
        let snapshot = EngineSnapshot {
            identity: self.identity,
            state: self.state.clone(),
        };
        bincode::serialize(&snapshot).map_err(|e| GovernanceError::Snapshot(e.to_string()))
    }

    /// Restore an engine from `save_state` bytes. Call targets must be
    /// registered again by the host.
    pub fn load_state(data: &[u8]) -> Result<Self, GovernanceError> {
        let snapshot: EngineSnapshot =
            bincode::deserialize(data).map_err(|e| GovernanceError::Snapshot(e.to_string()))?;
        Ok(Self {
            identity: snapshot.identity,
            state: snapshot.state,
            targets: TargetRegistry::new(),
            voting: VotingEngine,
        })
    }

    // ── Internals ────────────────────────────────────────────────────────

    /// Run `op` as one atomic transition at height `now`.
    ///
    /// The checkpoint is a full clone of the state, so every call, nested
    /// re-entries included, costs time proportional to the whole state.
    pub(crate) fn atomically<T>(
        &mut self,
        now: BlockHeight,
        op: impl FnOnce(&mut Self) -> Result<T, GovernanceError>,
    ) -> Result<T, GovernanceError> {
        let checkpoint = self.state.clone();
        let result = self.observe(now).and_then(|()| op(self));
        if result.is_err() {
            self.state = checkpoint;
        }
        result
    }

    /// The identity only acts through an executed batch, never as an
    /// external caller.
    fn refuse_identity(&self, caller: &Address) -> Result<(), GovernanceError> {
        if *caller == self.identity {
            warn!(%caller, "external call made as the governance identity");
            return Err(GovernanceError::Unauthorized(caller.to_string()));
        }
        Ok(())
    }

    /// Advance the engine's notion of time. Heights never go backwards.
    fn observe(&mut self, now: BlockHeight) -> Result<(), GovernanceError> {
        if now < self.state.height {
            return Err(GovernanceError::ClockRegression {
                last: self.state.height,
                now,
            });
        }
        self.state.height = now;
        Ok(())
    }

    /// Mint outside the proposal flow. Only used while building genesis.
    pub(crate) fn genesis_mint(&mut self, to: &Address, amount: u128) -> Result<(), GovernanceError> {
        Ok(self.state.ledger.mint(to, amount, BlockHeight::GENESIS)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOV: Address = Address::from_low_u8(0xee);

    fn addr(tag: u8) -> Address {
        Address::from_low_u8(tag)
    }

    fn engine(balances: &[(u8, u128)]) -> GovernanceEngine {
        let params = GovernanceParams {
            min_voting_duration: 10,
            execution_delay: 10,
            quorum_bps: 400,
            transfer_fee_bps: 0,
        };
        let mut engine =
            GovernanceEngine::new(GOV, TokenMetadata::new("Civitas", "CIV").unwrap(), params)
                .unwrap();
        for (tag, amount) in balances {
            engine.genesis_mint(&addr(*tag), *amount).unwrap();
        }
        engine
    }

    fn empty_proposal(engine: &mut GovernanceEngine, proposer: u8, now: u64) -> u64 {
        engine
            .create_proposal(addr(proposer), "noop", vec![], vec![], vec![], 10, BlockHeight::new(now))
            .unwrap()
    }

    #[test]
    fn test_create_requires_balance() {
        let mut e = engine(&[(1, 100)]);
        let err = e
            .create_proposal(addr(2), "x", vec![], vec![], vec![], 10, BlockHeight::new(1))
            .unwrap_err();
        assert!(matches!(err, GovernanceError::NotATokenHolder(_)));
    }

    #[test]
    fn test_create_validates_inputs() {
        let mut e = engine(&[(1, 100)]);
        let h = BlockHeight::new(1);
        assert!(matches!(
            e.create_proposal(addr(1), "x", vec![addr(5)], vec![], vec![0], 10, h),
            Err(GovernanceError::LengthMismatch { .. })
        ));
        assert!(matches!(
            e.create_proposal(addr(1), "x", vec![], vec![], vec![], 9, h),
            Err(GovernanceError::DurationTooShort { requested: 9, min: 10 })
        ));
        let long = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(matches!(
            e.create_proposal(addr(1), &long, vec![], vec![], vec![], 10, h),
            Err(GovernanceError::TitleTooLong { .. })
        ));
        let exact = "x".repeat(MAX_TITLE_LEN);
        assert!(e.create_proposal(addr(1), &exact, vec![], vec![], vec![], 10, h).is_ok());
        assert!(e.events().len() == 1);
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut e = engine(&[(1, 100)]);
        let a = empty_proposal(&mut e, 1, 1);
        let b = empty_proposal(&mut e, 1, 1);
        assert_eq!((a, b), (1, 2));
        e.delete_proposal(addr(1), b, BlockHeight::new(2)).unwrap();
        let c = empty_proposal(&mut e, 1, 2);
        assert_eq!(c, 3);
        assert_eq!(e.proposal_count(), 3);
    }

    #[test]
    fn test_deadline_and_status() {
        let mut e = engine(&[(1, 100)]);
        let id = empty_proposal(&mut e, 1, 5);
        assert_eq!(e.proposal(id).unwrap().deadline, BlockHeight::new(15));
        assert_eq!(e.status(id, BlockHeight::new(14)).unwrap(), ProposalStatus::Active);
        assert_eq!(e.status(id, BlockHeight::new(15)).unwrap(), ProposalStatus::VotingClosed);
    }

    #[test]
    fn test_enqueue_before_deadline_fails() {
        let mut e = engine(&[(1, 100)]);
        let id = empty_proposal(&mut e, 1, 1);
        assert!(matches!(
            e.enqueue_proposal(id, BlockHeight::new(10)),
            Err(GovernanceError::VotingStillOpen { .. })
        ));
        assert_eq!(e.proposal(id).unwrap().stage, ProposalStage::Open);
    }

    #[test]
    fn test_enqueue_missing_is_not_found() {
        let mut e = engine(&[(1, 100)]);
        assert_eq!(
            e.enqueue_proposal(42, BlockHeight::new(1)),
            Err(GovernanceError::ProposalNotFound(42))
        );
    }

    #[test]
    fn test_accept_then_enqueue_twice_fails() {
        let mut e = engine(&[(1, 100)]);
        let id = empty_proposal(&mut e, 1, 1);
        e.vote(addr(1), id, true, BlockHeight::new(2)).unwrap();
        assert_eq!(
            e.enqueue_proposal(id, BlockHeight::new(11)).unwrap(),
            ProposalStatus::Accepted
        );
        assert!(matches!(
            e.enqueue_proposal(id, BlockHeight::new(12)),
            Err(GovernanceError::IllegalTransition { stage: "accepted", action: "enqueue" })
        ));
    }

    #[test]
    fn test_failed_operation_leaves_no_trace() {
        let mut e = engine(&[(1, 100)]);
        let id = empty_proposal(&mut e, 1, 1);
        e.vote(addr(1), id, true, BlockHeight::new(2)).unwrap();
        let events_before = e.events().len();
        assert!(e.vote(addr(1), id, false, BlockHeight::new(3)).is_err());
        assert_eq!(e.events().len(), events_before);
        assert!(!e.state.guard.is_held());
        assert_eq!(e.vote_support(id, &addr(1)).unwrap(), Some(true));
    }

    #[test]
    fn test_clock_regression_refused() {
        let mut e = engine(&[(1, 100)]);
        empty_proposal(&mut e, 1, 20);
        assert_eq!(
            e.vote(addr(1), 1, true, BlockHeight::new(19)),
            Err(GovernanceError::ClockRegression {
                last: BlockHeight::new(20),
                now: BlockHeight::new(19)
            })
        );
    }

    #[test]
    fn test_delete_by_stranger_fails() {
        let mut e = engine(&[(1, 100), (2, 100)]);
        let id = empty_proposal(&mut e, 1, 1);
        assert_eq!(
            e.delete_proposal(addr(2), id, BlockHeight::new(2)),
            Err(GovernanceError::NotProposer)
        );
        e.delete_proposal(addr(1), id, BlockHeight::new(2)).unwrap();
        assert_eq!(e.proposal(id).unwrap_err(), GovernanceError::ProposalNotFound(id));
        assert_eq!(e.tally(id, BlockHeight::new(2)).unwrap_err(), GovernanceError::ProposalNotFound(id));
    }

    #[test]
    fn test_identity_refused_as_external_caller() {
        let mut e = engine(&[(1, 100)]);
        e.genesis_mint(&GOV, 1_000).unwrap();
        let id = empty_proposal(&mut e, 1, 1);
        let h = BlockHeight::new(2);
        let refused = GovernanceError::Unauthorized(GOV.to_string());

        assert_eq!(e.transfer(GOV, addr(9), 1_000, h).unwrap_err(), refused);
        assert_eq!(e.vote(GOV, id, false, h).unwrap_err(), refused);
        assert_eq!(
            e.create_proposal(GOV, "x", vec![], vec![], vec![], 10, h).unwrap_err(),
            refused
        );
        assert_eq!(e.claim_airdrop(GOV, h).unwrap_err(), refused);
        assert_eq!(e.ledger().balance_of(&GOV), 1_000);
        assert!(!e.has_voted(id, &GOV).unwrap());
        assert!(!e.state.guard.is_held());
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_lifecycle() {
        let mut e = engine(&[(1, 100)]);
        let id = empty_proposal(&mut e, 1, 1);
        e.vote(addr(1), id, true, BlockHeight::new(2)).unwrap();
        let bytes = e.save_state().unwrap();
        let mut restored = GovernanceEngine::load_state(&bytes).unwrap();
        assert_eq!(restored.identity(), GOV);
        assert_eq!(restored.voters(id).unwrap(), &[addr(1)]);
        assert_eq!(
            restored.enqueue_proposal(id, BlockHeight::new(11)).unwrap(),
            ProposalStatus::Accepted
        );
        assert!(GovernanceEngine::load_state(&[1, 2, 3]).is_err());
    }
}
