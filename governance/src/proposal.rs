//! Governance proposals and their lifecycle.
//!
//! A proposal moves through a small tagged state machine:
//!
//! ```text
//! Open ──(deadline passes)──► [voting closed, still Open]
//!   │                               │
//!   │                     enqueue ──┴──► Accepted ──execute──► Executed
//!   │                               └──► Rejected
//!   └── delete (proposer / governance) while Open
//! ```
//!
//! Every move goes through [`ProposalStage::transition`], so an illegal
//! combination (executing a rejected proposal, enqueuing twice) is refused
//! in one place.

use crate::error::GovernanceError;
use civitas_types::{Address, BlockHeight};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum proposal title length, in characters.
pub const MAX_TITLE_LEN: usize = 50;

/// One call in a proposal's batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Who receives the call.
    pub target: Address,
    /// Tokens moved from the treasury to `target` before the call runs.
    pub value: u128,
    /// Opaque payload handed to the target.
    pub data: Vec<u8>,
}

/// A voter's recorded choice. Fixed at vote time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub support: bool,
    pub cast_at: BlockHeight,
}

/// Stored lifecycle stage of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStage {
    /// Created; voting runs until the deadline, then it awaits enqueue.
    Open,
    /// Quorum and majority met at enqueue time. Waiting out the timelock.
    Accepted { enqueued_at: BlockHeight },
    /// Quorum or majority missed at enqueue time. Terminal.
    Rejected { enqueued_at: BlockHeight },
    /// Batch ran. Terminal.
    Executed {
        enqueued_at: BlockHeight,
        executed_at: BlockHeight,
    },
}

/// A requested stage change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Enqueue { accepted: bool, at: BlockHeight },
    Execute { at: BlockHeight },
}

impl Transition {
    fn action(&self) -> &'static str {
        match self {
            Self::Enqueue { .. } => "enqueue",
            Self::Execute { .. } => "execute",
        }
    }
}

impl ProposalStage {
    /// Apply `transition`, refusing anything the lifecycle does not allow.
    pub fn transition(&self, transition: Transition) -> Result<Self, GovernanceError> {
        match (*self, transition) {
            (Self::Open, Transition::Enqueue { accepted: true, at }) => {
                Ok(Self::Accepted { enqueued_at: at })
            }
            (Self::Open, Transition::Enqueue { accepted: false, at }) => {
                Ok(Self::Rejected { enqueued_at: at })
            }
            (Self::Accepted { enqueued_at }, Transition::Execute { at }) => Ok(Self::Executed {
                enqueued_at,
                executed_at: at,
            }),
            (stage, t) => Err(GovernanceError::IllegalTransition {
                stage: stage.name(),
                action: t.action(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Accepted { .. } => "accepted",
            Self::Rejected { .. } => "rejected",
            Self::Executed { .. } => "executed",
        }
    }

    /// Height at which the proposal was enqueued, if it has been.
    pub fn enqueued_at(&self) -> Option<BlockHeight> {
        match self {
            Self::Open => None,
            Self::Accepted { enqueued_at }
            | Self::Rejected { enqueued_at }
            | Self::Executed { enqueued_at, .. } => Some(*enqueued_at),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Observable status of a proposal at a given height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Voting is open.
    Active,
    /// Deadline passed, not yet enqueued.
    VotingClosed,
    /// Enqueued and accepted, pending execution.
    Accepted,
    Rejected,
    Executed,
}

/// A governance proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u64,
    pub proposer: Address,
    pub title: String,
    pub calls: Vec<Call>,
    pub created_at: BlockHeight,
    /// Voting closes at this height (exclusive).
    pub deadline: BlockHeight,
    pub stage: ProposalStage,
    /// Voters in the order they voted.
    pub voters: Vec<Address>,
    pub ballots: HashMap<Address, Ballot>,
}

impl Proposal {
    pub fn status_at(&self, now: BlockHeight) -> ProposalStatus {
        match self.stage {
            ProposalStage::Open if now < self.deadline => ProposalStatus::Active,
            ProposalStage::Open => ProposalStatus::VotingClosed,
            ProposalStage::Accepted { .. } => ProposalStatus::Accepted,
            ProposalStage::Rejected { .. } => ProposalStatus::Rejected,
            ProposalStage::Executed { .. } => ProposalStatus::Executed,
        }
    }

    /// Record a vote. Open stage, before the deadline, once per voter.
    pub fn record_vote(
        &mut self,
        voter: Address,
        support: bool,
        now: BlockHeight,
    ) -> Result<(), GovernanceError> {
        if now >= self.deadline || !self.stage.is_open() {
            return Err(GovernanceError::VotingClosed {
                deadline: self.deadline,
                now,
            });
        }
        if self.ballots.contains_key(&voter) {
            return Err(GovernanceError::AlreadyVoted(voter.to_string()));
        }
        self.ballots.insert(
            voter,
            Ballot {
                support,
                cast_at: now,
            },
        );
        self.voters.push(voter);
        Ok(())
    }

    pub fn has_voted(&self, voter: &Address) -> bool {
        self.ballots.contains_key(voter)
    }

    pub fn vote_support(&self, voter: &Address) -> Option<bool> {
        self.ballots.get(voter).map(|b| b.support)
    }

    pub fn targets(&self) -> Vec<Address> {
        self.calls.iter().map(|c| c.target).collect()
    }

    pub fn call_data(&self) -> Vec<Vec<u8>> {
        self.calls.iter().map(|c| c.data.clone()).collect()
    }

    pub fn values(&self) -> Vec<u128> {
        self.calls.iter().map(|c| c.value).collect()
    }
}

/// Zip the three parallel batch sequences, rejecting mismatched lengths.
pub fn zip_calls(
    targets: Vec<Address>,
    data: Vec<Vec<u8>>,
    values: Vec<u128>,
) -> Result<Vec<Call>, GovernanceError> {
    if targets.len() != data.len() || targets.len() != values.len() {
        return Err(GovernanceError::LengthMismatch {
            targets: targets.len(),
            data: data.len(),
            values: values.len(),
        });
    }
    Ok(targets
        .into_iter()
        .zip(data)
        .zip(values)
        .map(|((target, data), value)| Call {
            target,
            value,
            data,
        })
        .collect())
}
