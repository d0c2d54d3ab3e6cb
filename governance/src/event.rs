//! Events emitted by governance state transitions.
//!
//! Events are appended to the engine's log as part of the same atomic
//! operation that produced them; a failed operation leaves no events.

use crate::params::GovernableParam;
use civitas_types::{Address, BlockHeight};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AirdropKind {
    /// Fulfilled by minting on claim.
    Mint,
    /// Fulfilled from the reserved treasury balance on claim.
    Treasury,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceEvent {
    ProposalCreated {
        id: u64,
        proposer: Address,
        title: String,
        targets: Vec<Address>,
        call_data: Vec<Vec<u8>>,
        values: Vec<u128>,
        deadline: BlockHeight,
    },
    VoteCast {
        id: u64,
        voter: Address,
        support: bool,
    },
    ProposalEnqueued {
        id: u64,
        enqueued_at: BlockHeight,
        for_votes: u128,
        against_votes: u128,
    },
    ProposalRejected {
        id: u64,
        for_votes: u128,
        against_votes: u128,
    },
    ProposalExecuted {
        id: u64,
        executed_at: BlockHeight,
    },
    ProposalDeleted {
        id: u64,
    },
    ParamUpdated {
        param: GovernableParam,
        old: u64,
        new: u64,
    },
    TokenMetadataUpdated {
        name: String,
        symbol: String,
    },
    Minted {
        to: Address,
        amount: u128,
    },
    TreasuryTransfer {
        to: Address,
        amount: u128,
    },
    TreasuryBurn {
        amount: u128,
    },
    AirdropAllocated {
        kind: AirdropKind,
        recipients: usize,
        total: u128,
    },
    AirdropClaimed {
        claimant: Address,
        minted: u128,
        transferred: u128,
    },
}
