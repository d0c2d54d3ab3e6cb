use civitas_ledger::LedgerError;
use civitas_types::{BlockHeight, CivitasError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("proposal {0} not found")]
    ProposalNotFound(u64),

    #[error("{0} holds no tokens and cannot propose")]
    NotATokenHolder(String),

    #[error("batch length mismatch: {targets} targets, {data} payloads, {values} values")]
    LengthMismatch {
        targets: usize,
        data: usize,
        values: usize,
    },

    #[error("title is {len} characters, maximum is {max}")]
    TitleTooLong { len: usize, max: usize },

    #[error("voting duration {requested} is below the minimum of {min} ticks")]
    DurationTooShort { requested: u64, min: u64 },

    #[error("voting closed at {deadline} (now {now})")]
    VotingClosed { deadline: BlockHeight, now: BlockHeight },

    #[error("voting is still open until {deadline} (now {now})")]
    VotingStillOpen { deadline: BlockHeight, now: BlockHeight },

    #[error("{0} has already voted on this proposal")]
    AlreadyVoted(String),

    #[error("cannot {action} a proposal that is {stage}")]
    IllegalTransition {
        stage: &'static str,
        action: &'static str,
    },

    #[error("timelock active: executable at {ready_at} (now {now})")]
    TimelockActive { ready_at: BlockHeight, now: BlockHeight },

    #[error("only the proposer or governance can delete a proposal")]
    NotProposer,

    #[error("{0} is not the governance identity")]
    Unauthorized(String),

    #[error("{0}")]
    Params(#[from] CivitasError),

    #[error("mint of {requested} exceeds the per-call cap of {cap}")]
    MintCapExceeded { requested: u128, cap: u128 },

    #[error("{function} already ran at height {height}")]
    SameTickRepeat {
        function: &'static str,
        height: BlockHeight,
    },

    #[error("treasury has {unlocked} unlocked, {requested} requested")]
    TreasuryInsufficient { requested: u128, unlocked: u128 },

    #[error("nothing to claim for {0}")]
    NothingToClaim(String),

    #[error("reentrant call rejected")]
    Reentrancy,

    #[error("clock went backwards: last seen {last}, got {now}")]
    ClockRegression { last: BlockHeight, now: BlockHeight },

    #[error("call {index} reverted: {}", String::from_utf8_lossy(reason))]
    CallReverted { index: usize, reason: Vec<u8> },

    #[error("call {index} failed: {cause}")]
    CallFailed { index: usize, cause: String },

    #[error("undecodable governance call: {0}")]
    Undecodable(String),

    #[error("governance call could not be encoded: {0}")]
    Unencodable(String),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("arithmetic overflow in governance accounting")]
    Overflow,

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),
}
