//! Token-weighted on-chain governance for the Civitas ledger.
//!
//! Lifecycle: Open → (deadline) → Accepted | Rejected → (timelock) → Executed.
//! Any holder may propose a batch of calls; holders vote for or against,
//! weighted by their live balance. An accepted batch runs atomically after
//! the timelock, and is the only way to reach privileged functions
//! (parameters, minting, treasury, airdrops).

pub mod airdrop;
pub mod engine;
pub mod error;
pub mod event;
pub mod executor;
pub mod genesis;
pub mod guard;
pub mod params;
pub mod privileged;
pub mod proposal;
pub mod store;
pub mod voting;

pub use airdrop::{AirdropBook, Owed};
pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use event::{AirdropKind, GovernanceEvent};
pub use executor::{CallContext, CallRevert, CallTarget, TargetRegistry};
pub use genesis::{initial_params, GenesisAllocation, GenesisConfig};
pub use guard::ReentrancyGuard;
pub use params::GovernableParam;
pub use privileged::{Authority, GovernanceCall, MintingFn, MINT_CAP_BPS};
pub use proposal::{Ballot, Call, Proposal, ProposalStage, ProposalStatus, Transition};
pub use store::ProposalStore;
pub use voting::{Tally, VotingEngine};
