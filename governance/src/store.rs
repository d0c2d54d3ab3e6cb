//! Proposal store: id-keyed proposal records with a monotonic id counter.

use crate::error::GovernanceError;
use crate::proposal::Proposal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProposalStore {
    proposals: BTreeMap<u64, Proposal>,
    /// Next id to hand out. Ids are never reused, even after deletion.
    next_id: u64,
}

impl ProposalStore {
    pub fn new() -> Self {
        Self {
            proposals: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Reserve the next id.
    pub fn next_id(&mut self) -> Result<u64, GovernanceError> {
        let id = self.next_id;
        self.next_id = self.next_id.checked_add(1).ok_or(GovernanceError::Overflow)?;
        Ok(id)
    }

    pub fn insert(&mut self, proposal: Proposal) {
        self.proposals.insert(proposal.id, proposal);
    }

    pub fn get(&self, id: u64) -> Result<&Proposal, GovernanceError> {
        self.proposals
            .get(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))
    }

    pub fn get_mut(&mut self, id: u64) -> Result<&mut Proposal, GovernanceError> {
        self.proposals
            .get_mut(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))
    }

    /// Drop the record, ballots included.
    pub fn remove(&mut self, id: u64) -> Result<Proposal, GovernanceError> {
        self.proposals
            .remove(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))
    }

    /// Number of live (not deleted) proposals.
    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    /// Total ids ever assigned.
    pub fn issued(&self) -> u64 {
        self.next_id - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }
}

impl Default for ProposalStore {
    fn default() -> Self {
        Self::new()
    }
}
