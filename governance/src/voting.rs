//! Balance-weighted, live vote tallying.
//!
//! Weights are read from the ledger when the tally is computed, not when the
//! vote is cast. A voter whose balance changes between casting and enqueue
//! counts with the new balance. There is no snapshot and no delegation.
//!
//! Tallying walks the full voter list every time: O(voters) per call.

use crate::proposal::Proposal;
use civitas_ledger::TokenLedger;
use civitas_types::{Address, BlockHeight, GovernanceParams};
use serde::{Deserialize, Serialize};

/// Live for/against sums for a proposal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub for_votes: u128,
    pub against_votes: u128,
}

impl Tally {
    /// Combined participation. Bounded by total supply.
    pub fn total(&self) -> u128 {
        self.for_votes.wrapping_add(self.against_votes)
    }

    /// Quorum met and strict majority in favour.
    pub fn is_accepted(&self, quorum_threshold: u128) -> bool {
        self.total() >= quorum_threshold && self.for_votes > self.against_votes
    }
}

/// Computes voting power and tallies.
pub struct VotingEngine;

impl VotingEngine {
    /// Current balance, or zero if the account received tokens at `now`.
    pub fn voting_power(&self, ledger: &TokenLedger, account: &Address, now: BlockHeight) -> u128 {
        if ledger.acquired_at(account) == Some(now) {
            return 0;
        }
        ledger.balance_of(account)
    }

    /// Recompute the tally from scratch over every recorded voter.
    pub fn tally(&self, proposal: &Proposal, ledger: &TokenLedger, now: BlockHeight) -> Tally {
        let mut tally = Tally::default();
        for voter in &proposal.voters {
            let power = self.voting_power(ledger, voter, now);
            match proposal.vote_support(voter) {
                Some(true) => tally.for_votes = tally.for_votes.wrapping_add(power),
                Some(false) => tally.against_votes = tally.against_votes.wrapping_add(power),
                None => {}
            }
        }
        tally
    }

    /// Decide acceptance against the quorum measured on current supply.
    pub fn decide(
        &self,
        tally: &Tally,
        ledger: &TokenLedger,
        params: &GovernanceParams,
    ) -> bool {
        tally.is_accepted(params.quorum_threshold(ledger.total_supply()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::ProposalStage;
    use civitas_types::TokenMetadata;
    use std::collections::HashMap;

    fn addr(tag: u8) -> Address {
        Address::from_low_u8(tag)
    }

    fn setup(balances: &[(u8, u128)]) -> TokenLedger {
        let mut ledger = TokenLedger::new(addr(0xee), TokenMetadata::new("Civitas", "CIV").unwrap());
        for (tag, amount) in balances {
            ledger.mint(&addr(*tag), *amount, BlockHeight::new(1)).unwrap();
        }
        ledger
    }

    fn proposal_with_votes(votes: &[(u8, bool)]) -> Proposal {
        let mut p = Proposal {
            id: 1,
            proposer: addr(1),
            title: "t".into(),
            calls: vec![],
            created_at: BlockHeight::new(1),
            deadline: BlockHeight::new(100),
            stage: ProposalStage::Open,
            voters: vec![],
            ballots: HashMap::new(),
        };
        for (tag, support) in votes {
            p.record_vote(addr(*tag), *support, BlockHeight::new(2)).unwrap();
        }
        p
    }

    fn params(quorum_bps: u32) -> GovernanceParams {
        GovernanceParams {
            quorum_bps,
            ..GovernanceParams::default()
        }
    }

    #[test]
    fn test_quorum_missed_despite_majority() {
        // supply 1000, quorum 4% -> threshold 40; 25 + 10 = 35 < 40.
        let ledger = setup(&[(1, 25), (2, 10), (3, 965)]);
        let p = proposal_with_votes(&[(1, true), (2, false)]);
        let engine = VotingEngine;
        let tally = engine.tally(&p, &ledger, BlockHeight::new(200));
        assert_eq!(tally, Tally { for_votes: 25, against_votes: 10 });
        assert!(!engine.decide(&tally, &ledger, &params(400)));
    }

    #[test]
    fn test_tie_is_rejected() {
        let ledger = setup(&[(1, 30), (2, 30), (3, 940)]);
        let p = proposal_with_votes(&[(1, true), (2, false)]);
        let engine = VotingEngine;
        let tally = engine.tally(&p, &ledger, BlockHeight::new(200));
        assert_eq!(tally.total(), 60);
        assert!(!engine.decide(&tally, &ledger, &params(400)));
    }

    #[test]
    fn test_quorum_and_majority_accept() {
        let ledger = setup(&[(1, 31), (2, 30), (3, 939)]);
        let p = proposal_with_votes(&[(1, true), (2, false)]);
        let engine = VotingEngine;
        let tally = engine.tally(&p, &ledger, BlockHeight::new(200));
        assert!(engine.decide(&tally, &ledger, &params(400)));
    }

    #[test]
    fn test_same_tick_acquisition_has_no_power() {
        let mut ledger = setup(&[(1, 100)]);
        ledger.mint(&addr(2), 500, BlockHeight::new(50)).unwrap();
        let engine = VotingEngine;
        assert_eq!(engine.voting_power(&ledger, &addr(2), BlockHeight::new(50)), 0);
        assert_eq!(engine.voting_power(&ledger, &addr(2), BlockHeight::new(51)), 500);
        assert_eq!(engine.voting_power(&ledger, &addr(1), BlockHeight::new(50)), 100);
    }

    #[test]
    fn test_tally_reads_live_balances() {
        let mut ledger = setup(&[(1, 100), (2, 100)]);
        let p = proposal_with_votes(&[(1, true), (2, false)]);
        let engine = VotingEngine;
        assert_eq!(
            engine.tally(&p, &ledger, BlockHeight::new(10)),
            Tally { for_votes: 100, against_votes: 100 }
        );
        // Voter 2 moves its tokens to voter 1 after voting.
        ledger
            .transfer(&addr(2), &addr(1), 100, 0, BlockHeight::new(11))
            .unwrap();
        assert_eq!(
            engine.tally(&p, &ledger, BlockHeight::new(12)),
            Tally { for_votes: 200, against_votes: 0 }
        );
    }

    #[test]
    fn test_no_voters_never_accepted() {
        let ledger = setup(&[(1, 1_000)]);
        let p = proposal_with_votes(&[]);
        let engine = VotingEngine;
        let tally = engine.tally(&p, &ledger, BlockHeight::new(200));
        assert!(!engine.decide(&tally, &ledger, &params(100)));
    }
}
