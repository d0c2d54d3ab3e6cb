use proptest::prelude::*;

use civitas_governance::{
    GenesisAllocation, GenesisConfig, GovernanceEngine, GovernanceError, ProposalStatus, Tally,
};
use civitas_types::{Address, BlockHeight, GovernanceParams, NetworkId};

const GOV: Address = Address::from_low_u8(0xee);

fn engine(holders: &[u128], quorum_bps: u32) -> GovernanceEngine {
    let config = GenesisConfig {
        network: NetworkId::Dev,
        identity: GOV,
        name: "Civitas".into(),
        symbol: "CIV".into(),
        params: Some(GovernanceParams {
            min_voting_duration: 10,
            execution_delay: 10,
            quorum_bps,
            transfer_fee_bps: 0,
        }),
        treasury_balance: 0,
        allocations: holders
            .iter()
            .enumerate()
            .map(|(i, amount)| GenesisAllocation {
                address: Address::from_low_u8(i as u8 + 1),
                amount: *amount,
            })
            .collect(),
    };
    GovernanceEngine::from_genesis(&config).unwrap()
}

proptest! {
    /// Acceptance is exactly: participation meets quorum and for strictly beats against.
    #[test]
    fn decision_matches_quorum_and_majority(
        balances in prop::collection::vec(1u128..1_000_000, 2..12),
        votes in prop::collection::vec(prop::option::of(any::<bool>()), 12),
        quorum_bps in 100u32..=10_000,
    ) {
        let mut e = engine(&balances, quorum_bps);
        let proposer = Address::from_low_u8(1);
        let id = e
            .create_proposal(proposer, "p", vec![], vec![], vec![], 10, BlockHeight::new(1))
            .unwrap();

        let mut expected = Tally::default();
        for (i, amount) in balances.iter().enumerate() {
            if let Some(support) = votes[i] {
                e.vote(Address::from_low_u8(i as u8 + 1), id, support, BlockHeight::new(2)).unwrap();
                if support {
                    expected.for_votes += amount;
                } else {
                    expected.against_votes += amount;
                }
            }
        }

        let deadline = BlockHeight::new(11);
        prop_assert_eq!(e.tally(id, deadline).unwrap(), expected);

        let supply: u128 = balances.iter().sum();
        let threshold = supply * quorum_bps as u128 / 10_000;
        let accepted = expected.for_votes + expected.against_votes >= threshold
            && expected.for_votes > expected.against_votes;
        let status = e.enqueue_proposal(id, deadline).unwrap();
        prop_assert_eq!(status == ProposalStatus::Accepted, accepted);
    }

    /// Any mismatch between the three batch sequences is refused.
    #[test]
    fn mismatched_lengths_always_fail(t in 0usize..5, d in 0usize..5, v in 0usize..5) {
        prop_assume!(!(t == d && d == v));
        let mut e = engine(&[100], 400);
        let result = e.create_proposal(
            Address::from_low_u8(1),
            "p",
            vec![Address::from_low_u8(9); t],
            vec![Vec::new(); d],
            vec![0; v],
            10,
            BlockHeight::new(1),
        );
        let is_mismatch = matches!(result, Err(GovernanceError::LengthMismatch { .. }));
        prop_assert!(is_mismatch);
        prop_assert_eq!(e.proposal_count(), 0);
    }

    /// Execution is never possible before the timelock expires.
    #[test]
    fn timelock_is_respected(wait in 0u64..30) {
        let mut e = engine(&[100], 400);
        let proposer = Address::from_low_u8(1);
        let id = e
            .create_proposal(proposer, "p", vec![], vec![], vec![], 10, BlockHeight::new(1))
            .unwrap();
        e.vote(proposer, id, true, BlockHeight::new(2)).unwrap();
        e.enqueue_proposal(id, BlockHeight::new(11)).unwrap();

        let result = e.execute_proposal(id, BlockHeight::new(11 + wait));
        prop_assert_eq!(result.is_ok(), wait >= 10);
    }
}
