//! Governable numeric parameters.
//!
//! Each parameter carries its own safety band (see `civitas_types::params`).
//! A proposal can move a value anywhere inside the band, never outside it.

use civitas_types::params::{
    check_execution_delay, check_min_voting_duration, check_quorum_bps, check_transfer_fee_bps,
};
use civitas_types::{CivitasError, GovernanceParams};
use serde::{Deserialize, Serialize};

/// Parameters a proposal can change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GovernableParam {
    MinVotingDuration,
    ExecutionDelay,
    QuorumBps,
    TransferFeeBps,
}

impl GovernableParam {
    /// Human-readable name of this parameter.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MinVotingDuration => "min_voting_duration",
            Self::ExecutionDelay => "execution_delay",
            Self::QuorumBps => "quorum_bps",
            Self::TransferFeeBps => "transfer_fee_bps",
        }
    }

    /// Current value of this parameter.
    pub fn read(&self, params: &GovernanceParams) -> u64 {
        match self {
            Self::MinVotingDuration => params.min_voting_duration,
            Self::ExecutionDelay => params.execution_delay,
            Self::QuorumBps => params.quorum_bps as u64,
            Self::TransferFeeBps => params.transfer_fee_bps as u64,
        }
    }

    /// Write `value` after checking the band. Returns the previous value.
    pub fn apply(&self, params: &mut GovernanceParams, value: u64) -> Result<u64, CivitasError> {
        let old = self.read(params);
        match self {
            Self::MinVotingDuration => {
                check_min_voting_duration(value)?;
                params.min_voting_duration = value;
            }
            Self::ExecutionDelay => {
                check_execution_delay(value)?;
                params.execution_delay = value;
            }
            Self::QuorumBps => {
                let bps = narrow_bps(self, value)?;
                check_quorum_bps(bps)?;
                params.quorum_bps = bps;
            }
            Self::TransferFeeBps => {
                let bps = narrow_bps(self, value)?;
                check_transfer_fee_bps(bps)?;
                params.transfer_fee_bps = bps;
            }
        }
        Ok(old)
    }
}

fn narrow_bps(param: &GovernableParam, value: u64) -> Result<u32, CivitasError> {
    u32::try_from(value).map_err(|_| CivitasError::ParamOutOfBounds {
        param: param.name(),
        value: value as u128,
        min: 0,
        max: u32::MAX as u128,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_inside_band() {
        let mut params = GovernanceParams::default();
        let old = GovernableParam::QuorumBps.apply(&mut params, 1_500).unwrap();
        assert_eq!(old, 400);
        assert_eq!(params.quorum_bps, 1_500);
    }

    #[test]
    fn test_apply_outside_band_leaves_params() {
        let mut params = GovernanceParams::default();
        let before = params.clone();
        assert!(GovernableParam::TransferFeeBps.apply(&mut params, 1_001).is_err());
        assert!(GovernableParam::QuorumBps.apply(&mut params, 99).is_err());
        assert!(GovernableParam::QuorumBps.apply(&mut params, u64::MAX).is_err());
        assert!(GovernableParam::MinVotingDuration.apply(&mut params, 9).is_err());
        assert!(GovernableParam::ExecutionDelay.apply(&mut params, 0).is_err());
        assert_eq!(params, before);
    }
}
