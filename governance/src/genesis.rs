//! Genesis configuration: the token, the governance identity, the starting
//! parameters and the initial distribution.
//!
//! Loaded from TOML. Parameters default per network and may be overridden;
//! either way they must sit inside their safety bands.

use crate::engine::GovernanceEngine;
use crate::error::GovernanceError;
use civitas_types::{Address, GovernanceParams, NetworkId, TokenMetadata};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenesisConfig {
    #[serde(default)]
    pub network: NetworkId,
    /// Governance identity; also the treasury.
    pub identity: Address,
    pub name: String,
    pub symbol: String,
    /// Overrides the network's initial parameters when present.
    #[serde(default)]
    pub params: Option<GovernanceParams>,
    /// Tokens minted to the treasury at genesis.
    #[serde(default)]
    pub treasury_balance: u128,
    #[serde(default)]
    pub allocations: Vec<GenesisAllocation>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAllocation {
    pub address: Address,
    pub amount: u128,
}

/// Initial governance parameters for a network.
///
/// Dev and test networks use the band floors so that a full proposal
/// lifecycle fits in a few dozen heights.
pub fn initial_params(network: NetworkId) -> GovernanceParams {
    match network {
        NetworkId::Live => GovernanceParams::civitas_defaults(),
        NetworkId::Test => GovernanceParams {
            min_voting_duration: 100,
            execution_delay: 100,
            ..GovernanceParams::civitas_defaults()
        },
        NetworkId::Dev => GovernanceParams {
            min_voting_duration: 10,
            execution_delay: 10,
            ..GovernanceParams::civitas_defaults()
        },
    }
}

impl GenesisConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, GovernanceError> {
        toml::from_str(source).map_err(|e| GovernanceError::InvalidGenesis(e.to_string()))
    }

    /// Parameters the engine will start with.
    pub fn effective_params(&self) -> GovernanceParams {
        self.params
            .clone()
            .unwrap_or_else(|| initial_params(self.network))
    }

    pub fn metadata(&self) -> Result<TokenMetadata, GovernanceError> {
        Ok(TokenMetadata::new(&self.name, &self.symbol)?)
    }

    /// Total supply the engine will start with.
    pub fn total_supply(&self) -> Result<u128, GovernanceError> {
        self.allocations
            .iter()
            .try_fold(self.treasury_balance, |acc, a| acc.checked_add(a.amount))
            .ok_or(GovernanceError::Overflow)
    }

    pub fn validate(&self) -> Result<(), GovernanceError> {
        if self.identity.is_zero() {
            return Err(GovernanceError::InvalidGenesis(
                "identity must not be the zero address".into(),
            ));
        }
        self.metadata()?;
        self.effective_params().check_bounds()?;
        self.total_supply()?;

        let mut seen = HashSet::new();
        for allocation in &self.allocations {
            if allocation.address.is_zero() {
                return Err(GovernanceError::InvalidGenesis(
                    "allocation to the zero address".into(),
                ));
            }
            if allocation.address == self.identity {
                return Err(GovernanceError::InvalidGenesis(
                    "use treasury_balance to fund the treasury".into(),
                ));
            }
            if !seen.insert(allocation.address) {
                return Err(GovernanceError::InvalidGenesis(format!(
                    "duplicate allocation for {}",
                    allocation.address
                )));
            }
        }
        Ok(())
    }
}

impl GovernanceEngine {
    /// Build an engine at height zero from a validated genesis.
    pub fn from_genesis(config: &GenesisConfig) -> Result<Self, GovernanceError> {
        config.validate()?;
        let mut engine = GovernanceEngine::new(
            config.identity,
            config.metadata()?,
            config.effective_params(),
        )?;
        if config.treasury_balance > 0 {
            engine.genesis_mint(&config.identity, config.treasury_balance)?;
        }
        for allocation in &config.allocations {
            if allocation.amount > 0 {
                engine.genesis_mint(&allocation.address, allocation.amount)?;
            }
        }
        info!(
            network = %config.network,
            identity = %config.identity,
            supply = engine.ledger().total_supply(),
            holders = engine.ledger().holder_count(),
            "genesis applied"
        );
        Ok(engine)
    }
}
