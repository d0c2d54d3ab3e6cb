//! Network identifier.

use crate::error::CivitasError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which deployment a genesis configuration targets. Each network starts
/// from its own default governance parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// The production network.
    Live,
    /// The public test network.
    Test,
    /// Local development network.
    #[default]
    Dev,
}

impl NetworkId {
    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Test => "test",
            Self::Dev => "dev",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = CivitasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "live" => Ok(Self::Live),
            "test" => Ok(Self::Test),
            "dev" => Ok(Self::Dev),
            other => Err(CivitasError::Other(format!("unknown network: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_network_names() {
        for net in [NetworkId::Live, NetworkId::Test, NetworkId::Dev] {
            assert_eq!(net.as_str().parse::<NetworkId>().unwrap(), net);
        }
        assert!("mainnet".parse::<NetworkId>().is_err());
    }
}
