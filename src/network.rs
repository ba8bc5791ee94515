//! Network tags for Solana-family x402 payments.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Supported Solana networks.
///
/// The tag travels verbatim in challenge bodies, payment envelopes, and
/// facilitator capability listings.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Network {
    /// Solana devnet.
    #[serde(rename = "solana-devnet")]
    SolanaDevnet,
    /// Solana mainnet.
    #[serde(rename = "solana-mainnet")]
    SolanaMainnet,
}

impl Network {
    /// The wire tag for this network.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::SolanaDevnet => "solana-devnet",
            Network::SolanaMainnet => "solana-mainnet",
        }
    }

    /// All known [`Network`] variants.
    pub fn variants() -> &'static [Network] {
        &[Network::SolanaDevnet, Network::SolanaMainnet]
    }
}

/// The network assumed when a challenge omits the field.
impl Default for Network {
    fn default() -> Self {
        Network::SolanaDevnet
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
