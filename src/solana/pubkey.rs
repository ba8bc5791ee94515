//! Core Solana value types: public keys, signatures, and blockhashes.
//!
//! All three are opaque fixed-size byte values. Their textual form is Base58
//! everywhere (JSON bodies, headers, logs); their binary form is what gets
//! written into transaction bytes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use super::base58::{self, Base58Error};

/// A 32-byte Solana public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pubkey([u8; 32]);

impl Pubkey {
    /// Byte length of a public key.
    pub const LEN: usize = 32;

    /// Wraps raw key bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for Pubkey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Pubkey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", base58::encode(&self.0))
    }
}

impl Debug for Pubkey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({self})")
    }
}

impl FromStr for Pubkey {
    type Err = Base58Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        base58::decode_array::<32>(s).map(Self)
    }
}

impl Serialize for Pubkey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Pubkey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A 64-byte Ed25519 transaction signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; 64]);

impl Signature {
    /// Byte length of a signature.
    pub const LEN: usize = 64;

    /// Wraps raw signature bytes.
    pub const fn new(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Returns the raw signature bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", base58::encode(&self.0))
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({self})")
    }
}

impl FromStr for Signature {
    type Err = Base58Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        base58::decode_array::<64>(s).map(Self)
    }
}

/// A 32-byte recent blockhash anchoring a transaction's freshness window.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Blockhash([u8; 32]);

impl Blockhash {
    /// Wraps raw blockhash bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw blockhash bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Display for Blockhash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", base58::encode(&self.0))
    }
}

impl Debug for Blockhash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Blockhash({self})")
    }
}

impl FromStr for Blockhash {
    type Err = Base58Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        base58::decode_array::<32>(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINT: &str = "4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU";

    #[test]
    fn pubkey_base58_round_trip() {
        let key: Pubkey = MINT.parse().unwrap();
        assert_eq!(key.to_string(), MINT);
        assert_eq!(key.as_bytes().len(), Pubkey::LEN);
    }

    #[test]
    fn pubkey_serde_uses_base58_strings() {
        let key: Pubkey = MINT.parse().unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{MINT}\""));
        let back: Pubkey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn pubkey_rejects_wrong_length() {
        assert!("abc".parse::<Pubkey>().is_err());
        // A 64-byte value in base58 is not a pubkey.
        let sig_b58 = base58::encode(&[7u8; 64]);
        assert!(sig_b58.parse::<Pubkey>().is_err());
    }

    #[test]
    fn signature_round_trip() {
        let sig = Signature::new([0xab; 64]);
        let parsed: Signature = sig.to_string().parse().unwrap();
        assert_eq!(parsed, sig);
    }

    #[test]
    fn blockhash_round_trip() {
        let hash = Blockhash::new([0x11; 32]);
        let parsed: Blockhash = hash.to_string().parse().unwrap();
        assert_eq!(parsed.as_bytes(), hash.as_bytes());
    }
}
