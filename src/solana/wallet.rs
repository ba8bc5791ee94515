//! The device wallet: an Ed25519 identity bound to payment transactions.
//!
//! A wallet is created from the standard Solana 64-byte keypair blob (32-byte
//! seed followed by the 32-byte public key). The embedded public key must
//! match the one derived from the seed; a mismatch means the blob is
//! corrupted and construction fails. Key material is zeroized when the wallet
//! is dropped.

use ed25519_dalek::{Signer as _, SigningKey, Verifier as _};
use std::fmt::{self, Debug, Formatter};
use zeroize::Zeroize;

use crate::error::{PayResult, PayerError};

use super::pubkey::{Pubkey, Signature};

/// An Ed25519 signing identity for a payment session.
pub struct Wallet {
    signing_key: SigningKey,
    public: Pubkey,
}

impl Wallet {
    /// Builds a wallet from a 64-byte keypair blob, consuming and scrubbing it.
    ///
    /// Fails with [`PayerError::Crypto`] when the public half embedded in the
    /// blob does not match the key derived from the seed half.
    pub fn from_keypair_bytes(mut bytes: [u8; 64]) -> PayResult<Self> {
        let result = SigningKey::from_keypair_bytes(&bytes)
            .map(|signing_key| {
                let public = Pubkey::new(signing_key.verifying_key().to_bytes());
                Self {
                    signing_key,
                    public,
                }
            })
            .map_err(|e| PayerError::Crypto(format!("keypair blob rejected: {e}")));
        bytes.zeroize();
        result
    }

    /// The wallet's public key.
    pub fn pubkey(&self) -> &Pubkey {
        &self.public
    }

    /// The wallet's Base58 address.
    pub fn address(&self) -> String {
        self.public.to_string()
    }

    /// Produces a detached signature over `message`.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::new(self.signing_key.sign(message).to_bytes())
    }

    /// Checks a detached signature against this wallet's public key.
    ///
    /// Not part of the payment path; the facilitator and the chain do the
    /// verifying there.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
        self.signing_key
            .verifying_key()
            .verify(message, &sig)
            .is_ok()
    }
}

impl Debug for Wallet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
