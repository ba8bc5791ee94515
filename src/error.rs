//! Errors surfaced while making a paid request.
//!
//! The driver recovers from nothing locally: every failure is handed to the
//! caller as one of these kinds together with a free-text context string.

use crate::solana::Pubkey;

/// Result alias used throughout the crate.
pub type PayResult<T> = Result<T, PayerError>;

/// Errors that can occur while constructing or settling an x402 payment.
#[derive(Debug, thiserror::Error)]
pub enum PayerError {
    /// The HTTP or JSON-RPC collaborator failed to complete an exchange.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The 402 challenge body was not JSON or was missing required fields.
    #[error("cannot parse 402 challenge: {0}")]
    ChallengeParse(String),

    /// The facilitator's `/supported` listing had no usable entry for the
    /// required network, or the probe itself could not be completed.
    #[error("facilitator unsupported: {0}")]
    FacilitatorUnsupported(String),

    /// The mint is owned by neither the classic SPL token program nor the
    /// Token-2022 program.
    #[error("mint {mint} is owned by {owner}, which is not a known token program")]
    MintUnsupported {
        /// The mint the challenge named.
        mint: Pubkey,
        /// The program that actually owns it.
        owner: Pubkey,
    },

    /// A serialization step ran out of room in the transaction buffer.
    #[error("transaction buffer overflow: need {needed} bytes, limit is {limit}")]
    BuildOverflow {
        /// Bytes the write would have required in total.
        needed: usize,
        /// Hard size limit of the buffer.
        limit: usize,
    },

    /// `maxAmountRequired` did not parse as a non-zero unsigned 64-bit value.
    #[error("invalid payment amount: {0}")]
    AmountInvalid(String),

    /// Signing or the curve test failed, which indicates corrupted key
    /// material or seeds.
    #[error("cryptographic failure: {0}")]
    Crypto(String),

    /// The retried request came back 402 again; the payment was not accepted.
    #[error("payment rejected: retry returned HTTP {status}")]
    PaymentRejected {
        /// Status code of the paid retry.
        status: u16,
    },

    /// The settlement header was present but could not be decoded.
    #[error("cannot decode settlement receipt: {0}")]
    ReceiptDecode(String),
}
