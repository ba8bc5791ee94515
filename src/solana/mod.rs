//! Byte-level Solana support.
//!
//! Everything needed to turn a payment requirement into signed transaction
//! bytes without an RPC-side SDK: Base58 ([`base58`]), the wire encoders
//! ([`encode`]), the device wallet ([`wallet`]), program derived addresses
//! ([`pda`]), the SPL transfer assembler ([`transfer`]), and the thin
//! JSON-RPC surface the payment path needs ([`rpc`]).
//!
//! Every byte position produced here is protocol-visible: the assembled
//! transaction must match Solana's legacy wire format exactly, and a single
//! misplaced account index is an unrecoverable on-chain rejection.

pub mod base58;
pub mod curve;
pub mod encode;
pub mod pda;
pub mod pubkey;
pub mod rpc;
pub mod transfer;
pub mod wallet;

pub use pubkey::{Blockhash, Pubkey, Signature};
pub use wallet::Wallet;

use once_cell::sync::Lazy;

/// The classic SPL token program, `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`.
pub static TOKEN_PROGRAM_ID: Lazy<Pubkey> = Lazy::new(|| {
    "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
        .parse()
        .expect("valid base58 program id")
});

/// The Token-2022 program, `TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb`.
pub static TOKEN_2022_PROGRAM_ID: Lazy<Pubkey> = Lazy::new(|| {
    "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb"
        .parse()
        .expect("valid base58 program id")
});

/// The associated token account program, `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`.
pub static ASSOCIATED_TOKEN_PROGRAM_ID: Lazy<Pubkey> = Lazy::new(|| {
    "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL"
        .parse()
        .expect("valid base58 program id")
});
