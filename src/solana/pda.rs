//! Program derived address search and associated token account derivation.
//!
//! A PDA is the first SHA-256 of `seeds || bump || program_id ||
//! "ProgramDerivedAddress"` that is *not* an Ed25519 curve point, searching
//! bump values from 255 downward. Accepting an on-curve hash would yield an
//! address some keypair could sign for, so the curve test is a correctness
//! requirement, not an optimization.

use sha2::{Digest, Sha256};

use crate::error::{PayResult, PayerError};

use super::curve::is_on_curve;
use super::pubkey::Pubkey;
use super::ASSOCIATED_TOKEN_PROGRAM_ID;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Finds the program derived address for `seeds` under `program_id`.
///
/// Returns the address together with the bump seed that produced it. Fails
/// only if all 256 bump values hash onto the curve, which is vanishingly
/// improbable and indicates corrupted inputs.
pub fn find_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> PayResult<(Pubkey, u8)> {
    for bump in (0u8..=255).rev() {
        let mut hasher = Sha256::new();
        for seed in seeds {
            hasher.update(seed);
        }
        hasher.update([bump]);
        hasher.update(program_id.as_bytes());
        hasher.update(PDA_MARKER);
        let hash: [u8; 32] = hasher.finalize().into();

        if !is_on_curve(&hash) {
            return Ok((Pubkey::new(hash), bump));
        }
    }
    Err(PayerError::Crypto(format!(
        "no off-curve bump found deriving a PDA of {program_id}"
    )))
}

/// Derives the associated token account of `wallet` for `mint` under
/// `token_program`.
///
/// The seed order is `[wallet, token_program, mint]`. The token program must
/// be the one that actually owns the mint (classic vs Token-2022): using the
/// wrong one derives a different, empty address.
pub fn derive_associated_token_address(
    wallet: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> PayResult<Pubkey> {
    let seeds: [&[u8]; 3] = [
        wallet.as_bytes(),
        token_program.as_bytes(),
        mint.as_bytes(),
    ];
    let (ata, _bump) = find_program_address(&seeds, &ASSOCIATED_TOKEN_PROGRAM_ID)?;
    Ok(ata)
}
