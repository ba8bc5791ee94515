//! Assembly of the legacy Solana transaction carrying one SPL `Transfer`.
//!
//! The transaction is co-signed: the facilitator pays fees and signs slot 0
//! during settlement, the device authorizes the token movement and signs
//! slot 1 before transmission. The builder emits both slots zeroed; the
//! caller signs the message range and writes the device signature in place.
//!
//! Wire layout, in order:
//!
//! ```text
//! [shortvec signature count = 2]
//! [64-byte slot 0: fee payer, left zero]
//! [64-byte slot 1: device payer]
//! [message header: 3 bytes]
//! [shortvec account count = 5][5 x 32-byte accounts]
//! [32-byte recent blockhash]
//! [shortvec instruction count = 1]
//! [program index][shortvec account-index count][account indices]
//! [shortvec data length][instruction data]
//! ```

use crate::error::PayResult;

use super::encode::TxWriter;
use super::pda;
use super::pubkey::{Blockhash, Pubkey, Signature};

/// SPL token `Transfer` instruction opcode.
const TRANSFER_OPCODE: u8 = 3;

/// Inputs to the transfer assembler.
///
/// `amount` is in the token's smallest denomination; the builder performs no
/// decimal conversion.
#[derive(Debug, Clone)]
pub struct TransferParams {
    /// Facilitator account that pays fees and co-signs slot 0.
    pub fee_payer: Pubkey,
    /// Device wallet that owns the source token account and signs slot 1.
    pub payer: Pubkey,
    /// Merchant wallet receiving the tokens.
    pub recipient: Pubkey,
    /// The token mint being transferred.
    pub mint: Pubkey,
    /// The program that owns the mint (classic or Token-2022).
    pub token_program: Pubkey,
    /// Base units of the token to transfer.
    pub amount: u64,
    /// Recent blockhash anchoring the transaction's validity window.
    pub recent_blockhash: Blockhash,
}

/// A complete serialized transaction with addressable signature slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionBuffer {
    bytes: Vec<u8>,
}

impl TransactionBuffer {
    /// Offset of the fee payer's signature slot.
    pub const FEE_PAYER_SLOT: usize = 1;
    /// Offset of the device payer's signature slot.
    pub const PAYER_SLOT: usize = Self::FEE_PAYER_SLOT + Signature::LEN;
    /// Offset where the signable message begins.
    pub const MESSAGE_OFFSET: usize = Self::PAYER_SLOT + Signature::LEN;

    /// The full transaction bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the buffer, returning the transaction bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The byte range the device must sign: everything after the signature
    /// slots, from the message header to the final instruction byte.
    pub fn message(&self) -> &[u8] {
        &self.bytes[Self::MESSAGE_OFFSET..]
    }

    /// Writes the device's signature into slot 1. Slot 0 stays zeroed for
    /// the facilitator.
    pub fn write_payer_signature(&mut self, signature: &Signature) {
        self.bytes[Self::PAYER_SLOT..Self::MESSAGE_OFFSET]
            .copy_from_slice(signature.as_bytes());
    }
}

/// Builds the unsigned transfer transaction.
///
/// Derives the source and destination associated token accounts from the
/// payer and recipient wallets, then lays the transaction out with the
/// account table `[fee_payer, payer, source_ata, dest_ata, token_program]`
/// and message header `{2, 1, 1}`: both the fee payer and the payer sign,
/// the payer is read-only (it authorizes token movement, its own lamports
/// are untouched), and the token program is the read-only non-signer.
pub fn build_transfer_transaction(params: &TransferParams) -> PayResult<TransactionBuffer> {
    let source_ata =
        pda::derive_associated_token_address(&params.payer, &params.mint, &params.token_program)?;
    let dest_ata = pda::derive_associated_token_address(
        &params.recipient,
        &params.mint,
        &params.token_program,
    )?;

    let mut w = TxWriter::for_transaction();

    w.put_shortvec_len(2)?;
    w.put_bytes(&[0u8; Signature::LEN])?;
    w.put_bytes(&[0u8; Signature::LEN])?;

    // Message header: num_required_signatures, num_readonly_signed,
    // num_readonly_unsigned.
    w.put_u8(2)?;
    w.put_u8(1)?;
    w.put_u8(1)?;

    w.put_shortvec_len(5)?;
    w.put_bytes(params.fee_payer.as_bytes())?;
    w.put_bytes(params.payer.as_bytes())?;
    w.put_bytes(source_ata.as_bytes())?;
    w.put_bytes(dest_ata.as_bytes())?;
    w.put_bytes(params.token_program.as_bytes())?;

    w.put_bytes(params.recent_blockhash.as_bytes())?;

    w.put_shortvec_len(1)?;
    w.put_u8(4)?; // program index: token_program
    w.put_shortvec_len(3)?;
    w.put_bytes(&[2, 3, 1])?; // source_ata, dest_ata, payer (owner)
    w.put_shortvec_len(1 + 8)?;
    w.put_u8(TRANSFER_OPCODE)?;
    w.put_u64_le(params.amount)?;

    Ok(TransactionBuffer {
        bytes: w.into_bytes(),
    })
}
