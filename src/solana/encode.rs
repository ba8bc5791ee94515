//! Wire encoders for Solana's legacy transaction format.
//!
//! Everything that lands in transaction bytes goes through [`TxWriter`], a
//! cursor-owning writer with a single bounds check. Length prefixes use
//! Solana's compact-u16 ("shortvec") encoding: seven value bits per byte,
//! high bit set on continuation bytes, at most three bytes for a u16.

use crate::error::{PayResult, PayerError};

/// Solana's maximum serialized transaction size in bytes.
pub const PACKET_DATA_SIZE: usize = 1232;

/// Bounds-checked byte writer for transaction assembly.
///
/// The writer owns the cursor; callers append fields in wire order and never
/// touch offsets directly. Exceeding `limit` at any step yields
/// [`PayerError::BuildOverflow`].
#[derive(Debug)]
pub struct TxWriter {
    buf: Vec<u8>,
    limit: usize,
}

impl TxWriter {
    /// Creates a writer bounded by `limit` bytes.
    pub fn new(limit: usize) -> Self {
        Self {
            buf: Vec::with_capacity(limit.min(PACKET_DATA_SIZE)),
            limit,
        }
    }

    /// Creates a writer bounded by [`PACKET_DATA_SIZE`].
    pub fn for_transaction() -> Self {
        Self::new(PACKET_DATA_SIZE)
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn ensure(&self, additional: usize) -> PayResult<()> {
        let needed = self.buf.len() + additional;
        if needed > self.limit {
            return Err(PayerError::BuildOverflow {
                needed,
                limit: self.limit,
            });
        }
        Ok(())
    }

    /// Appends a single byte.
    pub fn put_u8(&mut self, byte: u8) -> PayResult<()> {
        self.ensure(1)?;
        self.buf.push(byte);
        Ok(())
    }

    /// Appends a 32-bit little-endian integer.
    pub fn put_u32_le(&mut self, value: u32) -> PayResult<()> {
        self.put_bytes(&value.to_le_bytes())
    }

    /// Appends a 64-bit little-endian integer.
    pub fn put_u64_le(&mut self, value: u64) -> PayResult<()> {
        self.put_bytes(&value.to_le_bytes())
    }

    /// Appends a compact-u16 length prefix.
    pub fn put_shortvec_len(&mut self, value: usize) -> PayResult<()> {
        if value > u16::MAX as usize {
            return Err(PayerError::BuildOverflow {
                needed: value,
                limit: u16::MAX as usize,
            });
        }
        let mut rest = value as u16;
        loop {
            let mut byte = (rest & 0x7f) as u8;
            rest >>= 7;
            if rest != 0 {
                byte |= 0x80;
            }
            self.put_u8(byte)?;
            if rest == 0 {
                return Ok(());
            }
        }
    }

    /// Appends an opaque byte run.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> PayResult<()> {
        self.ensure(bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Consumes the writer, returning the assembled bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortvec(value: usize) -> Vec<u8> {
        let mut w = TxWriter::new(8);
        w.put_shortvec_len(value).unwrap();
        w.into_bytes()
    }

    #[test]
    fn shortvec_single_byte_range() {
        assert_eq!(shortvec(0), [0x00]);
        assert_eq!(shortvec(1), [0x01]);
        assert_eq!(shortvec(0x7f), [0x7f]);
    }

    #[test]
    fn shortvec_two_byte_range() {
        assert_eq!(shortvec(0x80), [0x80, 0x01]);
        assert_eq!(shortvec(0x3fff), [0xff, 0x7f]);
    }

    #[test]
    fn shortvec_three_byte_range() {
        assert_eq!(shortvec(0x4000), [0x80, 0x80, 0x01]);
        assert_eq!(shortvec(0xffff), [0xff, 0xff, 0x03]);
    }

    #[test]
    fn shortvec_rejects_values_beyond_u16() {
        let mut w = TxWriter::new(8);
        assert!(matches!(
            w.put_shortvec_len(0x1_0000),
            Err(PayerError::BuildOverflow { .. })
        ));
    }

    #[test]
    fn little_endian_integers() {
        let mut w = TxWriter::new(16);
        w.put_u32_le(0x0403_0201).unwrap();
        w.put_u64_le(0x0807_0605_0403_0201).unwrap();
        assert_eq!(
            w.into_bytes(),
            [1, 2, 3, 4, 1, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn overflow_reports_needed_and_limit() {
        let mut w = TxWriter::new(4);
        w.put_bytes(&[0; 3]).unwrap();
        match w.put_bytes(&[0; 2]) {
            Err(PayerError::BuildOverflow { needed, limit }) => {
                assert_eq!(needed, 5);
                assert_eq!(limit, 4);
            }
            other => panic!("expected overflow, got {other:?}"),
        }
        // The failed write must not have appended anything.
        assert_eq!(w.len(), 3);
    }
}
