//! Base58 codec using the Bitcoin alphabet, as used throughout Solana for
//! public keys, blockhashes, and transaction signatures.
//!
//! Encoding treats the input as one big-endian integer and emits digits by
//! repeated division by 58; every leading zero byte maps to a leading `'1'`.
//! Decoding is the exact inverse, so `decode(encode(k)) == k` for any input.

/// The Bitcoin Base58 alphabet. Note the absence of `0`, `O`, `I`, and `l`.
const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const fn build_decode_table() -> [i8; 128] {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    table
}

/// Maps an ASCII byte to its Base58 digit value, or -1.
const DECODE_TABLE: [i8; 128] = build_decode_table();

/// Errors produced by [`decode`] and [`decode_array`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Base58Error {
    /// The input contained a character outside the Base58 alphabet.
    #[error("invalid base58 character {0:?}")]
    InvalidCharacter(char),
    /// The decoded value did not have the expected byte length.
    #[error("decoded base58 value is {got} bytes, expected {want}")]
    Length {
        /// Expected length in bytes.
        want: usize,
        /// Actual decoded length in bytes.
        got: usize,
    },
}

/// Encode arbitrary bytes as a Base58 string.
pub fn encode(input: &[u8]) -> String {
    let leading_zeros = input.iter().take_while(|&&b| b == 0).count();

    // Digits accumulate little-endian; each input byte multiplies the whole
    // number by 256 and adds itself.
    let mut digits: Vec<u8> = Vec::with_capacity(input.len() * 138 / 100 + 1);
    for &byte in &input[leading_zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(leading_zeros + digits.len());
    for _ in 0..leading_zeros {
        out.push('1');
    }
    for &digit in digits.iter().rev() {
        out.push(ALPHABET[digit as usize] as char);
    }
    out
}

/// Decode a Base58 string into bytes.
pub fn decode(input: &str) -> Result<Vec<u8>, Base58Error> {
    let bytes = input.as_bytes();
    let leading_ones = bytes.iter().take_while(|&&c| c == b'1').count();

    // Bytes accumulate little-endian; each character multiplies the whole
    // number by 58 and adds its digit value.
    let mut acc: Vec<u8> = Vec::with_capacity(bytes.len() * 733 / 1000 + 1);
    for &c in &bytes[leading_ones..] {
        let digit = if c < 128 { DECODE_TABLE[c as usize] } else { -1 };
        if digit < 0 {
            return Err(Base58Error::InvalidCharacter(c as char));
        }
        let mut carry = digit as u32;
        for byte in acc.iter_mut() {
            carry += (*byte as u32) * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            acc.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; leading_ones];
    out.extend(acc.iter().rev());
    Ok(out)
}

/// Decode a Base58 string into a fixed-size byte array.
///
/// Fails with [`Base58Error::Length`] when the decoded value is not exactly
/// `N` bytes, which catches truncated or padded key material early.
pub fn decode_array<const N: usize>(input: &str) -> Result<[u8; N], Base58Error> {
    let bytes = decode(input)?;
    let got = bytes.len();
    bytes
        .try_into()
        .map_err(|_| Base58Error::Length { want: N, got })
}
