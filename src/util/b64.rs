//! Base64 text helper for header payloads.

use base64::engine::general_purpose::STANDARD as b64;
use base64::Engine;
use std::fmt::Display;

/// Bytes that are themselves the Base64 text of some other bytes.
///
/// Uses the standard alphabet with padding, which is what both the payment
/// header and the settlement header carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64Bytes(Vec<u8>);

impl Base64Bytes {
    /// Encodes a raw binary payload into Base64 text bytes.
    pub fn encode<T: AsRef<[u8]>>(input: T) -> Self {
        Self(b64.encode(input.as_ref()).into_bytes())
    }

    /// Wraps text that is expected to already be Base64.
    pub fn from_encoded<T: Into<Vec<u8>>>(text: T) -> Self {
        Self(text.into())
    }

    /// Decodes back to the raw binary payload.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        b64.decode(&self.0)
    }
}

impl AsRef<[u8]> for Base64Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Base64Bytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let payload = b"{\"transaction\":\"AA==\"}";
        let encoded = Base64Bytes::encode(payload);
        assert_eq!(encoded.decode().unwrap(), payload.to_vec());
    }

    #[test]
    fn uses_standard_alphabet_with_padding() {
        assert_eq!(Base64Bytes::encode([0xfbu8]).to_string(), "+w==");
    }

    #[test]
    fn rejects_invalid_text() {
        assert!(Base64Bytes::from_encoded("not base64!!").decode().is_err());
    }
}
