//! Type definitions for the x402 payment protocol, Solana "exact" scheme.
//!
//! The key objects are [`PaymentRequired`] (the parsed 402 challenge),
//! [`PaymentPayload`] (the envelope carried in the `X-PAYMENT` request
//! header), [`SettlementReceipt`] (decoded from the `X-PAYMENT-RESPONSE`
//! header), and [`SupportedPaymentKinds`] (the facilitator's `/supported`
//! listing). Serialization is wire-compatible with the official x402 SDKs:
//! camelCase field names, amounts as decimal strings, keys as Base58 strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::Display;
use tracing::warn;

use crate::error::{PayResult, PayerError};
use crate::network::Network;
use crate::solana::Pubkey;
use crate::util::Base64Bytes;

/// Protocol version witness; always the number `1` on the wire.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct X402Version1;

impl X402Version1 {
    /// The wire value.
    pub const VALUE: u8 = 1;
}

impl Serialize for X402Version1 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(Self::VALUE)
    }
}

impl<'de> Deserialize<'de> for X402Version1 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let num = u8::deserialize(deserializer)?;
        if num == Self::VALUE {
            Ok(X402Version1)
        } else {
            Err(serde::de::Error::custom(format!(
                "expected x402 version {}, got {num}",
                Self::VALUE
            )))
        }
    }
}

impl Display for X402Version1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::VALUE)
    }
}

/// Payment scheme witness; serializes as `"exact"`, deserializes only from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExactScheme {
    /// The device pays a precise stated amount.
    #[serde(rename = "exact")]
    #[default]
    Exact,
}

impl Display for ExactScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exact")
    }
}

/// The `extra` object attached to requirements and facilitator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementsExtra {
    /// Facilitator account that co-signs and pays transaction fees.
    pub fee_payer: Pubkey,
}

/// One entry of a 402 challenge's `accepts` array.
///
/// `scheme` stays an unvalidated string: servers occasionally advertise
/// scheme names this client does not know, and the envelope emits `"exact"`
/// regardless.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequirements {
    /// Advertised payment scheme, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Merchant wallet to pay.
    pub pay_to: Pubkey,
    /// Token mint the payment must use.
    pub asset: Pubkey,
    /// Amount in the token's smallest denomination, as a decimal string.
    pub max_amount_required: String,
    /// Network tag; missing means devnet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,
    /// Facilitator metadata, notably the fee payer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<RequirementsExtra>,
}

impl PaymentRequirements {
    /// The challenge's network, assuming devnet when the field was absent.
    pub fn network_or_default(&self) -> Network {
        self.network.unwrap_or_else(|| {
            warn!("402 challenge has no network field, assuming solana-devnet");
            Network::default()
        })
    }

    /// Parses `maxAmountRequired` into non-zero token base units.
    ///
    /// Non-digit content, values beyond 64 bits, and zero are all fatal.
    pub fn amount(&self) -> PayResult<u64> {
        let raw = self.max_amount_required.as_str();
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PayerError::AmountInvalid(format!(
                "{raw:?} is not a decimal integer"
            )));
        }
        let amount: u64 = raw.parse().map_err(|_| {
            PayerError::AmountInvalid(format!("{raw:?} does not fit in 64 bits"))
        })?;
        if amount == 0 {
            return Err(PayerError::AmountInvalid("amount is zero".into()));
        }
        Ok(amount)
    }

    /// The fee payer carried inline in the challenge, if any.
    pub fn fee_payer(&self) -> Option<Pubkey> {
        self.extra.as_ref().map(|extra| extra.fee_payer)
    }
}

/// The body of a 402 challenge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequired {
    /// Payment options the server accepts; the first one is taken.
    pub accepts: Vec<PaymentRequirements>,
    /// Optional server-side explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PaymentRequired {
    /// Parses a 402 body and selects the first accepted option.
    ///
    /// Later `accepts` entries are never considered.
    pub fn parse_first_accept(body: &[u8]) -> PayResult<PaymentRequirements> {
        let required: PaymentRequired = serde_json::from_slice(body)
            .map_err(|e| PayerError::ChallengeParse(e.to_string()))?;
        required
            .accepts
            .into_iter()
            .next()
            .ok_or_else(|| PayerError::ChallengeParse("empty accepts array".into()))
    }
}

/// The network-specific half of the payment envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SolanaPayload {
    /// Base64 of the signed transaction bytes.
    pub transaction: String,
}

/// The payment envelope carried in the `X-PAYMENT` request header.
///
/// The JSON form is flat: `x402Version`, `scheme`, and `network` sit at the
/// top level next to `payload`. Facilitators reject a form nested under a
/// `kind` object, so that shape must never be emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
    /// Always `1`.
    pub x402_version: X402Version1,
    /// Always `"exact"`.
    pub scheme: ExactScheme,
    /// The network of the selected requirement.
    pub network: Network,
    /// The signed transaction.
    pub payload: SolanaPayload,
}

impl PaymentPayload {
    /// Wraps signed transaction bytes for `network` into an envelope.
    pub fn new(network: Network, transaction_bytes: &[u8]) -> Self {
        Self {
            x402_version: X402Version1,
            scheme: ExactScheme::Exact,
            network,
            payload: SolanaPayload {
                transaction: Base64Bytes::encode(transaction_bytes).to_string(),
            },
        }
    }

    /// Serializes without whitespace and Base64-encodes, producing the
    /// `X-PAYMENT` header value.
    pub fn to_header_value(&self) -> PayResult<String> {
        let json = serde_json::to_vec(self)
            .map_err(|e| PayerError::Crypto(format!("envelope serialization: {e}")))?;
        Ok(Base64Bytes::encode(json).to_string())
    }
}

/// Settlement receipt decoded from the `X-PAYMENT-RESPONSE` header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReceipt {
    /// Base58 signature of the settled transaction.
    pub transaction: String,
    /// Whether the facilitator reports the settlement as successful.
    pub success: bool,
    /// Network the settlement happened on.
    pub network: String,
}

impl SettlementReceipt {
    /// Decodes a receipt from the raw header value (Base64 of JSON).
    pub fn from_header_value(header: &str) -> PayResult<Self> {
        let bytes = Base64Bytes::from_encoded(header.trim())
            .decode()
            .map_err(|e| PayerError::ReceiptDecode(format!("invalid base64: {e}")))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| PayerError::ReceiptDecode(format!("invalid JSON: {e}")))
    }
}

/// One tuple of the facilitator's `/supported` listing.
///
/// The network stays a plain string here: facilitators list every chain they
/// serve, including ones this client cannot pay on, and an unknown tag must
/// not poison the whole listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedPaymentKind {
    /// Protocol version of the tuple.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x402_version: Option<u8>,
    /// Scheme name of the tuple.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Network tag of the tuple.
    pub network: String,
    /// Fee payer metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<RequirementsExtra>,
}

/// The facilitator's `/supported` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedPaymentKinds {
    /// Advertised scheme/network tuples.
    pub kinds: Vec<SupportedPaymentKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHALLENGE: &str = r#"{"accepts":[{
        "payTo":"HVnsW7xz1VkXEySxvXuMj6jUa3aewQbbCUkYis1DEh6Q",
        "network":"solana-devnet",
        "asset":"4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU",
        "maxAmountRequired":"100",
        "extra":{"feePayer":"4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU"}
    }]}"#;

    #[test]
    fn parses_the_first_accepted_option() {
        let req = PaymentRequired::parse_first_accept(CHALLENGE.as_bytes()).unwrap();
        assert_eq!(
            req.pay_to.to_string(),
            "HVnsW7xz1VkXEySxvXuMj6jUa3aewQbbCUkYis1DEh6Q"
        );
        assert_eq!(req.network_or_default(), Network::SolanaDevnet);
        assert_eq!(req.amount().unwrap(), 100);
        assert!(req.fee_payer().is_some());
    }

    #[test]
    fn missing_pay_to_fails_parsing() {
        let body = r#"{"accepts":[{"asset":"4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU","maxAmountRequired":"1"}]}"#;
        assert!(matches!(
            PaymentRequired::parse_first_accept(body.as_bytes()),
            Err(PayerError::ChallengeParse(_))
        ));
    }

    #[test]
    fn empty_accepts_fails_parsing() {
        assert!(matches!(
            PaymentRequired::parse_first_accept(br#"{"accepts":[]}"#),
            Err(PayerError::ChallengeParse(_))
        ));
    }

    #[test]
    fn missing_network_defaults_to_devnet() {
        let body = r#"{"accepts":[{
            "payTo":"HVnsW7xz1VkXEySxvXuMj6jUa3aewQbbCUkYis1DEh6Q",
            "asset":"4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU",
            "maxAmountRequired":"5"
        }]}"#;
        let req = PaymentRequired::parse_first_accept(body.as_bytes()).unwrap();
        assert_eq!(req.network, None);
        assert_eq!(req.network_or_default(), Network::SolanaDevnet);
    }

    #[test]
    fn amount_rejects_zero_and_non_digits() {
        let mut req = PaymentRequired::parse_first_accept(CHALLENGE.as_bytes()).unwrap();
        for bad in ["0", "", "abc", "+5", "-1", "1.5", "18446744073709551616"] {
            req.max_amount_required = bad.to_string();
            assert!(
                matches!(req.amount(), Err(PayerError::AmountInvalid(_))),
                "{bad:?} should be invalid"
            );
        }
        req.max_amount_required = "18446744073709551615".to_string();
        assert_eq!(req.amount().unwrap(), u64::MAX);
    }

    #[test]
    fn envelope_is_flat_with_exact_keys() {
        let payload = PaymentPayload::new(Network::SolanaDevnet, &[0u8; 4]);
        let header = payload.to_header_value().unwrap();
        let json = Base64Bytes::from_encoded(header).decode().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();

        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["network", "payload", "scheme", "x402Version"]);
        assert_eq!(object["x402Version"], 1);
        assert_eq!(object["scheme"], "exact");
        assert_eq!(object["network"], "solana-devnet");
        assert!(object["payload"]["transaction"].is_string());
        // The nested-under-kind form must never appear.
        assert!(object.get("kind").is_none());
    }

    #[test]
    fn envelope_serializes_without_whitespace() {
        let payload = PaymentPayload::new(Network::SolanaDevnet, b"\x01\x02");
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(
            json,
            r#"{"x402Version":1,"scheme":"exact","network":"solana-devnet","payload":{"transaction":"AQI="}}"#
        );
    }

    #[test]
    fn receipt_decodes_from_header_value() {
        let receipt_json =
            r#"{"transaction":"3xK9LmpQ7Zv","success":true,"network":"solana-devnet"}"#;
        let header = Base64Bytes::encode(receipt_json).to_string();
        let receipt = SettlementReceipt::from_header_value(&header).unwrap();
        assert_eq!(receipt.transaction, "3xK9LmpQ7Zv");
        assert!(receipt.success);
        assert_eq!(receipt.network, "solana-devnet");
    }

    #[test]
    fn receipt_rejects_bad_base64_and_bad_json() {
        assert!(matches!(
            SettlementReceipt::from_header_value("!!not-base64!!"),
            Err(PayerError::ReceiptDecode(_))
        ));
        let header = Base64Bytes::encode("{\"success\":").to_string();
        assert!(matches!(
            SettlementReceipt::from_header_value(&header),
            Err(PayerError::ReceiptDecode(_))
        ));
    }

    #[test]
    fn supported_kinds_tolerate_foreign_networks() {
        let body = r#"{"kinds":[
            {"x402Version":1,"scheme":"exact","network":"base-sepolia"},
            {"x402Version":1,"scheme":"exact","network":"solana-devnet",
             "extra":{"feePayer":"HVnsW7xz1VkXEySxvXuMj6jUa3aewQbbCUkYis1DEh6Q"}}
        ]}"#;
        let kinds: SupportedPaymentKinds = serde_json::from_str(body).unwrap();
        assert_eq!(kinds.kinds.len(), 2);
        let solana = &kinds.kinds[1];
        assert_eq!(solana.network, "solana-devnet");
        assert!(solana.extra.is_some());
    }

    #[test]
    fn version_witness_rejects_other_numbers() {
        assert!(serde_json::from_str::<X402Version1>("1").is_ok());
        assert!(serde_json::from_str::<X402Version1>("2").is_err());
    }
}
