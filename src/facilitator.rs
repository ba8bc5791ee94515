//! Facilitator capability probe.
//!
//! When a 402 challenge names no fee payer, the facilitator's `GET
//! /supported` listing is the only other source. The probe selects the
//! advertised tuple whose network matches the requirement; failure here is
//! final, there is no further fallback.

use tracing::{debug, info};

use crate::error::{PayResult, PayerError};
use crate::http::{HttpRequest, HttpTransport};
use crate::network::Network;
use crate::solana::Pubkey;
use crate::types::SupportedPaymentKinds;

/// Queries `<facilitator_url>/supported` and returns the fee payer
/// advertised for `network`.
pub async fn query_fee_payer<T: HttpTransport + ?Sized>(
    transport: &T,
    facilitator_url: &str,
    network: Network,
) -> PayResult<Pubkey> {
    let url = format!("{}/supported", facilitator_url.trim_end_matches('/'));
    debug!(%url, "querying facilitator capabilities");

    let response = transport
        .request(HttpRequest {
            url: &url,
            method: "GET",
            headers: "",
            body: &[],
        })
        .await?;
    if response.status != 200 {
        return Err(PayerError::FacilitatorUnsupported(format!(
            "/supported returned HTTP {}",
            response.status
        )));
    }

    let listing: SupportedPaymentKinds = serde_json::from_slice(&response.body)
        .map_err(|e| PayerError::FacilitatorUnsupported(format!("invalid /supported body: {e}")))?;

    let kind = listing
        .kinds
        .iter()
        .find(|kind| kind.network == network.as_str())
        .ok_or_else(|| {
            PayerError::FacilitatorUnsupported(format!("no /supported entry for {network}"))
        })?;

    let fee_payer = kind
        .extra
        .as_ref()
        .map(|extra| extra.fee_payer)
        .ok_or_else(|| {
            PayerError::FacilitatorUnsupported(format!(
                "/supported entry for {network} has no feePayer"
            ))
        })?;

    info!(%fee_payer, %network, "fee payer resolved via facilitator");
    Ok(fee_payer)
}
