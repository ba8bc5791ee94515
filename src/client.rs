//! The two-phase x402 request driver.
//!
//! [`X402Payer::fetch`] turns an ordinary HTTP call into a paid one:
//!
//! 1. issue the request unpaid; anything but 402 passes straight through;
//! 2. parse the challenge and validate the amount (before any RPC);
//! 3. resolve the fee payer, from the challenge or the facilitator;
//! 4. probe the mint's token program, derive the token accounts, fetch a
//!    recent blockhash, assemble and sign the transfer;
//! 5. retry once with the Base64 envelope in the `X-PAYMENT` header;
//! 6. decode the `X-PAYMENT-RESPONSE` settlement receipt.
//!
//! Each HTTP and RPC exchange is issued exactly once; no retries happen
//! inside the driver, and a second 402 on the paid retry is terminal.

use tracing::{debug, info, warn};

use crate::error::{PayResult, PayerError};
use crate::facilitator;
use crate::http::{extract_header, with_header, HttpRequest, HttpTransport};
use crate::network::Network;
use crate::solana::rpc::{resolve_token_program, SolanaRpc};
use crate::solana::transfer::{build_transfer_transaction, TransferParams};
use crate::solana::{Pubkey, Wallet};
use crate::types::{PaymentPayload, PaymentRequired, PaymentRequirements, SettlementReceipt};

/// Request header carrying the payment envelope.
pub const PAYMENT_HEADER: &str = "X-PAYMENT";
/// Response header carrying the settlement receipt.
pub const PAYMENT_RESPONSE_HEADER: &str = "X-PAYMENT-RESPONSE";

/// What happened to the payment side of a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    /// The server answered without demanding payment; nothing was signed or
    /// transmitted.
    None,
    /// A signed envelope was transmitted, but the response carried no
    /// decodable settlement receipt (or a non-2xx status). Settlement, if
    /// any, is the facilitator's business.
    Unverified,
    /// The facilitator settled the payment and returned a receipt.
    Settled(SettlementReceipt),
}

impl PaymentStatus {
    /// True only when a settlement receipt confirmed the payment.
    pub fn payment_made(&self) -> bool {
        matches!(self, PaymentStatus::Settled(_))
    }
}

/// The merged response returned to the caller.
///
/// Owns every dynamically sized field; dropping the response releases the
/// body, the header blob, and the receipt together.
#[derive(Debug, Clone)]
pub struct PaidResponse {
    /// Final HTTP status code.
    pub status: u16,
    /// CRLF-separated response header blob.
    pub headers: String,
    /// Response body bytes, verbatim.
    pub body: Vec<u8>,
    /// Payment outcome.
    pub payment: PaymentStatus,
}

impl PaidResponse {
    /// True only when a settlement receipt confirmed the payment.
    pub fn payment_made(&self) -> bool {
        self.payment.payment_made()
    }

    /// The settlement receipt, when one was decoded.
    pub fn receipt(&self) -> Option<&SettlementReceipt> {
        match &self.payment {
            PaymentStatus::Settled(receipt) => Some(receipt),
            _ => None,
        }
    }
}

/// The payer agent: a wallet plus its HTTP and JSON-RPC collaborators.
///
/// Collaborators are injected at construction and live as long as the
/// driver; nothing global is touched. Concurrent `fetch` calls on separate
/// drivers are independent; the wallet is only read during signing.
pub struct X402Payer<T, R> {
    wallet: Wallet,
    transport: T,
    rpc: R,
    facilitator_url: Option<String>,
}

impl<T, R> X402Payer<T, R>
where
    T: HttpTransport,
    R: SolanaRpc,
{
    /// Creates a driver around a wallet and its collaborators.
    pub fn new(wallet: Wallet, transport: T, rpc: R) -> Self {
        Self {
            wallet,
            transport,
            rpc,
            facilitator_url: None,
        }
    }

    /// Sets the facilitator base URL used to resolve the fee payer when the
    /// challenge body does not name one.
    pub fn with_facilitator(mut self, url: impl Into<String>) -> Self {
        self.facilitator_url = Some(url.into());
        self
    }

    /// The wallet this driver signs with.
    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    /// Performs a request, paying for it if the server demands payment.
    ///
    /// `headers` is a CRLF-separated `Name: value` blob, possibly empty.
    /// At most one paid retry is issued.
    pub async fn fetch(
        &self,
        url: &str,
        method: &str,
        headers: &str,
        body: &[u8],
    ) -> PayResult<PaidResponse> {
        info!(%method, %url, "x402 fetch");

        let initial = self
            .transport
            .request(HttpRequest {
                url,
                method,
                headers,
                body,
            })
            .await?;

        if initial.status != 402 {
            debug!(status = initial.status, "no payment required");
            return Ok(PaidResponse {
                status: initial.status,
                headers: initial.headers,
                body: initial.body,
                payment: PaymentStatus::None,
            });
        }

        info!("402 received, constructing payment");
        let requirements = PaymentRequired::parse_first_accept(&initial.body)?;
        let network = requirements.network_or_default();
        let amount = requirements.amount()?;
        debug!(
            amount,
            recipient = %requirements.pay_to,
            mint = %requirements.asset,
            %network,
            "challenge parsed"
        );

        let fee_payer = self.resolve_fee_payer(&requirements, network).await?;
        let header_value = self
            .build_payment_header(&requirements, network, amount, fee_payer)
            .await?;

        let retry_headers = with_header(headers, PAYMENT_HEADER, &header_value);
        let retry = self
            .transport
            .request(HttpRequest {
                url,
                method,
                headers: &retry_headers,
                body,
            })
            .await?;

        match retry.status {
            402 => {
                warn!("payment rejected: server answered 402 again");
                Err(PayerError::PaymentRejected {
                    status: retry.status,
                })
            }
            200..=299 => {
                let payment = match extract_header(&retry.headers, PAYMENT_RESPONSE_HEADER) {
                    Some(value) => {
                        let receipt = SettlementReceipt::from_header_value(value)?;
                        info!(transaction = %receipt.transaction, success = receipt.success, "payment settled");
                        if network == Network::SolanaDevnet {
                            debug!(
                                "https://explorer.solana.com/tx/{}?cluster=devnet",
                                receipt.transaction
                            );
                        }
                        PaymentStatus::Settled(receipt)
                    }
                    None => {
                        warn!("2xx paid response without settlement header");
                        PaymentStatus::Unverified
                    }
                };
                Ok(PaidResponse {
                    status: retry.status,
                    headers: retry.headers,
                    body: retry.body,
                    payment,
                })
            }
            status => {
                warn!(status, "paid retry returned unexpected status");
                Ok(PaidResponse {
                    status,
                    headers: retry.headers,
                    body: retry.body,
                    payment: PaymentStatus::Unverified,
                })
            }
        }
    }

    async fn resolve_fee_payer(
        &self,
        requirements: &PaymentRequirements,
        network: Network,
    ) -> PayResult<Pubkey> {
        if let Some(fee_payer) = requirements.fee_payer() {
            debug!(%fee_payer, "fee payer taken from challenge");
            return Ok(fee_payer);
        }
        match &self.facilitator_url {
            Some(base) => facilitator::query_fee_payer(&self.transport, base, network).await,
            None => Err(PayerError::FacilitatorUnsupported(
                "challenge names no feePayer and no facilitator is configured".into(),
            )),
        }
    }

    async fn build_payment_header(
        &self,
        requirements: &PaymentRequirements,
        network: Network,
        amount: u64,
        fee_payer: Pubkey,
    ) -> PayResult<String> {
        let owner = self.rpc.account_owner(&requirements.asset).await?;
        let token_program = resolve_token_program(&requirements.asset, &owner)?;
        debug!(%token_program, "mint owner resolved");

        let recent_blockhash = self.rpc.latest_blockhash().await?;

        let mut tx = build_transfer_transaction(&TransferParams {
            fee_payer,
            payer: *self.wallet.pubkey(),
            recipient: requirements.pay_to,
            mint: requirements.asset,
            token_program,
            amount,
            recent_blockhash,
        })?;
        let signature = self.wallet.sign(tx.message());
        tx.write_payer_signature(&signature);
        info!(
            bytes = tx.as_bytes().len(),
            payer = %self.wallet.pubkey(),
            "transaction assembled and signed"
        );

        PaymentPayload::new(network, tx.as_bytes()).to_header_value()
    }
}
