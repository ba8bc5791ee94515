//! # x402-payer
//!
//! A payer agent for the [x402 protocol](https://x402.org/) that settles
//! payments as SPL token transfers on Solana-family networks, signed with a
//! device-resident Ed25519 key and fee-sponsored by a third-party
//! facilitator.
//!
//! When a server answers `402 Payment Required`, the agent parses the
//! challenge, builds a legacy Solana transaction byte-for-byte (no chain SDK
//! involved), signs its slot in place, and retries the request with the
//! payment envelope in the `X-PAYMENT` header. The facilitator co-signs the
//! fee-payer slot and submits the transaction, so the device needs no SOL.
//!
//! ## Example
//!
//! ```rust,no_run
//! use x402_payer::{HttpRpc, ReqwestTransport, Wallet, X402Payer};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let keypair: [u8; 64] = load_keypair_from_secure_storage();
//! let wallet = Wallet::from_keypair_bytes(keypair)?;
//!
//! let payer = X402Payer::new(
//!     wallet,
//!     ReqwestTransport::new(),
//!     HttpRpc::new("https://api.devnet.solana.com"),
//! );
//!
//! let response = payer
//!     .fetch("https://api.example.com/premium", "GET", "", &[])
//!     .await?;
//!
//! if let Some(receipt) = response.receipt() {
//!     println!("paid via transaction {}", receipt.transaction);
//! }
//! # Ok(())
//! # }
//! # fn load_keypair_from_secure_storage() -> [u8; 64] { [0; 64] }
//! ```
//!
//! ## Crate layout
//!
//! - [`client`] – the two-phase request driver
//! - [`types`] – x402 wire types: challenge, envelope, receipt, capabilities
//! - [`solana`] – byte-level Solana core: Base58, wallet, PDA derivation,
//!   transfer assembly, and the minimal JSON-RPC surface
//! - [`http`] – the HTTP collaborator contract and its `reqwest` backend
//! - [`facilitator`] – the `/supported` capability probe
//!
//! The driver is strictly single-threaded cooperative: its only suspension
//! points are the HTTP and RPC exchanges, and no state is shared across
//! calls. Collaborators are injected, so the whole flow runs against mocks
//! in tests.

pub mod client;
pub mod error;
pub mod facilitator;
pub mod http;
pub mod network;
pub mod solana;
pub mod types;
pub mod util;

pub use client::{PaidResponse, PaymentStatus, X402Payer, PAYMENT_HEADER, PAYMENT_RESPONSE_HEADER};
pub use error::{PayResult, PayerError};
pub use http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use network::Network;
pub use solana::rpc::{HttpRpc, SolanaRpc};
pub use solana::Wallet;
pub use types::{PaymentPayload, PaymentRequirements, SettlementReceipt};
