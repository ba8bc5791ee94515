//! The thin JSON-RPC surface the payment path needs.
//!
//! The driver consumes exactly two chain primitives: a recent blockhash for
//! transaction freshness and the owner of the mint account, which tells us
//! whether the classic SPL token program or Token-2022 governs the transfer.
//! Both are behind [`SolanaRpc`] so the driver can be exercised against mock
//! chains; [`HttpRpc`] is the `reqwest`-backed implementation.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{PayResult, PayerError};

use super::pubkey::{Blockhash, Pubkey};
use super::{TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID};

/// Typed JSON-RPC capabilities consumed by the payment driver.
#[async_trait]
pub trait SolanaRpc: Send + Sync {
    /// `getLatestBlockhash` with `finalized` commitment.
    async fn latest_blockhash(&self) -> PayResult<Blockhash>;

    /// `getAccountInfo` with `jsonParsed` encoding, returning the owner of
    /// `account`.
    async fn account_owner(&self, account: &Pubkey) -> PayResult<Pubkey>;
}

#[async_trait]
impl<'a, R: SolanaRpc + ?Sized> SolanaRpc for &'a R {
    async fn latest_blockhash(&self) -> PayResult<Blockhash> {
        (**self).latest_blockhash().await
    }

    async fn account_owner(&self, account: &Pubkey) -> PayResult<Pubkey> {
        (**self).account_owner(account).await
    }
}

/// Validates that a mint's owner is a token program this protocol can pay
/// through, returning the program to use for ATA derivation and the
/// transaction's account table.
pub fn resolve_token_program(mint: &Pubkey, owner: &Pubkey) -> PayResult<Pubkey> {
    if owner == &*TOKEN_PROGRAM_ID || owner == &*TOKEN_2022_PROGRAM_ID {
        Ok(*owner)
    } else {
        Err(PayerError::MintUnsupported {
            mint: *mint,
            owner: *owner,
        })
    }
}

/// HTTP JSON-RPC client, the default [`SolanaRpc`] implementation.
#[derive(Debug, Clone)]
pub struct HttpRpc {
    http: reqwest::Client,
    url: String,
}

impl HttpRpc {
    /// Creates a client against an RPC endpoint such as
    /// `https://api.devnet.solana.com`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Creates a client reusing an existing `reqwest::Client`, so connection
    /// pools and timeouts stay under the caller's control.
    pub fn with_client(url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    async fn call(&self, method: &str, params: Value) -> PayResult<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| PayerError::Transport(format!("rpc {method}: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(PayerError::Transport(format!(
                "rpc {method}: HTTP {status}"
            )));
        }
        let value: Value = response
            .json()
            .await
            .map_err(|e| PayerError::Transport(format!("rpc {method}: invalid JSON: {e}")))?;
        if let Some(error) = value.get("error") {
            return Err(PayerError::Transport(format!(
                "rpc {method} returned error: {error}"
            )));
        }
        value
            .get("result")
            .cloned()
            .ok_or_else(|| PayerError::Transport(format!("rpc {method}: missing result")))
    }
}

#[async_trait]
impl SolanaRpc for HttpRpc {
    async fn latest_blockhash(&self) -> PayResult<Blockhash> {
        let result = self
            .call("getLatestBlockhash", json!([{"commitment": "finalized"}]))
            .await?;
        parse_blockhash(&result)
    }

    async fn account_owner(&self, account: &Pubkey) -> PayResult<Pubkey> {
        let result = self
            .call(
                "getAccountInfo",
                json!([account.to_string(), {"encoding": "jsonParsed"}]),
            )
            .await?;
        parse_account_owner(account, &result)
    }
}

fn parse_blockhash(result: &Value) -> PayResult<Blockhash> {
    let blockhash = result
        .pointer("/value/blockhash")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            PayerError::Transport("getLatestBlockhash: missing value.blockhash".into())
        })?;
    blockhash
        .parse()
        .map_err(|e| PayerError::Transport(format!("getLatestBlockhash: {e}")))
}

fn parse_account_owner(account: &Pubkey, result: &Value) -> PayResult<Pubkey> {
    let owner = result
        .pointer("/value/owner")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            PayerError::Transport(format!("getAccountInfo: no account found for {account}"))
        })?;
    owner
        .parse()
        .map_err(|e| PayerError::Transport(format!("getAccountInfo: {e}")))
}
