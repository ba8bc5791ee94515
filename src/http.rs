//! The HTTP collaborator contract and its `reqwest` implementation.
//!
//! The driver never talks to a socket itself. It issues exchanges through
//! [`HttpTransport`], which carries request and response headers as CRLF
//! separated `Name: value` blobs. Implementations must preserve unknown
//! response headers so the driver can extract the settlement header.

use async_trait::async_trait;

use crate::error::{PayResult, PayerError};

/// A single HTTP exchange to perform.
#[derive(Debug, Clone, Copy)]
pub struct HttpRequest<'a> {
    /// Absolute request URL.
    pub url: &'a str,
    /// HTTP method name, e.g. `GET`.
    pub method: &'a str,
    /// CRLF-separated `Name: value` lines; may be empty.
    pub headers: &'a str,
    /// Request body; empty means no body.
    pub body: &'a [u8],
}

/// The result of an HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// CRLF-separated `Name: value` lines, unknown headers included.
    pub headers: String,
    /// Response body bytes.
    pub body: Vec<u8>,
}

/// The HTTP capability the driver consumes.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Performs one HTTP exchange. Each call is issued exactly once; the
    /// driver never retries a failed exchange.
    async fn request(&self, request: HttpRequest<'_>) -> PayResult<HttpResponse>;
}

#[async_trait]
impl<'a, T: HttpTransport + ?Sized> HttpTransport for &'a T {
    async fn request(&self, request: HttpRequest<'_>) -> PayResult<HttpResponse> {
        (**self).request(request).await
    }
}

/// Finds a header value in a CRLF blob. Name comparison ignores case, the
/// value is trimmed of surrounding whitespace.
pub fn extract_header<'a>(headers: &'a str, name: &str) -> Option<&'a str> {
    for line in headers.lines() {
        if let Some((line_name, value)) = line.split_once(':') {
            if line_name.trim().eq_ignore_ascii_case(name) {
                return Some(value.trim());
            }
        }
    }
    None
}

/// Returns `headers` with one more `Name: value` line appended.
pub fn with_header(headers: &str, name: &str, value: &str) -> String {
    let trimmed = headers.trim_end_matches(['\r', '\n']);
    if trimmed.is_empty() {
        format!("{name}: {value}")
    } else {
        format!("{trimmed}\r\n{name}: {value}")
    }
}

/// Default [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a fresh client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport reusing an existing client, keeping timeouts and
    /// connection pooling under the caller's control.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn request(&self, request: HttpRequest<'_>) -> PayResult<HttpResponse> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| PayerError::Transport(format!("bad method {:?}: {e}", request.method)))?;

        let mut builder = self.http.request(method, request.url);
        for line in request.headers.lines() {
            if let Some((name, value)) = line.split_once(':') {
                builder = builder.header(name.trim(), value.trim());
            }
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body.to_vec());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| PayerError::Transport(format!("{} {}: {e}", request.method, request.url)))?;

        let status = response.status().as_u16();
        let mut headers = String::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.push_str(name.as_str());
                headers.push_str(": ");
                headers.push_str(value);
                headers.push_str("\r\n");
            }
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| PayerError::Transport(format!("reading body of {}: {e}", request.url)))?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
