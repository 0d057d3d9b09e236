//! Buffered GET over HTTP or HTTPS.
//!
//! One attempt per call: pick a transport from the URL prefix, send a GET
//! with the fixed header set, require `200 OK`, and concatenate the
//! response chunks into a single [`Body`].

mod body;
mod client;
mod headers;

#[cfg(test)]
mod tests;

pub use body::Body;

use crate::error::{QgetError, Result};
use crate::types::{GetOptions, OK};
use async_trait::async_trait;
use client::{build_client_for_transport, Transport};
use serde_json::Value;

/// Maps a URL to a fully buffered response body.
///
/// Implementations make exactly one attempt per call: no retries, no
/// redirect following, no timeout. A hung server stalls the returned
/// future until the connection dies on its own.
#[async_trait]
pub trait Fetcher: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, url: &str, opts: &GetOptions) -> Result<Body>;

    /// Synchronous wrapper running on the shared runtime.
    fn fetch_blocking(&self, url: &str, opts: &GetOptions) -> Result<Body> {
        crate::runtime::block_on(self.fetch(url, opts))
    }
}

/// Default fetcher backed by reqwest.
#[derive(Debug, Default)]
pub struct ReqwestFetcher;

impl ReqwestFetcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    fn name(&self) -> &'static str {
        "reqwest"
    }

    async fn fetch(&self, url: &str, opts: &GetOptions) -> Result<Body> {
        let transport = Transport::for_url(url);
        let client = build_client_for_transport(transport)?;

        let mut headers = headers::base_headers();
        headers::apply_extra(&mut headers, &opts.headers)?;

        let mut response = client.get(url).headers(headers).send().await?;

        let status = response.status();
        if status != OK {
            return Err(QgetError::Status {
                code: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("Unknown Status")
                    .to_string(),
                url: url.to_string(),
            });
        }

        let mut body = Body::new();
        while let Some(chunk) = response.chunk().await? {
            body.push_chunk(&chunk);
        }
        Ok(body)
    }
}

/// Fetch a URL and buffer the whole body.
///
/// Resolves with the exact concatenation, in receipt order, of every chunk
/// delivered before the stream ended (an empty [`Body`] if there were
/// none), or rejects with the first error encountered.
///
/// # Examples
/// ```no_run
/// # async fn example() -> qget::Result<()> {
/// let body = qget::fetch("https://example.com").await?;
/// println!("{} bytes", body.len());
/// # Ok(())
/// # }
/// ```
pub async fn fetch(url: &str) -> Result<Body> {
    fetch_with_options(url, &GetOptions::default()).await
}

/// Fetch with explicit options (extra request headers).
pub async fn fetch_with_options(url: &str, opts: &GetOptions) -> Result<Body> {
    ReqwestFetcher::new().fetch(url, opts).await
}

/// Fetch a URL and decode the buffered body as text (UTF-8, lossy).
///
/// Convenience wrapper around [`fetch`] for callers who want a `String`.
pub async fn fetch_text(url: &str) -> Result<String> {
    fetch(url).await.map(Body::into_text_lossy)
}

/// Untyped entrypoint: accepts any JSON value as the URL.
///
/// Anything other than a string is refused with
/// [`QgetError::UrlNotString`] before any client is built or any network
/// activity happens.
pub async fn fetch_value(url: &Value) -> Result<Body> {
    match url.as_str() {
        Some(s) => fetch(s).await,
        None => Err(QgetError::UrlNotString),
    }
}

/// Blocking wrapper around [`fetch`] for non-async callers.
pub fn fetch_blocking(url: &str) -> Result<Body> {
    crate::runtime::block_on(fetch(url))
}
