//! HTTP access to the trip service.
//!
//! [`RemoteClient`] is the single chokepoint every remote read passes
//! through: one GET per call, ok-or-error status handling, JSON body
//! parsing. No retries and no caching here -- a failed call surfaces to the
//! issuing controller, which reports it and leaves retry to the user.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{DashboardError, Result};

/// Abstraction over the network fetch, the seam controllers depend on.
///
/// The production implementation is [`RemoteClient`]; tests substitute a
/// scripted fake to drive response ordering and failures.
pub trait Fetch {
    /// GET `path` relative to the service base, with a pre-encoded query
    /// string (may be empty), returning the parsed JSON body.
    fn get_json(&self, path: &str, query: &str) -> Result<serde_json::Value>;
}

/// Blocking HTTP client bound to one service base address.
pub struct RemoteClient {
    base: Url,
    client: Client,
}

impl RemoteClient {
    /// Create a client for the given base address.
    ///
    /// Fails with `Validation` if the address is not an absolute URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            DashboardError::Validation(format!("invalid service base URL {base_url}: {e}"))
        })?;
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(DashboardError::Transport)?;
        Ok(Self { base, client })
    }

    /// The service base address this client is bound to.
    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    fn endpoint(&self, path: &str, query: &str) -> Result<Url> {
        // The parsed base always carries a trailing slash on its path.
        let joined = format!("{}/{}", self.base.as_str().trim_end_matches('/'), path);
        let mut url = Url::parse(&joined).map_err(|e| {
            DashboardError::Validation(format!("invalid endpoint path {path}: {e}"))
        })?;
        if !query.is_empty() {
            url.set_query(Some(query));
        }
        Ok(url)
    }
}

impl Fetch for RemoteClient {
    fn get_json(&self, path: &str, query: &str) -> Result<serde_json::Value> {
        let url = self.endpoint(path, query)?;
        tracing::debug!(%url, "GET");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(DashboardError::Transport)?;
        let status = resp.status();
        // Body is read as text first: on error it may be anything, and on
        // success a parse failure must map to Decode, not Transport.
        let body = resp.text().map_err(DashboardError::Transport)?;

        if !status.is_success() {
            return Err(DashboardError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(DashboardError::from)
    }
}

/// Decode a JSON value into a typed model, mapping failure to `Decode`.
pub fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(DashboardError::from)
}
