//! The fetch boundary: how a grid request reaches the server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::FetchError;
use crate::request::RequestParams;

/// The form field the serialized request parameters are posted under.
///
/// The server side reads the whole grid state from this single field, so the
/// name is part of the wire contract.
pub const GRID_DATA_FIELD: &str = "grid_data";

/// Performs the network I/O for a grid reload.
///
/// Implementations receive the grid's URL and the parameters to send and
/// return the server-rendered view fragment. The controller treats any `Err`
/// as a fetch failure and enters its error phase; nothing propagates further.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the view fragment for the given parameters.
    async fn fetch(&self, url: &str, params: &RequestParams) -> Result<String, FetchError>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for std::sync::Arc<T> {
    async fn fetch(&self, url: &str, params: &RequestParams) -> Result<String, FetchError> {
        (**self).fetch(url, params).await
    }
}

/// The default [`Fetcher`]: POSTs the serialized parameters as a
/// [`GRID_DATA_FIELD`] form field and returns the response body.
///
/// # Example
///
/// ```ignore
/// let fetcher = HttpFetcher::new().timeout(Duration::from_secs(30));
/// let fragment = fetcher.fetch("https://example.com/grid", &params).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpFetcher {
    /// Creates a fetcher with a default HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fetcher using a custom HTTP client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, params: &RequestParams) -> Result<String, FetchError> {
        let payload = serde_json::to_string(params)?;

        let mut request = self.client.post(url).form(&[(GRID_DATA_FIELD, payload)]);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(FetchError::Http {
                status: status.as_u16(),
                message: body,
            })
        }
    }
}
