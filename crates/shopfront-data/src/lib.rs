//! HTTP client utilities for the Shopfront storefront.
//!
//! Provides a small GET client with JSON response handling.
//! The wire is abstracted behind [`Transport`], with a `reqwest` default and
//! a [`CannedTransport`] for tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_data::FetchClient;
//!
//! let client = FetchClient::new().with_base_url("https://viacep.com.br");
//!
//! let address: serde_json::Value = client
//!     .get("/ws/01001000/json/")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;
mod transport;

use std::sync::Arc;

use tracing::debug;

pub use error::FetchError;
pub use request::Request;
pub use response::Response;
pub use transport::{CannedTransport, ReqwestTransport, Transport};

/// HTTP client for making outbound requests.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    transport: Arc<dyn Transport>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a new HTTP client using the `reqwest` transport.
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }

    /// Create a client over a custom transport.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            base_url: None,
            transport: Arc::new(transport),
        }
    }

    /// Create a client with a base URL that will be prepended to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url,
        };

        ClientRequestBuilder {
            request: Request::get(full_url),
            transport: Arc::clone(&self.transport),
        }
    }
}

/// A request bound to a client.
pub struct ClientRequestBuilder {
    request: Request,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.header(key, value);
        self
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        debug!(url = %self.request.url, "sending request");
        let response = self.transport.execute(self.request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_base_url_joining() {
        let transport = CannedTransport::new()
            .respond(Response::json_body(200, "{}"))
            .respond(Response::json_body(200, "{}"));
        let client = FetchClient::with_transport(transport.clone())
            .with_base_url("https://viacep.com.br/");

        client.get("/ws/01001000/json/").send().await.unwrap();
        client.get("https://other.example/x").send().await.unwrap();

        let seen = transport.requests();
        assert_eq!(seen[0].url, "https://viacep.com.br/ws/01001000/json/");
        assert_eq!(seen[1].url, "https://other.example/x");
    }

    #[tokio::test]
    async fn test_send_through_canned_transport() {
        let transport = CannedTransport::new().respond(Response::json_body(200, r#"{"ok":true}"#));
        let client = FetchClient::with_transport(transport.clone());

        let resp = client
            .get("https://example.com/a")
            .header("Accept", "application/json")
            .send()
            .await
            .unwrap();
        assert!(resp.is_success());

        let seen = transport.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url, "https://example.com/a");
        assert_eq!(
            seen[0].headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_canned_failure_and_exhaustion() {
        let transport = CannedTransport::new().fail("connection refused");
        let client = FetchClient::with_transport(transport);

        let first = client.get("https://example.com").send().await;
        assert!(matches!(first, Err(FetchError::RequestError(m)) if m == "connection refused"));

        let second = client.get("https://example.com").send().await;
        assert!(matches!(second, Err(FetchError::RequestError(_))));
    }
}
