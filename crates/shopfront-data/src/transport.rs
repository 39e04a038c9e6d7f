//! Pluggable request transports.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{FetchError, Request, Response};

/// Executes a request and returns the raw response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` over the wire.
    async fn execute(&self, request: Request) -> Result<Response, FetchError>;
}

/// Transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default `reqwest` client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: Request) -> Result<Response, FetchError> {
        let mut builder = self.client.get(&request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}

/// Transport that replays canned responses, for tests and offline demos.
///
/// Responses are served in the order they were queued; once the queue is
/// empty every request fails with [`FetchError::RequestError`].
#[derive(Debug, Clone, Default)]
pub struct CannedTransport {
    responses: Arc<Mutex<VecDeque<Result<Response, String>>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl CannedTransport {
    /// Create an empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn respond(self, response: Response) -> Self {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(Ok(response));
        }
        self
    }

    /// Queue a connection failure.
    pub fn fail(self, message: impl Into<String>) -> Self {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(Err(message.into()));
        }
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn execute(&self, request: Request) -> Result<Response, FetchError> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request);
        }

        let next = self
            .responses
            .lock()
            .map_err(|e| FetchError::RequestError(e.to_string()))?
            .pop_front();

        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(FetchError::RequestError(message)),
            None => Err(FetchError::RequestError("no canned response".to_string())),
        }
    }
}
