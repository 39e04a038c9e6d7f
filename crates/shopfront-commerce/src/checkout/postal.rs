//! Postal code lookup for address autofill.
//!
//! The lookup is best effort: one request, no retry, no timeout. Callers on
//! the checkout form use [`lookup_or_none`] or [`AutofillTask`], which turn
//! every failure into "no result" so the customer can type the address.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shopfront_data::FetchClient;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::checkout::PostalCode;
use crate::CommerceError;

/// Public ViaCEP endpoint.
pub const VIACEP_BASE_URL: &str = "https://viacep.com.br";

/// Address fields known for a postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub postal_code: PostalCode,
    pub street: String,
    #[serde(default)]
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    /// Two-letter state code.
    pub state: String,
}

/// A postal code lookup service.
#[async_trait]
pub trait PostalLookup: Send + Sync {
    /// Resolve `code` to an address.
    ///
    /// Returns [`CommerceError::PostalCodeNotFound`] for unknown codes and
    /// [`CommerceError::PostalLookupFailed`] for transport or format errors.
    async fn lookup(&self, code: &PostalCode) -> Result<PostalAddress, CommerceError>;
}

/// Lookup backed by the ViaCEP JSON API.
#[derive(Debug, Clone)]
pub struct ViaCepLookup {
    client: FetchClient,
}

/// Raw ViaCEP payload.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    /// `true` (or `"true"`) for unknown codes.
    #[serde(default)]
    erro: Option<serde_json::Value>,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    complemento: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

impl ViaCepResponse {
    fn is_error(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

impl ViaCepLookup {
    /// Lookup against the public service over `reqwest`.
    pub fn new() -> Self {
        Self::with_client(FetchClient::new().with_base_url(VIACEP_BASE_URL))
    }

    /// Lookup using a preconfigured client. The client's base URL is the
    /// service root.
    pub fn with_client(client: FetchClient) -> Self {
        Self { client }
    }
}

impl Default for ViaCepLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostalLookup for ViaCepLookup {
    async fn lookup(&self, code: &PostalCode) -> Result<PostalAddress, CommerceError> {
        let response = self
            .client
            .get(format!("/ws/{}/json/", code.digits()))
            .header("Accept", "application/json")
            .send()
            .await?;

        if response.status == 400 || response.status == 404 {
            return Err(CommerceError::PostalCodeNotFound(code.display()));
        }

        let body: ViaCepResponse = response.error_for_status()?.json()?;
        if body.is_error() {
            return Err(CommerceError::PostalCodeNotFound(code.display()));
        }

        let complement = Some(body.complemento).filter(|c| !c.trim().is_empty());
        Ok(PostalAddress {
            postal_code: code.clone(),
            street: body.logradouro,
            complement,
            neighborhood: body.bairro,
            city: body.localidade,
            state: body.uf,
        })
    }
}

/// Look up `code`, turning every failure into `None`.
pub async fn lookup_or_none(lookup: &dyn PostalLookup, code: &PostalCode) -> Option<PostalAddress> {
    match lookup.lookup(code).await {
        Ok(address) => {
            debug!(cep = %code, city = %address.city, "postal lookup succeeded");
            Some(address)
        }
        Err(e) => {
            warn!(cep = %code, error = %e, "postal lookup failed");
            None
        }
    }
}

/// A postal lookup running in the background for an address form.
///
/// Dropping the task aborts the lookup, so a form that goes away never
/// receives a late result.
#[derive(Debug)]
pub struct AutofillTask {
    code: PostalCode,
    handle: Option<JoinHandle<Option<PostalAddress>>>,
}

impl AutofillTask {
    /// Start looking up `code` on the current tokio runtime.
    pub fn spawn(lookup: Arc<dyn PostalLookup>, code: PostalCode) -> Self {
        let task_code = code.clone();
        let handle =
            tokio::spawn(async move { lookup_or_none(lookup.as_ref(), &task_code).await });
        Self {
            code,
            handle: Some(handle),
        }
    }

    /// The code being looked up.
    pub fn code(&self) -> &PostalCode {
        &self.code
    }

    /// Whether the lookup has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the result. An aborted or panicked lookup yields `None`.
    pub async fn finish(mut self) -> Option<PostalAddress> {
        let handle = self.handle.take()?;
        handle.await.ok().flatten()
    }

    /// Cancel the lookup.
    pub fn abort(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                debug!(cep = %self.code, "postal lookup aborted");
            }
            handle.abort();
        }
    }
}

impl Drop for AutofillTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_data::{CannedTransport, Response};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    fn lookup_with(transport: CannedTransport) -> ViaCepLookup {
        ViaCepLookup::with_client(
            FetchClient::with_transport(transport).with_base_url("https://viacep.test"),
        )
    }

    fn cep() -> PostalCode {
        PostalCode::parse("01001-000").unwrap()
    }

    const SE: &str = r#"{
        "cep": "01001-000",
        "logradouro": "Praça da Sé",
        "complemento": "lado ímpar",
        "bairro": "Sé",
        "localidade": "São Paulo",
        "uf": "SP"
    }"#;

    #[tokio::test]
    async fn test_viacep_lookup() {
        let transport = CannedTransport::new().respond(Response::json_body(200, SE));
        let lookup = lookup_with(transport.clone());

        let address = lookup.lookup(&cep()).await.unwrap();
        assert_eq!(address.street, "Praça da Sé");
        assert_eq!(address.complement.as_deref(), Some("lado ímpar"));
        assert_eq!(address.city, "São Paulo");
        assert_eq!(address.state, "SP");

        let requests = transport.requests();
        assert_eq!(requests[0].url, "https://viacep.test/ws/01001000/json/");
        assert_eq!(
            requests[0].headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_viacep_not_found() {
        let transport = CannedTransport::new()
            .respond(Response::json_body(200, r#"{"erro": true}"#))
            .respond(Response::json_body(200, r#"{"erro": "true"}"#))
            .respond(Response::json_body(400, "Bad Request"));
        let lookup = lookup_with(transport);

        for _ in 0..3 {
            assert!(matches!(
                lookup.lookup(&cep()).await,
                Err(CommerceError::PostalCodeNotFound(code)) if code == "01001-000"
            ));
        }
    }

    #[tokio::test]
    async fn test_lookup_failures() {
        let transport = CannedTransport::new()
            .fail("connection reset")
            .respond(Response::json_body(500, "oops"))
            .respond(Response::json_body(200, "<html>"));
        let lookup = lookup_with(transport);

        for _ in 0..3 {
            assert!(matches!(
                lookup.lookup(&cep()).await,
                Err(CommerceError::PostalLookupFailed(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_lookup_or_none_swallows_errors() {
        let lookup = lookup_with(CannedTransport::new().fail("offline"));
        assert!(lookup_or_none(&lookup, &cep()).await.is_none());

        let lookup = lookup_with(CannedTransport::new().respond(Response::json_body(200, SE)));
        assert!(lookup_or_none(&lookup, &cep()).await.is_some());
    }

    #[tokio::test]
    async fn test_autofill_task_finish() {
        let transport = CannedTransport::new().respond(Response::json_body(200, SE));
        let task = AutofillTask::spawn(Arc::new(lookup_with(transport)), cep());
        assert_eq!(task.code().digits(), "01001000");
        let found = task.finish().await.unwrap();
        assert_eq!(found.neighborhood, "Sé");
    }

    struct SlowLookup {
        completed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl PostalLookup for SlowLookup {
        async fn lookup(&self, code: &PostalCode) -> Result<PostalAddress, CommerceError> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            self.completed.store(true, Ordering::SeqCst);
            Err(CommerceError::PostalCodeNotFound(code.display()))
        }
    }

    #[tokio::test]
    async fn test_autofill_task_aborts_on_drop() {
        let completed = Arc::new(AtomicBool::new(false));
        let task = AutofillTask::spawn(
            Arc::new(SlowLookup {
                completed: completed.clone(),
            }),
            cep(),
        );
        assert!(!task.is_finished());
        drop(task);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(!completed.load(Ordering::SeqCst));
    }
}
