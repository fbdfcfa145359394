//! Directory client for the hospital backend.
//!
//! One method per REST endpoint, grouped by entity. The client is pure I/O:
//! it attaches the session's bearer token, maps the response status onto
//! [`ApiError`], and decodes the body. Policy decisions live in
//! [`crate::domain`].

mod assignments;
mod audit;
mod auth;
mod beds;
mod floors;
mod patients;
mod staff;

use std::sync::RwLock;
use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::session::Session;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Error taxonomy for every backend call.
///
/// 401 marks the session invalid before surfacing, 409 carries the backend's
/// conflict message so callers can open a remedial workflow, 400/404 carry
/// the backend message verbatim, and transport failures never retry.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no autorizado - por favor inicie sesión nuevamente")]
    Unauthorized,
    #[error("no tiene permisos para esta acción")]
    Forbidden,
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Rejected(String),
    #[error("error del servidor ({status}): {message}")]
    Unexpected { status: u16, message: String },
    #[error("no se recibió respuesta del servidor")]
    Network(#[source] reqwest::Error),
    #[error("respuesta ilegible del servidor")]
    Decode(#[source] reqwest::Error),
    #[error("no hay sesión iniciada")]
    NotSignedIn,
}

/// Error payload shape the backend uses on 4xx responses. Some endpoints
/// answer `{"message": ...}`, the user endpoints `{"mensaje": ...}`, and a
/// few return plain text.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "mensaje")]
    message: String,
}

/// Typed wrapper around the backend REST API.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: RwLock<Option<Session>>,
}

impl ApiClient {
    /// Client against the configured backend (`HOSPITAL_API_URL`, falling
    /// back to the development default).
    pub fn new() -> Self {
        let base_url =
            std::env::var("HOSPITAL_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            http,
            session: RwLock::new(None),
        }
    }

    /// Current session, if signed in.
    pub fn session(&self) -> Option<Session> {
        self.session.read().expect("session lock poisoned").clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session().is_some()
    }

    pub(crate) fn store_session(&self, session: Session) {
        *self.session.write().expect("session lock poisoned") = Some(session);
    }

    pub(crate) fn clear_session(&self) {
        *self.session.write().expect("session lock poisoned") = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token of the active session.
    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let guard = self.session.read().expect("session lock poisoned");
        let session = guard.as_ref().ok_or(ApiError::NotSignedIn)?;
        Ok(builder.bearer_auth(session.token()))
    }

    /// Send a request and map the response status onto the error taxonomy.
    /// A 401 invalidates the held session before the error surfaces.
    async fn execute(&self, builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = builder.send().await.map_err(ApiError::Network)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = Self::error_message(response).await;
        match status.as_u16() {
            401 => {
                warn!("session rejected by backend, clearing");
                self.clear_session();
                Err(ApiError::Unauthorized)
            }
            403 => Err(ApiError::Forbidden),
            409 => Err(ApiError::Conflict(message)),
            400 | 404 => Err(ApiError::Rejected(message)),
            code => Err(ApiError::Unexpected {
                status: code,
                message,
            }),
        }
    }

    async fn error_message(response: reqwest::Response) -> String {
        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => body.message,
            Err(_) if !text.is_empty() => text,
            Err(_) => "Error desconocido".to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.authorized(self.http.get(self.url(path)))?;
        let response = self.execute(builder).await?;
        response.json::<T>().await.map_err(ApiError::Decode)
    }

    /// Run a mutating request and return the backend's confirmation message
    /// (several endpoints answer with plain text meant for the user).
    async fn send_for_message(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let builder = self.authorized(builder)?;
        let response = self.execute(builder).await?;
        response.text().await.map_err(ApiError::Decode)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
