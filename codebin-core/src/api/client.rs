//! HTTP client for the snippet service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::Instrument;

use crate::config::ApiSettings;
use crate::error::{ApiError, ApiResult};
use crate::models::Snippet;
use crate::tracing::span_names;

use super::types::{LoginResponse, SaveSnippetResponse, SnippetPayload};

/// The three calls the playground makes to its backend.
///
/// Each call is one-shot: no retry and no cancellation.
#[async_trait]
pub trait SnippetApi: Send + Sync {
    /// Exchanges credentials for a bearer token
    async fn login(&self, email: &str, password: &SecretString) -> ApiResult<SecretString>;

    /// Stores a snippet, returning its share id
    async fn save_snippet(&self, token: &SecretString, snippet: &Snippet) -> ApiResult<String>;

    /// Fetches a shared snippet by id
    async fn load_shared(&self, share_id: &str) -> ApiResult<Snippet>;
}

/// [`SnippetApi`] over HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpSnippetApi {
    client: Client,
    base_url: Url,
}

impl HttpSnippetApi {
    /// Creates a client for the service at `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the URL cannot carry a path, or
    /// [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Creates a client from the `[api]` settings
    ///
    /// # Errors
    ///
    /// See [`HttpSnippetApi::new`].
    pub fn from_settings(settings: &ApiSettings) -> ApiResult<Self> {
        Self::new(&settings.base_url, settings.timeout())
    }

    /// Service base URL
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint below the base URL, keeping any path prefix
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Maps non-2xx answers to [`ApiError::Status`] and decodes the body
async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

#[async_trait]
impl SnippetApi for HttpSnippetApi {
    async fn login(&self, email: &str, password: &SecretString) -> ApiResult<SecretString> {
        let url = self.endpoint(&["api", "auth", "login"])?;
        let body = serde_json::json!({
            "email": email,
            "password": password.expose_secret(),
        });

        async {
            let response = self
                .client
                .post(url)
                .json(&body)
                .send()
                .await
                .map_err(transport)?;
            let login: LoginResponse = decode(response).await?;
            tracing::debug!("Login accepted");
            Ok(SecretString::from(login.token))
        }
        .instrument(crate::trace_operation!(span_names::API_LOGIN))
        .await
    }

    async fn save_snippet(&self, token: &SecretString, snippet: &Snippet) -> ApiResult<String> {
        let url = self.endpoint(&["api", "snippets"])?;
        let body = SnippetPayload::for_save(snippet);

        async {
            let response = self
                .client
                .post(url)
                .bearer_auth(token.expose_secret())
                .json(&body)
                .send()
                .await
                .map_err(transport)?;
            let saved: SaveSnippetResponse = decode(response).await?;
            tracing::debug!(share_id = %saved.share_id, "Snippet stored");
            Ok(saved.share_id)
        }
        .instrument(crate::trace_operation!(span_names::API_SAVE, title = %body.title))
        .await
    }

    async fn load_shared(&self, share_id: &str) -> ApiResult<Snippet> {
        let url = self.endpoint(&["api", "snippets", "share", share_id])?;

        async {
            let response = self.client.get(url).send().await.map_err(transport)?;
            let payload: SnippetPayload = decode(response).await?;
            Ok(payload.into_snippet(share_id))
        }
        .instrument(crate::trace_operation!(span_names::API_LOAD, share_id = %share_id))
        .await
    }
}
