use api_types::Envelope;
use reqwest::{StatusCode, multipart};
use serde::Serialize;

use crate::error::RepoError;

/// Raw outcome of one endpoint call: the status plus the envelope, if the
/// body decoded as one. Failure statuses often carry no envelope at all.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub envelope: Option<Envelope>,
}

/// Thin HTTP wrapper over the SettleUp backend endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    /// Accepts a preconfigured client so callers control timeouts; the
    /// repository treats timeouts as plain transport errors.
    pub fn with_http(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, RepoError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(RepoError::transport)?;
        Self::read(response).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, RepoError> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(RepoError::transport)?;
        Self::read(response).await
    }

    pub async fn post_empty(&self, path: &str) -> Result<ApiResponse, RepoError> {
        let response = self
            .http
            .post(self.url(path))
            .send()
            .await
            .map_err(RepoError::transport)?;
        Self::read(response).await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<ApiResponse, RepoError> {
        let response = self
            .http
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .map_err(RepoError::transport)?;
        Self::read(response).await
    }

    async fn read(response: reqwest::Response) -> Result<ApiResponse, RepoError> {
        let status = response.status();
        let envelope = response.json::<Envelope>().await.ok();
        Ok(ApiResponse { status, envelope })
    }
}
