use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use swipedeck_model::{
    DomainRecord, DomainsEnvelope, ProjectId, ProjectsEnvelope, RawProject,
};

use super::config::DeckConfig;
use super::constants::api;
use super::credentials::Credential;
use super::services::ProjectSource;
use crate::error::ApiError;

/// HTTP client for the Vercel REST API.
#[derive(Debug, Clone)]
pub struct VercelClient {
    client: Client,
    base_url: String,
}

impl VercelClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        debug!("[VercelClient] Creating API client with base URL: {}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &DeckConfig) -> Result<Self, ApiError> {
        Self::new(config.api_base_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an absolute URL from an API path
    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let p = path.as_ref();
        if p.starts_with("http://") || p.starts_with("https://") {
            return p.to_string();
        }
        format!("{}/{}", self.base_url, p.trim_start_matches('/'))
    }

    async fn send(
        &self,
        credential: &Credential,
        path: &str,
    ) -> Result<Response, ApiError> {
        let url = self.build_url(path);
        Ok(self
            .client
            .get(&url)
            .bearer_auth(credential.expose())
            .send()
            .await?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        credential: &Credential,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(credential, path).await?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string())),
            status @ (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                warn!("[VercelClient] Credential rejected for {} ({})", path, status);
                Err(ApiError::Unauthorized {
                    status: status.as_u16(),
                })
            }
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                warn!("[VercelClient] GET {} failed with status {}", path, status);
                Err(ApiError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

pub(crate) fn domains_path(project: &ProjectId) -> String {
    format!("{}/{}/domains", api::PROJECTS_PATH, project)
}

/// Read a domains response by its body rather than its status. An error
/// payload that parses (it has no `domains` list) means no custom domain;
/// only an unreadable body is a failed lookup.
pub(crate) fn domains_from_body(
    status: u16,
    body: String,
) -> Result<Vec<DomainRecord>, ApiError> {
    match serde_json::from_str::<DomainsEnvelope>(&body) {
        Ok(envelope) => Ok(envelope.domains),
        Err(e) if (200..300).contains(&status) => {
            Err(ApiError::Decode(e.to_string()))
        }
        Err(_) => Err(ApiError::Status { status, body }),
    }
}

#[async_trait]
impl ProjectSource for VercelClient {
    async fn fetch_projects(
        &self,
        credential: &Credential,
    ) -> Result<Vec<RawProject>, ApiError> {
        let envelope: ProjectsEnvelope =
            self.get_json(credential, api::PROJECTS_PATH).await?;
        debug!(
            "[VercelClient] Fetched {} project records",
            envelope.projects.len()
        );
        Ok(envelope.projects)
    }

    async fn fetch_domains(
        &self,
        credential: &Credential,
        project: &ProjectId,
    ) -> Result<Vec<DomainRecord>, ApiError> {
        let path = domains_path(project);
        let response = self.send(credential, &path).await?;
        let status = response.status();
        if !status.is_success() {
            debug!("[VercelClient] GET {} answered {}", path, status);
        }
        let body = response.text().await?;
        domains_from_body(status.as_u16(), body)
    }
}
