use async_trait::async_trait;
use swipedeck_model::{DomainRecord, ProjectId, RawProject};

use crate::error::ApiError;
use crate::infra::credentials::Credential;

#[cfg(test)]
use mockall::automock;

/// Read access to the platform's project endpoints.
///
/// Implementations issue bearer-authenticated requests with the credential
/// they are handed; they never store it.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// Fetch the full project list (single page, no pagination).
    async fn fetch_projects(
        &self,
        credential: &Credential,
    ) -> Result<Vec<RawProject>, ApiError>;

    /// Fetch the custom domains registered for one project, in platform
    /// order.
    async fn fetch_domains(
        &self,
        credential: &Credential,
        project: &ProjectId,
    ) -> Result<Vec<DomainRecord>, ApiError>;
}

impl std::fmt::Debug for dyn ProjectSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn ProjectSource")
    }
}
