//! Public URL resolution
//!
//! A project's public URL is its first registered custom domain. Projects
//! without one, or whose lookup fails, get the platform's default subdomain.
//! Resolution never fails: a broken lookup degrades that one project only.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use swipedeck_model::RawProject;
use url::Url;

use crate::error::ApiError;
use crate::infra::api_client::domains_from_body;
use crate::infra::credentials::Credential;
use crate::infra::services::ProjectSource;

/// How a project's URL was settled.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// First registered custom domain
    CustomDomain(Url),
    /// No custom domain registered
    DefaultSubdomain(Url),
    /// The lookup failed; the default subdomain is used instead
    Degraded { url: Url, reason: ApiError },
}

impl Resolution {
    pub fn url(&self) -> &Url {
        match self {
            Resolution::CustomDomain(url)
            | Resolution::DefaultSubdomain(url)
            | Resolution::Degraded { url, .. } => url,
        }
    }

    pub fn into_url(self) -> Url {
        match self {
            Resolution::CustomDomain(url)
            | Resolution::DefaultSubdomain(url)
            | Resolution::Degraded { url, .. } => url,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Resolution::Degraded { .. })
    }
}

#[derive(Debug, Clone)]
pub struct UrlResolver {
    source: Arc<dyn ProjectSource>,
    /// `https://<suffix>`; project subdomains are prepended to its host
    fallback_base: Url,
    lookup_timeout: Duration,
}

impl UrlResolver {
    pub fn new(
        source: Arc<dyn ProjectSource>,
        fallback_suffix: &str,
        lookup_timeout: Duration,
    ) -> Result<Self, url::ParseError> {
        let suffix = fallback_suffix.trim().trim_matches('.');
        let fallback_base = Url::parse(&format!("https://{suffix}"))?;
        if fallback_base.host_str().is_none_or(str::is_empty) {
            return Err(url::ParseError::EmptyHost);
        }
        Ok(Self {
            source,
            fallback_base,
            lookup_timeout,
        })
    }

    pub async fn resolve(
        &self,
        credential: &Credential,
        project: &RawProject,
    ) -> Resolution {
        let lookup = tokio::time::timeout(
            self.lookup_timeout,
            self.source.fetch_domains(credential, &project.id),
        )
        .await
        .unwrap_or(Err(ApiError::Timeout))
        .or_else(|err| match err {
            ApiError::Status { status, body } => domains_from_body(status, body),
            other => Err(other),
        });

        let first = match lookup {
            Ok(domains) => domains.into_iter().next(),
            Err(reason) => return self.degraded(project, reason),
        };

        match first {
            Some(domain) => {
                match Url::parse(&format!("https://{}", domain.name.trim())) {
                    Ok(url) => Resolution::CustomDomain(url),
                    Err(e) => self.degraded(
                        project,
                        ApiError::Decode(format!(
                            "unusable domain {:?}: {e}",
                            domain.name
                        )),
                    ),
                }
            }
            None => Resolution::DefaultSubdomain(self.fallback_url(&project.name)),
        }
    }

    /// `https://<project-name>.<suffix>`, lowercased and reduced to a valid
    /// DNS label. Names with nothing usable map to the bare suffix.
    pub fn fallback_url(&self, name: &str) -> Url {
        let mut url = self.fallback_base.clone();
        let label = subdomain_label(name);
        if label.is_empty() {
            return url;
        }
        let host = format!(
            "{label}.{}",
            self.fallback_base.host_str().unwrap_or_default()
        );
        if url.set_host(Some(&host)).is_err() {
            debug!("[Resolver] Could not build subdomain for {:?}", name);
        }
        url
    }

    fn degraded(&self, project: &RawProject, reason: ApiError) -> Resolution {
        debug!(
            "[Resolver] Domain lookup for {} degraded: {}",
            project.id, reason
        );
        Resolution::Degraded {
            url: self.fallback_url(&project.name),
            reason,
        }
    }
}

fn subdomain_label(name: &str) -> String {
    let mapped: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect();
    mapped.trim_matches('-').to_string()
}
