//! Project aggregation pipeline
//!
//! Fetch the full project list, order it by recency, resolve every project's
//! URL concurrently and assemble the deck's cards. A rejected credential or
//! a failed list fetch aborts the whole run; per-project lookups settle
//! individually and are joined before the list is handed over.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{debug, info, warn};
use swipedeck_model::{AccentColor, Project, RawProject};

use super::color::derive_accent;
use super::resolver::{Resolution, UrlResolver};
use crate::error::{DeckError, DeckResult};
use crate::infra::config::DeckConfig;
use crate::infra::credentials::{Credential, CredentialStore};
use crate::infra::services::ProjectSource;

pub const DEGRADED_DESCRIPTION: &str = "Could not resolve custom domains.";

#[derive(Debug, Clone)]
pub struct Aggregator {
    source: Arc<dyn ProjectSource>,
    resolver: UrlResolver,
}

impl Aggregator {
    pub fn new(
        source: Arc<dyn ProjectSource>,
        config: &DeckConfig,
    ) -> DeckResult<Self> {
        let resolver = UrlResolver::new(
            Arc::clone(&source),
            &config.fallback_domain_suffix,
            config.domain_lookup_timeout(),
        )
        .map_err(|e| {
            DeckError::Config(format!(
                "fallback domain suffix {:?}: {e}",
                config.fallback_domain_suffix
            ))
        })?;
        Ok(Self { source, resolver })
    }

    /// Fetch, order and resolve the deck for `credential`.
    pub async fn aggregate(
        &self,
        credential: &Credential,
    ) -> DeckResult<Vec<Project>> {
        let mut raw = self.source.fetch_projects(credential).await?;
        sort_by_recency(&mut raw);

        let resolutions = join_all(
            raw.iter()
                .map(|record| self.resolver.resolve(credential, record)),
        )
        .await;

        let degraded = resolutions.iter().filter(|r| r.is_degraded()).count();
        let projects: Vec<Project> = raw
            .iter()
            .zip(resolutions)
            .map(|(record, resolution)| assemble(record, resolution))
            .collect();
        info!(
            "[Pipeline] Aggregated {} projects ({} with degraded resolution)",
            projects.len(),
            degraded
        );
        Ok(projects)
    }

    /// Run [`Aggregator::aggregate`] and reconcile the credential store:
    /// saved on success, cleared when the platform rejects it.
    pub async fn load_deck(
        &self,
        credential: &Credential,
        store: &dyn CredentialStore,
    ) -> DeckResult<Vec<Project>> {
        match self.aggregate(credential).await {
            Ok(projects) => {
                if let Err(e) = store.save(credential) {
                    warn!("[Pipeline] Loaded deck but could not persist credential: {}", e);
                }
                Ok(projects)
            }
            Err(DeckError::Unauthorized) => {
                info!("[Pipeline] Credential rejected; clearing stored credential");
                if let Err(e) = store.clear() {
                    warn!("[Pipeline] Failed to clear rejected credential: {}", e);
                }
                Err(DeckError::Unauthorized)
            }
            Err(e) => Err(e),
        }
    }
}

/// Most recently updated first; equal timestamps keep source order.
pub fn sort_by_recency(records: &mut [RawProject]) {
    // slice::sort_by is stable
    records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

fn assemble(record: &RawProject, resolution: Resolution) -> Project {
    let (accent, description) = if resolution.is_degraded() {
        (AccentColor::NEUTRAL, DEGRADED_DESCRIPTION.to_string())
    } else {
        (derive_accent(&record.name), last_updated(record.updated_at))
    };
    debug!(
        "[Pipeline] {} -> {} ({})",
        record.name,
        resolution.url(),
        accent
    );
    Project::new(
        record.id.clone(),
        record.name.clone(),
        resolution.into_url(),
        record.framework.clone(),
        accent,
        description,
    )
}

fn last_updated(updated_at_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(updated_at_ms) {
        Some(at) => format!("Last updated: {}", at.format("%b %-d, %Y")),
        None => "Last updated: unknown".to_string(),
    }
}
