use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::domains::catalog::Aggregator;
use crate::error::DeckResult;
use crate::infra::config::DeckConfig;
use crate::infra::credentials::CredentialStore;
use crate::infra::scheduler::Scheduler;
use crate::infra::services::{NavigationSink, PresentationSink, ProjectSource};

use super::messages::SessionMessage;

/// Collaborators supplied by the host.
#[derive(Clone)]
pub struct DeckServices {
    pub source: Arc<dyn ProjectSource>,
    pub credentials: Arc<dyn CredentialStore>,
    pub navigator: Arc<dyn NavigationSink>,
    pub presenter: Arc<dyn PresentationSink>,
}

impl fmt::Debug for DeckServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeckServices")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

/// Everything [`super::update`] needs besides the session itself.
pub struct DeckContext {
    pub aggregator: Aggregator,
    pub credentials: Arc<dyn CredentialStore>,
    pub navigator: Arc<dyn NavigationSink>,
    pub presenter: Arc<dyn PresentationSink>,
    pub scheduler: Scheduler<SessionMessage>,
    pub advance_delay: Duration,
}

impl DeckContext {
    pub fn new(
        services: DeckServices,
        config: &DeckConfig,
        scheduler: Scheduler<SessionMessage>,
    ) -> DeckResult<Self> {
        Ok(Self {
            aggregator: Aggregator::new(services.source, config)?,
            credentials: services.credentials,
            navigator: services.navigator,
            presenter: services.presenter,
            scheduler,
            advance_delay: config.advance_delay(),
        })
    }
}

impl fmt::Debug for DeckContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeckContext")
            .field("aggregator", &self.aggregator)
            .field("credentials", &self.credentials)
            .field("advance_delay", &self.advance_delay)
            .finish_non_exhaustive()
    }
}
