//! Shared stubs for driving a `DeckRuntime` end to end
//!
//! The runtime only sees the collaborator traits, so these stand in for the
//! platform API, the URL opener and the renderer and record what they saw.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use swipedeck_core::infra::services::{
    NavigationError, NavigationSink, PresentationEvent, PresentationSink,
    ProjectSource,
};
use swipedeck_core::infra::{Credential, DeckConfig, MemoryCredentialStore};
use swipedeck_core::model::{DomainRecord, ProjectId, RawProject};
use swipedeck_core::session::{DeckRuntime, DeckServices};
use swipedeck_core::ApiError;
use url::Url;

pub const TOKEN: &str = "test-token";

pub fn credential() -> Credential {
    Credential::parse(TOKEN).unwrap()
}

pub fn raw(id: &str, name: &str, updated_at: i64) -> RawProject {
    RawProject {
        id: ProjectId::new(id),
        name: name.to_string(),
        framework: None,
        updated_at,
    }
}

/// Canned platform responses keyed by project id.
#[derive(Debug, Default)]
pub struct StubSource {
    projects: Mutex<Option<Result<Vec<RawProject>, ApiError>>>,
    domains: Mutex<HashMap<String, Result<Vec<DomainRecord>, ApiError>>>,
    project_fetches: AtomicUsize,
}

impl StubSource {
    pub fn with_projects(projects: Vec<RawProject>) -> Self {
        let stub = Self::default();
        stub.set_projects(Ok(projects));
        stub
    }

    pub fn failing(error: ApiError) -> Self {
        let stub = Self::default();
        stub.set_projects(Err(error));
        stub
    }

    pub fn set_projects(&self, response: Result<Vec<RawProject>, ApiError>) {
        *self.projects.lock().unwrap() = Some(response);
    }

    pub fn with_domain(self, id: &str, domain: &str) -> Self {
        self.domains.lock().unwrap().insert(
            id.to_string(),
            Ok(vec![DomainRecord {
                name: domain.to_string(),
            }]),
        );
        self
    }

    pub fn with_domain_error(self, id: &str, error: ApiError) -> Self {
        self.domains
            .lock()
            .unwrap()
            .insert(id.to_string(), Err(error));
        self
    }

    pub fn project_fetches(&self) -> usize {
        self.project_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectSource for StubSource {
    async fn fetch_projects(
        &self,
        credential: &Credential,
    ) -> Result<Vec<RawProject>, ApiError> {
        assert_eq!(credential.expose(), TOKEN);
        self.project_fetches.fetch_add(1, Ordering::SeqCst);
        self.projects
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_domains(
        &self,
        _credential: &Credential,
        project: &ProjectId,
    ) -> Result<Vec<DomainRecord>, ApiError> {
        self.domains
            .lock()
            .unwrap()
            .get(project.as_str())
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<PresentationEvent>>,
}

impl RecordingPresenter {
    pub fn events(&self) -> Vec<PresentationEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&PresentationEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| matches(e)).count()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl PresentationSink for RecordingPresenter {
    fn present(&self, event: PresentationEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    opened: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl NavigationSink for RecordingNavigator {
    fn open_external(&self, url: &Url) -> Result<(), NavigationError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

pub struct Harness {
    pub runtime: DeckRuntime,
    pub source: Arc<StubSource>,
    pub store: Arc<MemoryCredentialStore>,
    pub presenter: Arc<RecordingPresenter>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Harness {
    pub fn new(source: StubSource) -> Self {
        Self::with_store(source, MemoryCredentialStore::new())
    }

    pub fn with_store(source: StubSource, store: MemoryCredentialStore) -> Self {
        let source = Arc::new(source);
        let store = Arc::new(store);
        let presenter = Arc::new(RecordingPresenter::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let services = DeckServices {
            source: source.clone(),
            credentials: store.clone(),
            navigator: navigator.clone(),
            presenter: presenter.clone(),
        };
        let runtime = DeckRuntime::new(services, &DeckConfig::default())
            .expect("default config is valid");
        Self {
            runtime,
            source,
            store,
            presenter,
            navigator,
        }
    }

    /// Run the loop for `window` of (virtual) time.
    pub async fn settle(&mut self, window: Duration) {
        let deadline = tokio::time::Instant::now() + window;
        while tokio::time::timeout_at(deadline, self.runtime.step())
            .await
            .is_ok()
        {}
    }

    /// Connect with [`TOKEN`] and wait for the pipeline to finish.
    pub async fn connect(&mut self) {
        self.runtime
            .dispatch(swipedeck_core::session::SessionMessage::Connect(
                credential(),
            ));
        self.settle(Duration::from_millis(10)).await;
    }
}
