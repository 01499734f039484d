//! Credential lifecycle and deck loading through the runtime

mod common;

use std::time::Duration;

use common::{Harness, StubSource, credential, raw};
use swipedeck_core::ApiError;
use swipedeck_core::infra::services::PresentationEvent;
use swipedeck_core::infra::{CredentialStore, MemoryCredentialStore};
use swipedeck_core::model::AccentColor;
use swipedeck_core::session::{SessionMessage, SessionPhase};

fn names(harness: &Harness) -> Vec<String> {
    harness
        .runtime
        .session()
        .deck()
        .items()
        .iter()
        .map(|p| p.name().to_string())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn connect_loads_deck_newest_first() {
    let source = StubSource::with_projects(vec![
        raw("prj_a", "alpha", 100),
        raw("prj_b", "beta", 300),
        raw("prj_c", "gamma", 200),
    ])
    .with_domain("prj_c", "gamma.example.com");
    let mut harness = Harness::new(source);

    harness.connect().await;

    let session = harness.runtime.session();
    assert_eq!(*session.phase(), SessionPhase::Ready);
    assert_eq!(names(&harness), ["beta", "gamma", "alpha"]);
    assert_eq!(
        harness.runtime.session().deck().items()[1].url().as_str(),
        "https://gamma.example.com/"
    );
    assert_eq!(
        harness.store.load().unwrap(),
        Some(credential()),
        "successful load persists the credential"
    );

    let events = harness.presenter.events();
    assert_eq!(events[0], PresentationEvent::Phase(SessionPhase::Loading));
    assert_eq!(events[1], PresentationEvent::Phase(SessionPhase::Ready));
    match &events[2] {
        PresentationEvent::Cards(cards) => {
            assert_eq!(cards.current.name(), "beta");
            assert_eq!(cards.next.as_ref().map(|p| p.name()), Some("gamma"));
        }
        other => panic!("expected Cards, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn unauthorized_clears_credential_and_leaves_deck_uninitialized() {
    let store = MemoryCredentialStore::with_credential(credential());
    let mut harness = Harness::with_store(
        StubSource::failing(ApiError::Unauthorized { status: 401 }),
        store,
    );

    harness.runtime.dispatch(SessionMessage::Restore);
    harness.settle(Duration::from_millis(10)).await;

    let session = harness.runtime.session();
    assert_eq!(
        *session.phase(),
        SessionPhase::Unauthenticated {
            error: Some("Invalid Token or Unauthorized.".into())
        }
    );
    assert!(session.deck().is_empty());
    assert!(!session.has_credential());
    assert_eq!(harness.store.load().unwrap(), None);
    assert_eq!(session.theme_color(), AccentColor::BACKDROP);
}

#[tokio::test(start_paused = true)]
async fn rejected_token_is_replaced_by_connecting_again() {
    let mut harness =
        Harness::new(StubSource::failing(ApiError::Unauthorized { status: 403 }));
    harness.connect().await;

    let phase = harness.runtime.session().phase().clone();
    assert!(!phase.can_retry());
    assert!(phase.needs_credential());

    harness.runtime.dispatch(SessionMessage::Retry);
    harness.settle(Duration::from_millis(10)).await;
    assert_eq!(*harness.runtime.session().phase(), phase);
    assert_eq!(harness.source.project_fetches(), 1);

    harness
        .source
        .set_projects(Ok(vec![raw("prj_a", "alpha", 1)]));
    harness.connect().await;
    assert_eq!(*harness.runtime.session().phase(), SessionPhase::Ready);
    assert_eq!(harness.source.project_fetches(), 2);
}

#[tokio::test(start_paused = true)]
async fn transport_failure_can_be_retried() {
    let mut harness = Harness::new(StubSource::failing(ApiError::Status {
        status: 500,
        body: "boom".into(),
    }));

    harness.connect().await;
    assert_eq!(
        *harness.runtime.session().phase(),
        SessionPhase::Failed {
            message: "Failed to fetch projects (Status: 500)".into()
        }
    );
    assert_eq!(harness.store.load().unwrap(), None);

    harness
        .source
        .set_projects(Ok(vec![raw("prj_a", "alpha", 1)]));
    harness.runtime.dispatch(SessionMessage::Retry);
    harness.settle(Duration::from_millis(10)).await;

    assert_eq!(*harness.runtime.session().phase(), SessionPhase::Ready);
    assert_eq!(harness.source.project_fetches(), 2);
}

#[tokio::test(start_paused = true)]
async fn network_failure_uses_generic_message() {
    let mut harness =
        Harness::new(StubSource::failing(ApiError::Network("refused".into())));
    harness.connect().await;

    match harness.runtime.session().phase() {
        SessionPhase::Failed { message } => {
            assert!(message.starts_with("Network Error"), "{message}");
        }
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn empty_account_is_a_retryable_state() {
    let mut harness = Harness::new(StubSource::with_projects(vec![]));
    harness.connect().await;

    let session = harness.runtime.session();
    assert_eq!(*session.phase(), SessionPhase::Empty);
    assert!(session.phase().can_retry());
    assert!(session.deck().cards().is_none());
    assert_eq!(
        harness.presenter.count(|e| matches!(e, PresentationEvent::Cards(_))),
        0
    );
}

#[tokio::test(start_paused = true)]
async fn restore_without_stored_credential_stays_unauthenticated() {
    let mut harness = Harness::new(StubSource::default());
    harness.runtime.dispatch(SessionMessage::Restore);
    harness.settle(Duration::from_millis(10)).await;

    assert_eq!(
        *harness.runtime.session().phase(),
        SessionPhase::Unauthenticated { error: None }
    );
    assert_eq!(harness.source.project_fetches(), 0);
}

#[tokio::test(start_paused = true)]
async fn disconnect_clears_everything() {
    let mut harness =
        Harness::new(StubSource::with_projects(vec![raw("prj_a", "alpha", 1)]));
    harness.connect().await;
    assert!(harness.store.load().unwrap().is_some());

    harness.runtime.dispatch(SessionMessage::Disconnect);

    let session = harness.runtime.session();
    assert_eq!(
        *session.phase(),
        SessionPhase::Unauthenticated { error: None }
    );
    assert!(session.deck().is_empty());
    assert!(!session.has_credential());
    assert_eq!(harness.store.load().unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn load_finishing_after_disconnect_is_dropped() {
    let mut harness =
        Harness::new(StubSource::with_projects(vec![raw("prj_a", "alpha", 1)]));
    harness
        .runtime
        .dispatch(SessionMessage::Connect(credential()));
    harness.runtime.dispatch(SessionMessage::Disconnect);
    harness.settle(Duration::from_millis(10)).await;

    let session = harness.runtime.session();
    assert_eq!(
        *session.phase(),
        SessionPhase::Unauthenticated { error: None }
    );
    assert!(session.deck().is_empty());
    assert_eq!(harness.store.load().unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn degraded_projects_get_fallback_url_and_neutral_color() {
    let source = StubSource::with_projects(vec![
        raw("prj_1", "Foo", 3),
        raw("prj_2", "Bar", 2),
        raw("prj_3", "Baz", 1),
    ])
    .with_domain("prj_1", "foo.example.com")
    .with_domain_error("prj_3", ApiError::Timeout);
    let mut harness = Harness::new(source);
    harness.connect().await;

    let items = harness.runtime.session().deck().items().to_vec();
    assert_eq!(items.len(), 3);

    assert_eq!(items[0].url().as_str(), "https://foo.example.com/");
    assert_ne!(items[0].accent_color(), AccentColor::NEUTRAL);

    assert_eq!(items[1].url().as_str(), "https://bar.vercel.app/");
    assert_ne!(items[1].accent_color(), AccentColor::NEUTRAL);

    assert_eq!(items[2].url().as_str(), "https://baz.vercel.app/");
    assert_eq!(items[2].accent_color(), AccentColor::NEUTRAL);
    assert_eq!(items[2].description(), "Could not resolve custom domains.");
}
