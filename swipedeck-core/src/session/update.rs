//! Session update handlers
//!
//! `update` is the only place session state changes. Handlers never block:
//! timers and the aggregation pipeline are handed to the scheduler and come
//! back as messages.

use std::sync::Arc;

use log::{debug, info, trace, warn};

use super::context::DeckContext;
use super::messages::SessionMessage;
use super::state::{Session, SessionPhase};
use crate::domains::deck::CommitId;
use crate::domains::gesture::{
    CardSlot, GestureInput, GestureOutcome, PointerEvent, Release,
    SessionToken, SwipeDirection,
};
use crate::error::{DeckError, DeckResult};
use crate::infra::credentials::Credential;
use crate::infra::services::PresentationEvent;
use swipedeck_model::Project;

pub fn update(session: &mut Session, ctx: &DeckContext, message: SessionMessage) {
    trace!("[Session] {}", message.name());
    match message {
        SessionMessage::Restore => handle_restore(session, ctx),
        SessionMessage::Connect(credential) => {
            start_load(session, ctx, credential)
        }
        SessionMessage::Retry => handle_retry(session, ctx),
        SessionMessage::Disconnect => handle_disconnect(session, ctx),
        SessionMessage::Loaded {
            generation,
            credential,
            result,
        } => handle_loaded(session, ctx, generation, credential, result),
        SessionMessage::Gesture(input) => handle_gesture(session, ctx, input),
        SessionMessage::LongPressElapsed(token) => {
            handle_long_press(session, ctx, token)
        }
        SessionMessage::AdvanceDue(commit) => {
            handle_advance(session, ctx, commit)
        }
        SessionMessage::ClosePreview => handle_close_preview(session, ctx),
    }
}

fn set_phase(session: &mut Session, ctx: &DeckContext, phase: SessionPhase) {
    if session.phase == phase {
        return;
    }
    debug!("[Session] Phase {:?} -> {:?}", session.phase, phase);
    session.phase = phase.clone();
    ctx.presenter.present(PresentationEvent::Phase(phase));
}

fn present_cards(session: &Session, ctx: &DeckContext) {
    if let Some(cards) = session.deck.cards() {
        ctx.presenter.present(PresentationEvent::Cards(cards));
    }
}

fn close_preview(session: &mut Session, ctx: &DeckContext) {
    if session.preview.take().is_some() {
        ctx.presenter.present(PresentationEvent::PreviewClosed);
    }
}

fn handle_restore(session: &mut Session, ctx: &DeckContext) {
    match ctx.credentials.load() {
        Ok(Some(credential)) => {
            info!("[Session] Restoring stored credential");
            start_load(session, ctx, credential);
        }
        Ok(None) => {
            set_phase(session, ctx, SessionPhase::Unauthenticated { error: None })
        }
        Err(e) => {
            warn!("[Session] Failed to load stored credential: {}", e);
            let message = DeckError::from(e).user_message();
            set_phase(
                session,
                ctx,
                SessionPhase::Unauthenticated {
                    error: Some(message),
                },
            );
        }
    }
}

fn handle_retry(session: &mut Session, ctx: &DeckContext) {
    if !session.phase.can_retry() {
        debug!("[Session] Retry ignored in {:?}", session.phase);
        return;
    }
    match session.credential.clone() {
        Some(credential) => start_load(session, ctx, credential),
        None => debug!("[Session] Retry needs a new credential"),
    }
}

fn start_load(session: &mut Session, ctx: &DeckContext, credential: Credential) {
    session.cancel_load();
    session.generation += 1;
    session.credential = Some(credential.clone());
    session.gesture.reset();
    close_preview(session, ctx);
    set_phase(session, ctx, SessionPhase::Loading);

    let generation = session.generation;
    let aggregator = ctx.aggregator.clone();
    let store = Arc::clone(&ctx.credentials);
    let task = ctx.scheduler.perform(async move {
        let result = aggregator.load_deck(&credential, store.as_ref()).await;
        SessionMessage::Loaded {
            generation,
            credential,
            result,
        }
    });
    session.load_task = Some(task);
}

fn handle_loaded(
    session: &mut Session,
    ctx: &DeckContext,
    generation: u64,
    credential: Credential,
    result: DeckResult<Vec<Project>>,
) {
    if generation != session.generation {
        debug!(
            "[Session] Dropping result of superseded load {} (current {})",
            generation, session.generation
        );
        return;
    }
    session.load_task = None;

    match result {
        Ok(projects) if projects.is_empty() => {
            session.credential = Some(credential);
            session.deck.clear();
            set_phase(session, ctx, SessionPhase::Empty);
        }
        Ok(projects) => {
            session.credential = Some(credential);
            session.deck.initialize(projects);
            session.gesture.reset();
            set_phase(session, ctx, SessionPhase::Ready);
            present_cards(session, ctx);
        }
        Err(DeckError::Unauthorized) => {
            session.credential = None;
            session.deck.clear();
            set_phase(
                session,
                ctx,
                SessionPhase::Unauthenticated {
                    error: Some(DeckError::Unauthorized.user_message()),
                },
            );
        }
        Err(e) => {
            warn!("[Session] Load failed: {}", e);
            set_phase(
                session,
                ctx,
                SessionPhase::Failed {
                    message: e.user_message(),
                },
            );
        }
    }
}

fn handle_disconnect(session: &mut Session, ctx: &DeckContext) {
    // A load still in flight belongs to the old credential.
    session.cancel_load();
    session.generation += 1;
    if let Err(e) = ctx.credentials.clear() {
        warn!("[Session] Failed to clear stored credential: {}", e);
    }
    session.credential = None;
    session.deck.clear();
    session.gesture.reset();
    close_preview(session, ctx);
    info!("[Session] Disconnected");
    set_phase(session, ctx, SessionPhase::Unauthenticated { error: None });
}

fn handle_gesture(session: &mut Session, ctx: &DeckContext, input: GestureInput) {
    if session.phase != SessionPhase::Ready {
        return;
    }
    if input.slot == CardSlot::Back {
        trace!("[Gesture] Ignoring input on background card");
        return;
    }

    let outcome = match input.event {
        PointerEvent::Down => {
            if session.preview.is_some() {
                trace!("[Gesture] Preview open; ignoring press");
                return;
            }
            let now = tokio::time::Instant::now().into_std();
            session.gesture.pointer_down(now)
        }
        PointerEvent::Up => session.gesture.pointer_up(),
        PointerEvent::Leave => session.gesture.pointer_leave(),
        PointerEvent::DragStart => session.gesture.drag_start(),
        PointerEvent::DragMove {
            offset_x,
            velocity_x,
        } => session.gesture.drag_move(offset_x, velocity_x),
        PointerEvent::DragEnd {
            offset_x,
            velocity_x,
        } => session.gesture.drag_end(offset_x, velocity_x),
    };
    apply_outcome(session, ctx, outcome);
}

fn apply_outcome(
    session: &mut Session,
    ctx: &DeckContext,
    outcome: GestureOutcome,
) {
    match outcome {
        GestureOutcome::Ignored | GestureOutcome::Ended => {}
        GestureOutcome::ArmLongPress { token, delay } => {
            let timer = ctx
                .scheduler
                .schedule(delay, SessionMessage::LongPressElapsed(token));
            session.gesture.attach_long_press_timer(token, timer);
        }
        GestureOutcome::LongPress => open_preview(session, ctx),
        GestureOutcome::Tap => {
            if let Ok(project) = session.deck.current() {
                ctx.presenter
                    .present(PresentationEvent::Tapped(project.clone()));
            }
        }
        GestureOutcome::Drag(feedback) => {
            ctx.presenter.present(PresentationEvent::Drag(feedback));
        }
        GestureOutcome::Release(Release::Cancelled) => {
            ctx.presenter.present(PresentationEvent::SnapBack);
        }
        GestureOutcome::Release(Release::Swipe(direction)) => {
            commit(session, ctx, direction)
        }
    }
}

fn commit(session: &mut Session, ctx: &DeckContext, direction: SwipeDirection) {
    match session.deck.commit_swipe(direction, ctx.navigator.as_ref()) {
        Ok(commit) => {
            ctx.presenter.present(PresentationEvent::Exiting(direction));
            let handle = ctx
                .scheduler
                .schedule(ctx.advance_delay, SessionMessage::AdvanceDue(commit));
            session.deck.track_advance(commit, handle);
        }
        Err(e) => {
            warn!("[Session] Swipe commit rejected: {}", e);
            session.gesture.reset();
        }
    }
}

fn handle_long_press(
    session: &mut Session,
    ctx: &DeckContext,
    token: SessionToken,
) {
    let outcome = session.gesture.long_press_elapsed(token);
    apply_outcome(session, ctx, outcome);
}

fn open_preview(session: &mut Session, ctx: &DeckContext) {
    let Ok(project) = session.deck.current() else {
        return;
    };
    let project = project.clone();
    debug!("[Session] Opening preview for {}", project.name());
    session.preview = Some(project.clone());
    ctx.presenter.present(PresentationEvent::PreviewOpened(project));
}

fn handle_advance(session: &mut Session, ctx: &DeckContext, commit: CommitId) {
    if session.deck.apply_advance(commit) {
        session.gesture.reset();
        present_cards(session, ctx);
    }
}

fn handle_close_preview(session: &mut Session, ctx: &DeckContext) {
    close_preview(session, ctx);
}
