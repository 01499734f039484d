//! Event loop host for one [`Session`]

use tokio::sync::mpsc;

use super::context::{DeckContext, DeckServices};
use super::messages::SessionMessage;
use super::state::Session;
use super::update::update;
use crate::domains::gesture::{GestureInput, GestureThresholds};
use crate::error::DeckResult;
use crate::infra::config::DeckConfig;
use crate::infra::scheduler::Scheduler;

/// Owns the session, its context and the receiving end of the loop.
///
/// Must be driven from inside a tokio runtime: timers and the pipeline are
/// spawned onto it.
#[derive(Debug)]
pub struct DeckRuntime {
    session: Session,
    ctx: DeckContext,
    rx: mpsc::UnboundedReceiver<SessionMessage>,
}

impl DeckRuntime {
    pub fn new(services: DeckServices, config: &DeckConfig) -> DeckResult<Self> {
        let (scheduler, rx) = Scheduler::channel();
        let ctx = DeckContext::new(services, config, scheduler)?;
        Ok(Self {
            session: Session::new(GestureThresholds::from(config)),
            ctx,
            rx,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn context(&self) -> &DeckContext {
        &self.ctx
    }

    /// Handle for posting messages from outside the loop.
    pub fn sender(&self) -> Scheduler<SessionMessage> {
        self.ctx.scheduler.clone()
    }

    /// Apply `message` immediately.
    pub fn dispatch(&mut self, message: SessionMessage) {
        update(&mut self.session, &self.ctx, message);
    }

    pub fn gesture(&mut self, input: GestureInput) {
        self.dispatch(SessionMessage::Gesture(input));
    }

    /// Wait for the next queued message and apply it. Cancel-safe.
    ///
    /// Returns `false` once the queue is closed.
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(message) => {
                update(&mut self.session, &self.ctx, message);
                true
            }
            None => false,
        }
    }

    /// Apply every message that is already queued, returning how many ran.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(message) = self.rx.try_recv() {
            update(&mut self.session, &self.ctx, message);
            handled += 1;
        }
        handled
    }
}
