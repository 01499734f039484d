use swipedeck_model::{AccentColor, Project};

use crate::domains::deck::DeckController;
use crate::domains::gesture::{GestureMachine, GestureThresholds};
use crate::infra::credentials::Credential;
use crate::infra::scheduler::TaskHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// No credential, or the last one was rejected
    Unauthenticated { error: Option<String> },
    Loading,
    /// The deck has at least one card
    Ready,
    /// The account has no projects
    Empty,
    /// The project list could not be fetched
    Failed { message: String },
}

impl SessionPhase {
    /// Re-running the pipeline with the held credential can help.
    pub fn can_retry(&self) -> bool {
        matches!(self, SessionPhase::Empty | SessionPhase::Failed { .. })
    }

    /// The way forward is a new token; after a rejection this is the
    /// retry affordance.
    pub fn needs_credential(&self) -> bool {
        matches!(self, SessionPhase::Unauthenticated { .. })
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Unauthenticated { error: None }
    }
}

#[derive(Debug)]
pub struct Session {
    pub(crate) phase: SessionPhase,
    pub(crate) deck: DeckController,
    pub(crate) gesture: GestureMachine,
    pub(crate) preview: Option<Project>,
    pub(crate) credential: Option<Credential>,
    /// Bumped per load so results of superseded loads are dropped
    pub(crate) generation: u64,
    pub(crate) load_task: Option<TaskHandle>,
}

impl Session {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            phase: SessionPhase::default(),
            deck: DeckController::new(),
            gesture: GestureMachine::new(thresholds),
            preview: None,
            credential: None,
            generation: 0,
            load_task: None,
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn deck(&self) -> &DeckController {
        &self.deck
    }

    pub fn gesture(&self) -> &GestureMachine {
        &self.gesture
    }

    pub fn preview(&self) -> Option<&Project> {
        self.preview.as_ref()
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub(crate) fn cancel_load(&mut self) {
        if let Some(task) = self.load_task.take() {
            task.cancel();
        }
    }

    pub fn theme_color(&self) -> AccentColor {
        self.deck.theme_color()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GestureThresholds::default())
    }
}
