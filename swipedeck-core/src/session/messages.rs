use swipedeck_model::Project;

use crate::domains::deck::CommitId;
use crate::domains::gesture::{GestureInput, SessionToken};
use crate::error::DeckResult;
use crate::infra::credentials::Credential;

#[derive(Debug)]
pub enum SessionMessage {
    // Credential lifecycle
    /// Load the stored credential at startup
    Restore,
    Connect(Credential),
    /// Re-run the pipeline with the last credential
    Retry,
    Disconnect,

    // Pipeline
    Loaded {
        generation: u64,
        credential: Credential,
        result: DeckResult<Vec<Project>>,
    },

    // Card interaction
    Gesture(GestureInput),
    LongPressElapsed(SessionToken),
    AdvanceDue(CommitId),
    ClosePreview,
}

impl SessionMessage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Restore => "Session::Restore",
            Self::Connect(_) => "Session::Connect",
            Self::Retry => "Session::Retry",
            Self::Disconnect => "Session::Disconnect",
            Self::Loaded { .. } => "Session::Loaded",
            Self::Gesture(_) => "Session::Gesture",
            Self::LongPressElapsed(_) => "Session::LongPressElapsed",
            Self::AdvanceDue(_) => "Session::AdvanceDue",
            Self::ClosePreview => "Session::ClosePreview",
        }
    }
}
