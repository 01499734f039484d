use swipedeck_model::Project;

use crate::domains::deck::CardPair;
use crate::domains::gesture::{DragFeedback, SwipeDirection};
use crate::session::SessionPhase;

/// Everything the rendering layer needs to follow the session.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationEvent {
    /// The session moved between unauthenticated/loading/ready/empty/failed
    Phase(SessionPhase),
    /// Cards to render after a deck change
    Cards(CardPair),
    /// Live drag sample for the front card
    Drag(DragFeedback),
    /// Drag released below the commit thresholds; return to neutral pose
    SnapBack,
    /// A swipe was committed; the front card should fly out
    Exiting(SwipeDirection),
    /// Pointer-up without drag or long-press
    Tapped(Project),
    PreviewOpened(Project),
    PreviewClosed,
}

pub trait PresentationSink: Send + Sync {
    fn present(&self, event: PresentationEvent);
}
