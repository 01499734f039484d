pub mod feedback;
pub mod machine;
pub mod messages;

// Re-export primary types for convenience
pub use feedback::DragFeedback;
pub use machine::{
    GestureMachine, GestureOutcome, GesturePhase, GestureSession,
    GestureThresholds, Release, SessionToken,
};
pub use messages::{CardSlot, GestureInput, PointerEvent, SwipeDirection};
