//! The deck session
//!
//! One owned [`Session`] holds the phase, the deck, the gesture machine and
//! the open preview. Every change goes through [`update`] with an explicit
//! [`DeckContext`]; asynchronous work comes back as a [`SessionMessage`] on
//! the same loop. [`DeckRuntime`] wires the loop together.

pub mod context;
pub mod messages;
pub mod runtime;
pub mod state;
pub mod update;

pub use context::{DeckContext, DeckServices};
pub use messages::SessionMessage;
pub use runtime::DeckRuntime;
pub use state::{Session, SessionPhase};
pub use update::update;
