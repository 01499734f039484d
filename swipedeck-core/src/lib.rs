//! SwipeDeck engine
//!
//! The deck engine behind the SwipeDeck front-ends: it aggregates a Vercel
//! account's projects into an ordered deck, interprets pointer gestures on
//! the front-most card, and advances the deck on swipe commits.
//!
//! Notes
//! - Everything runs on one cooperative event loop; see [`session`] for the
//!   owned session state and the `update` entry point.
//! - Rendering, credentials at rest and opening URLs are collaborators
//!   reached through the traits in [`infra::services`] and
//!   [`infra::credentials`].

pub mod domains;
pub mod error;
pub mod infra;
pub mod session;

pub use error::{ApiError, DeckError, DeckResult, StorageError};
pub use swipedeck_model as model;
