//! Deck state: the ordered cards and the circular index over them.

pub mod controller;

pub use controller::{CardPair, CommitId, DeckController};
