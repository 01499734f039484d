//! Deck domains
//!
//! - `catalog`: turning the platform's project records into deck cards
//! - `gesture`: pointer interpretation for the front-most card
//! - `deck`: the circular index and swipe commits

pub mod catalog;
pub mod deck;
pub mod gesture;
