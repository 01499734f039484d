//! Project catalog: fetch, resolve, color and order the deck's cards.

pub mod color;
pub mod pipeline;
pub mod resolver;

pub use color::derive_accent;
pub use pipeline::Aggregator;
pub use resolver::{Resolution, UrlResolver};
