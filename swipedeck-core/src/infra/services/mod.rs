//! Collaborator traits the session talks to
//!
//! Provides abstraction over the platform API, the host's URL opener and
//! the rendering layer so the engine can be driven by stubs in tests.

pub mod navigation;
pub mod presentation;
pub mod source;

pub use navigation::{NavigationError, NavigationSink};
pub use presentation::{PresentationEvent, PresentationSink};
pub use source::ProjectSource;
