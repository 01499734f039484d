use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
#[error("failed to open {url}: {reason}")]
pub struct NavigationError {
    pub url: String,
    pub reason: String,
}

/// Opens a URL in a new browsing context.
///
/// Called only for right-swipe commits. Failures are logged by the caller
/// and never block the deck advance.
pub trait NavigationSink: Send + Sync {
    fn open_external(&self, url: &Url) -> Result<(), NavigationError>;
}
