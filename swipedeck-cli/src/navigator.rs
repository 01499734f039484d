use std::io;

use swipedeck_core::infra::services::{NavigationError, NavigationSink};
use url::Url;

/// Hands URLs to the desktop's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemNavigator;

impl SystemNavigator {
    pub fn new() -> Self {
        Self
    }
}

fn navigation_error(url: &Url, err: io::Error) -> NavigationError {
    NavigationError {
        url: url.to_string(),
        reason: err.to_string(),
    }
}

impl NavigationSink for SystemNavigator {
    fn open_external(&self, url: &Url) -> Result<(), NavigationError> {
        open::that_detached(url.as_str()).map_err(|e| navigation_error(url, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opener_failure_names_the_url() {
        let url = Url::parse("https://docs.vercel.app").unwrap();
        let err = navigation_error(
            &url,
            io::Error::new(io::ErrorKind::NotFound, "no browser found"),
        );
        assert_eq!(err.url, "https://docs.vercel.app/");
        assert_eq!(
            err.to_string(),
            "failed to open https://docs.vercel.app/: no browser found"
        );
    }
}
