//! Page navigation.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::AppError;

/// A top-level page of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    About,
    Checkout,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::About, Page::Checkout];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Checkout => "checkout",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(Self::Home),
            "about" => Ok(Self::About),
            "checkout" => Ok(Self::Checkout),
            other => Err(AppError::UnknownPage(other.to_string())),
        }
    }
}

/// A scroll the rendering surface should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRequest {
    /// Smoothly scroll back to the top of the page.
    TopSmooth,
}

/// The surface pages are displayed on.
pub trait Viewport: Send {
    fn scroll(&mut self, request: ScrollRequest);
}

/// A viewport with nothing to scroll.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopViewport;

impl Viewport for NoopViewport {
    fn scroll(&mut self, _request: ScrollRequest) {}
}

/// A viewport that remembers every scroll request.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingViewport {
    requests: Arc<Mutex<Vec<ScrollRequest>>>,
}

impl RecordingViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ScrollRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Viewport for RecordingViewport {
    fn scroll(&mut self, request: ScrollRequest) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
    }
}

/// Tracks the current page.
///
/// Every page is reachable from every other, and each transition, including
/// one to the page already shown, scrolls the viewport back to the top.
pub struct Navigator {
    current: Page,
    viewport: Box<dyn Viewport>,
}

impl Navigator {
    /// Start on the home page.
    pub fn new(viewport: Box<dyn Viewport>) -> Self {
        Self {
            current: Page::Home,
            viewport,
        }
    }

    pub fn current(&self) -> Page {
        self.current
    }

    /// Show `target`, returning the page that was showing before.
    pub fn navigate(&mut self, target: Page) -> Page {
        let previous = std::mem::replace(&mut self.current, target);
        self.viewport.scroll(ScrollRequest::TopSmooth);
        tracing::debug!(from = %previous, to = %target, "navigated");
        previous
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_parsing() {
        for page in Page::ALL {
            assert_eq!(page.as_str().parse::<Page>().unwrap(), page);
        }
        assert_eq!(" Checkout ".parse::<Page>().unwrap(), Page::Checkout);
        assert!(matches!("cart".parse::<Page>(), Err(AppError::UnknownPage(_))));
    }

    #[test]
    fn test_starts_home() {
        let navigator = Navigator::new(Box::new(NoopViewport));
        assert_eq!(navigator.current(), Page::Home);
    }

    #[test]
    fn test_every_transition_scrolls() {
        let viewport = RecordingViewport::new();
        let mut navigator = Navigator::new(Box::new(viewport.clone()));

        assert_eq!(navigator.navigate(Page::Checkout), Page::Home);
        assert_eq!(navigator.navigate(Page::About), Page::Checkout);
        assert_eq!(navigator.navigate(Page::About), Page::About);

        assert_eq!(navigator.current(), Page::About);
        assert_eq!(viewport.requests(), vec![ScrollRequest::TopSmooth; 3]);
    }
}
