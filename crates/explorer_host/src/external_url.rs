//! URL navigation host-service contracts.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`ExternalUrlService`].
pub type ExternalUrlFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Browsing context a URL was sent to.
pub enum UrlTarget {
    /// A new browsing context (tab/window).
    NewContext,
    /// The current browsing context.
    CurrentContext,
}

/// Host service for leaving the explorer for a resolved URL.
pub trait ExternalUrlService {
    /// Opens `url` in a new browsing context.
    fn open_url<'a>(&'a self, url: &'a str) -> ExternalUrlFuture<'a, Result<(), String>>;

    /// Navigates the current browsing context to `url` (downloads stay on the page).
    fn navigate<'a>(&'a self, url: &'a str) -> ExternalUrlFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op URL service for unsupported targets.
pub struct NoopExternalUrlService;

impl ExternalUrlService for NoopExternalUrlService {
    fn open_url<'a>(&'a self, _url: &'a str) -> ExternalUrlFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn navigate<'a>(&'a self, _url: &'a str) -> ExternalUrlFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Recording URL service for tests.
pub struct MemoryExternalUrlService {
    visits: Rc<RefCell<Vec<(UrlTarget, String)>>>,
}

impl MemoryExternalUrlService {
    /// URLs visited so far, in order.
    pub fn visits(&self) -> Vec<(UrlTarget, String)> {
        self.visits.borrow().clone()
    }
}

impl ExternalUrlService for MemoryExternalUrlService {
    fn open_url<'a>(&'a self, url: &'a str) -> ExternalUrlFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.visits
                .borrow_mut()
                .push((UrlTarget::NewContext, url.to_string()));
            Ok(())
        })
    }

    fn navigate<'a>(&'a self, url: &'a str) -> ExternalUrlFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.visits
                .borrow_mut()
                .push((UrlTarget::CurrentContext, url.to_string()));
            Ok(())
        })
    }
}
