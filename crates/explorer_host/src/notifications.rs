//! Toast notification contracts and adapters.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`NotificationService`].
pub type NotificationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Visual tone of a toast.
pub enum NoticeLevel {
    /// The operation succeeded.
    Success,
    /// The operation failed or input was rejected.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A toast message.
pub struct Notice {
    /// Tone.
    pub level: NoticeLevel,
    /// Bold first line.
    pub title: String,
    /// Secondary line.
    pub body: String,
}

impl Notice {
    /// Success toast.
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Failure toast.
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Host service for transient user-visible notices.
pub trait NotificationService {
    /// Shows a notice.
    fn notify<'a>(&'a self, notice: &'a Notice) -> NotificationFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op notification service for unsupported targets.
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn notify<'a>(&'a self, _notice: &'a Notice) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Recording notification service for tests.
pub struct MemoryNotificationService {
    notices: Rc<RefCell<Vec<Notice>>>,
}

impl MemoryNotificationService {
    /// Notices shown so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

impl NotificationService for MemoryNotificationService {
    fn notify<'a>(&'a self, notice: &'a Notice) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.notices.borrow_mut().push(notice.clone());
            Ok(())
        })
    }
}
