//! Blocking user-dialog contracts (confirmation and alert) and test adapters.

use std::{cell::RefCell, collections::VecDeque, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`DialogService`].
pub type DialogFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for modal confirmation and alert dialogs.
pub trait DialogService {
    /// Asks the user to confirm `message`; resolves `true` only on explicit acceptance.
    fn confirm<'a>(&'a self, message: &'a str) -> DialogFuture<'a, bool>;

    /// Shows a modal alert with `message`.
    fn alert<'a>(&'a self, message: &'a str) -> DialogFuture<'a, ()>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Dialog adapter that declines every confirmation and drops alerts.
pub struct NoopDialogService;

impl DialogService for NoopDialogService {
    fn confirm<'a>(&'a self, _message: &'a str) -> DialogFuture<'a, bool> {
        Box::pin(async { false })
    }

    fn alert<'a>(&'a self, _message: &'a str) -> DialogFuture<'a, ()> {
        Box::pin(async {})
    }
}

#[derive(Debug, Default)]
struct MemoryDialogInner {
    answers: VecDeque<bool>,
    default_answer: bool,
    confirmations: Vec<String>,
    alerts: Vec<String>,
}

#[derive(Debug, Clone, Default)]
/// Scripted dialog adapter that records prompts and alerts.
///
/// Confirmations consume queued answers first and fall back to the default answer
/// (`false` unless changed).
pub struct MemoryDialogService {
    inner: Rc<RefCell<MemoryDialogInner>>,
}

impl MemoryDialogService {
    /// Creates an adapter that answers every confirmation with `answer`.
    pub fn answering(answer: bool) -> Self {
        let service = Self::default();
        service.inner.borrow_mut().default_answer = answer;
        service
    }

    /// Queues a one-shot confirmation answer.
    pub fn queue_answer(&self, answer: bool) {
        self.inner.borrow_mut().answers.push_back(answer);
    }

    /// Confirmation prompts shown so far.
    pub fn confirmations(&self) -> Vec<String> {
        self.inner.borrow().confirmations.clone()
    }

    /// Alerts shown so far.
    pub fn alerts(&self) -> Vec<String> {
        self.inner.borrow().alerts.clone()
    }
}

impl DialogService for MemoryDialogService {
    fn confirm<'a>(&'a self, message: &'a str) -> DialogFuture<'a, bool> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.confirmations.push(message.to_string());
            let default_answer = inner.default_answer;
            inner.answers.pop_front().unwrap_or(default_answer)
        })
    }

    fn alert<'a>(&'a self, message: &'a str) -> DialogFuture<'a, ()> {
        Box::pin(async move {
            self.inner.borrow_mut().alerts.push(message.to_string());
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_dialogs_consume_queued_answers_before_default() {
        let dialogs = MemoryDialogService::answering(true);
        dialogs.queue_answer(false);

        assert!(!block_on(dialogs.confirm("first?")));
        assert!(block_on(dialogs.confirm("second?")));
        block_on(dialogs.alert("done"));

        assert_eq!(dialogs.confirmations(), vec!["first?", "second?"]);
        assert_eq!(dialogs.alerts(), vec!["done"]);
        assert!(!block_on(NoopDialogService.confirm("noop?")));
    }
}
