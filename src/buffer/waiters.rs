use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::{DocumentError, Result};

/// Pending text-equality registrations, keyed by the awaited text.
///
/// An entry is removed as soon as the document text equals its key, so a
/// registration fires at most once.
#[derive(Debug, Default)]
pub(crate) struct Waiters {
    pending: HashMap<String, Vec<oneshot::Sender<()>>>,
}

impl Waiters {
    pub(crate) fn register(&mut self, text: String) -> TextMatch {
        self.prune();
        let (tx, rx) = oneshot::channel();
        self.pending.entry(text).or_default().push(tx);
        TextMatch {
            receiver: Some(rx),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Registrations whose future has not been dropped.
    pub(crate) fn live_count(&self) -> usize {
        self.pending
            .values()
            .flatten()
            .filter(|tx| !tx.is_closed())
            .count()
    }

    /// Fire every waiter whose key satisfies `is_current`, in registration
    /// order. Returns how many live waiters were woken.
    pub(crate) fn resolve(&mut self, is_current: impl Fn(&str) -> bool) -> usize {
        self.prune();
        let Some(key) = self.pending.keys().find(|key| is_current(key.as_str())).cloned() else {
            return 0;
        };
        self.pending.remove(&key).map_or(0, |senders| {
            senders
                .into_iter()
                .filter_map(|tx| tx.send(()).ok())
                .count()
        })
    }

    /// Drop senders whose future is gone, and keys left with none.
    fn prune(&mut self) {
        self.pending.retain(|_, senders| {
            senders.retain(|tx| !tx.is_closed());
            !senders.is_empty()
        });
    }
}

/// Completes once the document's text equals the awaited value.
///
/// Runtime-agnostic: any executor can poll it. Resolves to
/// [`DocumentError::Dropped`] if the document goes away first.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct TextMatch {
    receiver: Option<oneshot::Receiver<()>>,
}

impl TextMatch {
    pub(crate) const fn ready() -> Self {
        Self { receiver: None }
    }
}

impl Future for TextMatch {
    type Output = Result<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(receiver) = self.receiver.as_mut() else {
            return Poll::Ready(Ok(()));
        };
        match Pin::new(receiver).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(result) => {
                self.receiver = None;
                Poll::Ready(result.map_err(|_| DocumentError::Dropped))
            }
        }
    }
}
