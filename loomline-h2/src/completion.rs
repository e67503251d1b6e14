//! Asynchronous completion token for submitted writes.
//!
//! A frame handed to the encoder completes later, off the submitting call
//! stack. [`WriteCompletion`] is the caller's handle on that outcome;
//! [`WriteSignal`] is the encoder's side of the pair, resolved exactly once
//! when the frame is flushed or fails.
//!
//! Single-threaded-per-connection model: both halves live on the
//! connection's execution context (`Rc`, not `Arc`). Cancellation is an
//! explicit operation on the completion and never retracts a frame already
//! handed to the encoder.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::error::WriteError;

#[derive(Debug)]
enum State {
    Pending,
    Ready(Result<(), WriteError>),
}

#[derive(Debug)]
struct Shared {
    state: State,
    waker: Option<Waker>,
}

impl Shared {
    /// First resolution wins; later ones are no-ops.
    fn resolve(&mut self, result: Result<(), WriteError>) {
        if matches!(self.state, State::Pending) {
            self.state = State::Ready(result);
            if let Some(waker) = self.waker.take() {
                waker.wake();
            }
        }
    }
}

/// Caller's handle on the outcome of a submitted write.
///
/// Resolves once the encoder flushes the frame or fails. Dropping the
/// handle does not affect the write.
#[derive(Debug)]
pub struct WriteCompletion {
    shared: Rc<RefCell<Shared>>,
}

/// Encoder's side of a pending write: resolve with [`complete`](Self::complete)
/// or [`fail`](Self::fail). Dropping an unresolved signal marks the write
/// [`WriteError::Abandoned`].
pub struct WriteSignal {
    shared: Rc<RefCell<Shared>>,
    resolved: bool,
}

impl WriteCompletion {
    /// A pending completion and the signal that resolves it.
    pub fn pending() -> (WriteSignal, WriteCompletion) {
        let shared = Rc::new(RefCell::new(Shared {
            state: State::Pending,
            waker: None,
        }));
        (
            WriteSignal {
                shared: Rc::clone(&shared),
                resolved: false,
            },
            WriteCompletion { shared },
        )
    }

    /// An already-successful completion (write accepted synchronously).
    pub fn completed() -> WriteCompletion {
        WriteCompletion {
            shared: Rc::new(RefCell::new(Shared {
                state: State::Ready(Ok(())),
                waker: None,
            })),
        }
    }

    /// An already-failed completion.
    pub fn failed(err: WriteError) -> WriteCompletion {
        WriteCompletion {
            shared: Rc::new(RefCell::new(Shared {
                state: State::Ready(Err(err)),
                waker: None,
            })),
        }
    }

    /// Cancel the pending write from the caller's side.
    ///
    /// The completion resolves to [`WriteError::Cancelled`]. A frame already
    /// submitted to the encoder is not retracted, and a later resolution by
    /// the encoder is ignored. Cancelling an already-resolved completion is
    /// a no-op.
    pub fn cancel(&self) {
        self.shared.borrow_mut().resolve(Err(WriteError::Cancelled));
    }

    /// Outcome if already resolved, without polling.
    pub fn try_result(&self) -> Option<Result<(), WriteError>> {
        match &self.shared.borrow().state {
            State::Pending => None,
            State::Ready(result) => Some(result.clone()),
        }
    }
}

impl Future for WriteCompletion {
    type Output = Result<(), WriteError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut shared = self.shared.borrow_mut();
        match &shared.state {
            State::Ready(result) => Poll::Ready(result.clone()),
            State::Pending => {
                shared.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

impl WriteSignal {
    /// Resolve the write as flushed.
    pub fn complete(mut self) {
        self.resolved = true;
        self.shared.borrow_mut().resolve(Ok(()));
    }

    /// Resolve the write as failed.
    pub fn fail(mut self, err: WriteError) {
        self.resolved = true;
        self.shared.borrow_mut().resolve(Err(err));
    }
}

impl Drop for WriteSignal {
    fn drop(&mut self) {
        if !self.resolved {
            self.shared.borrow_mut().resolve(Err(WriteError::Abandoned));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll_once(completion: &mut WriteCompletion) -> Poll<Result<(), WriteError>> {
        let waker = Waker::noop();
        let mut cx = Context::from_waker(waker);
        Pin::new(completion).poll(&mut cx)
    }

    #[test]
    fn resolves_after_signal_completes() {
        let (signal, mut completion) = WriteCompletion::pending();
        assert_eq!(poll_once(&mut completion), Poll::Pending);
        assert_eq!(completion.try_result(), None);

        signal.complete();
        assert_eq!(poll_once(&mut completion), Poll::Ready(Ok(())));
    }

    #[test]
    fn signal_failure_propagates() {
        let (signal, mut completion) = WriteCompletion::pending();
        signal.fail(WriteError::Encoder("flush failed".into()));
        assert_eq!(
            poll_once(&mut completion),
            Poll::Ready(Err(WriteError::Encoder("flush failed".into())))
        );
    }

    #[test]
    fn dropped_signal_is_abandoned() {
        let (signal, mut completion) = WriteCompletion::pending();
        drop(signal);
        assert_eq!(poll_once(&mut completion), Poll::Ready(Err(WriteError::Abandoned)));
    }

    #[test]
    fn cancel_wins_over_later_resolution() {
        let (signal, mut completion) = WriteCompletion::pending();
        completion.cancel();
        signal.complete();
        assert_eq!(poll_once(&mut completion), Poll::Ready(Err(WriteError::Cancelled)));
    }

    #[test]
    fn cancel_after_resolution_is_noop() {
        let (signal, mut completion) = WriteCompletion::pending();
        signal.complete();
        completion.cancel();
        assert_eq!(poll_once(&mut completion), Poll::Ready(Ok(())));
    }

    #[test]
    fn completed_and_failed_constructors() {
        assert_eq!(WriteCompletion::completed().try_result(), Some(Ok(())));
        assert_eq!(
            WriteCompletion::failed(WriteError::Cancelled).try_result(),
            Some(Err(WriteError::Cancelled))
        );
    }
}
