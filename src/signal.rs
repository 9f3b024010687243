//! Synchronous, cancellable notifications.
//!
//! A [`Notification`] is a single-pass broadcast: `fire` runs every
//! subscriber to completion, in subscription order, before it returns.
//! Subscribers receive the payload and an [`Activation`] handle; calling
//! [`Activation::cancel`] vetoes whatever action the firer was about to
//! take. Cancellation only travels through this one flag — there is no
//! asynchronous token, because the observe-then-decide ordering must stay
//! within a single call stack.

use std::fmt;

/// Per-dispatch cancellation handle passed to subscribers.
#[derive(Debug, Default)]
pub struct Activation {
    cancelled: bool,
}

impl Activation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Veto the pending action. Idempotent.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

type Subscriber<T> = Box<dyn FnMut(&T, &mut Activation)>;

/// Ordered subscriber list with synchronous dispatch.
#[derive(Default)]
pub struct Notification<T> {
    subscribers: Vec<Subscriber<T>>,
}

impl<T> Notification<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&T, &mut Activation) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Fire once. Returns whether any subscriber cancelled.
    pub fn fire(&mut self, payload: &T) -> bool {
        let mut activation = Activation::new();
        for subscriber in &mut self.subscribers {
            subscriber(payload, &mut activation);
        }
        activation.is_cancelled()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T> fmt::Debug for Notification<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
