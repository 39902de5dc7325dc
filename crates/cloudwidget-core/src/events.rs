//! Synchronous single-event publish/subscribe channel.
//!
//! Listeners run on the publishing thread in subscription order. A listener
//! error stops dispatch and is returned to the caller of [`EventChannel::publish`];
//! the channel does not catch or retry.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use crate::error::WidgetError;

/// Identifier of an event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventType(&'static str);

impl EventType {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// Fired when the upload widget closes, by error or success.
pub const UPLOAD_FINISHED: EventType = EventType::new("upload.finished");

/// Token returned by [`EventChannel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener<E> = Box<dyn FnMut(&E) -> anyhow::Result<()>>;

pub struct EventChannel<E> {
    next_id: u64,
    listeners: Vec<(Subscription, Listener<E>)>,
}

impl<E> EventChannel<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    /// Registers a listener after all existing ones.
    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&E) -> anyhow::Result<()> + 'static,
    {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((subscription, Box::new(listener)));
        subscription
    }

    /// Removes a listener. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        before != self.listeners.len()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Invokes every listener once with `event`.
    ///
    /// Stops at the first failing listener; later listeners are not called.
    pub fn publish(&mut self, event: &E) -> Result<(), WidgetError> {
        for (subscription, listener) in self.listeners.iter_mut() {
            if let Err(source) = listener(event) {
                tracing::warn!(
                    subscription = subscription.0,
                    error = %source,
                    "Upload listener failed, stopping dispatch"
                );
                return Err(WidgetError::Listener { source });
            }
        }
        Ok(())
    }
}

impl<E> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Debug for EventChannel<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("EventChannel")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
