//! Thread-safe event channel handle

use std::sync::Arc;

use parking_lot::RwLock;

use super::{fan_out, EventChannel};
use crate::{
    config::{ChannelConfig, FailurePolicy},
    error::Result,
    handler::{Handler, IntoHandlers},
};

/// Cloneable, thread-safe handle to an [`EventChannel`]
///
/// `invoke` snapshots the registry before calling any handler, so handlers
/// may add or remove handlers on the same channel. Such changes apply to
/// later invocations only.
pub struct SharedEventChannel<A> {
    inner: Arc<RwLock<EventChannel<A>>>,
}

impl<A> SharedEventChannel<A> {
    pub fn new() -> Self {
        Self::from_channel(EventChannel::new())
    }

    pub fn with_config(config: ChannelConfig) -> Self {
        Self::from_channel(EventChannel::with_config(config))
    }

    /// Wrap an existing channel, keeping its handlers and settings
    pub fn from_channel(channel: EventChannel<A>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(channel)),
        }
    }

    pub fn add(&self, handlers: impl IntoHandlers<A>) {
        self.inner.write().add(handlers);
    }

    pub fn remove(&self, handlers: impl IntoHandlers<A>) {
        self.inner.write().remove(handlers);
    }

    pub fn contains(&self, handler: &Handler<A>) -> bool {
        self.inner.read().contains(handler)
    }

    pub fn count(&self, handler: &Handler<A>) -> usize {
        self.inner.read().count(handler)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.inner.read().failure_policy()
    }

    pub fn set_failure_policy(&self, policy: FailurePolicy) {
        self.inner.write().failure_policy = policy;
    }

    /// Copy of the registry in invocation order
    pub fn snapshot(&self) -> Vec<Handler<A>> {
        self.inner.read().handlers().to_vec()
    }

    /// Call every handler registered at entry, in registration order
    ///
    /// The lock is released before the first handler runs.
    pub fn invoke(&self, args: &A) -> Result<()> {
        let (label, policy, handlers) = {
            let channel = self.inner.read();
            (
                channel.label().to_string(),
                channel.failure_policy(),
                channel.handlers().to_vec(),
            )
        };

        fan_out(&label, policy, &handlers, args)
    }
}

impl<A> Clone for SharedEventChannel<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> Default for SharedEventChannel<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for SharedEventChannel<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedEventChannel")
            .field(&*self.inner.read())
            .finish()
    }
}

impl<A> From<EventChannel<A>> for SharedEventChannel<A> {
    fn from(channel: EventChannel<A>) -> Self {
        Self::from_channel(channel)
    }
}
