//! Event channel: an ordered registry of handlers with synchronous fan-out
//!
//! # Examples
//!
//! ```
//! use fanout_events::{EventChannel, Handler};
//!
//! let mut channel = EventChannel::<String>::new();
//! let handler = Handler::from_fn(|e: &String| println!(" - Handler1: {}", e));
//!
//! channel += &handler;
//! assert!(channel.contains(&handler));
//!
//! channel.invoke(&"First Call".to_string())?;
//!
//! channel -= &handler;
//! assert!(channel.is_empty());
//! # Ok::<(), fanout_events::EventError>(())
//! ```

pub mod shared;

pub use shared::SharedEventChannel;

use std::ops::{AddAssign, SubAssign};

use tracing::{debug, trace};

use crate::{
    config::{ChannelConfig, FailurePolicy},
    error::{EventError, HandlerFailure, Result},
    handler::{Handler, IntoHandlers},
};

/// Ordered, mutable registry of handlers
///
/// Handlers fire in registration order. The same handler may be registered
/// more than once and then fires once per registration.
pub struct EventChannel<A> {
    handlers: Vec<Handler<A>>,
    name: Option<String>,
    failure_policy: FailurePolicy,
}

impl<A> EventChannel<A> {
    /// Create an empty channel with the fail-fast policy
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            name: None,
            failure_policy: FailurePolicy::FailFast,
        }
    }

    /// Create an empty channel from configuration
    pub fn with_config(config: ChannelConfig) -> Self {
        Self {
            handlers: Vec::new(),
            name: config.name,
            failure_policy: config.failure_policy,
        }
    }

    /// Set the failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Set the name used in log output
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name used in log output, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Failure policy applied by [`invoke`](Self::invoke)
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Append one handler, a batch, or nothing (`None`)
    pub fn add(&mut self, handlers: impl IntoHandlers<A>) {
        let handlers = handlers.into_handlers();
        if handlers.is_empty() {
            return;
        }

        let added = handlers.len();
        self.handlers.extend(handlers);
        debug!(
            channel = self.label(),
            added,
            handler_count = self.handlers.len(),
            "Registered handlers"
        );
    }

    /// Remove the first occurrence of each given handler
    ///
    /// Handlers that are not registered are ignored. Listing a handler twice
    /// removes up to two registrations.
    pub fn remove(&mut self, handlers: impl IntoHandlers<A>) {
        let mut removed = 0;
        for handler in handlers.into_handlers() {
            if let Some(pos) = self.handlers.iter().position(|h| h.same_as(&handler)) {
                self.handlers.remove(pos);
                removed += 1;
            }
        }

        if removed > 0 {
            debug!(
                channel = self.label(),
                removed,
                handler_count = self.handlers.len(),
                "Unregistered handlers"
            );
        }
    }

    /// Whether the handler is registered at least once
    pub fn contains(&self, handler: &Handler<A>) -> bool {
        self.handlers.iter().any(|h| h.same_as(handler))
    }

    /// Number of times the handler is registered
    pub fn count(&self, handler: &Handler<A>) -> usize {
        self.handlers.iter().filter(|h| h.same_as(handler)).count()
    }

    /// Number of registrations
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Remove every handler
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Registered handlers in invocation order
    pub fn handlers(&self) -> &[Handler<A>] {
        &self.handlers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Handler<A>> {
        self.handlers.iter()
    }

    /// Call every handler in registration order with the same arguments
    ///
    /// # Errors
    ///
    /// With [`FailurePolicy::FailFast`] the first failing handler aborts the
    /// fan-out and is returned as [`EventError::HandlerFailed`]. With
    /// [`FailurePolicy::Isolate`] every handler runs and failures are returned
    /// together as [`EventError::HandlersFailed`].
    pub fn invoke(&self, args: &A) -> Result<()> {
        fan_out(self.label(), self.failure_policy, &self.handlers, args)
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}

pub(crate) fn fan_out<A>(
    channel: &str,
    policy: FailurePolicy,
    handlers: &[Handler<A>],
    args: &A,
) -> Result<()> {
    trace!(channel, handler_count = handlers.len(), "Invoking handlers");

    let mut failures = Vec::new();
    for (index, handler) in handlers.iter().enumerate() {
        trace!(channel, index, "Calling handler");

        if let Err(error) = handler.call(args) {
            debug!(channel, index, error = %error, "Handler failed");
            match policy {
                FailurePolicy::FailFast => {
                    return Err(EventError::HandlerFailed {
                        index,
                        source: error,
                    });
                }
                FailurePolicy::Isolate => failures.push(HandlerFailure { index, error }),
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(EventError::HandlersFailed(failures))
    }
}

impl<A> Default for EventChannel<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for EventChannel<A> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
            name: self.name.clone(),
            failure_policy: self.failure_policy,
        }
    }
}

impl<A> std::fmt::Debug for EventChannel<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("name", &self.name)
            .field("failure_policy", &self.failure_policy)
            .field("handler_count", &self.handlers.len())
            .finish()
    }
}

impl<A, H: IntoHandlers<A>> AddAssign<H> for EventChannel<A> {
    fn add_assign(&mut self, handlers: H) {
        self.add(handlers);
    }
}

impl<A, H: IntoHandlers<A>> SubAssign<H> for EventChannel<A> {
    fn sub_assign(&mut self, handlers: H) {
        self.remove(handlers);
    }
}

impl<A> Extend<Handler<A>> for EventChannel<A> {
    fn extend<I: IntoIterator<Item = Handler<A>>>(&mut self, iter: I) {
        self.add(iter.into_iter().collect::<Vec<_>>());
    }
}

impl<A> FromIterator<Handler<A>> for EventChannel<A> {
    fn from_iter<I: IntoIterator<Item = Handler<A>>>(iter: I) -> Self {
        let mut channel = Self::new();
        channel.extend(iter);
        channel
    }
}

impl<'a, A> IntoIterator for &'a EventChannel<A> {
    type Item = &'a Handler<A>;
    type IntoIter = std::slice::Iter<'a, Handler<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.handlers.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::HandlerError;

    type Log = Arc<Mutex<Vec<String>>>;

    fn recording_handler(log: &Log, label: &str) -> Handler<String> {
        let log = log.clone();
        let label = label.to_string();
        Handler::from_fn(move |e: &String| {
            log.lock().unwrap().push(format!("{}: {}", label, e));
        })
    }

    fn failing_handler(log: &Log, label: &str) -> Handler<String> {
        let log = log.clone();
        let label = label.to_string();
        Handler::new(move |_: &String| {
            log.lock().unwrap().push(format!("{}: failed", label));
            Err(HandlerError::new(format!("{} failed", label)))
        })
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn test_new_channel_is_empty() {
        let channel = EventChannel::<String>::new();
        assert!(channel.is_empty());
        assert_eq!(channel.len(), 0);
        assert_eq!(channel.failure_policy(), FailurePolicy::FailFast);
        assert!(channel.invoke(&"nothing".to_string()).is_ok());
    }

    #[test]
    fn test_add_and_contains() {
        let log = Log::default();
        let handler = recording_handler(&log, "h1");
        let mut channel = EventChannel::new();

        assert!(!channel.contains(&handler));
        channel.add(&handler);
        assert!(channel.contains(&handler));
        assert_eq!(channel.len(), 1);
    }

    #[test]
    fn test_add_none_is_noop() {
        let mut channel = EventChannel::<String>::new();
        channel.add(None::<Handler<String>>);
        channel += None::<Vec<Handler<String>>>;
        assert!(channel.is_empty());
    }

    #[test]
    fn test_invoke_in_registration_order() {
        let log = Log::default();
        let mut channel = EventChannel::new();
        channel += recording_handler(&log, "a");
        channel += recording_handler(&log, "b");
        channel += recording_handler(&log, "c");

        channel.invoke(&"go".to_string()).unwrap();

        assert_eq!(entries(&log), vec!["a: go", "b: go", "c: go"]);
    }

    #[test]
    fn test_batch_add_appends_after_existing() {
        let log = Log::default();
        let first = recording_handler(&log, "first");
        let a = recording_handler(&log, "a");
        let b = recording_handler(&log, "b");
        let mut channel = EventChannel::new();

        channel += &first;
        channel += [a.clone(), b.clone()];

        assert_eq!(channel.handlers(), &[first, a, b]);
    }

    #[test]
    fn test_duplicate_registration_fires_twice() {
        let log = Log::default();
        let handler = recording_handler(&log, "dup");
        let mut channel = EventChannel::new();

        channel += &handler;
        channel += &handler;
        assert_eq!(channel.count(&handler), 2);

        channel.invoke(&"x".to_string()).unwrap();
        assert_eq!(entries(&log), vec!["dup: x", "dup: x"]);
    }

    #[test]
    fn test_remove_first_occurrence_only() {
        let log = Log::default();
        let a = recording_handler(&log, "a");
        let b = recording_handler(&log, "b");
        let mut channel = EventChannel::new();
        channel += [a.clone(), b.clone(), a.clone()];

        channel -= &a;

        assert_eq!(channel.handlers(), &[b.clone(), a.clone()]);
        assert!(channel.contains(&a));

        channel.invoke(&"y".to_string()).unwrap();
        assert_eq!(entries(&log), vec!["b: y", "a: y"]);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let log = Log::default();
        let registered = recording_handler(&log, "registered");
        let stranger = recording_handler(&log, "stranger");
        let mut channel = EventChannel::new();
        channel += &registered;

        channel.remove(&stranger);
        channel.remove(None::<Handler<String>>);

        assert_eq!(channel.len(), 1);
        assert!(channel.contains(&registered));
    }

    #[test]
    fn test_batch_remove_with_duplicates() {
        let log = Log::default();
        let a = recording_handler(&log, "a");
        let mut channel = EventChannel::new();
        channel += [a.clone(), a.clone(), a.clone()];

        channel -= vec![a.clone(), a.clone()];
        assert_eq!(channel.count(&a), 1);

        channel -= vec![a.clone(), a.clone()];
        assert!(channel.is_empty());
    }

    #[test]
    fn test_fail_fast_stops_fan_out() {
        let log = Log::default();
        let mut channel = EventChannel::new();
        channel += recording_handler(&log, "before");
        channel += failing_handler(&log, "broken");
        channel += recording_handler(&log, "after");

        let err = channel.invoke(&"z".to_string()).unwrap_err();

        match err {
            EventError::HandlerFailed { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(source.message(), "broken failed");
            }
            other => panic!("Expected HandlerFailed, got {:?}", other),
        }
        assert_eq!(entries(&log), vec!["before: z", "broken: failed"]);
    }

    #[test]
    fn test_isolate_runs_every_handler() {
        let log = Log::default();
        let mut channel = EventChannel::new().with_failure_policy(FailurePolicy::Isolate);
        channel += failing_handler(&log, "one");
        channel += recording_handler(&log, "ok");
        channel += failing_handler(&log, "two");

        let err = channel.invoke(&"w".to_string()).unwrap_err();

        match err {
            EventError::HandlersFailed(failures) => {
                let indices: Vec<usize> = failures.iter().map(|f| f.index).collect();
                assert_eq!(indices, vec![0, 2]);
            }
            other => panic!("Expected HandlersFailed, got {:?}", other),
        }
        assert_eq!(entries(&log), vec!["one: failed", "ok: w", "two: failed"]);
    }

    #[test]
    fn test_isolate_without_failures_is_ok() {
        let log = Log::default();
        let mut channel = EventChannel::new().with_failure_policy(FailurePolicy::Isolate);
        channel += recording_handler(&log, "ok");

        assert!(channel.invoke(&"v".to_string()).is_ok());
    }

    #[test]
    fn test_with_config() {
        let channel = EventChannel::<()>::with_config(ChannelConfig {
            name: Some("orders".to_string()),
            failure_policy: FailurePolicy::Isolate,
        });

        assert_eq!(channel.name(), Some("orders"));
        assert_eq!(channel.failure_policy(), FailurePolicy::Isolate);
    }

    #[test]
    fn test_with_name_labels_channel() {
        let channel = EventChannel::<()>::new().with_name("checkout");
        assert_eq!(channel.name(), Some("checkout"));
        assert!(EventChannel::<()>::new().name().is_none());
    }

    #[test]
    fn test_iter_follows_registration_order() {
        let log = Log::default();
        let a = recording_handler(&log, "a");
        let b = recording_handler(&log, "b");
        let mut channel = EventChannel::new();
        channel += [b.clone(), a.clone(), b.clone()];

        let order: Vec<Handler<String>> = channel.iter().cloned().collect();
        assert_eq!(order, vec![b.clone(), a, b]);
    }

    #[test]
    fn test_collect_and_extend() {
        let log = Log::default();
        let a = recording_handler(&log, "a");
        let b = recording_handler(&log, "b");

        let mut channel: EventChannel<String> = vec![a.clone()].into_iter().collect();
        channel.extend(vec![b.clone()]);

        let order: Vec<&Handler<String>> = (&channel).into_iter().collect();
        assert_eq!(order, vec![&a, &b]);
    }

    #[test]
    fn test_clear() {
        let log = Log::default();
        let mut channel = EventChannel::new();
        channel += recording_handler(&log, "a");
        channel.clear();

        channel.invoke(&"gone".to_string()).unwrap();
        assert!(channel.is_empty());
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn test_tuple_arguments() {
        let sum = Arc::new(Mutex::new(0));
        let sum_clone = sum.clone();
        let mut channel = EventChannel::<(i32, i32)>::new();
        channel += Handler::from_fn(move |(a, b): &(i32, i32)| {
            *sum_clone.lock().unwrap() += a * b;
        });

        channel.invoke(&(3, 4)).unwrap();
        assert_eq!(*sum.lock().unwrap(), 12);
    }
}
