//! Handlers stored by event channels
//!
//! A [`Handler`] is a reference-counted, type-erased callable. Handlers are
//! compared by identity: a clone of a handler is the same handler, while
//! wrapping the same closure twice produces two distinct handlers.

use std::fmt;
use std::sync::Arc;

use crate::error::HandlerError;

/// Result returned by a handler
pub type HandlerResult = std::result::Result<(), HandlerError>;

type HandlerFn<A> = dyn Fn(&A) -> HandlerResult + Send + Sync;

/// Callable registered on an [`EventChannel`](crate::EventChannel)
///
/// The channel holds a clone of the `Arc`, so registering or removing a
/// handler never affects the callable's lifetime elsewhere.
pub struct Handler<A> {
    func: Arc<HandlerFn<A>>,
}

impl<A> Handler<A> {
    /// Wrap a fallible closure
    ///
    /// Returning an error from the closure fails the fan-out it runs in.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&A) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Wrap a closure that cannot fail
    pub fn from_fn<F>(func: F) -> Self
    where
        F: Fn(&A) + Send + Sync + 'static,
        A: 'static,
    {
        Self::new(move |args: &A| {
            func(args);
            Ok(())
        })
    }

    /// Call the handler with an argument bundle
    pub fn call(&self, args: &A) -> HandlerResult {
        (self.func)(args)
    }

    /// Whether two handlers are the same registration target
    pub fn same_as(&self, other: &Handler<A>) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl<A> Clone for Handler<A> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
        }
    }
}

impl<A> PartialEq for Handler<A> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<A> Eq for Handler<A> {}

impl<A> fmt::Debug for Handler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("ptr", &Arc::as_ptr(&self.func).cast::<()>())
            .finish()
    }
}

/// Conversion into the handlers accepted by `add` and `remove`
///
/// Implemented for a single handler, an optional handler (where `None`
/// contributes nothing), and batches of handlers.
pub trait IntoHandlers<A> {
    /// Convert into handlers in order
    fn into_handlers(self) -> Vec<Handler<A>>;
}

impl<A> IntoHandlers<A> for Handler<A> {
    fn into_handlers(self) -> Vec<Handler<A>> {
        vec![self]
    }
}

impl<A> IntoHandlers<A> for &Handler<A> {
    fn into_handlers(self) -> Vec<Handler<A>> {
        vec![self.clone()]
    }
}

impl<A, T: IntoHandlers<A>> IntoHandlers<A> for Option<T> {
    fn into_handlers(self) -> Vec<Handler<A>> {
        self.map(IntoHandlers::into_handlers).unwrap_or_default()
    }
}

impl<A> IntoHandlers<A> for Vec<Handler<A>> {
    fn into_handlers(self) -> Vec<Handler<A>> {
        self
    }
}

impl<A> IntoHandlers<A> for &[Handler<A>] {
    fn into_handlers(self) -> Vec<Handler<A>> {
        self.to_vec()
    }
}

impl<A, const N: usize> IntoHandlers<A> for [Handler<A>; N] {
    fn into_handlers(self) -> Vec<Handler<A>> {
        self.into_iter().collect()
    }
}
