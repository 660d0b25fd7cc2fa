//! Event subscriber trait.

use std::fmt;
use std::marker::PhantomData;

/// A handler interested in events of base type `E`.
///
/// `E` is usually a trait object such as `dyn Event`. A subscriber declared
/// for some subtype is only ever returned by lookups for types assignable to
/// that subtype, so implementations may downcast the event they receive.
///
/// The registry stores subscribers but never calls them; invoking
/// [`on_event`](Self::on_event) is the dispatcher's job.
pub trait EventSubscriber<E: ?Sized>: Send + Sync {
    /// Handle an event.
    fn on_event(&self, event: &E);

    /// Optional name for debugging.
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "anonymous"
    }
}

/// A subscriber backed by a closure.
pub struct FnSubscriber<E: ?Sized, F> {
    name: String,
    handler: F,
    _event: PhantomData<fn(&E)>,
}

impl<E: ?Sized, F> FnSubscriber<E, F>
where
    F: Fn(&E) + Send + Sync,
{
    /// Create a named closure subscriber.
    pub fn new(name: impl Into<String>, handler: F) -> Self {
        Self {
            name: name.into(),
            handler,
            _event: PhantomData,
        }
    }
}

impl<E, F> EventSubscriber<E> for FnSubscriber<E, F>
where
    E: ?Sized,
    F: Fn(&E) + Send + Sync,
{
    fn on_event(&self, event: &E) {
        (self.handler)(event);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<E: ?Sized, F> fmt::Debug for FnSubscriber<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSubscriber")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
