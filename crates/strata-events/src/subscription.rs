//! Subscription handles.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tracing::debug;
use uuid::Uuid;

use crate::config::EventConfig;
use crate::registry::{RegistryState, lock_state};
use crate::subscriber::EventSubscriber;
use crate::tag::TypeTag;

/// Unique identifier of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Inner<E: ?Sized + 'static> {
    id: SubscriptionId,
    event_type: TypeTag,
    config: EventConfig,
    subscriber: Arc<dyn EventSubscriber<E>>,
    disposed: AtomicBool,
    registry: Weak<Mutex<RegistryState<E>>>,
}

/// A registered interest in events of one declared type.
///
/// Cloning is cheap and clones refer to the same subscription: equality is
/// identity. Everything but the disposed state is immutable.
///
/// A subscription only holds a weak reference to its registry, so it never
/// keeps a registry alive.
pub struct Subscription<E: ?Sized + 'static> {
    inner: Arc<Inner<E>>,
}

impl<E: ?Sized + 'static> Subscription<E> {
    pub(crate) fn new(
        event_type: TypeTag,
        config: EventConfig,
        subscriber: Arc<dyn EventSubscriber<E>>,
        registry: Weak<Mutex<RegistryState<E>>>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                id: SubscriptionId::new(),
                event_type,
                config,
                subscriber,
                disposed: AtomicBool::new(false),
                registry,
            }),
        }
    }

    /// The subscription's unique id.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.inner.id
    }

    /// The type this subscription was declared for.
    #[must_use]
    pub fn event_type(&self) -> TypeTag {
        self.inner.event_type
    }

    /// The subscription config.
    #[must_use]
    pub fn config(&self) -> &EventConfig {
        &self.inner.config
    }

    /// Shorthand for `config().priority()`.
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.inner.config.priority
    }

    /// The subscriber to invoke for matching events.
    #[must_use]
    pub fn subscriber(&self) -> &Arc<dyn EventSubscriber<E>> {
        &self.inner.subscriber
    }

    /// Returns `true` once the subscription has been removed from its registry.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
    }

    /// Remove this subscription from its registry.
    ///
    /// Lookups started after this returns no longer see the subscription.
    /// Snapshots returned earlier are unaffected. Calling this again, or after
    /// the registry is gone, does nothing.
    ///
    /// Must not be called from inside an `unsubscribe_if` predicate on the
    /// same registry.
    pub fn dispose(&self) {
        let Some(registry) = self.inner.registry.upgrade() else {
            self.mark_disposed();
            return;
        };

        let mut state = lock_state(&registry);
        let Some(bucket) = state.by_source_type.get_mut(&self.inner.event_type) else {
            return;
        };
        let Some(position) = bucket.iter().position(|s| s == self) else {
            return;
        };

        let removed = bucket.remove(position);
        if bucket.is_empty() {
            state.by_source_type.remove(&self.inner.event_type);
        }
        state.lookup_cache.clear();
        self.mark_disposed();
        drop(state);

        debug!(
            subscription_id = %self.inner.id,
            event_type = %self.inner.event_type,
            "Subscription disposed"
        );
        drop(removed);
    }

    pub(crate) fn mark_disposed(&self) {
        self.inner.disposed.store(true, Ordering::Release);
    }
}

impl<E: ?Sized + 'static> Clone for Subscription<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: ?Sized + 'static> PartialEq for Subscription<E> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<E: ?Sized + 'static> Eq for Subscription<E> {}

impl<E: ?Sized + 'static> fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.inner.id)
            .field("event_type", &self.inner.event_type)
            .field("config", &self.inner.config)
            .field("subscriber", &self.inner.subscriber.name())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
