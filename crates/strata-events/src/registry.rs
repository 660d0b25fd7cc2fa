//! Hierarchy-aware subscription registry.
//!
//! Subscriptions are filed under the type they were declared for. A lookup
//! for a concrete type gathers the buckets of every ancestor of that type
//! (itself included) that is assignable to the registry's base type, and
//! orders the result by priority.
//!
//! Two caches keep repeated lookups cheap:
//! - ancestor sets per concrete type, never invalidated since the hierarchy
//!   is immutable;
//! - merged lookup results per concrete type, cleared in full whenever the
//!   set of subscriptions actually changes.
//!
//! One mutex guards all of it for the whole of every public operation.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

use crate::config::EventConfig;
use crate::error::{PredicateError, RegistryError, RegistryResult};
use crate::hierarchy::TypeHierarchy;
use crate::subscriber::{EventSubscriber, FnSubscriber};
use crate::subscription::Subscription;
use crate::tag::TypeTag;

/// Mutable registry state, guarded by the registry mutex.
pub(crate) struct RegistryState<E: ?Sized + 'static> {
    /// Declared type -> subscriptions in registration order. Source of truth.
    pub(crate) by_source_type: HashMap<TypeTag, Vec<Subscription<E>>>,
    /// Concrete type -> ancestors assignable to the base type.
    pub(crate) hierarchy_cache: HashMap<TypeTag, Arc<[TypeTag]>>,
    /// Concrete type -> merged, priority-ordered subscriptions.
    pub(crate) lookup_cache: HashMap<TypeTag, Arc<[Subscription<E>]>>,
}

impl<E: ?Sized + 'static> RegistryState<E> {
    fn new() -> Self {
        Self {
            by_source_type: HashMap::new(),
            hierarchy_cache: HashMap::new(),
            lookup_cache: HashMap::new(),
        }
    }
}

/// Lock registry state.
///
/// A poisoned lock only means a predicate panicked mid-removal. Removal
/// settles each bucket before the predicate sees the next one, so the state
/// is taken as is.
pub(crate) fn lock_state<E: ?Sized + 'static>(
    state: &Mutex<RegistryState<E>>,
) -> MutexGuard<'_, RegistryState<E>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registry of subscriptions for one base event type `E`.
///
/// `E` is the type subscribers receive, usually a trait object such as
/// `dyn Event`; `base` is its tag in the hierarchy.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use strata_events::prelude::*;
///
/// trait Event {}
/// struct Saved;
/// impl Event for Saved {}
///
/// # fn main() -> RegistryResult<()> {
/// let graph = TypeGraph::builder()
///     .root::<dyn Event>()
///     .extends::<Saved, dyn Event>()
///     .build()?;
///
/// let registry: EventRegistry<dyn Event> =
///     EventRegistry::new(TypeTag::of::<dyn Event>(), Arc::new(graph))?;
///
/// let audit =
///     registry.subscribe_fn(TypeTag::of::<dyn Event>(), EventConfig::at(10), "audit", |_| {})?;
/// let save = registry.subscribe_fn(TypeTag::of::<Saved>(), EventConfig::at(5), "save", |_| {})?;
///
/// let subscriptions = registry.lookup(TypeTag::of::<Saved>());
/// assert_eq!(&*subscriptions, &[save, audit][..]);
/// # Ok(())
/// # }
/// ```
pub struct EventRegistry<E: ?Sized + 'static> {
    base: TypeTag,
    hierarchy: Arc<dyn TypeHierarchy>,
    state: Arc<Mutex<RegistryState<E>>>,
}

impl<E: ?Sized + 'static> EventRegistry<E> {
    /// Create a registry for the given base type.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidArgument`] if `base` is not declared in
    /// `hierarchy`.
    pub fn new(base: TypeTag, hierarchy: Arc<dyn TypeHierarchy>) -> RegistryResult<Self> {
        if !hierarchy.contains(base) {
            return Err(RegistryError::invalid(format!(
                "base type {} is not declared in the hierarchy",
                base.name()
            )));
        }

        Ok(Self {
            base,
            hierarchy,
            state: Arc::new(Mutex::new(RegistryState::new())),
        })
    }

    /// The base type every subscription must be assignable to.
    #[must_use]
    pub fn base_type(&self) -> TypeTag {
        self.base
    }

    /// The hierarchy used to resolve ancestors.
    #[must_use]
    pub fn hierarchy(&self) -> &Arc<dyn TypeHierarchy> {
        &self.hierarchy
    }

    /// Subscribe to events of `event_type` and all its subtypes.
    ///
    /// Clears every cached lookup.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidArgument`] if `event_type` is not
    /// assignable to the base type.
    pub fn subscribe(
        &self,
        event_type: TypeTag,
        config: EventConfig,
        subscriber: Arc<dyn EventSubscriber<E>>,
    ) -> RegistryResult<Subscription<E>> {
        if !self.hierarchy.is_assignable(event_type, self.base) {
            return Err(RegistryError::invalid(format!(
                "event type {} is not assignable to {}",
                event_type.name(),
                self.base.name()
            )));
        }

        let subscription =
            Subscription::new(event_type, config, subscriber, Arc::downgrade(&self.state));

        let mut state = self.lock();
        state
            .by_source_type
            .entry(event_type)
            .or_default()
            .push(subscription.clone());
        state.lookup_cache.clear();
        drop(state);

        debug!(
            subscription_id = %subscription.id(),
            event_type = %event_type,
            priority = subscription.priority(),
            subscriber_name = %subscription.subscriber().name(),
            "Subscription registered"
        );
        Ok(subscription)
    }

    /// Subscribe a closure.
    ///
    /// # Errors
    ///
    /// Same as [`subscribe`](Self::subscribe).
    pub fn subscribe_fn<F>(
        &self,
        event_type: TypeTag,
        config: EventConfig,
        name: impl Into<String>,
        handler: F,
    ) -> RegistryResult<Subscription<E>>
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let subscriber: FnSubscriber<E, F> = FnSubscriber::new(name, handler);
        self.subscribe(event_type, config, Arc::new(subscriber))
    }

    /// Remove every subscription matching `predicate`.
    ///
    /// Removed subscriptions are marked disposed. Cached lookups are cleared
    /// only if something was removed. Returns the number removed.
    ///
    /// The predicate runs under the registry lock and must not call back into
    /// this registry.
    pub fn unsubscribe_if<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&Subscription<E>) -> bool,
    {
        match self.remove_where(|subscription| Ok::<_, Infallible>(predicate(subscription))) {
            Ok(removed) => removed,
            Err(never) => match never {},
        }
    }

    /// Remove every subscription matching a fallible `predicate`.
    ///
    /// Buckets are processed one at a time. If the predicate fails, buckets
    /// already processed stay as they are now (and cached lookups are cleared
    /// if any of them lost a subscription), while the failing bucket and the
    /// rest are left untouched. There is no rollback.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PredicateFailure`] wrapping the predicate's
    /// error.
    pub fn try_unsubscribe_if<P, X>(&self, predicate: P) -> RegistryResult<usize>
    where
        P: FnMut(&Subscription<E>) -> Result<bool, X>,
        X: Into<PredicateError>,
    {
        self.remove_where(predicate)
            .map_err(|e| RegistryError::PredicateFailure { source: e.into() })
    }

    fn remove_where<P, X>(&self, mut predicate: P) -> Result<usize, X>
    where
        P: FnMut(&Subscription<E>) -> Result<bool, X>,
    {
        let mut removed = Vec::new();
        let mut failure = None;

        let mut guard = self.lock();
        let state = &mut *guard;
        let types: Vec<TypeTag> = state.by_source_type.keys().copied().collect();
        for ty in types {
            let Some(bucket) = state.by_source_type.get_mut(&ty) else {
                continue;
            };
            let matches: Result<Vec<bool>, X> = bucket.iter().map(&mut predicate).collect();
            let matches = match matches {
                Ok(matches) => matches,
                Err(e) => {
                    failure = Some(e);
                    break;
                },
            };
            if !matches.contains(&true) {
                continue;
            }

            let mut matches = matches.into_iter();
            let (gone, kept): (Vec<_>, Vec<_>) = bucket
                .drain(..)
                .partition(|_| matches.next().unwrap_or(false));
            if kept.is_empty() {
                state.by_source_type.remove(&ty);
            } else {
                *bucket = kept;
            }

            // The next predicate call may panic; state must be consistent
            // after every bucket.
            state.lookup_cache.clear();
            for subscription in &gone {
                subscription.mark_disposed();
            }
            removed.extend(gone);
        }
        drop(guard);

        let count = removed.len();
        if count > 0 {
            debug!(removed = count, "Subscriptions removed by predicate");
        }
        drop(removed);

        match failure {
            Some(e) => Err(e),
            None => Ok(count),
        }
    }

    /// All subscriptions matching the concrete type, lowest priority first.
    ///
    /// Subscriptions with equal priority keep the order of the concrete
    /// type's ancestors (itself first, then breadth-first through declared
    /// supertypes), and registration order within one declared type.
    ///
    /// The returned slice is a frozen snapshot. While the subscriptions stay
    /// unchanged, repeated calls return the same allocation.
    #[must_use]
    pub fn lookup(&self, concrete: TypeTag) -> Arc<[Subscription<E>]> {
        let mut guard = self.lock();
        if let Some(cached) = guard.lookup_cache.get(&concrete) {
            trace!(event_type = %concrete, "Lookup cache hit");
            return Arc::clone(cached);
        }

        let state = &mut *guard;
        let ancestors = self.resolve_ancestors(&mut state.hierarchy_cache, concrete);

        let mut merged = Vec::new();
        for ty in ancestors.iter() {
            if let Some(bucket) = state.by_source_type.get(ty) {
                merged.extend(bucket.iter().cloned());
            }
        }
        // Stable: ties keep ancestor and registration order.
        merged.sort_by_key(Subscription::priority);

        let snapshot: Arc<[Subscription<E>]> = merged.into();
        state.lookup_cache.insert(concrete, Arc::clone(&snapshot));

        trace!(
            event_type = %concrete,
            subscription_count = snapshot.len(),
            "Lookup cache miss"
        );
        snapshot
    }

    /// Ancestors of `concrete` that are assignable to the base type, in the
    /// order lookups merge them.
    #[must_use]
    pub fn ancestors(&self, concrete: TypeTag) -> Arc<[TypeTag]> {
        let mut state = self.lock();
        self.resolve_ancestors(&mut state.hierarchy_cache, concrete)
    }

    fn resolve_ancestors(
        &self,
        cache: &mut HashMap<TypeTag, Arc<[TypeTag]>>,
        concrete: TypeTag,
    ) -> Arc<[TypeTag]> {
        let ancestors = cache.entry(concrete).or_insert_with(|| {
            let resolved: Vec<TypeTag> = self
                .hierarchy
                .ancestors(concrete)
                .into_iter()
                .filter(|ty| self.hierarchy.is_assignable(*ty, self.base))
                .collect();
            trace!(
                event_type = %concrete,
                ancestor_count = resolved.len(),
                "Resolved ancestors"
            );
            resolved.into()
        });
        Arc::clone(ancestors)
    }

    /// Every registered subscription, in no particular order.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<Subscription<E>> {
        self.lock()
            .by_source_type
            .values()
            .flat_map(|bucket| bucket.iter().cloned())
            .collect()
    }

    /// Get the number of registered subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().by_source_type.values().map(Vec::len).sum()
    }

    /// Check if the registry has no subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().by_source_type.is_empty()
    }

    /// Dispose every subscription.
    pub fn clear(&self) {
        let mut state = self.lock();
        let buckets = std::mem::take(&mut state.by_source_type);
        if !buckets.is_empty() {
            state.lookup_cache.clear();
        }
        drop(state);

        for subscription in buckets.values().flatten() {
            subscription.mark_disposed();
        }
        debug!("All subscriptions cleared");
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState<E>> {
        lock_state(&self.state)
    }
}

impl<E: ?Sized + 'static> fmt::Debug for EventRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("EventRegistry")
            .field("base", &self.base)
            .field("declared_types", &state.by_source_type.len())
            .field("cached_lookups", &state.lookup_cache.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::TypeGraph;

    trait Event {}
    trait Cancellable {}
    struct Child;
    struct Sibling;
    struct Grandchild;
    struct Outsider;

    fn registry() -> EventRegistry<dyn Event> {
        let graph = TypeGraph::builder()
            .root::<dyn Event>()
            .root::<dyn Cancellable>()
            .root::<Outsider>()
            .extends::<Child, dyn Event>()
            .extends::<Sibling, dyn Event>()
            .declare(
                TypeTag::of::<Grandchild>(),
                &[TypeTag::of::<Child>(), TypeTag::of::<dyn Cancellable>()],
            )
            .build()
            .unwrap();
        EventRegistry::new(TypeTag::of::<dyn Event>(), Arc::new(graph)).unwrap()
    }

    fn sub(
        registry: &EventRegistry<dyn Event>,
        ty: TypeTag,
        priority: i32,
        name: &str,
    ) -> Subscription<dyn Event> {
        registry
            .subscribe_fn(ty, EventConfig::at(priority), name, |_| {})
            .unwrap()
    }

    fn names(subscriptions: &[Subscription<dyn Event>]) -> Vec<String> {
        subscriptions
            .iter()
            .map(|s| s.subscriber().name().to_string())
            .collect()
    }

    #[test]
    fn test_new_rejects_unknown_base() {
        let graph = TypeGraph::builder().root::<dyn Event>().build().unwrap();
        let err = EventRegistry::<dyn Event>::new(TypeTag::of::<Child>(), Arc::new(graph))
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_subscribe_rejects_type_outside_base() {
        let registry = registry();
        let err = registry
            .subscribe_fn(TypeTag::of::<Outsider>(), EventConfig::new(), "x", |_| {})
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(registry.is_empty());

        let err = registry
            .subscribe_fn(TypeTag::of::<dyn Cancellable>(), EventConfig::new(), "x", |_| {})
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_lookup_orders_by_priority() {
        let registry = registry();
        let a = sub(&registry, TypeTag::of::<dyn Event>(), 10, "a");
        let b = sub(&registry, TypeTag::of::<Child>(), 5, "b");

        let child = registry.lookup(TypeTag::of::<Child>());
        assert_eq!(&*child, &[b.clone(), a.clone()][..]);

        let sibling = registry.lookup(TypeTag::of::<Sibling>());
        assert_eq!(&*sibling, &[a][..]);
    }

    #[test]
    fn test_equal_priority_keeps_registration_order() {
        let registry = registry();
        sub(&registry, TypeTag::of::<dyn Event>(), 0, "x");
        sub(&registry, TypeTag::of::<dyn Event>(), 0, "y");
        sub(&registry, TypeTag::of::<dyn Event>(), 0, "z");

        let result = registry.lookup(TypeTag::of::<dyn Event>());
        assert_eq!(names(&result), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_cross_bucket_ties_follow_ancestor_order() {
        let registry = registry();
        sub(&registry, TypeTag::of::<dyn Event>(), 0, "event");
        sub(&registry, TypeTag::of::<Child>(), 0, "child");
        sub(&registry, TypeTag::of::<Grandchild>(), 0, "grandchild");

        let result = registry.lookup(TypeTag::of::<Grandchild>());
        assert_eq!(names(&result), vec!["grandchild", "child", "event"]);
    }

    #[test]
    fn test_ancestors_filtered_to_base() {
        let registry = registry();
        let ancestors = registry.ancestors(TypeTag::of::<Grandchild>());
        assert_eq!(
            &*ancestors,
            &[
                TypeTag::of::<Grandchild>(),
                TypeTag::of::<Child>(),
                TypeTag::of::<dyn Event>(),
            ][..]
        );

        assert!(registry.ancestors(TypeTag::of::<Outsider>()).is_empty());
    }

    #[test]
    fn test_lookup_outside_base_is_empty() {
        let registry = registry();
        sub(&registry, TypeTag::of::<dyn Event>(), 0, "a");
        assert!(registry.lookup(TypeTag::of::<Outsider>()).is_empty());
    }

    #[test]
    fn test_lookup_is_cached() {
        let registry = registry();
        sub(&registry, TypeTag::of::<dyn Event>(), 0, "a");

        let first = registry.lookup(TypeTag::of::<Child>());
        let second = registry.lookup(TypeTag::of::<Child>());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_subscribe_invalidates_cache() {
        let registry = registry();
        sub(&registry, TypeTag::of::<dyn Event>(), 0, "a");
        let before = registry.lookup(TypeTag::of::<Child>());

        sub(&registry, TypeTag::of::<Child>(), -1, "b");
        let after = registry.lookup(TypeTag::of::<Child>());

        assert_eq!(names(&before), vec!["a"]);
        assert_eq!(names(&after), vec!["b", "a"]);
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let registry = registry();
        let a = sub(&registry, TypeTag::of::<dyn Event>(), 0, "a");
        let b = sub(&registry, TypeTag::of::<dyn Event>(), 1, "b");

        a.dispose();
        assert!(a.is_disposed());
        let after_first = registry.lookup(TypeTag::of::<dyn Event>());
        assert_eq!(&*after_first, &[b.clone()][..]);

        a.dispose();
        let after_second = registry.lookup(TypeTag::of::<dyn Event>());
        assert!(Arc::ptr_eq(&after_first, &after_second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_dispose_after_registry_dropped() {
        let registry = registry();
        let a = sub(&registry, TypeTag::of::<dyn Event>(), 0, "a");
        drop(registry);

        a.dispose();
        assert!(a.is_disposed());
    }

    #[test]
    fn test_unsubscribe_if() {
        let registry = registry();
        sub(&registry, TypeTag::of::<dyn Event>(), 0, "keep");
        let drop_me = sub(&registry, TypeTag::of::<Child>(), 0, "drop");

        let removed = registry.unsubscribe_if(|s| s.subscriber().name() == "drop");
        assert_eq!(removed, 1);
        assert!(drop_me.is_disposed());
        assert_eq!(names(&registry.lookup(TypeTag::of::<Child>())), vec!["keep"]);

        // Disposing a subscription removed in bulk does nothing.
        let cached = registry.lookup(TypeTag::of::<Child>());
        drop_me.dispose();
        assert!(Arc::ptr_eq(&cached, &registry.lookup(TypeTag::of::<Child>())));
    }

    #[test]
    fn test_noop_unsubscribe_keeps_cache() {
        let registry = registry();
        sub(&registry, TypeTag::of::<dyn Event>(), 0, "a");
        let before = registry.lookup(TypeTag::of::<Child>());

        assert_eq!(registry.unsubscribe_if(|_| false), 0);

        let after = registry.lookup(TypeTag::of::<Child>());
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_try_unsubscribe_if_propagates_error() {
        #[derive(Debug)]
        struct Refused;
        impl fmt::Display for Refused {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("refused")
            }
        }
        impl std::error::Error for Refused {}

        let registry = registry();
        let a = sub(&registry, TypeTag::of::<dyn Event>(), 0, "a");
        let before = registry.lookup(TypeTag::of::<dyn Event>());

        let err = registry
            .try_unsubscribe_if(|_| Err::<bool, _>(Refused))
            .unwrap_err();
        let RegistryError::PredicateFailure { source } = err else {
            panic!("expected predicate failure");
        };
        assert!(source.downcast_ref::<Refused>().is_some());

        assert!(!a.is_disposed());
        assert!(Arc::ptr_eq(
            &before,
            &registry.lookup(TypeTag::of::<dyn Event>())
        ));
    }

    #[test]
    fn test_try_unsubscribe_if_keeps_earlier_buckets_removed() {
        let registry = registry();
        let parents = [
            sub(&registry, TypeTag::of::<dyn Event>(), 0, "p0"),
            sub(&registry, TypeTag::of::<dyn Event>(), 0, "p1"),
        ];
        let children = [
            sub(&registry, TypeTag::of::<Child>(), 0, "c0"),
            sub(&registry, TypeTag::of::<Child>(), 0, "c1"),
        ];
        let before = registry.lookup(TypeTag::of::<Child>());

        // Accept the first bucket visited, refuse the next one.
        let mut first = None;
        let err = registry
            .try_unsubscribe_if(|s| {
                let ty = *first.get_or_insert(s.event_type());
                if s.event_type() == ty {
                    Ok(true)
                } else {
                    Err("refused")
                }
            })
            .unwrap_err();
        assert!(matches!(err, RegistryError::PredicateFailure { .. }));

        let (gone, kept) = if first == Some(TypeTag::of::<Child>()) {
            (&children, &parents)
        } else {
            (&parents, &children)
        };
        assert!(gone.iter().all(Subscription::is_disposed));
        assert!(kept.iter().all(|s| !s.is_disposed()));

        let after = registry.lookup(TypeTag::of::<Child>());
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(&*after, &kept[..]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_panicking_predicate_leaves_cache_coherent() {
        let registry = registry();
        let parent = sub(&registry, TypeTag::of::<dyn Event>(), 0, "parent");
        let child = sub(&registry, TypeTag::of::<Child>(), 0, "child");
        let warmed = registry.lookup(TypeTag::of::<Child>());
        assert_eq!(warmed.len(), 2);

        // Remove everything in the first bucket visited, panic on the next.
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut first = None;
            registry.unsubscribe_if(|s| {
                let ty = *first.get_or_insert(s.event_type());
                assert!(s.event_type() == ty, "predicate failed on {}", s.event_type());
                true
            })
        }));
        assert!(outcome.is_err());

        let (gone, kept) = if parent.is_disposed() {
            (&parent, &child)
        } else {
            (&child, &parent)
        };
        assert!(gone.is_disposed());
        assert!(!kept.is_disposed());

        let after = registry.lookup(TypeTag::of::<Child>());
        assert!(!Arc::ptr_eq(&warmed, &after));
        assert_eq!(&*after, &[kept.clone()][..]);
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_try_unsubscribe_if_success() {
        let registry = registry();
        sub(&registry, TypeTag::of::<dyn Event>(), 0, "a");
        sub(&registry, TypeTag::of::<Child>(), 0, "b");

        let removed = registry
            .try_unsubscribe_if(|s| Ok::<_, PredicateError>(s.priority() == 0))
            .unwrap();
        assert_eq!(removed, 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clear() {
        let registry = registry();
        let a = sub(&registry, TypeTag::of::<dyn Event>(), 0, "a");
        sub(&registry, TypeTag::of::<Child>(), 0, "b");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.subscriptions().len(), 2);

        let before = registry.lookup(TypeTag::of::<Child>());
        registry.clear();

        assert!(registry.is_empty());
        assert!(a.is_disposed());
        assert_eq!(before.len(), 2);
        assert!(registry.lookup(TypeTag::of::<Child>()).is_empty());
    }
}
