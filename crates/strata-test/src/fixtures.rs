//! Test fixtures: a small event hierarchy.
//!
//! ```text
//! dyn Event ──┬── ChildEvent ──────┐
//!             └── OtherChildEvent   ├── GrandchildEvent
//! dyn Cancellable ──────────────────┘
//!
//! Unrelated (outside the Event tree)
//! ```

use std::sync::Arc;

use strata_events::{EventRegistry, TypeGraph, TypeHierarchy, TypeTag};

/// Base event trait of the fixture hierarchy.
pub trait Event: Send + Sync {
    /// Tag of the concrete event type.
    fn type_tag(&self) -> TypeTag;
}

/// Interface implemented by some events, outside the `Event` tree.
pub trait Cancellable {}

/// Direct subtype of `Event`.
#[derive(Debug, Default)]
pub struct ChildEvent;

/// Sibling of [`ChildEvent`].
#[derive(Debug, Default)]
pub struct OtherChildEvent;

/// Subtype of [`ChildEvent`] that is also [`Cancellable`].
#[derive(Debug, Default)]
pub struct GrandchildEvent;

/// A type that is not an event.
#[derive(Debug, Default)]
pub struct Unrelated;

impl Event for ChildEvent {
    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<Self>()
    }
}

impl Event for OtherChildEvent {
    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<Self>()
    }
}

impl Event for GrandchildEvent {
    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<Self>()
    }
}

impl Cancellable for GrandchildEvent {}

/// Tag of the base event type.
#[must_use]
pub fn event_tag() -> TypeTag {
    TypeTag::of::<dyn Event>()
}

/// The fixture hierarchy.
///
/// # Panics
///
/// Never in practice; the declarations are static and well ordered.
#[must_use]
pub fn standard_hierarchy() -> Arc<dyn TypeHierarchy> {
    let graph = TypeGraph::builder()
        .root::<dyn Event>()
        .root::<dyn Cancellable>()
        .root::<Unrelated>()
        .extends::<ChildEvent, dyn Event>()
        .extends::<OtherChildEvent, dyn Event>()
        .declare(
            TypeTag::of::<GrandchildEvent>(),
            &[TypeTag::of::<ChildEvent>(), TypeTag::of::<dyn Cancellable>()],
        )
        .build()
        .expect("fixture hierarchy is well formed");
    Arc::new(graph)
}

/// An empty registry over the fixture hierarchy with `dyn Event` as base.
///
/// # Panics
///
/// Never in practice; the base type is declared by [`standard_hierarchy`].
#[must_use]
pub fn standard_registry() -> EventRegistry<dyn Event> {
    EventRegistry::new(event_tag(), standard_hierarchy()).expect("base type is declared")
}

/// Deliver `event` to its subscribers in lookup order.
///
/// A minimal stand-in for a dispatcher. Returns how many subscribers ran.
pub fn deliver(registry: &EventRegistry<dyn Event>, event: &(dyn Event + 'static)) -> usize {
    let subscriptions = registry.lookup(event.type_tag());
    for subscription in subscriptions.iter() {
        subscription.subscriber().on_event(event);
    }
    subscriptions.len()
}
