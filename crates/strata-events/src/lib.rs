//! Strata Events - Hierarchy-aware subscription registry.
//!
//! This crate provides:
//! - Identity-compared type tags and a pluggable type hierarchy
//! - A registry filing subscriptions under declared event types
//! - Priority-ordered lookups over a concrete type's ancestors, cached until
//!   the subscription set changes
//!
//! # Architecture
//!
//! An `EventRegistry<E>` owns every subscription for one base event type.
//! A subscription declared for type `D` applies to every concrete type that
//! is assignable to `D`. Looking up a concrete type merges the subscriptions
//! of all its ancestors and sorts them by priority, lowest first.
//!
//! The registry only does bookkeeping. Delivering an event means looking up
//! its concrete type and calling each subscriber in order, which is left to
//! the caller.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use strata_events::{EventConfig, EventRegistry, TypeGraph, TypeTag};
//!
//! trait Event {}
//! struct Opened;
//! struct Closed;
//! impl Event for Opened {}
//! impl Event for Closed {}
//!
//! # fn main() -> Result<(), strata_events::RegistryError> {
//! let graph = TypeGraph::builder()
//!     .root::<dyn Event>()
//!     .extends::<Opened, dyn Event>()
//!     .extends::<Closed, dyn Event>()
//!     .build()?;
//! let registry = EventRegistry::<dyn Event>::new(TypeTag::of::<dyn Event>(), Arc::new(graph))?;
//!
//! registry.subscribe_fn(TypeTag::of::<dyn Event>(), EventConfig::at(10), "log", |_| {})?;
//! registry.subscribe_fn(TypeTag::of::<Opened>(), EventConfig::at(5), "count", |_| {})?;
//!
//! let event = Opened;
//! for subscription in registry.lookup(TypeTag::of::<Opened>()).iter() {
//!     subscription.subscriber().on_event(&event);
//! }
//!
//! assert_eq!(registry.lookup(TypeTag::of::<Closed>()).len(), 1);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod config;
mod error;
mod hierarchy;
mod registry;
mod subscriber;
mod subscription;
mod tag;

pub use config::{DEFAULT_PRIORITY, EventConfig};
pub use error::{PredicateError, RegistryError, RegistryResult};
pub use hierarchy::{TypeGraph, TypeGraphBuilder, TypeHierarchy};
pub use registry::EventRegistry;
pub use subscriber::{EventSubscriber, FnSubscriber};
pub use subscription::{Subscription, SubscriptionId};
pub use tag::TypeTag;
