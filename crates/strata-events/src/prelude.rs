//! Prelude module - commonly used types for convenient import.
//!
//! Use `use strata_events::prelude::*;` to import all essential types.

// Registry
pub use crate::{EventRegistry, Subscription, SubscriptionId};

// Types and hierarchy
pub use crate::{TypeGraph, TypeHierarchy, TypeTag};

// Subscribers and config
pub use crate::{EventConfig, EventSubscriber, FnSubscriber};

// Errors
pub use crate::{RegistryError, RegistryResult};
