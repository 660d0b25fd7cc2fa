//! Per-subscription configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority used when none is configured.
pub const DEFAULT_PRIORITY: i32 = 0;

/// Configuration attached to a subscription.
///
/// Subscriptions are ordered by `priority`, lowest first. Ties keep
/// registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Dispatch priority. Lower values run earlier.
    pub priority: i32,
    /// Optional label for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EventConfig {
    /// Create a config with the default priority.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with the given priority.
    #[must_use]
    pub fn at(priority: i32) -> Self {
        Self::new().with_priority(priority)
    }

    /// Set the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the diagnostic label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The dispatch priority.
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }
}

impl fmt::Display for EventConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}@{}", self.priority),
            None => write!(f, "@{}", self.priority),
        }
    }
}
