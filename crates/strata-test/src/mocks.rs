//! Recording subscribers and logging for tests.

use std::sync::{Arc, Mutex, PoisonError};

use strata_events::EventSubscriber;

use crate::fixtures::Event;

/// Shared log of subscriber invocations.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A subscriber that records `label` each time it is invoked.
    #[must_use]
    pub fn subscriber(&self, label: &str) -> Arc<dyn EventSubscriber<dyn Event>> {
        Arc::new(RecordingSubscriber {
            label: label.to_string(),
            calls: Arc::clone(&self.calls),
        })
    }

    /// Labels recorded so far, in invocation order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget recorded calls.
    pub fn reset(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Subscriber created by [`Recorder::subscriber`].
#[derive(Debug)]
pub struct RecordingSubscriber {
    label: String,
    calls: Arc<Mutex<Vec<String>>>,
}

impl EventSubscriber<dyn Event> for RecordingSubscriber {
    fn on_event(&self, _event: &(dyn Event + 'static)) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(self.label.clone());
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Install a test-friendly tracing subscriber.
///
/// Honors `RUST_LOG`, defaulting to `strata_events=trace`. Safe to call from
/// every test; only the first call installs anything.
pub fn init_test_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("strata_events=trace"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
