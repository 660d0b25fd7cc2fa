//! Strata Test - Shared test utilities for the Strata event registry.
//!
//! This crate provides a standard event hierarchy and recording subscribers
//! that can be used across Strata crates as a dev-dependency.
//!
//! # Usage
//!
//! ```rust
//! use strata_test::{ChildEvent, Recorder, deliver, standard_registry};
//! use strata_events::{EventConfig, TypeTag};
//!
//! let registry = standard_registry();
//! let recorder = Recorder::new();
//! registry
//!     .subscribe(TypeTag::of::<ChildEvent>(), EventConfig::new(), recorder.subscriber("a"))
//!     .unwrap();
//!
//! deliver(&registry, &ChildEvent);
//! assert_eq!(recorder.calls(), vec!["a"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
