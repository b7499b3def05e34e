//! In-memory entity store for the portal data layer.
//!
//! Stands in for a future remote backend: every operation is asynchronous
//! and awaits a simulated network delay, so UI code and domain services are
//! written against the same contract they will use in production.
//!
//! # Architecture
//!
//! - [`EntityStore`] owns an ordered, id-unique collection for one entity type
//! - Domain behavior (construction, validation) comes from an
//!   [`EntityPolicy`](portal_model::EntityPolicy)
//! - Latency is a pluggable [`Latency`] strategy ([`NoLatency`] for tests)
//! - Identifiers come from the configured [`IdGenerator`](portal_types::IdGenerator)
//! - [`EntityRepository`] is the backend-agnostic seam domain services depend on
//!
//! The store never logs; logging belongs to the services composing it.

mod collection;
mod config;
mod document;
mod error;
mod latency;
mod repository;
mod store;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use latency::{FixedLatency, JitterLatency, Latency, NoLatency, DEFAULT_DELAY};
pub use repository::{EntityRepository, Predicate};
pub use store::{EntityStore, MAX_ID_ATTEMPTS};
