//! Core primitives for the portal data layer.
//!
//! This crate defines the domain-agnostic building blocks every store
//! depends on:
//! - Identifier generators (time + random default, UUID v7, sequential)
//! - A monotonic millisecond clock backing time-based identifiers
//! - [`Error`] for identifiers, strategies and timestamps that fail to parse
//!
//! Entity shapes and store behavior live in `portal-model` and
//! `portal-store`, not here.

mod ids;
mod timestamp;

pub use ids::{
    IdGenerator, IdStrategy, SequentialIdGenerator, TimeRandomIdGenerator, UuidV7IdGenerator,
};
pub use timestamp::{wall_millis, MonotonicClock};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing identifiers and id settings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown id strategy: {0}")]
    UnknownIdStrategy(String),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
