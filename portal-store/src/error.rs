//! Error types for the store layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The domain validator rejected the input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No entity has the given identifier.
    #[error("entity not found: {0}")]
    NotFound(String),

    /// An identifier is already in use.
    #[error("duplicate entity id: {0}")]
    DuplicateId(String),

    /// Another entity already holds the policy's unique key.
    #[error("unique key {key} already used by entity {existing}")]
    Conflict { key: String, existing: String },

    /// An entity or update did not serialize to a JSON object.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// True for [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// True for [`StoreError::Conflict`].
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// True for [`StoreError::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
