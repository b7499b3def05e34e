//! Entity model for the portal data layer.
//!
//! Defines the types every store and domain service agrees on:
//! - [`Entity`]: a uniquely identified record with a JSON document view
//! - [`Record`]: a schemaless entity (id plus arbitrary JSON attributes)
//! - [`EntityPolicy`]: the per-domain construction and validation hooks
//! - [`FieldSelector`]: names an attribute to search (top-level key or JSON pointer)
//!
//! Stores operate on documents (the serialized JSON object of an entity) for
//! the parts of their contract that are attribute-generic: update merging and
//! text search. Everything else stays typed.

mod entity;
mod fields;
mod policy;

pub use entity::{Entity, Record};
pub use fields::{text_attributes, FieldSelector};
pub use policy::EntityPolicy;
