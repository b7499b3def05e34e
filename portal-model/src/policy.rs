use crate::Entity;

/// Per-domain hooks a store needs to construct and validate entities.
///
/// Each domain (clients, budgets, catalog items, ...) implements this once
/// and hands it to a generic store. The store owns identifier assignment,
/// ordering, copying and update merging; the policy owns everything
/// domain-shaped.
///
/// Implement the optional hooks only if you need them:
/// - `validate_update`: reject malformed partial updates (default accepts all)
/// - `unique_key`: a domain key no two entities may share (default none)
/// - `normalize`: restore derived attributes after build or merge (default identity)
pub trait EntityPolicy: Send + Sync + 'static {
    /// The stored record type.
    type Entity: Entity;
    /// Data accepted by `create`: no identifier, no lifecycle-managed fields.
    type CreateInput: Send + Sync;
    /// Partial attributes merged by `update`. Absent attributes must be
    /// omitted from the serialized form.
    type UpdateInput: serde::Serialize + Send + Sync;

    /// Builds a full entity from creation input and a freshly generated id,
    /// filling domain defaults and timestamps.
    fn build_entity(&self, id: String, input: Self::CreateInput) -> Self::Entity;

    /// Validate creation input before anything is generated or stored.
    /// Return `Err(reason)` to reject the write.
    fn validate_create(&self, input: &Self::CreateInput) -> Result<(), String>;

    /// Validate update input before it is merged.
    /// Return `Err(reason)` to reject the write.
    fn validate_update(&self, input: &Self::UpdateInput) -> Result<(), String> {
        let _ = input;
        Ok(())
    }

    /// Domain key that must be unique within a store, such as a tax id.
    ///
    /// The store compares keys inside the same write step that inserts or
    /// replaces the entity, so concurrent writers cannot both claim a key.
    fn unique_key(&self, entity: &Self::Entity) -> Option<String> {
        let _ = entity;
        None
    }

    /// Canonicalizes an entity before it is stored.
    ///
    /// Applied to seeds, freshly built entities and merged updates, so
    /// derived attributes (totals, normalized codes) cannot drift from the
    /// attributes they derive from.
    fn normalize(&self, entity: Self::Entity) -> Self::Entity {
        entity
    }
}
