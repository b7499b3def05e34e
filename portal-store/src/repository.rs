//! Backend-agnostic repository contract.
//!
//! Domain services talk to an `EntityRepository` rather than to a concrete
//! store, so the in-memory [`EntityStore`] can later be swapped for a
//! network-backed implementation without touching callers.

use crate::error::StoreResult;
use crate::store::EntityStore;
use async_trait::async_trait;
use portal_model::{EntityPolicy, FieldSelector};

/// Predicate accepted by [`EntityRepository::filter`].
pub type Predicate<'a, E> = &'a (dyn Fn(&E) -> bool + Send + Sync);

/// Asynchronous CRUD, batch, search and filter operations over one entity type.
#[async_trait]
pub trait EntityRepository: Send + Sync {
    type Entity: Send + Sync;
    type CreateInput: Send;
    type UpdateInput: Send;

    /// Every entity, in the repository's natural order.
    async fn get_all(&self) -> StoreResult<Vec<Self::Entity>>;

    /// The entity with `id`; absence is `Ok(None)`, not an error.
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Self::Entity>>;

    async fn create(&self, input: Self::CreateInput) -> StoreResult<Self::Entity>;

    /// Fails with `NotFound` if `id` is unknown.
    async fn update(&self, id: &str, input: Self::UpdateInput) -> StoreResult<Self::Entity>;

    /// Fails with `NotFound` if `id` is unknown.
    async fn delete(&self, id: &str) -> StoreResult<()>;

    async fn search(
        &self,
        query: &str,
        fields: Option<&[FieldSelector]>,
    ) -> StoreResult<Vec<Self::Entity>>;

    async fn filter(&self, predicate: Predicate<'_, Self::Entity>)
    -> StoreResult<Vec<Self::Entity>>;

    async fn count(&self) -> StoreResult<usize>;

    async fn exists(&self, id: &str) -> StoreResult<bool>;

    async fn create_many(&self, inputs: Vec<Self::CreateInput>) -> StoreResult<Vec<Self::Entity>>;

    /// Ignores unknown ids. Returns how many entities were removed.
    async fn delete_many(&self, ids: &[String]) -> StoreResult<usize>;
}

#[async_trait]
impl<P: EntityPolicy> EntityRepository for EntityStore<P> {
    type Entity = P::Entity;
    type CreateInput = P::CreateInput;
    type UpdateInput = P::UpdateInput;

    async fn get_all(&self) -> StoreResult<Vec<P::Entity>> {
        EntityStore::get_all(self).await
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<P::Entity>> {
        EntityStore::get_by_id(self, id).await
    }

    async fn create(&self, input: P::CreateInput) -> StoreResult<P::Entity> {
        EntityStore::create(self, input).await
    }

    async fn update(&self, id: &str, input: P::UpdateInput) -> StoreResult<P::Entity> {
        EntityStore::update(self, id, input).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        EntityStore::delete(self, id).await
    }

    async fn search(
        &self,
        query: &str,
        fields: Option<&[FieldSelector]>,
    ) -> StoreResult<Vec<P::Entity>> {
        EntityStore::search(self, query, fields).await
    }

    async fn filter(&self, predicate: Predicate<'_, P::Entity>) -> StoreResult<Vec<P::Entity>> {
        EntityStore::filter(self, predicate).await
    }

    async fn count(&self) -> StoreResult<usize> {
        EntityStore::count(self).await
    }

    async fn exists(&self, id: &str) -> StoreResult<bool> {
        EntityStore::exists(self, id).await
    }

    async fn create_many(&self, inputs: Vec<P::CreateInput>) -> StoreResult<Vec<P::Entity>> {
        EntityStore::create_many(self, inputs).await
    }

    async fn delete_many(&self, ids: &[String]) -> StoreResult<usize> {
        EntityStore::delete_many(self, ids).await
    }
}
