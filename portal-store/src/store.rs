//! The generic in-memory entity store.

use crate::collection::Collection;
use crate::config::StoreConfig;
use crate::document;
use crate::error::{StoreError, StoreResult};
use portal_model::{Entity, EntityPolicy, FieldSelector};
use std::collections::HashSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// How many identifiers `create` draws before giving up on collisions.
pub const MAX_ID_ATTEMPTS: usize = 8;

/// An in-memory repository for one entity type.
///
/// Every asynchronous operation awaits the configured latency exactly once,
/// then reads or writes the collection in a single step that never
/// suspends. Readers therefore never observe a half-applied write, and
/// concurrent operations complete in the order their delays elapse.
///
/// All reads return owned copies; the only way to change what the store
/// holds is through its write operations.
pub struct EntityStore<P: EntityPolicy> {
    policy: P,
    collection: RwLock<Collection<P::Entity>>,
    config: StoreConfig,
}

impl<P: EntityPolicy> EntityStore<P> {
    /// Creates a store seeded with `seed`, in order. Seeds pass through
    /// [`EntityPolicy::normalize`].
    ///
    /// Fails with [`StoreError::DuplicateId`] if two seed entities share an
    /// id, or [`StoreError::Conflict`] if two share a unique key.
    pub fn new(policy: P, seed: Vec<P::Entity>, config: StoreConfig) -> StoreResult<Self> {
        let collection = seeded(&policy, seed)?;
        Ok(Self {
            policy,
            collection: RwLock::new(collection),
            config,
        })
    }

    /// Creates an empty store.
    pub fn empty(policy: P, config: StoreConfig) -> Self {
        Self {
            policy,
            collection: RwLock::new(Collection::empty()),
            config,
        }
    }

    /// The domain policy this store builds and validates with.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Latency and id generation settings.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Returns every entity in insertion order.
    pub async fn get_all(&self) -> StoreResult<Vec<P::Entity>> {
        self.config.latency.wait().await;
        Ok(self.read().items().to_vec())
    }

    /// Returns the entity with `id`, or `None` if there is none.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<P::Entity>> {
        self.config.latency.wait().await;
        Ok(self.read().get(id).cloned())
    }

    /// Case-insensitive substring search.
    ///
    /// With `fields` set and non-empty only those attributes are searched;
    /// otherwise every top-level string attribute is. An empty query
    /// returns every entity.
    pub async fn search(
        &self,
        query: &str,
        fields: Option<&[FieldSelector]>,
    ) -> StoreResult<Vec<P::Entity>> {
        self.config.latency.wait().await;
        let needle = query.to_lowercase();
        let collection = self.read();
        let mut matches = Vec::new();
        for entity in collection.items() {
            let document = entity.to_document()?;
            if document::matches_query(&document, &needle, fields) {
                matches.push(entity.clone());
            }
        }
        Ok(matches)
    }

    /// Returns every entity for which `predicate` holds, in insertion order.
    pub async fn filter<F>(&self, predicate: F) -> StoreResult<Vec<P::Entity>>
    where
        F: Fn(&P::Entity) -> bool + Send,
    {
        self.config.latency.wait().await;
        Ok(self
            .read()
            .items()
            .iter()
            .filter(|e| predicate(*e))
            .cloned()
            .collect())
    }

    pub async fn count(&self) -> StoreResult<usize> {
        self.config.latency.wait().await;
        Ok(self.read().len())
    }

    pub async fn exists(&self, id: &str) -> StoreResult<bool> {
        self.config.latency.wait().await;
        Ok(self.read().contains(id))
    }

    // ── Writes ───────────────────────────────────────────────────

    /// Validates `input`, builds an entity under a fresh id and appends it.
    pub async fn create(&self, input: P::CreateInput) -> StoreResult<P::Entity> {
        self.config.latency.wait().await;
        self.policy
            .validate_create(&input)
            .map_err(StoreError::Validation)?;

        let mut collection = self.write();
        let id = self.fresh_id(&collection, &HashSet::new())?;
        let entity = self.policy.normalize(self.policy.build_entity(id, input));
        if collection.contains(entity.id()) {
            return Err(StoreError::DuplicateId(entity.id().to_string()));
        }
        check_unique(&self.policy, collection.items(), &entity, None)?;
        collection.extend([entity.clone()]);
        Ok(entity)
    }

    /// Merges `input` into the entity with `id`, keeping its position and id.
    ///
    /// Fails with [`StoreError::NotFound`] before validating if the id is unknown.
    pub async fn update(&self, id: &str, input: P::UpdateInput) -> StoreResult<P::Entity> {
        self.config.latency.wait().await;
        let mut collection = self.write();
        let index = collection
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.policy
            .validate_update(&input)
            .map_err(StoreError::Validation)?;

        let patch = serde_json::to_value(&input)?;
        let merged = document::merge_update(&collection.items()[index], patch)?;
        let updated = self.policy.normalize(merged);
        check_unique(&self.policy, collection.items(), &updated, Some(index))?;
        collection.replace(index, updated.clone());
        Ok(updated)
    }

    /// Removes the entity with `id`.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.config.latency.wait().await;
        let mut collection = self.write();
        let index = collection
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        collection.remove(index);
        Ok(())
    }

    /// Creates several entities at once, all or nothing.
    ///
    /// Every input is validated before anything is built; the first failure
    /// is returned and the collection is left untouched. A unique key clash,
    /// with a stored entity or within the batch, also leaves it untouched.
    /// On success the new entities are appended in input order.
    pub async fn create_many(
        &self,
        inputs: Vec<P::CreateInput>,
    ) -> StoreResult<Vec<P::Entity>> {
        self.config.latency.wait().await;
        for input in &inputs {
            self.policy
                .validate_create(input)
                .map_err(StoreError::Validation)?;
        }

        let mut collection = self.write();
        let mut taken = HashSet::with_capacity(inputs.len());
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            let id = self.fresh_id(&collection, &taken)?;
            let entity = self.policy.normalize(self.policy.build_entity(id, input));
            if collection.contains(entity.id()) || !taken.insert(entity.id().to_string()) {
                return Err(StoreError::DuplicateId(entity.id().to_string()));
            }
            check_unique(&self.policy, collection.items(), &entity, None)?;
            check_unique(&self.policy, &created, &entity, None)?;
            created.push(entity);
        }
        collection.extend(created.iter().cloned());
        Ok(created)
    }

    /// Removes every entity whose id is listed. Unknown ids are ignored.
    /// Returns how many entities were removed.
    pub async fn delete_many<S>(&self, ids: &[S]) -> StoreResult<usize>
    where
        S: AsRef<str> + Sync,
    {
        self.config.latency.wait().await;
        let ids: HashSet<&str> = ids.iter().map(AsRef::as_ref).collect();
        Ok(self.write().remove_all(&ids))
    }

    // ── Inspection ───────────────────────────────────────────────

    /// Replaces the whole collection immediately, without simulated latency.
    pub fn reset(&self, entities: Vec<P::Entity>) -> StoreResult<()> {
        let replacement = seeded(&self.policy, entities)?;
        *self.write() = replacement;
        Ok(())
    }

    /// Copies the current collection immediately, without simulated latency.
    pub fn snapshot(&self) -> Vec<P::Entity> {
        self.read().items().to_vec()
    }

    fn fresh_id(
        &self,
        collection: &Collection<P::Entity>,
        pending: &HashSet<String>,
    ) -> StoreResult<String> {
        let mut last = String::new();
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.config.id_generator.generate();
            if !collection.contains(&id) && !pending.contains(&id) {
                return Ok(id);
            }
            last = id;
        }
        Err(StoreError::DuplicateId(last))
    }

    fn read(&self) -> RwLockReadGuard<'_, Collection<P::Entity>> {
        self.collection.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collection<P::Entity>> {
        self.collection
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn seeded<P: EntityPolicy>(
    policy: &P,
    seed: Vec<P::Entity>,
) -> StoreResult<Collection<P::Entity>> {
    let normalized = seed.into_iter().map(|e| policy.normalize(e)).collect();
    let collection = Collection::from_seed(normalized)?;
    let items = collection.items();
    for (index, entity) in items.iter().enumerate() {
        check_unique(policy, items, entity, Some(index))?;
    }
    Ok(collection)
}

/// Fails with `Conflict` if any entity in `items`, other than the one at
/// `skip`, shares `candidate`'s unique key.
fn check_unique<P: EntityPolicy>(
    policy: &P,
    items: &[P::Entity],
    candidate: &P::Entity,
    skip: Option<usize>,
) -> StoreResult<()> {
    let Some(key) = policy.unique_key(candidate) else {
        return Ok(());
    };
    let clash = items
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != skip)
        .find(|(_, other)| policy.unique_key(other).as_deref() == Some(key.as_str()));
    match clash {
        Some((_, existing)) => Err(StoreError::Conflict {
            key,
            existing: existing.id().to_string(),
        }),
        None => Ok(()),
    }
}
