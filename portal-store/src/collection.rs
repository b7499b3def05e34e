//! The ordered, id-unique backing collection of a store.

use crate::error::{StoreError, StoreResult};
use portal_model::Entity;
use std::collections::HashSet;

/// Entities in insertion order with unique identifiers.
#[derive(Debug, Clone)]
pub(crate) struct Collection<E> {
    items: Vec<E>,
}

impl<E: Entity> Collection<E> {
    /// Builds a collection from a seed, rejecting duplicate identifiers.
    pub(crate) fn from_seed(seed: Vec<E>) -> StoreResult<Self> {
        {
            let mut seen = HashSet::with_capacity(seed.len());
            for entity in &seed {
                if !seen.insert(entity.id()) {
                    return Err(StoreError::DuplicateId(entity.id().to_string()));
                }
            }
        }
        Ok(Self { items: seed })
    }

    pub(crate) fn empty() -> Self {
        Self { items: Vec::new() }
    }

    pub(crate) fn items(&self) -> &[E] {
        &self.items
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|e| e.id() == id)
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub(crate) fn get(&self, id: &str) -> Option<&E> {
        self.items.iter().find(|e| e.id() == id)
    }

    /// Replaces the entity at `index`, keeping its position.
    pub(crate) fn replace(&mut self, index: usize, entity: E) {
        self.items[index] = entity;
    }

    /// Appends entities whose identifiers the caller has already checked.
    pub(crate) fn extend(&mut self, entities: impl IntoIterator<Item = E>) {
        self.items.extend(entities);
    }

    pub(crate) fn remove(&mut self, index: usize) -> E {
        self.items.remove(index)
    }

    /// Removes every entity whose id is in `ids`. Returns how many were removed.
    pub(crate) fn remove_all(&mut self, ids: &HashSet<&str>) -> usize {
        let before = self.items.len();
        self.items.retain(|e| !ids.contains(e.id()));
        before - self.items.len()
    }
}
