//! Service catalog items offered in budgets.

use crate::clock::{system_clock, Clock};
use chrono::{DateTime, Utc};
use portal_model::{Entity, EntityPolicy, FieldSelector};
use portal_store::{EntityRepository, EntityStore, StoreConfig, StoreResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub code: String,
    pub name: String,
    pub category: String,
    pub unit_price: u64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Entity for CatalogItem {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone)]
pub struct NewCatalogItem {
    pub code: String,
    pub name: String,
    pub category: String,
    pub unit_price: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

pub struct CatalogPolicy {
    clock: Clock,
}

impl CatalogPolicy {
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }
}

impl Default for CatalogPolicy {
    fn default() -> Self {
        Self::new(system_clock)
    }
}

impl EntityPolicy for CatalogPolicy {
    type Entity = CatalogItem;
    type CreateInput = NewCatalogItem;
    type UpdateInput = CatalogItemUpdate;

    fn build_entity(&self, id: String, input: NewCatalogItem) -> CatalogItem {
        CatalogItem {
            id,
            code: input.code,
            name: input.name.trim().to_string(),
            category: input.category.trim().to_string(),
            unit_price: input.unit_price,
            active: true,
            created_at: (self.clock)(),
        }
    }

    fn validate_create(&self, input: &NewCatalogItem) -> Result<(), String> {
        if input.code.trim().is_empty() {
            return Err("item code is required".into());
        }
        if input.name.trim().is_empty() {
            return Err("item name is required".into());
        }
        Ok(())
    }

    fn validate_update(&self, input: &CatalogItemUpdate) -> Result<(), String> {
        if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err("item name cannot be blank".into());
        }
        Ok(())
    }

    fn unique_key(&self, item: &CatalogItem) -> Option<String> {
        Some(normalize_code(&item.code))
    }

    fn normalize(&self, mut item: CatalogItem) -> CatalogItem {
        item.code = normalize_code(&item.code);
        item
    }
}

pub type CatalogRepository = dyn EntityRepository<
        Entity = CatalogItem,
        CreateInput = NewCatalogItem,
        UpdateInput = CatalogItemUpdate,
    >;

/// Catalog management on top of any catalog repository.
pub struct CatalogService {
    repo: Arc<CatalogRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<CatalogRepository>) -> Self {
        Self { repo }
    }

    /// Backs the service with an in-memory store.
    pub fn in_memory(
        policy: CatalogPolicy,
        seed: Vec<CatalogItem>,
        config: StoreConfig,
    ) -> StoreResult<Self> {
        let store = EntityStore::new(policy, seed, config)?;
        Ok(Self::new(Arc::new(store)))
    }

    pub fn repository(&self) -> &Arc<CatalogRepository> {
        &self.repo
    }

    pub async fn list(&self) -> StoreResult<Vec<CatalogItem>> {
        self.repo.get_all().await
    }

    pub async fn get(&self, id: &str) -> StoreResult<Option<CatalogItem>> {
        self.repo.get_by_id(id).await
    }

    pub async fn count(&self) -> StoreResult<usize> {
        self.repo.count().await
    }

    /// Creates an item. Fails with `Conflict` if the code is already in the
    /// catalog, ignoring case.
    pub async fn create(&self, input: NewCatalogItem) -> StoreResult<CatalogItem> {
        let item = self.repo.create(input).await?;
        info!(item_id = %item.id, code = %item.code, "Catalog item created");
        Ok(item)
    }

    pub async fn update(&self, id: &str, update: CatalogItemUpdate) -> StoreResult<CatalogItem> {
        let item = self.repo.update(id, update).await?;
        info!(item_id = %item.id, "Catalog item updated");
        Ok(item)
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.repo.delete(id).await?;
        info!(item_id = %id, "Catalog item deleted");
        Ok(())
    }

    /// Free-text search over code, name and category.
    pub async fn search(&self, query: &str) -> StoreResult<Vec<CatalogItem>> {
        let fields = [
            FieldSelector::key("code"),
            FieldSelector::key("name"),
            FieldSelector::key("category"),
        ];
        self.repo.search(query, Some(&fields)).await
    }

    /// Case-insensitive code lookup.
    pub async fn find_by_code(&self, code: &str) -> StoreResult<Option<CatalogItem>> {
        let wanted = normalize_code(code);
        let matches = self
            .repo
            .filter(&|item: &CatalogItem| item.code == wanted)
            .await?;
        Ok(matches.into_iter().next())
    }

    pub async fn by_category(&self, category: &str) -> StoreResult<Vec<CatalogItem>> {
        let wanted = category.trim().to_lowercase();
        self.repo
            .filter(&|item: &CatalogItem| item.category.to_lowercase() == wanted)
            .await
    }

    pub async fn active_items(&self) -> StoreResult<Vec<CatalogItem>> {
        self.repo.filter(&|item: &CatalogItem| item.active).await
    }

    pub async fn deactivate(&self, id: &str) -> StoreResult<CatalogItem> {
        self.update(
            id,
            CatalogItemUpdate {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
    }
}
