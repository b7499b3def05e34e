//! Budgets (quotes) issued to clients.
//!
//! Amounts are integer minor currency units. A budget's `total` is always
//! the sum of its lines: [`BudgetPolicy`] recomputes it every time the store
//! seeds, builds or merges a budget, so no update path can set it directly.

use crate::clock::{system_clock, Clock};
use chrono::{DateTime, Utc};
use portal_model::{Entity, EntityPolicy, FieldSelector};
use portal_store::{EntityRepository, EntityStore, StoreConfig, StoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    #[default]
    Draft,
    Sent,
    Approved,
    Rejected,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => f.write_str("draft"),
            Self::Sent => f.write_str("sent"),
            Self::Approved => f.write_str("approved"),
            Self::Rejected => f.write_str("rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub description: String,
    pub quantity: u32,
    pub unit_price: u64,
}

impl BudgetLine {
    pub fn new(description: &str, quantity: u32, unit_price: u64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    pub fn subtotal(&self) -> u64 {
        u64::from(self.quantity).saturating_mul(self.unit_price)
    }
}

fn total_of(lines: &[BudgetLine]) -> u64 {
    lines
        .iter()
        .map(BudgetLine::subtotal)
        .fold(0, u64::saturating_add)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub client_id: String,
    pub title: String,
    pub status: BudgetStatus,
    pub lines: Vec<BudgetLine>,
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Budget {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone)]
pub struct NewBudget {
    pub client_id: String,
    pub title: String,
    pub lines: Vec<BudgetLine>,
    pub notes: Option<String>,
}

/// Partial budget update. `updated_at` is stamped by [`BudgetService`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct BudgetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BudgetStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<BudgetLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn check_lines(lines: &[BudgetLine]) -> Result<(), String> {
    if lines.is_empty() {
        return Err("a budget needs at least one line".into());
    }
    for (i, line) in lines.iter().enumerate() {
        if line.description.trim().is_empty() {
            return Err(format!("line {} has no description", i + 1));
        }
        if line.quantity == 0 {
            return Err(format!("line {} has zero quantity", i + 1));
        }
    }
    Ok(())
}

pub struct BudgetPolicy {
    clock: Clock,
}

impl BudgetPolicy {
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self::new(system_clock)
    }
}

impl EntityPolicy for BudgetPolicy {
    type Entity = Budget;
    type CreateInput = NewBudget;
    type UpdateInput = BudgetUpdate;

    fn build_entity(&self, id: String, input: NewBudget) -> Budget {
        let now = (self.clock)();
        Budget {
            id,
            client_id: input.client_id,
            title: input.title.trim().to_string(),
            status: BudgetStatus::Draft,
            total: total_of(&input.lines),
            lines: input.lines,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }

    fn validate_create(&self, input: &NewBudget) -> Result<(), String> {
        if input.client_id.trim().is_empty() {
            return Err("budget client is required".into());
        }
        if input.title.trim().is_empty() {
            return Err("budget title is required".into());
        }
        check_lines(&input.lines)
    }

    fn validate_update(&self, input: &BudgetUpdate) -> Result<(), String> {
        if input.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err("budget title cannot be blank".into());
        }
        match &input.lines {
            Some(lines) => check_lines(lines),
            None => Ok(()),
        }
    }

    fn normalize(&self, mut budget: Budget) -> Budget {
        budget.total = total_of(&budget.lines);
        budget
    }
}

pub type BudgetRepository =
    dyn EntityRepository<Entity = Budget, CreateInput = NewBudget, UpdateInput = BudgetUpdate>;

/// Budget management on top of any budget repository.
pub struct BudgetService {
    repo: Arc<BudgetRepository>,
    clock: Clock,
}

impl BudgetService {
    pub fn new(repo: Arc<BudgetRepository>, clock: Clock) -> Self {
        Self { repo, clock }
    }

    /// Backs the service with an in-memory store.
    pub fn in_memory(
        policy: BudgetPolicy,
        seed: Vec<Budget>,
        config: StoreConfig,
    ) -> StoreResult<Self> {
        let clock = policy.clock();
        let store = EntityStore::new(policy, seed, config)?;
        Ok(Self::new(Arc::new(store), clock))
    }

    pub fn repository(&self) -> &Arc<BudgetRepository> {
        &self.repo
    }

    pub async fn list(&self) -> StoreResult<Vec<Budget>> {
        self.repo.get_all().await
    }

    pub async fn get(&self, id: &str) -> StoreResult<Option<Budget>> {
        self.repo.get_by_id(id).await
    }

    pub async fn count(&self) -> StoreResult<usize> {
        self.repo.count().await
    }

    pub async fn create(&self, input: NewBudget) -> StoreResult<Budget> {
        let budget = self.repo.create(input).await?;
        info!(
            budget_id = %budget.id,
            client_id = %budget.client_id,
            total = budget.total,
            "Budget created"
        );
        Ok(budget)
    }

    /// Creates several budgets; nothing is stored if any input is invalid.
    pub async fn create_many(&self, inputs: Vec<NewBudget>) -> StoreResult<Vec<Budget>> {
        let budgets = self.repo.create_many(inputs).await?;
        info!(count = budgets.len(), "Budgets created");
        Ok(budgets)
    }

    pub async fn update(&self, id: &str, mut update: BudgetUpdate) -> StoreResult<Budget> {
        update.updated_at = Some((self.clock)());
        let budget = self.repo.update(id, update).await?;
        info!(budget_id = %budget.id, status = %budget.status, "Budget updated");
        Ok(budget)
    }

    pub async fn set_status(&self, id: &str, status: BudgetStatus) -> StoreResult<Budget> {
        self.update(
            id,
            BudgetUpdate {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.repo.delete(id).await?;
        info!(budget_id = %id, "Budget deleted");
        Ok(())
    }

    /// Removes budgets in bulk; unknown ids are ignored.
    pub async fn delete_many(&self, ids: &[String]) -> StoreResult<usize> {
        let removed = self.repo.delete_many(ids).await?;
        info!(requested = ids.len(), removed, "Budgets deleted");
        Ok(removed)
    }

    /// Free-text search over title and notes.
    pub async fn search(&self, query: &str) -> StoreResult<Vec<Budget>> {
        let fields = [FieldSelector::key("title"), FieldSelector::key("notes")];
        self.repo.search(query, Some(&fields)).await
    }

    pub async fn for_client(&self, client_id: &str) -> StoreResult<Vec<Budget>> {
        self.repo
            .filter(&|b: &Budget| b.client_id == client_id)
            .await
    }

    pub async fn by_status(&self, status: BudgetStatus) -> StoreResult<Vec<Budget>> {
        self.repo.filter(&|b: &Budget| b.status == status).await
    }
}
