//! Clients and contractors.

use crate::clock::{system_clock, Clock};
use chrono::{DateTime, Utc};
use portal_model::{Entity, EntityPolicy, FieldSelector};
use portal_store::{EntityRepository, EntityStore, StoreConfig, StoreResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// What kind of counterparty a client record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientKind {
    Company,
    Person,
    Contractor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub tax_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub kind: ClientKind,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Client {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub tax_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub kind: ClientKind,
}

impl NewClient {
    pub fn company(name: &str, tax_id: &str) -> Self {
        Self {
            name: name.into(),
            tax_id: tax_id.into(),
            email: None,
            phone: None,
            kind: ClientKind::Company,
        }
    }
}

/// Partial client update. `updated_at` is stamped by [`ClientService`].
///
/// Contact fields are doubly optional: `None` leaves them alone,
/// `Some(None)` clears them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ClientKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Strips formatting (dots, spaces) and uppercases, so "12.345.678-k"
/// and "12345678-K" compare equal.
pub fn normalize_tax_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .flat_map(char::to_uppercase)
        .collect()
}

fn check_email(email: Option<&str>) -> Result<(), String> {
    match email {
        Some(email) if !email.contains('@') => Err(format!("invalid email: {email}")),
        _ => Ok(()),
    }
}

pub struct ClientPolicy {
    clock: Clock,
}

impl ClientPolicy {
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }
}

impl Default for ClientPolicy {
    fn default() -> Self {
        Self::new(system_clock)
    }
}

impl EntityPolicy for ClientPolicy {
    type Entity = Client;
    type CreateInput = NewClient;
    type UpdateInput = ClientUpdate;

    fn build_entity(&self, id: String, input: NewClient) -> Client {
        let now = (self.clock)();
        Client {
            id,
            name: input.name.trim().to_string(),
            tax_id: input.tax_id,
            email: input.email,
            phone: input.phone,
            kind: input.kind,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn validate_create(&self, input: &NewClient) -> Result<(), String> {
        if input.name.trim().is_empty() {
            return Err("client name is required".into());
        }
        if normalize_tax_id(&input.tax_id).is_empty() {
            return Err("client tax id is required".into());
        }
        check_email(input.email.as_deref())
    }

    fn validate_update(&self, input: &ClientUpdate) -> Result<(), String> {
        if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err("client name cannot be blank".into());
        }
        if input
            .tax_id
            .as_deref()
            .is_some_and(|t| normalize_tax_id(t).is_empty())
        {
            return Err("client tax id cannot be blank".into());
        }
        check_email(input.email.as_ref().and_then(Option::as_deref))
    }

    /// Tax ids are unique per store, compared after normalization.
    fn unique_key(&self, client: &Client) -> Option<String> {
        Some(normalize_tax_id(&client.tax_id))
    }

    fn normalize(&self, mut client: Client) -> Client {
        client.tax_id = normalize_tax_id(&client.tax_id);
        client
    }
}

pub type ClientRepository =
    dyn EntityRepository<Entity = Client, CreateInput = NewClient, UpdateInput = ClientUpdate>;

/// Client management on top of any client repository.
pub struct ClientService {
    repo: Arc<ClientRepository>,
    clock: Clock,
}

impl ClientService {
    pub fn new(repo: Arc<ClientRepository>, clock: Clock) -> Self {
        Self { repo, clock }
    }

    /// Backs the service with an in-memory store.
    pub fn in_memory(
        policy: ClientPolicy,
        seed: Vec<Client>,
        config: StoreConfig,
    ) -> StoreResult<Self> {
        let clock = policy.clock();
        let store = EntityStore::new(policy, seed, config)?;
        Ok(Self::new(Arc::new(store), clock))
    }

    pub fn repository(&self) -> &Arc<ClientRepository> {
        &self.repo
    }

    pub async fn list(&self) -> StoreResult<Vec<Client>> {
        self.repo.get_all().await
    }

    pub async fn get(&self, id: &str) -> StoreResult<Option<Client>> {
        self.repo.get_by_id(id).await
    }

    pub async fn count(&self) -> StoreResult<usize> {
        self.repo.count().await
    }

    /// Creates a client. Fails with `Conflict` if the tax id is already
    /// registered, in any formatting.
    pub async fn create(&self, input: NewClient) -> StoreResult<Client> {
        let client = self.repo.create(input).await?;
        info!(client_id = %client.id, kind = ?client.kind, "Client created");
        Ok(client)
    }

    /// Fails with `Conflict` if the new tax id belongs to another client.
    pub async fn update(&self, id: &str, mut update: ClientUpdate) -> StoreResult<Client> {
        update.updated_at = Some((self.clock)());
        let client = self.repo.update(id, update).await?;
        info!(client_id = %client.id, "Client updated");
        Ok(client)
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.repo.delete(id).await?;
        info!(client_id = %id, "Client deleted");
        Ok(())
    }

    /// Free-text search over name, tax id and email.
    pub async fn search(&self, query: &str) -> StoreResult<Vec<Client>> {
        let fields = [
            FieldSelector::key("name"),
            FieldSelector::key("tax_id"),
            FieldSelector::key("email"),
        ];
        self.repo.search(query, Some(&fields)).await
    }

    /// Looks up a client by tax id, ignoring formatting and case.
    pub async fn find_by_tax_id(&self, tax_id: &str) -> StoreResult<Option<Client>> {
        let wanted = normalize_tax_id(tax_id);
        let matches = self.repo.filter(&|c: &Client| c.tax_id == wanted).await?;
        Ok(matches.into_iter().next())
    }

    pub async fn active(&self) -> StoreResult<Vec<Client>> {
        self.repo.filter(&|c: &Client| c.active).await
    }

    pub async fn contractors(&self) -> StoreResult<Vec<Client>> {
        self.repo
            .filter(&|c: &Client| c.kind == ClientKind::Contractor)
            .await
    }

    pub async fn deactivate(&self, id: &str) -> StoreResult<Client> {
        self.update(
            id,
            ClientUpdate {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
    }
}
