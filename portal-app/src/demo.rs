//! A short walk through the store contract against the client service.

use crate::portal::Portal;
use anyhow::{bail, Result};
use portal_domain::{Client, ClientUpdate, NewClient};
use tracing::info;

/// What the demo observed at each step.
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub initial_count: usize,
    pub search_hits: Vec<Client>,
    pub renamed: Client,
    pub deleted_id: String,
    pub final_count: usize,
}

/// Creates two clients, searches, renames one, deletes the other and
/// counts what is left.
pub async fn run_demo(portal: &Portal) -> Result<DemoReport> {
    let clients = &portal.clients;
    let initial_count = clients.count().await?;
    info!(initial_count, "Demo starting");

    let alice = clients
        .create(NewClient::company("Alice Electric", "90000001-1"))
        .await?;
    let bob = clients
        .create(NewClient::company("Bob Builders", "90000002-2"))
        .await?;

    let search_hits = clients.search("ali").await?;
    info!(hits = search_hits.len(), "Searched for \"ali\"");

    let renamed = clients
        .update(
            &bob.id,
            ClientUpdate {
                name: Some("Robert Builders".into()),
                ..Default::default()
            },
        )
        .await?;

    clients.delete(&alice.id).await?;
    if clients.get(&alice.id).await?.is_some() {
        bail!("client {} still present after delete", alice.id);
    }

    let final_count = clients.count().await?;
    info!(final_count, "Demo finished");

    Ok(DemoReport {
        initial_count,
        search_hits,
        renamed,
        deleted_id: alice.id,
        final_count,
    })
}
