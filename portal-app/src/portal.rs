use crate::config::PortalConfig;
use crate::fixtures;
use anyhow::{Context, Result};
use portal_domain::{
    Budget, BudgetPolicy, BudgetService, CatalogItem, CatalogPolicy, CatalogService, Client,
    ClientPolicy, ClientService,
};
use tracing::info;

/// The set of domain services backing the portal.
pub struct Portal {
    pub clients: ClientService,
    pub budgets: BudgetService,
    pub catalog: CatalogService,
}

impl Portal {
    /// Builds fresh stores for every domain.
    pub fn from_config(config: &PortalConfig) -> Result<Self> {
        let (clients, budgets, catalog): (Vec<Client>, Vec<Budget>, Vec<CatalogItem>) =
            if config.seed {
                (fixtures::clients()?, fixtures::budgets()?, fixtures::catalog()?)
            } else {
                (Vec::new(), Vec::new(), Vec::new())
            };
        info!(
            clients = clients.len(),
            budgets = budgets.len(),
            catalog = catalog.len(),
            delay_ms = config.delay_ms,
            id_strategy = %config.id_strategy,
            "Building portal stores"
        );

        let clients =
            ClientService::in_memory(ClientPolicy::default(), clients, config.store_config())
                .context("Failed to seed client store")?;
        let budgets =
            BudgetService::in_memory(BudgetPolicy::default(), budgets, config.store_config())
                .context("Failed to seed budget store")?;
        let catalog =
            CatalogService::in_memory(CatalogPolicy::default(), catalog, config.store_config())
                .context("Failed to seed catalog store")?;

        Ok(Self {
            clients,
            budgets,
            catalog,
        })
    }
}
