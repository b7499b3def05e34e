//! Domain services for the administration portal.
//!
//! Each service composes a generic entity repository with a domain policy
//! and adds the queries its screens need:
//! - [`ClientService`]: clients and contractors, lookup by tax id
//! - [`BudgetService`]: quotes with line items and a status workflow
//! - [`CatalogService`]: sellable catalog items, lookup by code
//!
//! Validation here is structural (required fields, basic shape). Business
//! rules such as tax id check digits or pricing tiers are out of scope.

mod budgets;
mod catalog;
mod clients;
mod clock;

pub use budgets::{
    Budget, BudgetLine, BudgetPolicy, BudgetRepository, BudgetService, BudgetStatus,
    BudgetUpdate, NewBudget,
};
pub use catalog::{
    CatalogItem, CatalogItemUpdate, CatalogPolicy, CatalogRepository, CatalogService,
    NewCatalogItem,
};
pub use clients::{
    normalize_tax_id, Client, ClientKind, ClientPolicy, ClientRepository, ClientService,
    ClientUpdate, NewClient,
};
pub use clock::{system_clock, Clock};
