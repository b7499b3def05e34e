//! Shared fixtures for domain service tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use portal_domain::{
    Budget, BudgetLine, BudgetPolicy, BudgetService, BudgetStatus, CatalogItem, CatalogPolicy,
    CatalogService, Client, ClientKind, ClientPolicy, ClientService,
};
use portal_store::StoreConfig;
use portal_types::SequentialIdGenerator;
use std::time::Duration;

// ── Clocks ─────────────────────────────────────────────────────

pub fn created_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
}

pub fn later_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
}

pub fn config(prefix: &str) -> StoreConfig {
    StoreConfig::new()
        .without_latency()
        .with_id_generator(SequentialIdGenerator::new(prefix))
}

/// 100 ms per operation, for overlapping-write tests under paused time.
pub fn slow_config(prefix: &str) -> StoreConfig {
    config(prefix).with_delay(Duration::from_millis(100))
}

// ── Clients ────────────────────────────────────────────────────

pub fn client(id: &str, name: &str, tax_id: &str, kind: ClientKind) -> Client {
    Client {
        id: id.into(),
        name: name.into(),
        tax_id: tax_id.into(),
        email: None,
        phone: None,
        kind,
        active: true,
        created_at: created_clock(),
        updated_at: created_clock(),
    }
}

pub fn seeded_clients() -> Vec<Client> {
    vec![
        client("c-1", "Acme Ltda", "76123456-7", ClientKind::Company),
        client("c-2", "Juana Pérez", "15987654-K", ClientKind::Person),
        client("c-3", "Electro Sur", "77888999-1", ClientKind::Contractor),
    ]
}

pub fn client_service(seed: Vec<Client>) -> ClientService {
    ClientService::in_memory(ClientPolicy::new(later_clock), seed, config("c-new-"))
        .expect("valid seed")
}

// ── Budgets ────────────────────────────────────────────────────

pub fn budget(id: &str, client_id: &str, title: &str, status: BudgetStatus) -> Budget {
    let lines = vec![BudgetLine::new("Labour", 2, 15_000)];
    Budget {
        id: id.into(),
        client_id: client_id.into(),
        title: title.into(),
        status,
        total: 30_000,
        lines,
        notes: None,
        created_at: created_clock(),
        updated_at: created_clock(),
    }
}

pub fn seeded_budgets() -> Vec<Budget> {
    vec![
        budget("b-1", "c-1", "Office rewiring", BudgetStatus::Draft),
        budget("b-2", "c-1", "Panel upgrade", BudgetStatus::Sent),
        budget("b-3", "c-2", "Kitchen lighting", BudgetStatus::Approved),
    ]
}

pub fn budget_service(seed: Vec<Budget>) -> BudgetService {
    BudgetService::in_memory(BudgetPolicy::new(later_clock), seed, config("b-new-"))
        .expect("valid seed")
}

// ── Catalog ────────────────────────────────────────────────────

pub fn item(id: &str, code: &str, name: &str, category: &str, unit_price: u64) -> CatalogItem {
    CatalogItem {
        id: id.into(),
        code: code.into(),
        name: name.into(),
        category: category.into(),
        unit_price,
        active: true,
        created_at: created_clock(),
    }
}

pub fn seeded_catalog() -> Vec<CatalogItem> {
    vec![
        item("i-1", "ELEC-01", "Outlet installation", "Electrical", 12_000),
        item("i-2", "ELEC-02", "Breaker replacement", "Electrical", 25_000),
        item("i-3", "PLUM-01", "Faucet repair", "Plumbing", 18_000),
    ]
}

pub fn catalog_service(seed: Vec<CatalogItem>) -> CatalogService {
    CatalogService::in_memory(CatalogPolicy::new(later_clock), seed, config("i-new-"))
        .expect("valid seed")
}
