//! Bundled seed data.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

const CLIENTS: &str = include_str!("../fixtures/clients.json");
const BUDGETS: &str = include_str!("../fixtures/budgets.json");
const CATALOG: &str = include_str!("../fixtures/catalog.json");

fn parse<T: DeserializeOwned>(name: &str, raw: &str) -> Result<Vec<T>> {
    serde_json::from_str(raw).with_context(|| format!("Invalid {name} fixture"))
}

pub(crate) fn clients<T: DeserializeOwned>() -> Result<Vec<T>> {
    parse("clients", CLIENTS)
}

pub(crate) fn budgets<T: DeserializeOwned>() -> Result<Vec<T>> {
    parse("budgets", BUDGETS)
}

pub(crate) fn catalog<T: DeserializeOwned>() -> Result<Vec<T>> {
    parse("catalog", CATALOG)
}
