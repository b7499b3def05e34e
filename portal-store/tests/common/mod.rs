//! Shared test helpers for store tests.

#![allow(dead_code)]

use portal_model::{EntityPolicy, Record};
use portal_store::{EntityStore, StoreConfig};
use portal_types::SequentialIdGenerator;
use serde::Serialize;
use serde_json::json;

/// Creation input for the test "people" domain.
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub name: String,
    pub email: Option<String>,
}

impl NewPerson {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }
}

/// Partial update for the test "people" domain. Carries an `id` so tests
/// can try to overwrite it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl PersonUpdate {
    pub fn name(name: &str) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Requires a non-blank name on create and rejects blanking it on update.
pub struct PersonPolicy;

impl EntityPolicy for PersonPolicy {
    type Entity = Record;
    type CreateInput = NewPerson;
    type UpdateInput = PersonUpdate;

    fn build_entity(&self, id: String, input: NewPerson) -> Record {
        let mut record = Record::new(id, json!({"name": input.name}));
        if let Some(email) = input.email {
            record.fields.insert("email".into(), json!(email));
        }
        record
    }

    fn validate_create(&self, input: &NewPerson) -> Result<(), String> {
        if input.name.trim().is_empty() {
            return Err("name is required".into());
        }
        Ok(())
    }

    fn validate_update(&self, input: &PersonUpdate) -> Result<(), String> {
        match &input.name {
            Some(name) if name.trim().is_empty() => Err("name cannot be blank".into()),
            _ => Ok(()),
        }
    }
}

/// A record with a single `name` attribute.
pub fn person(id: &str, name: &str) -> Record {
    Record::new(id, json!({"name": name}))
}

/// Latency-free config with deterministic ids `p-1`, `p-2`, ...
pub fn test_config() -> StoreConfig {
    StoreConfig::new()
        .without_latency()
        .with_id_generator(SequentialIdGenerator::new("p-"))
}

/// A latency-free store seeded with `seed`.
pub fn store_with(seed: Vec<Record>) -> EntityStore<PersonPolicy> {
    EntityStore::new(PersonPolicy, seed, test_config()).unwrap()
}

/// Alice (id "1") and Bob (id "2").
pub fn alice_and_bob() -> EntityStore<PersonPolicy> {
    store_with(vec![person("1", "Alice"), person("2", "Bob")])
}
