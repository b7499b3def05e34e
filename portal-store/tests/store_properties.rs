//! Property-based tests for store invariants.
//!
//! Every property drives a latency-free store through `tokio_test::block_on`:
//! - Identifiers stay unique across any sequence of creates
//! - `count()` always matches `get_all().len()` under mixed writes
//! - Updates never change an entity's identifier
//! - Search is insensitive to the case of the query

mod common;

use common::{person, store_with, NewPerson, PersonUpdate};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Create(String),
    CreateMany(Vec<String>),
    Update(usize, String),
    Delete(usize),
    DeleteMany(Vec<usize>),
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z]{1,12}").unwrap()
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        name_strategy().prop_map(Op::Create),
        prop::collection::vec(name_strategy(), 0..4).prop_map(Op::CreateMany),
        (0usize..20, name_strategy()).prop_map(|(i, n)| Op::Update(i, n)),
        (0usize..20).prop_map(Op::Delete),
        prop::collection::vec(0usize..20, 0..4).prop_map(Op::DeleteMany),
    ]
}

proptest! {
    #[test]
    fn created_ids_are_unique(names in prop::collection::vec(name_strategy(), 1..60)) {
        let store = store_with(vec![person("1", "Seed")]);
        let ids = tokio_test::block_on(async {
            let mut ids = HashSet::new();
            ids.insert("1".to_string());
            for name in names {
                let created = store.create(NewPerson::named(&name)).await.unwrap();
                assert!(ids.insert(created.id), "duplicate id");
            }
            ids
        });
        prop_assert_eq!(ids.len(), store.snapshot().len());
    }

    #[test]
    fn count_matches_get_all(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let store = store_with(vec![person("1", "Alice"), person("2", "Bob")]);
        tokio_test::block_on(async {
            for op in ops {
                let ids: Vec<String> = store.snapshot().into_iter().map(|r| r.id).collect();
                let pick = |i: usize| ids.get(i).cloned().unwrap_or_else(|| format!("missing-{i}"));
                match op {
                    Op::Create(name) => {
                        store.create(NewPerson::named(&name)).await.unwrap();
                    }
                    Op::CreateMany(names) => {
                        let inputs = names.iter().map(|n| NewPerson::named(n)).collect();
                        store.create_many(inputs).await.unwrap();
                    }
                    Op::Update(i, name) => {
                        let _ = store.update(&pick(i), PersonUpdate::name(&name)).await;
                    }
                    Op::Delete(i) => {
                        let _ = store.delete(&pick(i)).await;
                    }
                    Op::DeleteMany(indices) => {
                        let targets: Vec<String> = indices.into_iter().map(pick).collect();
                        store.delete_many(&targets).await.unwrap();
                    }
                }
                let count = store.count().await.unwrap();
                let all = store.get_all().await.unwrap();
                assert_eq!(count, all.len());
                let unique: HashSet<&str> = all.iter().map(|r| r.id.as_str()).collect();
                assert_eq!(unique.len(), all.len());
            }
        });
    }

    #[test]
    fn update_never_changes_id(forged in "[a-z0-9-]{1,16}", name in name_strategy()) {
        let store = store_with(vec![person("1", "Alice"), person("2", "Bob")]);
        let updated = tokio_test::block_on(store.update(
            "2",
            PersonUpdate {
                id: Some(forged),
                name: Some(name),
                ..Default::default()
            },
        ))
        .unwrap();
        prop_assert_eq!(updated.id.as_str(), "2");
        let ids: Vec<String> = store.snapshot().into_iter().map(|r| r.id).collect();
        prop_assert_eq!(ids, vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn search_ignores_query_case(word in "[a-zA-Z]{1,8}", prefix in "[a-z ]{0,5}") {
        let store = store_with(vec![
            person("1", &format!("{prefix}{word}")),
            person("2", "0000"),
        ]);
        let (upper, lower, original) = tokio_test::block_on(async {
            (
                store.search(&word.to_uppercase(), None).await.unwrap(),
                store.search(&word.to_lowercase(), None).await.unwrap(),
                store.search(&word, None).await.unwrap(),
            )
        });
        prop_assert_eq!(&upper, &lower);
        prop_assert_eq!(&upper, &original);
        prop_assert!(upper.iter().any(|r| r.id == "1"));
    }
}
