mod common;

use common::{alice_and_bob, person, NewPerson, PersonUpdate};
use portal_model::{FieldSelector, Record};
use portal_store::EntityRepository;
use pretty_assertions::assert_eq;
use std::sync::Arc;

type People = Arc<dyn EntityRepository<Entity = Record, CreateInput = NewPerson, UpdateInput = PersonUpdate>>;

fn repository() -> People {
    Arc::new(alice_and_bob())
}

#[tokio::test]
async fn store_is_usable_as_trait_object() {
    let repo = repository();
    assert_eq!(repo.count().await.unwrap(), 2);
    assert_eq!(repo.get_by_id("1").await.unwrap(), Some(person("1", "Alice")));
    assert_eq!(repo.get_by_id("9").await.unwrap(), None);
    assert!(repo.exists("2").await.unwrap());
}

#[tokio::test]
async fn crud_through_trait() {
    let repo = repository();

    let carol = repo.create(NewPerson::named("Carol")).await.unwrap();
    let renamed = repo.update(&carol.id, PersonUpdate::name("Caroline")).await.unwrap();
    assert_eq!(renamed.get_str("/name"), Some("Caroline"));

    repo.delete("1").await.unwrap();
    let ids: Vec<String> = repo.get_all().await.unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["2".to_string(), carol.id]);
}

#[tokio::test]
async fn search_and_filter_through_trait() {
    let repo = repository();
    let fields = [FieldSelector::key("name")];
    let found = repo.search("BO", Some(&fields)).await.unwrap();
    assert_eq!(found, vec![person("2", "Bob")]);

    let filtered = repo.filter(&|r: &Record| r.id == "1").await.unwrap();
    assert_eq!(filtered, vec![person("1", "Alice")]);
}

#[tokio::test]
async fn batch_through_trait() {
    let repo = repository();
    let created = repo
        .create_many(vec![NewPerson::named("X"), NewPerson::named("Y")])
        .await
        .unwrap();
    assert_eq!(created.len(), 2);

    let removed = repo
        .delete_many(&["1".to_string(), created[0].id.clone(), "ghost".to_string()])
        .await
        .unwrap();
    assert_eq!(removed, 2);
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn repository_errors_propagate() {
    let repo = repository();
    assert!(repo.delete("ghost").await.unwrap_err().is_not_found());
    assert!(
        repo.create(NewPerson::named(""))
            .await
            .unwrap_err()
            .is_validation()
    );
}

#[tokio::test]
async fn shared_repository_across_tasks() {
    let repo = repository();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.create(NewPerson::named(&format!("t{i}"))).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(repo.count().await.unwrap(), 10);
}
