mod common;

use common::{catalog_service, later_clock, seeded_catalog, slow_config};
use portal_domain::{CatalogItemUpdate, CatalogPolicy, CatalogService, NewCatalogItem};
use portal_store::EntityRepository;
use pretty_assertions::assert_eq;

fn new_item(code: &str, name: &str) -> NewCatalogItem {
    NewCatalogItem {
        code: code.into(),
        name: name.into(),
        category: "Electrical".into(),
        unit_price: 9_500,
    }
}

#[tokio::test]
async fn create_uppercases_code_and_activates_item() {
    let service = catalog_service(seeded_catalog());

    let item = service.create(new_item(" elec-03 ", "Lamp fitting")).await.unwrap();

    assert_eq!(item.id, "i-new-1");
    assert_eq!(item.code, "ELEC-03");
    assert!(item.active);
    assert_eq!(item.created_at, later_clock());
}

#[tokio::test]
async fn create_rejects_duplicate_code_ignoring_case() {
    let service = catalog_service(seeded_catalog());

    let err = service
        .create(new_item("plum-01", "Another faucet"))
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    assert!(err.to_string().contains("PLUM-01"));
    assert_eq!(service.count().await.unwrap(), 3);
}

#[tokio::test(start_paused = true)]
async fn overlapping_creates_cannot_share_a_code() {
    let service =
        CatalogService::in_memory(CatalogPolicy::new(later_clock), vec![], slow_config("i-"))
            .unwrap();

    let (first, second) = tokio::join!(
        service.create(new_item("elec-09", "Socket")),
        service.create(new_item("ELEC-09 ", "Socket, again")),
    );

    assert!(first.is_ok());
    assert!(second.unwrap_err().is_conflict());
    assert_eq!(service.count().await.unwrap(), 1);
}

#[tokio::test]
async fn create_requires_code_and_name() {
    let service = catalog_service(vec![]);

    assert!(service.create(new_item("", "x")).await.unwrap_err().is_validation());
    assert!(service.create(new_item("X-1", " ")).await.unwrap_err().is_validation());
}

#[tokio::test]
async fn category_and_code_lookups() {
    let service = catalog_service(seeded_catalog());

    let electrical: Vec<_> = service
        .by_category("electrical")
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.code)
        .collect();
    assert_eq!(electrical, vec!["ELEC-01", "ELEC-02"]);

    let found = service.find_by_code("elec-02").await.unwrap().unwrap();
    assert_eq!(found.id, "i-2");
}

#[tokio::test]
async fn update_reprices_and_deactivate_hides_item() {
    let service = catalog_service(seeded_catalog());

    let repriced = service
        .update(
            "i-3",
            CatalogItemUpdate {
                unit_price: Some(21_000),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(repriced.unit_price, 21_000);
    assert_eq!(repriced.name, "Faucet repair");

    service.deactivate("i-1").await.unwrap();
    let active: Vec<_> = service
        .active_items()
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(active, vec!["i-2", "i-3"]);
}

#[tokio::test]
async fn search_spans_code_name_and_category() {
    let service = catalog_service(seeded_catalog());

    assert_eq!(service.search("plumbing").await.unwrap().len(), 1);
    assert_eq!(service.search("elec").await.unwrap().len(), 2);
    assert_eq!(service.search("").await.unwrap().len(), 3);
}

#[tokio::test]
async fn repository_is_shared_with_service() {
    let service = catalog_service(seeded_catalog());

    service.delete("i-2").await.unwrap();

    assert!(!service.repository().exists("i-2").await.unwrap());
    assert!(service.get("i-2").await.unwrap().is_none());
}
