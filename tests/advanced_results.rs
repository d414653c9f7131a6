//! End-to-end list pipeline tests against the in-memory store

use std::sync::Arc;

use docpager::pagination::PageIndicator;
use docpager::query::{QueryDescriptor, QueryError, RESERVED_KEYS};
use docpager::results::{AdvancedResults, ResultsError};
use docpager::schema::{CollectionRegistry, CollectionSchema};
use docpager::store::{MemoryStore, StoreError};
use docpager::Document;
use serde_json::{json, Value};

fn doc(value: Value) -> Document {
    value.as_object().cloned().unwrap()
}

fn registry() -> CollectionRegistry {
    CollectionRegistry::from_schemas([
        CollectionSchema::new("customers").stored_in("jtCustomer"),
        CollectionSchema::new("products").stored_in("jtProduct"),
        CollectionSchema::new("orders")
            .stored_in("jtOrder")
            .with_timestamp("createdAt")
            .with_relation("customer", "jtCustomer")
            .expanding("customer"),
    ])
    .unwrap()
}

fn store(products: usize) -> Arc<MemoryStore> {
    let store = MemoryStore::for_registry(&registry());

    for i in 0..products {
        store
            .insert(
                "jtProduct",
                doc(json!({
                    "_id": format!("p{i:03}"),
                    "name": format!("product {i}"),
                    "cost": i * 10,
                    "unit": if i % 3 == 0 { "ROLL" } else { "SHEET" },
                })),
            )
            .unwrap();
    }

    store
        .insert("jtCustomer", doc(json!({"_id": "c1", "name": "ACME"})))
        .unwrap();
    for (id, created) in [("o1", "2024-01-01"), ("o2", "2024-03-01"), ("o3", "2024-02-01")] {
        store
            .insert(
                "jtOrder",
                doc(json!({"_id": id, "customer": "c1", "createdAt": created})),
            )
            .unwrap();
    }

    Arc::new(store)
}

fn pipeline(name: &str, products: usize) -> AdvancedResults {
    let schema = registry().get(name).cloned().unwrap();
    AdvancedResults::new(store(products), schema)
}

fn ids(data: &[Document]) -> Vec<&str> {
    data.iter().map(|d| d["_id"].as_str().unwrap()).collect()
}

#[tokio::test]
async fn first_page_of_many() {
    let envelope = pipeline("products", 120).run_query_string("").await.unwrap();

    assert!(envelope.success);
    assert_eq!(envelope.count, 25);
    assert_eq!(envelope.data.len(), envelope.count);
    assert_eq!(envelope.pagination.next, Some(PageIndicator { page: 2, limit: 25 }));
    assert_eq!(envelope.pagination.prev, None);
}

#[tokio::test]
async fn last_partial_page() {
    let envelope = pipeline("products", 25)
        .run_query_string("page=3&limit=10")
        .await
        .unwrap();

    assert_eq!(envelope.count, 5);
    assert_eq!(envelope.data[0]["_id"], "p020");
    assert_eq!(envelope.pagination.next, None);
    assert_eq!(envelope.pagination.prev, Some(PageIndicator { page: 2, limit: 10 }));
}

#[tokio::test]
async fn page_past_the_end_is_empty_success() {
    let envelope = pipeline("products", 5)
        .run_query_string("page=9&limit=5")
        .await
        .unwrap();

    assert!(envelope.success);
    assert_eq!(envelope.count, 0);
    assert_eq!(envelope.pagination.next, None);
    assert_eq!(envelope.pagination.prev, Some(PageIndicator { page: 8, limit: 5 }));
}

#[tokio::test]
async fn bracketed_operators_filter() {
    let envelope = pipeline("products", 30)
        .run_query_string("cost[gt]=100&cost[lte]=150&sort=cost")
        .await
        .unwrap();

    assert_eq!(ids(&envelope.data), vec!["p011", "p012", "p013", "p014", "p015"]);
}

#[tokio::test]
async fn in_operator_with_repeated_values() {
    let envelope = pipeline("products", 6)
        .run_query_string("unit[in]=ROLL&unit[in]=PACK")
        .await
        .unwrap();

    assert_eq!(ids(&envelope.data), vec!["p000", "p003"]);
}

#[tokio::test]
async fn keyword_values_are_data() {
    let results = pipeline("products", 3);
    let envelope = results.run_query_string("unit=in").await.unwrap();
    assert_eq!(envelope.count, 0);
}

#[tokio::test]
async fn select_keeps_identifier() {
    let envelope = pipeline("products", 3)
        .run_query_string("select=name,cost")
        .await
        .unwrap();

    for document in &envelope.data {
        let mut keys: Vec<&str> = document.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["_id", "cost", "name"]);
    }
}

#[tokio::test]
async fn default_sort_by_timestamp() {
    let envelope = pipeline("orders", 0).run_query_string("").await.unwrap();
    assert_eq!(ids(&envelope.data), vec!["o2", "o3", "o1"]);
}

#[tokio::test]
async fn no_timestamp_keeps_store_order() {
    let envelope = pipeline("products", 4).run_query_string("").await.unwrap();
    assert_eq!(ids(&envelope.data), vec!["p000", "p001", "p002", "p003"]);
}

#[tokio::test]
async fn relation_is_expanded() {
    let envelope = pipeline("orders", 0).run_query_string("limit=1").await.unwrap();
    assert_eq!(envelope.data[0]["customer"], json!({"_id": "c1", "name": "ACME"}));
}

#[tokio::test]
async fn reserved_keys_never_filter() {
    // every reserved key set to a value no document has
    let query = RESERVED_KEYS
        .iter()
        .map(|key| match *key {
            "page" | "limit" => format!("{key}=1"),
            _ => format!("{key}=name"),
        })
        .collect::<Vec<_>>()
        .join("&");

    let envelope = pipeline("products", 3).run_query_string(&query).await.unwrap();
    assert_eq!(envelope.count, 1);
}

#[tokio::test]
async fn identical_calls_are_idempotent() {
    let results = pipeline("products", 40);
    let query = "unit=SHEET&sort=-cost&page=2&limit=5&select=cost";

    let first = results.run_query_string(query).await.unwrap();
    let second = results.run_query_string(query).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn invalid_page_is_query_error() {
    let results = pipeline("products", 3);

    for query in ["page=0", "limit=0", "page=-1", "limit=abc", "page=1.5"] {
        let err = results.run_query_string(query).await.unwrap_err();
        assert!(
            matches!(err, ResultsError::Query(QueryError::InvalidControl { .. })),
            "{query}: {err:?}"
        );
    }
}

#[tokio::test]
async fn mixed_projection_is_query_error() {
    let err = pipeline("products", 3)
        .run_query_string("select=name,-cost")
        .await
        .unwrap_err();
    assert!(matches!(err, ResultsError::Query(QueryError::MixedProjection(_))));
}

#[tokio::test]
async fn unsupported_operator_is_store_error() {
    let descriptor =
        QueryDescriptor::from_value(json!({"cost": {"$where": "1"}})).unwrap();
    let err = pipeline("products", 3).run(descriptor).await.unwrap_err();
    assert!(matches!(
        err,
        ResultsError::Store(StoreError::UnsupportedOperator { .. })
    ));
}

#[tokio::test]
async fn select_and_filter_on_nested_path() {
    let store = MemoryStore::new();
    store
        .insert_many(
            "jtWork",
            json!([
                {"_id": "w1", "order": {"customer": "ACME", "n": 1}, "quantity": 500},
                {"_id": "w2", "order": {"customer": "Globex", "n": 2}, "quantity": 50}
            ]),
        )
        .unwrap();

    let results = AdvancedResults::new(
        Arc::new(store),
        CollectionSchema::new("works").stored_in("jtWork"),
    );

    let envelope = results
        .run_query_string("order.customer=ACME&select=order.customer")
        .await
        .unwrap();
    assert_eq!(envelope.count, 1);
    assert_eq!(
        Value::Object(envelope.data[0].clone()),
        json!({"_id": "w1", "order": {"customer": "ACME"}})
    );

    let envelope = results
        .run_query_string("select=-order.n,-quantity&sort=order.n")
        .await
        .unwrap();
    assert_eq!(
        Value::Object(envelope.data[1].clone()),
        json!({"_id": "w2", "order": {"customer": "Globex"}})
    );
}
