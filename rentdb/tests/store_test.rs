//! End-to-end tests driving the database handle over the in-memory backend,
//! the way route handlers do.

use bson::{Document, doc};
use rentdb::error::StoreError;
use rentdb::memory::MemoryBackend;
use rentdb::prelude::*;

fn listing(id: &str, city: &str, price: i32, status: &str) -> Document {
    doc! {
        "id": id,
        "city": city,
        "price": price,
        "status": status,
        "agent_info": { "id": "agent-1", "name": "Dana" },
    }
}

fn seeded_db() -> Database<MemoryBackend> {
    let backend = MemoryBackend::new(
        vec![
            listing("p1", "London", 800, "active"),
            listing("p2", "Paris", 1000, "active"),
            listing("p3", "London", 1500, "rented"),
            listing("p4", "Berlin", 2000, "active"),
            listing("p5", "London", 2500, "active"),
        ],
        vec![doc! { "id": "basic", "monthly_price": 0 }],
    );
    Database::new(backend)
}

#[tokio::test]
async fn insert_then_find_one_round_trips() {
    let db = Database::new(MemoryBackend::default());

    let user = doc! { "id": "u1", "email": "ada@example.com", "plan": "basic" };
    db.users().insert_one(user.clone()).await.unwrap();

    let found = db
        .users()
        .find_one(doc! { "id": "u1" }, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found, user);

    // Reads are copies; mutating the result must not touch stored state.
    let mut found = found;
    found.insert("email", "evil@example.com");
    let again = db
        .users()
        .find_one(doc! { "id": "u1" }, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(again.get_str("email").unwrap(), "ada@example.com");
}

#[tokio::test]
async fn builder_seeds_properties_and_plans() {
    let backend = MemoryBackend::builder()
        .properties(vec![listing("p1", "London", 800, "active")])
        .plans(vec![doc! { "id": "pro", "monthly_price": 29 }])
        .build()
        .await
        .unwrap();
    let db = Database::new(backend);

    assert_eq!(db.properties().count_documents(doc! {}).await.unwrap(), 1);
    assert_eq!(db.plans().count_documents(doc! {}).await.unwrap(), 1);
    assert_eq!(db.users().count_documents(doc! {}).await.unwrap(), 0);
    assert_eq!(db.sessions().count_documents(doc! {}).await.unwrap(), 0);
    assert_eq!(db.favorites().count_documents(doc! {}).await.unwrap(), 0);
    assert_eq!(
        db.viewing_requests().count_documents(doc! {}).await.unwrap(),
        0
    );

    db.close().await.unwrap();
}

#[tokio::test]
async fn find_filters_and_projects() {
    let db = seeded_db();

    let results = db
        .properties()
        .find(
            doc! {
                "city": "London",
                "price": { "$gte": 800, "$lte": 2000 },
            },
            Some(doc! { "agent_info": 0 }),
        )
        .await
        .unwrap()
        .to_list(10_000)
        .await;

    let ids: Vec<&str> = results.iter().map(|d| d.get_str("id").unwrap()).collect();
    assert_eq!(ids, vec!["p1", "p3"]);
    assert!(results.iter().all(|d| !d.contains_key("agent_info")));
}

#[tokio::test]
async fn cursor_limit_truncates_in_order() {
    let db = seeded_db();

    let first_two = db
        .properties()
        .find(doc! {}, None)
        .await
        .unwrap()
        .to_list(2)
        .await;
    assert_eq!(first_two.len(), 2);
    assert_eq!(first_two[0].get_str("id").unwrap(), "p1");
    assert_eq!(first_two[1].get_str("id").unwrap(), "p2");

    let all = db
        .properties()
        .find(doc! {}, None)
        .await
        .unwrap()
        .to_list(100)
        .await;
    assert_eq!(all.len(), 5);
}

#[tokio::test]
async fn cursor_is_a_snapshot() {
    let db = seeded_db();

    let cursor = db.properties().find(doc! {}, None).await.unwrap();
    db.properties().delete_many(doc! {}).await.unwrap();

    assert_eq!(cursor.to_list(10_000).await.len(), 5);
    assert_eq!(db.properties().count_documents(doc! {}).await.unwrap(), 0);
}

#[tokio::test]
async fn update_one_sets_only_named_fields() {
    let db = seeded_db();

    db.properties()
        .update_one(
            doc! { "id": "p3" },
            doc! { "$set": { "status": "active" } },
        )
        .await
        .unwrap();

    let updated = db
        .properties()
        .find_one(doc! { "id": "p3" }, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.get_str("status").unwrap(), "active");
    assert_eq!(updated.get_str("city").unwrap(), "London");
    assert_eq!(updated.get_i32("price").unwrap(), 1500);

    // Only the first match changes.
    db.properties()
        .update_one(
            doc! { "city": "London" },
            doc! { "$set": { "flagged": true } },
        )
        .await
        .unwrap();
    let flagged = db
        .properties()
        .count_documents(doc! { "flagged": true })
        .await
        .unwrap();
    assert_eq!(flagged, 1);
}

#[tokio::test]
async fn update_without_set_is_a_no_op() {
    let db = seeded_db();

    db.properties()
        .update_one(doc! { "id": "p1" }, doc! { "price": 999 })
        .await
        .unwrap();

    let p1 = db
        .properties()
        .find_one(doc! { "id": "p1" }, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(p1.get_i32("price").unwrap(), 800);
}

#[tokio::test]
async fn delete_one_removes_first_match_only() {
    let db = seeded_db();

    db.properties()
        .delete_one(doc! { "city": "London" })
        .await
        .unwrap();

    let remaining = db
        .properties()
        .find(doc! { "city": "London" }, None)
        .await
        .unwrap()
        .to_list(10_000)
        .await;
    let ids: Vec<&str> = remaining.iter().map(|d| d.get_str("id").unwrap()).collect();
    assert_eq!(ids, vec!["p3", "p5"]);

    // Deleting with a filter that matches nothing succeeds quietly.
    db.properties()
        .delete_one(doc! { "city": "Oslo" })
        .await
        .unwrap();
    assert_eq!(db.properties().count_documents(doc! {}).await.unwrap(), 4);
}

#[tokio::test]
async fn delete_many_removes_all_matches() {
    let db = seeded_db();

    db.properties()
        .delete_many(doc! { "city": "London" })
        .await
        .unwrap();

    assert_eq!(db.properties().count_documents(doc! {}).await.unwrap(), 2);
    assert_eq!(
        db.properties()
            .count_documents(doc! { "city": "London" })
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn or_and_in_compose_end_to_end() {
    let db = seeded_db();

    let count = db
        .properties()
        .count_documents(doc! {
            "$or": [
                { "city": { "$in": ["Paris", "Berlin"] } },
                { "price": { "$gte": 2500 } },
            ],
        })
        .await
        .unwrap();
    assert_eq!(count, 3);
}

#[tokio::test]
async fn regex_filter_matches_substrings() {
    let db = seeded_db();

    let count = db
        .properties()
        .count_documents(doc! { "city": { "$regex": "lon", "$options": "i" } })
        .await
        .unwrap();
    assert_eq!(count, 3);
}

#[tokio::test]
async fn invalid_filters_error_even_on_empty_collections() {
    let db = Database::new(MemoryBackend::default());

    let err = db
        .users()
        .find_one(doc! { "name": { "$near": 1 } }, None)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidFilter(_)));

    let err = db
        .users()
        .count_documents(doc! { "name": { "$regex": "(" } })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidRegex(_)));
}

#[tokio::test]
async fn unknown_collection_is_rejected() {
    let backend = MemoryBackend::default();

    let err = backend
        .find_one("invoices", &doc! {}, None)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::CollectionNotFound(name) if name == "invoices"));
}

#[tokio::test]
async fn dotted_paths_reach_into_subdocuments() {
    let db = seeded_db();

    let count = db
        .properties()
        .count_documents(doc! { "agent_info.id": "agent-1" })
        .await
        .unwrap();
    assert_eq!(count, 5);

    let none = db
        .properties()
        .count_documents(doc! { "agent_info.phone": "555" })
        .await
        .unwrap();
    assert_eq!(none, 0);
}
