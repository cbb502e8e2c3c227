//! End-to-end seeding runs against the in-memory store.
//!
//! These cover the observable behavior of a run: record counts, repeatability,
//! reference integrity, and the guaranteed teardown when an insert fails.

use std::collections::HashSet;

use bson::{Document, oid::ObjectId};
use seed_data::integrity::ids_of_kind;
use seed_data::prelude::*;

async fn seed(store: &MemoryStore) -> SeedOutcome {
    Seeder::new(store.clone()).run().await
}

fn ids(documents: &[Document]) -> HashSet<ObjectId> {
    documents
        .iter()
        .filter_map(|doc| doc.get_object_id("_id").ok())
        .collect()
}

#[tokio::test]
async fn test_seeds_ten_records_into_empty_store() {
    let store = MemoryStore::new();

    let outcome = seed(&store).await;

    assert!(outcome.is_complete(), "{:?}", outcome.error);
    let expected = SeedSummary {
        users: 4,
        tasks: 3,
        messages: 2,
        ratings: 1,
    };
    assert_eq!(outcome.summary, expected);
    assert_eq!(SeedSummary::from_documents(&store.documents()), expected);
    assert_eq!(store.len(), 10);
}

#[tokio::test]
async fn test_insertion_order() {
    let store = MemoryStore::new();
    seed(&store).await;

    let kinds: Vec<RecordKind> = store
        .documents()
        .iter()
        .filter_map(RecordKind::classify)
        .collect();

    let expected: Vec<RecordKind> = [
        (RecordKind::User, 4),
        (RecordKind::Task, 3),
        (RecordKind::Message, 2),
        (RecordKind::Rating, 1),
    ]
    .into_iter()
    .flat_map(|(kind, n)| std::iter::repeat_n(kind, n))
    .collect();
    assert_eq!(kinds, expected);

    let names: Vec<String> = store.documents()[..4]
        .iter()
        .map(|doc| doc.get_str("name").unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        ["John Doe", "Sarah Smith", "Mike Johnson", "Emma Wilson"]
    );
}

#[tokio::test]
async fn test_clear_removes_existing_documents() {
    let store = MemoryStore::new();
    store
        .insert(bson::doc! { "leftover": true })
        .await
        .unwrap();

    let outcome = seed(&store).await;

    assert!(outcome.is_complete());
    assert_eq!(store.len(), 10);
    assert!(
        store
            .documents()
            .iter()
            .all(|doc| !doc.contains_key("leftover"))
    );
}

#[tokio::test]
async fn test_second_run_has_same_counts_and_new_ids() {
    let store = MemoryStore::new();

    let first = seed(&store).await;
    let first_ids = ids(&store.documents());

    store.reopen();
    let second = seed(&store).await;
    let second_ids = ids(&store.documents());

    assert!(first.is_complete() && second.is_complete());
    assert_eq!(first.summary, second.summary);
    assert_eq!(store.len(), 10);
    assert_ne!(first.run_id, second.run_id);
    assert!(first_ids.is_disjoint(&second_ids));
}

#[tokio::test]
async fn test_every_reference_resolves() {
    let store = MemoryStore::new();

    let outcome = seed(&store).await;

    let report = outcome.integrity.expect("verify should have run");
    assert!(report.is_clean(), "{:?}", report.dangling);
    // Tasks hold 7 references, messages 6, the rating 3
    assert_eq!(report.checked, 16);
    assert_eq!(check_references(&store.documents()), report);
}

#[tokio::test]
async fn test_task_and_message_references_point_at_seeded_records() {
    let store = MemoryStore::new();
    let outcome = seed(&store).await;
    let documents = store.documents();
    let users = ids_of_kind(&documents, RecordKind::User);
    let tasks = ids_of_kind(&documents, RecordKind::Task);

    for task in documents
        .iter()
        .filter(|doc| RecordKind::classify(doc) == Some(RecordKind::Task))
    {
        assert!(users.contains(&task.get_object_id("client").unwrap()));
        if let Ok(student) = task.get_object_id("student") {
            assert!(users.contains(&student));
        }
    }

    for message in documents
        .iter()
        .filter(|doc| RecordKind::classify(doc) == Some(RecordKind::Message))
    {
        assert!(tasks.contains(&message.get_object_id("task").unwrap()));
        assert!(users.contains(&message.get_object_id("sender").unwrap()));
        assert!(users.contains(&message.get_object_id("receiver").unwrap()));
    }

    let seeded = outcome.ids.expect("population should have finished");
    assert!(tasks.contains(&seeded.tasks.house_cleaning));
    assert!(users.contains(&seeded.users.mike_johnson));
    assert_eq!(seeded.messages.len(), 2);
    assert_eq!(seeded.ratings.len(), 1);
}

#[tokio::test]
async fn test_store_is_closed_after_success() {
    let store = MemoryStore::new();

    seed(&store).await;

    assert!(store.is_closed());
}

#[tokio::test]
async fn test_insert_failure_keeps_partial_data_and_still_tears_down() {
    // The sixth insert is the second task
    let store = MemoryStore::new().fail_on_insert(6);

    let outcome = seed(&store).await;

    assert!(!outcome.is_complete());
    assert!(matches!(
        outcome.error,
        Some(SeedError::Store(StoreError::WriteRejected(_)))
    ));
    assert!(outcome.ids.is_none());
    assert!(outcome.integrity.is_none());
    assert_eq!(
        outcome.summary,
        SeedSummary {
            users: 4,
            tasks: 1,
            messages: 0,
            ratings: 0,
        }
    );

    assert!(store.is_closed());
    assert_eq!(store.len(), 5);
    assert_eq!(SeedSummary::from_documents(&store.documents()), outcome.summary);
}

#[tokio::test]
async fn test_failure_on_first_insert_leaves_cleared_store() {
    let store = MemoryStore::new();
    store.insert(bson::doc! { "role": "client" }).await.unwrap();
    // The leftover document above used insert #1
    let store = store.fail_on_insert(2);

    let outcome = seed(&store).await;

    assert!(!outcome.is_complete());
    assert_eq!(outcome.summary.total(), 0);
    assert!(store.is_empty());
    assert!(store.is_closed());
}
