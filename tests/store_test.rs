use std::sync::Arc;

use futures::TryStreamExt;
use tempfile::NamedTempFile;

use headline_labeler::adapter::SqliteHeadlineStore;
use headline_labeler::domain::{Classification, NewHeadline};
use headline_labeler::error::LabelerError;
use headline_labeler::port::{HeadlineStore, stream_all};

/// Open a store over a fresh SQLite file. The `NamedTempFile` guard must
/// outlive the store.
async fn create_test_store() -> (SqliteHeadlineStore, NamedTempFile) {
    let db_file = NamedTempFile::new().unwrap();
    let database_url = format!("sqlite://{}", db_file.path().display());
    let store = SqliteHeadlineStore::connect(&database_url).await.unwrap();
    (store, db_file)
}

fn new_headline(identifier: &str) -> NewHeadline {
    NewHeadline {
        identifier: identifier.to_string(),
        headline: format!("Headline for {identifier}"),
        name: "wire".to_string(),
    }
}

fn classification(sentiment: &str, category: &str) -> Classification {
    Classification {
        sentiment: sentiment.to_string(),
        category: category.to_string(),
    }
}

#[tokio::test]
async fn test_insert_many_assigns_ascending_ids() {
    let (store, _db) = create_test_store().await;

    let inserted = store
        .insert_many(vec![new_headline("a"), new_headline("b"), new_headline("c")])
        .await
        .unwrap();
    assert_eq!(inserted, 3);

    let records = store.get_page(10).await.unwrap();
    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(records.iter().all(|r| r.sentiment.is_none()));
}

#[tokio::test]
async fn test_insert_many_empty_batch_is_a_noop() {
    let (store, _db) = create_test_store().await;

    let inserted = store.insert_many(Vec::new()).await.unwrap();

    assert_eq!(inserted, 0);
    assert!(store.get_page(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_insert_many_spanning_multiple_flush_batches() {
    let (store, _db) = create_test_store().await;

    let records: Vec<NewHeadline> = (0..2500).map(|i| new_headline(&format!("id-{i}"))).collect();
    let inserted = store.insert_many(records).await.unwrap();
    assert_eq!(inserted, 2500);

    let page = store.get_page_after(2498, 10).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, 2499);
    assert_eq!(page[1].id, 2500);
}

#[tokio::test]
async fn test_insert_many_duplicate_identifier_rolls_back_whole_batch() {
    let (store, _db) = create_test_store().await;
    store.insert_many(vec![new_headline("existing")]).await.unwrap();

    let result = store
        .insert_many(vec![new_headline("fresh"), new_headline("existing")])
        .await;

    assert!(matches!(result, Err(LabelerError::Integrity(_))));

    // "fresh" was inserted before the duplicate failed, so the rollback
    // must have removed it.
    let records = store.get_page(10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].identifier, "existing");
}

#[tokio::test]
async fn test_insert_many_duplicate_within_batch_rolls_back() {
    let (store, _db) = create_test_store().await;

    let result = store
        .insert_many(vec![new_headline("twin"), new_headline("twin")])
        .await;

    assert!(matches!(result, Err(LabelerError::Integrity(_))));
    assert!(store.get_page(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_by_id_unknown_is_not_found() {
    let (store, _db) = create_test_store().await;

    let result = store.get_by_id(7).await;

    assert!(matches!(result, Err(LabelerError::NotFound(7))));
}

#[tokio::test]
async fn test_get_first_unclassified_returns_lowest_id() {
    let (store, _db) = create_test_store().await;
    store
        .insert_many(vec![new_headline("a"), new_headline("b"), new_headline("c")])
        .await
        .unwrap();
    store
        .update_classification(1, Some(classification("positive", "ads")))
        .await
        .unwrap();

    let next = store.get_first_unclassified().await.unwrap().unwrap();

    assert_eq!(next.id, 2);
    assert_eq!(next.identifier, "b");
}

#[tokio::test]
async fn test_get_first_unclassified_none_when_all_classified() {
    let (store, _db) = create_test_store().await;
    store.insert_many(vec![new_headline("a")]).await.unwrap();
    store
        .update_classification(1, Some(classification("negative", "lawsuit")))
        .await
        .unwrap();

    assert!(store.get_first_unclassified().await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_classification_sets_and_clears_both_labels() {
    let (store, _db) = create_test_store().await;
    store.insert_many(vec![new_headline("a")]).await.unwrap();

    store
        .update_classification(1, Some(classification("positive", "ads")))
        .await
        .unwrap();
    let record = store.get_by_id(1).await.unwrap();
    assert_eq!(record.sentiment.as_deref(), Some("positive"));
    assert_eq!(record.category.as_deref(), Some("ads"));
    assert!(record.is_classified());

    store.update_classification(1, None).await.unwrap();
    let record = store.get_by_id(1).await.unwrap();
    assert_eq!(record.sentiment, None);
    assert_eq!(record.category, None);
    assert!(!record.is_classified());
}

#[tokio::test]
async fn test_update_classification_unknown_id_is_not_found() {
    let (store, _db) = create_test_store().await;

    let result = store
        .update_classification(9, Some(classification("positive", "ads")))
        .await;

    assert!(matches!(result, Err(LabelerError::NotFound(9))));
}

#[tokio::test]
async fn test_get_page_after_windows_by_id() {
    let (store, _db) = create_test_store().await;
    let records: Vec<NewHeadline> = (0..5).map(|i| new_headline(&format!("id-{i}"))).collect();
    store.insert_many(records).await.unwrap();

    let first = store.get_page_after(0, 2).await.unwrap();
    assert_eq!(first.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);

    let middle = store.get_page_after(2, 2).await.unwrap();
    assert_eq!(middle.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 4]);

    let tail = store.get_page_after(4, 2).await.unwrap();
    assert_eq!(tail.iter().map(|r| r.id).collect::<Vec<_>>(), vec![5]);

    assert!(store.get_page_after(5, 2).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_stream_all_yields_every_record_in_order() {
    let (store, _db) = create_test_store().await;
    // More than two fetch pages worth of rows.
    let records: Vec<NewHeadline> = (0..25).map(|i| new_headline(&format!("id-{i}"))).collect();
    store.insert_many(records).await.unwrap();

    let store: Arc<dyn HeadlineStore> = Arc::new(store);
    let streamed: Vec<_> = stream_all(store).try_collect().await.unwrap();

    assert_eq!(streamed.len(), 25);
    let ids: Vec<i64> = streamed.iter().map(|r| r.id).collect();
    assert_eq!(ids, (1..=25).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_stream_all_on_empty_store_yields_nothing() {
    let (store, _db) = create_test_store().await;

    let store: Arc<dyn HeadlineStore> = Arc::new(store);
    let streamed: Vec<_> = stream_all(store).try_collect().await.unwrap();

    assert!(streamed.is_empty());
}
