use serde_json::json;
use tokio::test;

use topics::model::Topic;
use topics::store::TopicStore;
use topics::store::json_store::JsonFileStore;

fn sample_topic() -> Topic {
    let mut topic = Topic::new(1, "System Design", "Rate limiting", "Write about rate limiting");
    // Passenger fields the core does not interpret.
    topic.extra.insert("leetcode_slug".into(), json!("two-sum"));
    topic.extra.insert("difficulty".into(), json!("Easy"));
    topic.extra.insert("acceptance_rate".into(), json!(48.7));
    topic
}

#[test]
async fn missing_file_loads_as_empty_pool() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = JsonFileStore::new(dir.path().join("topics.json"));

    let loaded = store.load().await?;
    assert!(loaded.is_empty());

    Ok(())
}

#[test]
async fn round_trip_preserves_passenger_fields() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = JsonFileStore::new(dir.path().join("topics.json"));

    let topics = vec![sample_topic()];
    store.save(&topics).await?;
    let loaded = store.load().await?;

    assert_eq!(loaded, topics);
    assert_eq!(loaded[0].extra["leetcode_slug"], json!("two-sum"));

    Ok(())
}

#[test]
async fn load_save_load_is_lossless() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = JsonFileStore::new(dir.path().join("topics.json"));

    let mut topics = vec![sample_topic()];
    topics[0].used = true;
    store.save(&topics).await?;

    let first = store.load().await?;
    store.save(&first).await?;
    let second = store.load().await?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
async fn missing_used_field_defaults_to_false() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("topics.json");

    let raw = json!({
        "topics": [
            { "id": 3, "category": "DevOps & Infrastructure", "title": "K8s probes", "prompt": "Write about probes" }
        ]
    });
    tokio::fs::write(&path, serde_json::to_vec(&raw)?).await?;

    let store = JsonFileStore::new(&path);
    let loaded = store.load().await?;

    assert_eq!(loaded.len(), 1);
    assert!(!loaded[0].used);

    Ok(())
}

#[test]
async fn corrupt_document_is_a_distinct_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("topics.json");
    tokio::fs::write(&path, b"{ not json").await?;

    let store = JsonFileStore::new(&path);
    let err = store.load().await;

    assert!(matches!(err, Err(topics::error::StoreError::Corrupt(_))));

    Ok(())
}
