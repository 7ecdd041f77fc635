use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};
use gentleman_common::CollectionName;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::store::{DocumentStore, StoreError, StoredDocument};

/// In-process document store for tests and local runs. Same contract as the
/// Postgres adapter, including last-write-wins updates and server-side
/// timestamps.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<Mutex<BTreeMap<String, BTreeMap<String, StoredDocument>>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_collection<R>(
        &self,
        collection: &CollectionName,
        f: impl FnOnce(&mut BTreeMap<String, StoredDocument>) -> R,
    ) -> R {
        let mut collections = self.collections.lock().expect("store mutex poisoned");
        f(collections.entry(collection.to_string()).or_default())
    }
}

impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, collection: &CollectionName) -> Result<Vec<StoredDocument>, StoreError> {
        Ok(self.with_collection(collection, |documents| {
            let mut listed: Vec<_> = documents.values().cloned().collect();
            listed.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
            listed
        }))
    }

    async fn get(
        &self,
        collection: &CollectionName,
        id: &str,
    ) -> Result<Option<StoredDocument>, StoreError> {
        Ok(self.with_collection(collection, |documents| documents.get(id).cloned()))
    }

    async fn create(
        &self,
        collection: &CollectionName,
        body: Value,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        self.with_collection(collection, |documents| {
            documents.insert(
                id.clone(),
                StoredDocument {
                    id: id.clone(),
                    body,
                    created_at: now,
                    updated_at: now,
                },
            );
        });
        Ok(id)
    }

    async fn put(
        &self,
        collection: &CollectionName,
        id: &str,
        body: Value,
    ) -> Result<(), StoreError> {
        let now = Utc::now();

        self.with_collection(collection, |documents| {
            let created_at = documents.get(id).map(|existing| existing.created_at);
            documents.insert(
                id.to_owned(),
                StoredDocument {
                    id: id.to_owned(),
                    body,
                    created_at: created_at.unwrap_or(now),
                    updated_at: now,
                },
            );
        });
        Ok(())
    }

    async fn update(
        &self,
        collection: &CollectionName,
        id: &str,
        patch: Value,
    ) -> Result<(), StoreError> {
        self.with_collection(collection, |documents| {
            let Some(document) = documents.get_mut(id) else {
                return Err(StoreError::NotFound);
            };

            if let (Some(body), Some(fields)) = (document.body.as_object_mut(), patch.as_object())
            {
                for (field, value) in fields {
                    body.insert(field.clone(), value.clone());
                }
            }
            document.updated_at = Utc::now();
            Ok(())
        })
    }

    async fn delete(&self, collection: &CollectionName, id: &str) -> Result<(), StoreError> {
        self.with_collection(collection, |documents| {
            documents.remove(id);
        });
        Ok(())
    }

    async fn increment(
        &self,
        collection: &CollectionName,
        id: &str,
        counter_field: &str,
        touched_field: &str,
    ) -> Result<(), StoreError> {
        self.with_collection(collection, |documents| {
            let Some(document) = documents.get_mut(id) else {
                return Err(StoreError::NotFound);
            };

            if let Some(body) = document.body.as_object_mut() {
                let bumped = body
                    .get(counter_field)
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    + 1;
                body.insert(counter_field.to_owned(), Value::from(bumped));
                body.insert(
                    touched_field.to_owned(),
                    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
                );
            }
            document.updated_at = Utc::now();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use gentleman_common::{OUTFITS_COLLECTION, WEEKLY_COLLECTION};
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = MemoryDocumentStore::new();
        let id = store
            .create(&WEEKLY_COLLECTION, json!({ "title": "Boots" }))
            .await
            .unwrap();

        let fetched = store.get(&WEEKLY_COLLECTION, &id).await.unwrap().unwrap();
        assert_eq!(fetched.body["title"], "Boots");

        // Server timestamps are backfilled into the normalized body.
        let merged = fetched.merged_body();
        assert!(merged["createdAt"].is_string());
    }

    #[tokio::test]
    async fn update_is_a_shallow_merge_and_requires_existence() {
        let store = MemoryDocumentStore::new();
        let id = store
            .create(&WEEKLY_COLLECTION, json!({ "title": "Boots", "price": "$50" }))
            .await
            .unwrap();

        store
            .update(&WEEKLY_COLLECTION, &id, json!({ "price": "$60" }))
            .await
            .unwrap();

        let fetched = store.get(&WEEKLY_COLLECTION, &id).await.unwrap().unwrap();
        assert_eq!(fetched.body["title"], "Boots");
        assert_eq!(fetched.body["price"], "$60");

        let missing = store
            .update(&WEEKLY_COLLECTION, "nope", json!({ "price": "$1" }))
            .await;
        assert!(matches!(missing, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryDocumentStore::new();
        let id = store
            .create(&OUTFITS_COLLECTION, json!({ "title": "Look" }))
            .await
            .unwrap();

        store.delete(&OUTFITS_COLLECTION, &id).await.unwrap();
        store.delete(&OUTFITS_COLLECTION, &id).await.unwrap();
        assert!(store.get(&OUTFITS_COLLECTION, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn increment_bumps_counter_and_stamps_last_touched() {
        let store = MemoryDocumentStore::new();
        let id = store
            .create(&OUTFITS_COLLECTION, json!({ "title": "Look" }))
            .await
            .unwrap();

        store
            .increment(&OUTFITS_COLLECTION, &id, "viewCount", "lastViewedAt")
            .await
            .unwrap();
        store
            .increment(&OUTFITS_COLLECTION, &id, "viewCount", "lastViewedAt")
            .await
            .unwrap();

        let fetched = store.get(&OUTFITS_COLLECTION, &id).await.unwrap().unwrap();
        assert_eq!(fetched.body["viewCount"], 2);
        assert!(fetched.body["lastViewedAt"].is_string());
    }
}
