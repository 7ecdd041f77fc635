use std::future::Future;

use chrono::{DateTime, SecondsFormat, Utc};
use gentleman_common::{CREATED_FIELD_NAME, CollectionName, Record, UPDATED_FIELD_NAME};
use serde_json::Value;

/// Failures surfaced by document-store operations.
///
/// `NotFound` is a render-a-not-found-state condition for callers, not an
/// error page; `StoreFailure` is the generic network/store error reported to
/// the user with no automatic retry.
#[derive(Debug)]
pub enum StoreError {
    NotFound,
    ValidationFailed(String),
    StoreFailure(String),
}

/// A raw stored document: opaque id, JSON body and the server-assigned
/// write timestamps.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: String,
    pub body: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredDocument {
    /// The body with `createdAt`/`updatedAt` backfilled from the server
    /// timestamps when the document itself does not carry them, so
    /// normalization always sees complete audit fields.
    pub fn merged_body(&self) -> Value {
        let mut body = self.body.clone();
        if let Some(map) = body.as_object_mut() {
            map.entry(CREATED_FIELD_NAME)
                .or_insert_with(|| Value::String(to_rfc3339(self.created_at)));
            map.entry(UPDATED_FIELD_NAME)
                .or_insert_with(|| Value::String(to_rfc3339(self.updated_at)));
        }
        body
    }
}

fn to_rfc3339(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Collection-keyed CRUD against the external document store.
///
/// Last-write-wins overwrite semantics; no optimistic concurrency token.
/// Timeout and retry policy belong to the store client, not this layer.
pub trait DocumentStore: Clone + Send + Sync + 'static {
    fn list(
        &self,
        collection: &CollectionName,
    ) -> impl Future<Output = Result<Vec<StoredDocument>, StoreError>> + Send;

    fn get(
        &self,
        collection: &CollectionName,
        id: &str,
    ) -> impl Future<Output = Result<Option<StoredDocument>, StoreError>> + Send;

    /// Insert a new document under a store-assigned id and return it.
    fn create(
        &self,
        collection: &CollectionName,
        body: Value,
    ) -> impl Future<Output = Result<String, StoreError>> + Send;

    /// Insert or fully replace the document with the given id.
    fn put(
        &self,
        collection: &CollectionName,
        id: &str,
        body: Value,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Shallow-merge `patch` into the stored body. Fails with `NotFound`
    /// when the document does not exist.
    fn update(
        &self,
        collection: &CollectionName,
        id: &str,
        patch: Value,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete is idempotent: removing an absent document is not an error.
    fn delete(
        &self,
        collection: &CollectionName,
        id: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Atomically bump a counter field by one and stamp the paired
    /// "last touched" field with the server time.
    fn increment(
        &self,
        collection: &CollectionName,
        id: &str,
        counter_field: &str,
        touched_field: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

// Typed layer: every document crossing this boundary goes through the
// record's parse-and-default normalization.

pub async fn list_records<T, S>(
    store: &S,
    collection: &CollectionName,
) -> Result<Vec<T>, StoreError>
where
    T: Record,
    S: DocumentStore,
{
    let documents = store.list(collection).await?;
    Ok(documents
        .iter()
        .map(|document| T::from_document(&document.id, &document.merged_body()))
        .collect())
}

pub async fn get_record<T, S>(
    store: &S,
    collection: &CollectionName,
    id: &str,
) -> Result<Option<T>, StoreError>
where
    T: Record,
    S: DocumentStore,
{
    let document = store.get(collection, id).await?;
    Ok(document.map(|document| T::from_document(&document.id, &document.merged_body())))
}

pub async fn put_record<T, S>(
    store: &S,
    collection: &CollectionName,
    record: &T,
) -> Result<(), StoreError>
where
    T: Record,
    S: DocumentStore,
{
    store.put(collection, record.id(), record.to_document()).await
}
