use chrono::{DateTime, Utc};
use gentleman_common::{CollectionName, Database};
use serde_json::Value;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::domain::store::{DocumentStore, StoreError, StoredDocument};

/// Document store backed by a single JSONB table. Writes are
/// last-write-wins; `created_at`/`updated_at` are server-assigned.
#[derive(Clone)]
pub struct PostgresDocumentStore {
    database: &'static Database,
}

impl PostgresDocumentStore {
    pub fn new(database: &'static Database) -> Self {
        Self { database }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::StoreFailure(other.to_string()),
        }
    }
}

fn row_to_document(row: &PgRow) -> Result<StoredDocument, StoreError> {
    let id: String = row.try_get("id")?;
    let body: Value = row.try_get("body")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
    Ok(StoredDocument {
        id,
        body,
        created_at,
        updated_at,
    })
}

impl DocumentStore for PostgresDocumentStore {
    async fn list(&self, collection: &CollectionName) -> Result<Vec<StoredDocument>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, body, created_at, updated_at FROM documents \
             WHERE collection = $1 ORDER BY created_at, id",
        )
        .bind(collection.as_ref())
        .fetch_all(self.database.pool())
        .await?;

        rows.iter().map(row_to_document).collect()
    }

    async fn get(
        &self,
        collection: &CollectionName,
        id: &str,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let row = sqlx::query(
            "SELECT id, body, created_at, updated_at FROM documents \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_ref())
        .bind(id)
        .fetch_optional(self.database.pool())
        .await?;

        row.as_ref().map(row_to_document).transpose()
    }

    async fn create(
        &self,
        collection: &CollectionName,
        body: Value,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection.as_ref())
            .bind(&id)
            .bind(&body)
            .execute(self.database.pool())
            .await?;

        Ok(id)
    }

    async fn put(
        &self,
        collection: &CollectionName,
        id: &str,
        body: Value,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3) \
             ON CONFLICT (collection, id) \
             DO UPDATE SET body = EXCLUDED.body, updated_at = now()",
        )
        .bind(collection.as_ref())
        .bind(id)
        .bind(&body)
        .execute(self.database.pool())
        .await?;

        Ok(())
    }

    async fn update(
        &self,
        collection: &CollectionName,
        id: &str,
        patch: Value,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE documents SET body = body || $3, updated_at = now() \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_ref())
        .bind(id)
        .bind(&patch)
        .execute(self.database.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, collection: &CollectionName, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_ref())
            .bind(id)
            .execute(self.database.pool())
            .await?;

        Ok(())
    }

    async fn increment(
        &self,
        collection: &CollectionName,
        id: &str,
        counter_field: &str,
        touched_field: &str,
    ) -> Result<(), StoreError> {
        let counter_path = vec![counter_field.to_owned()];
        let touched_path = vec![touched_field.to_owned()];

        let result = sqlx::query(
            "UPDATE documents \
             SET body = jsonb_set( \
                     jsonb_set(body, $3, to_jsonb(COALESCE((body #>> $3)::bigint, 0) + 1), true), \
                     $4, \
                     to_jsonb(to_char(now() AT TIME ZONE 'UTC', 'YYYY-MM-DD\"T\"HH24:MI:SS\"Z\"')), \
                     true), \
                 updated_at = now() \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_ref())
        .bind(id)
        .bind(&counter_path)
        .bind(&touched_path)
        .execute(self.database.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
