use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{SecondsFormat, Utc};
use gentleman_common::{
    ARTICLES_COLLECTION, CollectionName, OUTFITS_COLLECTION, OutfitRecord, Record, Role,
    SubscriptionStatus, USERS_COLLECTION, UserRecord, WEEKLY_COLLECTION, WELLNESS_COLLECTION,
    slugify,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::domain::pricing::{compute_total, toggle_selection};
use crate::domain::store::{get_record, list_records};
use crate::domain::{AppState, DocumentStore, StoreError};
use crate::infrastructure::http::api::{ApiError, ApiSuccess};
use crate::infrastructure::http::handlers::dto::{ManyResponse, OneResponse};
use crate::infrastructure::http::handlers::outfits::weekly_catalog;
use crate::infrastructure::http::session::AdminSession;

// Admin surface: raw document editing over the store collections. Every
// handler takes AdminSession first so the role gate runs before anything
// touches the body.

#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

// -- Articles and wellness posts (same shape, different collection) --------

pub async fn create_article<S: AppState>(
    AdminSession(_admin): AdminSession,
    State(state): State<S>,
    Json(body): Json<Value>,
) -> Result<ApiSuccess<OneResponse<CreatedResponse>>, ApiError> {
    create_titled(state.store(), &ARTICLES_COLLECTION, body).await
}

pub async fn update_article<S: AppState>(
    AdminSession(_admin): AdminSession,
    Path(id): Path<String>,
    State(state): State<S>,
    Json(patch): Json<Value>,
) -> Result<StatusCode, ApiError> {
    update_titled(state.store(), &ARTICLES_COLLECTION, &id, patch).await
}

pub async fn delete_article<S: AppState>(
    AdminSession(_admin): AdminSession,
    Path(id): Path<String>,
    State(state): State<S>,
) -> Result<StatusCode, ApiError> {
    state.store().delete(&ARTICLES_COLLECTION, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_wellness<S: AppState>(
    AdminSession(_admin): AdminSession,
    State(state): State<S>,
    Json(body): Json<Value>,
) -> Result<ApiSuccess<OneResponse<CreatedResponse>>, ApiError> {
    create_titled(state.store(), &WELLNESS_COLLECTION, body).await
}

pub async fn update_wellness<S: AppState>(
    AdminSession(_admin): AdminSession,
    Path(id): Path<String>,
    State(state): State<S>,
    Json(patch): Json<Value>,
) -> Result<StatusCode, ApiError> {
    update_titled(state.store(), &WELLNESS_COLLECTION, &id, patch).await
}

pub async fn delete_wellness<S: AppState>(
    AdminSession(_admin): AdminSession,
    Path(id): Path<String>,
    State(state): State<S>,
) -> Result<StatusCode, ApiError> {
    state.store().delete(&WELLNESS_COLLECTION, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// -- Weekly products -------------------------------------------------------

pub async fn create_weekly<S: AppState>(
    AdminSession(_admin): AdminSession,
    State(state): State<S>,
    Json(body): Json<Value>,
) -> Result<ApiSuccess<OneResponse<CreatedResponse>>, ApiError> {
    create_titled(state.store(), &WEEKLY_COLLECTION, body).await
}

pub async fn update_weekly<S: AppState>(
    AdminSession(_admin): AdminSession,
    Path(id): Path<String>,
    State(state): State<S>,
    Json(patch): Json<Value>,
) -> Result<StatusCode, ApiError> {
    update_titled(state.store(), &WEEKLY_COLLECTION, &id, patch).await
}

pub async fn delete_weekly<S: AppState>(
    AdminSession(_admin): AdminSession,
    Path(id): Path<String>,
    State(state): State<S>,
) -> Result<StatusCode, ApiError> {
    state.store().delete(&WEEKLY_COLLECTION, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// -- Outfit looks ----------------------------------------------------------

/// Create a look. Requires a title and at least one product reference; the
/// total is computed server-side from the current product catalog, never
/// taken from the request.
pub async fn create_outfit<S: AppState>(
    AdminSession(_admin): AdminSession,
    State(state): State<S>,
    Json(body): Json<Value>,
) -> Result<ApiSuccess<OneResponse<CreatedResponse>>, ApiError> {
    let mut fields = object(body)?;
    let title = require_text(&fields, "title")?;
    let products = string_list(fields.get("products"));
    if products.is_empty() {
        return Err(StoreError::ValidationFailed(
            "an outfit needs at least one product".to_string(),
        )
        .into());
    }

    let catalog = weekly_catalog(&state).await?;
    fields.insert(
        "totalPrice".to_string(),
        json!(compute_total(&products, &catalog)),
    );
    ensure_slug(&mut fields, &title);
    stamp_created(&mut fields);

    let id = state
        .store()
        .create(&OUTFITS_COLLECTION, Value::Object(fields))
        .await?;
    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        OneResponse::from(CreatedResponse { id }),
    ))
}

/// Patch a look. When the patch touches `products` the total is recomputed
/// from the current catalog; otherwise the stored total stands.
pub async fn update_outfit<S: AppState>(
    AdminSession(_admin): AdminSession,
    Path(id): Path<String>,
    State(state): State<S>,
    Json(patch): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let mut fields = object(patch)?;
    if let Some(products) = fields.get("products") {
        let products = string_list(Some(products));
        if products.is_empty() {
            return Err(StoreError::ValidationFailed(
                "an outfit needs at least one product".to_string(),
            )
            .into());
        }
        let catalog = weekly_catalog(&state).await?;
        fields.insert(
            "totalPrice".to_string(),
            json!(compute_total(&products, &catalog)),
        );
    }
    rederive_slug(&mut fields);
    stamp_updated(&mut fields);

    state
        .store()
        .update(&OUTFITS_COLLECTION, &id, Value::Object(fields))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_outfit<S: AppState>(
    AdminSession(_admin): AdminSession,
    Path(id): Path<String>,
    State(state): State<S>,
) -> Result<StatusCode, ApiError> {
    state.store().delete(&OUTFITS_COLLECTION, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub products: Vec<String>,
    pub total_price: f64,
}

/// Toggle one product in a look's selection and persist the recomputed
/// total. Returns the new selection so the authoring client can render it
/// without refetching.
pub async fn toggle_outfit_product<S: AppState>(
    AdminSession(_admin): AdminSession,
    Path((id, product_id)): Path<(String, String)>,
    State(state): State<S>,
) -> Result<ApiSuccess<SelectionResponse>, ApiError> {
    let outfit: OutfitRecord = get_record(state.store(), &OUTFITS_COLLECTION, &id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let products = toggle_selection(&outfit.products, &product_id);
    let catalog = weekly_catalog(&state).await?;
    let total_price = compute_total(&products, &catalog);

    let mut patch = Map::new();
    patch.insert("products".to_string(), json!(products));
    patch.insert("totalPrice".to_string(), json!(total_price));
    stamp_updated(&mut patch);
    state
        .store()
        .update(&OUTFITS_COLLECTION, &id, Value::Object(patch))
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SelectionResponse {
            products,
            total_price,
        },
    ))
}

// -- User directory --------------------------------------------------------

pub async fn list_users<S: AppState>(
    AdminSession(_admin): AdminSession,
    State(state): State<S>,
) -> Result<ApiSuccess<ManyResponse<UserRecord>>, ApiError> {
    let users: Vec<UserRecord> = list_records(state.store(), &USERS_COLLECTION).await?;
    Ok(ApiSuccess::new(StatusCode::OK, ManyResponse::from(users)))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUserRequest {
    /// Provide the identity-provider id to link an existing account; omit it
    /// to let the store assign one.
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub subscription_status: Option<SubscriptionStatus>,
    #[serde(default)]
    pub access: bool,
}

pub async fn create_user<S: AppState>(
    AdminSession(_admin): AdminSession,
    State(state): State<S>,
    Json(request): Json<UpsertUserRequest>,
) -> Result<ApiSuccess<OneResponse<CreatedResponse>>, ApiError> {
    if request.email.trim().is_empty() {
        return Err(StoreError::ValidationFailed("email must not be empty".to_string()).into());
    }

    let now = now_stamp();
    let record = UserRecord {
        id: request.id.clone().unwrap_or_default(),
        email: request.email,
        role: request.role.unwrap_or(Role::User),
        subscription_status: request
            .subscription_status
            .unwrap_or(SubscriptionStatus::Inactive),
        access: request.access,
        created_at: Some(now.clone()),
        updated_at: Some(now),
    };

    let id = match request.id {
        Some(id) => {
            state
                .store()
                .put(&USERS_COLLECTION, &id, record.to_document())
                .await?;
            id
        }
        None => {
            state
                .store()
                .create(&USERS_COLLECTION, record.to_document())
                .await?
        }
    };
    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        OneResponse::from(CreatedResponse { id }),
    ))
}

pub async fn update_user<S: AppState>(
    AdminSession(_admin): AdminSession,
    Path(id): Path<String>,
    State(state): State<S>,
    Json(patch): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let mut fields = object(patch)?;
    stamp_updated(&mut fields);
    state
        .store()
        .update(&USERS_COLLECTION, &id, Value::Object(fields))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_user<S: AppState>(
    AdminSession(_admin): AdminSession,
    Path(id): Path<String>,
    State(state): State<S>,
) -> Result<StatusCode, ApiError> {
    state.store().delete(&USERS_COLLECTION, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// -- Shared document plumbing ----------------------------------------------

async fn create_titled<S: DocumentStore>(
    store: &S,
    collection: &CollectionName,
    body: Value,
) -> Result<ApiSuccess<OneResponse<CreatedResponse>>, ApiError> {
    let mut fields = object(body)?;
    let title = require_text(&fields, "title")?;
    ensure_slug(&mut fields, &title);
    stamp_created(&mut fields);

    let id = store.create(collection, Value::Object(fields)).await?;
    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        OneResponse::from(CreatedResponse { id }),
    ))
}

async fn update_titled<S: DocumentStore>(
    store: &S,
    collection: &CollectionName,
    id: &str,
    patch: Value,
) -> Result<StatusCode, ApiError> {
    let mut fields = object(patch)?;
    rederive_slug(&mut fields);
    stamp_updated(&mut fields);

    store.update(collection, id, Value::Object(fields)).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn object(body: Value) -> Result<Map<String, Value>, StoreError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::ValidationFailed(
            "request body must be a JSON object".to_string(),
        )),
    }
}

fn require_text(fields: &Map<String, Value>, field: &str) -> Result<String, StoreError> {
    fields
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| StoreError::ValidationFailed(format!("{field} must not be empty")))
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Fill in `slug` from the title when the author did not choose one.
fn ensure_slug(fields: &mut Map<String, Value>, title: &str) {
    let missing = fields
        .get("slug")
        .and_then(Value::as_str)
        .is_none_or(|slug| slug.trim().is_empty());
    if missing {
        fields.insert("slug".to_string(), json!(slugify(title)));
    }
}

/// A patch that renames without choosing a slug gets a freshly derived one;
/// a patch that sets `slug` explicitly wins.
fn rederive_slug(fields: &mut Map<String, Value>) {
    if fields.contains_key("slug") {
        return;
    }
    if let Some(title) = fields.get("title").and_then(Value::as_str) {
        fields.insert("slug".to_string(), json!(slugify(title)));
    }
}

fn stamp_created(fields: &mut Map<String, Value>) {
    let now = now_stamp();
    fields.insert("createdAt".to_string(), json!(now));
    fields.insert("updatedAt".to_string(), json!(now));
}

fn stamp_updated(fields: &mut Map<String, Value>) {
    fields.insert("updatedAt".to_string(), json!(now_stamp()));
}

fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_derived_only_when_absent() {
        let mut fields = object(json!({ "title": "Fall Layers" })).unwrap();
        ensure_slug(&mut fields, "Fall Layers");
        assert_eq!(fields["slug"], "fall-layers");

        let mut fields = object(json!({ "title": "Fall Layers", "slug": "layers" })).unwrap();
        ensure_slug(&mut fields, "Fall Layers");
        assert_eq!(fields["slug"], "layers");
    }

    #[test]
    fn patch_rederives_slug_from_new_title() {
        let mut fields = object(json!({ "title": "New Name" })).unwrap();
        rederive_slug(&mut fields);
        assert_eq!(fields["slug"], "new-name");

        let mut fields = object(json!({ "title": "New Name", "slug": "chosen" })).unwrap();
        rederive_slug(&mut fields);
        assert_eq!(fields["slug"], "chosen");

        let mut fields = object(json!({ "featured": true })).unwrap();
        rederive_slug(&mut fields);
        assert!(!fields.contains_key("slug"));
    }

    #[test]
    fn titles_must_carry_non_whitespace_text() {
        let fields = object(json!({ "title": "   " })).unwrap();
        assert!(require_text(&fields, "title").is_err());
        let fields = object(json!({ "title": 7 })).unwrap();
        assert!(require_text(&fields, "title").is_err());
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        assert!(object(json!(["a"])).is_err());
        assert!(object(json!("a")).is_err());
        assert!(object(json!({})).is_ok());
    }

    #[test]
    fn string_list_ignores_non_string_entries() {
        assert_eq!(
            string_list(Some(&json!(["p1", 2, "p3"]))),
            vec!["p1".to_owned(), "p3".to_owned()]
        );
        assert!(string_list(Some(&json!("p1"))).is_empty());
        assert!(string_list(None).is_empty());
    }
}
