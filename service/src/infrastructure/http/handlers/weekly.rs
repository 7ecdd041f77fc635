use axum::extract::{Path, State};
use axum::http::StatusCode;
use gentleman_common::{
    CLICK_COUNT_FIELD_NAME, LAST_CLICKED_FIELD_NAME, LAST_VIEWED_FIELD_NAME,
    VIEW_COUNT_FIELD_NAME, WEEKLY_COLLECTION, WeeklyProductRecord,
};

use crate::domain::store::list_records;
use crate::domain::{AppState, DocumentStore, Sourced, merge};
use crate::infrastructure::http::api::{ApiError, ApiSuccess};
use crate::infrastructure::http::handlers::dto::{FeedResponse, OneResponse};

pub async fn list_weekly<S: AppState>(
    State(state): State<S>,
) -> Result<ApiSuccess<FeedResponse<WeeklyProductRecord>>, ApiError> {
    let dynamic: Vec<WeeklyProductRecord> = list_records(state.store(), &WEEKLY_COLLECTION).await?;
    let feed = merge(&state.catalog().weekly, &dynamic);
    Ok(ApiSuccess::new(StatusCode::OK, FeedResponse::from(feed)))
}

pub async fn weekly_by_slug<S: AppState>(
    Path(slug): Path<String>,
    State(state): State<S>,
) -> Result<ApiSuccess<OneResponse<Sourced<WeeklyProductRecord>>>, ApiError> {
    let dynamic: Vec<WeeklyProductRecord> = list_records(state.store(), &WEEKLY_COLLECTION).await?;
    let feed = merge(&state.catalog().weekly, &dynamic);

    feed.into_iter()
        .find(|sourced| sourced.item.slug == slug)
        .map(|found| ApiSuccess::new(StatusCode::OK, OneResponse::from(found)))
        .ok_or(ApiError::NotFound)
}

// Analytics counters. Static items have no stored counters; an id that only
// exists in the bundle yields NotFound, which clients treat as a no-op.

pub async fn record_view<S: AppState>(
    Path(id): Path<String>,
    State(state): State<S>,
) -> Result<StatusCode, ApiError> {
    state
        .store()
        .increment(
            &WEEKLY_COLLECTION,
            &id,
            VIEW_COUNT_FIELD_NAME,
            LAST_VIEWED_FIELD_NAME,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn record_click<S: AppState>(
    Path(id): Path<String>,
    State(state): State<S>,
) -> Result<StatusCode, ApiError> {
    state
        .store()
        .increment(
            &WEEKLY_COLLECTION,
            &id,
            CLICK_COUNT_FIELD_NAME,
            LAST_CLICKED_FIELD_NAME,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
