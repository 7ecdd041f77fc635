use axum::extract::{Path, State};
use axum::http::StatusCode;
use gentleman_common::{
    CLICK_COUNT_FIELD_NAME, LAST_CLICKED_FIELD_NAME, LAST_VIEWED_FIELD_NAME, OUTFITS_COLLECTION,
    OutfitRecord, VIEW_COUNT_FIELD_NAME, WEEKLY_COLLECTION, WeeklyProductRecord,
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::store::list_records;
use crate::domain::{AppState, DocumentStore, Sourced, merge};
use crate::infrastructure::http::api::{ApiError, ApiSuccess};
use crate::infrastructure::http::handlers::dto::MetadataResponse;
use crate::infrastructure::http::querystring::QueryString;

#[derive(Deserialize, Debug, Default)]
pub struct OutfitQueryParams {
    pub occasion: Option<String>,
    pub season: Option<String>,
    pub style: Option<String>,
}

/// A filtered look feed plus the facet values present across the whole
/// (unfiltered) feed, so clients can render the filter controls.
#[derive(Debug, Clone, Serialize)]
pub struct OutfitFeedResponse {
    pub data: Vec<Sourced<OutfitRecord>>,
    pub facets: OutfitFacets,
    pub meta: MetadataResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitFacets {
    pub occasions: Vec<String>,
    pub seasons: Vec<String>,
    pub style_types: Vec<String>,
}

pub async fn list_outfits<S: AppState>(
    QueryString(params): QueryString<OutfitQueryParams>,
    State(state): State<S>,
) -> Result<ApiSuccess<OutfitFeedResponse>, ApiError> {
    let dynamic: Vec<OutfitRecord> = list_records(state.store(), &OUTFITS_COLLECTION).await?;
    let feed = merge(&state.catalog().outfits, &dynamic);

    let facets = OutfitFacets {
        occasions: facet_values(&feed, |outfit| &outfit.occasion),
        seasons: facet_values(&feed, |outfit| &outfit.season),
        style_types: facet_values(&feed, |outfit| &outfit.style_type),
    };

    let data: Vec<Sourced<OutfitRecord>> = feed
        .into_iter()
        .filter(|sourced| matches_facet(&params.occasion, &sourced.item.occasion))
        .filter(|sourced| matches_facet(&params.season, &sourced.item.season))
        .filter(|sourced| matches_facet(&params.style, &sourced.item.style_type))
        .collect();

    let meta = MetadataResponse { total: data.len() };
    Ok(ApiSuccess::new(
        StatusCode::OK,
        OutfitFeedResponse { data, facets, meta },
    ))
}

/// A look plus its resolved product references. Ids that no longer exist in
/// either catalog are simply absent from `products`; the stored total is
/// returned as-is.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitDetailResponse {
    #[serde(flatten)]
    pub outfit: Sourced<OutfitRecord>,
    pub products: Vec<WeeklyProductRecord>,
}

pub async fn outfit_by_slug<S: AppState>(
    Path(slug): Path<String>,
    State(state): State<S>,
) -> Result<ApiSuccess<OutfitDetailResponse>, ApiError> {
    let dynamic: Vec<OutfitRecord> = list_records(state.store(), &OUTFITS_COLLECTION).await?;
    let feed = merge(&state.catalog().outfits, &dynamic);

    let Some(outfit) = feed.into_iter().find(|sourced| sourced.item.slug == slug) else {
        return Err(ApiError::NotFound);
    };

    let catalog = weekly_catalog(&state).await?;
    let products: Vec<WeeklyProductRecord> = outfit
        .item
        .products
        .iter()
        .filter_map(|id| catalog.iter().find(|product| &product.id == id).cloned())
        .collect();

    Ok(ApiSuccess::new(
        StatusCode::OK,
        OutfitDetailResponse { outfit, products },
    ))
}

pub async fn record_view<S: AppState>(
    Path(id): Path<String>,
    State(state): State<S>,
) -> Result<StatusCode, ApiError> {
    state
        .store()
        .increment(
            &OUTFITS_COLLECTION,
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
            &OUTFITS_COLLECTION,
            &id,
            CLICK_COUNT_FIELD_NAME,
            LAST_CLICKED_FIELD_NAME,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The full selectable product catalog: bundled weekly products plus
/// store-backed ones, flattened out of their source tags.
pub async fn weekly_catalog<S: AppState>(state: &S) -> Result<Vec<WeeklyProductRecord>, ApiError> {
    let dynamic: Vec<WeeklyProductRecord> = list_records(state.store(), &WEEKLY_COLLECTION).await?;
    Ok(merge(&state.catalog().weekly, &dynamic)
        .into_iter()
        .map(|sourced| sourced.item)
        .collect())
}

fn facet_values(
    feed: &[Sourced<OutfitRecord>],
    facet: impl Fn(&OutfitRecord) -> &String,
) -> Vec<String> {
    feed.iter()
        .map(|sourced| facet(&sourced.item).clone())
        .filter(|value| !value.is_empty())
        .unique()
        .collect()
}

fn matches_facet(wanted: &Option<String>, actual: &str) -> bool {
    match wanted {
        Some(value) => value == actual,
        None => true,
    }
}
