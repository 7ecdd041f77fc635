use std::ops::Deref;

use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};
use serde::de::DeserializeOwned;
use serde_querystring::ParseMode;

use axum::Json;
use axum::response::{IntoResponse, Response};

use crate::infrastructure::http::api::ApiResponseBody;

/// Query-string extractor tolerant of repeated keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryString<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryString<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        let value = serde_querystring::from_str(query, ParseMode::Duplicate).map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponseBody::new_error(
                    StatusCode::BAD_REQUEST,
                    format!("invalid query string: {}", e),
                )),
            )
                .into_response()
        })?;
        Ok(QueryString(value))
    }
}

impl<T> Deref for QueryString<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
