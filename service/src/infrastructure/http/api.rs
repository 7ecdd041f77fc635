use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::payments::PaymentError;
use crate::domain::store::StoreError;

// ApiSuccess is a wrapper around a response that includes a status code.

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub(crate) fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

// ApiError is a wrapper around a response that includes a status code.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound,
    /// The visitor must authenticate or subscribe first; the body carries
    /// the route the client should navigate to. Classification happens in
    /// the access gate, navigation here at the boundary.
    Unauthorized { redirect_to: &'static str },
    Forbidden,
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound => Self::NotFound,
            StoreError::ValidationFailed(cause) => Self::UnprocessableEntity(cause),
            StoreError::StoreFailure(cause) => {
                tracing::error!("{:?}", cause);
                Self::InternalServerError("Document store error".to_string())
            }
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(value: PaymentError) -> Self {
        match value {
            PaymentError::ProviderFailure(cause) => {
                tracing::error!("{:?}", cause);
                Self::InternalServerError("Payment provider error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use ApiError::*;

        match self {
            InternalServerError(e) => {
                tracing::error!("{}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponseBody::new_error(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )),
                )
                    .into_response()
            }
            UnprocessableEntity(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponseBody::new_error(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    message,
                )),
            )
                .into_response(),
            Unauthorized { redirect_to } => (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponseBody::new_redirect(
                    StatusCode::UNAUTHORIZED,
                    "Sign in or subscription required".to_string(),
                    redirect_to,
                )),
            )
                .into_response(),
            Forbidden => (
                StatusCode::FORBIDDEN,
                Json(ApiResponseBody::new_error(
                    StatusCode::FORBIDDEN,
                    "Access denied".to_string(),
                )),
            )
                .into_response(),
            NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

// Generic response structure shared by all API responses.

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    pub status_code: u16,
    pub data: T,
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData {
                message,
                redirect_to: None,
            },
        }
    }

    pub fn new_redirect(
        status_code: StatusCode,
        message: String,
        redirect_to: &'static str,
    ) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData {
                message,
                redirect_to: Some(redirect_to),
            },
        }
    }
}

/// The response data format for all error responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<&'static str>,
}
