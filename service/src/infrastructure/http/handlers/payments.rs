use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::{AppState, PaymentIntent, PaymentProvider, PaymentRequest, ServiceType};
use crate::infrastructure::http::api::{ApiError, ApiSuccess};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentRequest {
    pub service_type: ServiceType,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Initialize a styling checkout. The amount is looked up from the fixed
/// service menu; an unknown service type fails request deserialization and
/// never reaches the provider.
pub async fn create_styling_intent<S: AppState>(
    State(state): State<S>,
    Json(request): Json<CreateIntentRequest>,
) -> Result<ApiSuccess<PaymentIntent>, ApiError> {
    let intent = state
        .payments()
        .create_intent(&PaymentRequest {
            service_type: request.service_type,
            customer_email: request.customer_email,
            user_id: request.user_id,
        })
        .await?;
    Ok(ApiSuccess::new(StatusCode::OK, intent))
}
