use axum::http::StatusCode;
use gentleman_common::UserRecord;
use serde::Serialize;

use crate::domain::AccessState;
use crate::infrastructure::http::api::ApiSuccess;
use crate::infrastructure::http::session::CurrentSession;

pub mod admin;
pub mod content;
mod dto;
pub mod outfits;
pub mod payments;
pub mod weekly;

// health check handler
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// The visitor's own gate classification, for clients that need to decide
/// what to render or where to navigate.
pub async fn current_session(
    CurrentSession(session): CurrentSession,
) -> ApiSuccess<SessionResponse> {
    let state = session.into_state();
    let response = SessionResponse {
        status: match &state {
            AccessState::Loading => "loading",
            AccessState::Unauthenticated => "unauthenticated",
            AccessState::Authenticated { .. } => "authenticated",
        },
        can_view_protected: state.can_view_protected(),
        is_admin: state.is_admin(),
        user: state.user().cloned(),
    };
    ApiSuccess::new(StatusCode::OK, response)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub status: &'static str,
    pub can_view_protected: bool,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRecord>,
}
