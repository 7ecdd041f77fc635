use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use gentleman_common::UserRecord;

use crate::domain::access::{AccessVerdict, Session};
use crate::domain::{AppState, IdentityProvider};
use crate::infrastructure::http::api::ApiError;

/// Per-request session: resolves the bearer token through the identity
/// provider and classifies the visitor against the user directory. Both the
/// entitlement and the admin gate read the single record fetched here.
pub struct CurrentSession(pub Session);

impl<S: AppState> FromRequestParts<S> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = match bearer_token(parts) {
            None => None,
            Some(token) => state.identity().resolve(token).await.map_err(ApiError::from)?,
        };

        let session = Session::resolve(identity, state.store())
            .await
            .map_err(ApiError::from)?;
        Ok(CurrentSession(session))
    }
}

/// Session that already passed the subscription gate.
pub struct EntitledSession(pub UserRecord);

impl<S: AppState> FromRequestParts<S> for EntitledSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentSession(session) = CurrentSession::from_request_parts(parts, state).await?;
        let state = session.into_state();
        match verdict_to_error(state.verdict()) {
            None => state
                .user()
                .cloned()
                .map(EntitledSession)
                .ok_or_else(|| ApiError::InternalServerError("allowed without a user".to_string())),
            Some(error) => Err(error),
        }
    }
}

/// Session that already passed the admin-role gate.
pub struct AdminSession(pub UserRecord);

impl<S: AppState> FromRequestParts<S> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentSession(session) = CurrentSession::from_request_parts(parts, state).await?;
        let state = session.into_state();
        match verdict_to_error(state.admin_verdict()) {
            None => state
                .user()
                .cloned()
                .map(AdminSession)
                .ok_or_else(|| ApiError::InternalServerError("allowed without a user".to_string())),
            Some(error) => Err(error),
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn verdict_to_error(verdict: AccessVerdict) -> Option<ApiError> {
    match verdict {
        AccessVerdict::Allow => None,
        AccessVerdict::RedirectTo(route) => Some(ApiError::Unauthorized { redirect_to: route }),
        AccessVerdict::Denied => Some(ApiError::Forbidden),
        // A request-scoped session is always fully resolved; Pending only
        // exists for long-lived gate watchers.
        AccessVerdict::Pending => Some(ApiError::InternalServerError(
            "session classification still pending".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::access::{SIGN_IN_ROUTE, SUBSCRIBE_ROUTE};

    use super::*;

    #[test]
    fn verdicts_map_to_boundary_actions() {
        assert_eq!(verdict_to_error(AccessVerdict::Allow), None);
        assert_eq!(
            verdict_to_error(AccessVerdict::RedirectTo(SIGN_IN_ROUTE)),
            Some(ApiError::Unauthorized {
                redirect_to: SIGN_IN_ROUTE
            })
        );
        assert_eq!(
            verdict_to_error(AccessVerdict::RedirectTo(SUBSCRIBE_ROUTE)),
            Some(ApiError::Unauthorized {
                redirect_to: SUBSCRIBE_ROUTE
            })
        );
        assert_eq!(
            verdict_to_error(AccessVerdict::Denied),
            Some(ApiError::Forbidden)
        );
    }
}
