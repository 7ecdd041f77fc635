use axum::extract::{Path, State};
use axum::http::StatusCode;
use gentleman_common::{ARTICLES_COLLECTION, ArticleRecord, WELLNESS_COLLECTION};

use crate::domain::store::list_records;
use crate::domain::{AppState, Sourced, merge};
use crate::infrastructure::http::api::{ApiError, ApiSuccess};
use crate::infrastructure::http::handlers::dto::{FeedResponse, OneResponse};
use crate::infrastructure::http::session::EntitledSession;

// Articles and wellness posts share a record shape; the handlers differ in
// collection, bundled list and gating only.

pub async fn list_articles<S: AppState>(
    State(state): State<S>,
) -> Result<ApiSuccess<FeedResponse<ArticleRecord>>, ApiError> {
    let dynamic: Vec<ArticleRecord> = list_records(state.store(), &ARTICLES_COLLECTION).await?;
    let feed = merge(&state.catalog().articles, &dynamic);
    Ok(ApiSuccess::new(StatusCode::OK, FeedResponse::from(feed)))
}

pub async fn article_by_slug<S: AppState>(
    Path(slug): Path<String>,
    State(state): State<S>,
) -> Result<ApiSuccess<OneResponse<Sourced<ArticleRecord>>>, ApiError> {
    let dynamic: Vec<ArticleRecord> = list_records(state.store(), &ARTICLES_COLLECTION).await?;
    let feed = merge(&state.catalog().articles, &dynamic);

    feed.into_iter()
        .find(|sourced| sourced.item.slug == slug)
        .map(|found| ApiSuccess::new(StatusCode::OK, OneResponse::from(found)))
        .ok_or(ApiError::NotFound)
}

/// Wellness content is members-only end to end: the list serializes full
/// bodies, so it sits behind the same subscription gate as the detail.
pub async fn list_wellness<S: AppState>(
    EntitledSession(_member): EntitledSession,
    State(state): State<S>,
) -> Result<ApiSuccess<FeedResponse<ArticleRecord>>, ApiError> {
    let dynamic: Vec<ArticleRecord> = list_records(state.store(), &WELLNESS_COLLECTION).await?;
    let feed = merge(&state.catalog().wellness, &dynamic);
    Ok(ApiSuccess::new(StatusCode::OK, FeedResponse::from(feed)))
}

pub async fn wellness_by_slug<S: AppState>(
    EntitledSession(_member): EntitledSession,
    Path(slug): Path<String>,
    State(state): State<S>,
) -> Result<ApiSuccess<OneResponse<Sourced<ArticleRecord>>>, ApiError> {
    let dynamic: Vec<ArticleRecord> = list_records(state.store(), &WELLNESS_COLLECTION).await?;
    let feed = merge(&state.catalog().wellness, &dynamic);

    feed.into_iter()
        .find(|sourced| sourced.item.slug == slug)
        .map(|found| ApiSuccess::new(StatusCode::OK, OneResponse::from(found)))
        .ok_or(ApiError::NotFound)
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use axum::body::to_bytes;
    use axum::extract::FromRequestParts;
    use axum::http::Request;
    use axum::http::header::AUTHORIZATION;
    use axum::response::IntoResponse;
    use gentleman_common::test_utils::user;
    use gentleman_common::{Role, StaticCatalog, USERS_COLLECTION};
    use serde_json::json;

    use crate::domain::DocumentStore;
    use crate::domain::access::{SIGN_IN_ROUTE, SUBSCRIBE_ROUTE};
    use crate::domain::store::put_record;
    use crate::infrastructure::identity::FixedIdentityProvider;
    use crate::infrastructure::payment::HttpPaymentProvider;
    use crate::infrastructure::persistence::MemoryDocumentStore;

    use super::*;

    static EMPTY_CATALOG: LazyLock<StaticCatalog> = LazyLock::new(StaticCatalog::default);

    #[derive(Clone)]
    struct TestState {
        store: MemoryDocumentStore,
        identity: FixedIdentityProvider,
        payments: HttpPaymentProvider,
    }

    impl TestState {
        fn new(identity: FixedIdentityProvider) -> Self {
            Self {
                store: MemoryDocumentStore::new(),
                identity,
                payments: HttpPaymentProvider::new("http://localhost", "sk_test"),
            }
        }
    }

    impl AppState for TestState {
        type Store = MemoryDocumentStore;
        type Identity = FixedIdentityProvider;
        type Payments = HttpPaymentProvider;

        fn store(&self) -> &Self::Store {
            &self.store
        }

        fn identity(&self) -> &Self::Identity {
            &self.identity
        }

        fn payments(&self) -> &Self::Payments {
            &self.payments
        }

        fn catalog(&self) -> &'static StaticCatalog {
            &EMPTY_CATALOG
        }
    }

    async fn seed_wellness_body(state: &TestState) {
        state
            .store
            .create(
                &WELLNESS_COLLECTION,
                json!({ "title": "Rest Days", "content": "members only body" }),
            )
            .await
            .unwrap();
    }

    fn request_parts(bearer: Option<&str>) -> axum::http::request::Parts {
        let mut builder = Request::builder().uri("/api/wellness");
        if let Some(token) = bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn anonymous_visitors_cannot_list_wellness_bodies() {
        let state = TestState::new(FixedIdentityProvider::default());
        seed_wellness_body(&state).await;

        let mut parts = request_parts(None);
        let gate = EntitledSession::from_request_parts(&mut parts, &state).await;

        assert!(matches!(
            gate.err(),
            Some(ApiError::Unauthorized {
                redirect_to: SIGN_IN_ROUTE
            })
        ));
    }

    #[tokio::test]
    async fn non_entitled_members_are_sent_to_subscribe_before_the_list() {
        let state =
            TestState::new(FixedIdentityProvider::single("tok-n1", "n1", "n1@example.com"));
        put_record(&state.store, &USERS_COLLECTION, &user("n1", Role::User, false))
            .await
            .unwrap();
        seed_wellness_body(&state).await;

        let mut parts = request_parts(Some("tok-n1"));
        let gate = EntitledSession::from_request_parts(&mut parts, &state).await;

        assert!(matches!(
            gate.err(),
            Some(ApiError::Unauthorized {
                redirect_to: SUBSCRIBE_ROUTE
            })
        ));
    }

    #[tokio::test]
    async fn entitled_members_read_the_full_wellness_list() {
        let state =
            TestState::new(FixedIdentityProvider::single("tok-m1", "m1", "m1@example.com"));
        put_record(&state.store, &USERS_COLLECTION, &user("m1", Role::User, true))
            .await
            .unwrap();
        seed_wellness_body(&state).await;

        let mut parts = request_parts(Some("tok-m1"));
        let gate = EntitledSession::from_request_parts(&mut parts, &state)
            .await
            .unwrap();

        let response = list_wellness(gate, State(state))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("members only body"));
    }
}
