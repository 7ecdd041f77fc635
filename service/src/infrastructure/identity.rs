use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::domain::identity::{Identity, IdentityProvider};

/// Identity adapter that verifies bearer tokens against the hosted identity
/// service. An unknown or expired token is an anonymous visitor, not an
/// error; only transport failures propagate.
#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    verify_url: String,
}

impl HttpIdentityProvider {
    pub fn new(verify_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            verify_url: verify_url.to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifiedIdentity {
    user_id: String,
    #[serde(default)]
    email: String,
}

impl IdentityProvider for HttpIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, anyhow::Error> {
        let response = self
            .client
            .post(&self.verify_url)
            .bearer_auth(token)
            .send()
            .await
            .context("identity provider unreachable")?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
        ) {
            return Ok(None);
        }

        let verified: VerifiedIdentity = response
            .error_for_status()
            .context("identity provider rejected the verification call")?
            .json()
            .await
            .context("identity provider returned a malformed identity")?;

        Ok(Some(Identity {
            user_id: verified.user_id,
            email: verified.email,
        }))
    }
}

/// Token→identity table for local runs and tests.
#[derive(Clone, Default)]
pub struct FixedIdentityProvider {
    identities: Arc<HashMap<String, Identity>>,
}

impl FixedIdentityProvider {
    pub fn new(identities: HashMap<String, Identity>) -> Self {
        Self {
            identities: Arc::new(identities),
        }
    }

    pub fn single(token: &str, user_id: &str, email: &str) -> Self {
        let mut identities = HashMap::new();
        identities.insert(
            token.to_owned(),
            Identity {
                user_id: user_id.to_owned(),
                email: email.to_owned(),
            },
        );
        Self::new(identities)
    }
}

impl IdentityProvider for FixedIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, anyhow::Error> {
        Ok(self.identities.get(token).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_provider_resolves_known_tokens_only() {
        let provider = FixedIdentityProvider::single("tok-1", "u1", "u1@example.com");

        let known = provider.resolve("tok-1").await.unwrap();
        assert_eq!(known.map(|identity| identity.user_id), Some("u1".into()));

        assert!(provider.resolve("tok-2").await.unwrap().is_none());
    }
}
