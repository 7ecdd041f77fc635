use std::future::Future;

/// The identity the external provider resolved for a visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
}

/// The external identity provider, narrowed to what the gate needs: turn an
/// opaque bearer token into an identity, or nothing when the token does not
/// belong to anyone.
pub trait IdentityProvider: Clone + Send + Sync + 'static {
    fn resolve(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<Identity>, anyhow::Error>> + Send;
}
