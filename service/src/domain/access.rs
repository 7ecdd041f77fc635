use gentleman_common::{Role, USERS_COLLECTION, UserRecord};
use tokio::sync::watch;

use crate::domain::identity::Identity;
use crate::domain::store::{DocumentStore, StoreError, get_record, put_record};

pub const SIGN_IN_ROUTE: &str = "/auth/signin";
pub const SUBSCRIBE_ROUTE: &str = "/subscribe";

/// The gate's classification of the current visitor.
///
/// Identity and entitlement travel together inside one enum value, so a
/// consumer always observes a complete state, never a half-updated mix of
/// the two.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessState {
    /// Identity resolution still outstanding. Consumers render nothing
    /// observable and never redirect from here.
    Loading,
    Unauthenticated,
    Authenticated { user: UserRecord },
}

/// What the boundary layer should do with a request. The gate only
/// classifies; navigation is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessVerdict {
    Allow,
    Pending,
    RedirectTo(&'static str),
    Denied,
}

impl AccessState {
    pub fn can_view_protected(&self) -> bool {
        matches!(self, Self::Authenticated { user } if user.access)
    }

    /// Role-based admin check, independent of subscription entitlement.
    /// Evaluated from the same fetched record as `can_view_protected`.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Authenticated { user } if user.role == Role::Admin)
    }

    /// Verdict for subscription-gated content.
    pub fn verdict(&self) -> AccessVerdict {
        match self {
            Self::Loading => AccessVerdict::Pending,
            Self::Unauthenticated => AccessVerdict::RedirectTo(SIGN_IN_ROUTE),
            Self::Authenticated { user } if user.access => AccessVerdict::Allow,
            Self::Authenticated { .. } => AccessVerdict::RedirectTo(SUBSCRIBE_ROUTE),
        }
    }

    /// Verdict for admin screens: unauthenticated visitors are sent to sign
    /// in, authenticated non-admins are denied outright.
    pub fn admin_verdict(&self) -> AccessVerdict {
        match self {
            Self::Loading => AccessVerdict::Pending,
            Self::Unauthenticated => AccessVerdict::RedirectTo(SIGN_IN_ROUTE),
            Self::Authenticated { .. } if self.is_admin() => AccessVerdict::Allow,
            Self::Authenticated { .. } => AccessVerdict::Denied,
        }
    }

    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Authenticated { user } => Some(user),
            _ => None,
        }
    }
}

/// One visitor's access state, constructed per request or per connection and
/// passed by reference to whoever needs it. No ambient singleton.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    state: AccessState,
}

impl Session {
    pub fn loading() -> Self {
        Self {
            state: AccessState::Loading,
        }
    }

    /// Classify a resolved identity against the user directory.
    ///
    /// An identity with no directory record gets a default non-entitled
    /// record written before classification, so the next resolution sees
    /// the same state this one returns.
    pub async fn resolve<S: DocumentStore>(
        identity: Option<Identity>,
        store: &S,
    ) -> Result<Self, StoreError> {
        let state = match identity {
            None => AccessState::Unauthenticated,
            Some(identity) => {
                let user =
                    match get_record::<UserRecord, _>(store, &USERS_COLLECTION, &identity.user_id)
                        .await?
                    {
                        Some(user) => user,
                        None => {
                            let user =
                                UserRecord::first_sign_in(&identity.user_id, &identity.email);
                            put_record(store, &USERS_COLLECTION, &user).await?;
                            user
                        }
                    };
                AccessState::Authenticated { user }
            }
        };
        Ok(Self { state })
    }

    pub fn state(&self) -> &AccessState {
        &self.state
    }

    pub fn into_state(self) -> AccessState {
        self.state
    }
}

/// Long-lived gate for a browse session: re-classifies on every identity
/// delivery from the provider feed.
///
/// The returned receiver starts at `Loading`. Dropping it ends the watcher;
/// a resolution that completes after teardown is simply discarded, which is
/// the whole cancellation story — no in-flight I/O is aborted.
pub fn watch_access<S: DocumentStore>(
    store: S,
    mut identities: watch::Receiver<Option<Identity>>,
) -> watch::Receiver<AccessState> {
    let (sender, receiver) = watch::channel(AccessState::Loading);

    tokio::spawn(async move {
        loop {
            let identity = identities.borrow_and_update().clone();
            match Session::resolve(identity, &store).await {
                Ok(session) => {
                    if sender.send(session.into_state()).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    // Keep the previous state; the error is reported, not
                    // fatal to the session.
                    tracing::warn!("access re-classification failed: {:?}", err);
                }
            }
            if identities.changed().await.is_err() {
                break;
            }
        }
    });

    receiver
}

#[cfg(test)]
mod tests {
    use gentleman_common::test_utils::user;
    use gentleman_common::{Role, SubscriptionStatus};

    use crate::domain::store::put_record;
    use crate::infrastructure::persistence::MemoryDocumentStore;

    use super::*;

    fn identity(user_id: &str) -> Option<Identity> {
        Some(Identity {
            user_id: user_id.to_owned(),
            email: format!("{}@example.com", user_id),
        })
    }

    #[tokio::test]
    async fn no_identity_classifies_as_unauthenticated() {
        let store = MemoryDocumentStore::new();
        let session = Session::resolve(None, &store).await.unwrap();

        assert_eq!(session.state(), &AccessState::Unauthenticated);
        assert!(!session.state().can_view_protected());
        assert_eq!(
            session.state().verdict(),
            AccessVerdict::RedirectTo(SIGN_IN_ROUTE)
        );
    }

    #[tokio::test]
    async fn unknown_identity_creates_a_default_non_entitled_record() {
        let store = MemoryDocumentStore::new();
        let session = Session::resolve(identity("u1"), &store).await.unwrap();

        assert!(!session.state().can_view_protected());
        assert_eq!(
            session.state().verdict(),
            AccessVerdict::RedirectTo(SUBSCRIBE_ROUTE)
        );

        let created: UserRecord = get_record(&store, &USERS_COLLECTION, "u1")
            .await
            .unwrap()
            .expect("record must have been created");
        assert_eq!(created.role, Role::User);
        assert_eq!(created.subscription_status, SubscriptionStatus::Inactive);
        assert!(!created.access);
    }

    #[tokio::test]
    async fn entitled_identity_may_view_protected_content() {
        let store = MemoryDocumentStore::new();
        put_record(&store, &USERS_COLLECTION, &user("u2", Role::User, true))
            .await
            .unwrap();

        let session = Session::resolve(identity("u2"), &store).await.unwrap();
        assert!(session.state().can_view_protected());
        assert_eq!(session.state().verdict(), AccessVerdict::Allow);
    }

    #[tokio::test]
    async fn admin_gate_is_independent_of_entitlement() {
        let store = MemoryDocumentStore::new();
        put_record(&store, &USERS_COLLECTION, &user("u3", Role::Admin, false))
            .await
            .unwrap();

        let session = Session::resolve(identity("u3"), &store).await.unwrap();
        assert!(session.state().is_admin());
        assert!(!session.state().can_view_protected());
        assert_eq!(session.state().admin_verdict(), AccessVerdict::Allow);
        assert_eq!(
            session.state().verdict(),
            AccessVerdict::RedirectTo(SUBSCRIBE_ROUTE)
        );
    }

    #[tokio::test]
    async fn non_admin_is_denied_without_redirect() {
        let store = MemoryDocumentStore::new();
        put_record(&store, &USERS_COLLECTION, &user("u4", Role::Editor, true))
            .await
            .unwrap();

        let session = Session::resolve(identity("u4"), &store).await.unwrap();
        assert_eq!(session.state().admin_verdict(), AccessVerdict::Denied);
    }

    #[tokio::test]
    async fn loading_state_never_redirects() {
        let session = Session::loading();
        assert_eq!(session.state().verdict(), AccessVerdict::Pending);
        assert_eq!(session.state().admin_verdict(), AccessVerdict::Pending);
        assert!(!session.state().can_view_protected());
    }

    #[tokio::test]
    async fn watcher_reclassifies_on_each_identity_delivery() {
        let store = MemoryDocumentStore::new();
        put_record(&store, &USERS_COLLECTION, &user("u5", Role::User, true))
            .await
            .unwrap();

        let (identity_sender, identity_receiver) = watch::channel(None);
        let mut states = watch_access(store, identity_receiver);

        // First delivery: unauthenticated.
        states.changed().await.unwrap();
        assert_eq!(*states.borrow_and_update(), AccessState::Unauthenticated);

        // Identity change re-evaluates the gate.
        identity_sender.send(identity("u5")).unwrap();
        states.changed().await.unwrap();
        assert!(states.borrow_and_update().can_view_protected());

        identity_sender.send(None).unwrap();
        states.changed().await.unwrap();
        assert_eq!(*states.borrow_and_update(), AccessState::Unauthenticated);
    }
}
