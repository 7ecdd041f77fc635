use gentleman_common::StaticCatalog;

use crate::domain::AppState;
use crate::infrastructure::identity::HttpIdentityProvider;
use crate::infrastructure::payment::HttpPaymentProvider;
use crate::infrastructure::persistence::PostgresDocumentStore;

pub mod http;
pub mod identity;
pub mod payment;
pub mod persistence;
pub mod settings;

#[derive(Clone)]
pub struct AppStateImpl {
    store: PostgresDocumentStore,
    identity: HttpIdentityProvider,
    payments: HttpPaymentProvider,
    catalog: &'static StaticCatalog,
}

impl AppStateImpl {
    pub fn new(
        store: PostgresDocumentStore,
        identity: HttpIdentityProvider,
        payments: HttpPaymentProvider,
        catalog: &'static StaticCatalog,
    ) -> Self {
        Self {
            store,
            identity,
            payments,
            catalog,
        }
    }
}

impl AppState for AppStateImpl {
    type Store = PostgresDocumentStore;
    type Identity = HttpIdentityProvider;
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
        self.catalog
    }
}
