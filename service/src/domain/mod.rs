use gentleman_common::StaticCatalog;

pub mod access;
pub mod identity;
pub mod merge;
pub mod payments;
pub mod pricing;
pub mod store;

pub use access::{AccessState, AccessVerdict, Session};
pub use identity::{Identity, IdentityProvider};
pub use merge::{Sourced, merge};
pub use payments::{PaymentIntent, PaymentProvider, PaymentRequest, ServiceType};
pub use store::{DocumentStore, StoreError};

/// The global application state shared between all request handlers.
pub trait AppState: Clone + Send + Sync + 'static {
    type Store: DocumentStore;
    type Identity: IdentityProvider;
    type Payments: PaymentProvider;

    fn store(&self) -> &Self::Store;
    fn identity(&self) -> &Self::Identity;
    fn payments(&self) -> &Self::Payments;
    fn catalog(&self) -> &'static StaticCatalog;
}
