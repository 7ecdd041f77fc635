use std::future::Future;

use serde::{Deserialize, Serialize};

/// The fixed menu of personal-styling services. Amounts live server-side
/// only; a client-supplied amount is never trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    FoundationPackage,
    SignatureRefresh,
    GentlemensUpgrade,
    MonthlySubscription,
}

impl ServiceType {
    /// The charge for this service, in cents.
    pub fn amount_cents(&self) -> u32 {
        match self {
            Self::FoundationPackage => 25_000,
            Self::SignatureRefresh => 50_000,
            Self::GentlemensUpgrade => 75_000,
            Self::MonthlySubscription => 4_200,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::FoundationPackage => "foundation-package",
            Self::SignatureRefresh => "signature-refresh",
            Self::GentlemensUpgrade => "gentlemens-upgrade",
            Self::MonthlySubscription => "monthly-subscription",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub service_type: ServiceType,
    pub customer_email: Option<String>,
    pub user_id: Option<String>,
}

/// The provider-side intent handed back to the client element, which
/// confirms the payment and redirects to the success route on its own.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub client_secret: String,
}

/// A failed confirm/initialize step. Shown inline; the intent may be
/// retried by re-invoking the initialize step.
#[derive(Debug)]
pub enum PaymentError {
    ProviderFailure(String),
}

pub trait PaymentProvider: Clone + Send + Sync + 'static {
    fn create_intent(
        &self,
        request: &PaymentRequest,
    ) -> impl Future<Output = Result<PaymentIntent, PaymentError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_table_is_fixed_server_side() {
        assert_eq!(ServiceType::FoundationPackage.amount_cents(), 25_000);
        assert_eq!(ServiceType::SignatureRefresh.amount_cents(), 50_000);
        assert_eq!(ServiceType::GentlemensUpgrade.amount_cents(), 75_000);
        assert_eq!(ServiceType::MonthlySubscription.amount_cents(), 4_200);
    }

    #[test]
    fn service_types_deserialize_from_their_keys() {
        for service in [
            ServiceType::FoundationPackage,
            ServiceType::SignatureRefresh,
            ServiceType::GentlemensUpgrade,
            ServiceType::MonthlySubscription,
        ] {
            let parsed: ServiceType =
                serde_json::from_str(&format!("\"{}\"", service.key())).unwrap();
            assert_eq!(parsed, service);
        }
        assert!(serde_json::from_str::<ServiceType>("\"vip-tier\"").is_err());
    }
}
