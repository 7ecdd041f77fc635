use serde::Deserialize;

use crate::domain::payments::{PaymentError, PaymentIntent, PaymentProvider, PaymentRequest};

/// Payment adapter creating intents against the provider's REST API.
///
/// The amount always comes from the server-side price table on the request's
/// service type; nothing client-supplied reaches the provider as an amount.
#[derive(Clone)]
pub struct HttpPaymentProvider {
    client: reqwest::Client,
    endpoint: String,
    secret_key: String,
}

impl HttpPaymentProvider {
    pub fn new(endpoint: &str, secret_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_owned(),
            secret_key: secret_key.to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedIntent {
    client_secret: String,
}

impl PaymentProvider for HttpPaymentProvider {
    async fn create_intent(&self, request: &PaymentRequest) -> Result<PaymentIntent, PaymentError> {
        let mut form: Vec<(&str, String)> = vec![
            ("amount", request.service_type.amount_cents().to_string()),
            ("currency", "usd".to_owned()),
            ("automatic_payment_methods[enabled]", "true".to_owned()),
            ("metadata[serviceType]", request.service_type.key().to_owned()),
        ];
        if let Some(email) = &request.customer_email {
            form.push(("receipt_email", email.clone()));
            form.push(("metadata[customerEmail]", email.clone()));
        }
        if let Some(user_id) = &request.user_id {
            form.push(("metadata[userId]", user_id.clone()));
        }

        let response = self
            .client
            .post(format!("{}/v1/payment_intents", self.endpoint))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await
            .map_err(|error| PaymentError::ProviderFailure(error.to_string()))?;

        if !response.status().is_success() {
            return Err(PaymentError::ProviderFailure(format!(
                "payment provider returned {}",
                response.status()
            )));
        }

        let created: CreatedIntent = response
            .json()
            .await
            .map_err(|error| PaymentError::ProviderFailure(error.to_string()))?;

        Ok(PaymentIntent {
            client_secret: created.client_secret,
        })
    }
}
