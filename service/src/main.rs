use gentleman_common::{connect_to_database, load_catalog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::AppStateImpl;
use crate::infrastructure::http::{HttpServer, HttpServerConfig};
use crate::infrastructure::identity::HttpIdentityProvider;
use crate::infrastructure::payment::HttpPaymentProvider;
use crate::infrastructure::persistence::PostgresDocumentStore;
use crate::infrastructure::settings::Settings;

mod domain;
mod infrastructure;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let catalog = load_catalog(&settings.static_content_path)?;
    tracing::info!(
        articles = catalog.articles.len(),
        wellness = catalog.wellness.len(),
        weekly = catalog.weekly.len(),
        outfits = catalog.outfits.len(),
        "static catalog loaded"
    );

    let database = connect_to_database(&settings.database).await?;
    tracing::info!("connected to database");

    let store = PostgresDocumentStore::new(database);
    let identity = HttpIdentityProvider::new(&settings.identity.verify_url);
    let payments = HttpPaymentProvider::new(&settings.payment.endpoint, &settings.payment.secret_key);

    let state = AppStateImpl::new(store, identity, payments, catalog);

    let server_config = HttpServerConfig {
        port: &settings.server_port,
    };
    let http_server = HttpServer::new(state, server_config).await?;
    http_server.run().await
}
