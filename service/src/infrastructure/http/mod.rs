use anyhow::Context;
use axum::Router;
use axum::routing::{get, post, put};
use axum_prometheus::PrometheusMetricLayer;
use tokio::net;

use crate::domain::AppState;
use crate::infrastructure::http::handlers::{
    admin, content, current_session, health_check, outfits, payments, weekly,
};

mod api;
mod handlers;
mod querystring;
mod session;

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig<'a> {
    pub port: &'a str,
}

/// The application's HTTP server. The underlying HTTP package is opaque to module consumers.
pub struct HttpServer {
    router: axum::Router,
    listener: net::TcpListener,
}

impl HttpServer {
    /// Returns a new HTTP server bound to the port specified in `config`.
    pub async fn new(state: impl AppState, config: HttpServerConfig<'_>) -> anyhow::Result<Self> {
        let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
            |request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                tracing::info_span!("http_request", method = ?request.method(), uri)
            },
        );
        // see: https://github.com/metrics-rs/metrics
        // see: https://github.com/Ptrskay3/axum-prometheus
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

        let router = Router::new()
            .route("/health", get(health_check))
            .nest("/api", api_routes())
            .route("/metrics", get(|| async move { metric_handle.render() }))
            .layer(trace_layer)
            .layer(prometheus_layer)
            .with_state(state);

        let listener = net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
            .await
            .with_context(|| format!("failed to listen on {}", config.port))?;

        Ok(Self { router, listener })
    }

    /// Runs the HTTP server.
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::debug!("listening on {}", self.listener.local_addr().unwrap());
        axum::serve(self.listener, self.router)
            .await
            .context("received error from running server")?;
        Ok(())
    }
}

fn api_routes<S: AppState>() -> Router<S> {
    Router::new()
        .route("/me", get(current_session))
        .route("/articles", get(content::list_articles::<S>))
        .route("/articles/{slug}", get(content::article_by_slug::<S>))
        .route("/wellness", get(content::list_wellness::<S>))
        .route("/wellness/{slug}", get(content::wellness_by_slug::<S>))
        .route("/weekly", get(weekly::list_weekly::<S>))
        .route("/weekly/{slug}", get(weekly::weekly_by_slug::<S>))
        .route("/weekly/{id}/view", post(weekly::record_view::<S>))
        .route("/weekly/{id}/click", post(weekly::record_click::<S>))
        .route("/outfits", get(outfits::list_outfits::<S>))
        .route("/outfits/{slug}", get(outfits::outfit_by_slug::<S>))
        .route("/outfits/{id}/view", post(outfits::record_view::<S>))
        .route("/outfits/{id}/click", post(outfits::record_click::<S>))
        .route("/styling/intent", post(payments::create_styling_intent::<S>))
        .nest("/admin", admin_routes())
}

fn admin_routes<S: AppState>() -> Router<S> {
    Router::new()
        .route("/articles", post(admin::create_article::<S>))
        .route(
            "/articles/{id}",
            put(admin::update_article::<S>).delete(admin::delete_article::<S>),
        )
        .route("/wellness", post(admin::create_wellness::<S>))
        .route(
            "/wellness/{id}",
            put(admin::update_wellness::<S>).delete(admin::delete_wellness::<S>),
        )
        .route("/weekly", post(admin::create_weekly::<S>))
        .route(
            "/weekly/{id}",
            put(admin::update_weekly::<S>).delete(admin::delete_weekly::<S>),
        )
        .route("/outfits", post(admin::create_outfit::<S>))
        .route(
            "/outfits/{id}",
            put(admin::update_outfit::<S>).delete(admin::delete_outfit::<S>),
        )
        .route(
            "/outfits/{id}/products/{product_id}",
            post(admin::toggle_outfit_product::<S>),
        )
        .route(
            "/users",
            get(admin::list_users::<S>).post(admin::create_user::<S>),
        )
        .route(
            "/users/{id}",
            put(admin::update_user::<S>).delete(admin::delete_user::<S>),
        )
}
