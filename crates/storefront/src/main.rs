//! Product Gallery storefront - local single-page catalog browser.
//!
//! This binary serves the gallery page on loopback (port 3000 by default).
//!
//! # Architecture
//!
//! - Axum web framework; every control is a form POST redirecting to `/`
//! - Askama templates for server-side rendering
//! - Remote catalog API (Fake Store compatible) for products and categories
//! - Cart persisted to a local JSON file after every change

#![cfg_attr(not(test), forbid(unsafe_code))]

use secrecy::ExposeSecret;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_gallery_storefront::cart::FileSlot;
use product_gallery_storefront::catalog::FetchOutcome;
use product_gallery_storefront::config::{SentryConfig, StorefrontConfig};
use product_gallery_storefront::routes;
use product_gallery_storefront::state::AppState;

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &SentryConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.dsn.as_ref()?;

    let guard = sentry::init((
        dsn.expose_secret(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config.environment.clone().map(std::borrow::Cow::Owned),
            sample_rate: config.sample_rate,
            traces_sample_rate: config.traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config.sentry);

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "product_gallery_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let slot = FileSlot::new(config.cart_path.clone());
    let state = AppState::new(config, slot);
    let addr = state.config().socket_addr();

    tracing::info!(
        catalog = %state.catalog().client().base_url(),
        cart = %state.config().cart_path.display(),
        "Starting storefront"
    );

    // Fetch failures are logged by the catalog store; the page starts empty
    let (products, categories) = state.initial_load().await;
    if matches!(products, FetchOutcome::Kept) || matches!(categories, FetchOutcome::Kept) {
        tracing::warn!("Initial catalog load incomplete");
    }

    let app = routes::app(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    tracing::info!("storefront listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
