use kumiai_gate::Gate;
use kumiai_server::{
    app,
    auth::{
        AppState,
        db::{SessionRepository, UserRepository},
    },
    config::ServerConfig,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    let gate_config = config
        .gate
        .clone()
        .into_gate_config()
        .expect("invalid gate configuration");
    tracing::info!(
        supported_locales = ?gate_config.locales().supported(),
        default_locale = %gate_config.locales().default_locale(),
        excluded_prefixes = ?gate_config.excluded_prefixes(),
        "Loaded configuration"
    );

    // Connect lazily: an unreachable database degrades lookups to
    // "unauthenticated" instead of blocking startup.
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database_pool.max_connections)
        .acquire_timeout(config.database_pool.acquire_timeout())
        .connect_lazy(&config.database_url)
        .expect("invalid database URL");

    let sessions = Arc::new(SessionRepository::new(db_pool.clone()));
    let roles = Arc::new(UserRepository::new(db_pool));
    let gate = Gate::new(gate_config, sessions);
    let state = Arc::new(AppState::new(gate, roles, config.session));

    let inner = app::router(state.clone())
        .nest_service("/_next/static", ServeDir::new(&config.static_dir));
    let app = app::gated(inner, state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
