//! Roadbook Auth Server
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use roadbook_core::config::AppConfig;
use roadbook_core::error::AppError;
use roadbook_core::traits::audit::AuditSink;
use roadbook_core::traits::principal::PrincipalStore;

#[tokio::main]
async fn main() {
    let env = std::env::var("ROADBOOK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        "Starting Roadbook auth server v{}",
        env!("CARGO_PKG_VERSION")
    );

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db_pool = roadbook_database::connection::create_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    roadbook_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Credential store ─────────────────────────────────
    tracing::info!(provider = %config.cache.provider, "Initializing credential store...");
    let store = Arc::new(roadbook_cache::StoreManager::new(&config.cache).await?);

    // ── Step 3: Collaborators ────────────────────────────────────
    let principals: Arc<dyn PrincipalStore> = Arc::new(
        roadbook_database::repositories::PgPrincipalStore::new(db_pool.clone()),
    );
    let audit: Arc<dyn AuditSink> = Arc::new(roadbook_database::repositories::PgAuditSink::new(
        db_pool.clone(),
    ));
    let mailer = roadbook_api::mail::build_mailer(&config.mail)?;

    // ── Step 4: Auth components ──────────────────────────────────
    tracing::info!("Initializing authentication system...");
    let issuer = Arc::new(roadbook_auth::token::TokenIssuer::new(&config.auth)?);
    let verifier = Arc::new(roadbook_auth::token::TokenVerifier::new(&config.auth)?);
    let password_hasher = Arc::new(roadbook_auth::password::PasswordHasher::new());
    let password_policy = Arc::new(roadbook_auth::password::PasswordPolicy::new(&config.auth));
    let throttle = Arc::new(roadbook_auth::throttle::LoginThrottle::new(
        Arc::clone(&store),
        config.throttle.clone(),
    ));

    let session_manager = Arc::new(roadbook_auth::session::SessionManager::new(
        Arc::clone(&issuer),
        Arc::clone(&verifier),
        Arc::clone(&principals),
        Arc::clone(&store),
        Arc::clone(&password_hasher),
        throttle,
        Arc::clone(&audit),
        config.auth.clone(),
    ));

    let reset_service = Arc::new(roadbook_auth::reset::ResetService::new(
        Arc::clone(&principals),
        Arc::clone(&password_hasher),
        Arc::clone(&password_policy),
        mailer,
        Arc::clone(&audit),
        config.auth.clone(),
        config.mail.reset_url_base.clone(),
    ));

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app_state = roadbook_api::state::AppState {
        config: Arc::new(config.clone()),
        store,
        principals,
        session_manager,
        reset_service,
        password_hasher,
        password_policy,
    };

    let app = roadbook_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Roadbook auth server listening on {}", addr);

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Roadbook auth server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
