use dca_license_verify::config::Config;
use dca_license_verify::db::Database;
use dca_license_verify::handlers::{self, AppState};
use dca_license_verify::repository::PgLicenseRepository;
use dca_license_verify::services::LicenseService;
use dca_license_verify::verifier::DcaVerifier;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration, connects to the database,
/// builds the DCA client and serves the HTTP API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dca_license_verify=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db = Database::new(&config.database_url).await?;
    tracing::info!("Database connection pool established");

    let repository = PgLicenseRepository::new(db.pool.clone());
    repository.ensure_schema().await?;

    let verifier = DcaVerifier::new(&config.verifier)?;
    tracing::info!("✓ DCA client initialized: {}", config.verifier.search_url);

    let app_state = Arc::new(AppState {
        service: LicenseService::new(Arc::new(repository), verifier),
    });
    let app = handlers::router(app_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
