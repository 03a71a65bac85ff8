use std::sync::Arc;

use wellness_intake::config::{ServerConfig, SmtpConfig};
use wellness_intake::notify::{EmailNotifier, Notifier};
use wellness_intake::server::{AppState, api_routes};
use wellness_intake::store::{LibSqlBackend, ProfileStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage (SMTP).
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env();

    eprintln!("🌿 Wellness Intake v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Onboard API: http://{}/api/onboard", config.bind_addr);
    eprintln!("   Users API:   http://{}/api/users", config.bind_addr);

    // ── Database ─────────────────────────────────────────────────────
    let db_path = std::path::Path::new(&config.db_path);
    let store: Arc<dyn ProfileStore> =
        Arc::new(LibSqlBackend::new_local(db_path).await.map_err(|e| {
            anyhow::anyhow!("Failed to open database at {}: {e}", config.db_path)
        })?);
    eprintln!("   Database: {}", config.db_path);

    // ── Notifications ────────────────────────────────────────────────
    let notifier: Option<Arc<dyn Notifier>> = match SmtpConfig::from_env()? {
        Some(smtp) => {
            eprintln!(
                "   Notifications: enabled (SMTP: {}, to: {})",
                smtp.host, smtp.notify_to
            );
            Some(Arc::new(EmailNotifier::new(smtp)))
        }
        None => {
            eprintln!("   Notifications: disabled (SMTP_HOST not set)");
            None
        }
    };

    // ── Server ───────────────────────────────────────────────────────
    let app = api_routes(AppState { store, notifier });
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Intake server started");
    axum::serve(listener, app).await?;

    Ok(())
}
