use std::sync::Arc;

use anyhow::Context as _;
use api::auth::{session_key, GoogleOAuth, OAuthConfig};
use api::settings::StoreBackend;
use api::{AppState, Settings};
use store::{ItemStore, Items};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::new().context("Failed to load settings")?;

    let items = match settings.store.backend {
        StoreBackend::Memory => Items::memory(),
        StoreBackend::Sqlite => Items::sqlite(&settings.store.path)
            .await
            .with_context(|| format!("Failed to open {}", settings.store.path.display()))?,
    };
    tracing::info!(backend = items.backend(), "Item store ready");

    let oauth = OAuthConfig::google(&settings.google).context("Invalid Google OAuth settings")?;
    let provider = GoogleOAuth::new(oauth, settings.provider.timeout())
        .context("Failed to create Google OAuth client")?;

    let state = AppState::new(items.clone(), Arc::new(provider), session_key(&settings.session.key))
        .with_secure_cookies(settings.session.secure);

    // Sessions live next to the items: in memory, or in the same SQLite file.
    let router = match &items {
        Items::Memory(_) => api::router(state, tower_sessions::MemoryStore::default()),
        Items::Sqlite(db) => {
            let session_store = tower_sessions_sqlx_store::SqliteStore::new(db.pool().clone());
            session_store
                .migrate()
                .await
                .context("Failed to migrate session table")?;
            api::router(state, session_store)
        }
    };

    let listener = tokio::net::TcpListener::bind(&settings.server.addr)
        .await
        .with_context(|| format!("Failed to bind {}", settings.server.addr))?;
    tracing::info!("Server listening on {}", settings.server.addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    items.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Graceful shutdown initiated");
}
