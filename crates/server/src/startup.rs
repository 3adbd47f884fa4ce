use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use service::users::repository::{FileUserRepository, UserRepository};
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

/// Load the user store and build the application router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let users = FileUserRepository::open(&cfg.storage.db_path).await?;
    let users: Arc<dyn UserRepository> = users;
    Ok(routes::build_router(AppState::new(users)))
}

/// Public entry: load the store, bind and serve until the listener fails.
/// Load and bind failures are returned before any request is served.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(%addr, db_path = %cfg.storage.db_path, "user registry listening");
    axum::serve(listener, app).await?;
    Ok(())
}
