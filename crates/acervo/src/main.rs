//! Service entry point: configuration, logging, store, router, server.

use std::sync::Arc;

use anyhow::Context;

use acervo_server::{build_router, logging, AppState, Server, ServerConfig};
use acervo_store::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load().context("failed to load configuration")?;
    logging::init(config.log()).context("failed to initialize logging")?;

    let pool = acervo_store::connect(config.database_path())
        .await
        .with_context(|| {
            format!(
                "failed to open database at {}",
                config.database_path().display()
            )
        })?;
    acervo_store::init_schema(&pool)
        .await
        .context("failed to initialize database schema")?;

    let state = Arc::new(AppState::new(
        Arc::new(SqliteStore::new(pool)),
        config.upload_dir().to_path_buf(),
    ));
    let router = build_router(&state);

    tracing::info!(
        database = %config.database_path().display(),
        uploads = %config.upload_dir().display(),
        "acervo starting"
    );

    Server::new(config, router)
        .run()
        .await
        .context("server terminated with an error")?;

    Ok(())
}
