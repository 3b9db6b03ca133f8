//! Superheroes server: load settings, prepare the database, serve the API.
//!
//! Run from repo root: `cargo run -p superheroes-server`

use superheroes::{
    app, apply_migrations, connect, ensure_database_exists, init_tracing, seed_if_empty, AppState, Settings,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    init_tracing();

    ensure_database_exists(&settings.database_url).await?;
    let pool = connect(&settings).await?;
    let applied = apply_migrations(&pool).await?;
    tracing::info!(applied, "database ready");

    if settings.seed {
        seed_if_empty(&pool).await?;
    }

    let state = AppState { pool };
    let router = app(state, settings.body_limit_bytes);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
