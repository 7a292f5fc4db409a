use std::sync::Arc;

use cinelog::config::Config;
use cinelog::posters::PosterStore;
use cinelog::{AppState, db, router, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,cinelog=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let db = db::connect_and_migrate(&config.database_url).await?;
    seed::seed_movies(&db).await?;

    let posters = PosterStore::new(&config.static_dir);

    let state = Arc::new(AppState { config: config.clone(), db, posters });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
