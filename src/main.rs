use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use carteira_backend::app;
use carteira_backend::config::{AppConfig, StoreBackend};
use carteira_backend::logging::{init_logging, LoggingConfig};
use carteira_backend::services::{FixedIncomeService, UserService};
use carteira_backend::state::AppState;
use carteira_backend::store::{
    AssetStore, InMemoryAssetStore, InMemoryUserStore, PgAssetStore, PgUserStore, UserStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env()?;

    let (assets, users): (Arc<dyn AssetStore>, Arc<dyn UserStore>) = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or("DATABASE_URL must be set when STORE_BACKEND is postgres")?;
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            if config.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Database migrations applied");
            }
            tracing::info!("Using PostgreSQL store");
            let assets: Arc<dyn AssetStore> = Arc::new(PgAssetStore::new(pool.clone()));
            let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));
            (assets, users)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on shutdown");
            let assets: Arc<dyn AssetStore> = Arc::new(InMemoryAssetStore::new());
            let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
            (assets, users)
        }
    };

    let state = AppState {
        fixed_income: FixedIncomeService::new(assets),
        users: UserService::new(users),
    };
    let app = app::create_app(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Carteira backend running at http://{}/", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
