//! Application state for the quote API

use std::sync::Arc;

use anyhow::Result;
use quote_export::Exporter;
use quote_mail::EmailSender;
use render_engine::{Rasterizer, TypstRasterizer};
use sqlx::sqlite::SqlitePoolOptions;

use crate::auth::SessionStore;
use crate::config::Config;
use crate::rate_limit::{LoginThrottle, SystemClock};
use crate::store::Store;

pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub sessions: SessionStore,
    pub throttle: LoginThrottle,
    pub exporter: Arc<Exporter<Box<dyn Rasterizer>>>,
    pub mailer: Option<Arc<dyn EmailSender>>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        tracing::info!("Connecting to database: {}", config.database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&config.database_url)
            .await?;

        let mailer: Option<Arc<dyn EmailSender>> = match config.mail.sender() {
            Some(sender) => Some(Arc::new(sender)),
            None => {
                tracing::warn!("RESEND_API_KEY not set, email endpoints disabled");
                None
            }
        };

        Self::assemble(config, pool, Box::new(TypstRasterizer::default()), mailer).await
    }

    /// Wire the state from explicit parts. Tests hand in an in-memory pool,
    /// a fake rasterizer, and a recording mailer.
    pub async fn assemble(
        config: Config,
        pool: sqlx::SqlitePool,
        rasterizer: Box<dyn Rasterizer>,
        mailer: Option<Arc<dyn EmailSender>>,
    ) -> Result<Self> {
        let store = Store::new(pool);
        store.run_migrations().await?;

        let exporter = Arc::new(Exporter::new(rasterizer, config.company.clone()));

        Ok(Self {
            config,
            store,
            sessions: SessionStore::new(),
            throttle: LoginThrottle::new(Arc::new(SystemClock)),
            exporter,
            mailer,
        })
    }
}
