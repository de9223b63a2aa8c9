use std::sync::Arc;

use anyhow::Context;

use animo_config::AnimoConfig;
use animo_db::AnimoDb;
use animo_insights::InsightEngine;

/// Handles shared by the data commands.
pub struct AppContext {
    pub config: AnimoConfig,
    pub db: Arc<AnimoDb>,
    pub engine: Arc<InsightEngine>,
}

impl AppContext {
    pub async fn init(config: AnimoConfig) -> anyhow::Result<Self> {
        let db = AnimoDb::open(&config.database)
            .await
            .context("failed to open entry database")?;
        let engine = InsightEngine::from_config(&config.analysis, &config.llm)
            .context("failed to configure insight engine")?;
        Ok(Self {
            config,
            db: Arc::new(db),
            engine: Arc::new(engine),
        })
    }
}
