//! Replace the stored diseases and symptom catalog with the default data set.
//!
//! Run with: cargo run -p symptomatch-web --bin symptomatch-seed

use anyhow::Context;
use symptomatch_config::Config;
use symptomatch_db::{seed_defaults, Database};
use symptomatch_web::telemetry;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init()?;

    let config = Config::load().context("failed to load configuration")?;
    if config.database.url.is_none() {
        anyhow::bail!("DATABASE_URL is not set; nothing to seed");
    }

    let db = Database::connect(&config.database)
        .await
        .context("failed to open disease store")?;
    let report = seed_defaults(&db).await.context("seeding failed")?;

    info!(diseases = report.diseases, symptoms = report.symptoms, "Seed complete");
    Ok(())
}
