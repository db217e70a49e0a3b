//! Store bootstrap.
//!
//! Picks the backend from configuration and hands out trait-object handles
//! that the web layer injects into its state.

use std::sync::Arc;

use symptomatch_config::DatabaseConfig;

use crate::error::Result;
use crate::memory::{MemoryDiseaseStore, MemorySymptomCatalog};
use crate::postgres::{self, PgDiseaseRepository, PgSymptomRepository};
use crate::seed;
use crate::store::{DiseaseStore, SymptomCatalog};

/// Handles to both collections, sharing one backend.
#[derive(Clone)]
pub struct Database {
    pub diseases: Arc<dyn DiseaseStore>,
    pub symptoms: Arc<dyn SymptomCatalog>,
}

impl Database {
    /// Connect according to `config`: PostgreSQL when a URL is set,
    /// otherwise the in-memory store (seeded if `seed_on_start`).
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        match config.url.as_deref() {
            Some(url) => {
                let pool = postgres::connect(url, config.max_connections).await?;
                Ok(Self {
                    diseases: Arc::new(PgDiseaseRepository::new(pool.clone())),
                    symptoms: Arc::new(PgSymptomRepository::new(pool)),
                })
            }
            None => {
                tracing::warn!("No database URL configured, records are kept in memory only");
                let db = Self::in_memory();
                if config.seed_on_start {
                    seed::seed_defaults(&db).await?;
                }
                Ok(db)
            }
        }
    }

    /// Empty in-memory backend.
    pub fn in_memory() -> Self {
        Self {
            diseases: Arc::new(MemoryDiseaseStore::new()),
            symptoms: Arc::new(MemorySymptomCatalog::new()),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.diseases.backend_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_without_url_uses_seeded_memory_store() {
        let db = Database::connect(&DatabaseConfig::default()).await.unwrap();
        assert_eq!(db.backend_name(), "memory");
        assert_eq!(db.diseases.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_seed_on_start_can_be_disabled() {
        let config = DatabaseConfig { seed_on_start: false, ..DatabaseConfig::default() };
        let db = Database::connect(&config).await.unwrap();
        assert!(db.diseases.list().await.unwrap().is_empty());
    }
}
