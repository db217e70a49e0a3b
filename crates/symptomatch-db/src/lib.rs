//! Symptomatch Database Layer
//!
//! Storage for disease records and the symptom autocomplete catalog.
//!
//! # Backends
//!
//! - PostgreSQL via a `deadpool-postgres` pool (symptom lists as `TEXT[]`)
//! - In-memory, for local runs without a database and for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use symptomatch_config::DatabaseConfig;
//! use symptomatch_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect(&DatabaseConfig::default()).await?;
//!     let hits = db.diseases.find_by_any_symptom(&["Fever".to_string()]).await?;
//!     println!("{} matching diseases", hits.len());
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod schema;
pub mod seed;
pub mod store;

pub use database::Database;
pub use error::{DbError, Result};
pub use memory::{MemoryDiseaseStore, MemorySymptomCatalog};
pub use postgres::{PgDiseaseRepository, PgSymptomRepository};
pub use seed::{seed_defaults, SeedReport};
pub use store::{DiseaseStore, SymptomCatalog};
