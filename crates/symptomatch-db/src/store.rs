//! Storage traits implemented by every backend.

use async_trait::async_trait;
use symptomatch_common::{Disease, DiseaseDraft, Symptom};
use uuid::Uuid;

use crate::error::Result;

/// Persistent collection of [`Disease`] records.
///
/// Implementations provide their own concurrency control: single-record
/// reads and writes are atomic, nothing here spans multiple records except
/// [`DiseaseStore::replace_all`].
#[async_trait]
pub trait DiseaseStore: Send + Sync {
    /// Insert a new record with a store-assigned id.
    async fn insert(&self, draft: DiseaseDraft) -> Result<Disease>;

    /// Every record, in insertion order.
    async fn list(&self) -> Result<Vec<Disease>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Disease>>;

    /// Replace name, symptoms and description. `None` if `id` is unknown.
    async fn update(&self, id: Uuid, draft: DiseaseDraft) -> Result<Option<Disease>>;

    /// `false` if `id` is unknown.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Records whose symptom list shares at least one exact token with
    /// `symptoms`, in insertion order.
    async fn find_by_any_symptom(&self, symptoms: &[String]) -> Result<Vec<Disease>>;

    /// Drop every record and insert `drafts`. Used by seeding.
    async fn replace_all(&self, drafts: Vec<DiseaseDraft>) -> Result<Vec<Disease>>;

    fn backend_name(&self) -> &'static str;
}

/// Flat catalog of known symptom names used for autocomplete.
#[async_trait]
pub trait SymptomCatalog: Send + Sync {
    /// Case-insensitive substring search, at most `limit` entries.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Symptom>>;

    /// Drop every entry and insert `names`. Used by seeding.
    async fn replace_all(&self, names: Vec<String>) -> Result<Vec<Symptom>>;
}
