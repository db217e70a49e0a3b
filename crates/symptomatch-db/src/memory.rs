//! In-process backend.
//!
//! Used when no `DATABASE_URL` is configured and by the test suites.
//! Records live in insertion order behind a `tokio::sync::RwLock`.

use std::collections::HashSet;

use async_trait::async_trait;
use symptomatch_common::{Disease, DiseaseDraft, Symptom};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::store::{DiseaseStore, SymptomCatalog};

#[derive(Default)]
pub struct MemoryDiseaseStore {
    records: RwLock<Vec<Disease>>,
}

impl MemoryDiseaseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DiseaseStore for MemoryDiseaseStore {
    async fn insert(&self, draft: DiseaseDraft) -> Result<Disease> {
        let disease = Disease::from_draft(Uuid::new_v4(), draft);
        self.records.write().await.push(disease.clone());
        Ok(disease)
    }

    async fn list(&self) -> Result<Vec<Disease>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Disease>> {
        Ok(self.records.read().await.iter().find(|d| d.id == id).cloned())
    }

    async fn update(&self, id: Uuid, draft: DiseaseDraft) -> Result<Option<Disease>> {
        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|d| d.id == id).map(|slot| {
            *slot = Disease::from_draft(id, draft);
            slot.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|d| d.id != id);
        Ok(records.len() != before)
    }

    async fn find_by_any_symptom(&self, symptoms: &[String]) -> Result<Vec<Disease>> {
        let wanted: HashSet<&str> = symptoms.iter().map(String::as_str).collect();
        Ok(self.records
            .read()
            .await
            .iter()
            .filter(|d| d.shares_symptom_with(&wanted))
            .cloned()
            .collect())
    }

    async fn replace_all(&self, drafts: Vec<DiseaseDraft>) -> Result<Vec<Disease>> {
        let fresh: Vec<Disease> = drafts
            .into_iter()
            .map(|draft| Disease::from_draft(Uuid::new_v4(), draft))
            .collect();
        *self.records.write().await = fresh.clone();
        Ok(fresh)
    }

    fn backend_name(&self) -> &'static str { "memory" }
}

#[derive(Default)]
pub struct MemorySymptomCatalog {
    entries: RwLock<Vec<Symptom>>,
}

impl MemorySymptomCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SymptomCatalog for MemorySymptomCatalog {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Symptom>> {
        let needle = query.to_lowercase();
        Ok(self.entries
            .read()
            .await
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn replace_all(&self, names: Vec<String>) -> Result<Vec<Symptom>> {
        let fresh: Vec<Symptom> = names.into_iter().map(Symptom::new).collect();
        *self.entries.write().await = fresh.clone();
        Ok(fresh)
    }
}
