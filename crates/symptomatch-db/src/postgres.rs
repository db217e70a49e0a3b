//! PostgreSQL backend.
//!
//! Symptom lists are stored as `TEXT[]`; the intersection query uses the
//! array-overlap operator backed by a GIN index.

use async_trait::async_trait;
use deadpool_postgres::{Config as PoolSettings, Pool, PoolConfig, Runtime};
use symptomatch_common::{Disease, DiseaseDraft, Symptom};
use tokio_postgres::{NoTls, Row};
use uuid::Uuid;

use crate::error::Result;
use crate::schema;
use crate::store::{DiseaseStore, SymptomCatalog};

/// Build a connection pool and make sure the tables exist.
pub async fn connect(url: &str, max_connections: usize) -> Result<Pool> {
    let mut settings = PoolSettings::new();
    settings.url = Some(url.to_string());
    settings.pool = Some(PoolConfig::new(max_connections));

    let pool = settings.create_pool(Some(Runtime::Tokio1), NoTls)?;

    let client = pool.get().await?;
    client.batch_execute(schema::CREATE_TABLES).await?;
    tracing::info!(max_connections, "PostgreSQL pool ready");

    Ok(pool)
}

fn row_to_disease(row: &Row) -> Result<Disease> {
    Ok(Disease {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        symptoms: row.try_get("symptoms")?,
        description: row.try_get("description")?,
    })
}

fn row_to_symptom(row: &Row) -> Result<Symptom> {
    Ok(Symptom {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

/// Escape LIKE metacharacters so the query is matched literally.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

// ── Diseases ─────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PgDiseaseRepository {
    pool: Pool,
}

impl PgDiseaseRepository {
    pub fn new(pool: Pool) -> Self { Self { pool } }
}

#[async_trait]
impl DiseaseStore for PgDiseaseRepository {
    async fn insert(&self, draft: DiseaseDraft) -> Result<Disease> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO diseases (id, name, symptoms, description)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, name, symptoms, description",
                &[&Uuid::new_v4(), &draft.name(), &draft.symptoms(), &draft.description()],
            )
            .await?;
        row_to_disease(&row)
    }

    async fn list(&self) -> Result<Vec<Disease>> {
        let client = self.pool.get().await?;
        let rows = client
            .query("SELECT id, name, symptoms, description FROM diseases ORDER BY seq", &[])
            .await?;
        rows.iter().map(row_to_disease).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Disease>> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, name, symptoms, description FROM diseases WHERE id = $1",
                &[&id],
            )
            .await?;
        row.as_ref().map(row_to_disease).transpose()
    }

    async fn update(&self, id: Uuid, draft: DiseaseDraft) -> Result<Option<Disease>> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "UPDATE diseases SET name = $2, symptoms = $3, description = $4
                 WHERE id = $1
                 RETURNING id, name, symptoms, description",
                &[&id, &draft.name(), &draft.symptoms(), &draft.description()],
            )
            .await?;
        row.as_ref().map(row_to_disease).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let client = self.pool.get().await?;
        let deleted = client.execute("DELETE FROM diseases WHERE id = $1", &[&id]).await?;
        Ok(deleted > 0)
    }

    async fn find_by_any_symptom(&self, symptoms: &[String]) -> Result<Vec<Disease>> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                "SELECT id, name, symptoms, description FROM diseases
                 WHERE symptoms && $1::text[]
                 ORDER BY seq",
                &[&symptoms],
            )
            .await?;
        rows.iter().map(row_to_disease).collect()
    }

    async fn replace_all(&self, drafts: Vec<DiseaseDraft>) -> Result<Vec<Disease>> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;
        tx.execute("DELETE FROM diseases", &[]).await?;

        let mut inserted = Vec::with_capacity(drafts.len());
        for draft in &drafts {
            let row = tx
                .query_one(
                    "INSERT INTO diseases (id, name, symptoms, description)
                     VALUES ($1, $2, $3, $4)
                     RETURNING id, name, symptoms, description",
                    &[&Uuid::new_v4(), &draft.name(), &draft.symptoms(), &draft.description()],
                )
                .await?;
            inserted.push(row_to_disease(&row)?);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    fn backend_name(&self) -> &'static str { "postgres" }
}

// ── Symptoms ─────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PgSymptomRepository {
    pool: Pool,
}

impl PgSymptomRepository {
    pub fn new(pool: Pool) -> Self { Self { pool } }
}

#[async_trait]
impl SymptomCatalog for PgSymptomRepository {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Symptom>> {
        let client = self.pool.get().await?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = client
            .query(
                "SELECT id, name FROM symptoms
                 WHERE name ILIKE $1 ESCAPE '\\'
                 ORDER BY seq
                 LIMIT $2",
                &[&like_pattern(query), &limit],
            )
            .await?;
        rows.iter().map(row_to_symptom).collect()
    }

    async fn replace_all(&self, names: Vec<String>) -> Result<Vec<Symptom>> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;
        tx.execute("DELETE FROM symptoms", &[]).await?;

        let mut inserted = Vec::with_capacity(names.len());
        for name in names {
            let symptom = Symptom::new(name);
            tx.execute(
                "INSERT INTO symptoms (id, name) VALUES ($1, $2)",
                &[&symptom.id, &symptom.name],
            )
            .await?;
            inserted.push(symptom);
        }

        tx.commit().await?;
        Ok(inserted)
    }
}
