//! Table definitions for the PostgreSQL backend.

/// Idempotent DDL run when the pool is created.
///
/// `seq` gives a stable insertion order for list and search results.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS diseases (
    seq         BIGSERIAL,
    id          UUID PRIMARY KEY,
    name        TEXT NOT NULL CHECK (name <> ''),
    symptoms    TEXT[] NOT NULL CHECK (cardinality(symptoms) > 0),
    description TEXT NOT NULL CHECK (description <> '')
);

CREATE INDEX IF NOT EXISTS diseases_symptoms_idx ON diseases USING GIN (symptoms);

CREATE TABLE IF NOT EXISTS symptoms (
    seq  BIGSERIAL,
    id   UUID PRIMARY KEY,
    name TEXT NOT NULL
);
"#;
