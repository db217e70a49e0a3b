/// Core record types shared by the store, the analysis pipeline and the HTTP layer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Result, ValidationError};

// ---------------------------------------------------------------------------
// Disease
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disease {
    pub id: Uuid,
    pub name: String,
    pub symptoms: Vec<String>,
    pub description: String,
}

impl Disease {
    pub fn from_draft(id: Uuid, draft: DiseaseDraft) -> Self {
        Self {
            id,
            name: draft.name,
            symptoms: draft.symptoms,
            description: draft.description,
        }
    }

    /// True when at least one of this disease's symptoms is in `wanted`.
    /// Comparison is exact and case-sensitive.
    pub fn shares_symptom_with(&self, wanted: &HashSet<&str>) -> bool {
        self.symptoms.iter().any(|s| wanted.contains(s.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Draft (validated create/update payload)
// ---------------------------------------------------------------------------

/// A name/symptoms/description triple that has passed validation.
///
/// Fields are private so a store can only ever receive a draft built by
/// [`DiseaseDraft::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseDraft {
    name: String,
    symptoms: Vec<String>,
    description: String,
}

impl DiseaseDraft {
    pub fn new(
        name: impl Into<String>,
        symptoms: impl Into<SymptomInput>,
        description: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        let description = description.into().trim().to_string();
        let symptoms = symptoms.into().into_tokens();

        if name.is_empty() || description.is_empty() || symptoms.is_empty() {
            return Err(ValidationError::MissingDiseaseFields);
        }

        Ok(Self { name, symptoms, description })
    }

    /// Build a draft from optional request fields; any absent field is a
    /// validation error.
    pub fn from_optional(
        name: Option<String>,
        symptoms: Option<SymptomInput>,
        description: Option<String>,
    ) -> Result<Self> {
        match (name, symptoms, description) {
            (Some(n), Some(s), Some(d)) => Self::new(n, s, d),
            _ => Err(ValidationError::MissingDiseaseFields),
        }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn symptoms(&self) -> &[String] { &self.symptoms }
    pub fn description(&self) -> &str { &self.description }
}

// ---------------------------------------------------------------------------
// Symptom input (array or comma-separated string)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SymptomInput {
    List(Vec<String>),
    Csv(String),
}

impl SymptomInput {
    /// Trimmed, non-empty tokens in input order.
    pub fn into_tokens(self) -> Vec<String> {
        match self {
            SymptomInput::List(items) => normalize_symptoms(&items),
            SymptomInput::Csv(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl From<Vec<String>> for SymptomInput {
    fn from(v: Vec<String>) -> Self { SymptomInput::List(v) }
}

impl From<&[&str]> for SymptomInput {
    fn from(v: &[&str]) -> Self {
        SymptomInput::List(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SymptomInput {
    fn from(v: [&str; N]) -> Self { SymptomInput::from(&v[..]) }
}

impl From<String> for SymptomInput {
    fn from(v: String) -> Self { SymptomInput::Csv(v) }
}

impl From<&str> for SymptomInput {
    fn from(v: &str) -> Self { SymptomInput::Csv(v.to_string()) }
}

/// Trim every token and drop the ones left empty. Case and order are kept.
pub fn normalize_symptoms<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract the `symptoms` list of an analyze/AI request body.
///
/// Rejects a missing field, a non-array, non-string elements, and a list
/// that is empty once trimmed. Accepted tokens are returned as sent.
pub fn symptoms_from_json(value: Option<&Value>) -> Result<Vec<String>> {
    let items = match value {
        Some(Value::Array(items)) => items,
        _ => return Err(ValidationError::SymptomsRequired),
    };

    let mut raw = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => raw.push(s.as_str()),
            other => return Err(ValidationError::InvalidSymptom(json_kind(other).to_string())),
        }
    }

    if normalize_symptoms(&raw).is_empty() {
        return Err(ValidationError::SymptomsRequired);
    }
    Ok(raw.into_iter().map(str::to_string).collect())
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Symptom catalog entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: Uuid,
    pub name: String,
}

impl Symptom {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), name: name.into() }
    }
}
