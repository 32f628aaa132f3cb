use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use jsonschema::Validator;
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::DetailRecord;

/// Character fields frozen at save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CharacterSnapshot {
    pub name: String,
    pub height: String,
    pub birth_year: String,
    pub homeworld: Option<String>,
    pub url: String,
}

impl CharacterSnapshot {
    pub fn capture(detail: &DetailRecord, homeworld: Option<&str>, url: &str) -> Self {
        Self {
            name: detail.name(),
            height: detail.height(),
            birth_year: detail.birth_year(),
            homeworld: homeworld
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            url: url.to_string(),
        }
    }
}

/// The persisted, user-annotated record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SavedFicha {
    pub character: CharacterSnapshot,
    pub nickname: String,
    pub favorite: bool,
    #[serde(rename = "savedAt")]
    pub saved_at: DateTime<Utc>,
    #[serde(rename = "selectedUrl")]
    pub selected_url: String,
}

static FICHA_VALIDATOR: LazyLock<Option<Validator>> = LazyLock::new(|| {
    let schema = ficha_schema();
    match jsonschema::validator_for(&schema) {
        Ok(validator) => Some(validator),
        Err(err) => {
            tracing::warn!(error = %err, "ficha schema failed to compile; shape checks disabled");
            None
        }
    }
});

/// JSON Schema describing the persisted record.
pub fn ficha_schema() -> Value {
    serde_json::to_value(schema_for!(SavedFicha)).unwrap_or(Value::Null)
}

impl SavedFicha {
    /// Decodes a stored record, returning `None` unless the value has the
    /// expected shape.
    pub fn from_stored(value: &Value) -> Option<Self> {
        if let Some(validator) = FICHA_VALIDATOR.as_ref()
            && !validator.is_valid(value)
        {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
