use serde_json::Value;
use tracing::debug;

use crate::domain::SavedFicha;

use super::{FichaStore, STORAGE_KEY};

/// Fields recovered from a previous session. Each one is independent: a value
/// of the wrong shape is skipped without affecting the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoredState {
    pub selected_url: Option<String>,
    pub favorite: Option<bool>,
    pub nickname: Option<String>,
    pub summary: Option<SavedFicha>,
}

impl RestoredState {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Reads the stored ficha. Any failure leaves every field at its default.
pub fn restore(store: &dyn FichaStore) -> RestoredState {
    match store.read(STORAGE_KEY) {
        Ok(Some(raw)) => restore_from_str(&raw),
        Ok(None) => RestoredState::default(),
        Err(err) => {
            debug!(error = %err, "stored ficha unreadable; starting empty");
            RestoredState::default()
        }
    }
}

pub fn restore_from_str(raw: &str) -> RestoredState {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "stored ficha is not JSON; starting empty");
            return RestoredState::default();
        }
    };
    let Some(fields) = value.as_object() else {
        return RestoredState::default();
    };

    let summary = match fields.get("summary") {
        Some(nested) => SavedFicha::from_stored(nested),
        None => SavedFicha::from_stored(&value),
    };

    RestoredState {
        selected_url: fields
            .get("selectedUrl")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_string),
        favorite: fields.get("favorite").and_then(Value::as_bool),
        nickname: fields
            .get("nickname")
            .and_then(Value::as_str)
            .map(str::to_string),
        summary,
    }
}
