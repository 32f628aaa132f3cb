use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{domain::SavedFicha, fetch::FetchError};

use super::{stage::Ticket, state::FetchRequest};

#[derive(Debug, Clone)]
pub enum FormCommand {
    FocusNextField,
    FocusPrevField,
    Select(String),
    NicknameInput(char),
    NicknameBackspace,
    NicknameClear,
    SetFavorite(bool),
    ToggleFavorite,
    Submit { saved_at: DateTime<Utc> },
    FetchCompleted {
        ticket: Ticket,
        outcome: Result<Value, FetchError>,
    },
}

/// Work the runtime performs after a command was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch(FetchRequest),
    Persist(SavedFicha),
}
