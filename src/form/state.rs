use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::{
    domain::{Catalog, CharacterSnapshot, DetailRecord, SavedFicha, resource_name},
    fetch::FetchError,
    storage::RestoredState,
};

use super::{
    stage::{FetchTarget, Stage, StageState, Ticket},
    validation::{NicknameError, validate_nickname},
};

/// First page of the SWAPI people listing.
pub const DEFAULT_CATALOG_URL: &str = "https://swapi.dev/api/people/?page=1";

pub const LIST_FAILED: &str = "Could not load the character list";
pub const DETAIL_FAILED: &str = "Could not load the character detail";
const HOMEWORLD_FAILED: &str = "Could not load the homeworld";

/// Label of the picker option that clears the selection.
pub const EMPTY_OPTION: &str = "— Select —";

/// A request the runtime has to perform on behalf of a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: Ticket,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusField {
    Character,
    Nickname,
    Favorite,
    Submit,
}

impl FocusField {
    const ORDER: [FocusField; 4] = [
        FocusField::Character,
        FocusField::Nickname,
        FocusField::Favorite,
        FocusField::Submit,
    ];

    fn step(self, delta: i32) -> Self {
        let len = Self::ORDER.len() as i32;
        let current = Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0) as i32;
        let next = (current + delta).rem_euclid(len);
        Self::ORDER[next as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            FocusField::Character => "Character",
            FocusField::Nickname => "Nickname",
            FocusField::Favorite => "Favorite",
            FocusField::Submit => "Save ficha",
        }
    }
}

/// Everything the form shows: three network stages, the user's annotation and
/// the last saved ficha.
#[derive(Debug, Clone)]
pub struct FormState {
    catalog_url: String,
    catalog: Stage<Catalog>,
    selected_url: String,
    detail: Stage<DetailRecord>,
    homeworld: Stage<String>,
    nickname: String,
    favorite: bool,
    summary: Option<SavedFicha>,
    focus: FocusField,
    dirty: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL)
    }
}

impl FormState {
    pub fn new(catalog_url: impl Into<String>) -> Self {
        Self {
            catalog_url: catalog_url.into(),
            catalog: Stage::new(FetchTarget::Catalog),
            selected_url: String::new(),
            detail: Stage::new(FetchTarget::Detail),
            homeworld: Stage::new(FetchTarget::Homeworld),
            nickname: String::new(),
            favorite: false,
            summary: None,
            focus: FocusField::Character,
            dirty: false,
        }
    }

    /// Seeds fields from a previous session. Must run before [`FormState::mount`]
    /// so a restored selection gets its detail fetched.
    pub fn restore(&mut self, restored: RestoredState) {
        let RestoredState {
            selected_url,
            favorite,
            nickname,
            summary,
        } = restored;
        if let Some(url) = selected_url {
            self.selected_url = url;
        }
        if let Some(flag) = favorite {
            self.favorite = flag;
        }
        if let Some(text) = nickname {
            self.nickname = text;
        }
        if summary.is_some() {
            self.summary = summary;
        }
    }

    /// Starts the catalog request and, when a selection was restored, its
    /// detail request.
    pub fn mount(&mut self) -> Vec<FetchRequest> {
        let ticket = self.catalog.begin();
        debug!(url = %self.catalog_url, "loading catalog");
        let mut requests = vec![FetchRequest {
            ticket,
            url: self.catalog_url.clone(),
        }];
        if !self.selected_url.is_empty() {
            requests.push(self.start_detail());
        }
        requests
    }

    /// Changes the selected reference. An empty reference clears detail and
    /// homeworld without fetching; re-selecting the current reference is a no-op.
    pub fn select(&mut self, url: impl Into<String>) -> Option<FetchRequest> {
        let url = url.into();
        if url == self.selected_url {
            return None;
        }
        self.selected_url = url;
        self.dirty = true;
        if self.selected_url.is_empty() {
            self.detail.reset();
            self.homeworld.reset();
            debug!("selection cleared");
            return None;
        }
        Some(self.start_detail())
    }

    /// Applies a finished request. Stale tickets are dropped. A committed detail
    /// with a homeworld reference yields the follow-up homeworld request.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<Value, FetchError>,
    ) -> Option<FetchRequest> {
        match ticket.target {
            FetchTarget::Catalog => {
                let outcome = outcome
                    .map(|page| Catalog::from_page(&page))
                    .map_err(|err| stage_message(FetchTarget::Catalog, &err));
                if !self.catalog.commit(ticket, outcome) {
                    debug!(?ticket, "dropping stale catalog response");
                }
                None
            }
            FetchTarget::Detail => {
                let outcome = match outcome {
                    Ok(value) => DetailRecord::from_value(value)
                        .map_err(|err| format!("{DETAIL_FAILED}: {err}")),
                    Err(err) => Err(stage_message(FetchTarget::Detail, &err)),
                };
                if !self.detail.commit(ticket, outcome) {
                    debug!(?ticket, "dropping stale detail response");
                    return None;
                }
                self.start_homeworld()
            }
            FetchTarget::Homeworld => {
                let name = match outcome {
                    Ok(value) => resource_name(&value),
                    Err(err) => {
                        debug!(
                            error = %err,
                            "{}", stage_message(FetchTarget::Homeworld, &err)
                        );
                        String::new()
                    }
                };
                if !self.homeworld.commit(ticket, Ok(name)) {
                    debug!(?ticket, "dropping stale homeworld response");
                }
                None
            }
        }
    }

    pub fn set_nickname(&mut self, nickname: impl Into<String>) {
        self.nickname = nickname.into();
        self.dirty = true;
    }

    pub fn push_nickname(&mut self, ch: char) {
        self.nickname.push(ch);
        self.dirty = true;
    }

    pub fn pop_nickname(&mut self) -> bool {
        let changed = self.nickname.pop().is_some();
        self.dirty |= changed;
        changed
    }

    pub fn set_favorite(&mut self, favorite: bool) -> bool {
        if self.favorite == favorite {
            return false;
        }
        self.favorite = favorite;
        self.dirty = true;
        true
    }

    pub fn toggle_favorite(&mut self) {
        self.set_favorite(!self.favorite);
    }

    pub fn nickname_error(&self) -> Option<NicknameError> {
        validate_nickname(&self.nickname).err()
    }

    pub fn can_submit(&self) -> bool {
        self.detail.loaded().is_some()
            && !self.nickname.trim().is_empty()
            && self.nickname_error().is_none()
    }

    /// Saves when the form is submittable.
    pub fn submit(&mut self, saved_at: DateTime<Utc>) -> Option<SavedFicha> {
        if !self.can_submit() {
            return None;
        }
        self.save(saved_at)
    }

    /// Freezes the loaded detail, resolved homeworld and annotation into a new
    /// summary. Does nothing without a loaded detail.
    pub fn save(&mut self, saved_at: DateTime<Utc>) -> Option<SavedFicha> {
        let detail = self.detail.loaded()?;
        let homeworld = self.homeworld.loaded().map(String::as_str);
        let ficha = SavedFicha {
            character: CharacterSnapshot::capture(detail, homeworld, &self.selected_url),
            nickname: self.nickname.trim().to_string(),
            favorite: self.favorite,
            saved_at,
            selected_url: self.selected_url.clone(),
        };
        self.summary = Some(ficha.clone());
        self.dirty = false;
        Some(ficha)
    }

    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    pub fn catalog_state(&self) -> &StageState<Catalog> {
        self.catalog.state()
    }

    /// Loaded entries; `None` while loading or after a failure.
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.loaded()
    }

    pub fn catalog_error(&self) -> Option<&str> {
        self.catalog.error()
    }

    pub fn is_catalog_loading(&self) -> bool {
        self.catalog.is_loading()
    }

    pub fn selection_enabled(&self) -> bool {
        self.catalog.loaded().is_some()
    }

    pub fn selected_url(&self) -> &str {
        &self.selected_url
    }

    pub fn selected_name(&self) -> Option<String> {
        if let Some(entry) = self.catalog().and_then(|catalog| catalog.get(&self.selected_url)) {
            return Some(entry.name.clone());
        }
        self.detail
            .loaded()
            .map(DetailRecord::name)
            .filter(|name| !name.is_empty())
    }

    /// Picker labels: the clearing option followed by every entry name.
    pub fn picker_options(&self) -> Vec<String> {
        let mut options = vec![EMPTY_OPTION.to_string()];
        if let Some(catalog) = self.catalog() {
            options.extend(catalog.names());
        }
        options
    }

    pub fn picker_index(&self) -> usize {
        self.catalog()
            .and_then(|catalog| catalog.position(&self.selected_url))
            .map(|index| index + 1)
            .unwrap_or(0)
    }

    pub fn url_for_option(&self, option: usize) -> Option<String> {
        if option == 0 {
            return Some(String::new());
        }
        self.catalog()
            .and_then(|catalog| catalog.get_index(option - 1))
            .map(|entry| entry.url.clone())
    }

    pub fn detail_state(&self) -> &StageState<DetailRecord> {
        self.detail.state()
    }

    pub fn detail(&self) -> Option<&DetailRecord> {
        self.detail.loaded()
    }

    pub fn detail_error(&self) -> Option<&str> {
        self.detail.error()
    }

    pub fn is_detail_loading(&self) -> bool {
        self.detail.is_loading()
    }

    pub fn homeworld_state(&self) -> &StageState<String> {
        self.homeworld.state()
    }

    /// Resolved homeworld name, empty until resolved or after a failed lookup.
    pub fn homeworld_name(&self) -> &str {
        self.homeworld.loaded().map(String::as_str).unwrap_or("")
    }

    pub fn is_homeworld_loading(&self) -> bool {
        self.homeworld.is_loading()
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn favorite(&self) -> bool {
        self.favorite
    }

    pub fn summary(&self) -> Option<&SavedFicha> {
        self.summary.as_ref()
    }

    pub fn focus(&self) -> FocusField {
        self.focus
    }

    pub fn set_focus(&mut self, focus: FocusField) {
        self.focus = focus;
    }

    pub fn focus_next_field(&mut self) {
        self.focus = self.focus.step(1);
    }

    pub fn focus_prev_field(&mut self) {
        self.focus = self.focus.step(-1);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn start_detail(&mut self) -> FetchRequest {
        self.homeworld.reset();
        let ticket = self.detail.begin();
        debug!(url = %self.selected_url, ?ticket, "loading detail");
        FetchRequest {
            ticket,
            url: self.selected_url.clone(),
        }
    }

    fn start_homeworld(&mut self) -> Option<FetchRequest> {
        let url = self.detail.loaded()?.homeworld()?.to_string();
        let ticket = self.homeworld.begin();
        debug!(%url, ?ticket, "loading homeworld");
        Some(FetchRequest { ticket, url })
    }
}

/// Message shown for a failed stage. Non-2xx answers get the stage's fixed
/// message; other failures show the error itself.
pub fn stage_message(target: FetchTarget, err: &FetchError) -> String {
    match err {
        FetchError::Status { .. } => match target {
            FetchTarget::Catalog => LIST_FAILED.to_string(),
            FetchTarget::Detail => DETAIL_FAILED.to_string(),
            FetchTarget::Homeworld => HOMEWORLD_FAILED.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loaded_catalog() -> FormState {
        let mut state = FormState::default();
        let request = state.mount().remove(0);
        state.complete(
            request.ticket,
            Ok(json!({"results": [
                {"name": "Luke Skywalker", "url": "u/1"},
                {"name": "C-3PO", "url": "u/2"}
            ]})),
        );
        state
    }

    #[test]
    fn mount_requests_the_catalog_page() {
        let mut state = FormState::default();
        let requests = state.mount();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, DEFAULT_CATALOG_URL);
        assert_eq!(requests[0].ticket.target, FetchTarget::Catalog);
        assert!(state.is_catalog_loading());
        assert!(!state.selection_enabled());
    }

    #[test]
    fn picker_options_start_with_the_empty_option() {
        let mut state = loaded_catalog();
        assert_eq!(
            state.picker_options(),
            vec![EMPTY_OPTION, "Luke Skywalker", "C-3PO"]
        );
        assert_eq!(state.picker_index(), 0);
        state.select("u/2");
        assert_eq!(state.picker_index(), 2);
        assert_eq!(state.url_for_option(1).as_deref(), Some("u/1"));
        assert_eq!(state.url_for_option(0).as_deref(), Some(""));
        assert_eq!(state.url_for_option(9), None);
    }

    #[test]
    fn reselecting_the_same_reference_does_not_fetch() {
        let mut state = loaded_catalog();
        assert!(state.select("u/1").is_some());
        assert!(state.select("u/1").is_none());
    }

    #[test]
    fn detail_without_homeworld_issues_no_follow_up() {
        let mut state = loaded_catalog();
        let request = state.select("u/1").expect("detail request");
        let follow_up = state.complete(request.ticket, Ok(json!({"name": "Luke"})));
        assert!(follow_up.is_none());
        assert_eq!(state.homeworld_state(), &StageState::Idle);
    }

    #[test]
    fn non_object_detail_is_a_failure() {
        let mut state = loaded_catalog();
        let request = state.select("u/1").expect("detail request");
        state.complete(request.ticket, Ok(json!("oops")));
        assert!(state.detail().is_none());
        assert_eq!(
            state.detail_error(),
            Some("Could not load the character detail: expected a JSON object, found a string")
        );
    }

    #[test]
    fn transport_errors_show_their_own_text() {
        let err = FetchError::Transport {
            url: "u/1".into(),
            message: "dns error".into(),
        };
        assert_eq!(
            stage_message(FetchTarget::Detail, &err),
            "request to u/1 failed: dns error"
        );
        let status = FetchError::Status {
            url: "u/1".into(),
            status: 500,
        };
        assert_eq!(stage_message(FetchTarget::Catalog, &status), LIST_FAILED);
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut state = FormState::default();
        state.focus_prev_field();
        assert_eq!(state.focus(), FocusField::Submit);
        state.focus_next_field();
        assert_eq!(state.focus(), FocusField::Character);
    }

    #[test]
    fn edits_mark_dirty_and_save_cleans() {
        let mut state = loaded_catalog();
        assert!(!state.is_dirty());
        state.push_nickname('R');
        assert!(state.is_dirty());
        let request = state.select("u/1").unwrap();
        state.complete(request.ticket, Ok(json!({"name": "Luke"})));
        state.push_nickname('2');
        assert!(state.save(Utc::now()).is_some());
        assert!(!state.is_dirty());
    }
}
