use anyhow::Result;
use chrono::Utc;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    domain::SavedFicha,
    form::{Effect, FocusField, FormCommand, FormState, apply_command},
    presentation::{self, UiContext},
    storage::{FichaStore, persist_quietly},
};

use super::{
    input::{Dispatch, KeyAction, field_command, route},
    keymap::{self, KeymapContext},
    options::UiOptions,
    popup::PickerPopup,
    status::StatusLine,
    terminal::TerminalGuard,
};

mod effects;

pub(crate) use effects::EffectRunner;
use effects::FetchCompletion;

pub(crate) struct App {
    form: FormState,
    options: UiOptions,
    status: StatusLine,
    store: Arc<dyn FichaStore>,
    runner: EffectRunner,
    completions: UnboundedReceiver<FetchCompletion>,
    popup: Option<PickerPopup>,
    exit_armed: bool,
    should_quit: bool,
    last_saved: Option<SavedFicha>,
}

impl App {
    pub(crate) fn new(
        form: FormState,
        options: UiOptions,
        store: Arc<dyn FichaStore>,
        runner: EffectRunner,
        completions: UnboundedReceiver<FetchCompletion>,
    ) -> Self {
        Self {
            form,
            options,
            status: StatusLine::new(),
            store,
            runner,
            completions,
            popup: None,
            exit_armed: false,
            should_quit: false,
            last_saved: None,
        }
    }

    /// Runs until the user quits; returns the last ficha saved in this session.
    pub(crate) fn run(&mut self) -> Result<Option<SavedFicha>> {
        let mut terminal = TerminalGuard::new()?;
        self.start();
        while !self.should_quit {
            self.drain_completions();
            terminal.draw(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize(width, height) => terminal.resize(width, height)?,
                Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
            }
        }
        Ok(self.last_saved.take())
    }

    fn start(&mut self) {
        for request in self.form.mount() {
            self.runner.fetch(request);
        }
    }

    fn drain_completions(&mut self) {
        while let Ok(FetchCompletion { ticket, outcome }) = self.completions.try_recv() {
            self.dispatch(FormCommand::FetchCompleted { ticket, outcome });
        }
    }

    fn dispatch(&mut self, command: FormCommand) {
        for effect in apply_command(&mut self.form, command) {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Fetch(request) => self.runner.fetch(request),
            Effect::Persist(ficha) => {
                // The summary already shows the ficha; a failed write stays silent.
                persist_quietly(self.store.as_ref(), &ficha);
                self.status.saved(&ficha.character.name);
                self.exit_armed = false;
                self.last_saved = Some(ficha);
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let help = self.current_help_text();
        presentation::draw(
            frame,
            UiContext {
                form: &self.form,
                status_message: self.status.message(),
                dirty: self.form.is_dirty(),
                help: help.as_deref(),
                popup: self.popup.as_ref().map(PickerPopup::as_render),
            },
        );
    }

    fn current_help_text(&self) -> Option<String> {
        if !self.options.show_help {
            return None;
        }
        let context = if self.popup.is_some() {
            KeymapContext::Picker
        } else {
            KeymapContext::Form
        };
        keymap::help_text(context)
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.popup.is_some() {
            self.handle_picker_key(&key);
            return;
        }
        match route(KeymapContext::Form, &key) {
            Dispatch::Action(action) => self.handle_action(action),
            Dispatch::Input(event) => self.handle_field_input(&event),
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Save => self.try_submit(),
            KeyAction::Quit => self.on_exit(),
            KeyAction::Dismiss => {
                self.exit_armed = false;
                self.status.ready();
            }
            KeyAction::FieldStep(delta) => {
                let command = if delta < 0 {
                    FormCommand::FocusPrevField
                } else {
                    FormCommand::FocusNextField
                };
                self.dispatch(command);
            }
            KeyAction::Activate => match self.form.focus() {
                FocusField::Character => self.open_picker(),
                FocusField::Nickname => self.dispatch(FormCommand::FocusNextField),
                FocusField::Favorite => self.dispatch(FormCommand::ToggleFavorite),
                FocusField::Submit => self.try_submit(),
            },
        }
    }

    fn handle_field_input(&mut self, event: &KeyEvent) {
        let focus = self.form.focus();
        if let Some(command) = field_command(focus, event) {
            self.exit_armed = false;
            self.status.editing(focus.label());
            self.dispatch(command);
        }
    }

    fn open_picker(&mut self) {
        match PickerPopup::from_form(&self.form) {
            Some(popup) => {
                self.popup = Some(popup);
                self.status.picking();
            }
            None => self.status.picker_unavailable(self.form.is_catalog_loading()),
        }
    }

    fn handle_picker_key(&mut self, key: &KeyEvent) {
        let Dispatch::Action(action) = route(KeymapContext::Picker, key) else {
            return;
        };
        match action {
            KeyAction::FieldStep(delta) => {
                if let Some(popup) = self.popup.as_mut() {
                    popup.step(delta);
                }
            }
            KeyAction::Activate => {
                let Some(popup) = self.popup.take() else {
                    return;
                };
                let label = popup.selected_label().map(str::to_string);
                if let Some(url) = self.form.url_for_option(popup.selection()) {
                    self.exit_armed = false;
                    self.status.selected(label.as_deref());
                    self.dispatch(FormCommand::Select(url));
                }
            }
            KeyAction::Dismiss => {
                self.popup = None;
                self.status.ready();
            }
            KeyAction::Quit => {
                self.popup = None;
                self.on_exit();
            }
            KeyAction::Save => {}
        }
    }

    fn try_submit(&mut self) {
        self.exit_armed = false;
        if let Some(reason) = self.submit_blocker() {
            self.status.cannot_save(&reason);
            return;
        }
        self.dispatch(FormCommand::Submit {
            saved_at: Utc::now(),
        });
    }

    fn submit_blocker(&self) -> Option<String> {
        if self.form.detail().is_none() {
            return Some("pick a character and wait for its detail".to_string());
        }
        if self.form.nickname().trim().is_empty() {
            return Some("enter a nickname".to_string());
        }
        self.form.nickname_error().map(|err| err.to_string())
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.form.is_dirty() && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fetch::{FetchError, ResourceFetcher},
        storage::{MemoryStore, STORAGE_KEY, StoreError},
    };
    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyModifiers};
    use serde_json::{Value, json};
    use std::{
        collections::HashMap,
        time::{Duration, Instant},
    };
    use tokio::runtime::Runtime;

    struct MapFetcher(HashMap<String, Value>);

    #[async_trait]
    impl ResourceFetcher for MapFetcher {
        async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
            self.0.get(url).cloned().ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    #[derive(Debug)]
    struct ReadOnlyStore;

    impl FichaStore for ReadOnlyStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("quota exceeded".into()))
        }
    }

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("runtime")
    }

    fn swapi() -> MapFetcher {
        MapFetcher(HashMap::from([
            (
                crate::form::DEFAULT_CATALOG_URL.to_string(),
                json!({"results": [{"name": "Luke Skywalker", "url": "u/1"}]}),
            ),
            (
                "u/1".to_string(),
                json!({"name": "Luke Skywalker", "height": "172", "birth_year": "19BBY", "homeworld": "p/1"}),
            ),
            ("p/1".to_string(), json!({"name": "Tatooine"})),
        ]))
    }

    fn app(form: FormState, store: Arc<dyn FichaStore>, runtime: &Runtime) -> App {
        let (runner, completions) = EffectRunner::new(runtime.handle().clone(), Arc::new(swapi()));
        App::new(form, UiOptions::default(), store, runner, completions)
    }

    fn form_with_detail() -> FormState {
        let mut form = FormState::default();
        let request = form.select("u/1").expect("detail request");
        form.complete(
            request.ticket,
            Ok(json!({"name": "Luke Skywalker", "height": "172", "birth_year": "19BBY"})),
        );
        form
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_key(KeyEvent::new(code, modifiers));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch), KeyModifiers::NONE);
        }
    }

    fn settle(app: &mut App, done: impl Fn(&FormState) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(&app.form) {
            assert!(Instant::now() < deadline, "requests did not settle");
            std::thread::sleep(Duration::from_millis(5));
            app.drain_completions();
        }
    }

    #[test]
    fn ctrl_s_persists_and_shows_the_summary() {
        let runtime = runtime();
        let store = Arc::new(MemoryStore::new());
        let mut app = app(form_with_detail(), store.clone(), &runtime);
        app.form.set_focus(FocusField::Nickname);
        type_text(&mut app, "Farmboy");
        press(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);

        let summary = app.form.summary().expect("summary");
        assert_eq!(summary.nickname, "Farmboy");
        let stored = store.read(STORAGE_KEY).unwrap().expect("persisted");
        assert!(stored.contains("\"Farmboy\""));
        assert_eq!(
            app.status.message(),
            "Ficha for Luke Skywalker saved. Press Ctrl+Q to exit."
        );
        assert!(app.last_saved.is_some());
    }

    #[test]
    fn failed_writes_still_update_the_summary() {
        let runtime = runtime();
        let mut app = app(form_with_detail(), Arc::new(ReadOnlyStore), &runtime);
        app.form.set_nickname("Wormie");
        app.form.set_focus(FocusField::Submit);
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            app.form.summary().map(|ficha| ficha.nickname.as_str()),
            Some("Wormie")
        );
        assert!(app.status.message().starts_with("Ficha for Luke Skywalker saved"));
    }

    #[test]
    fn save_explains_what_is_missing() {
        let runtime = runtime();
        let mut app = app(form_with_detail(), Arc::new(MemoryStore::new()), &runtime);
        press(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(app.status.message(), "Cannot save yet: enter a nickname");
        app.form.set_nickname("L");
        press(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(
            app.status.message(),
            "Cannot save yet: Nickname must be at least 2 characters."
        );
        assert!(app.form.summary().is_none());
    }

    #[test]
    fn picker_selection_loads_detail_and_homeworld() {
        let runtime = runtime();
        let mut app = app(FormState::default(), Arc::new(MemoryStore::new()), &runtime);
        app.start();
        settle(&mut app, |form| form.selection_enabled());

        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.popup.is_some());
        press(&mut app, KeyCode::Down, KeyModifiers::NONE);
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.popup.is_none());
        assert_eq!(app.form.selected_url(), "u/1");

        settle(&mut app, |form| form.homeworld_name() == "Tatooine");
        assert_eq!(
            app.form.detail().map(|detail| detail.birth_year()),
            Some("19BBY".to_string())
        );
    }

    #[test]
    fn picker_is_refused_while_loading() {
        let runtime = runtime();
        let mut app = app(FormState::default(), Arc::new(MemoryStore::new()), &runtime);
        app.form.mount();
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.popup.is_none());
        assert_eq!(app.status.message(), "The character list is still loading");
    }

    #[test]
    fn quitting_with_unsaved_edits_needs_confirmation() {
        let runtime = runtime();
        let mut app = app(FormState::default(), Arc::new(MemoryStore::new()), &runtime);
        app.form.set_focus(FocusField::Favorite);
        press(&mut app, KeyCode::Char(' '), KeyModifiers::NONE);
        assert!(app.form.favorite());
        press(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(!app.should_quit);
        assert!(app.exit_armed);
        press(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn clean_form_quits_immediately() {
        let runtime = runtime();
        let mut app = app(FormState::default(), Arc::new(MemoryStore::new()), &runtime);
        press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
        assert!(app.last_saved.is_none());
    }
}
