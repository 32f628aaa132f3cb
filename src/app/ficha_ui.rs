use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    domain::SavedFicha,
    fetch::{HttpFetcher, ResourceFetcher},
    form::{DEFAULT_CATALOG_URL, FormState},
    storage::{FichaStore, restore},
};

use super::{
    options::UiOptions,
    runtime::{App, EffectRunner},
};

/// Entry point: configures and runs the terminal form.
pub struct FichaUI {
    catalog_url: String,
    store: Arc<dyn FichaStore>,
    fetcher: Option<Arc<dyn ResourceFetcher>>,
    options: UiOptions,
    restore: bool,
}

impl std::fmt::Debug for FichaUI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FichaUI")
            .field("catalog_url", &self.catalog_url)
            .field("store", &self.store)
            .field("options", &self.options)
            .field("restore", &self.restore)
            .finish_non_exhaustive()
    }
}

impl FichaUI {
    pub fn new(store: impl FichaStore + 'static) -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            store: Arc::new(store),
            fetcher: None,
            options: UiOptions::default(),
            restore: true,
        }
    }

    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    /// Replaces the default HTTP client, e.g. with a canned fetcher.
    pub fn with_fetcher(mut self, fetcher: impl ResourceFetcher + 'static) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Whether the previously stored ficha seeds the form.
    pub fn with_restore(mut self, restore: bool) -> Self {
        self.restore = restore;
        self
    }

    /// Builds the form state this UI starts from, restore included.
    pub fn initial_state(&self) -> FormState {
        let mut form = FormState::new(self.catalog_url.clone());
        if self.restore {
            let restored = restore(self.store.as_ref());
            if !restored.is_empty() {
                info!(
                    selected = restored.selected_url.as_deref().unwrap_or(""),
                    has_summary = restored.summary.is_some(),
                    "restored previous ficha"
                );
            }
            form.restore(restored);
        }
        form
    }

    /// Blocks until the user quits and returns the last ficha saved in the
    /// session, if any.
    pub fn run(self) -> Result<Option<SavedFicha>> {
        let form = self.initial_state();
        let FichaUI {
            store,
            fetcher,
            options,
            ..
        } = self;

        let fetcher: Arc<dyn ResourceFetcher> = match fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(
                HttpFetcher::with_default_client().context("failed to build HTTP client")?,
            ),
        };
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("fichaui-net")
            .enable_all()
            .build()
            .context("failed to start async runtime")?;

        let (runner, completions) = EffectRunner::new(runtime.handle().clone(), fetcher);
        let mut app = App::new(form, options, store, runner, completions);
        let result = app.run();
        // Requests that never answered must not keep the process alive.
        runtime.shutdown_background();
        result
    }
}
