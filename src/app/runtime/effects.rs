use std::sync::Arc;

use serde_json::Value;
use tokio::{
    runtime::Handle,
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
};
use tracing::trace;

use crate::{
    fetch::{FetchError, ResourceFetcher},
    form::{FetchRequest, Ticket},
};

/// A finished request on its way back to the UI thread.
#[derive(Debug)]
pub(crate) struct FetchCompletion {
    pub(crate) ticket: Ticket,
    pub(crate) outcome: Result<Value, FetchError>,
}

/// Runs fetch requests on the tokio runtime. Results are never applied here;
/// they are sent back so every state change happens on the UI thread.
pub(crate) struct EffectRunner {
    handle: Handle,
    fetcher: Arc<dyn ResourceFetcher>,
    completions: UnboundedSender<FetchCompletion>,
}

impl EffectRunner {
    pub(crate) fn new(
        handle: Handle,
        fetcher: Arc<dyn ResourceFetcher>,
    ) -> (Self, UnboundedReceiver<FetchCompletion>) {
        let (completions, receiver) = unbounded_channel();
        (
            Self {
                handle,
                fetcher,
                completions,
            },
            receiver,
        )
    }

    pub(crate) fn fetch(&self, request: FetchRequest) {
        let fetcher = Arc::clone(&self.fetcher);
        let completions = self.completions.clone();
        self.handle.spawn(async move {
            let FetchRequest { ticket, url } = request;
            let outcome = fetcher.fetch_json(&url).await;
            trace!(?ticket, ok = outcome.is_ok(), "request finished");
            // The receiver is gone once the form has closed.
            let _ = completions.send(FetchCompletion { ticket, outcome });
        });
    }
}
