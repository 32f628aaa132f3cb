mod file;
mod memory;
mod restore;

use std::path::PathBuf;

use tracing::warn;

use crate::domain::SavedFicha;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use restore::{RestoredState, restore, restore_from_str};

/// Key the ficha is stored under.
pub const STORAGE_KEY: &str = "ficha-galactica";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize the ficha")]
    Serialize(#[from] serde_json::Error),
    #[error("store is unavailable: {0}")]
    Unavailable(String),
}

/// String key-value storage for the persisted ficha.
pub trait FichaStore: Send + Sync + std::fmt::Debug {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Writes the ficha under [`STORAGE_KEY`], overwriting any previous value.
pub fn persist(store: &dyn FichaStore, ficha: &SavedFicha) -> Result<(), StoreError> {
    let payload = serde_json::to_string(ficha)?;
    store.write(STORAGE_KEY, &payload)
}

/// Like [`persist`], but a failure is only logged.
pub fn persist_quietly(store: &dyn FichaStore, ficha: &SavedFicha) -> bool {
    match persist(store, ficha) {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "could not persist ficha");
            false
        }
    }
}
