#![deny(rust_2018_idioms)]

pub mod app;
pub mod domain;
pub mod fetch;
pub mod form;
pub mod io;
mod presentation;
pub mod storage;

pub use app::{FichaUI, UiOptions};
pub use domain::SavedFicha;

pub mod prelude {
    pub use super::{
        FichaUI, UiOptions,
        domain::SavedFicha,
        fetch::{FetchError, HttpFetcher, ResourceFetcher},
        io::{ExportFormat, ExportTarget, FichaExport},
        storage::{FichaStore, FileStore, MemoryStore},
    };
}
