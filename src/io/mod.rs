mod export;
mod format;

pub use export::{ExportError, ExportTarget, FichaExport};
pub use format::ExportFormat;
