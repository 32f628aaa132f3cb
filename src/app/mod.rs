pub(crate) mod input;
pub(crate) mod keymap;
mod ficha_ui;
mod options;
mod popup;
mod runtime;
mod status;
mod terminal;

pub use ficha_ui::FichaUI;
pub use options::UiOptions;
