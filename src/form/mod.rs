mod actions;
mod reducers;
mod stage;
mod state;
mod validation;

pub use actions::{Effect, FormCommand};
pub use reducers::apply_command;
pub use stage::{FetchTarget, Stage, StageState, Ticket};
pub use state::{
    DEFAULT_CATALOG_URL, DETAIL_FAILED, EMPTY_OPTION, FetchRequest, FocusField, FormState,
    LIST_FAILED, stage_message,
};
pub use validation::{NICKNAME_MIN_CHARS, NicknameError, validate_nickname};
