use tracing::info;

use super::{
    actions::{Effect, FormCommand},
    state::FormState,
};

pub fn apply_command(state: &mut FormState, command: FormCommand) -> Vec<Effect> {
    match command {
        FormCommand::FocusNextField => state.focus_next_field(),
        FormCommand::FocusPrevField => state.focus_prev_field(),
        FormCommand::Select(url) => {
            return state.select(url).map(Effect::Fetch).into_iter().collect();
        }
        FormCommand::NicknameInput(ch) => state.push_nickname(ch),
        FormCommand::NicknameBackspace => {
            state.pop_nickname();
        }
        FormCommand::NicknameClear => state.set_nickname(String::new()),
        FormCommand::SetFavorite(flag) => {
            state.set_favorite(flag);
        }
        FormCommand::ToggleFavorite => state.toggle_favorite(),
        FormCommand::Submit { saved_at } => {
            if let Some(ficha) = state.submit(saved_at) {
                info!(character = %ficha.character.name, "ficha saved");
                return vec![Effect::Persist(ficha)];
            }
        }
        FormCommand::FetchCompleted { ticket, outcome } => {
            return state
                .complete(ticket, outcome)
                .map(Effect::Fetch)
                .into_iter()
                .collect();
        }
    }
    Vec::new()
}
