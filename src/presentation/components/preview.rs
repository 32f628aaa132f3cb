use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::form::FormState;

use super::{error, field, hint};

pub fn render_preview(frame: &mut Frame<'_>, area: Rect, form: &FormState) {
    let widget = Paragraph::new(preview_lines(form))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Preview").borders(Borders::ALL));
    frame.render_widget(widget, area);
}

pub fn preview_lines(form: &FormState) -> Vec<ratatui::text::Line<'static>> {
    if form.selected_url().is_empty() {
        return vec![hint("Pick a character to preview its ficha.")];
    }
    if form.is_detail_loading() {
        return vec![hint("Loading detail…")];
    }
    if let Some(message) = form.detail_error() {
        return vec![error(message.to_string())];
    }
    let Some(detail) = form.detail() else {
        return Vec::new();
    };

    let homeworld = if form.is_homeworld_loading() {
        "loading…".to_string()
    } else if form.homeworld_name().is_empty() {
        "—".to_string()
    } else {
        form.homeworld_name().to_string()
    };
    vec![
        field("Name", detail.name()),
        field("Height", format!("{} cm", detail.height())),
        field("Birth year", detail.birth_year()),
        field("Homeworld", homeworld),
    ]
}
