use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::form::{EMPTY_OPTION, FocusField, FormState};

use super::{error, hint, label_style};

pub fn render_selection(frame: &mut Frame<'_>, area: Rect, form: &FormState) {
    let widget = Paragraph::new(selection_lines(form))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("1. Pick a character")
                .borders(Borders::ALL),
        );
    frame.render_widget(widget, area);
}

pub fn selection_lines(form: &FormState) -> Vec<Line<'static>> {
    let focused = form.focus() == FocusField::Character;
    let mut lines = Vec::new();
    if form.is_catalog_loading() {
        lines.push(hint("Loading characters…"));
    }
    if let Some(message) = form.catalog_error() {
        lines.push(error(message.to_string()));
    }

    let marker = if focused { "» " } else { "  " };
    lines.push(Line::from(Span::styled(
        format!("{marker}Character"),
        label_style(focused),
    )));

    let current = if form.selected_url().is_empty() {
        EMPTY_OPTION.to_string()
    } else {
        form.selected_name()
            .unwrap_or_else(|| form.selected_url().to_string())
    };
    let value = if form.selection_enabled() {
        Span::styled(format!("  [ {current} ▾ ]"), Style::default().fg(Color::Cyan))
    } else {
        Span::styled(
            format!("  [ {current} ] (unavailable)"),
            Style::default().fg(Color::DarkGray),
        )
    };
    lines.push(Line::from(value));

    if let Some(catalog) = form.catalog() {
        lines.push(hint(format!("{} characters listed", catalog.len())));
    }
    lines.push(hint(format!("Data from {}", form.catalog_url())));
    lines
}
