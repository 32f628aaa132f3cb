use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::form::FormState;

use super::components::{
    render_annotation, render_footer, render_popup, render_preview, render_selection,
    render_summary,
};

pub struct UiContext<'a> {
    pub form: &'a FormState,
    pub status_message: &'a str,
    pub dirty: bool,
    pub help: Option<&'a str>,
    pub popup: Option<PopupRender<'a>>,
}

pub struct PopupRender<'a> {
    pub title: &'a str,
    pub options: &'a [String],
    pub selected: usize,
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(frame.area());
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let cursor_enabled = ctx.popup.is_none();
    render_selection(frame, top[0], ctx.form);
    render_annotation(frame, top[1], ctx.form, cursor_enabled);
    render_preview(frame, rows[1], ctx.form);
    render_summary(frame, rows[2], ctx.form.summary());
    render_footer(frame, rows[3], &ctx);

    if let Some(popup) = ctx.popup {
        render_popup(frame, popup);
    }
}
