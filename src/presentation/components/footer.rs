use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::super::view::UiContext;

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let actions = ctx.help.unwrap_or(" ");
    let actions_widget = Paragraph::new(format!("Actions: {actions}"))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(actions_widget, rows[0]);

    let status_widget = Paragraph::new(Line::from(vec![
        Span::raw("Status: "),
        Span::raw(status_text(ctx.status_message, ctx.dirty)),
        Span::raw(" "),
        badge(ctx),
    ]))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::NONE));
    frame.render_widget(status_widget, rows[1]);
}

fn status_text(message: &str, dirty: bool) -> String {
    let mut status = message.to_string();
    if dirty {
        status.push_str(" • unsaved changes");
    }
    if status.trim().is_empty() {
        status = "Ready".to_string();
    }
    status
}

fn badge(ctx: &UiContext<'_>) -> Span<'static> {
    let form = ctx.form;
    if form.catalog_error().is_some() || form.detail_error().is_some() {
        Span::styled("[!]", Style::default().fg(Color::Red).bg(Color::Black))
    } else if form.is_catalog_loading() || form.is_detail_loading() || form.is_homeworld_loading() {
        Span::styled("[…]", Style::default().fg(Color::Cyan))
    } else {
        Span::styled("[ok]", Style::default().fg(Color::Green))
    }
}
