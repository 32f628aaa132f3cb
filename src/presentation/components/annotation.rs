use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::form::{FocusField, FormState, NICKNAME_MIN_CHARS};

use super::{error, hint, label_style};

const PLACEHOLDER: &str = "e.g. The Chosen One";
const VALUE_INDENT: &str = "  > ";
/// Line of the nickname value inside the panel.
const NICKNAME_LINE: u16 = 1;

pub fn render_annotation(frame: &mut Frame<'_>, area: Rect, form: &FormState, enable_cursor: bool) {
    let width = area.width.saturating_sub(2).max(1) as usize;
    let widget = Paragraph::new(annotation_lines(form, width))
        .block(Block::default().title("2. Your ficha").borders(Borders::ALL));
    frame.render_widget(widget, area);

    if enable_cursor && form.focus() == FocusField::Nickname {
        let offset = (VALUE_INDENT.width() + form.nickname().width()) as u16;
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(offset)
            .min(area.right().saturating_sub(2));
        let y = area.y.saturating_add(1).saturating_add(NICKNAME_LINE);
        frame.set_cursor_position((x, y));
    }
}

pub fn annotation_lines(form: &FormState, width: usize) -> Vec<Line<'static>> {
    let focus = form.focus();
    let mut lines = Vec::new();

    lines.push(label(focus == FocusField::Nickname, "Nickname"));
    if form.nickname().is_empty() {
        lines.push(Line::from(vec![
            Span::raw(VALUE_INDENT),
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ]));
    } else {
        lines.push(Line::from(format!("{VALUE_INDENT}{}", form.nickname())));
    }
    lines.push(hint(format!("  At least {NICKNAME_MIN_CHARS} characters.")));
    if let Some(err) = form.nickname_error() {
        for chunk in wrap(&err.to_string(), width.saturating_sub(2).max(8)) {
            lines.push(error(format!("  {chunk}")));
        }
    }

    let mark = if form.favorite() { "x" } else { " " };
    lines.push(Line::from(vec![
        marker(focus == FocusField::Favorite),
        Span::styled(
            format!("[{mark}] Favorite character"),
            label_style(focus == FocusField::Favorite),
        ),
    ]));

    let button_style = if form.can_submit() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let button_style = if focus == FocusField::Submit {
        button_style.add_modifier(Modifier::REVERSED)
    } else {
        button_style
    };
    lines.push(Line::from(vec![
        marker(focus == FocusField::Submit),
        Span::styled("[ Save ficha ]", button_style),
    ]));
    lines
}

fn label(focused: bool, text: &str) -> Line<'static> {
    Line::from(vec![
        marker(focused),
        Span::styled(text.to_string(), label_style(focused)),
    ])
}

fn marker(focused: bool) -> Span<'static> {
    Span::raw(if focused { "» " } else { "  " })
}
