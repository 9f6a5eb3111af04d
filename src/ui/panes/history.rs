//! History pane rendering
//!
//! Each transcript entry is shown as its input line followed by the postfix
//! form and either the value or the error. Syntax errors get a caret under
//! the offending character of the input.

use crate::snapshot::{Entry, Outcome, Transcript};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Width of the `[n] ` gutter in front of each input
const GUTTER: usize = 6;

/// Render the history pane.
///
/// `scroll_offset` is clamped to the content; `usize::MAX` pins it to the
/// newest entry.
pub fn render_history_pane(
    frame: &mut Frame,
    area: Rect,
    transcript: &Transcript,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" History ({}) ", transcript.total()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if transcript.is_empty() {
        let paragraph = Paragraph::new("(type an expression and press Enter)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_lines = history_lines(transcript);

    let total_items = all_lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(ListItem::new)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

/// Build the display lines for every retained entry
pub fn history_lines(transcript: &Transcript) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (offset, entry) in transcript.iter().enumerate() {
        entry_lines(transcript.first_number() + offset, entry, &mut lines);
    }
    lines
}

fn entry_lines(number: usize, entry: &Entry, lines: &mut Vec<Line<'static>>) {
    let comment = Style::default().fg(DEFAULT_THEME.comment);

    lines.push(Line::from(vec![
        Span::styled(format!("{:<width$}", format!("[{}]", number), width = GUTTER), comment),
        Span::styled(entry.input.clone(), Style::default().fg(DEFAULT_THEME.fg)),
    ]));

    if let Some(rpn) = &entry.rpn {
        lines.push(Line::from(vec![
            Span::styled(" ".repeat(GUTTER), comment),
            Span::styled("rpn ", comment),
            Span::styled(rpn.clone(), Style::default().fg(DEFAULT_THEME.primary)),
        ]));
    }

    match &entry.outcome {
        Outcome::Value(value) => lines.push(Line::from(vec![
            Span::styled(" ".repeat(GUTTER), comment),
            Span::styled("=   ", comment),
            Span::styled(
                value.to_string(),
                Style::default()
                    .fg(DEFAULT_THEME.success)
                    .add_modifier(Modifier::BOLD),
            ),
        ])),
        Outcome::Failure { message, position } => {
            let error = Style::default().fg(DEFAULT_THEME.error);
            if let Some(position) = position {
                lines.push(Line::from(Span::styled(
                    format!("{}^", " ".repeat(GUTTER + position)),
                    error.add_modifier(Modifier::BOLD),
                )));
            }
            lines.push(Line::from(vec![
                Span::styled(" ".repeat(GUTTER), comment),
                Span::styled(message.clone(), error),
            ]));
        }
    }
}
