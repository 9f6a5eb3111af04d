//! Input line rendering

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the input line and place the terminal cursor when focused.
///
/// `cursor` counts characters, not bytes.
pub fn render_input_pane(
    frame: &mut Frame,
    area: Rect,
    input: &str,
    cursor: usize,
    rpn_mode: bool,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let prompt = if rpn_mode { "Postfix: " } else { "Expression: " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    // Keep the cursor on screen for lines longer than the pane
    let inner_width = area.width.saturating_sub(2) as usize;
    let room = inner_width.saturating_sub(prompt.len() + 1).max(1);
    let skip = cursor.saturating_sub(room);
    let shown: String = input.chars().skip(skip).collect();

    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(DEFAULT_THEME.primary)),
        Span::styled(shown, Style::default().fg(DEFAULT_THEME.fg)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);

    if is_focused {
        let x = area.x + 1 + (prompt.len() + cursor - skip) as u16;
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}
