//! Symbol table pane rendering
//!
//! Shows every slot of the table, empty ones included, so probing and
//! growth are visible. A key stored away from its home slot is marked with
//! its home index and displacement.

use crate::memory::{Slot, SymbolTable};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the symbol table pane
pub fn render_symbols_pane(
    frame: &mut Frame,
    area: Rect,
    symbols: &SymbolTable,
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
        .title(format!(
            " Symbols {}/{} ",
            symbols.size(),
            symbols.capacity()
        ))
        .borders(Borders::ALL)
        .border_style(border_style);

    let all_items: Vec<ListItem> = symbol_lines(symbols).into_iter().map(ListItem::new).collect();

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

/// One display line per slot
pub fn symbol_lines(symbols: &SymbolTable) -> Vec<Line<'static>> {
    let capacity = symbols.capacity();
    let index_width = capacity.saturating_sub(1).to_string().len();

    symbols
        .slots()
        .map(|slot| slot_line(&slot, capacity, index_width))
        .collect()
}

fn slot_line(slot: &Slot<'_, String, i32>, capacity: usize, index_width: usize) -> Line<'static> {
    let comment = Style::default().fg(DEFAULT_THEME.comment);
    let index = Span::styled(
        format!("{:>width$} ", slot.index, width = index_width),
        comment,
    );

    let Some((key, value)) = slot.entry else {
        return Line::from(vec![index, Span::styled("·", comment)]);
    };

    let mut spans = vec![
        index,
        Span::styled(key.clone(), Style::default().fg(DEFAULT_THEME.variable)),
        Span::styled(" = ", comment),
        Span::styled(value.to_string(), Style::default().fg(DEFAULT_THEME.number)),
    ];

    if let (Some(home), Some(distance)) = (slot.home, slot.displacement(capacity)) {
        if distance > 0 {
            spans.push(Span::styled(
                format!("  (home {}, +{})", home, distance),
                Style::default().fg(DEFAULT_THEME.displaced),
            ));
        }
    }

    Line::from(spans)
}
