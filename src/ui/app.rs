//! Main TUI application state and logic

use crate::interpreter::engine::Session;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Input,
    History,
    Symbols,
}

impl FocusedPane {
    /// Move focus to the next pane (input -> history -> symbols)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Input => FocusedPane::History,
            FocusedPane::History => FocusedPane::Symbols,
            FocusedPane::Symbols => FocusedPane::Input,
        }
    }
}

/// The main application state
pub struct App {
    /// The evaluation session
    pub session: Session,

    /// Line being edited
    pub input: String,

    /// Cursor position in `input`, in characters
    pub cursor: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub history_scroll: usize,
    pub symbols_scroll: usize,

    /// Evaluate lines as postfix instead of infix
    pub rpn_mode: bool,

    /// Index into the transcript while recalling earlier inputs
    pub recall: Option<usize>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether the status message reports a failure
    pub status_is_error: bool,
}

impl App {
    pub fn new(session: Session, rpn_mode: bool) -> Self {
        App {
            session,
            input: String::new(),
            cursor: 0,
            focused_pane: FocusedPane::Input,
            history_scroll: 0,
            symbols_scroll: 0,
            rpn_mode,
            recall: None,
            should_quit: false,
            status_message: String::from("Ready!"),
            status_is_error: false,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // History | Symbols on top, input line, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[0]);

        super::panes::render_history_pane(
            frame,
            columns[0],
            self.session.history(),
            self.focused_pane == FocusedPane::History,
            &mut self.history_scroll,
        );

        super::panes::render_symbols_pane(
            frame,
            columns[1],
            self.session.symbols(),
            self.focused_pane == FocusedPane::Symbols,
            &mut self.symbols_scroll,
        );

        super::panes::render_input_pane(
            frame,
            main_chunks[1],
            &self.input,
            self.cursor,
            self.rpn_mode,
            self.focused_pane == FocusedPane::Input,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[2],
            &self.status_message,
            self.rpn_mode,
            self.status_is_error,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('r') if ctrl => {
                self.rpn_mode = !self.rpn_mode;
                self.status_is_error = false;
                self.status_message = if self.rpn_mode {
                    "Postfix input".to_string()
                } else {
                    "Infix input".to_string()
                };
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Input => self.recall_previous(),
                FocusedPane::History => {
                    // The pane clamps usize::MAX down to its last page
                    self.history_scroll = self.history_scroll.saturating_sub(1);
                }
                FocusedPane::Symbols => {
                    self.symbols_scroll = self.symbols_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Input => self.recall_next(),
                FocusedPane::History => {
                    self.history_scroll = self.history_scroll.saturating_add(1);
                }
                FocusedPane::Symbols => {
                    self.symbols_scroll = self.symbols_scroll.saturating_add(1);
                }
            },
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.input_len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.input_len(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.input.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.input_len() {
                    let at = self.byte_index(self.cursor);
                    self.input.remove(at);
                }
            }
            KeyCode::Char(c) if !ctrl => {
                let at = self.byte_index(self.cursor);
                self.input.insert(at, c);
                self.cursor += 1;
                self.focused_pane = FocusedPane::Input;
            }
            _ => {}
        }
    }

    /// Evaluate the input line and clear it
    fn submit(&mut self) {
        if self.input.trim().is_empty() {
            return;
        }

        let line = std::mem::take(&mut self.input);
        self.cursor = 0;
        self.recall = None;

        let result = if self.rpn_mode {
            self.session.run_rpn(&line)
        } else {
            self.session.run(&line)
        };

        match result {
            Ok(value) => {
                self.status_message = format!("{} = {}", line.trim(), value);
                self.status_is_error = false;
            }
            Err(err) => {
                self.status_message = match err.position() {
                    Some(position) => format!("Error at position {}", position),
                    None => "Error".to_string(),
                };
                self.status_is_error = true;
            }
        }

        // Follow the newest entry
        self.history_scroll = usize::MAX;
    }

    fn recall_previous(&mut self) {
        let len = self.session.history().len();
        if len == 0 {
            return;
        }
        let index = match self.recall {
            Some(index) => index.saturating_sub(1),
            None => len - 1,
        };
        self.load_recalled(index);
    }

    fn recall_next(&mut self) {
        let Some(index) = self.recall else {
            return;
        };
        if index + 1 < self.session.history().len() {
            self.load_recalled(index + 1);
        } else {
            self.recall = None;
            self.input.clear();
            self.cursor = 0;
        }
    }

    fn load_recalled(&mut self, index: usize) {
        if let Some(entry) = self.session.history().get(index) {
            self.input = entry.input.clone();
            self.cursor = self.input_len();
            self.recall = Some(index);
        }
    }

    fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.input
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_line(app: &mut App, line: &str) {
        for c in line.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_enter_evaluates_and_clears() {
        let mut app = App::new(Session::new(), false);
        type_line(&mut app, "a = 2 * 21");
        press(&mut app, KeyCode::Enter);

        assert!(app.input.is_empty());
        assert_eq!(app.cursor, 0);
        assert_eq!(app.session.value_of("a"), Some(42));
        assert_eq!(app.status_message, "a = 2 * 21 = 42");
        assert!(!app.status_is_error);
    }

    #[test]
    fn test_syntax_error_sets_status() {
        let mut app = App::new(Session::new(), false);
        type_line(&mut app, "1 +");
        press(&mut app, KeyCode::Enter);

        assert!(app.status_is_error);
        assert_eq!(app.status_message, "Error at position 3");
    }

    #[test]
    fn test_cursor_editing() {
        let mut app = App::new(Session::new(), false);
        type_line(&mut app, "1+3");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Backspace);
        type_line(&mut app, "*");
        assert_eq!(app.input, "1*3");

        press(&mut app, KeyCode::Home);
        type_line(&mut app, "x=");
        press(&mut app, KeyCode::End);
        assert_eq!(app.input, "x=1*3");
        assert_eq!(app.cursor, 5);
    }

    #[test]
    fn test_recall_previous_inputs() {
        let mut app = App::new(Session::new(), false);
        type_line(&mut app, "1");
        press(&mut app, KeyCode::Enter);
        type_line(&mut app, "2");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.input, "2");
        press(&mut app, KeyCode::Up);
        assert_eq!(app.input, "1");
        press(&mut app, KeyCode::Down);
        assert_eq!(app.input, "2");
        press(&mut app, KeyCode::Down);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_rpn_mode_and_quit() {
        let mut app = App::new(Session::new(), false);
        app.handle_key_event(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(app.rpn_mode);

        type_line(&mut app, "3 4 +");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.status_message, "3 4 + = 7");

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::History);

        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
