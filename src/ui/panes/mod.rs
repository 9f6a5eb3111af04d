//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`history`]: evaluated lines with their postfix form and result
//! - [`symbols`]: every slot of the symbol table with home-slot markers
//! - [`input`]: the line being edited
//! - [`status`]: status bar with keybindings and the current mode
//!
//! Each pane module exports a primary `render_*` function. Panes that build
//! their text separately (`history_lines`, `symbol_lines`) keep that part
//! free of the frame so it can be tested directly.

pub mod history;
pub mod input;
pub mod status;
pub mod symbols;

pub use history::{history_lines, render_history_pane};
pub use input::render_input_pane;
pub use status::render_status_bar;
pub use symbols::{render_symbols_pane, symbol_lines};
