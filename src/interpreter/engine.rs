// Evaluation session: one symbol table shared by every line

use crate::interpreter::errors::SessionError;
use crate::interpreter::rpn;
use crate::memory::SymbolTable;
use crate::parser::ast::Node;
use crate::parser::parse::{parse_with, ParseOptions};
use crate::snapshot::{Entry, Outcome, Transcript, DEFAULT_MAX_ENTRIES};
use tracing::{debug, info};

/// A REPL session
///
/// Lines are independent trees, but their effects on the symbol table
/// persist until the session is dropped. A line that fails keeps whatever
/// assignments it made before the failure, along with everything earlier.
#[derive(Debug)]
pub struct Session {
    /// Variables assigned so far
    symbols: SymbolTable,

    /// Parser behavior for infix lines
    options: ParseOptions,

    /// Every line run so far, bounded
    transcript: Transcript,
}

impl Session {
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default(), DEFAULT_MAX_ENTRIES)
    }

    pub fn with_options(options: ParseOptions, max_entries: usize) -> Self {
        Session {
            symbols: SymbolTable::new(),
            options,
            transcript: Transcript::new(max_entries),
        }
    }

    /// Parse and evaluate one infix line
    pub fn run(&mut self, line: &str) -> Result<i32, SessionError> {
        let tree = match parse_with(line, self.options) {
            Ok(tree) => tree,
            Err(err) => return Err(self.record(line, None, err.into())),
        };
        self.evaluate_tree(line, tree)
    }

    /// Evaluate one line of postfix notation
    pub fn run_rpn(&mut self, line: &str) -> Result<i32, SessionError> {
        let tree = match rpn::build_with_depth(line, self.options.max_depth) {
            Ok(tree) => tree,
            Err(err) => return Err(self.record(line, None, err.into())),
        };
        self.evaluate_tree(line, tree)
    }

    fn evaluate_tree(&mut self, line: &str, tree: Node) -> Result<i32, SessionError> {
        let postfix = tree.format();
        match tree.evaluate(&mut self.symbols) {
            Ok(value) => {
                info!(input = line, value, "evaluated");
                self.transcript.push(Entry {
                    input: line.to_string(),
                    rpn: Some(postfix),
                    outcome: Outcome::Value(value),
                });
                Ok(value)
            }
            Err(err) => Err(self.record(line, Some(postfix), err.into())),
        }
    }

    /// Log and store a failed line, handing the error back
    fn record(&mut self, line: &str, rpn: Option<String>, err: SessionError) -> SessionError {
        debug!(input = line, error = %err, "line failed");
        self.transcript.push(Entry {
            input: line.to_string(),
            rpn,
            outcome: Outcome::Failure {
                message: err.to_string(),
                position: err.position(),
            },
        });
        err
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn history(&self) -> &Transcript {
        &self.transcript
    }

    /// Look up a variable's current value
    pub fn value_of(&self, name: &str) -> Option<i32> {
        self.symbols.find(name).copied()
    }

    /// Forget every variable; the transcript is kept
    pub fn reset(&mut self) {
        self.symbols.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
