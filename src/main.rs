// exprtree: integer expression REPL with a live symbol-table view

use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, Level};

use exprtree::interpreter::engine::Session;
use exprtree::interpreter::errors::SessionError;
use exprtree::memory::commands::{Command, StringTable};
use exprtree::parser::lexer::tokenize;
use exprtree::parser::{ParseError, ParseOptions, PostfixMode, DEFAULT_MAX_DEPTH};
use exprtree::snapshot::DEFAULT_MAX_ENTRIES;
use exprtree::ui::App;

/// Evaluate integer expressions over a table of variables.
///
/// With no flags, starts a terminal UI showing the history of evaluated
/// lines next to every slot of the symbol table.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluate one expression, print the result and exit.
    #[arg(short, long)]
    expr: Option<String>,

    /// Read lines from standard input instead of starting the terminal UI.
    #[arg(long)]
    plain: bool,

    /// Treat input as space-separated postfix notation.
    #[arg(long)]
    rpn: bool,

    /// What `x++` and `x--` do.
    #[arg(long, value_enum, default_value_t = Postfix::Discard)]
    postfix: Postfix,

    /// Maximum nesting depth of parentheses and operator chains.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Number of evaluated lines kept in the history.
    #[arg(long, default_value_t = DEFAULT_MAX_ENTRIES)]
    history: usize,

    /// Print the scanner's tokens for each line instead of evaluating it.
    #[arg(long, conflicts_with_all = ["rpn", "table"])]
    tokens: bool,

    /// Start a command console over a bare hash table.
    #[arg(long)]
    table: bool,

    /// Log to stderr; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Postfix {
    /// Check the operand is a variable, then ignore the operator.
    Discard,
    /// Increment or decrement after reading the value.
    Apply,
}

impl From<Postfix> for PostfixMode {
    fn from(postfix: Postfix) -> Self {
        match postfix {
            Postfix::Discard => PostfixMode::Discard,
            Postfix::Apply => PostfixMode::Apply,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let options = ParseOptions {
        postfix: args.postfix.into(),
        max_depth: args.max_depth,
    };
    info!(?options, rpn = args.rpn, "starting");

    if args.table {
        return table_console();
    }

    if args.tokens {
        return token_dump(args.expr.as_deref());
    }

    let mut session = Session::with_options(options, args.history);

    if let Some(expr) = &args.expr {
        match run_line(&mut session, expr, args.rpn) {
            Ok(value) => println!("{}", value),
            Err(err) => {
                report(&err);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    if args.plain {
        return plain_repl(&mut session, args.rpn);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, args.rpn);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_line(session: &mut Session, line: &str, rpn: bool) -> Result<i32, SessionError> {
    if rpn {
        session.run_rpn(line)
    } else {
        session.run(line)
    }
}

fn report(err: &SessionError) {
    match err {
        SessionError::Parse(ParseError::Syntax { message, position }) => {
            println!("Error at position {}: {}", position, message)
        }
        other => println!("Error: {}", other),
    }
}

/// Prompt, read a line, evaluate, until an empty line or end of input
fn plain_repl(session: &mut Session, rpn: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Expression: ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if line.is_empty() {
            break;
        }

        match run_line(session, &line, rpn) {
            Ok(value) => println!("{}", value),
            Err(err) => report(&err),
        }
    }

    Ok(())
}

/// Print the tokens of `expr`, or of every stdin line when it is absent
fn token_dump(expr: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let print_tokens = |line: &str| {
        for token in tokenize(line) {
            println!("{}", token);
        }
    };

    if let Some(expr) = expr {
        print_tokens(expr);
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.is_empty() {
            break;
        }
        print_tokens(&line);
    }
    Ok(())
}

fn table_console() -> Result<(), Box<dyn std::error::Error>> {
    let mut table = StringTable::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Command: ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };

        match Command::parse(line.trim()) {
            Ok(Command::Exit) => break,
            Ok(command) => {
                for output in command.apply(&mut table) {
                    println!("{}", output);
                }
            }
            Err(err) => println!("{}", err),
        }
    }

    Ok(())
}
