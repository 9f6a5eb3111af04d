//! Lexical scanner for expression lines
//!
//! Tokens are recognised by a hand-built deterministic finite automaton
//! ([`State`]) using maximal munch: the scanner feeds characters through
//! [`State::next`] until the automaton errors or the line ends, then emits
//! the token for the *last* accepting state it passed through and resumes
//! right after that token.
//!
//! Whitespace is a self-loop on [`State::Start`]; it moves the token start
//! forward without producing anything. If no accepting state is reached, the
//! rest of the line becomes a single [`Token::Error`].

use std::fmt;
use tracing::trace;

/// Operator tokens of the expression language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,         // +
    Minus,        // -
    Times,        // *
    Divide,       // /
    Modulo,       // %
    PlusPlus,     // ++
    MinusMinus,   // --
    Assign,       // =
    PlusAssign,   // +=
    MinusAssign,  // -=
    TimesAssign,  // *=
    DivideAssign, // /=
    ModuloAssign, // %=
}

impl Operator {
    /// Source text of the operator
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Times => "*",
            Operator::Divide => "/",
            Operator::Modulo => "%",
            Operator::PlusPlus => "++",
            Operator::MinusMinus => "--",
            Operator::Assign => "=",
            Operator::PlusAssign => "+=",
            Operator::MinusAssign => "-=",
            Operator::TimesAssign => "*=",
            Operator::DivideAssign => "/=",
            Operator::ModuloAssign => "%=",
        }
    }
}

/// All token variants produced by the scanner.
///
/// Tokens carry no position; [`Scanner::position`] reports where the most
/// recent token started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Number(i32),
    Identifier(String),
    Operator(Operator),
    OpenParen,
    CloseParen,
    /// Sentinel for exhausted input
    End,
    /// Unrecognised text, up to the end of the line
    Error(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {}", n),
            Token::Identifier(name) => write!(f, "identifier '{}'", name),
            Token::Operator(op) => write!(f, "'{}'", op.symbol()),
            Token::OpenParen => write!(f, "'('"),
            Token::CloseParen => write!(f, "')'"),
            Token::End => write!(f, "end of input"),
            Token::Error(text) => write!(f, "unrecognized input '{}'", text),
        }
    }
}

/// States of the token automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Start,
    Identifier,
    /// Underscore inside an identifier; must be followed by a letter or digit
    Underscore,
    Number,
    OpenParen,
    CloseParen,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Equal,
    PlusPlus,
    MinusMinus,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    Error,
}

impl State {
    /// Transition function
    pub fn next(self, c: char) -> State {
        match (self, c) {
            (State::Start, '(') => State::OpenParen,
            (State::Start, ')') => State::CloseParen,
            (State::Start, '+') => State::Plus,
            (State::Start, '-') => State::Minus,
            (State::Start, '*') => State::Star,
            (State::Start, '/') => State::Slash,
            (State::Start, '%') => State::Percent,
            (State::Start, '=') => State::Equal,
            (State::Start, c) if c.is_whitespace() => State::Start,
            (State::Start, c) if c.is_alphabetic() => State::Identifier,
            (State::Start, c) if c.is_ascii_digit() => State::Number,

            (State::Identifier | State::Underscore, c)
                if c.is_alphabetic() || c.is_ascii_digit() =>
            {
                State::Identifier
            }
            (State::Identifier, '_') => State::Underscore,

            (State::Number, c) if c.is_ascii_digit() => State::Number,

            (State::Plus, '+') => State::PlusPlus,
            (State::Plus, '=') => State::PlusEqual,
            (State::Minus, '-') => State::MinusMinus,
            (State::Minus, '=') => State::MinusEqual,
            (State::Star, '=') => State::StarEqual,
            (State::Slash, '=') => State::SlashEqual,
            (State::Percent, '=') => State::PercentEqual,

            _ => State::Error,
        }
    }

    /// Whether a token may end in this state
    pub fn accepting(self) -> bool {
        !matches!(self, State::Start | State::Underscore | State::Error)
    }

    /// Token for an accepted lexeme, or `None` for non-accepting states.
    fn token(self, lexeme: &str) -> Option<Token> {
        let token = match self {
            State::Identifier => Token::Identifier(lexeme.to_string()),
            // Literals that overflow i32 are reported as unrecognised input
            State::Number => match lexeme.parse::<i32>() {
                Ok(n) => Token::Number(n),
                Err(_) => return None,
            },
            State::OpenParen => Token::OpenParen,
            State::CloseParen => Token::CloseParen,
            State::Plus => Token::Operator(Operator::Plus),
            State::Minus => Token::Operator(Operator::Minus),
            State::Star => Token::Operator(Operator::Times),
            State::Slash => Token::Operator(Operator::Divide),
            State::Percent => Token::Operator(Operator::Modulo),
            State::Equal => Token::Operator(Operator::Assign),
            State::PlusPlus => Token::Operator(Operator::PlusPlus),
            State::MinusMinus => Token::Operator(Operator::MinusMinus),
            State::PlusEqual => Token::Operator(Operator::PlusAssign),
            State::MinusEqual => Token::Operator(Operator::MinusAssign),
            State::StarEqual => Token::Operator(Operator::TimesAssign),
            State::SlashEqual => Token::Operator(Operator::DivideAssign),
            State::PercentEqual => Token::Operator(Operator::ModuloAssign),
            State::Start | State::Underscore | State::Error => return None,
        };
        Some(token)
    }
}

/// Scanner over a single line of input.
///
/// Yields tokens lazily through [`Iterator`]; the parser substitutes
/// [`Token::End`] once the iterator is exhausted.
pub struct Scanner {
    input: Vec<char>,
    /// Offset where the next token scan begins
    start: usize,
    /// Offset of the most recently returned token (line length once exhausted)
    position: usize,
}

impl Scanner {
    pub fn new(line: &str) -> Self {
        Self {
            input: line.chars().collect(),
            start: 0,
            position: 0,
        }
    }

    /// Character offset at which the last token started.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether any token remains; trailing whitespace does not count.
    pub fn has_next(&self) -> bool {
        self.input[self.start..].iter().any(|c| !c.is_whitespace())
    }

    /// Scan one token starting at `self.start`.
    fn scan(&mut self) -> Option<Token> {
        let mut state = State::Start;
        let mut last_accepting: Option<(State, usize)> = None;

        for i in self.start..self.input.len() {
            state = state.next(self.input[i]);
            match state {
                State::Error => break,
                State::Start => self.start = i + 1,
                s if s.accepting() => last_accepting = Some((s, i + 1)),
                _ => {}
            }
        }

        if self.start >= self.input.len() {
            self.position = self.input.len();
            return None;
        }

        self.position = self.start;
        let accepted = last_accepting.and_then(|(state, end)| {
            let lexeme: String = self.input[self.start..end].iter().collect();
            state.token(&lexeme).map(|token| (token, end))
        });

        let token = match accepted {
            Some((token, end)) => {
                self.start = end;
                token
            }
            None => {
                let rest: String = self.input[self.start..].iter().collect();
                self.start = self.input.len();
                Token::Error(rest)
            }
        };

        trace!(position = self.position, token = %token, "scanned token");
        Some(token)
    }
}

impl Iterator for Scanner {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.scan()
    }
}

/// Scan a whole line into tokens, ending with [`Token::End`].
pub fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Scanner::new(line).collect();
    tokens.push(Token::End);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(operator: Operator) -> Token {
        Token::Operator(operator)
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("x = (y + 42)");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("x".to_string()),
                op(Operator::Assign),
                Token::OpenParen,
                Token::Identifier("y".to_string()),
                op(Operator::Plus),
                Token::Number(42),
                Token::CloseParen,
                Token::End,
            ]
        );
    }

    #[test]
    fn test_operators() {
        let tokens = tokenize("+ - * / % ++ -- = += -= *= /= %=");
        assert_eq!(
            tokens,
            vec![
                op(Operator::Plus),
                op(Operator::Minus),
                op(Operator::Times),
                op(Operator::Divide),
                op(Operator::Modulo),
                op(Operator::PlusPlus),
                op(Operator::MinusMinus),
                op(Operator::Assign),
                op(Operator::PlusAssign),
                op(Operator::MinusAssign),
                op(Operator::TimesAssign),
                op(Operator::DivideAssign),
                op(Operator::ModuloAssign),
                Token::End,
            ]
        );
    }

    #[test]
    fn test_maximal_munch() {
        // "+++" is "++" then "+"; "+=" wins over "+" followed by "="
        let tokens = tokenize("a+++b+=c");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("a".to_string()),
                op(Operator::PlusPlus),
                op(Operator::Plus),
                Token::Identifier("b".to_string()),
                op(Operator::PlusAssign),
                Token::Identifier("c".to_string()),
                Token::End,
            ]
        );
    }

    #[test]
    fn test_no_space_needed_between_tokens() {
        let tokens = tokenize("12ab");
        assert_eq!(
            tokens,
            vec![
                Token::Number(12),
                Token::Identifier("ab".to_string()),
                Token::End
            ]
        );
    }

    #[test]
    fn test_underscore_inside_identifier() {
        let tokens = tokenize("max_value2");
        assert_eq!(
            tokens,
            vec![Token::Identifier("max_value2".to_string()), Token::End]
        );
    }

    #[test]
    fn test_trailing_underscore_backtracks() {
        // The automaton errors on "_ " so the identifier ends before it
        let mut scanner = Scanner::new("ab_ + 1");
        assert_eq!(scanner.next(), Some(Token::Identifier("ab".to_string())));
        assert_eq!(scanner.next(), Some(Token::Error("_ + 1".to_string())));
        assert_eq!(scanner.position(), 2);
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_leading_underscore_is_error() {
        let tokens = tokenize("_x");
        assert_eq!(tokens, vec![Token::Error("_x".to_string()), Token::End]);
    }

    #[test]
    fn test_error_consumes_rest_of_line() {
        let mut scanner = Scanner::new("1 + $ 2 3");
        assert_eq!(scanner.next(), Some(Token::Number(1)));
        assert_eq!(scanner.next(), Some(op(Operator::Plus)));
        assert_eq!(scanner.next(), Some(Token::Error("$ 2 3".to_string())));
        assert_eq!(scanner.position(), 4);
        assert!(!scanner.has_next());
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_positions_track_token_starts() {
        let mut scanner = Scanner::new("  ab  +=7");
        scanner.next();
        assert_eq!(scanner.position(), 2);
        scanner.next();
        assert_eq!(scanner.position(), 6);
        scanner.next();
        assert_eq!(scanner.position(), 8);
        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.position(), 9);
    }

    #[test]
    fn test_trailing_whitespace_is_not_a_token() {
        let mut scanner = Scanner::new("x   ");
        assert_eq!(scanner.next(), Some(Token::Identifier("x".to_string())));
        assert!(!scanner.has_next());
        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.position(), 4);
    }

    #[test]
    fn test_overflowing_literal_is_error() {
        let tokens = tokenize("99999999999 + 1");
        assert_eq!(
            tokens,
            vec![Token::Error("99999999999 + 1".to_string()), Token::End]
        );
        assert_eq!(tokenize("2147483647"), vec![Token::Number(i32::MAX), Token::End]);
    }

    #[test]
    fn test_state_acceptance() {
        assert!(!State::Start.accepting());
        assert!(!State::Underscore.accepting());
        assert!(State::Identifier.accepting());
        assert!(State::PercentEqual.accepting());
        assert_eq!(State::Identifier.next('_'), State::Underscore);
        assert_eq!(State::Underscore.next('_'), State::Error);
        assert_eq!(State::Number.next('a'), State::Error);
        assert_eq!(State::Equal.next('='), State::Error);
    }

    #[test]
    fn test_empty_line() {
        let mut scanner = Scanner::new("");
        assert!(!scanner.has_next());
        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.position(), 0);
    }
}
