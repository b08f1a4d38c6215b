use itertools::Itertools as _;
use thiserror::Error;

use crate::Span;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedSymbols(Vec<String>);

impl ExpectedSymbols {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl std::fmt::Display for ExpectedSymbols {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().join(", ").fmt(f)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// The lexemes consumed right before a parse failure.
///
/// The predictive parser performs no recovery, so this is the only
/// approximation of a source location besides the span.
pub struct RecentTokens(Vec<String>);

impl std::fmt::Display for RecentTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().join(" ").fmt(f)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("unrecognized character {character:?} at position {position}")]
    UnrecognizedCharacter { character: char, position: usize },

    #[error("unexpected token {got}, expecting one of: {expecting} (after \"{recent}\")")]
    UnexpectedToken {
        got: String,
        expecting: ExpectedSymbols,
        recent: RecentTokens,
    },

    #[error("type mismatch: expected a {declared} value, got a {got} literal")]
    TypeMismatch { declared: String, got: String },

    #[error("unexpected end of input, expecting one of: {expecting}")]
    UnexpectedEndOfInput { expecting: ExpectedSymbols },

    #[error("parse table conflict on ({non_terminal}, {terminal}): rules {rules:?}")]
    TableConflict {
        non_terminal: String,
        terminal: String,
        rules: [usize; 2],
    },

    #[error("unknown symbol {0}")]
    UnknownSymbol(String),
}

impl ErrorKind {
    pub fn unexpected_token<I, S>(got: &str, expecting: I, recent: &[String]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self::UnexpectedToken {
            got: got.to_string(),
            expecting: ExpectedSymbols(expecting.into_iter().map(|s| s.to_string()).collect()),
            recent: RecentTokens(recent.to_vec()),
        }
    }

    pub fn unexpected_end_of_input<I, S>(expecting: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self::UnexpectedEndOfInput {
            expecting: ExpectedSymbols(expecting.into_iter().map(|s| s.to_string()).collect()),
        }
    }

    pub fn unknown_symbol(got: &str) -> Self {
        Self::UnknownSymbol(got.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// Kind of error
    kind: ErrorKind,
    /// Location of the error in the stream.
    pub(crate) span: Option<Span>,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.span {
            Some(span) => write!(f, "{} ({})", self.kind, span),
            None => self.kind.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(kind: impl Into<ErrorKind>, span: Option<Span>) -> Self {
        Self {
            kind: kind.into(),
            span,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, span: None }
    }
}
