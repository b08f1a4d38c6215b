use crate::span::Span;
use crate::{Symbol, SymbolKind};

pub mod traits {
    /// The trait for a lexical token.
    pub trait Token: Clone {
        /// The key the parse table is looked up with.
        fn term_key(&self) -> super::TermKey<'_>;
    }
}

/// Lexical classification of a token.
///
/// `Number` carries a decimal point, `Integer` does not; the grammar
/// treats them as distinct terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    ReservedWord,
    Identifier,
    Number,
    Integer,
    StringLiteral,
    Symbol,
    Preprocessor,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::ReservedWord => "reservedword",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::Integer => "integer",
            TokenKind::StringLiteral => "string",
            TokenKind::Symbol => "symbol",
            TokenKind::Preprocessor => "preprocessor",
        };
        f.write_str(name)
    }
}

/// The canonical terminal key of a token, resolved once after lexing.
///
/// Reserved words, punctuation and preprocessor directives are keyed by
/// their lexeme; value-carrying tokens are keyed by their kind name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKey<'a> {
    Kind(&'static str),
    Literal(&'a str),
}

impl<'a> TermKey<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            TermKey::Kind(id) => id,
            TermKey::Literal(id) => id,
        }
    }

    /// A generic numeric terminal in expression position accepts integer
    /// tokens as well; the lookup retries under this id on a miss.
    pub fn fallback_id(&self) -> Option<&'static str> {
        match self {
            TermKey::Kind("integer") => Some("number"),
            _ => None,
        }
    }

    /// Check whether a grammar terminal accepts this key.
    pub fn matches(&self, sym: &Symbol<'_>) -> bool {
        match (self, sym.kind()) {
            (TermKey::Literal(lexeme), SymbolKind::Literal) => sym.id == *lexeme,
            (TermKey::Kind(kind), SymbolKind::TokenKind) => {
                sym.id == *kind || Some(sym.id) == self.fallback_id()
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for TermKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new<S>(kind: TokenKind, lexeme: S, span: Span) -> Self
    where
        S: ToString,
    {
        Self {
            kind,
            lexeme: lexeme.to_string(),
            span,
        }
    }

    /// The line the token starts on.
    pub fn line(&self) -> usize {
        self.span.line()
    }
}

impl traits::Token for Token {
    fn term_key(&self) -> TermKey<'_> {
        match self.kind {
            TokenKind::ReservedWord | TokenKind::Symbol | TokenKind::Preprocessor => {
                TermKey::Literal(&self.lexeme)
            }
            TokenKind::Identifier => TermKey::Kind("identifier"),
            TokenKind::Number => TermKey::Kind("number"),
            TokenKind::Integer => TermKey::Kind("integer"),
            TokenKind::StringLiteral => TermKey::Kind("string"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{traits::Token as _, TermKey, Token, TokenKind};
    use crate::{Span, Symbol};

    #[test]
    fn test_001_term_keys() {
        let tok = Token::new(TokenKind::ReservedWord, "while", Span::default());
        assert_eq!(tok.term_key(), TermKey::Literal("while"));

        let tok = Token::new(TokenKind::Integer, "42", Span::default());
        assert_eq!(tok.term_key(), TermKey::Kind("integer"));
    }

    #[test]
    fn test_002_integer_matches_generic_number() {
        let tok = Token::new(TokenKind::Integer, "42", Span::default());
        assert!(tok.term_key().matches(&Symbol::kind_term("integer")));
        assert!(tok.term_key().matches(&Symbol::kind_term("number")));

        let tok = Token::new(TokenKind::Number, "3.14", Span::default());
        assert!(tok.term_key().matches(&Symbol::kind_term("number")));
        assert!(!tok.term_key().matches(&Symbol::kind_term("integer")));
    }
}
