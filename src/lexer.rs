use crate::span::{Cursor, NextColumn, NextLine, Span};
use crate::{Error, ErrorKind, LlResult, Token, TokenKind};

/// Reserved words of the supported subset, tried before the generic
/// identifier pattern.
pub const RESERVED_WORDS: &[&str] = &[
    "int",
    "float",
    "void",
    "return",
    "if",
    "while",
    "cin",
    "cout",
    "continue",
    "break",
    "include",
    "using",
    "iostream",
    "namespace",
    "std",
    "main",
];

/// Multi-character symbols, tried before single-character ones.
const TWO_CHAR_SYMBOLS: &[&str] = &["<<", ">>", "<=", ">=", "==", "!="];

const ONE_CHAR_SYMBOLS: &[char] = &[
    '|', ',', ';', '+', '-', '*', '/', '=', '!', '>', '<', '(', ')', '{', '}',
];

/// A cursor-driven lexer over the full source text.
///
/// Token patterns are attempted in a fixed priority order at the current
/// position; the first pattern matching a non-empty prefix wins. Whitespace
/// is discarded but still advances the line counter. The lexer consumes the
/// text exactly once, with no backtracking, and stops at the first
/// unrecognized character.
pub struct Lexer<'src> {
    source: &'src str,
    position: usize,
    cursor: Cursor,
    failed: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
            cursor: Cursor::default(),
            failed: false,
        }
    }

    fn rest(&self) -> &'src str {
        &self.source[self.position..]
    }

    /// Consume `len` bytes, tracking lines, and return the lexeme with its span.
    fn take(&mut self, len: usize) -> (&'src str, Span) {
        let text = &self.source[self.position..self.position + len];
        let from = self.cursor + NextColumn;

        for ch in text.chars() {
            if ch == '\n' {
                self.cursor += NextLine;
            } else {
                self.cursor += NextColumn;
            }
        }

        self.position += len;
        (text, Span::new(from, self.cursor))
    }

    fn skip_whitespace(&mut self) {
        let len = self
            .rest()
            .char_indices()
            .find(|(_, ch)| !ch.is_whitespace())
            .map(|(at, _)| at)
            .unwrap_or_else(|| self.rest().len());

        self.take(len);
    }

    fn unrecognized(&mut self, character: char) -> Error {
        self.failed = true;
        Error::new(
            ErrorKind::UnrecognizedCharacter {
                character,
                position: self.position,
            },
            Some(Span::from(self.cursor + NextColumn)),
        )
    }

    /// `#` followed by a directive word, e.g. `#include`.
    fn lex_preprocessor(&mut self) -> LlResult<Token> {
        let word_len = self
            .rest()
            .chars()
            .skip(1)
            .take_while(|ch| ch.is_ascii_alphabetic())
            .count();

        if word_len == 0 {
            return Err(self.unrecognized('#'));
        }

        let (lexeme, span) = self.take(1 + word_len);
        Ok(Token::new(TokenKind::Preprocessor, lexeme, span))
    }

    /// A reserved word or an identifier; the whole word is consumed first so
    /// that a continuation letter defeats the reserved match (`intx` lexes as
    /// one identifier).
    fn lex_word(&mut self) -> Token {
        let len = self
            .rest()
            .chars()
            .take_while(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
            .count();

        let (lexeme, span) = self.take(len);
        let kind = if RESERVED_WORDS.contains(&lexeme) {
            TokenKind::ReservedWord
        } else {
            TokenKind::Identifier
        };

        Token::new(kind, lexeme, span)
    }

    /// Digits with an optional fractional part; a decimal point makes the
    /// token a `number`, otherwise it is an `integer`.
    fn lex_number(&mut self) -> Token {
        let digits = |s: &str| s.chars().take_while(char::is_ascii_digit).count();

        let mut len = digits(self.rest());
        let mut kind = TokenKind::Integer;

        let after = &self.rest()[len..];
        if after.starts_with('.') {
            let fraction = digits(&after[1..]);
            if fraction > 0 {
                len += 1 + fraction;
                kind = TokenKind::Number;
            }
        }

        let (lexeme, span) = self.take(len);
        Token::new(kind, lexeme, span)
    }

    /// A string literal delimited by a single or double quote, running
    /// non-greedily to the next matching quote.
    fn lex_string(&mut self, quote: char) -> LlResult<Token> {
        match self.rest()[quote.len_utf8()..].find(quote) {
            Some(at) => {
                let (lexeme, span) = self.take(quote.len_utf8() * 2 + at);
                Ok(Token::new(TokenKind::StringLiteral, lexeme, span))
            }
            None => Err(self.unrecognized(quote)),
        }
    }

    fn lex_symbol(&mut self, ch: char) -> LlResult<Token> {
        if let Some(sym) = TWO_CHAR_SYMBOLS
            .iter()
            .find(|sym| self.rest().starts_with(**sym))
        {
            let (lexeme, span) = self.take(sym.len());
            return Ok(Token::new(TokenKind::Symbol, lexeme, span));
        }

        if ONE_CHAR_SYMBOLS.contains(&ch) {
            let (lexeme, span) = self.take(ch.len_utf8());
            return Ok(Token::new(TokenKind::Symbol, lexeme, span));
        }

        Err(self.unrecognized(ch))
    }
}

impl Iterator for Lexer<'_> {
    type Item = LlResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        self.skip_whitespace();

        let ch = self.rest().chars().next()?;

        let token = match ch {
            '#' => self.lex_preprocessor(),
            _ if ch.is_ascii_alphabetic() || ch == '_' => Ok(self.lex_word()),
            _ if ch.is_ascii_digit() => Ok(self.lex_number()),
            '\'' | '"' => self.lex_string(ch),
            _ => self.lex_symbol(ch),
        };

        Some(token)
    }
}

/// Tokenize the whole source text, failing on the first unrecognized
/// character.
pub fn tokenize(source: &str) -> LlResult<Vec<Token>> {
    Lexer::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::{tokenize, Lexer};
    use crate::{ErrorKind, TokenKind};

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_001_declaration() {
        let tokens = tokenize("int y = 5;").unwrap();

        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["int", "y", "=", "5", ";"]);

        assert_eq!(
            kinds("int y = 5;"),
            vec![
                TokenKind::ReservedWord,
                TokenKind::Identifier,
                TokenKind::Symbol,
                TokenKind::Integer,
                TokenKind::Symbol,
            ]
        );
    }

    #[test]
    fn test_002_reserved_words_before_identifiers() {
        assert_eq!(kinds("while"), vec![TokenKind::ReservedWord]);
        assert_eq!(kinds("whilex"), vec![TokenKind::Identifier]);
        assert_eq!(kinds("intx"), vec![TokenKind::Identifier]);
    }

    #[test]
    fn test_003_number_vs_integer() {
        assert_eq!(kinds("3.14"), vec![TokenKind::Number]);
        assert_eq!(kinds("42"), vec![TokenKind::Integer]);
        // A trailing dot is not a fraction.
        assert_eq!(
            kinds("42."),
            vec![TokenKind::Integer, TokenKind::Symbol]
        );
    }

    #[test]
    fn test_004_multi_char_symbols_first() {
        let tokens = tokenize("cout << x >> y <= z").unwrap();
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["cout", "<<", "x", ">>", "y", "<=", "z"]);
    }

    #[test]
    fn test_005_string_literals() {
        let tokens = tokenize(r#"x = "hello"; y = 'w';"#).unwrap();
        assert_eq!(tokens[2].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[2].lexeme, "\"hello\"");
        assert_eq!(tokens[6].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[6].lexeme, "'w'");
    }

    #[test]
    fn test_006_preprocessor() {
        let tokens = tokenize("#include <iostream>").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Preprocessor);
        assert_eq!(tokens[0].lexeme, "#include");
    }

    #[test]
    fn test_007_line_tracking() {
        let tokens = tokenize("int x;\nfloat y;\n\nreturn").unwrap();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line()).collect();
        assert_eq!(lines, vec![1, 1, 1, 2, 2, 2, 4]);
    }

    #[test]
    fn test_008_unrecognized_character() {
        let err = tokenize("int x @ y;").unwrap_err();
        assert_eq!(
            *err.kind(),
            ErrorKind::UnrecognizedCharacter {
                character: '@',
                position: 6
            }
        );
        assert_eq!(err.span().unwrap().line(), 1);
    }

    #[test]
    fn test_009_fatal_after_error() {
        let mut lexer = Lexer::new("@ int");
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_010_unterminated_string() {
        let err = tokenize("x = \"oops").unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::UnrecognizedCharacter { character: '"', .. }
        ));
    }
}
