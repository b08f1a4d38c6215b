use std::hash::Hash;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SymbolKind {
    /// A terminal matched against the token's lexeme (keywords, punctuation).
    Literal,
    /// A terminal matched against the token's classified kind
    /// (`identifier`, `number`, `integer`, `string`).
    TokenKind,
    NonTerminal,
    Eos,
    Epsilon,
}

pub const EOS: &str = "<eos>";
pub const EPS: &str = "<eps>";

/// Defines a grammar vocabulary element.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct Symbol<'sid> {
    /// *Unique* identifier of the symbol
    pub id: &'sid str,
    kind: SymbolKind,
}

impl std::fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<'sid> Symbol<'sid> {
    /// Creates a literal terminal symbol, matched against token lexemes.
    pub const fn term(id: &'sid str) -> Self {
        Self {
            id,
            kind: SymbolKind::Literal,
        }
    }

    /// Creates a generic terminal symbol, matched against token kinds.
    pub const fn kind_term(id: &'sid str) -> Self {
        Self {
            id,
            kind: SymbolKind::TokenKind,
        }
    }

    /// Creates a non-terminal symbol.
    pub const fn nterm(id: &'sid str) -> Self {
        Self {
            id,
            kind: SymbolKind::NonTerminal,
        }
    }

    /// Creates the end-of-input sentinel ($, or <eos>)
    pub const fn eos() -> Self {
        Self {
            id: EOS,
            kind: SymbolKind::Eos,
        }
    }

    /// Creates the epsilon symbol (ε)
    ///
    /// This is used for empty rules such as A -> ε ;
    pub const fn epsilon() -> Self {
        Self {
            id: EPS,
            kind: SymbolKind::Epsilon,
        }
    }

    #[inline(always)]
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    #[inline(always)]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            SymbolKind::Literal | SymbolKind::TokenKind | SymbolKind::Eos | SymbolKind::Epsilon
        )
    }

    #[inline(always)]
    pub fn is_eos(&self) -> bool {
        matches!(self.kind, SymbolKind::Eos)
    }

    #[inline(always)]
    pub fn is_epsilon(&self) -> bool {
        matches!(self.kind, SymbolKind::Epsilon)
    }
}

impl Hash for Symbol<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

pub mod traits {
    use crate::{Error, ErrorKind, LlResult, Symbol};

    /// A trait to implement common methods for objects holding symbols.
    pub trait SymbolSlice<'sid>: AsRef<[Symbol<'sid>]> {
        fn as_symbol_slice(&self) -> &[Symbol<'sid>] {
            self.as_ref()
        }

        /// Fetch a symbol by its identifier.
        ///
        /// # Panics
        /// Panics if the grammar does not include the symbol.
        fn sym(&self, id: &str) -> Symbol<'sid> {
            self.try_sym(id)
                .unwrap_or_else(|_| panic!("the grammar does not include symbol {}", id))
        }

        fn try_sym(&self, id: &str) -> LlResult<Symbol<'sid>> {
            self.as_symbol_slice()
                .iter()
                .find(|sym| sym.id == id)
                .copied()
                .ok_or_else(|| Error::from(ErrorKind::unknown_symbol(id)))
        }

        fn eos(&self) -> Symbol<'sid> {
            self.as_symbol_slice()
                .iter()
                .find(|sym| sym.is_eos())
                .copied()
                .expect("the grammar does not include the <eos> terminal")
        }

        fn epsilon(&self) -> Symbol<'sid> {
            self.as_symbol_slice()
                .iter()
                .find(|sym| sym.is_epsilon())
                .copied()
                .expect("the grammar does not include the <eps> terminal")
        }

        fn iter_terminals<'a>(&'a self) -> impl Iterator<Item = Symbol<'sid>> + 'a
        where
            'sid: 'a,
        {
            self.as_symbol_slice()
                .iter()
                .filter(|sym| sym.is_terminal() && !sym.is_epsilon())
                .copied()
        }

        fn iter_non_terminals<'a>(&'a self) -> impl Iterator<Item = Symbol<'sid>> + 'a
        where
            'sid: 'a,
        {
            self.as_symbol_slice()
                .iter()
                .filter(|sym| !sym.is_terminal())
                .copied()
        }
    }

    impl<'sid, T> SymbolSlice<'sid> for T where T: AsRef<[Symbol<'sid>]> {}
}
