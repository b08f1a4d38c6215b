pub mod cpp;
pub mod error;
pub mod follow;
pub mod grammar;
pub mod lexer;
pub mod ll;
pub mod rule;
pub mod span;
pub mod symbol;
pub mod token;
pub mod tree;

pub use error::{Error, ErrorKind};
pub use grammar::{first, ConstGrammar, FirstDef, FirstDefSlice};
pub use lexer::{tokenize, Lexer};
pub use ll::{LlParser, LlTable};
pub use rule::{Rule, RuleDef, RuleId, RuleSet};
pub use span::{Cursor, Span};
pub use symbol::{Symbol, SymbolKind, EOS, EPS};
pub use token::{TermKey, Token, TokenKind};
pub use tree::{NodeId, NodeKind, ParseTree, ParseTreeNode};

pub type LlResult<T> = Result<T, Error>;

pub mod traits {
    pub use crate::grammar::traits::Grammar;
    pub use crate::rule::traits::RuleDefSlice;
    pub use crate::symbol::traits::SymbolSlice;
    pub use crate::token::traits::Token;
}
