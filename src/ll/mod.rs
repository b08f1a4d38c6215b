use crate::grammar::traits::Grammar;
use crate::symbol::traits::SymbolSlice as _;
use crate::token::traits::Token as _;
use crate::tree::{NodeId, ParseTree};
use crate::{Error, ErrorKind, LlResult, RuleSet, Symbol, Token, TokenKind, EOS};

mod table;

pub use table::*;

/// How many consumed lexemes are kept around for error messages.
const RECENT_WINDOW: usize = 5;

/// One entry of the parse stack: the expected symbol together with the
/// tree node it will populate. A single stack of frames keeps the symbol
/// and its node in lockstep by construction.
#[derive(Debug, Clone, Copy)]
struct Frame<'sid> {
    symbol: Symbol<'sid>,
    node: NodeId,
}

/// The predictive LL(1) parser.
///
/// Drives an explicit stack of [Frame]s against the token sequence and the
/// parse table, building the concrete parse tree as it expands. The first
/// mismatch aborts the parse; there is no recovery or resynchronization.
pub struct LlParser<'sid, 'sym, 'table> {
    rules: RuleSet<'sid, 'sym>,
    table: &'table LlTable<'sid, 'sym>,
}

impl<'sid, 'sym, 'table> LlParser<'sid, 'sym, 'table> {
    pub fn new<G>(grammar: &'sym G, table: &'table LlTable<'sid, 'sym>) -> Self
    where
        G: Grammar<'sid>,
    {
        Self {
            rules: RuleSet::new(grammar),
            table,
        }
    }

    pub fn parse(&self, tokens: &[Token]) -> LlResult<ParseTree<'sid>> {
        let mut tree = ParseTree::new(self.rules.start());
        let root = tree.root();

        let mut stack = vec![
            Frame {
                symbol: self.rules.eos(),
                node: root,
            },
            Frame {
                symbol: self.rules.start(),
                node: root,
            },
        ];

        let mut cursor = 0usize;
        let mut recent: Vec<String> = vec![];

        while let Some(frame) = stack.pop() {
            if frame.symbol.is_eos() {
                break;
            }

            // Match: a terminal on top of the stack must equal the
            // lookahead's key.
            if frame.symbol.is_terminal() {
                let token = tokens.get(cursor).ok_or_else(|| {
                    Error::from(ErrorKind::unexpected_end_of_input([frame.symbol.id]))
                })?;

                if !token.term_key().matches(&frame.symbol) {
                    return Err(self.mismatch(token, vec![frame.symbol.id], &recent));
                }

                tree.set_lexeme(frame.node, &token.lexeme);
                remember(&mut recent, token);
                cursor += 1;
                continue;
            }

            // Expand: choose the rule the table holds for the lookahead.
            let chosen = match tokens.get(cursor) {
                Some(token) => {
                    let key = token.term_key();
                    self.table.rule(&frame.symbol, key.id()).or_else(|| {
                        key.fallback_id()
                            .and_then(|id| self.table.rule(&frame.symbol, id))
                    })
                }
                None => self.table.rule(&frame.symbol, EOS),
            };

            let Some(rule_id) = chosen else {
                let expecting: Vec<&str> = self.table.expected(&frame.symbol).collect();
                return match tokens.get(cursor) {
                    Some(token) => Err(self.mismatch(token, expecting, &recent)),
                    None => Err(ErrorKind::unexpected_end_of_input(expecting).into()),
                };
            };

            let rule = self.rules.borrow_rule(rule_id);

            // An ε-rule expands to nothing: no children, no frames.
            if rule.is_epsilon() {
                continue;
            }

            let children: Vec<Frame<'sid>> = rule
                .rhs
                .iter()
                .map(|&symbol| Frame {
                    symbol,
                    node: tree.push_child(frame.node, symbol),
                })
                .collect();

            // Reversed, so the leftmost symbol is processed first.
            stack.extend(children.into_iter().rev());
        }

        if let Some(token) = tokens.get(cursor) {
            return Err(self.mismatch(token, vec![EOS], &recent));
        }

        Ok(tree)
    }

    /// Classify a mismatch: a string literal arriving where a numeric
    /// value is expected is a type error, anything else a syntax error.
    fn mismatch(&self, token: &Token, expecting: Vec<&str>, recent: &[String]) -> Error {
        let numeric = expecting
            .iter()
            .find(|id| **id == "number" || **id == "integer")
            .map(|id| id.to_string());

        let kind = match numeric {
            Some(declared) if token.kind == TokenKind::StringLiteral => ErrorKind::TypeMismatch {
                declared,
                got: "string".to_string(),
            },
            _ => ErrorKind::unexpected_token(&token.lexeme, expecting, recent),
        };

        Error::new(kind, Some(token.span))
    }
}

fn remember(recent: &mut Vec<String>, token: &Token) {
    recent.push(token.lexeme.clone());
    if recent.len() > RECENT_WINDOW {
        recent.remove(0);
    }
}
