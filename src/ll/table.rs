use prettytable::Table as PtTable;
use std::collections::HashMap;

use crate::follow::FollowSets;
use crate::grammar::traits::Grammar;
use crate::symbol::traits::SymbolSlice as _;
use crate::{ErrorKind, LlResult, RuleId, RuleSet, Symbol, EPS};

/// The LL(1) parse table: one chosen rule per (non-terminal, terminal)
/// cell.
///
/// For every rule `A -> p`, every terminal in FIRST(p) minus ε claims the
/// cell `(A, t)`; when ε is in FIRST(p), every terminal in FOLLOW(A)
/// claims a cell as well. Two rules claiming the same cell mean the
/// grammar is not LL(1): the build fails with a [ErrorKind::TableConflict]
/// instead of silently overwriting.
///
/// The table is immutable once built and can drive any number of
/// independent parses.
#[derive(Debug, PartialEq)]
pub struct LlTable<'sid, 'sym> {
    symbols: &'sym [Symbol<'sid>],
    cells: HashMap<(&'sid str, &'sid str), RuleId>,
}

impl<'sid, 'sym> LlTable<'sid, 'sym> {
    /// Build the parse table from a grammar.
    pub fn build<G>(grammar: &'sym G) -> LlResult<Self>
    where
        G: Grammar<'sid>,
    {
        grammar.validate()?;

        let rules = RuleSet::new(grammar);
        let firsts = grammar.first_sets();
        let follows = FollowSets::solve(&rules, &firsts);

        let mut cells = HashMap::new();

        for rule in rules.iter() {
            let first_of_rule = firsts.first_of_sequence(&rule.rhs);

            let mut claims: Vec<&'sid str> = first_of_rule
                .iter()
                .copied()
                .filter(|id| *id != EPS)
                .collect();

            if first_of_rule.contains(EPS) {
                claims.extend(follows.follow(&rule.lhs));
            }

            for terminal in claims {
                if let Some(occupant) = cells.insert((rule.lhs.id, terminal), rule.id) {
                    if occupant != rule.id {
                        return Err(ErrorKind::TableConflict {
                            non_terminal: rule.lhs.id.to_string(),
                            terminal: terminal.to_string(),
                            rules: [occupant, rule.id],
                        }
                        .into());
                    }
                }
            }
        }

        Ok(Self {
            symbols: grammar.as_symbol_slice(),
            cells,
        })
    }

    /// The rule chosen for a (non-terminal, terminal) pair, if any.
    pub fn rule(&self, non_terminal: &Symbol<'sid>, terminal: &str) -> Option<RuleId> {
        self.cells.get(&(non_terminal.id, terminal)).copied()
    }

    /// The terminals with a defined cell for the given non-terminal,
    /// in symbol-listing order. Used for error reporting.
    pub fn expected<'a>(&'a self, non_terminal: &Symbol<'sid>) -> impl Iterator<Item = &'sid str> + 'a {
        let id = non_terminal.id;
        self.symbols
            .iter_terminals()
            .filter(move |sym| self.cells.contains_key(&(id, sym.id)))
            .map(|sym| sym.id)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl std::fmt::Display for LlTable<'_, '_> {
    /// Renders the table as a fixed-width grid: one row per non-terminal,
    /// one column per terminal, `r{id}` in the claimed cells.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut table = PtTable::new();

        let terminals: Vec<Symbol<'_>> = self
            .symbols
            .iter_terminals()
            .filter(|sym| !sym.is_eos())
            .chain(std::iter::once(self.symbols.eos()))
            .collect();

        table.add_row(
            ["".to_string()]
                .into_iter()
                .chain(terminals.iter().map(|sym| sym.id.to_string()))
                .collect(),
        );

        for nterm in self.symbols.iter_non_terminals() {
            table.add_row(
                [nterm.id.to_string()]
                    .into_iter()
                    .chain(terminals.iter().map(|term| {
                        self.rule(&nterm, term.id)
                            .map(|id| format!("r{}", id))
                            .unwrap_or_default()
                    }))
                    .collect(),
            );
        }

        write!(f, "{}", table)
    }
}

#[cfg(test)]
mod tests {
    use super::LlTable;
    use crate::fixtures::FIXTURE_EXPR_GRAMMAR;
    use crate::symbol::traits::SymbolSlice as _;
    use crate::{ConstGrammar, ErrorKind, FirstDef, RuleDef, Symbol, EOS, EPS};

    #[test]
    fn test_001_expr_table_cells() {
        let g = &FIXTURE_EXPR_GRAMMAR;
        let table = LlTable::build(g).expect("cannot build table");

        assert_eq!(table.rule(&g.sym("E"), "("), Some(0));
        assert_eq!(table.rule(&g.sym("E"), "identifier"), Some(0));
        assert_eq!(table.rule(&g.sym("E'"), "+"), Some(1));
        assert_eq!(table.rule(&g.sym("F"), "("), Some(6));
        assert_eq!(table.rule(&g.sym("F"), "identifier"), Some(7));

        // No entry outside FIRST/FOLLOW.
        assert_eq!(table.rule(&g.sym("E"), "+"), None);
    }

    #[test]
    fn test_002_epsilon_entries_cover_follow() {
        let g = &FIXTURE_EXPR_GRAMMAR;
        let table = LlTable::build(g).expect("cannot build table");

        // FOLLOW(E') = { ), <eos> } selects the ε-rule.
        assert_eq!(table.rule(&g.sym("E'"), ")"), Some(2));
        assert_eq!(table.rule(&g.sym("E'"), EOS), Some(2));

        // FOLLOW(T') = { +, ), <eos> } selects the ε-rule.
        assert_eq!(table.rule(&g.sym("T'"), "+"), Some(5));
        assert_eq!(table.rule(&g.sym("T'"), ")"), Some(5));
        assert_eq!(table.rule(&g.sym("T'"), EOS), Some(5));
    }

    #[test]
    fn test_003_non_ll1_grammar_is_rejected() {
        // S -> a b | a c : both rules claim (S, a).
        const AMBIGUOUS: ConstGrammar<'static, 6, 2, 1> = ConstGrammar::new(
            [
                Symbol::eos(),
                Symbol::epsilon(),
                Symbol::term("a"),
                Symbol::term("b"),
                Symbol::term("c"),
                Symbol::nterm("S"),
            ],
            [
                RuleDef::new("S", &["a", "b"]),
                RuleDef::new("S", &["a", "c"]),
            ],
            [FirstDef::new("S", &["a"])],
        );

        let err = LlTable::build(&AMBIGUOUS).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TableConflict { .. }));
    }

    #[test]
    fn test_004_display_grid() {
        let table = LlTable::build(&FIXTURE_EXPR_GRAMMAR).expect("cannot build table");
        let rendered = table.to_string();

        assert!(rendered.contains("E'"));
        assert!(rendered.contains("r0"));
        assert!(rendered.contains(EOS));
    }
}
