use crate::{RuleDef, Symbol};

pub mod traits {
    use crate::first::FirstSets;
    use crate::rule::traits::RuleDefSlice;
    use crate::symbol::traits::SymbolSlice;
    use crate::{ErrorKind, LlResult, Rule};

    use super::FirstDefSlice;

    /// A grammar: symbols, rule definitions and the authored FIRST table.
    pub trait Grammar<'sid>: RuleDefSlice<'sid> + SymbolSlice<'sid> + FirstDefSlice<'sid> {
        /// Iterate over the resolved rules of the grammar.
        ///
        /// # Panics
        /// Panics if a rule references a symbol missing from the symbol
        /// listing; run [Grammar::validate] first to get an error instead.
        fn iter_rules<'a>(&'a self) -> impl Iterator<Item = Rule<'sid>> + 'a
        where
            'sid: 'a,
        {
            self.as_rule_def_slice()
                .iter()
                .enumerate()
                .map(move |(id, def)| Rule {
                    id,
                    lhs: self.sym(def.lhs),
                    rhs: def.rhs.iter().map(|id| self.sym(id)).collect(),
                })
        }

        /// The authored FIRST sets, resolved against the symbol listing.
        fn first_sets(&self) -> FirstSets<'sid> {
            FirstSets::new(self)
        }

        /// Check the grammar's consistency: every symbol a rule mentions is
        /// listed, every non-terminal has at least one rule and a FIRST set.
        ///
        /// A non-terminal missing from the rule listing would silently
        /// corrupt the FOLLOW computation, so this fails fast instead.
        fn validate(&self) -> LlResult<()> {
            for def in self.as_rule_def_slice() {
                self.try_sym(def.lhs)?;
                for id in def.rhs {
                    self.try_sym(id)?;
                }
            }

            for sym in self.iter_non_terminals() {
                if !self.as_rule_def_slice().iter().any(|def| def.lhs == sym.id) {
                    return Err(ErrorKind::unknown_symbol(sym.id).into());
                }

                if !self
                    .as_first_def_slice()
                    .iter()
                    .any(|def| def.symbol == sym.id)
                {
                    return Err(ErrorKind::unknown_symbol(sym.id).into());
                }
            }

            Ok(())
        }
    }
}

/// The authored FIRST set of a non-terminal; contains [crate::EPS] when the
/// symbol can derive the empty string.
#[derive(Debug, PartialEq)]
pub struct FirstDef<'sid> {
    pub symbol: &'sid str,
    pub firsts: &'sid [&'sid str],
}

impl<'sid> FirstDef<'sid> {
    pub const fn new(symbol: &'sid str, firsts: &'sid [&'sid str]) -> Self {
        Self { symbol, firsts }
    }
}

pub trait FirstDefSlice<'sid>: AsRef<[FirstDef<'sid>]> {
    fn as_first_def_slice(&self) -> &[FirstDef<'sid>] {
        self.as_ref()
    }
}

impl<'sid, T> FirstDefSlice<'sid> for T where T: AsRef<[FirstDef<'sid>]> {}

/// A grammar defined as const data: the symbol vocabulary, the rule
/// definitions, and the FIRST set of every non-terminal.
///
/// The first rule's LHS is the start symbol. The grammar is fixed at
/// construction and never mutated; it can be shared across any number of
/// independent parses.
///
/// # Example
///
/// ```
/// use llp::{ConstGrammar, FirstDef, RuleDef, Symbol, EPS};
///
/// const GRAMMAR: ConstGrammar<'static, 6, 3, 2> = ConstGrammar::new(
///     [
///         Symbol::eos(),
///         Symbol::epsilon(),
///         Symbol::term("+"),
///         Symbol::kind_term("identifier"),
///         Symbol::nterm("E"),
///         Symbol::nterm("R"),
///     ],
///     [
///         RuleDef::new("E", &["identifier", "R"]),
///         RuleDef::new("R", &["+", "identifier", "R"]),
///         RuleDef::new("R", &[EPS]),
///     ],
///     [
///         FirstDef::new("E", &["identifier"]),
///         FirstDef::new("R", &["+", EPS]),
///     ],
/// );
/// ```
#[derive(Debug, PartialEq)]
pub struct ConstGrammar<'sid, const NB_SYMBOLS: usize, const NB_RULES: usize, const NB_FIRSTS: usize>
{
    symbols: [Symbol<'sid>; NB_SYMBOLS],
    rules: [RuleDef<'sid>; NB_RULES],
    firsts: [FirstDef<'sid>; NB_FIRSTS],
}

impl<'sid, const NB_SYMBOLS: usize, const NB_RULES: usize, const NB_FIRSTS: usize>
    ConstGrammar<'sid, NB_SYMBOLS, NB_RULES, NB_FIRSTS>
{
    pub const fn new(
        symbols: [Symbol<'sid>; NB_SYMBOLS],
        rules: [RuleDef<'sid>; NB_RULES],
        firsts: [FirstDef<'sid>; NB_FIRSTS],
    ) -> Self {
        Self {
            symbols,
            rules,
            firsts,
        }
    }
}

impl<'sid, const NB_SYMBOLS: usize, const NB_RULES: usize, const NB_FIRSTS: usize>
    AsRef<[Symbol<'sid>]> for ConstGrammar<'sid, NB_SYMBOLS, NB_RULES, NB_FIRSTS>
{
    fn as_ref(&self) -> &[Symbol<'sid>] {
        &self.symbols
    }
}

impl<'sid, const NB_SYMBOLS: usize, const NB_RULES: usize, const NB_FIRSTS: usize>
    AsRef<[RuleDef<'sid>]> for ConstGrammar<'sid, NB_SYMBOLS, NB_RULES, NB_FIRSTS>
{
    fn as_ref(&self) -> &[RuleDef<'sid>] {
        &self.rules
    }
}

impl<'sid, const NB_SYMBOLS: usize, const NB_RULES: usize, const NB_FIRSTS: usize>
    AsRef<[FirstDef<'sid>]> for ConstGrammar<'sid, NB_SYMBOLS, NB_RULES, NB_FIRSTS>
{
    fn as_ref(&self) -> &[FirstDef<'sid>] {
        &self.firsts
    }
}

impl<'sid, const NB_SYMBOLS: usize, const NB_RULES: usize, const NB_FIRSTS: usize>
    traits::Grammar<'sid> for ConstGrammar<'sid, NB_SYMBOLS, NB_RULES, NB_FIRSTS>
{
}

pub mod first {
    use std::collections::{HashMap, HashSet};

    use crate::symbol::traits::SymbolSlice as _;
    use crate::{Symbol, EPS};

    use super::traits::Grammar;
    use super::FirstDefSlice as _;

    /// Resolved FIRST sets for every grammar symbol.
    ///
    /// Terminal symbols trivially map to themselves; non-terminals come
    /// from the grammar's authored table.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FirstSets<'sid> {
        sets: HashMap<&'sid str, HashSet<&'sid str>>,
    }

    impl<'sid> FirstSets<'sid> {
        pub fn new<G>(grammar: &G) -> Self
        where
            G: Grammar<'sid> + ?Sized,
        {
            let mut sets: HashMap<&'sid str, HashSet<&'sid str>> = grammar
                .iter_terminals()
                .map(|sym| (sym.id, HashSet::from_iter([sym.id])))
                .collect();

            sets.extend(
                grammar
                    .as_first_def_slice()
                    .iter()
                    .map(|def| (def.symbol, def.firsts.iter().copied().collect())),
            );

            Self { sets }
        }

        /// FIRST(X) for a single symbol.
        pub fn first(&self, sym: &Symbol<'sid>) -> HashSet<&'sid str> {
            self.sets.get(sym.id).cloned().unwrap_or_default()
        }

        pub fn contains_epsilon(&self, sym: &Symbol<'sid>) -> bool {
            sym.is_epsilon()
                || self
                    .sets
                    .get(sym.id)
                    .map(|set| set.contains(EPS))
                    .unwrap_or(false)
        }

        /// FIRST of a symbol sequence: scan left to right, accumulating
        /// FIRST(symbol) minus ε, and stop at the first non-nullable
        /// symbol. If every symbol is nullable the result keeps ε.
        pub fn first_of_sequence(&self, symbols: &[Symbol<'sid>]) -> HashSet<&'sid str> {
            let mut set = HashSet::new();

            for sym in symbols {
                let nullable = self.contains_epsilon(sym);

                set.extend(self.first(sym).into_iter().filter(|id| *id != EPS));

                if !nullable {
                    return set;
                }
            }

            set.insert(EPS);
            set
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::FIXTURE_EXPR_GRAMMAR;
    use crate::symbol::traits::SymbolSlice as _;
    use crate::traits::Grammar as _;
    use crate::{ConstGrammar, FirstDef, RuleDef, Symbol, EPS};

    use std::collections::HashSet;

    #[test]
    fn test_001_validate() {
        assert!(FIXTURE_EXPR_GRAMMAR.validate().is_ok());
    }

    #[test]
    fn test_002_validate_rejects_unlisted_symbol() {
        const BROKEN: ConstGrammar<'static, 3, 1, 1> = ConstGrammar::new(
            [Symbol::eos(), Symbol::epsilon(), Symbol::nterm("A")],
            [RuleDef::new("A", &["missing"])],
            [FirstDef::new("A", &[EPS])],
        );

        assert!(BROKEN.validate().is_err());
    }

    #[test]
    fn test_003_first_of_symbol() {
        let firsts = FIXTURE_EXPR_GRAMMAR.first_sets();

        let set = firsts.first(&FIXTURE_EXPR_GRAMMAR.sym("E"));
        assert_eq!(set, HashSet::from_iter(["(", "identifier"]));

        // Terminals map to themselves.
        let set = firsts.first(&FIXTURE_EXPR_GRAMMAR.sym("+"));
        assert_eq!(set, HashSet::from_iter(["+"]));
    }

    #[test]
    fn test_004_first_of_sequence() {
        let g = &FIXTURE_EXPR_GRAMMAR;
        let firsts = g.first_sets();

        // T' E' is fully nullable: FIRST keeps ε.
        let set = firsts.first_of_sequence(&[g.sym("T'"), g.sym("E'")]);
        assert_eq!(set, HashSet::from_iter(["*", "+", EPS]));

        // A leading terminal stops the scan.
        let set = firsts.first_of_sequence(&[g.sym("("), g.sym("E")]);
        assert_eq!(set, HashSet::from_iter(["("]));
    }
}
