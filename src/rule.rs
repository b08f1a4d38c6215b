use std::hash::Hash;

use itertools::Itertools;

use crate::grammar::traits::Grammar;
use crate::symbol::traits::SymbolSlice;
use crate::Symbol;

/// The rule's identifier in the grammar.
pub type RuleId = usize;

pub mod traits {
    use crate::RuleDef;

    pub trait RuleDefSlice<'sid>: AsRef<[RuleDef<'sid>]> {
        fn as_rule_def_slice(&self) -> &[RuleDef<'sid>] {
            self.as_ref()
        }
    }

    impl<'sid, T> RuleDefSlice<'sid> for T where T: AsRef<[RuleDef<'sid>]> {}
}

/// Defines a grammar rule
///
/// The grammar generates the resolved [Rule] objects from these
/// definitions.
/// X := A1..An
#[derive(Debug, PartialEq)]
pub struct RuleDef<'sid> {
    pub lhs: &'sid str,
    pub rhs: &'sid [&'sid str],
}

impl<'sid> RuleDef<'sid> {
    pub const fn new(lhs: &'sid str, rhs: &'sid [&'sid str]) -> Self {
        Self { lhs, rhs }
    }
}

#[derive(Debug, Eq, PartialEq, Clone)]
/// A grammar rule
///
/// This object is produced by the grammar with resolved symbols.
///
/// # Example
/// A -> w
pub struct Rule<'sid> {
    pub id: RuleId,
    pub lhs: Symbol<'sid>,
    pub rhs: Vec<Symbol<'sid>>,
}

impl std::fmt::Display for Rule<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}) {} => {}",
            self.id,
            self.lhs,
            self.rhs.iter().map(|s| s.to_string()).join(" ")
        )
    }
}

impl Hash for Rule<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.lhs.hash(state);
        self.rhs.hash(state);
    }
}

impl Rule<'_> {
    /// Check whether the rule produces nothing (A -> ε).
    pub fn is_epsilon(&self) -> bool {
        self.rhs.iter().all(Symbol::is_epsilon)
    }

    /// Check whether the rule contains a certain symbol in its RHS.
    #[inline(always)]
    pub fn contains(&self, sym: &Symbol<'_>) -> bool {
        self.rhs.contains(sym)
    }
}

/// A set of resolved rules.
///
/// This object is used to compute FOLLOW sets and the parse table.
#[derive(Debug)]
pub struct RuleSet<'sid, 'sym>(Vec<Rule<'sid>>, &'sym [Symbol<'sid>]);

impl<'sid> AsRef<[Symbol<'sid>]> for RuleSet<'sid, '_> {
    fn as_ref(&self) -> &[Symbol<'sid>] {
        self.1
    }
}

impl<'sid, 'sym> RuleSet<'sid, 'sym> {
    pub fn new<G>(grammar: &'sym G) -> Self
    where
        G: Grammar<'sid>,
    {
        Self(grammar.iter_rules().collect(), grammar.as_symbol_slice())
    }

    /// The start symbol is the LHS of the first rule.
    pub fn start(&self) -> Symbol<'sid> {
        self.0
            .first()
            .map(|rule| rule.lhs)
            .expect("the grammar has no rules")
    }

    pub fn iter_symbols<'a>(&'a self) -> impl Iterator<Item = Symbol<'sid>> + 'a {
        self.1.iter().copied()
    }

    /// Iterate over all rules of the grammar
    pub fn iter(&self) -> impl Iterator<Item = &Rule<'sid>> {
        self.0.iter()
    }

    pub fn iter_by_symbol<'a>(
        &'a self,
        sym: &Symbol<'sid>,
    ) -> impl Iterator<Item = &'a Rule<'sid>> + 'a
    where
        'sid: 'a,
    {
        let sym = *sym;
        self.iter().filter(move |rule| rule.lhs == sym)
    }

    pub fn borrow_rule(&self, id: RuleId) -> &Rule<'sid> {
        &self.0[id]
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::FIXTURE_EXPR_GRAMMAR;
    use crate::symbol::traits::SymbolSlice as _;
    use crate::RuleSet;

    #[test]
    fn test_001_rule_resolution() {
        let rules = RuleSet::new(&FIXTURE_EXPR_GRAMMAR);

        assert_eq!(rules.start(), FIXTURE_EXPR_GRAMMAR.sym("E"));
        assert_eq!(rules.iter().count(), 8);

        let rule = rules.borrow_rule(0);
        assert_eq!(rule.lhs.id, "E");
        assert_eq!(
            rule.rhs.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec!["T", "E'"]
        );
    }

    #[test]
    fn test_002_epsilon_rules() {
        let rules = RuleSet::new(&FIXTURE_EXPR_GRAMMAR);

        let by_symbol: Vec<_> = rules
            .iter_by_symbol(&FIXTURE_EXPR_GRAMMAR.sym("E'"))
            .collect();
        assert_eq!(by_symbol.len(), 2);
        assert!(!by_symbol[0].is_epsilon());
        assert!(by_symbol[1].is_epsilon());
    }
}
