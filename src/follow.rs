use std::collections::{HashMap, HashSet};

use crate::first::FirstSets;
use crate::{RuleSet, Symbol, EOS, EPS};

/// FOLLOW sets for every non-terminal, derived from the grammar and the
/// FIRST sets by iterative fixpoint.
///
/// Rules applied on every pass:
/// 1. `<eos>` is in FOLLOW(start).
/// 2. For every rule `A -> α X β`: FIRST(β) minus ε is added to FOLLOW(X),
///    and if β is empty or nullable all of FOLLOW(A) is added to FOLLOW(X).
///
/// The loop terminates because the sets grow monotonically inside a finite
/// terminal alphabet. The computation is a pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowSets<'sid> {
    sets: HashMap<&'sid str, HashSet<&'sid str>>,
}

impl<'sid> FollowSets<'sid> {
    pub fn solve(rules: &RuleSet<'sid, '_>, firsts: &FirstSets<'sid>) -> Self {
        let mut sets: HashMap<&'sid str, HashSet<&'sid str>> = rules
            .iter_symbols()
            .filter(|sym| !sym.is_terminal())
            .map(|sym| (sym.id, HashSet::new()))
            .collect();

        sets.entry(rules.start().id)
            .or_default()
            .insert(EOS);

        loop {
            let mut changed = false;

            for rule in rules.iter() {
                for (at, sym) in rule.rhs.iter().enumerate() {
                    if sym.is_terminal() {
                        continue;
                    }

                    let first_beta = firsts.first_of_sequence(&rule.rhs[at + 1..]);

                    let mut additions: HashSet<&'sid str> = first_beta
                        .iter()
                        .copied()
                        .filter(|id| *id != EPS)
                        .collect();

                    if first_beta.contains(EPS) {
                        if let Some(of_lhs) = sets.get(rule.lhs.id) {
                            additions.extend(of_lhs.iter().copied());
                        }
                    }

                    let set = sets
                        .get_mut(sym.id)
                        .expect("rule RHS references an unlisted non-terminal");

                    for terminal in additions {
                        changed |= set.insert(terminal);
                    }
                }
            }

            if !changed {
                break;
            }
        }

        Self { sets }
    }

    /// FOLLOW(A) for a single non-terminal.
    pub fn follow(&self, sym: &Symbol<'sid>) -> HashSet<&'sid str> {
        self.sets.get(sym.id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::FollowSets;
    use crate::fixtures::FIXTURE_EXPR_GRAMMAR;
    use crate::symbol::traits::SymbolSlice as _;
    use crate::traits::Grammar as _;
    use crate::{RuleSet, EOS};

    use std::collections::HashSet;

    #[test]
    fn test_001_follow_sets() {
        let g = &FIXTURE_EXPR_GRAMMAR;
        let rules = RuleSet::new(g);
        let follows = FollowSets::solve(&rules, &g.first_sets());

        assert_eq!(
            follows.follow(&g.sym("E")),
            HashSet::from_iter([")", EOS])
        );
        assert_eq!(
            follows.follow(&g.sym("E'")),
            HashSet::from_iter([")", EOS])
        );
        assert_eq!(
            follows.follow(&g.sym("T")),
            HashSet::from_iter(["+", ")", EOS])
        );
        assert_eq!(
            follows.follow(&g.sym("T'")),
            HashSet::from_iter(["+", ")", EOS])
        );
        assert_eq!(
            follows.follow(&g.sym("F")),
            HashSet::from_iter(["*", "+", ")", EOS])
        );
    }

    #[test]
    fn test_002_fixpoint_is_idempotent() {
        let g = &FIXTURE_EXPR_GRAMMAR;
        let rules = RuleSet::new(g);
        let firsts = g.first_sets();

        let first_run = FollowSets::solve(&rules, &firsts);
        let second_run = FollowSets::solve(&rules, &firsts);

        assert_eq!(first_run, second_run);
    }
}
