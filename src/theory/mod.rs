/*!
Possibilistic theories.

A possibilistic theory is a stratified set of clauses, with each stratum (or level) identified by a [Necessity], together with a set of hard rules which hold at every level.
The theory believed with necessity at least α is the *alpha cut* of the theory at α: every clause at a level of at least α, together with the hard rules.

# Queries

- [solve](PossibilisticTheory::solve) finds the *preferred* level of some evidence: the lowest necessity whose alpha cut is consistent with the evidence.
  As the alpha cut at a higher level is a subset of the alpha cut at a lower level, consistency is monotone in the level, and the preferred level is found by binary search over the (distinct) necessities of the theory.
  Levels below the preferred level are said to be *drowned* by the evidence.
- [implies](PossibilisticTheory::implies) holds when the negation of a consequent is inconsistent with the evidence and the alpha cut at the preferred level of the evidence.
  A tautological consequent is always implied, and nothing is implied by evidence inconsistent with the hard rules.

Every query requires the theory to be ground, and a query of a non-ground theory returns [NonGround](err::TheoryError::NonGround).
Each satisfiability problem is answered by a fresh [GroundSolver], or by a [SatCache] if one has been given to the theory.

```rust
# use std::collections::BTreeSet;
# use tweety::theory::PossibilisticTheory;
# use tweety::structures::{clause::Clause, literal::Literal};
let level = |clauses: &[&str]| clauses.iter().map(|c| c.parse::<Clause>().unwrap()).collect::<BTreeSet<_>>();
let literal = |l: &str| l.parse::<Literal>().unwrap();

let theory = PossibilisticTheory::from_stratification(vec![
    level(&["!bird(x), flies(x)"]),
    level(&["!penguin(x), bird(x)", "!penguin(x), !flies(x)"]),
]);

let bird = BTreeSet::from([literal("bird(x)")]);
let penguin = BTreeSet::from([literal("penguin(x)")]);

assert!(theory.implies_literal(&bird, &literal("flies(x)")).unwrap());
assert!(theory.implies_literal(&penguin, &literal("!flies(x)")).unwrap());
assert!(!theory.implies_literal(&penguin, &literal("flies(x)")).unwrap());
```

# Modules
- [cache] holds the optional satisfiability cache.
- [simplify] holds transformations of a theory which preserve (or approximate) its consequences.
- [interval] holds theories whose clauses are weighted by an interval of necessities.
- [coverage] holds the parallel batch of implication queries.
*/

pub mod cache;
pub mod coverage;
pub mod groundness;
pub mod interval;
pub mod simplify;

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use num_bigint::BigUint;

use crate::{
    config::Config,
    engine::{GroundSolver, Witness},
    misc::log::targets,
    structures::{clause::Clause, literal::Literal, necessity::Necessity},
    types::err::{self, ErrorKind},
};

use cache::{SatCache, SatProblem};
use groundness::GroundnessCell;

/// Evidence, as a set of literals each asserted to be true.
pub type Evidence = BTreeSet<Literal>;

/// A possibilistic theory.
#[derive(Clone, Debug, Default)]
pub struct PossibilisticTheory {
    /// Clauses of each level, with no empty level.
    rules: BTreeMap<Necessity, BTreeSet<Clause>>,

    hard_rules: BTreeSet<Clause>,

    /// Positive literals in the universe of the theory, but perhaps in no clause.
    additional_atoms: BTreeSet<Literal>,

    groundness: GroundnessCell,

    cache: Option<Arc<SatCache>>,

    config: Config,
}

impl PossibilisticTheory {
    /// An empty theory.
    pub fn new() -> Self {
        PossibilisticTheory::default()
    }

    /// A theory with each clause at the paired necessity.
    pub fn from_rules(rules: impl IntoIterator<Item = (Clause, Necessity)>) -> Self {
        let mut theory = PossibilisticTheory::default();
        for (clause, necessity) in rules {
            theory.add_rule(clause, necessity);
        }
        theory
    }

    /// A theory with a level for each stratum, from the least certain stratum to the most certain stratum.
    ///
    /// The necessity of stratum i of n is (i + 1) / (n + 1).
    pub fn from_stratification(
        levels: impl IntoIterator<Item = impl IntoIterator<Item = Clause>>,
    ) -> Self {
        let levels = levels
            .into_iter()
            .map(|level| level.into_iter().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let count = levels.len();

        let mut theory = PossibilisticTheory::default();
        for (index, level) in levels.into_iter().enumerate() {
            theory.add_all(level, Necessity::of_level(index, count));
        }
        theory
    }

    /// A theory with a level for each stratum, at the paired necessity.
    pub fn from_weighted_stratification(
        levels: impl IntoIterator<Item = impl IntoIterator<Item = Clause>>,
        weights: &[Necessity],
    ) -> Result<Self, err::TheoryError> {
        let levels = levels
            .into_iter()
            .map(|level| level.into_iter().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        if levels.len() != weights.len() {
            return Err(err::TheoryError::StratificationMismatch {
                levels: levels.len(),
                weights: weights.len(),
            });
        }

        let mut theory = PossibilisticTheory::default();
        for (level, &necessity) in levels.into_iter().zip(weights) {
            theory.add_all(level, necessity);
        }
        Ok(theory)
    }

    /// The theory, with `hard_rules` added.
    pub fn with_hard_rules(mut self, hard_rules: impl IntoIterator<Item = Clause>) -> Self {
        self.add_all_hard_rules(hard_rules);
        self
    }

    /// The theory, with queries answered through `cache`.
    pub fn with_cache(mut self, cache: Arc<SatCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// The theory, with `config` used for each ground solver.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// A theory with the levels of `bottom` below the levels of `top`, and the hard rules of both.
    ///
    /// Necessities are reassigned as by [from_stratification](PossibilisticTheory::from_stratification).
    pub fn merge(bottom: &PossibilisticTheory, top: &PossibilisticTheory) -> Self {
        let levels = bottom
            .to_level_list()
            .into_iter()
            .chain(top.to_level_list());
        PossibilisticTheory::from_stratification(levels).with_hard_rules(
            bottom
                .hard_rules
                .iter()
                .chain(top.hard_rules.iter())
                .cloned(),
        )
    }

    pub fn cache(&self) -> Option<&Arc<SatCache>> {
        self.cache.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Queries
impl PossibilisticTheory {
    /// The necessities of the levels of the theory, in ascending order.
    pub fn weights(&self) -> impl DoubleEndedIterator<Item = Necessity> + '_ {
        self.rules.keys().copied()
    }

    /// A count of levels.
    pub fn level_count(&self) -> usize {
        self.rules.len()
    }

    pub fn min_necessity(&self) -> Option<Necessity> {
        self.rules.keys().next().copied()
    }

    pub fn max_necessity(&self) -> Option<Necessity> {
        self.rules.keys().next_back().copied()
    }

    /// The clauses at exactly `alpha`.
    pub fn alpha_level(&self, alpha: Necessity) -> impl Iterator<Item = &Clause> {
        self.rules.get(&alpha).into_iter().flatten()
    }

    /// The clauses at a level of at least `alpha`, and the hard rules.
    pub fn alpha_cut(&self, alpha: Necessity) -> BTreeSet<Clause> {
        self.rules
            .range(alpha..)
            .flat_map(|(_, level)| level.iter())
            .chain(self.hard_rules.iter())
            .cloned()
            .collect()
    }

    /// The clauses at a level strictly above `alpha`, and the hard rules.
    pub fn strict_alpha_cut(&self, alpha: Necessity) -> BTreeSet<Clause> {
        use std::ops::Bound::{Excluded, Unbounded};
        self.rules
            .range((Excluded(alpha), Unbounded))
            .flat_map(|(_, level)| level.iter())
            .chain(self.hard_rules.iter())
            .cloned()
            .collect()
    }

    /// The theory restricted to levels of at least `min_necessity`, with every hard rule.
    pub fn subtheory(&self, min_necessity: Necessity) -> Self {
        self.restricted(|necessity| necessity >= min_necessity)
    }

    /// The theory restricted to levels strictly above `min_necessity`, with every hard rule.
    pub fn strict_subtheory(&self, min_necessity: Necessity) -> Self {
        self.restricted(|necessity| necessity > min_necessity)
    }

    fn restricted(&self, keep: impl Fn(Necessity) -> bool) -> Self {
        let mut theory = PossibilisticTheory {
            hard_rules: self.hard_rules.clone(),
            cache: self.cache.clone(),
            config: self.config.clone(),
            ..Default::default()
        };
        for (&necessity, level) in &self.rules {
            if keep(necessity) {
                theory.add_all(level.iter().cloned(), necessity);
            }
        }
        theory
    }

    /// The levels of the theory, from the least certain level to the most certain level.
    pub fn to_level_list(&self) -> Vec<BTreeSet<Clause>> {
        self.rules.values().cloned().collect()
    }

    pub fn hard_rules(&self) -> &BTreeSet<Clause> {
        &self.hard_rules
    }

    /// Every clause of the theory, excluding hard rules.
    pub fn rules(&self) -> impl Iterator<Item = (Necessity, &Clause)> {
        self.rules
            .iter()
            .flat_map(|(&necessity, level)| level.iter().map(move |clause| (necessity, clause)))
    }

    /// The positive literal of every atom of the theory, including additional atoms.
    pub fn propositional_atoms(&self) -> BTreeSet<Literal> {
        self.rules
            .values()
            .flatten()
            .chain(self.hard_rules.iter())
            .flat_map(Clause::literals)
            .map(Literal::positive)
            .chain(self.additional_atoms.iter().cloned())
            .collect()
    }

    /// A count of literal occurrences across the levels of the theory, excluding hard rules.
    pub fn size_in_literals(&self) -> usize {
        self.rules.values().flatten().map(Clause::len).sum()
    }

    /// True if every clause of the theory is ground.
    pub fn is_ground(&self) -> bool {
        self.groundness.is_ground(|| {
            self.rules
                .values()
                .flatten()
                .chain(self.hard_rules.iter())
                .all(Clause::is_ground)
        })
    }

    fn require_ground(&self) -> Result<(), err::TheoryError> {
        match self.is_ground() {
            true => Ok(()),
            false => Err(err::TheoryError::NonGround),
        }
    }

    /// Some model of `problem`, through the cache if present.
    pub(crate) fn solve_problem(&self, problem: SatProblem) -> Result<Option<Witness>, ErrorKind> {
        let compute = |problem: &SatProblem| {
            GroundSolver::with_config(problem.iter(), self.config.clone())?.solve()
        };
        match &self.cache {
            Some(cache) => cache.get_or_compute(problem, compute),
            None => compute(&problem),
        }
    }

    /// Some model of the alpha cut at `alpha` on which the evidence is true, if one exists.
    pub fn solve_at(
        &self,
        alpha: Necessity,
        evidence: &Evidence,
    ) -> Result<Option<Witness>, ErrorKind> {
        self.require_ground()?;
        let mut problem = self.alpha_cut(alpha);
        problem.extend(evidence.iter().cloned().map(Clause::unit));
        self.solve_problem(problem)
    }

    /// A model at the preferred level of `evidence`, and the preferred level, if the evidence is consistent with the hard rules.
    ///
    /// The preferred level is the lowest necessity of the theory whose alpha cut is consistent with the evidence.
    /// If the theory has no levels, the hard rules are used, with necessity [CERTAIN](Necessity::CERTAIN).
    pub fn solve(&self, evidence: &Evidence) -> Result<Option<(Witness, Necessity)>, ErrorKind> {
        let weights = self.weights().collect::<Vec<_>>();
        if weights.is_empty() {
            let witness = self.solve_at(Necessity::CERTAIN, evidence)?;
            return Ok(witness.map(|witness| (witness, Necessity::CERTAIN)));
        }

        let mut solution = None;
        let (mut min, mut max) = (0_isize, weights.len() as isize - 1);
        while min <= max {
            let mid = (min + max) / 2;
            let level = weights[mid as usize];
            match self.solve_at(level, evidence)? {
                Some(witness) => {
                    solution = Some((witness, level));
                    max = mid - 1;
                }
                None => min = mid + 1,
            }
        }

        match &solution {
            Some((_, level)) => {
                log::trace!(target: targets::THEORY, "Preferred level {level} for {} literals of evidence", evidence.len())
            }
            None => {
                log::trace!(target: targets::THEORY, "Evidence inconsistent with the hard rules")
            }
        }
        Ok(solution)
    }

    /// True if `consequent` holds on every model of the alpha cut at the preferred level of `evidence`.
    pub fn implies(&self, evidence: &Evidence, consequent: &Clause) -> Result<bool, ErrorKind> {
        if consequent.is_tautology() {
            return Ok(true);
        }
        self.require_ground()?;

        let Some((_, level)) = self.solve(evidence)? else {
            return Ok(false);
        };

        let mut problem = self.alpha_cut(level);
        problem.extend(evidence.iter().cloned().map(Clause::unit));
        problem.extend(consequent.negated_literals().map(Clause::unit));
        Ok(self.solve_problem(problem)?.is_none())
    }

    /// True if `literal` is [implied](PossibilisticTheory::implies) by `evidence`.
    pub fn implies_literal(&self, evidence: &Evidence, literal: &Literal) -> Result<bool, ErrorKind> {
        self.implies(evidence, &Clause::unit(literal.clone()))
    }

    /// A most plausible model of the evidence, if the evidence is consistent with the hard rules.
    ///
    /// A model is more plausible than another if the most certain clause falsified by the model is less certain.
    /// This is found by weighted optimisation, with the hard rules and evidence as hard clauses, and each level of the theory as soft clauses.
    /// The weight of a clause at some level exceeds the total weight of all clauses at lower levels, so the sum of falsified weights orders models as their most certain falsified clause does.
    pub fn most_plausible_model(&self, evidence: &Evidence) -> Result<Option<Witness>, ErrorKind> {
        self.require_ground()?;

        let hard = self
            .hard_rules
            .iter()
            .cloned()
            .chain(evidence.iter().cloned().map(Clause::unit))
            .collect::<Vec<_>>();

        let mut soft = Vec::default();
        let mut lower_total = BigUint::ZERO;
        for level in self.rules.values() {
            let weight = &lower_total + 1_u32;
            soft.extend(level.iter().map(|clause| (clause.clone(), weight.clone())));
            lower_total += weight * level.len();
        }

        GroundSolver::with_soft(hard, soft, self.config.clone())?.optimize()
    }
}

/// Mutations
///
/// Each mutation invalidates the record of groundness.
impl PossibilisticTheory {
    /// Adds `clause` at `necessity`.
    pub fn add_rule(&mut self, clause: Clause, necessity: Necessity) {
        self.rules.entry(necessity).or_default().insert(clause);
        self.groundness.invalidate();
    }

    /// Adds each clause at `necessity`.
    pub fn add_all(&mut self, clauses: impl IntoIterator<Item = Clause>, necessity: Necessity) {
        let mut clauses = clauses.into_iter().peekable();
        if clauses.peek().is_some() {
            self.rules.entry(necessity).or_default().extend(clauses);
        }
        self.groundness.invalidate();
    }

    pub fn add_hard_rule(&mut self, clause: Clause) {
        self.hard_rules.insert(clause);
        self.groundness.invalidate();
    }

    pub fn add_all_hard_rules(&mut self, clauses: impl IntoIterator<Item = Clause>) {
        self.hard_rules.extend(clauses);
        self.groundness.invalidate();
    }

    /// Removes `clause` from the level at `necessity`, removing the level if empty.
    /// Returns true if the clause was present.
    pub fn remove(&mut self, clause: &Clause, necessity: Necessity) -> bool {
        let Some(level) = self.rules.get_mut(&necessity) else {
            return false;
        };
        let removed = level.remove(clause);
        if level.is_empty() {
            self.rules.remove(&necessity);
        }
        self.groundness.invalidate();
        removed
    }

    /// Removes `clause` from every level.
    pub fn remove_everywhere(&mut self, clause: &Clause) {
        self.rules.retain(|_, level| {
            level.remove(clause);
            !level.is_empty()
        });
        self.groundness.invalidate();
    }

    pub fn remove_hard_rule(&mut self, clause: &Clause) -> bool {
        self.groundness.invalidate();
        self.hard_rules.remove(clause)
    }

    /// Adds the atom of `literal` to the universe of the theory.
    pub fn add_additional_atom(&mut self, literal: &Literal) {
        self.additional_atoms.insert(literal.positive());
        self.groundness.invalidate();
    }

    /// Removes each clause (other than hard rules) whose every literal is negated by `evidence`.
    pub fn remove_rules_directly_falsified_by_evidence(&mut self, evidence: &Evidence) {
        self.rules.retain(|_, level| {
            level.retain(|clause| !clause.is_falsified_by(evidence));
            !level.is_empty()
        });
        self.groundness.invalidate();
    }
}

impl PartialEq for PossibilisticTheory {
    /// Theories are equal if their levels and hard rules are equal.
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules && self.hard_rules == other.hard_rules
    }
}

impl Eq for PossibilisticTheory {}

impl std::fmt::Display for PossibilisticTheory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.hard_rules.is_empty() {
            writeln!(f, "Hard rules")?;
            for clause in &self.hard_rules {
                writeln!(f, "  {clause}")?;
            }
        }
        for (necessity, level) in self.rules.iter().rev() {
            writeln!(f, "Level {necessity}")?;
            for clause in level {
                writeln!(f, "  {clause}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(s: &str) -> Clause {
        s.parse().unwrap()
    }

    fn literal(s: &str) -> Literal {
        s.parse().unwrap()
    }

    fn necessity(value: f64) -> Necessity {
        Necessity::new(value).unwrap()
    }

    #[test]
    fn levels_are_never_empty() {
        let mut theory = PossibilisticTheory::new();
        theory.add_rule(clause("a"), necessity(0.5));
        theory.add_rule(clause("b"), necessity(0.5));
        theory.add_all(Vec::default(), necessity(0.9));
        assert_eq!(theory.level_count(), 1);

        assert!(theory.remove(&clause("a"), necessity(0.5)));
        assert!(!theory.remove(&clause("a"), necessity(0.5)));
        assert_eq!(theory.level_count(), 1);
        theory.remove_everywhere(&clause("b"));
        assert_eq!(theory.level_count(), 0);
        assert!(theory.min_necessity().is_none());
    }

    #[test]
    fn cuts() {
        let theory = PossibilisticTheory::from_rules([
            (clause("a"), necessity(0.25)),
            (clause("b"), necessity(0.5)),
            (clause("c"), necessity(0.75)),
        ])
        .with_hard_rules([clause("d")]);

        assert_eq!(theory.alpha_cut(necessity(0.5)).len(), 3);
        assert_eq!(theory.strict_alpha_cut(necessity(0.5)).len(), 2);
        assert_eq!(theory.alpha_cut(necessity(0.3)), theory.alpha_cut(necessity(0.5)));
        assert_eq!(theory.alpha_level(necessity(0.75)).count(), 1);
        assert_eq!(theory.subtheory(necessity(0.5)).level_count(), 2);
        assert_eq!(theory.strict_subtheory(necessity(0.5)).level_count(), 1);
        assert_eq!(theory.strict_subtheory(necessity(0.5)).hard_rules().len(), 1);
    }

    #[test]
    fn preferred_level_is_lowest_consistent() {
        let theory = PossibilisticTheory::from_stratification(vec![
            vec![clause("!a")],
            vec![clause("b")],
            vec![clause("!b, c")],
        ]);
        let evidence = Evidence::from([literal("a")]);
        let (witness, level) = theory.solve(&evidence).unwrap().unwrap();
        assert_eq!(level, Necessity::of_level(1, 3));
        assert!(witness.contains(&literal("c")));

        assert!(theory.implies_literal(&evidence, &literal("c")).unwrap());
        assert!(!theory
            .implies_literal(&Evidence::default(), &literal("a"))
            .unwrap());
    }

    #[test]
    fn no_levels_uses_hard_rules() {
        let theory = PossibilisticTheory::new().with_hard_rules([clause("!a, b")]);
        let evidence = Evidence::from([literal("a")]);
        let (_, level) = theory.solve(&evidence).unwrap().unwrap();
        assert_eq!(level, Necessity::CERTAIN);
        assert!(theory.implies_literal(&evidence, &literal("b")).unwrap());

        let contradiction = Evidence::from([literal("a"), literal("!b")]);
        assert!(theory.solve(&contradiction).unwrap().is_none());
        assert!(!theory.implies_literal(&contradiction, &literal("b")).unwrap());
    }

    #[test]
    fn non_ground_rejected() {
        let mut theory = PossibilisticTheory::new();
        theory.add_rule(clause("a"), necessity(0.5));
        assert!(theory.is_ground());
        theory.add_rule(clause("p(X)"), necessity(0.5));
        assert!(!theory.is_ground());
        assert!(matches!(
            theory.solve(&Evidence::default()),
            Err(ErrorKind::Theory(err::TheoryError::NonGround))
        ));
        theory.remove_everywhere(&clause("p(X)"));
        assert!(theory.is_ground());
    }

    #[test]
    fn falsified_rules_removed() {
        let mut theory = PossibilisticTheory::from_rules([
            (clause("!a, b"), necessity(0.5)),
            (clause("!a"), necessity(0.75)),
            (clause("c"), necessity(0.75)),
        ])
        .with_hard_rules([clause("!a")]);
        theory.remove_rules_directly_falsified_by_evidence(&Evidence::from([literal("a")]));

        assert_eq!(theory.level_count(), 2);
        assert_eq!(theory.alpha_level(necessity(0.75)).count(), 1);
        assert!(theory.hard_rules().contains(&clause("!a")));
    }

    #[test]
    fn most_plausible_model_respects_levels() {
        let theory = PossibilisticTheory::from_stratification(vec![
            vec![clause("!bird, flies")],
            vec![clause("!penguin, !flies"), clause("!penguin, bird")],
        ]);
        let witness = theory
            .most_plausible_model(&Evidence::from([literal("penguin")]))
            .unwrap()
            .unwrap();
        assert!(witness.contains(&literal("bird")));
        assert!(!witness.contains(&literal("flies")));
    }

    #[test]
    fn display_lists_levels_descending() {
        let theory = PossibilisticTheory::from_stratification(vec![
            vec![clause("a")],
            vec![clause("b")],
        ])
        .with_hard_rules([clause("c")]);
        let text = theory.to_string();
        let hard = text.find("Hard rules").unwrap();
        let b = text.find("  b").unwrap();
        let a = text.find("  a").unwrap();
        assert!(hard < b && b < a);
    }
}
