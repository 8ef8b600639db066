/*!
Weighted MaxSAT, by branch and bound over soft clauses.

Each soft clause is paired with a fresh relaxation atom, and the clause extended with the atom is added to a [core](crate::engine::core) as a hard clause.
So, a soft clause must be satisfied whenever its relaxation atom is false, and may be falsified otherwise.

# Search
Soft clauses are ordered by weight, heaviest first.
A depth-first search then, for each soft clause in turn:
1. Assumes the relaxation atom of the clause is false, so the clause must be satisfied.
2. Makes no assumption about the clause, with the weight of the clause added to the cost committed to by the branch.

At each node of the search the core is asked for a model under the current assumptions.
- If there is no model, the branch is pruned.
- Otherwise the cost of the model (the total weight of falsified soft clauses) may improve the best model found.
  And, if the cost of the model equals the committed cost of the branch, no model below the node is cheaper.

A branch is also pruned whenever the committed cost is at least the cost of the best model found.

Costs are [BigUint]s, as weights may be large.
*/

use std::time::Instant;

use num_bigint::BigUint;

use crate::{
    config::Config,
    engine::core::{Core, Report},
    misc::log::targets,
    structures::{atom::Atom, literal::CLiteral},
    types::err::ErrorKind,
};

/// A soft clause, within the optimizer.
struct SoftClause {
    literals: Vec<CLiteral>,
    weight: BigUint,
    relaxation: Atom,
}

/// The result of optimisation.
#[derive(Debug, PartialEq, Eq)]
pub enum OptimizationReport {
    /// A model of the hard clauses with minimal cost, restricted to atoms which are not relaxation atoms.
    Optimal { model: Vec<CLiteral>, cost: BigUint },

    /// The hard clauses are unsatisfiable.
    Infeasible,

    /// The time limit was reached before optimality was established.
    TimeUp,
}

/// The best model found during a search.
struct Best {
    model: Vec<CLiteral>,
    cost: BigUint,
}

/// Signals from a node of the search.
enum Search {
    Continue,
    TimeUp,
}

/// The optimizer.
pub struct Optimizer {
    core: Core,

    /// Atoms of the hard and soft clauses, excluding relaxation atoms.
    atom_count: usize,

    /// Soft clauses, heaviest first.
    soft: Vec<SoftClause>,
}

impl Optimizer {
    /// An optimizer for `hard` and `soft`, over atoms 1 to `atom_count`.
    pub fn new(
        config: &Config,
        atom_count: usize,
        hard: &[Vec<CLiteral>],
        soft: &[(Vec<CLiteral>, BigUint)],
    ) -> Self {
        let mut core = Core::new(config);
        for _ in 0..atom_count {
            core.fresh_atom();
        }
        for clause in hard {
            core.add_clause(clause.clone());
        }

        let mut soft_clauses = Vec::with_capacity(soft.len());
        for (literals, weight) in soft {
            let relaxation = core.fresh_atom();
            let mut relaxed = literals.clone();
            relaxed.push(CLiteral::new(relaxation, true));
            core.add_clause(relaxed);
            soft_clauses.push(SoftClause {
                literals: literals.clone(),
                weight: weight.clone(),
                relaxation,
            });
        }
        soft_clauses.sort_by(|a, b| b.weight.cmp(&a.weight));

        Optimizer {
            core,
            atom_count,
            soft: soft_clauses,
        }
    }

    /// Adds a hard clause.
    pub fn add_hard_clause(&mut self, clause: Vec<CLiteral>) {
        self.core.add_clause(clause);
    }

    /// A model of the hard clauses with minimal cost, within the deadline (if given).
    pub fn optimize(&mut self, deadline: Option<Instant>) -> Result<OptimizationReport, ErrorKind> {
        let mut best: Option<Best> = None;
        let mut assumptions = Vec::with_capacity(self.soft.len());

        let search = self.branch(0, &mut assumptions, BigUint::ZERO, &mut best, deadline)?;

        match (search, best) {
            (Search::TimeUp, _) => {
                log::info!(target: targets::OPTIMIZER, "Optimisation timed out");
                Ok(OptimizationReport::TimeUp)
            }

            (Search::Continue, None) => Ok(OptimizationReport::Infeasible),

            (Search::Continue, Some(best)) => {
                log::debug!(target: targets::OPTIMIZER, "Optimal cost {}", best.cost);
                Ok(OptimizationReport::Optimal {
                    model: best.model,
                    cost: best.cost,
                })
            }
        }
    }

    fn branch(
        &mut self,
        depth: usize,
        assumptions: &mut Vec<CLiteral>,
        committed: BigUint,
        best: &mut Option<Best>,
        deadline: Option<Instant>,
    ) -> Result<Search, ErrorKind> {
        if best.as_ref().is_some_and(|best| committed >= best.cost) {
            return Ok(Search::Continue);
        }

        match self.core.solve_given(assumptions, deadline)? {
            Report::TimeUp => return Ok(Search::TimeUp),

            Report::Unsatisfiable | Report::AssumptionConflict => return Ok(Search::Continue),

            Report::Satisfiable => {
                let cost = self.model_cost();
                if best.as_ref().map_or(true, |best| cost < best.cost) {
                    log::trace!(target: targets::OPTIMIZER, "Improved cost to {cost}");
                    *best = Some(Best {
                        model: self.model(),
                        cost: cost.clone(),
                    });
                }
                if cost == committed {
                    return Ok(Search::Continue);
                }
            }
        }

        if depth == self.soft.len() {
            return Ok(Search::Continue);
        }

        assumptions.push(CLiteral::new(self.soft[depth].relaxation, false));
        let satisfied = self.branch(depth + 1, assumptions, committed.clone(), best, deadline)?;
        assumptions.pop();
        if let Search::TimeUp = satisfied {
            return Ok(Search::TimeUp);
        }

        let relaxed = committed + &self.soft[depth].weight;
        self.branch(depth + 1, assumptions, relaxed, best, deadline)
    }

    /// The total weight of soft clauses falsified by the current valuation of the core.
    fn model_cost(&self) -> BigUint {
        self.soft
            .iter()
            .filter(|soft| {
                !soft
                    .literals
                    .iter()
                    .any(|literal| self.core.literal_value(*literal) == Some(true))
            })
            .map(|soft| &soft.weight)
            .sum()
    }

    /// The current valuation of the core, without relaxation atoms.
    fn model(&self) -> Vec<CLiteral> {
        self.core
            .valuation()
            .filter(|literal| literal.atom() as usize <= self.atom_count)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(int: i32) -> CLiteral {
        CLiteral::from_int(int)
    }

    #[test]
    fn heaviest_soft_clauses_kept() {
        let hard = vec![vec![lit(-1), lit(-2)]];
        let soft = vec![
            (vec![lit(1)], BigUint::from(3_u32)),
            (vec![lit(2)], BigUint::from(5_u32)),
            (vec![lit(3)], BigUint::from(1_u32)),
        ];
        let mut optimizer = Optimizer::new(&Config::default(), 3, &hard, &soft);

        match optimizer.optimize(None).unwrap() {
            OptimizationReport::Optimal { model, cost } => {
                assert_eq!(cost, BigUint::from(3_u32));
                assert!(model.contains(&lit(2)));
                assert!(model.contains(&lit(-1)));
                assert!(model.contains(&lit(3)));
                assert_eq!(model.len(), 3);
            }
            other => panic!("unexpected report {other:?}"),
        }
    }

    #[test]
    fn infeasible_hard_clauses() {
        let hard = vec![vec![lit(1)], vec![lit(-1)]];
        let soft = vec![(vec![lit(1)], BigUint::from(1_u32))];
        let mut optimizer = Optimizer::new(&Config::default(), 1, &hard, &soft);
        assert_eq!(optimizer.optimize(None).unwrap(), OptimizationReport::Infeasible);
    }

    #[test]
    fn added_hard_clauses() {
        let soft = vec![
            (vec![lit(1)], BigUint::from(2_u32)),
            (vec![lit(2)], BigUint::from(2_u32)),
        ];
        let mut optimizer = Optimizer::new(&Config::default(), 2, &[], &soft);
        assert!(matches!(
            optimizer.optimize(None).unwrap(),
            OptimizationReport::Optimal { cost, .. } if cost == BigUint::ZERO
        ));

        optimizer.add_hard_clause(vec![lit(-1)]);
        assert!(matches!(
            optimizer.optimize(None).unwrap(),
            OptimizationReport::Optimal { cost, .. } if cost == BigUint::from(2_u32)
        ));
    }
}
