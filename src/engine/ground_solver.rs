/*!
A satisfiability (and weighted optimisation) solver for ground clauses.

A ground solver owns a [LiteralIndex], populated with every literal of the hard and soft clauses given on construction.
The index is not extended afterwards, and any clause added to the solver must use only indexed literals.

The solver for hard clauses and the optimizer are each built on first use, and each moves between two states:
- [Unbuilt](SolverState::Unbuilt), before the first solve (or optimisation).
  Clauses added in this state are held with the hard clauses given on construction.
- [Built](SolverState::Built), after the first solve.
  Clauses added in this state are queued, and the queue is flushed to the core on the next solve, so only new clauses are fed to the (incremental) core.

```rust
# use tweety::engine::GroundSolver;
# use tweety::structures::clause::Clause;
let clause = |s: &str| s.parse::<Clause>().unwrap();

let mut solver = GroundSolver::new([clause("!bird(x), flies(x)")]).unwrap();
assert!(solver.solve().unwrap().is_some());

solver.add_clause(&clause("!flies(x)")).unwrap();
let witness = solver.solve().unwrap().unwrap();
assert!(witness.is_empty());

solver.add_clause(&clause("bird(x)")).unwrap();
assert!(solver.solve().unwrap().is_none());
```
*/

use std::{mem, time::Instant};

use num_bigint::BigUint;

use crate::{
    config::Config,
    engine::{
        core::{Core, Report},
        index::LiteralIndex,
        optimizer::{OptimizationReport, Optimizer},
        Witness,
    },
    misc::log::targets,
    structures::{clause::Clause, literal::CLiteral, literal::Literal},
    types::err::{EngineError, ErrorKind},
};

/// The state of the solver for hard clauses.
pub enum SolverState {
    Unbuilt,
    Built { core: Core, pending: Vec<Vec<CLiteral>> },
}

/// The state of the optimizer.
pub enum OptimizerState {
    Unbuilt,
    Built {
        optimizer: Box<Optimizer>,
        pending: Vec<Vec<CLiteral>>,
    },
}

/// The ground solver.
pub struct GroundSolver {
    config: Config,

    index: LiteralIndex,

    /// Every hard clause known to the solver, including those added after construction.
    hard: Vec<Vec<CLiteral>>,

    soft: Vec<(Vec<CLiteral>, BigUint)>,

    solver: SolverState,

    optimizer: OptimizerState,
}

impl GroundSolver {
    /// A solver for `hard`, with the default configuration.
    pub fn new(hard: impl IntoIterator<Item = impl AsRef<Clause>>) -> Result<Self, ErrorKind> {
        GroundSolver::with_soft(hard, std::iter::empty::<(Clause, BigUint)>(), Config::default())
    }

    /// A solver for `hard`, with `config`.
    pub fn with_config(
        hard: impl IntoIterator<Item = impl AsRef<Clause>>,
        config: Config,
    ) -> Result<Self, ErrorKind> {
        GroundSolver::with_soft(hard, std::iter::empty::<(Clause, BigUint)>(), config)
    }

    /// A solver for `hard` and the weighted clauses of `soft`.
    ///
    /// Each weight is the cost of falsifying the clause, and must be positive.
    pub fn with_soft(
        hard: impl IntoIterator<Item = impl AsRef<Clause>>,
        soft: impl IntoIterator<Item = (Clause, BigUint)>,
        config: Config,
    ) -> Result<Self, ErrorKind> {
        let hard = hard.into_iter().collect::<Vec<_>>();
        let soft = soft.into_iter().collect::<Vec<_>>();

        let mut index = LiteralIndex::default();
        for (clause, weight) in &soft {
            if *weight == BigUint::ZERO {
                return Err(EngineError::ZeroWeight.into());
            }
            index.register_clause(clause)?;
        }
        for clause in &hard {
            index.register_clause(clause.as_ref())?;
        }

        let hard_clauses = hard
            .iter()
            .map(|clause| index.c_clause_of(clause.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let soft_clauses = soft
            .iter()
            .map(|(clause, weight)| Ok((index.c_clause_of(clause)?, weight.clone())))
            .collect::<Result<Vec<_>, EngineError>>()?;

        log::trace!(target: targets::ENGINE, "Ground solver over {} atoms, {} hard and {} soft clauses", index.len(), hard_clauses.len(), soft_clauses.len());

        Ok(GroundSolver {
            config,
            index,
            hard: hard_clauses,
            soft: soft_clauses,
            solver: SolverState::Unbuilt,
            optimizer: OptimizerState::Unbuilt,
        })
    }

    pub fn index(&self) -> &LiteralIndex {
        &self.index
    }

    /// Queues `clause` to be added to the hard clauses on the next solve or optimisation.
    ///
    /// Every literal of the clause must be in the index of the solver.
    pub fn add_clause(&mut self, clause: &Clause) -> Result<(), ErrorKind> {
        let c_clause = self.index.c_clause_of(clause)?;

        if let SolverState::Built { pending, .. } = &mut self.solver {
            pending.push(c_clause.clone());
        }
        if let OptimizerState::Built { pending, .. } = &mut self.optimizer {
            pending.push(c_clause.clone());
        }
        self.hard.push(c_clause);
        Ok(())
    }

    /// Some model of the hard clauses, as the positive literals true on the model, or `None` if there is no model.
    pub fn solve(&mut self) -> Result<Option<Witness>, ErrorKind> {
        self.solve_assuming(&[])
    }

    /// Some model of the hard clauses on which each of `assumptions` is true, or `None` if there is no such model.
    ///
    /// The assumptions hold only for this solve.
    /// If the [time limit](Config::time_limit) is reached the solve fails with [TimeUp](EngineError::TimeUp), as no answer is known.
    pub fn solve_assuming(&mut self, assumptions: &[Literal]) -> Result<Option<Witness>, ErrorKind> {
        let assumptions = assumptions
            .iter()
            .map(|literal| {
                self.index
                    .c_literal_of(literal)
                    .ok_or_else(|| EngineError::UnindexedLiteral(literal.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut core = match mem::replace(&mut self.solver, SolverState::Unbuilt) {
            SolverState::Unbuilt => {
                let mut core = Core::new(&self.config);
                for _ in 0..self.index.len() {
                    core.fresh_atom();
                }
                for clause in &self.hard {
                    core.add_clause(clause.clone());
                }
                core
            }

            SolverState::Built { mut core, pending } => {
                for clause in pending {
                    core.add_clause(clause);
                }
                core
            }
        };

        let deadline = self.config.time_limit().map(|limit| Instant::now() + limit);
        let report = core.solve_given(&assumptions, deadline);

        let witness = match report {
            Ok(Report::Satisfiable) => Ok(Some(witness_of(&self.index, core.valuation()))),

            Ok(Report::Unsatisfiable) | Ok(Report::AssumptionConflict) => Ok(None),

            Ok(Report::TimeUp) => {
                log::warn!(target: targets::ENGINE, "Solve abandoned at the time limit");
                Err(EngineError::TimeUp.into())
            }

            Err(e) => Err(e),
        };

        self.solver = SolverState::Built {
            core,
            pending: Vec::default(),
        };

        witness
    }

    /// A model of the hard clauses which minimises the total weight of falsified soft clauses.
    ///
    /// `None` if the hard clauses are unsatisfiable, or if the [optimisation timeout](Config::optimisation_timeout) is reached.
    pub fn optimize(&mut self) -> Result<Option<Witness>, ErrorKind> {
        let mut optimizer = match mem::replace(&mut self.optimizer, OptimizerState::Unbuilt) {
            OptimizerState::Unbuilt => Box::new(Optimizer::new(
                &self.config,
                self.index.len(),
                &self.hard,
                &self.soft,
            )),

            OptimizerState::Built {
                mut optimizer,
                pending,
            } => {
                for clause in pending {
                    optimizer.add_hard_clause(clause);
                }
                optimizer
            }
        };

        let deadline = self
            .config
            .optimisation_timeout()
            .map(|limit| Instant::now() + limit);
        let report = optimizer.optimize(deadline);

        self.optimizer = OptimizerState::Built {
            optimizer,
            pending: Vec::default(),
        };

        match report? {
            OptimizationReport::Optimal { model, .. } => {
                Ok(Some(witness_of(&self.index, model.into_iter())))
            }

            OptimizationReport::Infeasible | OptimizationReport::TimeUp => Ok(None),
        }
    }
}

/// The positive literals of `valuation`, as symbolic literals.
fn witness_of(index: &LiteralIndex, valuation: impl Iterator<Item = CLiteral>) -> Witness {
    valuation
        .filter(|literal| literal.polarity())
        .filter_map(|literal| index.literal_of(literal.atom()).cloned())
        .collect()
}
