/*!
A conflict driven clause learning solver, over [CLiterals](CLiteral).

The core decides satisfiability of a growing collection of clauses, optionally given some assumptions.
Procedures of the core are spread across the [procedures](crate::procedures) module, with this module holding the structure, construction, and the addition of clauses.

# Overview

- Atoms are contiguous, from 1, and are obtained through [fresh_atom](Core::fresh_atom).
- Clauses may be added at any time, and are added at level zero.
  A clause which is satisfied at level zero is dropped, and literals false at level zero are removed.
  If the empty clause is reached the core is permanently [unsatisfiable](CoreState::Unsatisfiable).
- A solve returns a [Report], and on a report of satisfiability the valuation of the core is a model of the clauses (and assumptions).

```rust
# use tweety::config::Config;
# use tweety::engine::core::{Core, Report};
# use tweety::structures::literal::CLiteral;
let mut core = Core::new(&Config::default());
let p = core.fresh_atom();
let q = core.fresh_atom();

core.add_clause(vec![CLiteral::new(p, true), CLiteral::new(q, true)]);
core.add_clause(vec![CLiteral::new(p, false)]);

assert_eq!(core.solve_given(&[], None).unwrap(), Report::Satisfiable);
assert_eq!(core.value_of(q), Some(true));

let not_q = CLiteral::new(q, false);
assert_eq!(core.solve_given(&[not_q], None).unwrap(), Report::AssumptionConflict);

core.add_clause(vec![not_q]);
assert_eq!(core.solve_given(&[], None).unwrap(), Report::Unsatisfiable);
```
*/

use rand::SeedableRng;

use crate::{
    config::Config,
    db::{trail::Trail, ClauseKey, LevelIndex},
    generic::{index_heap::IndexHeap, luby::Luby, minimal_pcg::MinimalPCG32},
    misc::log::targets,
    structures::{atom::Atom, literal::CLiteral},
};

/// The result of a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    /// The clauses (and assumptions) are satisfiable, and the valuation of the core is a model.
    Satisfiable,

    /// The clauses are unsatisfiable, regardless of any assumptions.
    Unsatisfiable,

    /// The clauses are unsatisfiable, given the assumptions.
    AssumptionConflict,

    /// The time limit was reached before satisfiability was determined.
    TimeUp,
}

/// The state of the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoreState {
    /// No conflict has been found at level zero.
    Consistent,

    /// The empty clause has been derived.
    Unsatisfiable,
}

/// Counts of things which happen during a solve.
#[derive(Clone, Copy, Debug, Default)]
pub struct Counters {
    pub conflicts: usize,
    pub decisions: usize,
    pub propagations: usize,
    pub restarts: usize,
}

/// The parts of a [Config] used by a core.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CoreConfig {
    pub luby_u: u32,
    pub polarity_lean: f64,
    pub random_decision_bias: f64,
    pub phase_saving: bool,
    pub restart: bool,
    pub activity_decay: f64,
}

/// The core solver.
pub struct Core {
    pub(crate) config: CoreConfig,

    /// The value of each atom, if any.
    pub(crate) values: Vec<Option<bool>>,

    /// The previous value of each atom, for phase saving.
    pub(crate) previous: Vec<bool>,

    /// The decision level at which each atom was valued.
    pub(crate) levels: Vec<LevelIndex>,

    /// The clause which implied the value of each atom, if the value was implied.
    pub(crate) reasons: Vec<Option<ClauseKey>>,

    /// Each clause of at least two literals, with the first two literals of a clause watched.
    pub(crate) clauses: Vec<Vec<CLiteral>>,

    /// For each literal, the keys of the clauses watching the literal.
    pub(crate) watches: Vec<Vec<ClauseKey>>,

    pub(crate) trail: Trail,

    /// The activity of each atom, with unvalued atoms active on the heap.
    pub(crate) activity: IndexHeap<f64>,

    /// The value added to the activity of an atom when bumped.
    pub(crate) bump: f64,

    /// Marks for atoms during conflict analysis.
    pub(crate) seen: Vec<bool>,

    pub(crate) luby: Luby,

    pub(crate) conflicts_since_restart: usize,

    pub(crate) restart_threshold: usize,

    pub(crate) rng: MinimalPCG32,

    pub(crate) state: CoreState,

    pub counters: Counters,
}

impl Core {
    pub fn new(config: &Config) -> Self {
        let core_config = CoreConfig {
            luby_u: config.luby_u.value,
            polarity_lean: config.polarity_lean.value,
            random_decision_bias: config.random_decision_bias.value,
            phase_saving: config.phase_saving.value,
            restart: config.restart.value,
            activity_decay: config.activity_decay.value,
        };

        let mut luby = Luby::default();
        let restart_threshold =
            (core_config.luby_u as usize).saturating_mul(luby.next().unwrap_or(1) as usize);

        Core {
            config: core_config,
            // Index zero is unused, so atoms may index directly.
            values: vec![None],
            previous: vec![false],
            levels: vec![0],
            reasons: vec![None],
            clauses: Vec::default(),
            watches: vec![Vec::default(), Vec::default()],
            trail: Trail::default(),
            activity: IndexHeap::default(),
            bump: 1.0,
            seen: vec![false],
            luby,
            conflicts_since_restart: 0,
            restart_threshold,
            rng: MinimalPCG32::from_seed(0_u64.to_le_bytes()),
            state: CoreState::Consistent,
            counters: Counters::default(),
        }
    }

    /// A fresh atom, with no value.
    pub fn fresh_atom(&mut self) -> Atom {
        let atom = self.values.len() as Atom;
        self.values.push(None);
        self.previous.push(false);
        self.levels.push(0);
        self.reasons.push(None);
        self.seen.push(false);
        self.watches.push(Vec::default());
        self.watches.push(Vec::default());
        self.activity.add(atom as usize, 0.0);
        self.activity.activate(atom as usize);
        atom
    }

    /// A count of atoms in the core.
    pub fn atom_count(&self) -> usize {
        self.values.len() - 1
    }

    pub fn state(&self) -> CoreState {
        self.state
    }

    /// The value of `atom`, if any.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.values.get(atom as usize).copied().flatten()
    }

    /// The value of `literal`, if any, given the value of the atom of the literal.
    pub fn literal_value(&self, literal: CLiteral) -> Option<bool> {
        literal_value(&self.values, literal)
    }

    /// The literals true on the current valuation.
    ///
    /// After a report of satisfiability, this is a model.
    pub fn valuation(&self) -> impl Iterator<Item = CLiteral> + '_ {
        self.values
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(atom, value)| value.map(|v| CLiteral::new(atom as Atom, v)))
    }

    /// Adds a clause to the core, at level zero.
    ///
    /// Any decisions are undone, and the clause is simplified with respect to the valuation at level zero.
    /// Returns the state of the core after the addition.
    pub fn add_clause(&mut self, clause: Vec<CLiteral>) -> CoreState {
        self.backjump(0);
        if self.state == CoreState::Unsatisfiable {
            return self.state;
        }

        let mut simplified: Vec<CLiteral> = Vec::with_capacity(clause.len());
        for literal in clause {
            match self.literal_value(literal) {
                Some(true) => {
                    log::trace!(target: targets::PROPAGATION, "Clause satisfied at level zero by {literal}");
                    return self.state;
                }
                Some(false) => {}
                None => {
                    if simplified.contains(&literal.negate()) {
                        return self.state;
                    }
                    if !simplified.contains(&literal) {
                        simplified.push(literal);
                    }
                }
            }
        }

        match simplified.len() {
            0 => {
                log::trace!(target: targets::PROPAGATION, "Empty clause at level zero");
                self.state = CoreState::Unsatisfiable;
            }

            1 => {
                self.assign(simplified[0], None);
                if self.bcp().is_err() {
                    self.state = CoreState::Unsatisfiable;
                }
            }

            _ => {
                self.store_clause(simplified);
            }
        }

        self.state
    }

    /// Stores a clause of at least two literals, watching the first two literals.
    pub(crate) fn store_clause(&mut self, clause: Vec<CLiteral>) -> ClauseKey {
        let key = self.clauses.len();
        self.watches[clause[0].watch_index()].push(key);
        self.watches[clause[1].watch_index()].push(key);
        self.clauses.push(clause);
        key
    }

    /// Values the atom of `literal` to match the polarity of the literal, at the current level.
    pub(crate) fn assign(&mut self, literal: CLiteral, reason: Option<ClauseKey>) {
        let atom = literal.atom() as usize;
        self.values[atom] = Some(literal.polarity());
        self.previous[atom] = literal.polarity();
        self.levels[atom] = self.trail.level();
        self.reasons[atom] = reason;
        self.trail.store_assignment(literal);
    }
}

/// The value of `literal` on `values`.
///
/// A free function, so the value of a literal may be read while some other part of the core is borrowed.
pub(crate) fn literal_value(values: &[Option<bool>], literal: CLiteral) -> Option<bool> {
    values[literal.atom() as usize].map(|value| value == literal.polarity())
}
