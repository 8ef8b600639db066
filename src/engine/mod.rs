/*!
The ground SAT/MaxSAT engine.

- [index] maps literals to the atoms of a core.
- [core] is a CDCL solver over atoms.
- [optimizer] extends a core with relaxation atoms for weighted MaxSAT.
- [GroundSolver] combines the above, and is the interface used by the rest of the library.

The engine is single-threaded.
A query made in parallel with other queries is expected to build its own ground solver.
*/

pub mod core;
pub mod index;
pub mod optimizer;

mod ground_solver;
pub use ground_solver::{GroundSolver, OptimizerState, SolverState};

use std::collections::BTreeSet;

use crate::structures::literal::Literal;

/// A model, as the set of (positive) literals true on the model.
pub type Witness = BTreeSet<Literal>;
