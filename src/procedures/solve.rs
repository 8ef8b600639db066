/*!
A core method for determining satisfiability.

See [Core::solve_given] for the relevant method.

# Overview
A loop of propagation, and then:
- On a conflict at level zero, the clauses are unsatisfiable, and the core is marked as such.
- On a conflict above level zero, a clause is learnt by [analysis](crate::procedures::analysis), the core [backjumps](crate::procedures::backjump), and the learnt clause asserts its first literal.
- Otherwise, a [decision](crate::procedures::decision) is made, with assumptions decided first.

Restarts are scheduled by the [luby](crate::generic::luby) sequence, multiplied by [luby_u](crate::config::Config::luby_u).
A restart backjumps to level zero, and so assumptions are decided again afterwards.

A solve always begins at level zero, so consecutive solves with different assumptions do not interfere.
Clauses learnt during a solve are kept, as each is a consequence of the clauses of the core alone.

If a deadline is given, the deadline is checked before each decision, and a solve which passes the deadline returns [TimeUp](Report::TimeUp).
*/

use std::time::Instant;

use crate::{
    engine::core::{Core, CoreState, Report},
    misc::log::targets,
    procedures::decision::DecisionOk,
    structures::literal::CLiteral,
    types::err::ErrorKind,
};

impl Core {
    /// For documentation see [procedures::solve](crate::procedures::solve).
    pub fn solve_given(
        &mut self,
        assumptions: &[CLiteral],
        deadline: Option<Instant>,
    ) -> Result<Report, ErrorKind> {
        self.backjump(0);
        if self.state == CoreState::Unsatisfiable {
            return Ok(Report::Unsatisfiable);
        }

        loop {
            match self.bcp() {
                Err(key) => {
                    self.counters.conflicts += 1;
                    self.conflicts_since_restart += 1;

                    if !self.trail.decision_is_made() {
                        log::trace!(target: targets::ANALYSIS, "Conflict at level zero");
                        self.state = CoreState::Unsatisfiable;
                        return Ok(Report::Unsatisfiable);
                    }

                    let analysis = self.conflict_analysis(key)?;
                    self.backjump(analysis.backjump_level);

                    let asserted = analysis.clause[0];
                    match analysis.clause.len() {
                        1 => self.assign(asserted, None),
                        _ => {
                            let key = self.store_clause(analysis.clause);
                            self.assign(asserted, Some(key));
                        }
                    }

                    self.decay_activity();

                    if self.config.restart && self.conflicts_since_restart >= self.restart_threshold {
                        self.restart();
                    }
                }

                Ok(()) => {
                    if deadline.is_some_and(|deadline| Instant::now() > deadline) {
                        log::info!(target: targets::DECISION, "Time limit reached after {} conflicts", self.counters.conflicts);
                        return Ok(Report::TimeUp);
                    }

                    match self.make_decision(assumptions) {
                        DecisionOk::Literal(_) | DecisionOk::Satisfied => {}

                        DecisionOk::AssumptionConflict => return Ok(Report::AssumptionConflict),

                        DecisionOk::Exhausted => return Ok(Report::Satisfiable),
                    }
                }
            }
        }
    }

    fn restart(&mut self) {
        self.counters.restarts += 1;
        self.conflicts_since_restart = 0;
        self.restart_threshold =
            (self.config.luby_u as usize).saturating_mul(self.luby.next().unwrap_or(1) as usize);
        log::trace!(target: targets::BACKJUMP, "Restart {}, next after {} conflicts", self.counters.restarts, self.restart_threshold);
        self.backjump(0);
    }
}
