/*!
A core method for conflict analysis.

See [Core::conflict_analysis] for the relevant method.

# Overview
Given a clause which conflicts with the current valuation, resolution is applied between the clause and the reasons for literals of the current level, in reverse order of valuation, until exactly one literal of the current level remains.
This is the first unique implication point (1UIP) of the conflict.

The resolved clause is asserting: after backjumping to the second highest level among its literals, the negation of the 1UIP is implied by the clause.
Literals valued at level zero are omitted from the clause, as these are fixed.

Each atom involved in the analysis has its activity bumped.
*/

use crate::{
    db::{ClauseKey, LevelIndex},
    engine::core::Core,
    misc::log::targets,
    structures::literal::CLiteral,
    types::err::{self},
};

/// The result of conflict analysis.
pub struct AnalysisResult {
    /// The asserting clause, with the asserted literal first and a literal of the backjump level second.
    pub clause: Vec<CLiteral>,

    /// The level to backjump to before asserting the clause.
    pub backjump_level: LevelIndex,
}

impl Core {
    /// For documentation see [procedures::analysis](crate::procedures::analysis).
    pub fn conflict_analysis(&mut self, key: ClauseKey) -> Result<AnalysisResult, err::AnalysisError> {
        let current_level = self.trail.level();

        // The first literal is a placeholder for the asserted literal.
        let mut clause = vec![CLiteral::new(0, false)];
        let mut unresolved: usize = 0;
        let mut resolving_key = key;
        let mut pivot: Option<CLiteral> = None;
        let mut trail_index = self.trail.literals.len();

        loop {
            for position in 0..self.clauses[resolving_key].len() {
                let literal = self.clauses[resolving_key][position];
                let atom = literal.atom() as usize;

                if pivot.is_some_and(|p| p.atom() == literal.atom()) {
                    continue;
                }
                if self.seen[atom] || self.levels[atom] == 0 {
                    continue;
                }

                self.seen[atom] = true;
                self.bump_activity(literal.atom());

                if self.levels[atom] == current_level {
                    unresolved += 1;
                } else {
                    clause.push(literal);
                }
            }

            if unresolved == 0 {
                return Err(err::AnalysisError::NoAssertion);
            }

            let next = loop {
                if trail_index == 0 {
                    return Err(err::AnalysisError::EmptyResolution);
                }
                trail_index -= 1;
                let candidate = self.trail.literals[trail_index];
                if self.seen[candidate.atom() as usize] {
                    break candidate;
                }
            };

            self.seen[next.atom() as usize] = false;
            unresolved -= 1;

            if unresolved == 0 {
                clause[0] = next.negate();
                break;
            }

            resolving_key = self.reasons[next.atom() as usize].ok_or(err::AnalysisError::MissingReason)?;
            pivot = Some(next);
        }

        for literal in &clause[1..] {
            self.seen[literal.atom() as usize] = false;
        }

        let mut backjump_level = 0;
        if clause.len() > 1 {
            let mut second = 1;
            for position in 2..clause.len() {
                if self.levels[clause[position].atom() as usize] > self.levels[clause[second].atom() as usize] {
                    second = position;
                }
            }
            clause.swap(1, second);
            backjump_level = self.levels[clause[1].atom() as usize];
        }

        log::trace!(target: targets::ANALYSIS, "Learnt a clause of length {} with backjump level {backjump_level}", clause.len());

        Ok(AnalysisResult {
            clause,
            backjump_level,
        })
    }

    /// Increases the activity of `atom`, rescaling all activity if required.
    pub(crate) fn bump_activity(&mut self, atom: crate::structures::atom::Atom) {
        let bump = self.bump;
        self.activity.apply_to_index(atom as usize, |activity| activity + bump);
        if *self.activity.value_at(atom as usize) > 1e100 {
            self.activity.apply_to_all(|activity| activity * 1e-100);
            self.bump *= 1e-100;
        }
    }

    /// Decays activity, by increasing the value of future bumps.
    pub(crate) fn decay_activity(&mut self) {
        self.bump /= self.config.activity_decay;
    }
}
