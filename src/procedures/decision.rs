/*!
A core method for making decisions.

See [Core::make_decision] for the relevant method.

# Overview
Assumptions are decided first, each at its own level, in the order given.
- An assumption which is already true is given an empty level, so the level of an assumption is always its position in the list of assumptions.
- An assumption which is already false is a conflict with the assumptions.

Otherwise, an atom without a value is chosen.
- Typically, the atom with the greatest activity.
- With probability [random_decision_bias](crate::config::Config::random_decision_bias), some atom without a value at random.

And the atom is valued with its previous value (if phase saving), or with probability [polarity_lean](crate::config::Config::polarity_lean) true.
*/

use rand::Rng;

use crate::{
    engine::core::Core,
    misc::log::targets,
    structures::{atom::Atom, literal::CLiteral},
};

/// Ok results of making a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionOk {
    /// A literal was decided, either an assumption or a free choice.
    Literal(CLiteral),

    /// An assumption was already true.
    Satisfied,

    /// Some assumption is false.
    AssumptionConflict,

    /// Every atom has a value.
    Exhausted,
}

impl Core {
    /// For documentation see [procedures::decision](crate::procedures::decision).
    pub fn make_decision(&mut self, assumptions: &[CLiteral]) -> DecisionOk {
        if let Some(&assumption) = assumptions.get(self.trail.level() as usize) {
            return match self.literal_value(assumption) {
                Some(true) => {
                    self.trail.open_level();
                    DecisionOk::Satisfied
                }

                Some(false) => {
                    log::trace!(target: targets::DECISION, "Assumption {assumption} is false");
                    DecisionOk::AssumptionConflict
                }

                None => {
                    self.decide(assumption);
                    DecisionOk::Literal(assumption)
                }
            };
        }

        match self.choose_atom() {
            None => DecisionOk::Exhausted,

            Some(atom) => {
                let polarity = match self.config.phase_saving {
                    true => self.previous[atom as usize],
                    false => self.rng.random_bool(self.config.polarity_lean),
                };
                let literal = CLiteral::new(atom, polarity);
                self.counters.decisions += 1;
                self.decide(literal);
                DecisionOk::Literal(literal)
            }
        }
    }

    fn decide(&mut self, literal: CLiteral) {
        log::trace!(target: targets::DECISION, "Decided {literal}");
        self.trail.open_level();
        self.assign(literal, None);
    }

    /// An atom without a value, if one exists.
    fn choose_atom(&mut self) -> Option<Atom> {
        if self.config.random_decision_bias > 0.0
            && self.rng.random_bool(self.config.random_decision_bias)
        {
            let unvalued = self
                .values
                .iter()
                .enumerate()
                .skip(1)
                .filter(|(_, value)| value.is_none())
                .map(|(atom, _)| atom as Atom)
                .collect::<Vec<_>>();
            if !unvalued.is_empty() {
                let choice = unvalued[self.rng.random_range(0..unvalued.len())];
                self.activity.remove(choice as usize);
                return Some(choice);
            }
        }

        while let Some(index) = self.activity.pop_max() {
            if self.values[index].is_none() {
                return Some(index as Atom);
            }
        }
        None
    }
}
