use crate::structures::literal::CLiteral;

use super::LevelIndex;

/// The literals valued during a solve, in order of valuation, partitioned into decision levels.
#[derive(Default)]
pub struct Trail {
    /// Each valued literal, in order.
    pub literals: Vec<CLiteral>,

    /// The index in `literals` of the first literal of each decision level above zero.
    pub level_indicies: Vec<usize>,

    /// The index of the first literal in `literals` which has not been propagated.
    pub q_head: usize,
}

impl Trail {
    /// Stores a consequence of the top decision level.
    pub fn store_assignment(&mut self, literal: CLiteral) {
        self.literals.push(literal);
    }

    /// Opens a fresh decision level.
    pub fn open_level(&mut self) {
        self.level_indicies.push(self.literals.len());
    }

    /// The current level.
    pub fn level(&self) -> LevelIndex {
        self.level_indicies.len() as LevelIndex
    }

    /// Returns true if some decision is active, false otherwise.
    pub fn decision_is_made(&self) -> bool {
        !self.level_indicies.is_empty()
    }

    /// The next literal to propagate, if any, advancing the queue past the literal.
    pub fn next_to_propagate(&mut self) -> Option<CLiteral> {
        let literal = self.literals.get(self.q_head).copied();
        if literal.is_some() {
            self.q_head += 1;
        }
        literal
    }

    /// Removes levels above the given level index, if they exist, and returns the literals of those levels.
    ///
    /// # Soundness
    /// Does not clear the *valuation* of the literals.
    pub fn clear_assigments_above(&mut self, level: LevelIndex) -> Vec<CLiteral> {
        // level_indicies stores with zero-indexing.
        // So, the first literal of level i + 1 is at literals[level_indicies[i]].
        if let Some(&level_start) = self.level_indicies.get(level as usize) {
            self.level_indicies.truncate(level as usize);
            self.q_head = self.q_head.min(level_start);
            self.literals.split_off(level_start)
        } else {
            Vec::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels() {
        let mut trail = Trail::default();
        trail.store_assignment(CLiteral::new(1, true));
        trail.open_level();
        trail.store_assignment(CLiteral::new(2, false));
        trail.store_assignment(CLiteral::new(3, true));
        trail.open_level();
        trail.store_assignment(CLiteral::new(4, true));

        assert_eq!(trail.level(), 2);
        while trail.next_to_propagate().is_some() {}
        assert_eq!(trail.q_head, 4);

        let cleared = trail.clear_assigments_above(1);
        assert_eq!(cleared, vec![CLiteral::new(4, true)]);
        assert_eq!(trail.level(), 1);
        assert_eq!(trail.q_head, 3);

        let cleared = trail.clear_assigments_above(0);
        assert_eq!(cleared.len(), 2);
        assert!(!trail.decision_is_made());
        assert_eq!(trail.literals, vec![CLiteral::new(1, true)]);
        assert!(trail.clear_assigments_above(0).is_empty());
    }
}
