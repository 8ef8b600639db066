/*!
A core method for backjumping.

See [Core::backjump] for the relevant method.

Backjumping removes every level above some target level, clearing the value of each atom valued at those levels and returning the atom to the activity heap.
The value of a cleared atom is retained as the previous value of the atom, for phase saving.
*/

use crate::{db::LevelIndex, engine::core::Core, misc::log::targets};

impl Core {
    /// For documentation see [procedures::backjump](crate::procedures::backjump).
    pub fn backjump(&mut self, target: LevelIndex) {
        if self.trail.level() <= target {
            return;
        }
        log::trace!(target: targets::BACKJUMP, "Backjump from {} to {target}", self.trail.level());

        for literal in self.trail.clear_assigments_above(target) {
            let atom = literal.atom() as usize;
            self.values[atom] = None;
            self.reasons[atom] = None;
            self.activity.activate(atom);
        }
    }
}
