/*!
A core method for boolean constraint propagation.

See [Core::bcp] for the relevant method.

# Overview
Each literal on the trail which has not yet been propagated is taken in turn.
For a literal which has been valued true, the clauses watching the negation of the literal are examined, and for each clause either:
- The clause is satisfied by the other watched literal, and nothing is done.
- Some other literal of the clause is not false, and the watch is moved to that literal.
- The other watched literal is unvalued, and is implied by the clause.
- The other watched literal is false, and the clause conflicts with the valuation.

# Complications

The watch list being examined is taken from the core for the duration of the examination.
This allows a clause to be mutably borrowed (to swap its watched literals) while watches are added to other lists.
The taken list is never a candidate for a new watch, as the negation of a literal already valued true is false.
*/

use crate::{
    db::ClauseKey,
    engine::core::{literal_value, Core},
    misc::log::targets,
};

impl Core {
    /// For documentation see [procedures::bcp](crate::procedures::bcp).
    ///
    /// Returns the key of a conflicting clause, if a conflict is found.
    pub fn bcp(&mut self) -> Result<(), ClauseKey> {
        while let Some(literal) = self.trail.next_to_propagate() {
            self.counters.propagations += 1;
            let false_literal = literal.negate();
            let mut watch_list = std::mem::take(&mut self.watches[false_literal.watch_index()]);

            let mut conflict = None;
            let mut index = 0;

            'watch_loop: while index < watch_list.len() {
                let key = watch_list[index];
                let clause = &mut self.clauses[key];

                if clause[0] == false_literal {
                    clause.swap(0, 1);
                }
                let other = clause[0];

                if literal_value(&self.values, other) == Some(true) {
                    index += 1;
                    continue 'watch_loop;
                }

                for position in 2..clause.len() {
                    if literal_value(&self.values, clause[position]) != Some(false) {
                        clause.swap(1, position);
                        self.watches[clause[1].watch_index()].push(key);
                        watch_list.swap_remove(index);
                        continue 'watch_loop;
                    }
                }

                match literal_value(&self.values, other) {
                    None => {
                        log::trace!(target: targets::PROPAGATION, "{other} implied by clause {key}");
                        self.assign(other, Some(key));
                        index += 1;
                    }

                    Some(false) => {
                        log::trace!(target: targets::PROPAGATION, "Consequence of {key} and {literal} is contradiction.");
                        conflict = Some(key);
                        break 'watch_loop;
                    }

                    Some(true) => index += 1,
                }
            }

            self.watches[false_literal.watch_index()] = watch_list;

            if let Some(key) = conflict {
                return Err(key);
            }
        }
        Ok(())
    }
}
