/*!
Procedures of the [core](crate::engine::core).

Each procedure is a method on [Core](crate::engine::core::Core), and is given a module in order to document the procedure.

- [bcp] propagates the consequences of a valuation.
- [analysis] derives a clause from a conflict.
- [backjump] undoes decisions.
- [decision] chooses the next literal to value, including assumptions.
- [solve] combines the above.
*/

pub mod analysis;
pub mod backjump;
pub mod bcp;
pub mod decision;
pub mod solve;
