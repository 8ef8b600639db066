//! Databases for holding information relevant to a solve.
//!
//! The [core](crate::engine::core) keeps the values, levels, and reasons of atoms and its clauses directly, as the only clauses removed are those satisfied at level zero.
//! The [trail] records the order in which atoms were valued, and so the atoms to clear when backjumping.

pub mod trail;

/// A decision level.
pub type LevelIndex = u32;

/// The key of a clause in the core, as an index to the clause store.
pub type ClauseKey = usize;
