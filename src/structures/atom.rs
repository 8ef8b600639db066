//! Atoms, as used by the [core](crate::engine::core).
//!
//! An atom is an index, with zero reserved by the core as a constant which is always true.
//! As such, the first atom obtained from a [LiteralIndex](crate::engine::index::LiteralIndex) is 1, and the atoms of an index are always contiguous.

/// An atom, as an index.
pub type Atom = u32;
