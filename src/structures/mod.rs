//! Structures used throughout the library.
//!
//! Two representations of a formula are used:
//! - A symbolic representation, of [literals](literal::Literal) built from a predicate and arguments, [clauses](clause::Clause) as sets of such literals, and [default rules](default_rule::DefaultRule).
//!   This is the representation of a possibilistic theory, and of any input read from a dataset.
//! - A core representation, of [atoms](atom::Atom) paired with a polarity as a [CLiteral](literal::CLiteral).
//!   This is the representation used within the [core](crate::engine::core), with the bridge between the two given by a [LiteralIndex](crate::engine::index::LiteralIndex).

pub mod atom;
pub mod clause;
pub mod default_rule;
pub mod literal;
pub mod necessity;
