//! Reading input.
//!
//! - [defaults] reads datasets of default rules, one rule to a line.

pub mod defaults;
