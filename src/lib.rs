//! A library for reasoning with default rules through possibilistic logic.
//!
//! tweety represents beliefs as a [possibilistic theory](crate::theory::PossibilisticTheory): clauses stratified by a degree of certainty (a [necessity](crate::structures::necessity::Necessity)), together with hard rules which always hold.
//! Given some evidence, the levels of a theory inconsistent with the evidence are *drowned*, and the consequences of the evidence are the consequences of the remaining levels.
//! This gives nonmonotonic reasoning: birds fly, penguins are birds, and penguins do not fly.
//!
//! Beneath the theory is a [ground SAT/MaxSAT engine](crate::engine), built around a conflict-driven clause-learning core.
//!
//! # Orientation
//!
//! - [structures] defines literals, clauses, default rules, and necessities, each with a textual representation.
//! - [engine] decides satisfiability of (and optimises over) sets of ground clauses, with the core solve factored into [procedures].
//! - [theory] defines possibilistic theories, with [entailment](crate::theory::PossibilisticTheory::implies), [simplification](crate::theory::simplify), and batches of queries for [coverage](crate::theory::coverage).
//! - [closure] builds the rational closure of a set of default rules, by Z-ranking.
//! - [extraction] recovers the default rules implied by a theory.
//! - [counting] counts models, as used to estimate the probability of an alpha cut.
//! - [io] reads datasets of default rules.
//! - [config] holds the options of a solve, and of batches of queries.
//!
//! # Examples
//!
//! + The rational closure of some default rules, and a query of the closure.
//!
//! ```rust
//! # use tweety::closure::rational_closure;
//! # use tweety::config::Config;
//! # use tweety::structures::{default_rule::DefaultRule, literal::Literal};
//! # use tweety::theory::Evidence;
//! let defaults = ["bird(tweety) -> flies(tweety)", "penguin(tweety) -> !flies(tweety)", "penguin(tweety) -> bird(tweety)"]
//!     .map(|rule| rule.parse::<DefaultRule>().unwrap());
//!
//! let theory = rational_closure(defaults, &Config::default()).unwrap().unwrap();
//!
//! let bird = Evidence::from(["bird(tweety)".parse().unwrap()]);
//! let penguin = Evidence::from(["penguin(tweety)".parse().unwrap()]);
//! let flies = "flies(tweety)".parse::<Literal>().unwrap();
//!
//! assert!(theory.implies_literal(&bird, &flies).unwrap());
//! assert!(theory.implies_literal(&penguin, &flies.negate()).unwrap());
//! ```
//!
//! + The defaults implied by a stratified theory.
//!
//! ```rust
//! # use std::collections::BTreeSet;
//! # use tweety::extraction::extract_system_p_defaults;
//! # use tweety::theory::PossibilisticTheory;
//! # use tweety::structures::{clause::Clause, default_rule::DefaultRule};
//! let level = |clauses: &[&str]| clauses.iter().map(|c| c.parse::<Clause>().unwrap()).collect::<BTreeSet<_>>();
//! let theory = PossibilisticTheory::from_stratification(vec![
//!     level(&["!bird, flies"]),
//!     level(&["!penguin, bird", "!penguin, !flies"]),
//! ]);
//!
//! let defaults = extract_system_p_defaults(&theory, 1).unwrap();
//! assert!(defaults.contains(&"bird -> flies".parse::<DefaultRule>().unwrap()));
//! assert!(defaults.contains(&"penguin -> !flies".parse::<DefaultRule>().unwrap()));
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout the library, with targets listed in [misc::log].
//!
//! For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/):
//! - Logs related to the rational closure can be filtered with `RUST_LOG=closure …` or,
//! - A count of defaults found at each length can be found with `RUST_LOG=extraction=debug …`

pub mod closure;
pub mod config;
pub mod counting;
pub mod db;
pub mod engine;
pub mod extraction;
pub mod generic;
pub mod io;
pub mod misc;
pub mod procedures;
pub mod structures;
pub mod theory;
pub mod types;
