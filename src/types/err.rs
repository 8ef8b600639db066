//! Error types used in the library.
//!
//! - Inconsistency is never an error. An unsatisfiable formula, a timeout during optimisation, or a set of defaults without a rational closure are all reported as values (typically an empty [Option]).
//! - Most of the errors here are contract violations --- e.g. adding a clause to a [GroundSolver](crate::engine::GroundSolver) with a literal outside of its index.
//! - Some are external --- e.g. a model counter failing to run, in which case the underlying cause is kept and available through [source](std::error::Error::source).
//!
//! Names of the error enums --- for the most part --- overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::structures::literal::Literal;

/// The error kind returned by library methods, wrapping the error of some specific concern.
#[derive(Debug)]
pub enum ErrorKind {
    Analysis(AnalysisError),
    Config(ConfigError),
    Count(CountError),
    Engine(EngineError),
    Necessity(NecessityError),
    Parse(ParseError),
    Theory(TheoryError),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Analysis(e) => write!(f, "analysis: {e:?}"),
            Self::Config(e) => write!(f, "config: {e:?}"),
            Self::Count(e) => write!(f, "model count: {e}"),
            Self::Engine(e) => write!(f, "engine: {e:?}"),
            Self::Necessity(e) => write!(f, "necessity: {e:?}"),
            Self::Parse(e) => write!(f, "parse: {e:?}"),
            Self::Theory(e) => write!(f, "theory: {e:?}"),
        }
    }
}

impl std::error::Error for ErrorKind {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Count(e) => Some(e),
            _ => None,
        }
    }
}

/// Noted errors during conflict analysis.
///
/// Each indicates a broken invariant of the [core](crate::engine::core), rather than an issue with the formula.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnalysisError {
    /// Somehow resolution resolved to an empty clause.
    EmptyResolution,

    /// Resolution failed to terminate with an asserting clause.
    NoAssertion,

    /// An implied literal on the trail has no recorded reason.
    MissingReason,
}

impl From<AnalysisError> for ErrorKind {
    fn from(e: AnalysisError) -> Self {
        ErrorKind::Analysis(e)
    }
}

/// Errors when setting a configuration option.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// The value is outside the bounds of the named option.
    OutOfRange(&'static str),
}

impl From<ConfigError> for ErrorKind {
    fn from(e: ConfigError) -> Self {
        ErrorKind::Config(e)
    }
}

/// Errors from a [model counter](crate::counting::ModelCounter).
///
/// Without a count, a collapse of levels cannot proceed, and so the cause is kept for the caller.
#[derive(Debug)]
pub enum CountError {
    /// Writing the formula, running the counter, or reading its output failed.
    Io(std::io::Error),

    /// The counter reported something other than a count.
    Malformed(String),

    /// The counter exited unsuccessfully without reporting a count.
    Failed(std::process::ExitStatus),
}

impl std::fmt::Display for CountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to run the model counter: {e}"),
            Self::Malformed(line) => write!(f, "unexpected model counter output: {line}"),
            Self::Failed(status) => write!(f, "model counter failed: {status}"),
        }
    }
}

impl std::error::Error for CountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Malformed(_) | Self::Failed(_) => None,
        }
    }
}

impl From<std::io::Error> for CountError {
    fn from(e: std::io::Error) -> Self {
        CountError::Io(e)
    }
}

impl From<CountError> for ErrorKind {
    fn from(e: CountError) -> Self {
        ErrorKind::Count(e)
    }
}

/// Contract violations when using a [GroundSolver](crate::engine::GroundSolver).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// A clause added after construction contains a literal whose atom was never indexed.
    UnindexedLiteral(Literal),

    /// A literal with some variable was given to the engine.
    NonGroundLiteral(Literal),

    /// A soft clause was given a weight of zero.
    ZeroWeight,

    /// A plain solve reached the time limit before satisfiability was determined.
    TimeUp,
}

impl From<EngineError> for ErrorKind {
    fn from(e: EngineError) -> Self {
        ErrorKind::Engine(e)
    }
}

/// Errors when building a [Necessity](crate::structures::necessity::Necessity).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NecessityError {
    /// Necessity is in (0, 1].
    OutOfRange,

    /// NaN was given.
    NotANumber,
}

impl From<NecessityError> for ErrorKind {
    fn from(e: NecessityError) -> Self {
        ErrorKind::Necessity(e)
    }
}

/// Errors during parsing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An empty string, where some non-empty string was required.
    Empty,

    /// A negation character was read, but no candidate for negation was found.
    Negation,

    /// Parentheses which do not balance, in the given text.
    Parenthesis(String),

    /// Some issue with the predicate or an argument of a literal.
    Literal(String),

    /// A default rule without the `->` separator.
    Rule(String),

    /// Some unspecific problem at a specific line.
    Line(usize),
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors when building or querying a [possibilistic theory](crate::theory).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TheoryError {
    /// Some clause of the theory contains a variable.
    /// Only ground theories are supported.
    NonGround,

    /// A different count of levels and weights was given for a stratification.
    StratificationMismatch { levels: usize, weights: usize },
}

impl From<TheoryError> for ErrorKind {
    fn from(e: TheoryError) -> Self {
        ErrorKind::Theory(e)
    }
}
