/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information when tracing how a theory, closure, or extraction was reached, and when fixing issues.

Note, no log implementation is provided.
The cli installs [env_logger](https://docs.rs/env_logger) when built with the `logger` feature, and so, for example, `RUST_LOG=closure=info` restricts output to the rational closure builder.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [BCP](crate::procedures::bcp)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [analysis](crate::procedures::analysis)
    pub const ANALYSIS: &str = "analysis";

    /// Logs related to [backjumping](crate::procedures::backjump)
    pub const BACKJUMP: &str = "backjump";

    /// Logs related to [decisions](crate::procedures::decision)
    pub const DECISION: &str = "decision";

    /// Logs related to the [ground solver](crate::engine::GroundSolver)
    pub const ENGINE: &str = "engine";

    /// Logs related to [weighted optimisation](crate::engine::optimizer)
    pub const OPTIMIZER: &str = "optimizer";

    /// Logs related to [possibilistic theories](crate::theory)
    pub const THEORY: &str = "theory";

    /// Logs related to the [satisfiability cache](crate::theory::cache)
    pub const CACHE: &str = "cache";

    /// Logs related to the [rational closure](crate::closure)
    pub const CLOSURE: &str = "closure";

    /// Logs related to [default extraction](crate::extraction)
    pub const EXTRACTION: &str = "extraction";

    /// Logs related to [coverage](crate::theory::coverage) batches
    pub const COVERAGE: &str = "coverage";

    /// Logs related to [model counting](crate::counting)
    pub const COUNTING: &str = "counting";

    /// Logs related to reading [default rule datasets](crate::io::defaults)
    pub const DATASET: &str = "dataset";
}
