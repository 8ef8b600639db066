/*!
Configuration of the library.

All configuration is contained within a [Config] struct, with each option a [ConfigOption] carrying its name, bounds, and value.

- A [GroundSolver](crate::engine::GroundSolver) clones the configuration it is given, and passes the relevant parts to its [core](crate::engine::core).
- A [PossibilisticTheory](crate::theory::PossibilisticTheory) keeps a configuration for each ground solver built to answer a query.
- The remaining options are read by batch procedures, such as [coverage](crate::theory::coverage) and [extraction](crate::extraction).

The default configuration is deterministic: random choices are made by a seeded [MinimalPCG32](crate::generic::minimal_pcg::MinimalPCG32), and no time limits are set.

```rust
# use tweety::config::Config;
let mut config = Config::default();
assert!(config.workers.set(4).is_ok());
assert!(config.polarity_lean.set(2.0).is_err());
assert!(config.time_limit().is_none());
```
*/

mod config_option;
pub use config_option::ConfigOption;

use std::time::Duration;

use crate::generic;

/// Representation for the probability of choosing `true`
pub type PolarityLean = f64;

/// Representation for the probability of making a random decision
pub type RandomDecisionBias = f64;

/// Representation of the multiplicative decay applied to activity after each conflict.
pub type ActivityDecay = f64;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The `u` value to multiply the luby sequence by when determining whether to perform a restart.
    pub luby_u: ConfigOption<generic::luby::LubyRepresentation>,

    /// The probability of assigning positive polarity to a atom when freely choosing a atom.
    pub polarity_lean: ConfigOption<PolarityLean>,

    /// The probability of choosing a random atom when making a decision, rather than the most active atom.
    pub random_decision_bias: ConfigOption<RandomDecisionBias>,

    /// Default to the last set value of a atom when choosing a value for the atom, otherwise decision with specified probability.
    pub phase_saving: ConfigOption<bool>,

    /// Permit (scheduled) restarts.
    pub restart: ConfigOption<bool>,

    /// Activity is divided by this value after each conflict.
    pub activity_decay: ConfigOption<ActivityDecay>,

    /// The time limit for a plain solve, where zero is no limit.
    ///
    /// A solve which reaches the limit fails with [TimeUp](crate::types::err::EngineError::TimeUp).
    pub time_limit: ConfigOption<Duration>,

    /// The time limit for weighted optimisation, where zero is no limit.
    pub optimisation_timeout: ConfigOption<Duration>,

    /// Share a satisfiability cache between the queries of a session.
    pub caching: ConfigOption<bool>,

    /// The number of workers used for batches of queries.
    pub workers: ConfigOption<usize>,

    /// The maximum length of an antecedent when extracting defaults.
    pub max_antecedent_length: ConfigOption<usize>,
}

impl Config {
    /// The time limit of a plain solve, if some limit has been set.
    pub fn time_limit(&self) -> Option<Duration> {
        Some(self.time_limit.value).filter(|limit| !limit.is_zero())
    }

    /// The time limit of weighted optimisation, if some limit has been set.
    pub fn optimisation_timeout(&self) -> Option<Duration> {
        Some(self.optimisation_timeout.value).filter(|limit| !limit.is_zero())
    }
}

impl Default for Config {
    /// The default configuration is (roughly) configured to provide quick, deterministic, results on small theories.
    fn default() -> Self {
        Config {
            luby_u: ConfigOption {
                name: "luby",
                min: generic::luby::LubyRepresentation::MIN,
                max: generic::luby::LubyRepresentation::MAX,
                value: 128,
            },

            polarity_lean: ConfigOption {
                name: "polarity_lean",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            random_decision_bias: ConfigOption {
                name: "random_decision_bias",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            phase_saving: ConfigOption {
                name: "phase_saving",
                min: false,
                max: true,
                value: true,
            },

            restart: ConfigOption {
                name: "restart",
                min: false,
                max: true,
                value: true,
            },

            activity_decay: ConfigOption {
                name: "activity_decay",
                min: f64::MIN_POSITIVE,
                max: 1.0,
                value: 0.95,
            },

            time_limit: ConfigOption {
                name: "time_limit",
                min: Duration::from_secs(0),
                max: Duration::MAX,
                value: Duration::from_secs(0),
            },

            optimisation_timeout: ConfigOption {
                name: "optimisation_timeout",
                min: Duration::from_secs(0),
                max: Duration::MAX,
                value: Duration::from_secs(0),
            },

            caching: ConfigOption {
                name: "caching",
                min: false,
                max: true,
                value: false,
            },

            workers: ConfigOption {
                name: "workers",
                min: 1,
                max: 256,
                value: 1,
            },

            max_antecedent_length: ConfigOption {
                name: "max_antecedent_length",
                min: 0,
                max: usize::MAX,
                value: 2,
            },
        }
    }
}
