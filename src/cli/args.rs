use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use tweety::{config::Config, types::err::ConfigError};

/// Reasoning with default rules through possibilistic logic
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub solver: SolverArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the rational closure of a dataset of default rules
    Closure {
        /// The dataset, one rule to a line
        defaults: PathBuf,
    },

    /// Print the defaults implied by the rational closure of a dataset which no shorter default implies
    Extract {
        defaults: PathBuf,

        /// The maximum length of an antecedent
        #[arg(short, long)]
        max_length: Option<usize>,
    },

    /// Decide whether the rational closure of a dataset implies a consequent given some evidence
    Query {
        defaults: PathBuf,

        /// Comma separated literals, each taken to be true
        #[arg(short, long, default_value = "")]
        evidence: String,

        /// A clause, as comma separated literals
        #[arg(short, long)]
        consequent: String,
    },

    /// Print the rules of an example dataset covered by the rational closure of a dataset
    Coverage {
        defaults: PathBuf,

        /// The example dataset
        #[arg(short = 'x', long)]
        examples: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct SolverArgs {
    #[arg(short = 'l', long = "luby", default_value_t = 128)]
    /// The u value to use for the luby calculation when restarts are permitted
    luby_u: u32,

    #[arg(short, long, default_value_t = 0.0)]
    /// The chance of assigning positive polarity to an atom when making a decision
    polarity_lean: f64,

    #[arg(long, default_value_t = 0.0)]
    /// The chance of making a random decision (as opposed to using the most active atom)
    random_decision_bias: f64,

    #[arg(long, default_value_t = false)]
    /// Disable restarts
    no_restart: bool,

    /// Time limit for each solve, in seconds, after which the command fails
    #[arg(short, long, value_parser = |seconds: &str| seconds.parse().map(Duration::from_secs))]
    time: Option<Duration>,

    /// Time limit for each weighted optimisation, in seconds
    #[arg(long, value_parser = |seconds: &str| seconds.parse().map(Duration::from_secs))]
    optimisation_time: Option<Duration>,

    /// Share a cache of satisfiability queries across the session
    #[arg(long, default_value_t = false)]
    caching: bool,

    /// Workers for batches of queries
    #[arg(short, long, default_value_t = 1)]
    workers: usize,
}

impl SolverArgs {
    /// A configuration from the arguments, or the first argument out of the bounds of its option.
    pub fn to_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::default();

        config.luby_u.set(self.luby_u)?;
        config.polarity_lean.set(self.polarity_lean)?;
        config.random_decision_bias.set(self.random_decision_bias)?;
        config.restart.set(!self.no_restart)?;
        config.caching.set(self.caching)?;
        config.workers.set(self.workers)?;

        if let Some(limit) = self.time {
            config.time_limit.set(limit)?;
        }
        if let Some(limit) = self.optimisation_time {
            config.optimisation_timeout.set(limit)?;
        }

        Ok(config)
    }
}
