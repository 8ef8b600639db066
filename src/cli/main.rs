#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = Jemalloc;

use std::{
    io::{BufRead, BufReader},
    path::Path,
    sync::Arc,
};

use clap::Parser;
use tweety::{
    closure::rational_closure,
    config::Config,
    extraction::extract_system_p_defaults,
    io::defaults::read_default_rules,
    structures::{clause::Clause, default_rule::DefaultRule},
    theory::{cache::SatCache, coverage::covered_defaults, Evidence, PossibilisticTheory},
    types::err::ErrorKind,
};

mod args;
use args::{Cli, Command};

fn main() {
    #[cfg(feature = "logger")]
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match cli.solver.to_config() {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {e:?}");
            std::process::exit(1);
        }
    };

    if let Command::Extract {
        max_length: Some(length),
        ..
    } = &cli.command
    {
        if let Err(e) = config.max_antecedent_length.set(*length) {
            println!("Configuration error: {e:?}");
            std::process::exit(1);
        }
    }

    let cache = match config.caching.value {
        true => Some(Arc::new(SatCache::default())),
        false => None,
    };

    let result = run(&cli.command, &config, cache.clone());

    if let Some(cache) = cache {
        println!("Cache: {} hits, {} misses", cache.hits(), cache.misses());
    }

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            println!("Error: {e}");
            std::process::exit(2);
        }
    }
}

/// Runs `command`, returning false if the dataset has no rational closure.
fn run(command: &Command, config: &Config, cache: Option<Arc<SatCache>>) -> Result<bool, ErrorKind> {
    let defaults = match command {
        Command::Closure { defaults }
        | Command::Extract { defaults, .. }
        | Command::Query { defaults, .. }
        | Command::Coverage { defaults, .. } => load_defaults(defaults)?,
    };
    println!("Read {} default rules", defaults.len());

    let Some(mut theory) = rational_closure(defaults, config)? else {
        println!("No rational closure exists for the dataset");
        return Ok(false);
    };
    if let Some(cache) = cache {
        theory = theory.with_cache(cache);
    }

    match command {
        Command::Closure { .. } => print!("{theory}"),

        Command::Extract { .. } => {
            let length = config.max_antecedent_length.value;
            for rule in extract_system_p_defaults(&theory, length)? {
                println!("{rule}");
            }
        }

        Command::Query {
            evidence,
            consequent,
            ..
        } => query(&theory, evidence, consequent)?,

        Command::Coverage { examples, .. } => {
            let examples = load_defaults(examples)?;
            let covered = covered_defaults(&theory, &examples)?;
            for rule in &covered {
                println!("{rule}");
            }
            println!("Covered {} of {} examples", covered.len(), examples.len());
        }
    }

    Ok(true)
}

fn query(theory: &PossibilisticTheory, evidence: &str, consequent: &str) -> Result<(), ErrorKind> {
    let evidence = evidence.parse::<Clause>()?.literals().cloned().collect::<Evidence>();
    let consequent = consequent.parse::<Clause>()?;

    match theory.solve(&evidence)? {
        Some((_, level)) => println!("Preferred level: {level}"),
        None => println!("Evidence is inconsistent with the hard rules"),
    }
    println!("{}", theory.implies(&evidence, &consequent)?);
    Ok(())
}

fn load_defaults(path: &Path) -> Result<Vec<DefaultRule>, ErrorKind> {
    println!("Reading default rules from {path:?}");

    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(_) => {
            println!("Failed to open {path:?}");
            std::process::exit(1);
        }
    };

    let reader: Box<dyn BufRead> = match path.extension() {
        #[cfg(feature = "xz")]
        Some(extension) if extension == "xz" => {
            Box::new(BufReader::new(xz2::read::XzDecoder::new(file)))
        }

        _ => Box::new(BufReader::new(file)),
    };

    read_default_rules(reader)
}
