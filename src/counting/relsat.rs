/*!
Model counting by an external relsat executable.

Each count writes the clauses to a fresh file in the working directory of the counter, runs `relsat -#c <file>` from that directory, and removes the file.
The count is read from a line `Number of solutions: <N>` of standard output, and lines written to standard error are logged as warnings.
If no count is reported the formula is taken to have no models, unless the counter exited unsuccessfully, in which case the count fails.
*/

use std::{
    io::{BufRead, BufReader},
    path::PathBuf,
    process::{Command, Stdio},
    sync::atomic::{AtomicUsize, Ordering},
};

use num_bigint::BigUint;

use crate::{
    counting::{dimacs::write_cnf, ModelCounter},
    misc::log::targets,
    structures::clause::Clause,
    types::err::{CountError, ErrorKind},
};

/// The prefix of the line of standard output reporting a count.
pub const SOLUTIONS_PREFIX: &str = "Number of solutions: ";

static QUERY_COUNT: AtomicUsize = AtomicUsize::new(0);

pub struct RelsatCounter {
    /// The directory containing the executable, used as the working directory of the counter.
    directory: PathBuf,

    executable: String,
}

impl RelsatCounter {
    /// A counter for the executable `relsat` found in `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        RelsatCounter {
            directory: directory.into(),
            executable: "./relsat".to_string(),
        }
    }

    /// As [new](RelsatCounter::new), with some other executable.
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    fn problem_path(&self) -> PathBuf {
        let id = QUERY_COUNT.fetch_add(1, Ordering::Relaxed);
        self.directory
            .join(format!("satproblem-{}-{id}.cnf", std::process::id()))
    }
}

impl ModelCounter for RelsatCounter {
    fn model_count(&self, clauses: &[Clause]) -> Result<BigUint, ErrorKind> {
        let path = self.problem_path();
        {
            let mut file = std::fs::File::create(&path).map_err(CountError::Io)?;
            write_cnf(clauses, &mut file)?;
        }

        let output = Command::new(&self.executable)
            .arg("-#c")
            .arg(&path)
            .current_dir(&self.directory)
            .stdin(Stdio::null())
            .output();

        if let Err(e) = std::fs::remove_file(&path) {
            log::warn!(target: targets::COUNTING, "Failed to remove {}: {e}", path.display());
        }
        let output = output.map_err(CountError::Io)?;

        for line in BufReader::new(output.stderr.as_slice()).lines() {
            let line = line.map_err(CountError::Io)?;
            log::warn!(target: targets::COUNTING, "relsat: {line}");
        }

        if output.status.success() {
            return parse_count(BufReader::new(output.stdout.as_slice()));
        }

        log::warn!(target: targets::COUNTING, "relsat exited with {}", output.status);
        let reported = BufReader::new(output.stdout.as_slice())
            .lines()
            .map_while(Result::ok)
            .any(|line| line.starts_with(SOLUTIONS_PREFIX));
        match reported {
            true => parse_count(BufReader::new(output.stdout.as_slice())),
            false => Err(CountError::Failed(output.status).into()),
        }
    }
}

/// The last count reported in `output`, or zero if no count is reported.
pub fn parse_count(output: impl BufRead) -> Result<BigUint, ErrorKind> {
    let mut count = None;
    for line in output.lines() {
        let line = line.map_err(CountError::Io)?;
        if let Some(number) = line.strip_prefix(SOLUTIONS_PREFIX) {
            let parsed = number
                .trim()
                .parse::<BigUint>()
                .map_err(|_| CountError::Malformed(line.clone()))?;
            count = Some(parsed);
        }
    }

    match count {
        Some(count) => Ok(count),
        None => {
            log::debug!(target: targets::COUNTING, "No count reported, so no models");
            Ok(BigUint::ZERO)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reported_count() {
        let output = "c relsat\nSolution 1\nNumber of solutions: 340282366920938463463374607431768211456\n";
        let count = parse_count(output.as_bytes()).unwrap();
        assert_eq!(count, BigUint::from(1_u32) << 128_u32);
    }

    #[test]
    fn missing_count() {
        assert_eq!(parse_count("UNSAT\n".as_bytes()).unwrap(), BigUint::ZERO);
    }

    #[test]
    fn malformed_count() {
        let result = parse_count("Number of solutions: many\n".as_bytes());
        assert!(matches!(
            result,
            Err(ErrorKind::Count(CountError::Malformed(_)))
        ));
    }

    #[test]
    fn missing_executable() {
        let directory = std::env::temp_dir();
        let counter = RelsatCounter::new(&directory).with_executable("./no-such-relsat-executable");
        let result = counter.model_count(&["a".parse().unwrap()]);
        assert!(matches!(result, Err(ErrorKind::Count(CountError::Io(_)))));
    }

    #[cfg(unix)]
    #[test]
    fn unsuccessful_exit_without_count() {
        let counter = RelsatCounter::new(std::env::temp_dir()).with_executable("false");
        let result = counter.model_count(&["a".parse().unwrap()]);
        assert!(matches!(result, Err(ErrorKind::Count(CountError::Failed(_)))));
    }
}
