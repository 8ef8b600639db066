/*!
A cache of satisfiability queries, shared between the queries of a session.

Entries are keyed by the exact set of clauses given to the solver, and as entries are never revised an entry is never stale.

The cache is injected into a [theory](crate::theory::PossibilisticTheory) through [with_cache](crate::theory::PossibilisticTheory::with_cache), and is shared (as an [Arc]) by every copy of the theory.
One cache is intended for one reasoning session, rather than the lifetime of a process.

# Concurrency
Lookup, computation (on a miss), and insertion are made while holding a single lock.
So, two workers asking the same query will never both compute an answer, at the cost of serialising solves made through the cache.
A lock poisoned by a panicking worker is recovered, as the map is only written after an answer has been computed.

```rust
# use std::{collections::BTreeSet, sync::Arc};
# use tweety::theory::{cache::SatCache, PossibilisticTheory};
# use tweety::structures::{clause::Clause, necessity::Necessity};
let cache = Arc::new(SatCache::default());
let mut theory = PossibilisticTheory::default().with_cache(cache.clone());
theory.add_rule("!bird(x), flies(x)".parse::<Clause>().unwrap(), Necessity::new(0.5).unwrap());

let evidence = BTreeSet::from(["bird(x)".parse().unwrap()]);
let flies = "flies(x)".parse().unwrap();

assert!(theory.implies_literal(&evidence, &flies).unwrap());
let misses = cache.misses();
assert!(theory.implies_literal(&evidence, &flies).unwrap());
assert_eq!(cache.misses(), misses);
assert!(cache.hits() > 0);
```
*/

use std::{
    collections::{BTreeSet, HashMap},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use crate::{
    engine::Witness, misc::log::targets, structures::clause::Clause, types::err::ErrorKind,
};

/// A satisfiability problem, as a set of clauses.
pub type SatProblem = BTreeSet<Clause>;

/// The cache.
#[derive(Debug, Default)]
pub struct SatCache {
    entries: Mutex<HashMap<SatProblem, Option<Witness>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl SatCache {
    /// The answer to `problem`, from the cache if present, and otherwise by `compute`.
    ///
    /// An error from `compute` is returned, and nothing is cached.
    pub fn get_or_compute(
        &self,
        problem: SatProblem,
        compute: impl FnOnce(&SatProblem) -> Result<Option<Witness>, ErrorKind>,
    ) -> Result<Option<Witness>, ErrorKind> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(answer) = entries.get(&problem) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(answer.clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let answer = compute(&problem)?;
        entries.insert(problem, answer.clone());

        let total = self.hits() + self.misses();
        if total % 10_000 == 0 {
            log::info!(target: targets::CACHE, "{:.2}% of {total} queries answered from the cache", 100.0 * self.hits() as f64 / total as f64);
        }

        Ok(answer)
    }

    /// A count of queries answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// A count of queries answered by computation.
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// A count of cached answers.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_not_cached() {
        let cache = SatCache::default();
        let problem = SatProblem::from(["a".parse::<Clause>().unwrap()]);

        let failed = cache.get_or_compute(problem.clone(), |_| {
            Err(crate::types::err::TheoryError::NonGround.into())
        });
        assert!(failed.is_err());
        assert!(cache.is_empty());

        let answer = cache.get_or_compute(problem.clone(), |_| Ok(None)).unwrap();
        assert!(answer.is_none());
        let answer = cache
            .get_or_compute(problem, |_| panic!("recomputed"))
            .unwrap();
        assert!(answer.is_none());
        assert_eq!((cache.hits(), cache.misses(), cache.len()), (1, 2, 1));
    }
}
