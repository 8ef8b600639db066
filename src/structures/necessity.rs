//! Necessity degrees.
//!
//! A necessity is a real number in (0, 1], with 1 the necessity of a certain (or hard) rule.
//! Necessities are totally ordered, with higher values more certain.
//!
//! Necessity is a distinct domain from the (integer) weights of soft clauses used during [weighted optimisation](crate::engine::optimizer).
//! Only the order of necessities is used when converting between the two, see [most_plausible_model](crate::theory::PossibilisticTheory::most_plausible_model).

use crate::types::err::NecessityError;

/// A necessity degree.
#[derive(Clone, Copy, Debug)]
pub struct Necessity(f64);

impl Necessity {
    /// The necessity of a certain rule.
    pub const CERTAIN: Necessity = Necessity(1.0);

    pub fn new(value: f64) -> Result<Self, NecessityError> {
        if value.is_nan() {
            Err(NecessityError::NotANumber)
        } else if value <= 0.0 || value > 1.0 {
            Err(NecessityError::OutOfRange)
        } else {
            Ok(Necessity(value))
        }
    }

    /// The necessity of level `index` in a stratification of `count` levels, with the first level the least certain.
    ///
    /// Necessities are spread evenly as (index + 1) / (count + 1), and so are always below [CERTAIN](Necessity::CERTAIN).
    pub fn of_level(index: usize, count: usize) -> Self {
        Necessity((index + 1) as f64 / (count + 1) as f64)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialEq for Necessity {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for Necessity {}

impl PartialOrd for Necessity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Necessity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::hash::Hash for Necessity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl std::fmt::Display for Necessity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Necessity {
    type Error = NecessityError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Necessity::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert!(Necessity::new(1.0).is_ok());
        assert!(Necessity::new(0.001).is_ok());
        assert_eq!(Necessity::new(0.0), Err(NecessityError::OutOfRange));
        assert_eq!(Necessity::new(1.5), Err(NecessityError::OutOfRange));
        assert_eq!(Necessity::new(f64::NAN), Err(NecessityError::NotANumber));
    }

    #[test]
    fn levels_are_ordered() {
        let levels = (0..4).map(|i| Necessity::of_level(i, 4)).collect::<Vec<_>>();
        assert!(levels.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(levels[0].value(), 0.2);
        assert!(levels[3] < Necessity::CERTAIN);
    }
}
