//! A lazily computed record of whether a theory is ground.
//!
//! The record is one of three states, and is reset to [Unknown](Groundness::Unknown) on every mutation of a theory.
//! As theories are shared between workers during [coverage](crate::theory::coverage) batches, the record is atomic.

use std::sync::atomic::{AtomicU8, Ordering};

/// Whether a theory is ground.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Groundness {
    Unknown = 0,
    Ground = 1,
    NonGround = 2,
}

/// The record of groundness.
#[derive(Debug, Default)]
pub struct GroundnessCell {
    state: AtomicU8,
}

impl GroundnessCell {
    pub fn get(&self) -> Groundness {
        match self.state.load(Ordering::Acquire) {
            1 => Groundness::Ground,
            2 => Groundness::NonGround,
            _ => Groundness::Unknown,
        }
    }

    pub fn set(&self, groundness: Groundness) {
        self.state.store(groundness as u8, Ordering::Release);
    }

    pub fn invalidate(&self) {
        self.set(Groundness::Unknown);
    }

    /// True if ground, with `compute` called to determine groundness if unknown.
    pub fn is_ground(&self, compute: impl FnOnce() -> bool) -> bool {
        match self.get() {
            Groundness::Ground => true,
            Groundness::NonGround => false,
            Groundness::Unknown => {
                let ground = compute();
                self.set(match ground {
                    true => Groundness::Ground,
                    false => Groundness::NonGround,
                });
                ground
            }
        }
    }
}

impl Clone for GroundnessCell {
    fn clone(&self) -> Self {
        GroundnessCell {
            state: AtomicU8::new(self.state.load(Ordering::Acquire)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computed_once() {
        let cell = GroundnessCell::default();
        assert_eq!(cell.get(), Groundness::Unknown);
        assert!(!cell.is_ground(|| false));
        assert!(!cell.is_ground(|| panic!("recomputed")));

        cell.invalidate();
        assert!(cell.is_ground(|| true));
        assert_eq!(cell.clone().get(), Groundness::Ground);
    }
}
