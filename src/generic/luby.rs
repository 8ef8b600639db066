/*!
An iterator over the Luby sequence (<https://oeis.org/A182105>), used to schedule restarts.

The core restarts once the conflicts since the last restart exceed the current element of the sequence scaled by [luby_u](crate::config::Config::luby_u).

```rust
# use tweety::generic::luby::Luby;
let luby = Luby::default();
let start = luby.take(7).collect::<Vec<_>>();
assert_eq!(start, vec![1, 1, 2, 1, 1, 2, 4]);
```
*/

/// Representation used for elements of the sequence.
pub type LubyRepresentation = u32;

/// State of the iterator, following the reluctant doubling formulation.
pub struct Luby {
    u: LubyRepresentation,
    v: LubyRepresentation,
}

impl Default for Luby {
    fn default() -> Self {
        Luby { u: 1, v: 1 }
    }
}

impl Iterator for Luby {
    type Item = LubyRepresentation;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.v;
        if self.u & self.u.wrapping_neg() == self.v {
            self.u = self.u.checked_add(1)?;
            self.v = 1;
        } else {
            self.v = self.v.checked_mul(2)?;
        }
        Some(current)
    }
}

impl Luby {
    /// The element the iterator will return next.
    pub fn current(&self) -> LubyRepresentation {
        self.v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LUBY_SLICE: &[LubyRepresentation] = &[
        1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8,
        16, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4,
        8, 16, 32, 1,
    ];

    #[test]
    fn luby() {
        let mut l = Luby::default();
        for known_value in LUBY_SLICE {
            assert_eq!(l.current(), *known_value);
            assert_eq!(l.next(), Some(*known_value));
        }
    }
}
