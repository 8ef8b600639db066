use crate::structures::atom::Atom;

/// The representation of a literal within the core, as an atom paired with a boolean.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CLiteral {
    /// The atom of a literal.
    atom: Atom,

    /// The polarity of a literal.
    polarity: bool,
}

impl CLiteral {
    /// A fresh literal, specified by pairing an atom with a boolean.
    pub fn new(atom: Atom, polarity: bool) -> Self {
        CLiteral { atom, polarity }
    }

    /// The literal corresponding to a (non-zero) DIMACS style integer.
    pub fn from_int(int: i32) -> Self {
        CLiteral {
            atom: int.unsigned_abs(),
            polarity: int.is_positive(),
        }
    }

    /// The negation of the literal.
    pub fn negate(&self) -> Self {
        CLiteral {
            atom: self.atom,
            polarity: !self.polarity,
        }
    }

    /// The atom of the literal.
    pub fn atom(&self) -> Atom {
        self.atom
    }

    /// The polarity of the literal.
    pub fn polarity(&self) -> bool {
        self.polarity
    }

    /// The literal in it's integer form, with sign indicating polarity.
    pub fn as_int(&self) -> i32 {
        match self.polarity {
            true => self.atom as i32,
            false => -(self.atom as i32),
        }
    }

    /// An index unique to the literal, used to find the watch list of the literal.
    pub fn watch_index(&self) -> usize {
        2 * self.atom as usize + self.polarity as usize
    }
}

impl std::fmt::Display for CLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_int())
    }
}
