//! Literals are atomic propositions paired with a (boolean) polarity.
//!
//! Two structures are used:
//! - [Literal], a predicate symbol applied to some (possibly empty) list of [terms](Term), with a polarity.
//!   This is the representation used by theories, default rules, and any input to the library.
//! - [CLiteral], an [Atom](crate::structures::atom::Atom) paired with a boolean.
//!   This is the representation used within the [core](crate::engine::core).
//!
//! The textual form of a literal is the predicate, followed by the arguments (if any) in parentheses, with `!` as a prefix for negative polarity.
//! A term beginning with an upper-case letter or an underscore is a variable, and any other term is a constant.
//!
//! ```rust
//! # use tweety::structures::literal::Literal;
//! let literal: Literal = "!flies(tweety)".parse().unwrap();
//!
//! assert!(!literal.polarity());
//! assert!(literal.is_ground());
//! assert_eq!(literal.negate().to_string(), "flies(tweety)");
//! assert_eq!(literal.negate().negate(), literal);
//!
//! let open: Literal = "flies(X)".parse().unwrap();
//! assert!(!open.is_ground());
//! ```

mod c_literal;
pub use c_literal::CLiteral;

use std::str::FromStr;

use crate::types::err::ParseError;

/// An argument of a literal.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Constant(String),
    Variable(String),
}

impl Term {
    /// The term named by `name`, a variable if `name` begins with an upper-case letter or an underscore.
    pub fn named(name: &str) -> Self {
        match name.chars().next() {
            Some(c) if c.is_uppercase() || c == '_' => Term::Variable(name.to_string()),
            _ => Term::Constant(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Term::Constant(name) | Term::Variable(name) => name,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A predicate applied to arguments, with a polarity.
///
/// Literals are ordered by predicate, then arguments, then polarity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    predicate: String,
    arguments: Vec<Term>,
    polarity: bool,
}

impl Literal {
    /// A fresh literal.
    pub fn new(predicate: impl Into<String>, arguments: Vec<Term>, polarity: bool) -> Self {
        Literal {
            predicate: predicate.into(),
            arguments,
            polarity,
        }
    }

    /// A fresh literal with no arguments.
    pub fn proposition(predicate: impl Into<String>, polarity: bool) -> Self {
        Literal::new(predicate, Vec::default(), polarity)
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn arguments(&self) -> &[Term] {
        &self.arguments
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    pub fn polarity(&self) -> bool {
        self.polarity
    }

    /// The negation of the literal.
    pub fn negate(&self) -> Self {
        Literal {
            predicate: self.predicate.clone(),
            arguments: self.arguments.clone(),
            polarity: !self.polarity,
        }
    }

    /// The literal with positive polarity, identifying the atomic proposition of the literal.
    pub fn positive(&self) -> Self {
        match self.polarity {
            true => self.clone(),
            false => self.negate(),
        }
    }

    /// True if no argument of the literal is a variable.
    pub fn is_ground(&self) -> bool {
        !self.arguments.iter().any(Term::is_variable)
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.polarity {
            write!(f, "!")?;
        }
        write!(f, "{}", self.predicate)?;
        if !self.arguments.is_empty() {
            write!(f, "(")?;
            for (index, argument) in self.arguments.iter().enumerate() {
                if index > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{argument}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// True if `c` may appear in a predicate or term.
fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '@' | '-' | '.' | '\'' | '+' | '=')
}

impl FromStr for Literal {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut text = s.trim();
        if text.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut polarity = true;
        while let Some(rest) = text.strip_prefix('!').or_else(|| text.strip_prefix('~')) {
            polarity = !polarity;
            text = rest.trim_start();
        }
        if text.is_empty() {
            return Err(ParseError::Negation);
        }

        let (predicate, arguments) = match text.find('(') {
            None => (text, Vec::default()),

            Some(open) => {
                let Some(inner) = text[open + 1..].strip_suffix(')') else {
                    return Err(ParseError::Parenthesis(s.to_string()));
                };
                if inner.contains(['(', ')']) {
                    return Err(ParseError::Parenthesis(s.to_string()));
                }

                let mut arguments = Vec::default();
                for argument in inner.split(',').map(str::trim) {
                    if argument.is_empty() || !argument.chars().all(is_symbol_char) {
                        return Err(ParseError::Literal(s.to_string()));
                    }
                    arguments.push(Term::named(argument));
                }
                (text[..open].trim_end(), arguments)
            }
        };

        if predicate.is_empty() || !predicate.chars().all(is_symbol_char) {
            return Err(ParseError::Literal(s.to_string()));
        }

        Ok(Literal::new(predicate, arguments, polarity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let literal: Literal = "p(a, B, _c)".parse().unwrap();
        assert_eq!(literal.predicate(), "p");
        assert_eq!(literal.arity(), 3);
        assert_eq!(literal.arguments()[0], Term::Constant("a".to_string()));
        assert_eq!(literal.arguments()[1], Term::Variable("B".to_string()));
        assert!(literal.arguments()[2].is_variable());
        assert_eq!(literal.to_string(), "p(a, B, _c)");

        let proposition: Literal = " !!!rain ".parse().unwrap();
        assert_eq!(proposition, Literal::proposition("rain", false));
        assert_eq!(proposition.to_string(), "!rain");
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Literal>(), Err(ParseError::Empty));
        assert_eq!("!".parse::<Literal>(), Err(ParseError::Negation));
        assert!(matches!(
            "p(a".parse::<Literal>(),
            Err(ParseError::Parenthesis(_))
        ));
        assert!(matches!(
            "p(a,)".parse::<Literal>(),
            Err(ParseError::Literal(_))
        ));
        assert!(matches!(
            "(a)".parse::<Literal>(),
            Err(ParseError::Literal(_))
        ));
    }

    #[test]
    fn negation_is_an_involution() {
        let literal: Literal = "bird(x)".parse().unwrap();
        assert_ne!(literal, literal.negate());
        assert_eq!(literal, literal.negate().negate());
        assert_eq!(literal.negate().positive(), literal);
    }
}
