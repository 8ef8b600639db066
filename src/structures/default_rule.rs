//! Default rules, read as "normally, if the antecedent then the consequent".
//!
//! The antecedent is a conjunction of literals and the consequent a disjunction, each stored as a [Clause].
//! A default rule is a value, and two rules are equal exactly when their antecedents and consequents are.
//!
//! ```rust
//! # use tweety::structures::default_rule::DefaultRule;
//! # use tweety::structures::clause::Clause;
//! let rule: DefaultRule = "bird(x) -> flies(x)".parse().unwrap();
//!
//! let implication: Clause = "!bird(x), flies(x)".parse().unwrap();
//! assert_eq!(rule.to_material_implication(), implication);
//!
//! let fact: DefaultRule = " -> !penguin(x)".parse().unwrap();
//! assert!(fact.antecedent().is_empty());
//! ```

use std::str::FromStr;

use crate::{
    structures::{clause::Clause, literal::Literal},
    types::err::ParseError,
};

/// The token separating antecedent from consequent, in the textual form of a default rule.
pub const RULE_SEPARATOR: &str = "->";

/// A default rule.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DefaultRule {
    antecedent: Clause,
    consequent: Clause,
}

impl DefaultRule {
    pub fn new(antecedent: Clause, consequent: Clause) -> Self {
        DefaultRule {
            antecedent,
            consequent,
        }
    }

    /// The antecedent, read as a conjunction.
    pub fn antecedent(&self) -> &Clause {
        &self.antecedent
    }

    /// The consequent, read as a disjunction.
    pub fn consequent(&self) -> &Clause {
        &self.consequent
    }

    /// The literals of the antecedent, as evidence.
    pub fn antecedent_literals(&self) -> impl Iterator<Item = &Literal> {
        self.antecedent.literals()
    }

    /// The clause ¬antecedent ∨ consequent.
    pub fn to_material_implication(&self) -> Clause {
        self.antecedent
            .negated_literals()
            .chain(self.consequent.literals().cloned())
            .collect()
    }
}

impl std::fmt::Display for DefaultRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.antecedent.is_empty() {
            true => write!(f, "{RULE_SEPARATOR} {}", self.consequent),
            false => write!(f, "{} {RULE_SEPARATOR} {}", self.antecedent, self.consequent),
        }
    }
}

impl FromStr for DefaultRule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((antecedent, consequent)) = s.split_once(RULE_SEPARATOR) else {
            return Err(ParseError::Rule(s.to_string()));
        };
        let consequent: Clause = consequent.parse()?;
        if consequent.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(DefaultRule::new(antecedent.parse()?, consequent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trip() {
        for text in ["bird(x) -> flies(x)", "-> !penguin(x)", "a, b -> c, !d"] {
            let rule: DefaultRule = text.parse().unwrap();
            assert_eq!(rule.to_string(), text);
            assert_eq!(rule.to_string().parse::<DefaultRule>().unwrap(), rule);
        }
    }

    #[test]
    fn missing_parts() {
        assert!(matches!(
            "bird(x), flies(x)".parse::<DefaultRule>(),
            Err(ParseError::Rule(_))
        ));
        assert_eq!("bird(x) -> ".parse::<DefaultRule>(), Err(ParseError::Empty));
    }
}
