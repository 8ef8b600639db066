//! Clauses in the DIMACS CNF format.
//!
//! The atom of each literal is numbered on first use, from 1.
//! A header `p cnf <atoms> <clauses>` is followed by a line for each clause, with the (signed) atoms of the clause ordered by absolute value, each followed by a tab, and the line terminated by `0`.
//!
//! ```rust
//! # use tweety::counting::dimacs::write_cnf;
//! # use tweety::structures::clause::Clause;
//! let clauses = ["!bird(x), flies(x)", "bird(x)"].map(|c| c.parse::<Clause>().unwrap());
//!
//! let mut buffer = Vec::default();
//! let index = write_cnf(&clauses, &mut buffer).unwrap();
//!
//! assert_eq!(index.len(), 2);
//! assert_eq!(String::from_utf8(buffer).unwrap(), "p cnf 2 2\n-1\t2\t0\n1\t0\n\n");
//! ```

use std::io::Write;

use crate::{
    engine::index::LiteralIndex,
    structures::clause::Clause,
    types::err::{CountError, ErrorKind},
};

/// Writes `clauses` to `writer`, returning the index used to number atoms.
pub fn write_cnf(clauses: &[Clause], writer: &mut impl Write) -> Result<LiteralIndex, ErrorKind> {
    let mut index = LiteralIndex::default();
    for clause in clauses {
        index.register_clause(clause)?;
    }

    let mut text = format!("p cnf {} {}\n", index.len(), clauses.len());
    for clause in clauses {
        let mut ints = index
            .c_clause_of(clause)?
            .into_iter()
            .map(|literal| literal.as_int())
            .collect::<Vec<_>>();
        ints.sort_by_key(|int| int.abs());

        for int in ints {
            text.push_str(&format!("{int}\t"));
        }
        text.push_str("0\n");
    }
    text.push('\n');

    writer
        .write_all(text.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(CountError::Io)?;
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_clause() {
        let clauses = ["a, !b".parse::<Clause>().unwrap(), Clause::default()];
        let mut buffer = Vec::default();
        write_cnf(&clauses, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "p cnf 2 2\n1\t-2\t0\n0\n\n");
    }
}
