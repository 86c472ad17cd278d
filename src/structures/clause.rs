/*!
Clauses, as anything which yields a sequence of literals.

The canonical representation of a clause outside the [arena](crate::db::arena)
is a vector of literals.
Within the arena a clause is a run of words, viewed as a literal slice.
Both satisfy the [Clause] trait, and most of the library is written against
literal slices.
*/

use crate::structures::literal::CLiteral;

/// The canonical representation of a clause.
pub type CClause = Vec<CLiteral>;

/// Something which has methods for inspecting a sequence of literals.
pub trait Clause {
    /// An iterator over the literals of the clause.
    fn literals(&self) -> impl Iterator<Item = CLiteral> + '_;

    /// A count of the literals in the clause.
    fn size(&self) -> usize;

    /// The clause as a DIMACS-style string, with a trailing zero if requested.
    fn as_dimacs(&self, zero: bool) -> String {
        let mut the_string = String::new();
        for literal in self.literals() {
            the_string.push_str(&format!("{} ", literal.as_int()));
        }
        match zero {
            true => the_string + "0",
            false => the_string.trim_end().to_string(),
        }
    }
}

impl Clause for [CLiteral] {
    fn literals(&self) -> impl Iterator<Item = CLiteral> + '_ {
        self.iter().copied()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl Clause for CClause {
    fn literals(&self) -> impl Iterator<Item = CLiteral> + '_ {
        self.iter().copied()
    }

    fn size(&self) -> usize {
        self.len()
    }
}
