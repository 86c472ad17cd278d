/*!
The abstract elements of a solve, and their representations.

- [Atoms](atom) are propositional variables, identified by a dense index.
- [Literals](literal) are atoms paired with a polarity, packed into a single word.
- [Clauses](clause) are disjunctions of literals.
- [Valuations](valuation) are (typically partial) maps from atoms to truth values.
*/

pub mod atom;
pub mod clause;
pub mod literal;
pub mod valuation;
