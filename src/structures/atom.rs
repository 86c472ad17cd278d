/*!
Atoms, identified by a dense 0-based index.

Atoms are created once, at problem construction time, and never destroyed.
All atom-indexed structures (watch lists, the valuation, activity, etc.) grow
in lockstep when a fresh atom is created.
*/

/// An atom, aka. a propositional variable.
pub type Atom = u32;

/// The upper limit on atoms in a solver.
///
/// One bit of an atom is used for the polarity of a literal, and the all-ones
/// pattern is reserved for sentinel values.
pub const ATOM_MAX: Atom = (u32::MAX >> 1) - 1;
