/*!
Valuations, as maps from atoms to optional truth values.

The canonical representation is a vector of optional booleans indexed by atom,
with `None` for an atom without a value.
*/

use crate::structures::{atom::Atom, literal::CLiteral};

/// The canonical representation of a valuation.
pub type VValuation = Vec<Option<bool>>;

/// Something which maps atoms to optional truth values.
pub trait Valuation {
    /// The value of `atom` on the valuation, if any.
    fn value_of(&self, atom: Atom) -> Option<bool>;

    /// The value of `literal` on the valuation: `Some(true)` if the polarity
    /// of the literal matches the value of its atom, `Some(false)` if not,
    /// and `None` if the atom has no value.
    fn literal_value(&self, literal: CLiteral) -> Option<bool> {
        self.value_of(literal.atom())
            .map(|value| value == literal.polarity())
    }

    /// A count of atoms in the valuation.
    fn atom_count(&self) -> usize;

    /// An iterator over the atoms without a value on the valuation.
    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom> + '_;
}

impl Valuation for VValuation {
    fn value_of(&self, atom: Atom) -> Option<bool> {
        // Every live atom indexes the valuation, so this does not fail on
        // solver-created atoms.
        self[atom as usize]
    }

    fn atom_count(&self) -> usize {
        self.len()
    }

    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.iter()
            .enumerate()
            .filter_map(|(atom, value)| match value {
                None => Some(atom as Atom),
                Some(_) => None,
            })
    }
}
