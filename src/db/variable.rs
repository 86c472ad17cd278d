/*!
Per-atom state: the valuation, reasons, levels, activities, and phases.

Things include:
- A current (often partial) [valuation](crate::structures::valuation).
- The reason handle and decision level of each valued atom.
- An [IndexHeap] of atom activities, where any decision-eligible atom without
  a value is active on the heap.
- The saved phase of each atom, consulted when the atom is next decided.
*/

use crate::{
    config::Config,
    db::{arena::ClauseRef, LevelIndex},
    generic::index_heap::IndexHeap,
    misc::log::targets::{self},
    structures::{
        atom::{Atom, ATOM_MAX},
        literal::CLiteral,
        valuation::{VValuation, Valuation},
    },
    types::err::{self},
};

/// The bound at which atom activities are rescaled towards zero.
const RESCALE_BOUND: f64 = 1e100;

/// Per-atom assignment data, levels, activity, and phases.
pub struct VariableStore {
    /// A current (often partial) valuation.
    valuation: VValuation,

    /// The saved phase of each atom.
    phase: Vec<bool>,

    /// The reason for the value of each valued atom, if the value was
    /// propagated.
    reason: Vec<Option<ClauseRef>>,

    /// The decision level at which each valued atom was valued.
    level: Vec<LevelIndex>,

    /// Whether an atom is eligible for selection as a decision.
    decision_flags: Vec<bool>,

    /// An activity heap over atoms, active for decision-eligible atoms
    /// without a value.
    activity_heap: IndexHeap<f64>,

    /// The current activity bump.
    bump: f64,

    /// The inverse decay applied to the bump after each conflict.
    decay: f64,
}

impl VariableStore {
    pub fn new(config: &Config) -> Self {
        VariableStore {
            valuation: Vec::default(),
            phase: Vec::default(),
            reason: Vec::default(),
            level: Vec::default(),
            decision_flags: Vec::default(),
            activity_heap: IndexHeap::default(),
            bump: 1.0,
            decay: 1.0 / config.activity.atom_decay,
        }
    }

    /// A count of atoms in the store.
    pub fn count(&self) -> usize {
        self.valuation.len()
    }

    /// The current valuation.
    pub fn valuation(&self) -> &VValuation {
        &self.valuation
    }

    /// A fresh atom --- on Ok the atom indexes every atom-indexed structure.
    pub fn fresh_atom(
        &mut self,
        phase: bool,
        decision: bool,
        initial_activity: f64,
    ) -> Result<Atom, err::BuildError> {
        let atom = match self.valuation.len().try_into() {
            Ok(atom) if atom <= ATOM_MAX => atom,
            _ => return Err(err::BuildError::AtomsExhausted),
        };

        self.valuation.push(None);
        self.phase.push(phase);
        self.reason.push(None);
        self.level.push(0);
        self.decision_flags.push(decision);

        self.activity_heap.add(atom as usize, initial_activity);
        if decision {
            self.activity_heap.activate(atom as usize);
        }

        Ok(atom)
    }

    /// The value of `atom`, if any.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.valuation.value_of(atom)
    }

    /// The value of `literal` relative to the valuation of its atom, if any.
    pub fn literal_value(&self, literal: CLiteral) -> Option<bool> {
        self.valuation.literal_value(literal)
    }

    /// Values the atom of `literal` to match the literal, with the level and
    /// (for propagated values) reason of the assignment.
    ///
    /// The caller ensures the atom has no value --- this is asserted in debug
    /// builds.
    pub fn set_value(&mut self, literal: CLiteral, level: LevelIndex, reason: Option<ClauseRef>) {
        let atom = literal.atom() as usize;
        debug_assert!(self.valuation[atom].is_none(), "Revalued {literal}");

        self.valuation[atom] = Some(literal.polarity());
        self.level[atom] = level;
        self.reason[atom] = reason;
    }

    /// Clears the value of `atom`, saving `phase` if requested, and restores
    /// the atom to the activity heap if it is decision-eligible.
    pub fn clear_value(&mut self, atom: Atom, saved_phase: Option<bool>) {
        log::trace!(target: targets::VALUATION, "Cleared atom: {atom}");
        self.valuation[atom as usize] = None;
        self.reason[atom as usize] = None;
        if let Some(phase) = saved_phase {
            self.phase[atom as usize] = phase;
        }
        if self.decision_flags[atom as usize] {
            self.activity_heap.activate(atom as usize);
        }
    }

    /// The decision level of `atom`.
    ///
    /// Meaningful only while the atom has a value.
    pub fn level_of(&self, atom: Atom) -> LevelIndex {
        self.level[atom as usize]
    }

    /// The reason for the value of `atom`, if the value was propagated.
    pub fn reason_of(&self, atom: Atom) -> Option<ClauseRef> {
        self.reason[atom as usize]
    }

    /// Forgets the reason of `atom`, used when the reason clause is removed
    /// at the root level.
    pub fn clear_reason(&mut self, atom: Atom) {
        self.reason[atom as usize] = None;
    }

    /// Rewrites the reason handle of `atom`, used during garbage collection.
    pub fn reason_mut(&mut self, atom: Atom) -> Option<&mut ClauseRef> {
        self.reason[atom as usize].as_mut()
    }

    /// The saved phase of `atom`.
    pub fn phase_of(&self, atom: Atom) -> bool {
        self.phase[atom as usize]
    }

    /// Whether `atom` is eligible for selection as a decision.
    pub fn is_decision_eligible(&self, atom: Atom) -> bool {
        self.decision_flags[atom as usize]
    }

    /// Bumps the activity of `atom`, rescaling all activities if the bump
    /// would overflow the activity bound.
    pub fn bump_activity(&mut self, atom: Atom) {
        if self.activity_heap.value_at(atom as usize) + self.bump > RESCALE_BOUND {
            let factor = 1.0 / RESCALE_BOUND;
            self.activity_heap.apply_to_all(|activity| activity * factor);
            self.bump *= factor;
        }

        let bump = self.bump;
        self.activity_heap
            .apply_to_index(atom as usize, |activity| activity + bump);
        self.activity_heap.heapify_if_active(atom as usize);
    }

    /// Inflates the activity bump, so earlier bumps decay relative to later
    /// bumps.
    pub fn decay_activity(&mut self) {
        self.bump *= self.decay;
    }

    /// Pops the most active atom off the activity heap.
    ///
    /// The popped atom may have a value: activation is not revisited when an
    /// active atom is valued by propagation.
    pub fn pop_most_active(&mut self) -> Option<Atom> {
        self.activity_heap.pop_max().map(|index| index as Atom)
    }

    /// A uniformly random decision-eligible atom without a value, if any.
    pub fn random_unvalued_atom(&self, rng: &mut impl rand::Rng) -> Option<Atom> {
        use rand::seq::IteratorRandom;
        self.valuation
            .unvalued_atoms()
            .filter(|atom| self.decision_flags[*atom as usize])
            .choose(rng)
    }

    /// Rebuilds the activity heap to hold exactly the decision-eligible atoms
    /// without a value.
    pub fn rebuild_activity_heap(&mut self) {
        self.activity_heap.clear_active();
        for atom in 0..self.count() {
            if self.decision_flags[atom] && self.valuation[atom].is_none() {
                self.activity_heap.activate(atom);
            }
        }
    }
}
