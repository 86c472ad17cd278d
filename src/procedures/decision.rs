/*!
Decisions: extending the valuation when propagation settles.

# Overview

A decision atom is taken from the activity heap --- or, with the configured
frequency, at random --- and valued by its saved phase, unless random
polarities are configured.

The activity heap may hold atoms which gained a value after activation, so
popped atoms are filtered against the valuation.

# Phases

With phase saving, a chosen atom is valued as it was last valued, which tends
to repair the parts of a prior valuation discarded by a far backjump or a
restart.
The initial phase of an atom is set at its creation.
*/

use rand::{Rng, SeedableRng};

use crate::{solver::GenericSolver, structures::literal::CLiteral};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// The next decision literal, or `None` if every decision-eligible atom
    /// has a value --- on `None` the valuation is a model of the formula.
    pub(crate) fn pick_branch_literal(&mut self) -> Option<CLiteral> {
        let mut chosen = None;

        // Random decision.
        if self.config.decisions.random_frequency > 0.0
            && self
                .rng
                .random_bool(self.config.decisions.random_frequency)
        {
            if let Some(atom) = self.variables.random_unvalued_atom(&mut self.rng) {
                self.counters.random_decisions += 1;
                chosen = Some(atom);
            }
        }

        // Activity based decision.
        while chosen.is_none() {
            let atom = self.variables.pop_most_active()?;
            if self.variables.value_of(atom).is_none() {
                chosen = Some(atom);
            }
        }

        let atom = chosen?;
        let polarity = match self.config.decisions.random_polarity {
            true => self.rng.random_bool(0.5),
            false => self.variables.phase_of(atom),
        };

        Some(CLiteral::new(atom, polarity))
    }
}
