/*!
Methods to build a formula within a solver: fresh atoms, clause addition, and
the attach/detach plumbing shared with the procedures.

Clause addition happens at the root level only.
An added clause is normalized first: literals are sorted, duplicates merged,
tautologies and satisfied clauses skipped, and falsified literals dropped ---
root-level values are proven, so a falsified literal contributes nothing.
What remains determines the action: an empty clause marks the formula
inconsistent, a unit clause is enqueued and propagated, and any longer clause
is allocated and attached.
*/

use rand::{Rng, SeedableRng};

use crate::{
    db::arena::ClauseRef,
    misc::log::targets::{self},
    solver::GenericSolver,
    structures::{
        atom::Atom,
        clause::{CClause, Clause},
        literal::CLiteral,
    },
    types::err::{self},
};

/// Possible 'Ok' results from adding a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseOk {
    /// The clause was added to the formula.
    Added,

    /// The clause was skipped, as a tautology or as satisfied at the root
    /// level.
    Skipped,
}

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// A fresh atom, with the default phase and decision-eligibility.
    pub fn fresh_atom(&mut self) -> Result<Atom, err::BuildError> {
        self.fresh_atom_with(false, true)
    }

    /// A fresh atom with the given initial phase and decision-eligibility.
    ///
    /// Every atom-indexed structure is grown in lockstep, so the atom may be
    /// used wherever an atom is expected.
    pub fn fresh_atom_with(
        &mut self,
        phase: bool,
        decision: bool,
    ) -> Result<Atom, err::BuildError> {
        let initial_activity = match self.config.decisions.random_initial_activity {
            true => self.rng.random::<f64>() * 0.00001,
            false => 0.0,
        };

        let atom = self
            .variables
            .fresh_atom(phase, decision, initial_activity)?;
        self.watches.fresh_atom();
        self.analysis.fresh_atom();
        Ok(atom)
    }

    /// A fresh literal over a fresh atom, with positive polarity.
    pub fn fresh_literal(&mut self) -> Result<CLiteral, err::BuildError> {
        Ok(CLiteral::new(self.fresh_atom()?, true))
    }

    /// Adds a clause to the formula, at the root level.
    ///
    /// On an `Unsatisfiable` error the solver is in an inconsistent state,
    /// and every further solve reports unsatisfiable.
    pub fn add_clause(&mut self, clause: impl Into<CClause>) -> Result<ClauseOk, err::BuildError> {
        if !self.consistent {
            return Err(err::BuildError::Unsatisfiable);
        }
        if self.trail.level() != 0 {
            return Err(err::BuildError::DecisionsMade);
        }

        let mut clause: CClause = clause.into();
        clause.sort_unstable();
        clause.dedup();

        // Sorting places complementary literals of an atom side by side.
        if clause.windows(2).any(|pair| pair[0].atom() == pair[1].atom()) {
            log::trace!(target: targets::CLAUSE_DB, "Tautology skipped: {}", clause.as_dimacs(false));
            return Ok(ClauseOk::Skipped);
        }

        if clause
            .iter()
            .any(|literal| self.variables.literal_value(*literal) == Some(true))
        {
            return Ok(ClauseOk::Skipped);
        }
        clause.retain(|literal| self.variables.literal_value(*literal).is_none());

        match clause.len() {
            0 => {
                self.consistent = false;
                Err(err::BuildError::Unsatisfiable)
            }

            1 => {
                self.assign(clause[0], None);
                match self.propagate() {
                    Ok(()) => Ok(ClauseOk::Added),
                    Err(_conflict) => {
                        self.consistent = false;
                        Err(err::BuildError::Unsatisfiable)
                    }
                }
            }

            _ => {
                let stored = match self.arena.alloc(&clause, false) {
                    Ok(stored) => stored,
                    Err(_) => return Err(err::BuildError::AtomsExhausted),
                };
                self.clause_db.push_original(stored);
                self.attach_clause(stored);
                Ok(ClauseOk::Added)
            }
        }
    }

    /// Values the atom of `literal` to match the literal and stores the
    /// assignment on the trail, with the reason of a propagated assignment.
    pub(crate) fn assign(&mut self, literal: CLiteral, reason: Option<ClauseRef>) {
        self.variables.set_value(literal, self.trail.level(), reason);
        self.trail.push(literal);
    }

    /// Attaches a clause: watches are placed for the literals at positions
    /// zero and one, keyed by their negations.
    pub(crate) fn attach_clause(&mut self, clause: ClauseRef) {
        use crate::db::watches::{BinaryWatch, LongWatch};

        let size = self.arena.size(clause);
        debug_assert!(size > 1, "Attach of short clause {clause}");
        let zero = self.arena.literal(clause, 0);
        let one = self.arena.literal(clause, 1);

        if size == 2 {
            self.watches
                .push_binary(zero.negate(), BinaryWatch { clause, other: one });
            self.watches
                .push_binary(one.negate(), BinaryWatch { clause, other: zero });
        } else {
            self.watches.push_long(
                zero.negate(),
                LongWatch {
                    clause,
                    blocker: one,
                },
            );
            self.watches.push_long(
                one.negate(),
                LongWatch {
                    clause,
                    blocker: zero,
                },
            );
        }

        match self.arena.is_learnt(clause) {
            true => self.counters.learnt_literals += size,
            false => self.counters.original_literals += size,
        }
    }

    /// Detaches a clause from the watch indices.
    ///
    /// A strict detach removes the watches at once; a lazy detach smudges the
    /// long lists for a later purge, and is sound only for a clause about to
    /// be freed.
    /// A clause detached while live --- frozen --- must be detached strictly.
    pub(crate) fn detach_clause(&mut self, clause: ClauseRef, strict: bool) {
        let size = self.arena.size(clause);
        let zero = self.arena.literal(clause, 0);
        let one = self.arena.literal(clause, 1);

        if size == 2 {
            self.watches.remove_binary(zero.negate(), clause);
            self.watches.remove_binary(one.negate(), clause);
        } else if strict {
            self.watches.remove_long(zero.negate(), clause);
            self.watches.remove_long(one.negate(), clause);
        } else {
            self.watches.smudge_long(zero.negate());
            self.watches.smudge_long(one.negate());
        }

        match self.arena.is_learnt(clause) {
            true => self.counters.learnt_literals -= size,
            false => self.counters.original_literals -= size,
        }
    }

    /// Removes a clause: detached (if attached), unhooked from any assignment
    /// it is the reason of, and freed in the arena.
    pub(crate) fn remove_clause(&mut self, clause: ClauseRef, attached: bool) {
        if attached {
            self.detach_clause(clause, false);
        }
        if self.locked(clause) {
            self.variables
                .clear_reason(self.arena.literal(clause, 0).atom());
        }
        self.arena.free(clause);
    }

    /// True if the clause is the reason of a current assignment.
    ///
    /// A locked clause is never removed or detached: analysis may yet walk
    /// the reason.
    pub(crate) fn locked(&self, clause: ClauseRef) -> bool {
        let zero = self.arena.literal(clause, 0);
        self.variables.literal_value(zero) == Some(true)
            && self.variables.reason_of(zero.atom()) == Some(clause)
    }
}

#[cfg(test)]
mod tests {
    use crate::{config::Config, solver::Solver};

    use super::*;

    fn solver_with_atoms(count: u32) -> Solver {
        let mut solver = Solver::from_config(Config::default());
        for _ in 0..count {
            solver.fresh_atom().unwrap();
        }
        solver
    }

    #[test]
    fn attached_clauses_watch_positions_zero_and_one() {
        let mut solver = solver_with_atoms(4);
        let literals: Vec<CLiteral> = (0..4).map(|atom| CLiteral::new(atom, true)).collect();

        solver.add_clause(literals.clone()).unwrap();
        solver.add_clause(vec![literals[0], -literals[1]]).unwrap();

        let long = solver.clause_db.originals[0];
        let binary = solver.clause_db.originals[1];

        let long_zero = solver.arena.literal(long, 0);
        let long_one = solver.arena.literal(long, 1);
        assert!(solver.watches.watched_long_once(long_zero.negate(), long));
        assert!(solver.watches.watched_long_once(long_one.negate(), long));

        let binary_zero = solver.arena.literal(binary, 0);
        let binary_one = solver.arena.literal(binary, 1);
        assert!(solver
            .watches
            .watched_binary_once(binary_zero.negate(), binary));
        assert!(solver
            .watches
            .watched_binary_once(binary_one.negate(), binary));
    }

    #[test]
    fn strict_detach_unwatches() {
        let mut solver = solver_with_atoms(3);
        let literals: Vec<CLiteral> = (0..3).map(|atom| CLiteral::new(atom, true)).collect();
        solver.add_clause(literals).unwrap();

        let clause = solver.clause_db.originals[0];
        solver.detach_clause(clause, true);

        assert!(solver.watches.unwatched(clause));
    }

    #[test]
    fn lazy_removal_unwatches_after_cleaning() {
        let mut solver = solver_with_atoms(3);
        let literals: Vec<CLiteral> = (0..3).map(|atom| CLiteral::new(atom, true)).collect();
        solver.add_clause(literals).unwrap();

        let clause = solver.clause_db.originals[0];
        solver.remove_clause(clause, true);
        assert!(solver.arena.is_deleted(clause));

        solver.watches.clean_all(&solver.arena);
        assert!(solver.watches.unwatched(clause));
    }
}
